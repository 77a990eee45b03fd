use image::{DynamicImage, Rgba, RgbaImage};
use pdf_compose::*;
use std::io::{self, Write};

fn count(haystack: &[u8], needle: &[u8]) -> usize {
    haystack.windows(needle.len()).filter(|w| *w == needle).count()
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn rfind(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).rposition(|w| w == needle)
}

/// Read the cross-reference table back, following `startxref`
fn xref_offsets(bytes: &[u8]) -> Vec<usize> {
    let start = rfind(bytes, b"startxref\r\n").unwrap() + "startxref\r\n".len();
    let end = start + find(&bytes[start..], b"\r\n").unwrap();
    let xref: usize = std::str::from_utf8(&bytes[start..end]).unwrap().parse().unwrap();
    assert!(bytes[xref..].starts_with(b"xref\r\n0 "));

    let table = std::str::from_utf8(&bytes[xref..]).unwrap();
    let mut lines = table.split("\r\n").skip(1);
    let count: usize = lines
        .next()
        .unwrap()
        .split(' ')
        .nth(1)
        .unwrap()
        .parse()
        .unwrap();
    assert_eq!(lines.next(), Some("0000000000 65535 f"));
    (1..count)
        .map(|_| {
            let entry = lines.next().unwrap();
            assert_eq!(entry.len(), 18);
            assert!(entry.ends_with(" 00000 n"));
            entry[..10].parse().unwrap()
        })
        .collect()
}

fn triangle() -> Path {
    let mut path = Path::new();
    path.move_to(Point::new(40.0, 40.0))
        .line_to(Point::new(140.0, 40.0))
        .curve_to(
            Point::new(120.0, 20.0),
            Point::new(60.0, 20.0),
            Point::new(40.0, 40.0),
        )
        .close();
    path
}

#[test]
fn triangle_and_text_on_a4() {
    let mut doc = Document::new();
    let page = doc.create_page(
        Unit::Mm,
        standard_size(PageSize::A4, Unit::Mm),
        Orientation::Portrait,
    );
    let font = doc.create_font("Helvetica", FontStyle::Bold, 20.0);
    let path = triangle();

    let mut r = doc.renderer(page).unwrap();
    r.fg(colours::BLACK).unwrap();
    r.bg(Colour::rgb(255, 128, 0)).unwrap();
    r.fill(&path).unwrap();
    r.stroke(&path).unwrap();
    r.text(&font, Point::new(40.0, 60.0), "Hello").unwrap();

    let objects = doc.object_count();
    let bytes = doc.to_bytes().unwrap();

    assert_eq!(count(&bytes, b"/Type /Page "), 1);
    assert_eq!(count(&bytes, b"/Type /Pages "), 1);
    assert_eq!(count(&bytes, b"/Type /Font "), 1);
    assert_eq!(count(&bytes, b"/BaseFont /Helvetica-Bold"), 1);
    assert_eq!(count(&bytes, b"BT\r\n"), 1);
    assert_eq!(count(&bytes, b"ET\r\n"), 1);
    assert_eq!(count(&bytes, b"\r\nf\r\n"), 1);
    assert_eq!(count(&bytes, b"\r\nS\r\n"), 1);
    assert_eq!(count(&bytes, b"(Hello) Tj"), 1);
    assert_eq!(count(&bytes, b"stream\r\n") - count(&bytes, b"endstream\r\n"), 1);

    let trailer = format!("trailer\r\n<< /Size {} /Root 1 0 R >>\r\n", objects + 1);
    assert!(find(&bytes, trailer.as_bytes()).is_some());
    assert_eq!(xref_offsets(&bytes).len(), objects);
}

#[test]
fn xref_points_at_every_object() {
    let mut doc = Document::new();
    let size = standard_size(PageSize::Letter, Unit::In);
    let first = doc.create_page(Unit::In, size, Orientation::Portrait);
    let font = doc.create_font("Times", FontStyle::Italic, 0.25);
    let image = doc.create_image(DynamicImage::new_rgb8(3, 3));
    let second = doc.create_page(Unit::In, size, Orientation::Landscape);

    doc.renderer(first)
        .unwrap()
        .text(&font, Point::new(1.0, 1.0), "first (page)")
        .unwrap();
    doc.renderer(second)
        .unwrap()
        .image(&image, Point::new(1.0, 1.0), Size::new(2.0, 2.0))
        .unwrap();

    let bytes = doc.to_bytes().unwrap();
    let offsets = xref_offsets(&bytes);
    assert_eq!(offsets.len(), 11);
    for (i, offset) in offsets.iter().enumerate() {
        let marker = format!("{} 0 obj\r\n", i + 1);
        assert!(
            bytes[*offset..].starts_with(marker.as_bytes()),
            "object {} is not at {offset}",
            i + 1
        );
    }
    assert!(find(&bytes, b"/Kids [ 5 0 R 10 0 R ]").is_some());
    assert!(find(&bytes, b"(first \\(page\\)) Tj").is_some());
}

#[test]
fn pages_advertise_only_their_own_resources() {
    let mut doc = Document::new();
    let size = standard_size(PageSize::A6, Unit::Cm);
    let text_page = doc.create_page(Unit::Cm, size, Orientation::Portrait);
    let image_page = doc.create_page(Unit::Cm, size, Orientation::Portrait);
    let font = doc.create_font("Courier", FontStyle::Regular, 1.0);
    let image = doc.create_image(DynamicImage::new_rgba8(1, 1));

    doc.renderer(text_page)
        .unwrap()
        .text(&font, Point::new(1.0, 1.0), "text")
        .unwrap();
    doc.renderer(image_page)
        .unwrap()
        .image(&image, Point::default(), Size::new(1.0, 1.0))
        .unwrap();

    let bytes = doc.to_bytes().unwrap();
    let text = String::from_utf8_lossy(&bytes);
    assert!(text.contains("/Resources << /Font << /F9 9 0 R >> /ProcSet 4 0 R >>"));
    assert!(text.contains("/Resources << /XObject << /Im10 10 0 R >> /ProcSet 4 0 R >>"));
}

#[test]
fn image_streams_have_exact_lengths() {
    let (width, height) = (7u32, 5u32);
    let raster = RgbaImage::from_fn(width, height, |x, y| {
        Rgba([x as u8, y as u8, 0, (x * y) as u8])
    });

    let mut doc = Document::new();
    let image = doc.create_image(DynamicImage::ImageRgba8(raster));
    assert_eq!(image.id().get(), 5);
    assert_eq!(image.mask_id().get(), 6);
    let bytes = doc.to_bytes().unwrap();

    let text = String::from_utf8_lossy(&bytes);
    assert!(text.contains(&format!(
        "/Width {width} /Height {height} /Length {} /SMask 6 0 R",
        3 * width * height
    )));
    assert!(text.contains(&format!(
        "/ColorSpace /DeviceGray /BitsPerComponent 8 /Width {width} /Height {height} /Length {} >>",
        width * height
    )));

    // the mask is the last stream in the file
    let mask_start = rfind(&bytes, b"stream\r\n").unwrap();
    let mask_start = rfind(&bytes[..mask_start], b"stream\r\n").unwrap() + "stream\r\n".len();
    let mask = &bytes[mask_start..mask_start + (width * height) as usize];
    assert_eq!(mask[0], 0);
    assert_eq!(mask[(width * 2 + 3) as usize], 6);
}

#[test]
fn identifiers_only_grow() {
    let mut doc = Document::new();
    let size = standard_size(PageSize::A5, Unit::Pt);
    let mut seen = vec![];
    for i in 0..3i32 {
        let page = doc.create_page(Unit::Pt, size, Orientation::Portrait);
        let page = doc.page(page).unwrap();
        seen.push(page.id());
        seen.push(page.content().id());
        let style = FontStyle::try_from(i).unwrap();
        seen.push(doc.create_font("Symbol", style, 9.0).id());
        let image = doc.create_image(DynamicImage::new_luma8(1, 1));
        seen.push(image.id());
        seen.push(image.mask_id());
    }
    assert!(seen.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(seen.first().map(|id| id.get()), Some(5));
    assert_eq!(doc.object_count(), 4 + seen.len());
}

#[test]
fn fonts_are_deduplicated_by_resolved_family() {
    let mut doc = Document::new();
    let times = doc.get_or_create_typeface("Times", FontStyle::Bold).id();
    assert_eq!(doc.get_or_create_typeface("Times", FontStyle::Bold).id(), times);
    assert_eq!(doc.get_or_create_typeface("Wingdings", FontStyle::Bold).id(), times);
    assert_ne!(doc.get_or_create_typeface("Times", FontStyle::Regular).id(), times);

    let bytes = doc.to_bytes().unwrap();
    assert_eq!(count(&bytes, b"/Type /Font "), 2);
}

#[test]
fn open_text_is_closed_on_close() {
    let mut doc = Document::new();
    let page = doc.create_page(Unit::Pt, Size::new(100.0, 100.0), Orientation::Portrait);
    let font = doc.create_font("Helvetica", FontStyle::Regular, 10.0);
    doc.renderer(page)
        .unwrap()
        .text(&font, Point::new(10.0, 10.0), "dangling")
        .unwrap();
    assert!(doc.renderer(page).unwrap().in_text());

    let bytes = doc.to_bytes().unwrap();
    let content = find(&bytes, b"(dangling) Tj\r\n").unwrap();
    assert!(bytes[content..].starts_with(b"(dangling) Tj\r\nET\r\n\r\nendstream"));
}

struct FailAfter {
    remaining: usize,
    written: Vec<u8>,
}

impl Write for FailAfter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.remaining == 0 {
            return Err(io::Error::new(io::ErrorKind::Other, "sink is full"));
        }
        let n = buf.len().min(self.remaining);
        self.remaining -= n;
        self.written.extend_from_slice(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn write_failures_are_returned() {
    let mut doc = Document::new();
    doc.create_page(Unit::Mm, standard_size(PageSize::A4, Unit::Mm), Orientation::Portrait);

    let mut sink = FailAfter {
        remaining: 40,
        written: Vec::new(),
    };
    let err = doc.close(&mut sink).unwrap_err();
    match err {
        PDFError::Io(e) => assert_eq!(e.to_string(), "sink is full"),
        other => panic!("unexpected error {other:?}"),
    }
    assert_eq!(sink.written.len(), 40);
    assert!(find(&sink.written, b"xref").is_none());
}

#[test]
fn invalid_configuration_is_rejected() {
    assert!(matches!(Unit::try_from(4), Err(PDFError::InvalidUnit(4))));
    assert!(matches!(PageSize::try_from(-1), Err(PDFError::InvalidPageSize(-1))));
    assert!(matches!(
        LineCap::try_from(9),
        Err(PDFError::InvalidArgument { kind: "line cap", .. })
    ));
}

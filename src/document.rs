use crate::{
    content::Renderer,
    font::{Font, FontStyle, TypeFace},
    image::ImageRef,
    outline::Outlines,
    page::Page,
    pagesize::Orientation,
    refs::{ObjId, ObjectRef, ObjectTable},
    resources::ResourceRegistry,
    units::{Size, Unit},
    writer::{begin_object, end_object, CountingWriter, Dict, Name, Ref},
    PDFError,
};
use id_arena::{Arena, Id};
use std::io::Write;

const HEADER: &[u8] = b"%PDF-1.7\r\n";
const BINARY_MARKER: &[u8] = &[200, 200, 200, 200, 13, 10];

// the objects every document starts with, in this order
const CATALOG: ObjId = ObjId::new(1);
const OUTLINES: ObjId = ObjId::new(2);
const PAGE_TREE: ObjId = ObjId::new(3);
const PROCSET: ObjId = ObjId::new(4);

/// A document is the main object that owns everything drawn into the PDF,
/// then writes it out in a single pass with a call to [Document::close].
///
/// Every object is given its identifier when it is created, so identifiers
/// grow strictly in creation order and the output lists objects in that
/// same order.
///
/// ```
/// use pdf_compose::*;
///
/// let mut doc = Document::new();
/// let page = doc.create_page(Unit::Mm, standard_size(PageSize::A4, Unit::Mm), Orientation::Portrait);
/// let font = doc.create_font("Helvetica", FontStyle::Bold, 7.0);
///
/// let mut triangle = Path::new();
/// triangle
///     .move_to(Point::new(40.0, 40.0))
///     .line_to(Point::new(140.0, 40.0))
///     .close();
///
/// let mut r = doc.renderer(page).unwrap();
/// r.fill(&triangle).unwrap();
/// r.text(&font, Point::new(40.0, 60.0), "Hello").unwrap();
///
/// let bytes = doc.to_bytes().unwrap();
/// assert!(bytes.starts_with(b"%PDF-1.7"));
/// ```
pub struct Document {
    objects: ObjectTable,
    outlines: Outlines,
    pages: Arena<Page>,
    page_order: Vec<Id<Page>>,
    resources: ResourceRegistry,
}

impl Default for Document {
    fn default() -> Self {
        Document::new()
    }
}

impl Document {
    /// Create an empty document: a catalog, an empty outline, an empty page
    /// tree and the procedure set every page shares
    pub fn new() -> Document {
        let mut objects = ObjectTable::new();
        objects.register(ObjectRef::Catalog);
        let outlines = Outlines {
            id: objects.register(ObjectRef::Outlines),
        };
        objects.register(ObjectRef::PageTree);
        objects.register(ObjectRef::ProcSet);

        Document {
            objects,
            outlines,
            pages: Arena::new(),
            page_order: Vec::new(),
            resources: ResourceRegistry::new(),
        }
    }

    /// Add a page to the end of the document. `size` is the portrait size of
    /// the page in `unit`; everything later drawn on the page is measured in
    /// `unit` as well.
    pub fn create_page(&mut self, unit: Unit, size: Size, orientation: Orientation) -> Id<Page> {
        let page_obj = self.objects.next_id();
        let content_obj = ObjId::new(page_obj.get() + 1);
        let id = self.pages.alloc(Page::new(
            page_obj,
            content_obj,
            PAGE_TREE,
            unit,
            size,
            orientation,
        ));
        self.objects.register(ObjectRef::Page(id));
        self.objects.register(ObjectRef::ContentForPage(id));
        self.page_order.push(id);
        log::debug!("created page {page_obj} with content {content_obj}");
        id
    }

    /// Get a page previously created by this document
    pub fn page(&self, page: Id<Page>) -> Option<&Page> {
        self.pages.get(page)
    }

    /// Mutable access to a page, e.g. to keep drawing through
    /// [Page::renderer] without going back through the document
    pub fn page_mut(&mut self, page: Id<Page>) -> Option<&mut Page> {
        self.pages.get_mut(page)
    }

    /// The renderer of a page, see [Page::renderer]
    pub fn renderer(&mut self, page: Id<Page>) -> Result<Renderer<'_>, PDFError> {
        self.pages
            .get_mut(page)
            .map(Page::renderer)
            .ok_or(PDFError::PageMissing)
    }

    /// Number of pages in the document
    pub fn page_count(&self) -> usize {
        self.page_order.len()
    }

    /// Number of objects created so far; the written cross-reference table
    /// has one more entry than this
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Get the typeface for a family and style, creating it on first use.
    /// Unknown family names fall back to Times.
    pub fn get_or_create_typeface(&mut self, name: &str, style: FontStyle) -> &TypeFace {
        self.resources
            .get_or_create_typeface(&mut self.objects, name, style)
    }

    /// A font handle for drawing text at `size`, measured in the unit of the
    /// page the text is drawn on
    pub fn create_font(&mut self, name: &str, style: FontStyle, size: f64) -> Font {
        let face = self.get_or_create_typeface(name, style);
        Font {
            face: face.id(),
            style,
            size,
        }
    }

    /// Add a raster image. Every call creates a new image, even for the same
    /// source. The pixels are only read when the document is written.
    pub fn create_image(&mut self, source: ::image::DynamicImage) -> ImageRef {
        self.resources.register_image(&mut self.objects, source)
    }

    /// Decode an image file with the `image` crate and add it, see [Document::create_image]
    pub fn create_image_from_path<P: AsRef<std::path::Path>>(
        &mut self,
        path: P,
    ) -> Result<ImageRef, PDFError> {
        let source = ::image::open(path)?;
        Ok(self.create_image(source))
    }

    pub fn resources(&self) -> &ResourceRegistry {
        &self.resources
    }

    /// Close every page's renderer and write the entire document to `w`.
    ///
    /// Objects are streamed straight into `w` as they are serialized. If
    /// writing fails the error is returned immediately and whatever already
    /// reached `w` must be discarded; use [Document::to_bytes] to get the
    /// whole document or nothing.
    pub fn close<W: Write>(mut self, w: W) -> Result<(), PDFError> {
        for page in self.page_order.iter() {
            self.pages
                .get_mut(*page)
                .ok_or(PDFError::PageMissing)?
                .close()?;
        }

        let mut w = CountingWriter::new(w);
        w.write_all(HEADER)?;
        w.write_all(BINARY_MARKER)?;

        let objects: Vec<(ObjId, ObjectRef)> = self.objects.iter().collect();
        let mut offsets = Vec::with_capacity(objects.len());
        for (id, object) in objects {
            offsets.push(w.offset());
            self.write_object(&mut w, id, object)?;
        }

        let xref = w.offset();
        write!(w, "xref\r\n0 {}\r\n", offsets.len() + 1)?;
        write!(w, "{:010} 65535 f\r\n", 0)?;
        for offset in offsets.iter() {
            write!(w, "{offset:010} 00000 n\r\n")?;
        }
        w.write_all(b"trailer\r\n")?;
        let mut trailer = Dict::start(&mut w)?;
        trailer
            .pair("Size", offsets.len() + 1)?
            .pair("Root", Ref(CATALOG))?;
        trailer.finish()?;
        write!(w, "startxref\r\n{xref}\r\n%%EOF\r\n")?;
        w.flush()?;

        log::info!(
            "wrote {} pages, {} objects, {} bytes",
            self.page_order.len(),
            offsets.len(),
            w.offset()
        );
        Ok(())
    }

    /// Close the document into memory, see [Document::close]
    pub fn to_bytes(self) -> Result<Vec<u8>, PDFError> {
        let mut out = Vec::new();
        self.close(&mut out)?;
        Ok(out)
    }

    fn write_object<W: Write>(
        &mut self,
        w: &mut W,
        id: ObjId,
        object: ObjectRef,
    ) -> Result<(), PDFError> {
        match object {
            ObjectRef::Catalog => {
                begin_object(w, id)?;
                let mut dict = Dict::start(w)?;
                dict.pair("Type", Name("Catalog"))?
                    .pair("Outlines", Ref(OUTLINES))?
                    .pair("Pages", Ref(PAGE_TREE))?;
                dict.finish()?;
                end_object(w)?;
            }
            ObjectRef::Outlines => self.outlines.write(w)?,
            ObjectRef::PageTree => {
                let kids = self
                    .page_order
                    .iter()
                    .filter_map(|page| self.pages.get(*page))
                    .map(|page| format!(" {}", Ref(page.id())))
                    .collect::<String>();
                begin_object(w, id)?;
                let mut dict = Dict::start(w)?;
                dict.pair("Type", Name("Pages"))?
                    .pair("Count", self.page_order.len())?
                    .pair("Kids", format_args!("[{kids} ]"))?;
                dict.finish()?;
                end_object(w)?;
            }
            ObjectRef::ProcSet => {
                begin_object(w, id)?;
                w.write_all(b"[ /PDF /Text ]\r\n")?;
                end_object(w)?;
            }
            ObjectRef::Page(page) => {
                self.pages
                    .get(page)
                    .ok_or(PDFError::PageMissing)?
                    .write(w, PROCSET)?;
            }
            ObjectRef::ContentForPage(page) => {
                self.pages
                    .get(page)
                    .ok_or(PDFError::PageMissing)?
                    .content()
                    .write(w)?;
            }
            ObjectRef::TypeFace(face) => self.resources.faces[face].write(w)?,
            // the mask's pixels are collected while the image is written,
            // and the mask always comes right after its image
            ObjectRef::Image(image) => self.resources.images[image].write(w)?,
            ObjectRef::ImageMask(image) => self.resources.images[image].mask.write(w)?,
        }
        Ok(())
    }
}

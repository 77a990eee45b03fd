use crate::refs::ObjId;
use crate::writer::{begin_object, begin_stream, end_object, end_stream, Dict, Name, Ref};
use crate::PDFError;
use image::DynamicImage;
use std::io::Write;

/// A raster image XObject and its soft mask. The colour channels go into the
/// image stream and the alpha channel into the mask; both are extracted from
/// the source while the document is being written, not when it is added.
pub struct Image {
    pub(crate) id: ObjId,
    pub(crate) source: DynamicImage,
    pub(crate) mask: ImageMask,
}

/// The single channel, 8 bit greyscale soft mask paired with an [Image]
pub struct ImageMask {
    pub(crate) id: ObjId,
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) alpha: Vec<u8>,
}

/// A handle to an image registered with a document, used to place it on pages
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ImageRef {
    pub(crate) id: ObjId,
    pub(crate) mask: ObjId,
    pub(crate) width: u32,
    pub(crate) height: u32,
}

impl ImageRef {
    pub fn id(&self) -> ObjId {
        self.id
    }

    pub fn mask_id(&self) -> ObjId {
        self.mask
    }

    /// Width of the source raster, in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height of the source raster, in pixels
    pub fn height(&self) -> u32 {
        self.height
    }
}

pub(crate) fn resource_name(image: ObjId) -> String {
    format!("Im{image}")
}

impl Image {
    pub(crate) fn new(id: ObjId, mask_id: ObjId, source: DynamicImage) -> Image {
        let (width, height) = (source.width(), source.height());
        Image {
            id,
            source,
            mask: ImageMask {
                id: mask_id,
                width,
                height,
                alpha: Vec::new(),
            },
        }
    }

    pub(crate) fn handle(&self) -> ImageRef {
        ImageRef {
            id: self.id,
            mask: self.mask.id,
            width: self.mask.width,
            height: self.mask.height,
        }
    }

    /// Write the image object, scanning the source top to bottom, left to
    /// right, and collecting its alpha channel into the paired mask
    pub(crate) fn write<W: Write>(&mut self, w: &mut W) -> Result<(), PDFError> {
        let (width, height) = (self.mask.width, self.mask.height);

        begin_object(w, self.id)?;
        let mut dict = Dict::start(w)?;
        dict.pair("Type", Name("XObject"))?
            .pair("Subtype", Name("Image"))?
            .pair("ColorSpace", Name("DeviceRGB"))?
            .pair("BitsPerComponent", 8)?
            .pair("Width", width)?
            .pair("Height", height)?
            .pair("Length", 3 * width as u64 * height as u64)?
            .pair("SMask", Ref(self.mask.id))?;
        dict.finish()?;

        begin_stream(w)?;
        let pixels = self.source.to_rgba8();
        let mut row_bytes = Vec::with_capacity(width as usize * 3);
        self.mask.alpha.clear();
        self.mask.alpha.reserve(width as usize * height as usize);
        for row in pixels.rows() {
            row_bytes.clear();
            for pixel in row {
                let [r, g, b, a] = pixel.0;
                row_bytes.extend_from_slice(&[r, g, b]);
                self.mask.alpha.push(a);
            }
            w.write_all(&row_bytes)?;
        }
        end_stream(w)?;
        end_object(w)?;
        Ok(())
    }
}

impl ImageMask {
    pub(crate) fn write<W: Write>(&self, w: &mut W) -> Result<(), PDFError> {
        begin_object(w, self.id)?;
        let mut dict = Dict::start(w)?;
        dict.pair("Type", Name("XObject"))?
            .pair("Subtype", Name("Image"))?
            .pair("ColorSpace", Name("DeviceGray"))?
            .pair("BitsPerComponent", 8)?
            .pair("Width", self.width)?
            .pair("Height", self.height)?
            .pair("Length", self.alpha.len())?;
        dict.finish()?;

        begin_stream(w)?;
        w.write_all(&self.alpha)?;
        end_stream(w)?;
        end_object(w)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn two_by_one() -> Image {
        let mut raster = RgbaImage::new(2, 1);
        raster.put_pixel(0, 0, Rgba([10, 20, 30, 40]));
        raster.put_pixel(1, 0, Rgba([50, 60, 70, 80]));
        Image::new(ObjId::new(5), ObjId::new(6), DynamicImage::ImageRgba8(raster))
    }

    #[test]
    fn colour_and_alpha_are_split() {
        let mut image = two_by_one();
        let mut out = Vec::new();
        image.write(&mut out).unwrap();

        let header = b"5 0 obj\r\n<< /Type /XObject /Subtype /Image /ColorSpace /DeviceRGB \
/BitsPerComponent 8 /Width 2 /Height 1 /Length 6 /SMask 6 0 R >>\r\nstream\r\n";
        assert!(out.starts_with(header));
        assert_eq!(&out[header.len()..header.len() + 6], &[10, 20, 30, 50, 60, 70]);
        assert!(out.ends_with(b"\r\nendstream\r\nendobj\r\n"));
        assert_eq!(image.mask.alpha, vec![40, 80]);

        let mut out = Vec::new();
        image.mask.write(&mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("/ColorSpace /DeviceGray"));
        assert!(text.contains("/Length 2 >>"));
    }

    #[test]
    fn rows_are_written_top_to_bottom() {
        let mut raster = RgbaImage::new(1, 2);
        raster.put_pixel(0, 0, Rgba([1, 1, 1, 255]));
        raster.put_pixel(0, 1, Rgba([2, 2, 2, 0]));
        let mut image = Image::new(ObjId::new(1), ObjId::new(2), DynamicImage::ImageRgba8(raster));
        let mut out = Vec::new();
        image.write(&mut out).unwrap();
        let start = out.windows(8).position(|w| w == b"stream\r\n").unwrap() + 8;
        assert_eq!(&out[start..start + 6], &[1, 1, 1, 2, 2, 2]);
        assert_eq!(image.mask.alpha, vec![255, 0]);
    }

    #[test]
    fn opaque_sources_get_a_solid_mask() {
        let raster = image::RgbImage::from_pixel(3, 2, image::Rgb([9, 9, 9]));
        let mut image = Image::new(ObjId::new(1), ObjId::new(2), DynamicImage::ImageRgb8(raster));
        image.write(&mut Vec::new()).unwrap();
        assert_eq!(image.mask.alpha, vec![255; 6]);
        assert_eq!(image.handle().width(), 3);
        assert_eq!(image.handle().height(), 2);
    }
}

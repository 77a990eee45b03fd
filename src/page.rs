use crate::content::{Renderer, RendererState};
use crate::font::resource_name as font_resource;
use crate::image::resource_name as image_resource;
use crate::pagesize::Orientation;
use crate::refs::ObjId;
use crate::units::{Size, Unit};
use crate::writer::{begin_object, begin_stream, end_object, end_stream, Dict, Name, Real, Ref};
use crate::PDFError;
use std::io::Write;

/// The drawing operators of one page, appended to by its [Renderer]
#[derive(Debug)]
pub struct ContentStream {
    pub(crate) id: ObjId,
    pub(crate) bytes: Vec<u8>,
}

impl ContentStream {
    pub fn id(&self) -> ObjId {
        self.id
    }

    /// The operators rendered so far
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub(crate) fn write<W: Write>(&self, w: &mut W) -> Result<(), PDFError> {
        begin_object(w, self.id)?;
        let mut dict = Dict::start(w)?;
        dict.pair("Length", self.bytes.len())?;
        dict.finish()?;
        begin_stream(w)?;
        w.write_all(&self.bytes)?;
        end_stream(w)?;
        end_object(w)?;
        Ok(())
    }
}

/// A single page of a [crate::Document]. Pages are created through
/// [crate::Document::create_page] and drawn on through [Page::renderer].
#[derive(Debug)]
pub struct Page {
    pub(crate) id: ObjId,
    pub(crate) parent: ObjId,
    pub(crate) unit: Unit,
    pub(crate) size: Size,
    pub(crate) orientation: Orientation,
    pub(crate) content: ContentStream,
    renderer: Option<RendererState>,
}

impl Page {
    pub(crate) fn new(
        id: ObjId,
        content: ObjId,
        parent: ObjId,
        unit: Unit,
        size: Size,
        orientation: Orientation,
    ) -> Page {
        Page {
            id,
            parent,
            unit,
            size,
            orientation,
            content: ContentStream {
                id: content,
                bytes: Vec::with_capacity(1024),
            },
            renderer: None,
        }
    }

    pub fn id(&self) -> ObjId {
        self.id
    }

    /// The unit every length drawn on this page is measured in
    pub fn unit(&self) -> Unit {
        self.unit
    }

    /// The portrait size the page was created with, in the page's unit
    pub fn size(&self) -> Size {
        self.size
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn content(&self) -> &ContentStream {
        &self.content
    }

    /// The page's bounds in points, after applying its orientation
    pub fn media_box(&self) -> Size {
        self.orientation
            .apply(self.size)
            .change_unit(self.unit, Unit::Pt)
    }

    /// The renderer for this page. It is created on first use and every
    /// later call continues with the same state (open text block, current
    /// font, resources used so far).
    pub fn renderer(&mut self) -> Renderer<'_> {
        let unit = self.unit;
        let state = self.renderer.get_or_insert_with(|| RendererState::new(unit));
        Renderer {
            state,
            out: &mut self.content.bytes,
        }
    }

    /// Close the renderer if one was ever created
    pub(crate) fn close(&mut self) -> Result<(), PDFError> {
        if self.renderer.is_some() {
            self.renderer().close()?;
        }
        Ok(())
    }

    pub(crate) fn write<W: Write>(&self, w: &mut W, procset: ObjId) -> Result<(), PDFError> {
        let media_box = self.media_box();

        begin_object(w, self.id)?;
        let mut dict = Dict::start(w)?;
        dict.pair("Type", Name("Page"))?
            .pair("Parent", Ref(self.parent))?
            .pair(
                "MediaBox",
                format_args!("[0 0 {} {}]", Real(media_box.width), Real(media_box.height)),
            )?
            .pair("Contents", Ref(self.content.id))?
            .pair("Resources", self.resources(procset))?;
        dict.finish()?;
        end_object(w)?;
        Ok(())
    }

    /// The resource dictionary: only the faces and images this page's
    /// renderer actually referenced
    fn resources(&self, procset: ObjId) -> String {
        let mut resources = String::from("<<");
        if let Some(state) = &self.renderer {
            let fonts: Vec<String> = state
                .fonts()
                .map(|face| format!(" {} {}", Name(&font_resource(face)), Ref(face)))
                .collect();
            if !fonts.is_empty() {
                resources.push_str(&format!(" /Font <<{} >>", fonts.concat()));
            }
            let images: Vec<String> = state
                .images()
                .map(|image| format!(" {} {}", Name(&image_resource(image)), Ref(image)))
                .collect();
            if !images.is_empty() {
                resources.push_str(&format!(" /XObject <<{} >>", images.concat()));
            }
        }
        resources.push_str(&format!(" /ProcSet {} >>", Ref(procset)));
        resources
    }
}

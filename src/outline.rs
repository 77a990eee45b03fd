use crate::refs::ObjId;
use crate::writer::{begin_object, end_object, Dict, Name};
use crate::PDFError;
use std::io::Write;

/// The document outline root. Bookmarks are not modelled, so the outline is
/// always empty, but the catalog still points at it.
#[derive(Debug)]
pub(crate) struct Outlines {
    pub(crate) id: ObjId,
}

impl Outlines {
    pub(crate) fn write<W: Write>(&self, w: &mut W) -> Result<(), PDFError> {
        begin_object(w, self.id)?;
        let mut dict = Dict::start(w)?;
        dict.pair("Type", Name("Outlines"))?.pair("Count", 0)?;
        dict.finish()?;
        end_object(w)?;
        Ok(())
    }
}

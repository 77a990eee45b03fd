use crate::{
    refs::ObjId,
    writer::{begin_object, end_object, Dict, Name},
    PDFError,
};
use std::io::Write;

/// One of the standard Type1 families every PDF reader provides. Fonts are
/// referenced by name only; nothing is embedded.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FontFamily {
    Times,
    Helvetica,
    Courier,
    Symbol,
    ZapfDingbats,
}

impl FontFamily {
    /// Resolve a family name. Anything unrecognised falls back to
    /// [FontFamily::Times].
    pub fn resolve(name: &str) -> FontFamily {
        match name {
            "Times" => FontFamily::Times,
            "Helvetica" => FontFamily::Helvetica,
            "Courier" => FontFamily::Courier,
            "Symbol" => FontFamily::Symbol,
            "ZapfDingbats" => FontFamily::ZapfDingbats,
            _ => {
                log::warn!("unknown font family {name:?}, using Times");
                FontFamily::Times
            }
        }
    }

    /// The base font name of this family in the given style
    pub fn base_font(self, style: FontStyle) -> &'static str {
        use FontFamily::*;
        use FontStyle::*;
        match (self, style) {
            (Times, Regular) => "Times-Roman",
            (Times, Bold) => "Times-Bold",
            (Times, Italic) => "Times-Italic",
            (Times, BoldItalic) => "Times-BoldItalic",
            (Helvetica, Regular) => "Helvetica",
            (Helvetica, Bold) => "Helvetica-Bold",
            (Helvetica, Italic) => "Helvetica-Oblique",
            (Helvetica, BoldItalic) => "Helvetica-BoldOblique",
            (Courier, Regular) => "Courier",
            (Courier, Bold) => "Courier-Bold",
            (Courier, Italic) => "Courier-Oblique",
            (Courier, BoldItalic) => "Courier-BoldOblique",
            (Symbol, _) => "Symbol",
            (ZapfDingbats, _) => "ZapfDingbats",
        }
    }
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FontStyle {
    #[default]
    Regular = 0,
    Bold = 1,
    Italic = 2,
    BoldItalic = 3,
}

impl TryFrom<i32> for FontStyle {
    type Error = PDFError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(FontStyle::Regular),
            1 => Ok(FontStyle::Bold),
            2 => Ok(FontStyle::Italic),
            3 => Ok(FontStyle::BoldItalic),
            _ => Err(PDFError::InvalidArgument {
                kind: "font style",
                value,
            }),
        }
    }
}

/// A standard typeface, written once per document no matter how many
/// [Font]s refer to it
#[derive(Debug, Clone, PartialEq)]
pub struct TypeFace {
    pub(crate) id: ObjId,
    pub(crate) family: FontFamily,
    pub(crate) style: FontStyle,
}

impl TypeFace {
    pub fn id(&self) -> ObjId {
        self.id
    }

    pub fn family(&self) -> FontFamily {
        self.family
    }

    pub fn style(&self) -> FontStyle {
        self.style
    }

    pub fn base_font(&self) -> &'static str {
        self.family.base_font(self.style)
    }

    /// The key this face is listed under in page resource dictionaries
    pub fn resource_name(&self) -> String {
        resource_name(self.id)
    }

    pub(crate) fn write<W: Write>(&self, w: &mut W) -> Result<(), PDFError> {
        begin_object(w, self.id)?;
        let mut dict = Dict::start(w)?;
        dict.pair("Type", Name("Font"))?
            .pair("Subtype", Name("Type1"))?
            .pair("BaseFont", Name(self.base_font()))?
            .pair("Name", Name(&self.resource_name()))?;
        dict.finish()?;
        end_object(w)?;
        Ok(())
    }
}

pub(crate) fn resource_name(face: ObjId) -> String {
    format!("F{face}")
}

/// A typeface at a particular size, as handed out by
/// [crate::Document::create_font]. Two fonts are equal when they share a
/// typeface and a size.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Font {
    pub(crate) face: ObjId,
    pub(crate) style: FontStyle,
    pub(crate) size: f64,
}

impl Font {
    /// Identifier of the underlying typeface
    pub fn id(&self) -> ObjId {
        self.face
    }

    pub fn style(&self) -> FontStyle {
        self.style
    }

    /// Size, in the unit of whichever page the font is drawn on
    pub fn size(&self) -> f64 {
        self.size
    }
}

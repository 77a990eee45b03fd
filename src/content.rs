//! Rendering of drawing operations into a page's content stream.

use crate::arc::{arc_segments, arc_start};
use crate::colour::Colour;
use crate::font::{resource_name as font_resource, Font};
use crate::image::{resource_name as image_resource, ImageRef};
use crate::path::{Path, PathCommand};
use crate::refs::ObjId;
use crate::transform::Transform;
use crate::units::{Point, Size, Unit};
use crate::writer::Real;
use crate::PDFError;
use std::collections::BTreeSet;
use std::io::Write;

/// How the ends of stroked lines are drawn
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum LineCap {
    #[default]
    Butt = 0,
    Round = 1,
    Square = 2,
}

impl TryFrom<i32> for LineCap {
    type Error = PDFError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(LineCap::Butt),
            1 => Ok(LineCap::Round),
            2 => Ok(LineCap::Square),
            _ => Err(PDFError::InvalidArgument {
                kind: "line cap",
                value,
            }),
        }
    }
}

/// How corners of stroked paths are drawn
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum LineJoin {
    #[default]
    Mitre = 0,
    Round = 1,
    Bevel = 2,
}

impl TryFrom<i32> for LineJoin {
    type Error = PDFError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(LineJoin::Mitre),
            1 => Ok(LineJoin::Round),
            2 => Ok(LineJoin::Bevel),
            _ => Err(PDFError::InvalidArgument {
                kind: "line join",
                value,
            }),
        }
    }
}

/// Per-page renderer state that outlives any single [Renderer] borrow
#[derive(Debug)]
pub(crate) struct RendererState {
    unit: Unit,
    in_text: bool,
    last_font: Option<Font>,
    fonts: BTreeSet<ObjId>,
    images: BTreeSet<ObjId>,
}

impl RendererState {
    pub(crate) fn new(unit: Unit) -> RendererState {
        RendererState {
            unit,
            in_text: false,
            last_font: None,
            fonts: BTreeSet::new(),
            images: BTreeSet::new(),
        }
    }

    /// Typefaces referenced by the page so far
    pub(crate) fn fonts(&self) -> impl Iterator<Item = ObjId> + '_ {
        self.fonts.iter().copied()
    }

    /// Images referenced by the page so far
    pub(crate) fn images(&self) -> impl Iterator<Item = ObjId> + '_ {
        self.images.iter().copied()
    }
}

/// Draws onto a page, appending operators to its content stream. Obtained
/// from [crate::Page::renderer]; all coordinates and lengths are in the unit
/// the page was created with.
///
/// Text is collected into text blocks: the first [Renderer::text] opens one
/// and any other operation closes it again.
pub struct Renderer<'a> {
    pub(crate) state: &'a mut RendererState,
    pub(crate) out: &'a mut Vec<u8>,
}

#[allow(clippy::write_with_newline)]
impl Renderer<'_> {
    fn pt(&self, value: f64) -> Real {
        Real(self.state.unit.to_pt(value))
    }

    fn end_text(&mut self) -> Result<(), PDFError> {
        if self.state.in_text {
            write!(self.out, "ET\r\n")?;
            self.state.in_text = false;
        }
        Ok(())
    }

    /// Close any open text block. Safe to call any number of times.
    pub fn close(&mut self) -> Result<(), PDFError> {
        self.end_text()
    }

    /// Whether a text block is currently open
    pub fn in_text(&self) -> bool {
        self.state.in_text
    }

    /// Save the graphics state
    pub fn push_state(&mut self) -> Result<(), PDFError> {
        self.end_text()?;
        write!(self.out, "q\r\n")?;
        Ok(())
    }

    /// Restore the graphics state saved by the matching [Renderer::push_state]
    pub fn pop_state(&mut self) -> Result<(), PDFError> {
        self.end_text()?;
        write!(self.out, "Q\r\n")?;
        // the selected font is part of the state that was just restored
        self.state.last_font = None;
        Ok(())
    }

    /// Concatenate an arbitrary matrix onto the current transformation.
    /// The translation components are taken as points.
    pub fn transform(&mut self, transform: Transform) -> Result<(), PDFError> {
        self.end_text()?;
        write!(self.out, "{transform} cm\r\n")?;
        Ok(())
    }

    pub fn rotate(&mut self, radians: f64) -> Result<(), PDFError> {
        self.transform(Transform::rotate(radians))
    }

    pub fn skew(&mut self, x: f64, y: f64) -> Result<(), PDFError> {
        self.transform(Transform::skew(x, y))
    }

    pub fn scale(&mut self, sx: f64, sy: f64) -> Result<(), PDFError> {
        self.transform(Transform::scale(sx, sy))
    }

    pub fn translate(&mut self, by: Point) -> Result<(), PDFError> {
        let unit = self.state.unit;
        self.transform(Transform::translate(unit.to_pt(by.x), unit.to_pt(by.y)))
    }

    /// Set the stroke colour
    pub fn fg(&mut self, colour: Colour) -> Result<(), PDFError> {
        self.end_text()?;
        let [r, g, b] = colour.normalised();
        write!(self.out, "{} {} {} RG\r\n", Real(r), Real(g), Real(b))?;
        Ok(())
    }

    /// Set the fill colour, which is also the colour text is drawn in
    pub fn bg(&mut self, colour: Colour) -> Result<(), PDFError> {
        self.end_text()?;
        let [r, g, b] = colour.normalised();
        write!(self.out, "{} {} {} rg\r\n", Real(r), Real(g), Real(b))?;
        Ok(())
    }

    pub fn line_width(&mut self, width: f64) -> Result<(), PDFError> {
        self.end_text()?;
        let width = self.pt(width);
        write!(self.out, "{width} w\r\n")?;
        Ok(())
    }

    pub fn line_cap(&mut self, cap: LineCap) -> Result<(), PDFError> {
        self.end_text()?;
        write!(self.out, "{} J\r\n", cap as i32)?;
        Ok(())
    }

    pub fn line_join(&mut self, join: LineJoin) -> Result<(), PDFError> {
        self.end_text()?;
        write!(self.out, "{} j\r\n", join as i32)?;
        Ok(())
    }

    /// Set the dash pattern of stroked lines: alternating dash and gap
    /// lengths, starting `phase` into the pattern. An empty pattern draws
    /// solid lines.
    pub fn line_pattern(&mut self, pattern: &[f64], phase: f64) -> Result<(), PDFError> {
        self.end_text()?;
        write!(self.out, "[")?;
        for length in pattern {
            let length = self.pt(*length);
            write!(self.out, " {length}")?;
        }
        let phase = self.pt(phase);
        write!(self.out, " ] {phase} d\r\n")?;
        Ok(())
    }

    /// Draw a run of text with its baseline starting at `at`
    pub fn text(&mut self, font: &Font, at: Point, text: &str) -> Result<(), PDFError> {
        if !self.state.in_text {
            write!(self.out, "BT\r\n")?;
            self.state.in_text = true;
        }

        if self.state.last_font != Some(*font) {
            let size = self.pt(font.size);
            write!(self.out, "/{} {size} Tf\r\n", font_resource(font.face))?;
            self.state.last_font = Some(*font);
            self.state.fonts.insert(font.face);
        }

        let (x, y) = (self.pt(at.x), self.pt(at.y));
        write!(self.out, "1 0 0 1 {x} {y} Tm\r\n(")?;
        write_escaped(self.out, text);
        write!(self.out, ") Tj\r\n")?;
        Ok(())
    }

    /// Draw an image stretched over the rectangle starting at `at`
    pub fn image(&mut self, image: &ImageRef, at: Point, size: Size) -> Result<(), PDFError> {
        self.end_text()?;
        let unit = self.state.unit;
        let placement = Transform::scale(unit.to_pt(size.width), unit.to_pt(size.height))
            .with_translate(unit.to_pt(at.x), unit.to_pt(at.y));

        self.push_state()?;
        self.transform(placement)?;
        write!(self.out, "/{} Do\r\n", image_resource(image.id))?;
        self.state.images.insert(image.id);
        self.pop_state()
    }

    /// Outline `path` with the current stroke colour and line style
    pub fn stroke(&mut self, path: &Path) -> Result<(), PDFError> {
        self.end_text()?;
        self.paint(path, "S")
    }

    /// Fill `path` with the current fill colour
    pub fn fill(&mut self, path: &Path) -> Result<(), PDFError> {
        self.end_text()?;
        self.paint(path, "f")
    }

    // The path is rendered aside first so that a decoding fault leaves the
    // content stream untouched.
    fn paint(&mut self, path: &Path, operator: &str) -> Result<(), PDFError> {
        let mut ops: Vec<u8> = Vec::with_capacity(path.len() * 2);
        write_path(&mut ops, path, self.state.unit)?;
        write!(ops, "{operator}\r\n")?;
        self.out.extend_from_slice(&ops);
        Ok(())
    }
}

#[allow(clippy::write_with_newline)]
fn write_path(out: &mut Vec<u8>, path: &Path, unit: Unit) -> Result<(), PDFError> {
    let pt = |v: f64| Real(unit.to_pt(v));
    let mut has_current_point = false;

    for command in path.commands() {
        match command? {
            PathCommand::Move(to) => {
                write!(out, "{} {} m\r\n", pt(to.x), pt(to.y))?;
            }
            PathCommand::Line(to) => {
                write!(out, "{} {} l\r\n", pt(to.x), pt(to.y))?;
            }
            PathCommand::Curve {
                control1,
                control2,
                to,
            } => {
                write!(
                    out,
                    "{} {} {} {} {} {} c\r\n",
                    pt(control1.x),
                    pt(control1.y),
                    pt(control2.x),
                    pt(control2.y),
                    pt(to.x),
                    pt(to.y)
                )?;
            }
            PathCommand::Rect { from, to } => {
                let extent = to - from;
                write!(
                    out,
                    "{} {} {} {} re\r\n",
                    pt(from.x),
                    pt(from.y),
                    pt(extent.x),
                    pt(extent.y)
                )?;
            }
            PathCommand::Arc {
                centre,
                radius,
                start,
                sweep,
            } => {
                let centre = centre.change_unit(unit, Unit::Pt);
                let radius = unit.to_pt(radius);
                let begin = arc_start(centre, radius, start);
                // an arc continues the current sub-path, or starts one
                let op = if has_current_point { "l" } else { "m" };
                write!(out, "{} {} {op}\r\n", Real(begin.x), Real(begin.y))?;
                for segment in arc_segments(centre, radius, start, sweep)? {
                    write!(
                        out,
                        "{} {} {} {} {} {} c\r\n",
                        Real(segment.control1.x),
                        Real(segment.control1.y),
                        Real(segment.control2.x),
                        Real(segment.control2.y),
                        Real(segment.to.x),
                        Real(segment.to.y)
                    )?;
                }
            }
            PathCommand::Close => {
                write!(out, "h\r\n")?;
            }
        }
        has_current_point = true;
    }

    Ok(())
}

// Literal strings need the delimiters, the escape character and control
// characters escaped. Everything else goes out as UTF-8.
fn write_escaped(out: &mut Vec<u8>, text: &str) {
    for ch in text.chars() {
        let escaped: Option<&[u8]> = match ch {
            '\n' => Some(b"\\n"),
            '\r' => Some(b"\\r"),
            '\t' => Some(b"\\t"),
            '\u{08}' => Some(b"\\b"),
            '\u{0c}' => Some(b"\\f"),
            '(' => Some(b"\\("),
            ')' => Some(b"\\)"),
            '\\' => Some(b"\\\\"),
            _ => None,
        };
        match escaped {
            Some(bytes) => out.extend_from_slice(bytes),
            None => {
                let mut buf = [0u8; 4];
                out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
            }
        }
    }
}

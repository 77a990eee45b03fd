//! Recorded drawing paths.
//!
//! A [Path] is an append-only byte buffer of tagged commands. Each command is
//! a one byte tag followed by its operands, every operand an 8 byte
//! little-endian IEEE-754 double. Paths are replayed with a [PathReader],
//! which is purely positional: any number of readers may walk the same path
//! at once.
//!
//! ```
//! use pdf_compose::{Path, PathCommand, Point};
//!
//! let mut path = Path::new();
//! path.move_to(Point::new(40.0, 40.0));
//! path.line_to(Point::new(140.0, 40.0));
//! path.close();
//!
//! let commands: Vec<PathCommand> = path.commands().collect::<Result<_, _>>().unwrap();
//! assert_eq!(commands.len(), 3);
//! assert_eq!(commands[2], PathCommand::Close);
//! ```

use crate::units::Point;
use crate::PDFError;

const OPERAND_SIZE: usize = std::mem::size_of::<f64>();

/// The tag that introduces each recorded command
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CommandType {
    Move = b'M',
    Line = b'L',
    Curve = b'C',
    Rect = b'R',
    Arc = b'A',
    Close = b'Z',
}

impl CommandType {
    fn from_tag(tag: u8) -> Option<CommandType> {
        match tag {
            b'M' => Some(CommandType::Move),
            b'L' => Some(CommandType::Line),
            b'C' => Some(CommandType::Curve),
            b'R' => Some(CommandType::Rect),
            b'A' => Some(CommandType::Arc),
            b'Z' => Some(CommandType::Close),
            _ => None,
        }
    }

    /// How many operands follow this tag
    pub fn operand_count(self) -> usize {
        match self {
            CommandType::Move | CommandType::Line => 2,
            CommandType::Curve => 6,
            CommandType::Rect => 4,
            CommandType::Arc => 5,
            CommandType::Close => 0,
        }
    }
}

/// A fully decoded path command
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PathCommand {
    Move(Point),
    Line(Point),
    Curve {
        control1: Point,
        control2: Point,
        to: Point,
    },
    Rect {
        from: Point,
        to: Point,
    },
    Arc {
        centre: Point,
        radius: f64,
        start: f64,
        sweep: f64,
    },
    Close,
}

/// An append-only sequence of drawing commands, consumed by
/// [crate::Renderer::stroke] and [crate::Renderer::fill]
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Path {
    buf: Vec<u8>,
}

impl Path {
    pub fn new() -> Path {
        Path {
            buf: Vec::with_capacity(64),
        }
    }

    fn push(&mut self, command: CommandType, operands: &[f64]) {
        debug_assert_eq!(operands.len(), command.operand_count());
        self.buf.reserve(1 + operands.len() * OPERAND_SIZE);
        self.buf.push(command as u8);
        for operand in operands {
            self.buf.extend_from_slice(&operand.to_le_bytes());
        }
    }

    /// Begin a new sub-path at `to`
    pub fn move_to(&mut self, to: Point) -> &mut Self {
        self.push(CommandType::Move, &[to.x, to.y]);
        self
    }

    /// Append a straight line from the current point to `to`
    pub fn line_to(&mut self, to: Point) -> &mut Self {
        self.push(CommandType::Line, &[to.x, to.y]);
        self
    }

    /// Append a cubic Bézier curve from the current point to `to`
    pub fn curve_to(&mut self, control1: Point, control2: Point, to: Point) -> &mut Self {
        self.push(
            CommandType::Curve,
            &[control1.x, control1.y, control2.x, control2.y, to.x, to.y],
        );
        self
    }

    /// Append a rectangle spanning two opposite corners
    pub fn rect(&mut self, from: Point, to: Point) -> &mut Self {
        self.push(CommandType::Rect, &[from.x, from.y, to.x, to.y]);
        self
    }

    /// Append a circular arc around `centre`, starting at `start` radians and
    /// sweeping `sweep` radians (negative sweeps run clockwise)
    pub fn arc(&mut self, centre: Point, radius: f64, start: f64, sweep: f64) -> &mut Self {
        self.push(CommandType::Arc, &[centre.x, centre.y, radius, start, sweep]);
        self
    }

    /// Close the current sub-path
    pub fn close(&mut self) -> &mut Self {
        self.push(CommandType::Close, &[]);
        self
    }

    #[cfg(test)]
    pub(crate) fn from_bytes(buf: Vec<u8>) -> Path {
        Path { buf }
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Size of the encoded path in bytes
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// A fresh cursor positioned at the first command
    pub fn reader(&self) -> PathReader<'_> {
        PathReader {
            buf: &self.buf,
            pos: 0,
            pending: 0,
        }
    }

    /// Decode every command in recording order
    pub fn commands(&self) -> Commands<'_> {
        Commands {
            reader: self.reader(),
            failed: false,
        }
    }
}

/// A forward-only cursor over a [Path]
#[derive(Debug, Clone)]
pub struct PathReader<'a> {
    buf: &'a [u8],
    pos: usize,
    // operands of the current command not read yet
    pending: usize,
}

impl<'a> PathReader<'a> {
    /// Read the next command tag. Returns `Ok(None)` once the path is
    /// exhausted. Fails if operands of the previous command were left unread
    /// or the tag is unknown.
    pub fn read_command_type(&mut self) -> Result<Option<CommandType>, PDFError> {
        if self.pending > 0 {
            return Err(self.fault("operands of the previous command were not read"));
        }
        let Some(&tag) = self.buf.get(self.pos) else {
            return Ok(None);
        };
        let command = CommandType::from_tag(tag).ok_or_else(|| self.fault("unknown command tag"))?;
        self.pos += 1;
        self.pending = command.operand_count();
        Ok(Some(command))
    }

    /// Read the next operand of the current command
    pub fn read_f64(&mut self) -> Result<f64, PDFError> {
        if self.pending == 0 {
            return Err(self.fault("read past the operands of the current command"));
        }
        let bytes: [u8; OPERAND_SIZE] = self
            .buf
            .get(self.pos..self.pos + OPERAND_SIZE)
            .and_then(|b| b.try_into().ok())
            .ok_or_else(|| self.fault("operand truncated"))?;
        self.pos += OPERAND_SIZE;
        self.pending -= 1;
        Ok(f64::from_le_bytes(bytes))
    }

    fn read_point(&mut self) -> Result<Point, PDFError> {
        Ok(Point {
            x: self.read_f64()?,
            y: self.read_f64()?,
        })
    }

    /// Read the next command along with all of its operands
    pub fn next_command(&mut self) -> Result<Option<PathCommand>, PDFError> {
        let Some(command) = self.read_command_type()? else {
            return Ok(None);
        };
        let command = match command {
            CommandType::Move => PathCommand::Move(self.read_point()?),
            CommandType::Line => PathCommand::Line(self.read_point()?),
            CommandType::Curve => PathCommand::Curve {
                control1: self.read_point()?,
                control2: self.read_point()?,
                to: self.read_point()?,
            },
            CommandType::Rect => PathCommand::Rect {
                from: self.read_point()?,
                to: self.read_point()?,
            },
            CommandType::Arc => PathCommand::Arc {
                centre: self.read_point()?,
                radius: self.read_f64()?,
                start: self.read_f64()?,
                sweep: self.read_f64()?,
            },
            CommandType::Close => PathCommand::Close,
        };
        Ok(Some(command))
    }

    fn fault(&self, reason: &'static str) -> PDFError {
        PDFError::Decoding {
            offset: self.pos,
            reason,
        }
    }
}

/// Iterator returned by [Path::commands]. Stops after the first error.
pub struct Commands<'a> {
    reader: PathReader<'a>,
    failed: bool,
}

impl Iterator for Commands<'_> {
    type Item = Result<PathCommand, PDFError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.reader.next_command() {
            Ok(command) => command.map(Ok),
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Path {
        let mut path = Path::new();
        path.move_to(Point::new(1.0, 1.0))
            .line_to(Point::new(10.0, 10.0))
            .curve_to(
                Point::new(5.0, 5.0),
                Point::new(15.0, 15.0),
                Point::new(20.0, 10.0),
            )
            .rect(Point::new(-0.5, 0.1), Point::new(1e300, f64::MIN_POSITIVE))
            .arc(Point::new(3.0, 4.0), 2.0, 0.25, -7.0)
            .close();
        path
    }

    #[test]
    fn replays_commands_in_order() {
        let commands: Vec<_> = sample().commands().collect::<Result<_, _>>().unwrap();
        assert_eq!(
            commands,
            vec![
                PathCommand::Move(Point::new(1.0, 1.0)),
                PathCommand::Line(Point::new(10.0, 10.0)),
                PathCommand::Curve {
                    control1: Point::new(5.0, 5.0),
                    control2: Point::new(15.0, 15.0),
                    to: Point::new(20.0, 10.0),
                },
                PathCommand::Rect {
                    from: Point::new(-0.5, 0.1),
                    to: Point::new(1e300, f64::MIN_POSITIVE),
                },
                PathCommand::Arc {
                    centre: Point::new(3.0, 4.0),
                    radius: 2.0,
                    start: 0.25,
                    sweep: -7.0,
                },
                PathCommand::Close,
            ]
        );
    }

    #[test]
    fn encoded_size_is_tag_plus_operands() {
        let mut path = Path::new();
        assert!(path.is_empty());
        path.move_to(Point::new(0.0, 0.0));
        assert_eq!(path.len(), 1 + 2 * 8);
        path.close();
        assert_eq!(path.len(), 1 + 2 * 8 + 1);
    }

    #[test]
    fn readers_are_independent() {
        let path = sample();
        let mut a = path.reader();
        let mut b = path.reader();

        assert_eq!(a.read_command_type().unwrap(), Some(CommandType::Move));
        assert_eq!(a.read_f64().unwrap(), 1.0);

        assert_eq!(b.read_command_type().unwrap(), Some(CommandType::Move));
        assert_eq!(b.read_f64().unwrap(), 1.0);
        assert_eq!(b.read_f64().unwrap(), 1.0);
        assert_eq!(b.read_command_type().unwrap(), Some(CommandType::Line));

        assert_eq!(a.read_f64().unwrap(), 1.0);
        assert_eq!(a.read_command_type().unwrap(), Some(CommandType::Line));
    }

    #[test]
    fn reading_too_many_operands_is_a_fault() {
        let mut path = Path::new();
        path.line_to(Point::new(2.0, 3.0)).close();
        let mut reader = path.reader();
        reader.read_command_type().unwrap();
        reader.read_f64().unwrap();
        reader.read_f64().unwrap();
        assert!(matches!(
            reader.read_f64(),
            Err(PDFError::Decoding { offset: 17, .. })
        ));
    }

    #[test]
    fn skipping_operands_is_a_fault() {
        let path = sample();
        let mut reader = path.reader();
        reader.read_command_type().unwrap();
        reader.read_f64().unwrap();
        assert!(matches!(
            reader.read_command_type(),
            Err(PDFError::Decoding { .. })
        ));
    }

    #[test]
    fn exhausted_reader_reports_no_more_commands() {
        let mut path = Path::new();
        path.close();
        let mut reader = path.reader();
        assert_eq!(reader.read_command_type().unwrap(), Some(CommandType::Close));
        assert_eq!(reader.read_command_type().unwrap(), None);
        assert_eq!(reader.read_command_type().unwrap(), None);
        assert!(reader.read_f64().is_err());
    }

    #[test]
    fn truncated_operands_are_a_fault() {
        let mut reader = PathReader {
            buf: &[b'M', 0, 0, 0, 0, 0, 0, 0, 0, 1, 2],
            pos: 0,
            pending: 0,
        };
        assert!(matches!(
            reader.next_command(),
            Err(PDFError::Decoding {
                reason: "operand truncated",
                ..
            })
        ));
    }

    #[test]
    fn unknown_tags_are_a_fault() {
        let mut reader = PathReader {
            buf: b"Q",
            pos: 0,
            pending: 0,
        };
        assert!(matches!(
            reader.read_command_type(),
            Err(PDFError::Decoding { offset: 0, .. })
        ));
    }
}

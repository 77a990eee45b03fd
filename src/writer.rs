//! Low level syntax of the output format, plus the byte-counting sink that
//! every object is written through so the cross-reference table can be built
//! in the same pass.

use crate::refs::ObjId;
use std::fmt;
use std::io::{self, Write};

/// Wraps the caller's sink and tracks how many bytes have gone into it.
/// Only bytes the inner writer accepted are counted.
pub(crate) struct CountingWriter<W: Write> {
    inner: W,
    offset: u64,
}

impl<W: Write> CountingWriter<W> {
    pub(crate) fn new(inner: W) -> Self {
        CountingWriter { inner, offset: 0 }
    }

    /// Number of bytes written so far, i.e. the offset the next byte lands at
    pub(crate) fn offset(&self) -> u64 {
        self.offset
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.offset += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// A real number, printed with at most six decimals and no trailing zeros
#[derive(Debug, Copy, Clone)]
pub(crate) struct Real(pub f64);

impl fmt::Display for Real {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = format!("{:.6}", self.0);
        let s = s.trim_end_matches('0').trim_end_matches('.');
        if s == "-0" {
            f.write_str("0")
        } else {
            f.write_str(s)
        }
    }
}

/// A name object, `/Name`
#[derive(Debug, Copy, Clone)]
pub(crate) struct Name<'a>(pub &'a str);

impl fmt::Display for Name<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.0)
    }
}

/// An indirect reference, `N 0 R`
#[derive(Debug, Copy, Clone)]
pub(crate) struct Ref(pub ObjId);

impl fmt::Display for Ref {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} 0 R", self.0)
    }
}

pub(crate) fn begin_object<W: Write>(w: &mut W, id: ObjId) -> io::Result<()> {
    write!(w, "{id} 0 obj\r\n")
}

pub(crate) fn end_object<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(b"endobj\r\n")
}

pub(crate) fn begin_stream<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(b"stream\r\n")
}

pub(crate) fn end_stream<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(b"\r\nendstream\r\n")
}

/// Writes a dictionary, one `/Key value` pair at a time
pub(crate) struct Dict<'a, W: Write> {
    w: &'a mut W,
}

impl<'a, W: Write> Dict<'a, W> {
    pub(crate) fn start(w: &'a mut W) -> io::Result<Self> {
        w.write_all(b"<<")?;
        Ok(Dict { w })
    }

    pub(crate) fn pair<V: fmt::Display>(&mut self, key: &str, value: V) -> io::Result<&mut Self> {
        write!(self.w, " /{key} {value}")?;
        Ok(self)
    }

    pub(crate) fn finish(self) -> io::Result<()> {
        self.w.write_all(b" >>\r\n")
    }
}

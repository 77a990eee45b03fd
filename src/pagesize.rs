//! Pre-defined page sizes for common paper formats.
//!
//! All sizes are stored in millimetres in portrait orientation (width ≤ height)
//! and converted on request with [standard_size]. Whether a page is laid out
//! portrait or landscape is decided by the [Orientation] it is created with.
//!
//! # Example
//!
//! ```
//! use pdf_compose::{standard_size, PageSize, Unit};
//!
//! let a4 = standard_size(PageSize::A4, Unit::Mm);
//! assert_eq!((a4.width, a4.height), (210.0, 297.0));
//! ```

use crate::units::*;
use crate::PDFError;

/// A standard paper size
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PageSize {
    A0 = 0,
    A1,
    A2,
    A3,
    A4,
    A5,
    A6,
    A7,
    A8,
    A9,
    A10,
    Letter,
    Legal,
    JuniorLegal,
    LedgerTabloid,
}

// (width, height) in millimetres, indexed by `PageSize as usize`
const STANDARD_SIZES: [(f64, f64); 15] = [
    (841.0, 1189.0),
    (594.0, 841.0),
    (420.0, 594.0),
    (297.0, 420.0),
    (210.0, 297.0),
    (148.0, 210.0),
    (105.0, 148.0),
    (74.0, 105.0),
    (52.0, 74.0),
    (37.0, 52.0),
    (26.0, 37.0),
    (216.0, 279.0),
    (216.0, 356.0),
    (127.0, 203.0),
    (279.0, 432.0),
];

const ALL_SIZES: [PageSize; 15] = [
    PageSize::A0,
    PageSize::A1,
    PageSize::A2,
    PageSize::A3,
    PageSize::A4,
    PageSize::A5,
    PageSize::A6,
    PageSize::A7,
    PageSize::A8,
    PageSize::A9,
    PageSize::A10,
    PageSize::Letter,
    PageSize::Legal,
    PageSize::JuniorLegal,
    PageSize::LedgerTabloid,
];

impl TryFrom<i32> for PageSize {
    type Error = PDFError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        usize::try_from(value)
            .ok()
            .and_then(|i| ALL_SIZES.get(i).copied())
            .ok_or(PDFError::InvalidPageSize(value))
    }
}

/// The portrait dimensions of a standard paper size, expressed in `unit`
pub fn standard_size(size: PageSize, unit: Unit) -> Size {
    let (width, height) = STANDARD_SIZES[size as usize];
    Size { width, height }.change_unit(Unit::Mm, unit)
}

/// How a page's dimensions are laid out
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// The page is as wide as the given size's height
    Landscape,
    #[default]
    Portrait,
}

impl Orientation {
    /// Width and height of a page of `size` laid out in this orientation
    pub fn apply(self, size: Size) -> Size {
        match self {
            Orientation::Portrait => size,
            Orientation::Landscape => Size {
                width: size.height,
                height: size.width,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_indexed_in_order() {
        assert_eq!(PageSize::try_from(4).unwrap(), PageSize::A4);
        assert_eq!(PageSize::try_from(11).unwrap(), PageSize::Letter);
        assert_eq!(PageSize::try_from(14).unwrap(), PageSize::LedgerTabloid);
        for (i, size) in ALL_SIZES.iter().enumerate() {
            assert_eq!(*size as usize, i);
        }
    }

    #[test]
    fn out_of_range_presets_are_rejected() {
        assert!(matches!(
            PageSize::try_from(15),
            Err(PDFError::InvalidPageSize(15))
        ));
        assert!(matches!(
            PageSize::try_from(-2),
            Err(PDFError::InvalidPageSize(-2))
        ));
    }

    #[test]
    fn sizes_convert_from_millimetres() {
        let letter = standard_size(PageSize::Letter, Unit::Cm);
        assert!((letter.width - 21.6).abs() < 1e-9);
        assert!((letter.height - 27.9).abs() < 1e-9);

        let a4 = standard_size(PageSize::A4, Unit::Pt);
        assert!((a4.width - 595.2755905511812).abs() < 1e-6);
    }

    #[test]
    fn landscape_swaps_dimensions() {
        let a5 = standard_size(PageSize::A5, Unit::Mm);
        let l = Orientation::Landscape.apply(a5);
        assert_eq!((l.width, l.height), (210.0, 148.0));
        assert_eq!(Orientation::Portrait.apply(a5), a5);
    }
}

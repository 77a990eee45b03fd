use thiserror::Error;

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum PDFError {
    #[error(transparent)]
    /// An I/O error occurred while writing the document out
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [image] failed to decode a raster file
    Image(#[from] image::ImageError),

    #[error("invalid unit: {0}")]
    /// A numeric unit outside of [crate::Unit]
    InvalidUnit(i32),

    #[error("invalid page size: {0}")]
    /// A numeric page size preset outside of [crate::PageSize]
    InvalidPageSize(i32),

    #[error("invalid {kind}: {value}")]
    /// Some other enumerated value (font style, line cap, ...) was out of range
    InvalidArgument { kind: &'static str, value: i32 },

    #[error("path decoding fault at byte {offset}: {reason}")]
    /// A path reader was asked for more than was recorded, or met an unknown
    /// command tag. The recorded path and its reader disagree; the path is
    /// not rendered.
    Decoding { offset: usize, reason: &'static str },

    #[error("arc sweep of {0} radians is too large to approximate")]
    /// An arc asked for more curve segments than [crate::MAX_ARC_SEGMENTS];
    /// the path is not rendered
    ArcSweep(f64),

    #[error("page does not belong to this document")]
    /// A page handle was passed to a document that did not create it
    PageMissing,
}

//! Compose PDF documents from paths, text and images and write them out in
//! a single pass.
//!
//! Start with a [Document], create pages, fonts and images through it, draw
//! on each page with its [Renderer], then [Document::close] it into any
//! [std::io::Write] sink.

mod arc;
pub use arc::*;

mod colour;
pub use colour::*;

mod content;
pub use content::*;

mod document;
pub use document::*;

mod error;
pub use error::*;

mod font;
pub use font::*;

mod image;
pub use self::image::*;

mod outline;

mod page;
pub use page::*;

mod pagesize;
pub use pagesize::*;

mod path;
pub use path::*;

pub(crate) mod refs;
pub use refs::ObjId;

mod resources;
pub use resources::*;

mod transform;
pub use transform::*;

mod units;
pub use units::*;

pub(crate) mod writer;

/// Re-exported so callers can hand rasters to [Document::create_image]
/// without naming the `image` crate themselves
pub use ::image::DynamicImage;

pub use id_arena::Id;

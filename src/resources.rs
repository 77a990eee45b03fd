use crate::font::{FontFamily, FontStyle, TypeFace};
use crate::image::{Image, ImageRef};
use crate::refs::{ObjId, ObjectRef, ObjectTable};
use ::image::DynamicImage;
use id_arena::{Arena, Id};
use std::collections::HashMap;

/// Owns the typefaces and images of a document. Typefaces are shared by
/// every page that uses them; images are never deduplicated.
#[derive(Default)]
pub struct ResourceRegistry {
    pub(crate) faces: Arena<TypeFace>,
    by_key: HashMap<(FontFamily, FontStyle), Id<TypeFace>>,
    pub(crate) images: Arena<Image>,
}

impl ResourceRegistry {
    pub(crate) fn new() -> ResourceRegistry {
        ResourceRegistry::default()
    }

    /// Look a typeface up by family name and style, creating and
    /// registering it the first time the resolved pair is asked for
    pub(crate) fn get_or_create_typeface(
        &mut self,
        objects: &mut ObjectTable,
        name: &str,
        style: FontStyle,
    ) -> &TypeFace {
        let family = FontFamily::resolve(name);
        let key = (family, style);
        let id = match self.by_key.get(&key) {
            Some(id) => *id,
            None => {
                let obj = objects.next_id();
                let id = self.faces.alloc(TypeFace {
                    id: obj,
                    family,
                    style,
                });
                objects.register(ObjectRef::TypeFace(id));
                log::debug!("created typeface {obj} ({})", family.base_font(style));
                self.by_key.insert(key, id);
                id
            }
        };
        &self.faces[id]
    }

    /// Register a raster as a new image and soft mask pair, image first
    pub(crate) fn register_image(
        &mut self,
        objects: &mut ObjectTable,
        source: DynamicImage,
    ) -> ImageRef {
        let id = objects.next_id();
        let mask = ObjId::new(id.get() + 1);
        let image = self.images.alloc(Image::new(id, mask, source));
        objects.register(ObjectRef::Image(image));
        objects.register(ObjectRef::ImageMask(image));

        let handle = self.images[image].handle();
        log::debug!(
            "created image {id} with mask {mask} ({}x{})",
            handle.width(),
            handle.height()
        );
        handle
    }

    /// Number of distinct typefaces registered so far
    pub fn typeface_count(&self) -> usize {
        self.faces.len()
    }

    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    /// Every registered typeface, in creation order
    pub fn typefaces(&self) -> impl Iterator<Item = &TypeFace> {
        self.faces.iter().map(|(_, face)| face)
    }
}

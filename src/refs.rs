use crate::{image::Image, page::Page, font::TypeFace};
use derive_more::Display;
use id_arena::Id;

/// The identifier of an object in the generated document. Identifiers start
/// at 1 and are handed out in creation order; 0 is the head of the free list
/// in the cross-reference table and never names an object.
#[derive(Debug, Display, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjId(u32);

impl ObjId {
    pub(crate) const fn new(id: u32) -> ObjId {
        ObjId(id)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

/// Every kind of object a document is made of. The document keeps one entry
/// per object, in serialization order; the payload lives in the document's
/// typed arenas.
#[derive(Eq, PartialEq, Hash, Copy, Clone, Debug)]
pub(crate) enum ObjectRef {
    Catalog,
    Outlines,
    PageTree,
    ProcSet,
    Page(Id<Page>),
    ContentForPage(Id<Page>),
    TypeFace(Id<TypeFace>),
    Image(Id<Image>),
    ImageMask(Id<Image>),
}

/// The ordered list of objects, responsible for identity assignment
#[derive(Debug, Default)]
pub(crate) struct ObjectTable {
    objects: Vec<ObjectRef>,
}

impl ObjectTable {
    pub(crate) fn new() -> ObjectTable {
        ObjectTable {
            objects: Vec::with_capacity(16),
        }
    }

    /// The identifier the next registered object will receive
    pub(crate) fn next_id(&self) -> ObjId {
        ObjId(self.objects.len() as u32 + 1)
    }

    /// Append an object, returning its identifier
    pub(crate) fn register(&mut self, object: ObjectRef) -> ObjId {
        let id = self.next_id();
        self.objects.push(object);
        id
    }

    pub(crate) fn len(&self) -> usize {
        self.objects.len()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (ObjId, ObjectRef)> + '_ {
        self.objects
            .iter()
            .enumerate()
            .map(|(i, o)| (ObjId(i as u32 + 1), *o))
    }
}

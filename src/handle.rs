//! Everything related to handles.
//!
//! A handle is some kind of identifier which allows you to refer to one
//! element of the mesh (vertex, edge or face). Internally, a handle is just
//! an index into the arena that owns the element, so handles are small,
//! `Copy` and do not borrow from the mesh. A handle confers no ownership:
//! the pool that handed it out owns the element, and killing the element
//! does not invalidate copies of the handle floating around elsewhere.
//!
//! Since a killed element's slot is reused by a later allocation, a stale
//! handle can silently alias a new element. There is no generation tag that
//! would detect this; see the note on [`Pool`][crate::pool::Pool].

use std::fmt;

use static_assertions::assert_eq_size;


/// The integer type used in handles to index elements.
///
/// The default is `u32` which means that a mesh can contain at most
/// 2³² − 1 elements of each kind. This is plenty for planar subdivisions
/// built from vector outlines and halves the memory used for connectivity
/// compared to 64 bit indices. If you do need more elements, enable the
/// `large-handle` feature to make this a `u64`.
///
/// The all-ones value is reserved: it is the sentinel [`Opt`] uses to
/// represent "no handle" without a discriminant.
#[allow(non_camel_case_types)]
#[cfg(not(feature = "large-handle"))]
pub type hsize = u32;

/// The integer type used in handles to index elements (`large-handle`
/// version).
#[allow(non_camel_case_types)]
#[cfg(feature = "large-handle")]
pub type hsize = u64;


/// The three basic kinds of elements in a planar mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshElement {
    Vertex,
    Edge,
    Face,
}

impl fmt::Display for MeshElement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            MeshElement::Vertex => "vertex",
            MeshElement::Edge => "edge",
            MeshElement::Face => "face",
        })
    }
}


/// Types that can be used to refer to some element: a typed index.
pub trait Handle: 'static + Copy + fmt::Debug + Eq + Ord + std::hash::Hash {
    /// The element kind this handle type refers to.
    const ELEMENT: MeshElement;

    /// Create a handle from the given index. The index must be valid with
    /// respect to the pool this handle is used with.
    fn new(idx: hsize) -> Self;

    /// Return the index of the current handle.
    fn idx(&self) -> hsize;

    /// Helper method to create a handle directly from an `usize`.
    ///
    /// If `raw` cannot be represented by `hsize`, this function either
    /// panics or returns a nonsensical handle (as the index is not valid
    /// anyway, this is fine). The all-ones index counts as unrepresentable
    /// here since it is reserved as the [`Opt`] sentinel.
    #[inline(always)]
    fn from_usize(raw: usize) -> Self {
        assert!(
            (raw as u64) < hsize::max_value() as u64,
            "handle index {} out of range",
            raw,
        );
        Self::new(raw as hsize)
    }

    /// Helper method to get the index as a `usize` directly from a handle.
    #[inline(always)]
    fn to_usize(&self) -> usize {
        self.idx() as usize
    }
}


macro_rules! make_handle_type {
    ($(#[$attr:meta])* $name:ident, $short:expr, $element:ident) => {
        $(#[$attr])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(hsize);

        impl Handle for $name {
            const ELEMENT: MeshElement = MeshElement::$element;

            #[inline(always)]
            fn new(idx: hsize) -> Self {
                $name(idx)
            }

            #[inline(always)]
            fn idx(&self) -> hsize {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, concat!($short, "{}"), self.0)
            }
        }

        impl optional::Noned for $name {
            #[inline(always)]
            fn is_none(&self) -> bool {
                self.0 == hsize::max_value()
            }

            #[inline(always)]
            fn get_none() -> Self {
                $name(hsize::max_value())
            }
        }

        impl optional::OptEq for $name {
            #[inline(always)]
            fn opt_eq(&self, other: &Self) -> bool {
                self == other
            }
        }
    }
}

make_handle_type!(
    /// A handle that is associated with a vertex.
    VertexHandle, "V", Vertex
);
make_handle_type!(
    /// A handle that is associated with an edge.
    EdgeHandle, "E", Edge
);
make_handle_type!(
    /// A handle that is associated with a face.
    FaceHandle, "F", Face
);


/// An optional handle without any memory overhead.
///
/// This is semantically equivalent to `Option<H>`, but stores the "none"
/// case as the all-ones index instead of a separate discriminant, so
/// `Opt<H>` is exactly as large as `H`. Connectivity fields use this for
/// references that are unset while an element is being wired up.
pub type Opt<H> = optional::Optioned<H>;

assert_eq_size!(VertexHandle, hsize);
assert_eq_size!(Opt<VertexHandle>, VertexHandle);
assert_eq_size!(Opt<EdgeHandle>, EdgeHandle);
assert_eq_size!(Opt<FaceHandle>, FaceHandle);

//! Reexports of the most important items of this library for convenience.
//!
//! As with every prelude, the main usage is to glob import everything from
//! this module:
//!
//! ```
//! use weft::prelude::*;
//! ```

pub use crate::{
    handle::{EdgeHandle, FaceHandle, Handle, VertexHandle},
    map::AttrMap,
    mesh::{MeshConfig, MeshTopology},
    pool::{AllocationError, Pool, PoolConfig},
    util::Empty,
};

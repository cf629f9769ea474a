//! A planar mesh topology substrate for 2D vector graphics.
//!
//! This library implements the connectivity core of a planar subdivision:
//! vertices, edges and faces stored in arena [pools][pool] and addressed by
//! stable integer [handles][handle], with every edge naming its two
//! endpoint vertices and the two faces it separates. Polygon boolean
//! combination and tessellation pipelines build on top of this substrate by
//! layering topology operators over the primitive make/kill/rewire surface
//! of [`MeshTopology`].
//!
//! Two properties define the design:
//!
//! - **Connectivity only.** The mesh stores no positions, no curve data, no
//!   winding — only the cross-references between elements. Everything else
//!   is attached to handles via [attribute maps][map], so the topology code
//!   never needs to know what the application stores per element.
//! - **No torn states.** Every public operation either completes or undoes
//!   its partial work before reporting failure. A caller can never observe
//!   a mesh in which an edge points at a dead or missing element.
//!
//! # Quick start
//!
//! ```
//! use weft::{AttrMap, MeshTopology};
//!
//! let mut mesh = MeshTopology::new()?;
//!
//! // A fresh mesh is the minimal valid one: a single edge looping from a
//! // vertex back to itself, separating two faces.
//! assert_eq!(mesh.num_vertices(), 1);
//! assert_eq!(mesh.num_edges(), 1);
//! assert_eq!(mesh.num_faces(), 2);
//!
//! // Payload lives outside the core, keyed by handle.
//! let vertex = mesh.vertex_handles().next().unwrap();
//! let mut positions = AttrMap::new();
//! positions.insert(vertex, [1.0f32, 2.0]);
//! assert_eq!(positions[vertex], [1.0, 2.0]);
//! # Ok::<(), weft::AllocationError>(())
//! ```
//!
//! # Cargo features
//!
//! - `large-handle`: use 64 bit instead of 32 bit handle indices. Only
//!   useful for meshes with more than 2³² − 1 elements of one kind.

#![deny(missing_debug_implementations)]

pub mod handle;
pub mod map;
pub mod mesh;
pub mod pool;
pub mod prelude;
mod util;

pub use crate::{
    handle::{hsize, EdgeHandle, FaceHandle, Handle, MeshElement, Opt, VertexHandle},
    map::AttrMap,
    mesh::{MeshConfig, MeshTopology},
    pool::{AllocationError, Pool, PoolConfig},
    util::Empty,
};

//! The planar mesh topology container.
//!
//! [`MeshTopology`] is a doubly connected representation of a planar
//! subdivision: every edge names its two endpoint vertices and the two
//! faces it separates. It is the substrate that higher-level topology
//! operators (edge split, edge connect, face merge) grow and shrink while
//! building polygon outlines and the regions they bound.
//!
//! The container itself only guarantees the base invariant: between any two
//! public operations, a non-empty mesh has at least one vertex, two faces
//! and one edge, and all four cross-references of every edge point at live
//! elements of the same mesh. The minimal mesh satisfying this is the *base
//! loop* — a single edge that starts and ends at the same vertex and
//! separates the two initial faces:
//!
//! ```text
//!            .--------.
//!           /          \
//!          |   right    |
//!           \          /
//!            '--> V --'
//!
//!              left
//! ```
//!
//! [`MeshTopology::new`] establishes the base loop, [`MeshTopology::clear`]
//! re-establishes it on an existing mesh, and dropping the mesh releases
//! everything. Geometry is not stored here; attach positions and curve data
//! to handles with [`AttrMap`][crate::map::AttrMap].

use std::fmt;

use log::{debug, trace};
use smallvec::SmallVec;

use crate::{
    handle::{hsize, EdgeHandle, FaceHandle, Opt, VertexHandle},
    pool::{AllocationError, Pool, PoolConfig},
    util::Empty,
};

#[cfg(test)]
mod tests;


/// Configuration for [`MeshTopology::with_config`]: one [`PoolConfig`] per
/// element kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MeshConfig {
    pub vertices: PoolConfig,
    pub edges: PoolConfig,
    pub faces: PoolConfig,
}


/// Data stored per vertex. Vertices are identity only at this layer;
/// positions live in attribute maps.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Vertex;

/// Data stored per face. Identity only, like [`Vertex`].
#[derive(Debug, Clone, Copy)]
pub(crate) struct Face;

/// Data stored per edge: the four cross-references.
///
/// A freshly made edge has all four unset. They are only ever written
/// through the `set_edge_*` methods and are all set whenever the mesh is
/// observed from outside an operation.
#[derive(Clone, Copy)]
pub(crate) struct Edge {
    /// The vertex this edge starts at.
    origin: Opt<VertexHandle>,

    /// The vertex this edge ends at. May equal `origin` (a loop edge).
    destination: Opt<VertexHandle>,

    /// The face on the left of this edge, in edge direction.
    left_face: Opt<FaceHandle>,

    /// The face on the right of this edge, in edge direction.
    right_face: Opt<FaceHandle>,
}

impl Empty for Vertex {
    fn empty() -> Self {
        Vertex
    }
}

impl Empty for Face {
    fn empty() -> Self {
        Face
    }
}

impl Empty for Edge {
    fn empty() -> Self {
        Self {
            origin: Opt::none(),
            destination: Opt::none(),
            left_face: Opt::none(),
            right_face: Opt::none(),
        }
    }
}

impl fmt::Debug for Edge {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Edge")
            .field("origin", &self.origin.into_option())
            .field("destination", &self.destination.into_option())
            .field("left_face", &self.left_face.into_option())
            .field("right_face", &self.right_face.into_option())
            .finish()
    }
}


/// One creation step of the base loop build, recorded so a later failure in
/// the same build can undo it.
enum Created {
    Vertex(VertexHandle),
    Face(FaceHandle),
    Edge(EdgeHandle),
}

/// The undo log of one transactional build. The base loop creates exactly
/// four elements, so this never spills to the heap.
type CreationLog = SmallVec<[Created; 4]>;


/// A planar mesh: vertices, edges and faces, connectivity only.
///
/// The mesh owns one [`Pool`] per element kind and never touches element
/// memory itself: all structure lives in the four cross-references of each
/// edge.
///
/// # Caller contract
///
/// The `make_*`/`kill_*`/`set_edge_*` operations exist for topology
/// operators layered on top of this type. They do not validate structure:
/// it is the operator's job to leave all cross-references set and pointing
/// at live elements of *this* mesh before its own caller can observe the
/// mesh again. Violations are programming errors; where they are cheap to
/// detect (dead handles, unset references) this type panics, and the
/// setters additionally `debug_assert!` that their target is live.
///
/// # Teardown
///
/// Dropping the mesh is teardown: every live element is released with its
/// pool, then the storage itself. There is no failure signal.
pub struct MeshTopology {
    vertices: Pool<VertexHandle, Vertex>,
    edges: Pool<EdgeHandle, Edge>,
    faces: Pool<FaceHandle, Face>,
}

impl MeshTopology {
    /// Creates a mesh with unbounded pools and establishes the base loop.
    pub fn new() -> Result<Self, AllocationError> {
        Self::with_config(MeshConfig::default())
    }

    /// Creates a mesh as described by `config` and establishes the base
    /// loop.
    ///
    /// Fails if a configured capacity cannot even hold the base loop (one
    /// vertex, one edge, two faces). On failure, everything constructed so
    /// far is torn down before the error is returned; no partially built
    /// mesh can be observed.
    pub fn with_config(config: MeshConfig) -> Result<Self, AllocationError> {
        let mut mesh = Self {
            vertices: Pool::with_config(config.vertices),
            edges: Pool::with_config(config.edges),
            faces: Pool::with_config(config.faces),
        };

        mesh.clear()?;
        Ok(mesh)
    }

    /// Resets the mesh to the base loop, regardless of its current content.
    ///
    /// All live elements are killed first; previously returned handles must
    /// not be used afterwards. Then the base loop is rebuilt from scratch:
    /// vertex, left face, right face, edge, followed by wiring the edge's
    /// four cross-references. The build is transactional — if an allocation
    /// fails, every element created by this call is killed again, in
    /// reverse creation order, before the error is returned.
    ///
    /// After a failure the pools are left *empty*: the mesh is alive but
    /// degenerate (observable via [`is_empty`][Self::is_empty]) and does
    /// not satisfy the base invariant. A later `clear` — for example after
    /// raising a capacity — may establish the base loop again.
    pub fn clear(&mut self) -> Result<(), AllocationError> {
        self.vertices.clear();
        self.faces.clear();
        self.edges.clear();

        let mut log = CreationLog::new();
        match self.build_base_loop(&mut log) {
            Ok(()) => {
                trace!("established base loop (1 vertex, 1 edge, 2 faces)");
                Ok(())
            }
            Err(error) => {
                debug!(
                    "base loop build failed ({}), rolling back {} elements",
                    error,
                    log.len(),
                );
                self.roll_back(log);
                Err(error)
            }
        }
    }

    fn build_base_loop(&mut self, log: &mut CreationLog) -> Result<(), AllocationError> {
        let vertex = self.vertices.make()?;
        log.push(Created::Vertex(vertex));

        let left = self.faces.make()?;
        log.push(Created::Face(left));

        let right = self.faces.make()?;
        log.push(Created::Face(right));

        let edge = self.edges.make()?;
        log.push(Created::Edge(edge));

        self.set_edge_origin(edge, vertex);
        self.set_edge_destination(edge, vertex);
        self.set_edge_left_face(edge, left);
        self.set_edge_right_face(edge, right);

        Ok(())
    }

    /// Kills the logged elements, most recently created first.
    fn roll_back(&mut self, mut log: CreationLog) {
        while let Some(created) = log.pop() {
            match created {
                Created::Vertex(vertex) => self.vertices.kill(vertex),
                Created::Face(face) => self.faces.kill(face),
                Created::Edge(edge) => self.edges.kill(edge),
            }
        }
    }


    // ===== Element counts and lookup =======================================

    /// Returns the number of vertices in this mesh.
    pub fn num_vertices(&self) -> hsize {
        self.vertices.num_elements()
    }

    /// Returns the number of edges in this mesh.
    pub fn num_edges(&self) -> hsize {
        self.edges.num_elements()
    }

    /// Returns the number of faces in this mesh.
    pub fn num_faces(&self) -> hsize {
        self.faces.num_elements()
    }

    /// Checks if all three pools are empty.
    ///
    /// A mesh is never empty between successful operations; this only
    /// returns `true` for the degenerate state left behind by a failed
    /// [`clear`][Self::clear].
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.edges.is_empty() && self.faces.is_empty()
    }

    /// Checks if the given vertex handle refers to a live vertex of this
    /// mesh.
    pub fn contains_vertex(&self, vertex: VertexHandle) -> bool {
        self.vertices.contains(vertex)
    }

    /// Checks if the given edge handle refers to a live edge of this mesh.
    pub fn contains_edge(&self, edge: EdgeHandle) -> bool {
        self.edges.contains(edge)
    }

    /// Checks if the given face handle refers to a live face of this mesh.
    pub fn contains_face(&self, face: FaceHandle) -> bool {
        self.faces.contains(face)
    }

    /// Returns an iterator over the handles of all vertices in this mesh,
    /// with increasing index value.
    pub fn vertex_handles(&self) -> impl Iterator<Item = VertexHandle> + '_ {
        self.vertices.handles()
    }

    /// Returns an iterator over the handles of all edges in this mesh, with
    /// increasing index value.
    pub fn edge_handles(&self) -> impl Iterator<Item = EdgeHandle> + '_ {
        self.edges.handles()
    }

    /// Returns an iterator over the handles of all faces in this mesh, with
    /// increasing index value.
    pub fn face_handles(&self) -> impl Iterator<Item = FaceHandle> + '_ {
        self.faces.handles()
    }


    // ===== Element creation and destruction ================================

    /// Makes a new vertex, connected to nothing.
    pub fn make_vertex(&mut self) -> Result<VertexHandle, AllocationError> {
        self.vertices.make()
    }

    /// Makes a new edge with all four cross-references unset.
    ///
    /// The caller has to set all four references before the mesh is
    /// observed again; reading an unset reference panics.
    pub fn make_edge(&mut self) -> Result<EdgeHandle, AllocationError> {
        self.edges.make()
    }

    /// Makes a new face, adjacent to nothing.
    pub fn make_face(&mut self) -> Result<FaceHandle, AllocationError> {
        self.faces.make()
    }

    /// Kills the given vertex. The caller has to make sure no edge
    /// references it anymore.
    ///
    /// # Panics
    ///
    /// Panics if `vertex` is not live in this mesh.
    pub fn kill_vertex(&mut self, vertex: VertexHandle) {
        self.vertices.kill(vertex);
    }

    /// Kills the given edge.
    ///
    /// # Panics
    ///
    /// Panics if `edge` is not live in this mesh.
    pub fn kill_edge(&mut self, edge: EdgeHandle) {
        self.edges.kill(edge);
    }

    /// Kills the given face. The caller has to make sure no edge references
    /// it anymore.
    ///
    /// # Panics
    ///
    /// Panics if `face` is not live in this mesh.
    pub fn kill_face(&mut self, face: FaceHandle) {
        self.faces.kill(face);
    }


    // ===== Edge cross-references ===========================================

    /// Returns the vertex the given edge starts at.
    ///
    /// # Panics
    ///
    /// Panics if `edge` is not live or its origin was never set.
    pub fn edge_origin(&self, edge: EdgeHandle) -> VertexHandle {
        match self.edges[edge].origin.into_option() {
            Some(vertex) => vertex,
            None => panic!("origin of {:?} is not set", edge),
        }
    }

    /// Returns the vertex the given edge ends at.
    ///
    /// # Panics
    ///
    /// Panics if `edge` is not live or its destination was never set.
    pub fn edge_destination(&self, edge: EdgeHandle) -> VertexHandle {
        match self.edges[edge].destination.into_option() {
            Some(vertex) => vertex,
            None => panic!("destination of {:?} is not set", edge),
        }
    }

    /// Returns the face on the left of the given edge.
    ///
    /// # Panics
    ///
    /// Panics if `edge` is not live or its left face was never set.
    pub fn edge_left_face(&self, edge: EdgeHandle) -> FaceHandle {
        match self.edges[edge].left_face.into_option() {
            Some(face) => face,
            None => panic!("left face of {:?} is not set", edge),
        }
    }

    /// Returns the face on the right of the given edge.
    ///
    /// # Panics
    ///
    /// Panics if `edge` is not live or its right face was never set.
    pub fn edge_right_face(&self, edge: EdgeHandle) -> FaceHandle {
        match self.edges[edge].right_face.into_option() {
            Some(face) => face,
            None => panic!("right face of {:?} is not set", edge),
        }
    }

    /// Returns `[origin, destination]` of the given edge.
    pub fn endpoints_of_edge(&self, edge: EdgeHandle) -> [VertexHandle; 2] {
        [self.edge_origin(edge), self.edge_destination(edge)]
    }

    /// Returns `[left, right]` face of the given edge.
    pub fn faces_of_edge(&self, edge: EdgeHandle) -> [FaceHandle; 2] {
        [self.edge_left_face(edge), self.edge_right_face(edge)]
    }

    /// Sets the origin of `edge` to `vertex`, overwriting the old value.
    ///
    /// `vertex` has to be live in this mesh; this is not validated in
    /// release builds.
    pub fn set_edge_origin(&mut self, edge: EdgeHandle, vertex: VertexHandle) {
        debug_assert!(
            self.vertices.contains(vertex),
            "set_edge_origin: {:?} is not live in this mesh",
            vertex,
        );
        self.edges[edge].origin = Opt::some(vertex);
    }

    /// Sets the destination of `edge` to `vertex`, overwriting the old
    /// value.
    ///
    /// `vertex` has to be live in this mesh; this is not validated in
    /// release builds.
    pub fn set_edge_destination(&mut self, edge: EdgeHandle, vertex: VertexHandle) {
        debug_assert!(
            self.vertices.contains(vertex),
            "set_edge_destination: {:?} is not live in this mesh",
            vertex,
        );
        self.edges[edge].destination = Opt::some(vertex);
    }

    /// Sets the left face of `edge` to `face`, overwriting the old value.
    ///
    /// `face` has to be live in this mesh; this is not validated in release
    /// builds.
    pub fn set_edge_left_face(&mut self, edge: EdgeHandle, face: FaceHandle) {
        debug_assert!(
            self.faces.contains(face),
            "set_edge_left_face: {:?} is not live in this mesh",
            face,
        );
        self.edges[edge].left_face = Opt::some(face);
    }

    /// Sets the right face of `edge` to `face`, overwriting the old value.
    ///
    /// `face` has to be live in this mesh; this is not validated in release
    /// builds.
    pub fn set_edge_right_face(&mut self, edge: EdgeHandle, face: FaceHandle) {
        debug_assert!(
            self.faces.contains(face),
            "set_edge_right_face: {:?} is not live in this mesh",
            face,
        );
        self.edges[edge].right_face = Opt::some(face);
    }


    // ===== Integrity =======================================================

    /// Performs a number of integrity checks and panics if something is
    /// broken.
    ///
    /// This method is mainly intended for unit tests and debugging. For an
    /// empty (degenerate) mesh it does nothing; for a non-empty mesh it
    /// checks the base cardinalities and that every edge's four
    /// cross-references are set and point at live elements of this mesh.
    /// Runtime is `O(|E|)`.
    pub fn check_integrity(&self) {
        if self.is_empty() {
            return;
        }

        if self.num_vertices() < 1 || self.num_faces() < 2 || self.num_edges() < 1 {
            panic!(
                "broken mesh: non-empty but only {} vertices, {} edges, {} faces",
                self.num_vertices(),
                self.num_edges(),
                self.num_faces(),
            );
        }

        for (edge, data) in self.edges.iter() {
            let origin = match data.origin.into_option() {
                Some(vertex) => vertex,
                None => panic!("broken mesh: origin of {:?} is not set", edge),
            };
            let destination = match data.destination.into_option() {
                Some(vertex) => vertex,
                None => panic!("broken mesh: destination of {:?} is not set", edge),
            };
            let left = match data.left_face.into_option() {
                Some(face) => face,
                None => panic!("broken mesh: left face of {:?} is not set", edge),
            };
            let right = match data.right_face.into_option() {
                Some(face) => face,
                None => panic!("broken mesh: right face of {:?} is not set", edge),
            };

            if !self.vertices.contains(origin) {
                panic!("broken mesh: origin of {:?} is dangling ({:?})", edge, origin);
            }
            if !self.vertices.contains(destination) {
                panic!(
                    "broken mesh: destination of {:?} is dangling ({:?})",
                    edge, destination,
                );
            }
            if !self.faces.contains(left) {
                panic!("broken mesh: left face of {:?} is dangling ({:?})", edge, left);
            }
            if !self.faces.contains(right) {
                panic!("broken mesh: right face of {:?} is dangling ({:?})", edge, right);
            }
        }
    }
}

impl fmt::Debug for MeshTopology {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("MeshTopology")
            .field("vertices", &self.vertices)
            .field("edges", &self.edges)
            .field("faces", &self.faces)
            .finish()
    }
}

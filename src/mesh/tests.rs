use crate::{
    handle::MeshElement,
    pool::PoolConfig,
};
use super::*;


/// Asserts that `mesh` is exactly a base loop:
///
/// ```text
///            .--------.
///           /          \
///          |   right    |
///           \          /
///            '--> V --'
///
///              left
/// ```
///
/// Handle values are not part of the shape, only cardinalities and
/// relations.
fn check_base_loop(mesh: &MeshTopology) {
    mesh.check_integrity();

    assert_eq!(mesh.num_vertices(), 1);
    assert_eq!(mesh.num_edges(), 1);
    assert_eq!(mesh.num_faces(), 2);
    assert!(!mesh.is_empty());

    let vertex = mesh.vertex_handles().next().unwrap();
    let edge = mesh.edge_handles().next().unwrap();
    let faces: Vec<_> = mesh.face_handles().collect();

    assert!(mesh.contains_vertex(vertex));
    assert!(mesh.contains_edge(edge));

    assert_eq!(mesh.edge_origin(edge), vertex);
    assert_eq!(mesh.edge_destination(edge), vertex);
    assert_eq!(mesh.endpoints_of_edge(edge), [vertex, vertex]);

    let [left, right] = mesh.faces_of_edge(edge);
    assert_ne!(left, right);
    assert!(faces.contains(&left));
    assert!(faces.contains(&right));
}

#[test]
fn new_establishes_base_loop() {
    let mesh = MeshTopology::new().unwrap();
    check_base_loop(&mesh);
}

#[test]
fn clear_rebuilds_base_loop() {
    let mut mesh = MeshTopology::new().unwrap();

    // Two consecutive clears produce the same structural shape each time.
    mesh.clear().unwrap();
    check_base_loop(&mesh);
    mesh.clear().unwrap();
    check_base_loop(&mesh);
}

#[test]
fn clear_resets_extended_mesh() {
    let mut mesh = MeshTopology::new().unwrap();
    let edge = mesh.edge_handles().next().unwrap();
    let [left, right] = mesh.faces_of_edge(edge);

    // Grow the mesh the way a topology operator would: split the loop
    // vertex into two vertices joined by a second edge.
    //
    //            .---- e ----.
    //           /             \
    //          |     right     |
    //           \             /
    //            V0 <- e2 - V1
    //
    //                left
    let v0 = mesh.edge_origin(edge);
    let v1 = mesh.make_vertex().unwrap();
    let e2 = mesh.make_edge().unwrap();
    mesh.set_edge_destination(edge, v1);
    mesh.set_edge_origin(e2, v1);
    mesh.set_edge_destination(e2, v0);
    mesh.set_edge_left_face(e2, left);
    mesh.set_edge_right_face(e2, right);

    mesh.check_integrity();
    assert_eq!(mesh.num_vertices(), 2);
    assert_eq!(mesh.num_edges(), 2);
    assert_eq!(mesh.num_faces(), 2);

    // Clearing throws all of that away and rebuilds the base loop.
    mesh.clear().unwrap();
    check_base_loop(&mesh);
}

#[test]
fn exact_base_loop_budget_suffices() {
    let mesh = MeshTopology::with_config(MeshConfig {
        vertices: PoolConfig { capacity: Some(1), reserve: 1 },
        edges: PoolConfig { capacity: Some(1), reserve: 1 },
        faces: PoolConfig { capacity: Some(2), reserve: 2 },
    }).unwrap();
    check_base_loop(&mesh);
}

#[test]
fn init_fails_without_room_for_base_loop() {
    let tight = |vertices, edges, faces| MeshConfig {
        vertices: PoolConfig { capacity: Some(vertices), reserve: 0 },
        edges: PoolConfig { capacity: Some(edges), reserve: 0 },
        faces: PoolConfig { capacity: Some(faces), reserve: 0 },
    };

    let error = MeshTopology::with_config(tight(0, 1, 2)).unwrap_err();
    assert_eq!(error.element, MeshElement::Vertex);
    assert_eq!(error.capacity, 0);

    let error = MeshTopology::with_config(tight(1, 0, 2)).unwrap_err();
    assert_eq!(error.element, MeshElement::Edge);

    let error = MeshTopology::with_config(tight(1, 1, 0)).unwrap_err();
    assert_eq!(error.element, MeshElement::Face);

    // One face fits, the second does not.
    let error = MeshTopology::with_config(tight(1, 1, 1)).unwrap_err();
    assert_eq!(error.element, MeshElement::Face);
    assert_eq!(error.capacity, 1);
}

#[test]
fn failed_clear_leaks_nothing() {
    // Force the base loop build to fail at each of its four creation steps
    // in turn and check that no element of the partial build survives.
    let step_limits = [
        (MeshElement::Vertex, Some(0), None, None),
        (MeshElement::Face, None, None, Some(0)),
        (MeshElement::Face, None, None, Some(1)),
        (MeshElement::Edge, None, Some(0), None),
    ];

    for &(failing, vertices, edges, faces) in &step_limits {
        let mut mesh = MeshTopology::new().unwrap();
        mesh.vertices.set_capacity(vertices);
        mesh.edges.set_capacity(edges);
        mesh.faces.set_capacity(faces);

        let error = mesh.clear().unwrap_err();
        assert_eq!(error.element, failing);

        assert_eq!(mesh.num_vertices(), 0);
        assert_eq!(mesh.num_edges(), 0);
        assert_eq!(mesh.num_faces(), 0);
    }
}

#[test]
fn failed_clear_leaves_empty_but_usable() {
    // After a failed clear the mesh is degenerate: pools empty, base loop
    // not re-established. The value itself stays alive and a later clear
    // can recover it.
    let mut mesh = MeshTopology::new().unwrap();
    mesh.faces.set_capacity(Some(1));

    mesh.clear().unwrap_err();
    assert!(mesh.is_empty());
    mesh.check_integrity();

    mesh.faces.set_capacity(None);
    mesh.clear().unwrap();
    check_base_loop(&mesh);
}

#[test]
fn setters_overwrite_unconditionally() {
    let mut mesh = MeshTopology::new().unwrap();
    let edge = mesh.edge_handles().next().unwrap();
    let [left, right] = mesh.faces_of_edge(edge);

    let vertex = mesh.make_vertex().unwrap();
    mesh.set_edge_origin(edge, vertex);
    assert_eq!(mesh.edge_origin(edge), vertex);

    // Swapping the faces is just two overwrites.
    mesh.set_edge_left_face(edge, right);
    mesh.set_edge_right_face(edge, left);
    assert_eq!(mesh.faces_of_edge(edge), [right, left]);
}

#[test]
fn fresh_edge_has_unset_references() {
    let mut mesh = MeshTopology::new().unwrap();
    let edge = mesh.make_edge().unwrap();

    // The edge is live, but none of its references can be read yet.
    assert!(mesh.contains_edge(edge));
    assert_eq!(mesh.num_edges(), 2);

    let vertex = mesh.vertex_handles().next().unwrap();
    mesh.set_edge_origin(edge, vertex);
    assert_eq!(mesh.edge_origin(edge), vertex);
}

#[test]
#[should_panic(expected = "origin of")]
fn reading_unset_reference_panics() {
    let mut mesh = MeshTopology::new().unwrap();
    let edge = mesh.make_edge().unwrap();
    mesh.edge_origin(edge);
}

#[test]
#[should_panic(expected = "no live element")]
fn killing_dead_edge_panics() {
    let mut mesh = MeshTopology::new().unwrap();
    let edge = mesh.edge_handles().next().unwrap();
    mesh.kill_edge(edge);
    mesh.kill_edge(edge);
}

#[test]
fn killed_handles_are_reused_only_while_dead() {
    let mut mesh = MeshTopology::new().unwrap();

    let extra = mesh.make_vertex().unwrap();
    mesh.kill_vertex(extra);
    assert!(!mesh.contains_vertex(extra));

    // The replacement may reuse the slot, but at no point do two live
    // vertices share a handle value.
    let replacement = mesh.make_vertex().unwrap();
    let live: Vec<_> = mesh.vertex_handles().collect();
    assert_eq!(live.len(), 2);
    assert!(live.contains(&replacement));
    for (i, a) in live.iter().enumerate() {
        for b in &live[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn dropping_releases_everything() {
    // Teardown is `Drop`; what we can observe from the outside is that a
    // mesh with extra elements drops cleanly and that clearing beforehand
    // leaves nothing for the pools to release.
    let mut mesh = MeshTopology::new().unwrap();
    mesh.make_vertex().unwrap();
    mesh.make_face().unwrap();
    drop(mesh);
}

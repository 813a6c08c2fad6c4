use std::collections::HashSet;

use glam::Vec3;
use gradient_wasm::backend::{PlaneGeometry, Viewport};

#[test]
fn viewport_clamps_pixel_ratio() {
    let vp = Viewport::new(1920.0, 1080.0, 3.0, 2.0);
    assert_eq!(vp.pixel_ratio, 2.0);
    assert_eq!(vp.buffer_size(), (3840, 2160));
    assert!((vp.aspect() - 16.0 / 9.0).abs() < 1e-6);

    let low = Viewport::new(1000.0, 500.0, 1.0, 2.0);
    assert_eq!(low.buffer_size(), (1000, 500));
}

#[test]
fn viewport_survives_degenerate_input() {
    let vp = Viewport::new(0.0, 0.0, f32::NAN, 2.0);
    assert_eq!(vp.pixel_ratio, 1.0);
    assert_eq!(vp.buffer_size(), (1, 1));
    assert_eq!(vp.aspect(), 1.0);
}

#[test]
fn plane_counts() {
    let plane = PlaneGeometry::new(1.0, 1.0, 4, 3);
    assert_eq!(plane.vertex_count(), 5 * 4);
    assert_eq!(plane.positions().len(), 20 * 3);
    assert_eq!(plane.uvs().len(), 20 * 2);
    assert_eq!(plane.triangle_indices().len(), 4 * 3 * 6);
    assert!(plane.triangle_indices().iter().all(|&i| (i as usize) < 20));
}

#[test]
fn plane_spans_its_size() {
    let plane = PlaneGeometry::new(2.0, 1.0, 2, 2);
    let xs: Vec<f32> = plane.positions().chunks(3).map(|p| p[0]).collect();
    let ys: Vec<f32> = plane.positions().chunks(3).map(|p| p[1]).collect();
    assert_eq!(xs.iter().cloned().fold(f32::INFINITY, f32::min), -1.0);
    assert_eq!(xs.iter().cloned().fold(f32::NEG_INFINITY, f32::max), 1.0);
    assert_eq!(ys.iter().cloned().fold(f32::INFINITY, f32::min), -0.5);
    assert_eq!(ys.iter().cloned().fold(f32::NEG_INFINITY, f32::max), 0.5);
    assert!(plane.uvs().iter().all(|&v| (0.0..=1.0).contains(&v)));
}

#[test]
fn wireframe_edges_are_unique() {
    let plane = PlaneGeometry::new(1.0, 1.0, 3, 3);
    let lines = plane.line_indices();
    let edges: HashSet<(u32, u32)> = lines
        .chunks(2)
        .map(|e| (e[0].min(e[1]), e[0].max(e[1])))
        .collect();
    assert_eq!(edges.len(), lines.len() / 2);
    // horizontal + vertical + one diagonal per cell
    assert_eq!(edges.len(), 3 * 4 + 4 * 3 + 3 * 3);

    let from_triangles: HashSet<(u32, u32)> = plane
        .triangle_indices()
        .chunks(3)
        .flat_map(|t| [(t[0], t[1]), (t[1], t[2]), (t[2], t[0])])
        .map(|(a, b)| (a.min(b), a.max(b)))
        .collect();
    assert_eq!(edges, from_triangles);
}

#[test]
fn model_matrix_lays_plane_flat() {
    let plane = PlaneGeometry::new(1.0, 1.0, 1, 1);
    let normal = plane.model_matrix().transform_vector3(Vec3::Z);
    assert!(normal.abs_diff_eq(Vec3::Y, 1e-6), "{normal}");
    let corner = plane.model_matrix().transform_point3(Vec3::new(0.5, 0.5, 0.0));
    assert!(corner.y.abs() < 1e-6);
}

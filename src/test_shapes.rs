//! Small meshes shared by the unit tests.

use std::f64::consts::{PI, TAU};

use nalgebra::Point3;

use crate::mesh::{TriangulatedMesh, VertexId};

const CUBE_CORNERS: [[f64; 3]; 8] = [
    [0.0, 0.0, 0.0],
    [1.0, 0.0, 0.0],
    [1.0, 1.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
    [1.0, 0.0, 1.0],
    [1.0, 1.0, 1.0],
    [0.0, 1.0, 1.0],
];

/// Outward counter-clockwise triangles with their face ids.
const CUBE_TRIANGLES: [([usize; 3], i32); 12] = [
    ([0, 2, 1], 0),
    ([0, 3, 2], 0),
    ([4, 5, 6], 1),
    ([4, 6, 7], 1),
    ([0, 1, 5], 2),
    ([0, 5, 4], 2),
    ([3, 7, 6], 3),
    ([3, 6, 2], 3),
    ([0, 4, 7], 4),
    ([0, 7, 3], 4),
    ([1, 2, 6], 5),
    ([1, 6, 5], 5),
];

fn build(points: &[Point3<f64>], triangles: &[([usize; 3], i32)]) -> TriangulatedMesh {
    let mut mesh = TriangulatedMesh::with_capacity(triangles.len());
    let ids: Vec<VertexId> = points.iter().map(|&p| mesh.add_vertex(p)).collect();
    for &([a, b, c], face) in triangles {
        mesh.add_triangle(ids[a], ids[b], ids[c], face).unwrap();
    }
    mesh
}

fn cube_points() -> Vec<Point3<f64>> {
    CUBE_CORNERS
        .iter()
        .map(|&[x, y, z]| Point3::new(x, y, z))
        .collect()
}

/// Cube triangles with a few windings swapped.
fn mixed_cube_triangles() -> Vec<([usize; 3], i32)> {
    CUBE_TRIANGLES
        .iter()
        .enumerate()
        .map(|(i, &([a, b, c], face))| {
            if [1, 2, 5, 8, 11].contains(&i) {
                ([a, c, b], face)
            } else {
                ([a, b, c], face)
            }
        })
        .collect()
}

/// Unit cube, consistently wound outward.
pub fn unit_cube() -> TriangulatedMesh {
    build(&cube_points(), &CUBE_TRIANGLES)
}

/// Unit cube with inconsistent windings.
pub fn mixed_cube() -> TriangulatedMesh {
    build(&cube_points(), &mixed_cube_triangles())
}

/// Unit cube plus a copy of its first triangle, which is rejected.
pub fn cube_with_duplicate() -> TriangulatedMesh {
    let mut triangles = CUBE_TRIANGLES.to_vec();
    triangles.push(([0, 2, 1], 6));
    build(&cube_points(), &triangles)
}

/// Mixed cube missing one triangle, plus a rejected copy of a top triangle.
pub fn open_mixed_cube_with_duplicate() -> TriangulatedMesh {
    let mut triangles = mixed_cube_triangles();
    triangles.pop();
    triangles.push(([4, 5, 6], 1));
    build(&cube_points(), &triangles)
}

/// Two regular tetrahedra centred on the origin, one inside the other,
/// with arbitrary windings.
pub fn nested_tetrahedra() -> TriangulatedMesh {
    let mut points = Vec::new();
    for scale in [2.0, 1.0] {
        points.extend(
            TETRA_CORNERS
                .iter()
                .map(|&[x, y, z]| Point3::new(x * scale, y * scale, z * scale)),
        );
    }

    build(&points, &tetrahedra_triangles())
}

const TETRA_CORNERS: [[f64; 3]; 4] = [
    [1.0, 1.0, 1.0],
    [1.0, -1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, -1.0, 1.0],
];

/// Triangles of two tetrahedra over points 0..4 (face 10) and 4..8 (face 20).
fn tetrahedra_triangles() -> Vec<([usize; 3], i32)> {
    let mut triangles = Vec::new();
    for (base, face) in [(0, 10), (4, 20)] {
        for [a, b, c] in [[0, 1, 2], [0, 1, 3], [0, 2, 3], [1, 2, 3]] {
            triangles.push(([base + a, base + b, base + c], face));
        }
    }
    triangles
}

/// Two regular tetrahedra ten units apart along X, with arbitrary windings.
pub fn side_by_side_tetrahedra() -> TriangulatedMesh {
    let mut points = Vec::new();
    for offset in [-5.0, 5.0] {
        points.extend(
            TETRA_CORNERS
                .iter()
                .map(|&[x, y, z]| Point3::new(x + offset, y, z)),
        );
    }
    build(&points, &tetrahedra_triangles())
}

/// Six flat triangles around a centre vertex, facing +Z.
pub fn hex_fan() -> TriangulatedMesh {
    let mut points = vec![Point3::origin()];
    points.extend((0..6).map(|i| {
        let theta = i as f64 * PI / 3.0;
        Point3::new(theta.cos(), theta.sin(), 0.0)
    }));
    let triangles: Vec<_> = (0..6).map(|i| ([0, 1 + i, 1 + (i + 1) % 6], 0)).collect();
    build(&points, &triangles)
}

/// Two triangles folded 90 degrees along a shared edge. The first faces +Z,
/// the second +Y.
pub fn folded_pair() -> TriangulatedMesh {
    let points = [
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(0.5, 1.0, 0.0),
        Point3::new(0.5, 0.0, 1.0),
    ];
    build(&points, &[([0, 1, 2], 0), ([1, 0, 3], 1)])
}

/// A strip of six quads whose ends are joined with a half twist.
pub fn mobius_strip() -> TriangulatedMesh {
    const COLUMNS: usize = 6;
    const RADIUS: f64 = 2.0;
    const HALF_WIDTH: f64 = 0.5;

    let mut mesh = TriangulatedMesh::new();
    let mut column = |theta: f64, s: f64| {
        let r = RADIUS + s * (theta / 2.0).cos();
        mesh.add_vertex(Point3::new(r * theta.cos(), r * theta.sin(), s * (theta / 2.0).sin()))
    };
    let mut rungs: Vec<(VertexId, VertexId)> = (0..COLUMNS)
        .map(|i| {
            let theta = TAU * i as f64 / COLUMNS as f64;
            (column(theta, HALF_WIDTH), column(theta, -HALF_WIDTH))
        })
        .collect();
    // After a full turn the two sides have swapped
    let (a0, b0) = rungs[0];
    rungs.push((b0, a0));

    for (i, w) in rungs.windows(2).enumerate() {
        let [(a, b), (a_next, b_next)] = [w[0], w[1]];
        let face = i as i32;
        mesh.add_triangle(a, b, b_next, face).unwrap();
        mesh.add_triangle(a, b_next, a_next, face).unwrap();
    }
    mesh
}

/// Open cone: `n` side triangles from a unit ring at z = 0 up to an apex at
/// z = `height`. The apex is the last vertex.
pub fn cone(n: usize, height: f64) -> TriangulatedMesh {
    let mut points: Vec<Point3<f64>> = (0..n)
        .map(|i| {
            let theta = TAU * i as f64 / n as f64;
            Point3::new(theta.cos(), theta.sin(), 0.0)
        })
        .collect();
    points.push(Point3::new(0.0, 0.0, height));

    let triangles: Vec<_> = (0..n).map(|i| ([i, (i + 1) % n, n], 0)).collect();
    build(&points, &triangles)
}

/// Two open cones meeting tip to tip at vertex 0. The upper ring sits at
/// z = `height`, the lower at z = -`height`; both fans face away from each
/// other.
pub fn bowtie(n: usize, height: f64) -> TriangulatedMesh {
    let mut points = vec![Point3::origin()];
    for z in [height, -height] {
        points.extend((0..n).map(|i| {
            let theta = TAU * i as f64 / n as f64;
            Point3::new(theta.cos(), theta.sin(), z)
        }));
    }

    let upper = |i: usize| 1 + i % n;
    let lower = |i: usize| 1 + n + i % n;
    let mut triangles: Vec<_> = (0..n).map(|i| ([0, upper(i), upper(i + 1)], 0)).collect();
    triangles.extend((0..n).map(|i| ([0, lower(i + 1), lower(i)], 1)));
    build(&points, &triangles)
}

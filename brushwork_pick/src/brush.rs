// Copyright 2025 the Brushwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Brush geometry: planes, convex faces, and convex brushes.
//!
//! These are plain values. The scene model owns them and hands them to the
//! picker by reference through [`BrushLookup`](crate::arena::BrushLookup).

use alloc::vec::Vec;

use brushwork_index::Aabb3D;
use glam::{Affine3A, Vec3};

use crate::types::BrushFlags;

/// Distinct face vertices closer than this are treated as the same brush vertex.
pub const VERTEX_MERGE_EPSILON: f32 = 1e-4;

/// An oriented plane: points `p` with `normal.dot(p) == distance`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Plane {
    /// Unit normal, pointing out of the brush for brush faces.
    pub normal: Vec3,
    /// Signed distance of the plane from the origin along `normal`.
    pub distance: f32,
}

impl Plane {
    /// Plane through `point` with the given normal. Returns `None` for a zero normal.
    pub fn from_point_normal(point: Vec3, normal: Vec3) -> Option<Self> {
        let normal = normal.try_normalize()?;
        Some(Self {
            normal,
            distance: normal.dot(point),
        })
    }

    /// Signed distance from `p` to the plane; positive on the normal side.
    pub fn signed_distance(&self, p: Vec3) -> f32 {
        self.normal.dot(p) - self.distance
    }
}

/// A planar convex polygon bounding part of a brush.
#[derive(Clone, Debug, PartialEq)]
pub struct Face {
    plane: Plane,
    vertices: Vec<Vec3>,
}

impl Face {
    /// Create a face from a plane and the polygon lying on it.
    ///
    /// The caller guarantees that the vertices lie on `plane` and form a convex loop.
    pub fn new(plane: Plane, vertices: Vec<Vec3>) -> Self {
        Self { plane, vertices }
    }

    /// Create a face from a convex polygon wound counter-clockwise when seen
    /// from the side its normal should point to.
    ///
    /// The plane normal is computed with Newell's method and the plane passes
    /// through the vertex centroid. Returns `None` for fewer than three vertices
    /// or a polygon without area.
    pub fn from_polygon(vertices: Vec<Vec3>) -> Option<Self> {
        if vertices.len() < 3 {
            return None;
        }
        let mut n = Vec3::ZERO;
        let mut sum = Vec3::ZERO;
        for (i, a) in vertices.iter().enumerate() {
            let b = vertices[(i + 1) % vertices.len()];
            n.x += (a.y - b.y) * (a.z + b.z);
            n.y += (a.z - b.z) * (a.x + b.x);
            n.z += (a.x - b.x) * (a.y + b.y);
            sum += *a;
        }
        let centroid = sum / vertices.len() as f32;
        let plane = Plane::from_point_normal(centroid, n)?;
        Some(Self { plane, vertices })
    }

    /// The face plane.
    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    /// Polygon vertices, in winding order.
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    /// Polygon edges as `(start, end)` pairs, closing back to the first vertex.
    pub fn edges(&self) -> impl Iterator<Item = (Vec3, Vec3)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }
}

/// A convex solid bounded by planar faces.
///
/// The bounding box and the distinct vertex list are derived once at construction.
#[derive(Clone, Debug, PartialEq)]
pub struct Brush {
    faces: Vec<Face>,
    vertices: Vec<Vec3>,
    bounds: Aabb3D,
    flags: BrushFlags,
}

impl Brush {
    /// Create a brush from its faces, with default flags.
    pub fn new(faces: Vec<Face>) -> Self {
        let mut vertices: Vec<Vec3> = Vec::new();
        for v in faces.iter().flat_map(|f| f.vertices.iter().copied()) {
            let merge = VERTEX_MERGE_EPSILON * VERTEX_MERGE_EPSILON;
            if !vertices.iter().any(|u| u.distance_squared(v) <= merge) {
                vertices.push(v);
            }
        }
        let bounds = Aabb3D::from_points(vertices.iter().copied()).unwrap_or(Aabb3D::EMPTY);
        Self {
            faces,
            vertices,
            bounds,
            flags: BrushFlags::default(),
        }
    }

    /// Axis-aligned box brush with outward faces in the order
    /// `-X, +X, -Y, +Y, -Z, +Z`.
    pub fn cuboid(aabb: Aabb3D) -> Self {
        let (m, x) = (aabb.min, aabb.max);
        let quads = [
            (
                Vec3::NEG_X,
                m.x,
                [
                    Vec3::new(m.x, m.y, m.z),
                    Vec3::new(m.x, m.y, x.z),
                    Vec3::new(m.x, x.y, x.z),
                    Vec3::new(m.x, x.y, m.z),
                ],
            ),
            (
                Vec3::X,
                x.x,
                [
                    Vec3::new(x.x, m.y, m.z),
                    Vec3::new(x.x, x.y, m.z),
                    Vec3::new(x.x, x.y, x.z),
                    Vec3::new(x.x, m.y, x.z),
                ],
            ),
            (
                Vec3::NEG_Y,
                m.y,
                [
                    Vec3::new(m.x, m.y, m.z),
                    Vec3::new(x.x, m.y, m.z),
                    Vec3::new(x.x, m.y, x.z),
                    Vec3::new(m.x, m.y, x.z),
                ],
            ),
            (
                Vec3::Y,
                x.y,
                [
                    Vec3::new(m.x, x.y, m.z),
                    Vec3::new(m.x, x.y, x.z),
                    Vec3::new(x.x, x.y, x.z),
                    Vec3::new(x.x, x.y, m.z),
                ],
            ),
            (
                Vec3::NEG_Z,
                m.z,
                [
                    Vec3::new(m.x, m.y, m.z),
                    Vec3::new(m.x, x.y, m.z),
                    Vec3::new(x.x, x.y, m.z),
                    Vec3::new(x.x, m.y, m.z),
                ],
            ),
            (
                Vec3::Z,
                x.z,
                [
                    Vec3::new(m.x, m.y, x.z),
                    Vec3::new(x.x, m.y, x.z),
                    Vec3::new(x.x, x.y, x.z),
                    Vec3::new(m.x, x.y, x.z),
                ],
            ),
        ];
        let faces = quads
            .into_iter()
            .map(|(normal, coord, quad)| {
                // Axis normals: distance is the signed coordinate along the normal.
                let distance = normal.dot(Vec3::splat(coord));
                Face::new(Plane { normal, distance }, quad.to_vec())
            })
            .collect();
        Self::new(faces)
    }

    /// A copy of this brush moved by `transform`, keeping flags.
    ///
    /// Face planes are recomputed from the transformed polygons. Mirroring
    /// transforms reverse the winding so normals keep pointing outward. Faces
    /// that collapse to zero area are dropped.
    pub fn transformed(&self, transform: &Affine3A) -> Self {
        let mirrored = transform.matrix3.determinant() < 0.0;
        let faces = self
            .faces
            .iter()
            .filter_map(|f| {
                let mut vertices: Vec<Vec3> = f
                    .vertices
                    .iter()
                    .map(|v| transform.transform_point3(*v))
                    .collect();
                if mirrored {
                    vertices.reverse();
                }
                Face::from_polygon(vertices)
            })
            .collect();
        Self::new(faces).with_flags(self.flags)
    }

    /// Builder-style flag override.
    pub fn with_flags(mut self, flags: BrushFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Replace the flags.
    pub fn set_flags(&mut self, flags: BrushFlags) {
        self.flags = flags;
    }

    /// Visibility, picking and lock flags.
    pub fn flags(&self) -> BrushFlags {
        self.flags
    }

    /// Faces in construction order.
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Distinct vertices, in first-seen order over the faces.
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    /// World-space bounding box of all vertices.
    pub fn bounds(&self) -> Aabb3D {
        self.bounds
    }
}

// Copyright 2025 the Brushwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Exact ray tests against planes, faces, brushes, and vertex handles.
//!
//! All functions are pure. "No hit" is `None`; a hit reports the ray parameter
//! `t >= 0`, and `t == 0` counts as a hit.
//!
//! ## Boundaries
//!
//! Face containment is inclusive: a point within [`EDGE_EPSILON`] of an edge
//! line, on the inner side or just outside, is inside. Points are widened to
//! `f64` before anything is subtracted, and the test runs in the face plane's
//! own 2D frame, so the result does not depend on where the face sits in the
//! world or how it is rotated. Faces are hit from the front only.

use brushwork_index::Ray;
use glam::Vec3;
use kurbo::Point;

use crate::brush::{Brush, Face, Plane};

/// Rays with `|normal · direction|` below this are treated as parallel to a plane.
pub const PARALLEL_EPSILON: f32 = 1e-6;

/// Tolerance, in world units, for points just outside a face edge.
pub const EDGE_EPSILON: f64 = 1e-3;

/// The nearest face a ray enters a brush through.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FaceHit {
    /// Index into [`Brush::faces`].
    pub face: usize,
    /// Ray parameter of the hit.
    pub distance: f32,
    /// World-space hit point.
    pub point: Vec3,
}

/// Ray parameter where `ray` crosses `plane`.
///
/// `None` when the ray is parallel to the plane or the crossing is behind the origin.
pub fn intersect_plane(ray: &Ray, plane: &Plane) -> Option<f32> {
    let denom = plane.normal.dot(ray.direction());
    if denom > -PARALLEL_EPSILON && denom < PARALLEL_EPSILON {
        return None;
    }
    let t = (plane.distance - plane.normal.dot(ray.origin())) / denom;
    (t >= 0.0).then_some(t)
}

/// Ray parameter where `ray` hits the front side of `face`.
pub fn intersect_face(ray: &Ray, face: &Face) -> Option<f32> {
    if face.plane().normal.dot(ray.direction()) >= -PARALLEL_EPSILON {
        return None;
    }
    let t = intersect_plane(ray, face.plane())?;
    polygon_contains(face, ray.point_at(t)).then_some(t)
}

/// Nearest face hit on `brush`. Ties go to the lower face index.
pub fn intersect_brush(ray: &Ray, brush: &Brush) -> Option<FaceHit> {
    let mut best: Option<FaceHit> = None;
    for (face, f) in brush.faces().iter().enumerate() {
        let Some(distance) = intersect_face(ray, f) else {
            continue;
        };
        if best.is_none_or(|b| distance < b.distance) {
            best = Some(FaceHit {
                face,
                distance,
                point: ray.point_at(distance),
            });
        }
    }
    best
}

/// Ray parameter of the point on `ray` closest to `vertex`, if that point is
/// in front of the origin and within `radius` of the vertex.
///
/// Approaches of exactly `radius` hit. A negative or non-finite radius never hits.
pub fn intersect_vertex(ray: &Ray, vertex: Vec3, radius: f32) -> Option<f32> {
    if !radius.is_finite() || radius < 0.0 {
        return None;
    }
    let t = (vertex - ray.origin()).dot(ray.direction());
    if t < 0.0 {
        return None;
    }
    (ray.point_at(t).distance_squared(vertex) <= radius * radius).then_some(t)
}

/// Inclusive point-in-convex-polygon test for a point already on the face plane.
fn polygon_contains(face: &Face, p: Vec3) -> bool {
    let vertices = face.vertices();
    let Some(&anchor) = vertices.first() else {
        return false;
    };
    let anchor = anchor.as_dvec3();
    let (u, v) = face.plane().normal.as_dvec3().normalize().any_orthonormal_pair();
    let project = |q: Vec3| {
        let r = q.as_dvec3() - anchor;
        Point::new(r.dot(u), r.dot(v))
    };

    // Twice the signed area; its sign is the winding in this frame.
    let mut area = 0.0;
    for (a, b) in face.edges() {
        area += project(a).to_vec2().cross(project(b).to_vec2());
    }
    if area >= -f64::EPSILON && area <= f64::EPSILON {
        return false;
    }
    let winding = if area > 0.0 { 1.0 } else { -1.0 };

    let p = project(p);
    face.edges().all(|(a, b)| {
        let (a, b) = (project(a), project(b));
        let edge = b - a;
        // Signed distance from the edge line, scaled by the edge length.
        let side = winding * edge.cross(p - a);
        side >= -EDGE_EPSILON * edge.hypot()
    })
}

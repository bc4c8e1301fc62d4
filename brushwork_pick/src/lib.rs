// Copyright 2025 the Brushwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Brushwork Pick: ray picking for brush-based level editors.
//!
//! Given a ray cast from a screen point into a scene of convex brushes, the
//! [`Picker`] answers what the ray hits and in what order.
//!
//! - [`Picker::pick_objects`] walks an octree of brush bounds
//!   ([`brushwork_index`]) and refines every candidate with an exact ray/brush
//!   test. Each hit brush yields an object hit and a face hit.
//! - [`Picker::pick_close_faces`] and [`Picker::pick_vertices`] refine a
//!   caller-chosen set of brushes, typically the current selection, adding
//!   face hits within a distance or vertex handles within a radius.
//! - Results land in a [`HitList`], sorted nearest first, which can be asked
//!   for the first or all hits of some [`HitKinds`].
//!
//! Brushes stay owned by the scene. The picker stores [`BrushId`]s only and
//! reads geometry through [`BrushLookup`] when a query runs. [`BrushArena`] is a
//! ready-made scene model that records [`SceneEvent`]s for [`Picker::sync`].
//!
//! # Example
//!
//! ```rust
//! use brushwork_index::{Aabb3D, Ray};
//! use brushwork_pick::{AcceptAll, Brush, BrushArena, HitKinds, HitList, Picker};
//! use glam::Vec3;
//!
//! let mut scene = BrushArena::new();
//! let cube = scene.insert(Brush::cuboid(Aabb3D::new(Vec3::splat(-0.5), Vec3::splat(0.5))));
//!
//! let mut picker = Picker::new();
//! picker.sync(&mut scene);
//!
//! let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z).unwrap();
//! let hits = picker.pick_objects(&scene, &ray, &AcceptAll);
//! let first = hits.first_hit(HitKinds::OBJECT, false).unwrap();
//! assert_eq!(first.brush(), cube);
//! assert_eq!(first.distance, 4.5);
//!
//! // Refine against the selection: corner handles within 0.6 of the ray.
//! let corner = Ray::from_points(Vec3::new(0.9, 0.9, -5.0), Vec3::new(0.9, 0.9, 5.0)).unwrap();
//! let mut handles = HitList::new();
//! picker.pick_vertices(&scene, &corner, &[cube], 0.6, &mut handles);
//! assert_eq!(handles.hits(HitKinds::VERTEX).count(), 2);
//! ```
//!
//! ## Boundaries
//!
//! Ray parameters are hit distances along a normalized direction, and `t == 0`
//! is a hit. Faces are hit from the front only, and points on or within
//! [`EDGE_EPSILON`] of a face edge count as inside. Vertex handles are hit
//! when the ray passes within the radius, inclusive.
//!
//! ## Features
//!
//! - `std` (default) / `libm`: math backend for `glam` and `kurbo`.
//! - `tracing`: spans around pick queries and trace events with hit counts.

#![no_std]

extern crate alloc;

pub mod arena;
pub mod brush;
pub mod filter;
pub mod hit;
pub mod intersect;
pub mod picker;
pub mod types;

pub use arena::{BrushArena, BrushLookup, SceneEvent};
pub use brush::{Brush, Face, Plane, VERTEX_MERGE_EPSILON};
pub use filter::{AcceptAll, And, Filter, FilterExt, FlagFilter};
pub use hit::{Hit, HitKinds, HitList, HitTarget};
pub use intersect::{
    EDGE_EPSILON, FaceHit, PARALLEL_EPSILON, intersect_brush, intersect_face, intersect_plane,
    intersect_vertex,
};
pub use picker::{Picker, handle_radius};
pub use types::{BrushFlags, BrushId, FaceRef, VertexRef};

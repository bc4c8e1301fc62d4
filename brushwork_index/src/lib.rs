// Copyright 2025 the Brushwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Brushwork Index: a 3D AABB index answering ray queries.
//!
//! Brushwork Index is the broad phase of ray picking in a level editor.
//!
//! - Insert, update, and remove axis-aligned bounding boxes ([`Aabb3D`]) with user payloads.
//! - Walk every entry whose box a [`Ray`] passes through, nearest nodes first.
//! - Query entries overlapping a box.
//!
//! Entries are addressed by generational [`Key`]s: removing an entry invalidates its key
//! and a later insert that reuses the slot hands out a different key.
//!
//! Backends are pluggable via a simple trait so you can swap the spatial strategy without API churn.
//! The default backend is an [`Octree`] over a fixed world box ([`OctreeConfig`]).
//! [`FlatVec`] answers every query with a linear scan.
//!
//! # Example
//!
//! ```rust
//! use brushwork_index::{Aabb3D, Index, Ray};
//! use glam::Vec3;
//!
//! let mut idx: Index<u32> = Index::new();
//! let near = idx.insert(Aabb3D::new(Vec3::new(-1.0, -1.0, 4.0), Vec3::new(1.0, 1.0, 6.0)), 1);
//! let _far = idx.insert(Aabb3D::new(Vec3::new(-1.0, -1.0, 14.0), Vec3::new(1.0, 1.0, 16.0)), 2);
//! let _aside = idx.insert(Aabb3D::new(Vec3::new(9.0, 9.0, 4.0), Vec3::new(11.0, 11.0, 6.0)), 3);
//!
//! // Only the two boxes straddling the z axis are on the ray.
//! let ray = Ray::new(Vec3::ZERO, Vec3::Z).unwrap();
//! let mut hits: Vec<u32> = idx.objects_on_ray(&ray).map(|(_, p)| p).collect();
//! hits.sort();
//! assert_eq!(hits, [1, 2]);
//!
//! // Removal is immediate and idempotent.
//! idx.remove(near);
//! idx.remove(near);
//! assert_eq!(idx.objects_on_ray(&ray).count(), 1);
//! ```
//!
//! ## Choosing a backend
//!
//! - `Octree` (default): prunes whole subtrees the ray misses; tune the root box, leaf
//!   capacity and minimum node size through [`OctreeConfig`] to match your world.
//! - `FlatVec`: simplest and smallest, linear scans. Good for very small sets and as a
//!   reference in tests.
//!
//! ### Float semantics
//!
//! Coordinates are `f32`. Boxes are assumed to be free of NaNs. [`Ray::new`] rejects
//! zero-length and non-finite directions, so every `Ray` value is queryable.

#![no_std]

extern crate alloc;

pub mod backend;
pub mod backends;
pub mod index;
pub mod types;

pub use backend::Backend;
pub use backends::flatvec::FlatVec;
pub use backends::octree::{Octree, OctreeConfig};
pub use index::{Index, IndexGeneric, Key};
pub use types::{Aabb3D, Ray};

// Copyright 2025 the Brushwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend trait for spatial indexing implementations.

use alloc::boxed::Box;

use crate::types::{Aabb3D, Ray};

/// Spatial backend abstraction used by `IndexGeneric`.
///
/// Backends only deal in slot numbers; the index owns payloads and generations.
pub trait Backend {
    /// Insert a new slot into the spatial structure.
    fn insert(&mut self, slot: usize, aabb: Aabb3D);

    /// Update an existing slot's AABB.
    fn update(&mut self, slot: usize, aabb: Aabb3D);

    /// Remove a slot from the spatial structure. Unknown slots are ignored.
    fn remove(&mut self, slot: usize);

    /// Clear all spatial structures.
    fn clear(&mut self);

    /// Lazily yield slots whose AABB the ray intersects, each at most once.
    fn query_ray<'a>(&'a self, ray: Ray) -> Box<dyn Iterator<Item = usize> + 'a>;

    /// Query slots whose AABB overlaps the box.
    fn query_aabb<'a>(&'a self, aabb: Aabb3D) -> Box<dyn Iterator<Item = usize> + 'a>;
}

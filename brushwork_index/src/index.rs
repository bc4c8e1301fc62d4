// Copyright 2025 the Brushwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public `Index` API and generic implementation over a pluggable backend.

use alloc::vec::Vec;
use core::fmt::Debug;

use crate::backend::Backend;
use crate::backends::flatvec::FlatVec;
use crate::backends::octree::{Octree, OctreeConfig};
use crate::types::{Aabb3D, Ray};

/// Generational handle for entries.
///
/// A key stays valid until its entry is removed. Slots are reused afterwards,
/// but with a bumped generation, so a stale key never aliases a newer entry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Key(u32, u32);

impl Key {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Index keys are 32-bit; slot counts never reach 2^32."
    )]
    const fn new(idx: usize, generation: u32) -> Self {
        Self(idx as u32, generation)
    }

    const fn idx(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug)]
struct Entry<P> {
    aabb: Aabb3D,
    payload: P,
}

#[derive(Clone, Debug)]
struct Slot<P> {
    // Survives removal so reuse can bump it.
    generation: u32,
    entry: Option<Entry<P>>,
}

/// A 3D AABB index parameterized by a spatial backend.
///
/// Mutations apply to the backend immediately; there is no batching step.
#[derive(Debug)]
pub struct IndexGeneric<P: Copy + Debug, B: Backend> {
    slots: Vec<Slot<P>>,
    free_list: Vec<usize>,
    len: usize,
    backend: B,
}

impl<P, B> IndexGeneric<P, B>
where
    P: Copy + Debug,
    B: Backend + Default,
{
    /// Create an empty index using the backend's default constructor.
    pub fn new() -> Self {
        Self::with_backend(B::default())
    }
}

impl<P, B> IndexGeneric<P, B>
where
    P: Copy + Debug,
    B: Backend,
{
    /// Create an empty index around an explicitly configured backend.
    pub fn with_backend(backend: B) -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
            len: 0,
            backend,
        }
    }

    /// Reserve space for at least `n` entries.
    pub fn reserve(&mut self, n: usize) {
        self.slots.reserve(n);
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if there are no live entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The spatial backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Insert a new AABB with payload. Returns a stable handle `Key`.
    pub fn insert(&mut self, aabb: Aabb3D, payload: P) -> Key {
        let entry = Some(Entry { aabb, payload });
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let slot = &mut self.slots[idx];
            slot.generation = slot.generation.wrapping_add(1);
            slot.entry = entry;
            (idx, slot.generation)
        } else {
            self.slots.push(Slot {
                generation: 1,
                entry,
            });
            (self.slots.len() - 1, 1)
        };
        self.backend.insert(idx, aabb);
        self.len += 1;
        Key::new(idx, generation)
    }

    /// Update an existing AABB. Stale keys are ignored.
    pub fn update(&mut self, key: Key, aabb: Aabb3D) {
        if let Some(e) = self.entry_mut(key) {
            e.aabb = aabb;
            self.backend.update(key.idx(), aabb);
        }
    }

    /// Remove an existing AABB. Removing twice, or with a stale key, does nothing.
    pub fn remove(&mut self, key: Key) {
        if self.entry_mut(key).is_none() {
            return;
        }
        self.slots[key.idx()].entry = None;
        self.free_list.push(key.idx());
        self.backend.remove(key.idx());
        self.len -= 1;
    }

    /// Clear the index. Outstanding keys become stale.
    pub fn clear(&mut self) {
        for (i, slot) in self.slots.iter_mut().enumerate() {
            if slot.entry.take().is_some() {
                self.free_list.push(i);
            }
        }
        self.len = 0;
        self.backend.clear();
    }

    /// Whether `key` refers to a live entry.
    pub fn is_alive(&self, key: Key) -> bool {
        self.entry(key).is_some()
    }

    /// AABB and payload stored under `key`.
    pub fn get(&self, key: Key) -> Option<(Aabb3D, P)> {
        self.entry(key).map(|e| (e.aabb, e.payload))
    }

    /// Lazily yield entries whose AABB the ray intersects.
    ///
    /// Each entry is yielded at most once. The order follows the backend's
    /// traversal (near to far by node for the octree) and is only a coarse
    /// hint, not a sort by hit distance.
    pub fn objects_on_ray(&self, ray: &Ray) -> impl Iterator<Item = (Key, P)> + '_ {
        self.backend
            .query_ray(*ray)
            .filter_map(move |i| self.live(i))
    }

    /// Query for entries whose AABB overlaps the given box.
    pub fn query_aabb(&self, aabb: Aabb3D) -> impl Iterator<Item = (Key, P)> + '_ {
        self.backend
            .query_aabb(aabb)
            .filter_map(move |i| self.live(i))
    }

    fn live(&self, i: usize) -> Option<(Key, P)> {
        let slot = self.slots.get(i)?;
        let e = slot.entry.as_ref()?;
        Some((Key::new(i, slot.generation), e.payload))
    }

    fn entry(&self, key: Key) -> Option<&Entry<P>> {
        let slot = self.slots.get(key.idx())?;
        if slot.generation != key.1 {
            return None;
        }
        slot.entry.as_ref()
    }

    fn entry_mut(&mut self, key: Key) -> Option<&mut Entry<P>> {
        let slot = self.slots.get_mut(key.idx())?;
        if slot.generation != key.1 {
            return None;
        }
        slot.entry.as_mut()
    }
}

/// Default index using the octree backend.
pub type Index<P> = IndexGeneric<P, Octree>;

impl<P: Copy + Debug> Default for Index<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Copy + Debug> Index<P> {
    /// Create an octree-backed index with explicit bounds and split policy.
    pub fn with_octree(config: OctreeConfig) -> Self {
        Self::with_backend(Octree::with_config(config))
    }

    /// Create an index that answers every query with a linear scan.
    pub fn with_flat_vec() -> IndexGeneric<P, FlatVec> {
        IndexGeneric::with_backend(FlatVec::default())
    }
}

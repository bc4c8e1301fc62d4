// Copyright 2025 the Brushwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hit records and the distance-ordered hit list.

use alloc::vec::Vec;

use glam::Vec3;

use crate::types::{BrushId, FaceRef, VertexRef};

bitflags::bitflags! {
    /// Kinds of hit, combinable for retrieval queries.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct HitKinds: u8 {
        /// Whole-brush hit from the broad phase.
        const OBJECT = 0b0000_0001;
        /// A specific face.
        const FACE   = 0b0000_0010;
        /// A vertex handle.
        const VERTEX = 0b0000_0100;
    }
}

/// What a hit refers to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum HitTarget {
    /// A brush as a whole.
    Object(BrushId),
    /// One face of a brush.
    Face(FaceRef),
    /// One vertex of a brush.
    Vertex(VertexRef),
}

/// One ray intersection result.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Hit {
    /// The hit entity.
    pub target: HitTarget,
    /// Ray parameter of the hit; world units along the normalized direction.
    pub distance: f32,
    /// World-space hit point.
    pub point: Vec3,
}

impl Hit {
    /// The single kind flag of this hit.
    pub fn kind(&self) -> HitKinds {
        match self.target {
            HitTarget::Object(_) => HitKinds::OBJECT,
            HitTarget::Face(_) => HitKinds::FACE,
            HitTarget::Vertex(_) => HitKinds::VERTEX,
        }
    }

    /// The brush this hit belongs to.
    pub fn brush(&self) -> BrushId {
        match self.target {
            HitTarget::Object(id) => id,
            HitTarget::Face(f) => f.brush,
            HitTarget::Vertex(v) => v.brush,
        }
    }
}

/// Hits from one query, kept sorted by ascending distance.
///
/// Insertion is stable: hits at equal distances keep the order they were
/// added in. Nothing is deduplicated or rejected.
#[derive(Clone, Debug, Default)]
pub struct HitList {
    hits: Vec<Hit>,
}

impl HitList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a hit at its distance rank.
    pub fn add(&mut self, hit: Hit) {
        debug_assert!(!hit.distance.is_nan(), "hit distance must be a number");
        let at = self.hits.partition_point(|h| h.distance <= hit.distance);
        self.hits.insert(at, hit);
    }

    /// Closest hit whose kind is in `kinds`.
    ///
    /// With `ignore_objects`, whole-brush hits are skipped even if `kinds`
    /// includes [`HitKinds::OBJECT`].
    pub fn first_hit(&self, kinds: HitKinds, ignore_objects: bool) -> Option<&Hit> {
        let kinds = if ignore_objects {
            kinds - HitKinds::OBJECT
        } else {
            kinds
        };
        self.hits(kinds).next()
    }

    /// All hits whose kind is in `kinds`, nearest first.
    pub fn hits(&self, kinds: HitKinds) -> impl Iterator<Item = &Hit> + '_ {
        self.hits.iter().filter(move |h| kinds.intersects(h.kind()))
    }

    /// Number of hits.
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    /// True if nothing was hit.
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// All hits, nearest first.
    pub fn iter(&self) -> core::slice::Iter<'_, Hit> {
        self.hits.iter()
    }

    /// The sorted hits as a slice.
    pub fn as_slice(&self) -> &[Hit] {
        &self.hits
    }

    /// Remove all hits.
    pub fn clear(&mut self) {
        self.hits.clear();
    }

    /// Keep only hits matching `f`. Order is preserved.
    pub fn retain(&mut self, f: impl FnMut(&Hit) -> bool) {
        self.hits.retain(f);
    }
}

impl Extend<Hit> for HitList {
    fn extend<I: IntoIterator<Item = Hit>>(&mut self, iter: I) {
        for hit in iter {
            self.add(hit);
        }
    }
}

impl FromIterator<Hit> for HitList {
    fn from_iter<I: IntoIterator<Item = Hit>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl IntoIterator for HitList {
    type Item = Hit;
    type IntoIter = alloc::vec::IntoIter<Hit>;

    fn into_iter(self) -> Self::IntoIter {
        self.hits.into_iter()
    }
}

impl<'a> IntoIterator for &'a HitList {
    type Item = &'a Hit;
    type IntoIter = core::slice::Iter<'a, Hit>;

    fn into_iter(self) -> Self::IntoIter {
        self.hits.iter()
    }
}

// Copyright 2025 the Brushwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public handle types: brush identifiers, flags, and face/vertex references.

/// Identifier for a brush owned by the scene model.
///
/// This is a small, copyable handle that stays stable across edits but becomes
/// invalid when the brush is removed. It consists of a slot index and a
/// generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `BrushId` for it is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `BrushId`.
///
/// Picking never owns brushes. The index and hit lists only store these handles,
/// and a stale handle resolves to nothing instead of a different brush.
///
/// [`BrushArena`](crate::arena::BrushArena) hands these out itself. Other scene
/// models mint their own with [`BrushId::from_raw`], following the same rules:
/// at most one live id per slot, and a fresh generation whenever a slot is reused.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct BrushId(pub(crate) u32, pub(crate) u32);

impl BrushId {
    /// Build an id from a slot index and generation.
    ///
    /// The picker sizes its slot table by the largest slot it has seen, so
    /// slots should be small, densely reused integers.
    pub const fn from_raw(slot: u32, generation: u32) -> Self {
        Self(slot, generation)
    }

    /// Slot index.
    pub const fn slot(self) -> u32 {
        self.0
    }

    /// Generation of the slot this id was issued for.
    pub const fn generation(self) -> u32 {
        self.1
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Brush flags consulted by [`FlagFilter`](crate::filter::FlagFilter).
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct BrushFlags: u8 {
        /// Brush is visible (its layer is shown).
        const VISIBLE  = 0b0000_0001;
        /// Brush is pickable (participates in selection).
        const PICKABLE = 0b0000_0010;
        /// Brush is locked against editing.
        const LOCKED   = 0b0000_0100;
    }
}

impl Default for BrushFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::PICKABLE
    }
}

/// A face of a brush, by position in [`Brush::faces`](crate::brush::Brush::faces).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct FaceRef {
    /// Owning brush.
    pub brush: BrushId,
    /// Face index within the brush.
    pub face: usize,
}

/// A vertex of a brush, by position in [`Brush::vertices`](crate::brush::Brush::vertices).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct VertexRef {
    /// Owning brush.
    pub brush: BrushId,
    /// Index into the brush's distinct vertex list.
    pub vertex: usize,
}

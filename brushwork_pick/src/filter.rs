// Copyright 2025 the Brushwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Candidate filters for picking.
//!
//! A [`Filter`] decides whether a brush takes part in a query at all. It runs
//! before any geometric test, so rejected brushes cost one predicate call.
//!
//! Closures `Fn(BrushId, &Brush) -> bool` are filters:
//!
//! ```rust
//! use brushwork_index::Aabb3D;
//! use brushwork_pick::{Brush, BrushArena, BrushFlags, BrushId, BrushLookup, Filter};
//! use glam::Vec3;
//!
//! let mut scene = BrushArena::new();
//! let id = scene.insert(Brush::cuboid(Aabb3D::new(Vec3::ZERO, Vec3::ONE)));
//!
//! let locked_only = |_: BrushId, b: &Brush| b.flags().contains(BrushFlags::LOCKED);
//! assert!(!locked_only.accepts(id, scene.brush(id).unwrap()));
//! ```

use crate::brush::Brush;
use crate::types::{BrushFlags, BrushId};

/// Predicate over pick candidates.
pub trait Filter {
    /// Whether the brush may produce hits.
    fn accepts(&self, id: BrushId, brush: &Brush) -> bool;
}

impl<F> Filter for F
where
    F: Fn(BrushId, &Brush) -> bool,
{
    fn accepts(&self, id: BrushId, brush: &Brush) -> bool {
        self(id, brush)
    }
}

/// Accepts every brush.
#[derive(Copy, Clone, Debug, Default)]
pub struct AcceptAll;

impl Filter for AcceptAll {
    fn accepts(&self, _: BrushId, _: &Brush) -> bool {
        true
    }
}

/// Filter on [`BrushFlags`].
///
/// Each enabled check must pass. The default accepts visible, pickable
/// brushes, locked or not.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FlagFilter {
    /// Reject brushes without [`BrushFlags::VISIBLE`].
    pub visible_only: bool,
    /// Reject brushes without [`BrushFlags::PICKABLE`].
    pub pickable_only: bool,
    /// Reject brushes with [`BrushFlags::LOCKED`].
    pub unlocked_only: bool,
}

impl Default for FlagFilter {
    fn default() -> Self {
        Self {
            visible_only: true,
            pickable_only: true,
            unlocked_only: false,
        }
    }
}

impl FlagFilter {
    /// Selection picking: visible, pickable and unlocked.
    pub const fn editable() -> Self {
        Self {
            visible_only: true,
            pickable_only: true,
            unlocked_only: true,
        }
    }
}

impl Filter for FlagFilter {
    fn accepts(&self, _: BrushId, brush: &Brush) -> bool {
        let flags = brush.flags();
        (!self.visible_only || flags.contains(BrushFlags::VISIBLE))
            && (!self.pickable_only || flags.contains(BrushFlags::PICKABLE))
            && (!self.unlocked_only || !flags.contains(BrushFlags::LOCKED))
    }
}

/// Accepts what both filters accept. Built with [`FilterExt::and`].
#[derive(Copy, Clone, Debug)]
pub struct And<A, B>(A, B);

impl<A: Filter, B: Filter> Filter for And<A, B> {
    fn accepts(&self, id: BrushId, brush: &Brush) -> bool {
        self.0.accepts(id, brush) && self.1.accepts(id, brush)
    }
}

/// Combinators for filters.
pub trait FilterExt: Filter + Sized {
    /// A filter accepting what both `self` and `other` accept.
    fn and<B: Filter>(self, other: B) -> And<Self, B> {
        And(self, other)
    }
}

impl<F: Filter> FilterExt for F {}

// Copyright 2025 the Brushwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A reference scene model: an arena of brushes that records what changed.
//!
//! Editors usually own brushes in their own document model. The picker only
//! needs read access by id, which is what [`BrushLookup`] describes. The arena
//! here implements it and doubles as a change log the picker can drain with
//! [`Picker::sync`](crate::picker::Picker::sync).

use alloc::vec::Vec;

use crate::brush::Brush;
use crate::types::{BrushFlags, BrushId};

/// Read access to brush geometry by id.
pub trait BrushLookup {
    /// The brush for `id`, or `None` if the id is stale or unknown.
    fn brush(&self, id: BrushId) -> Option<&Brush>;
}

impl<L: BrushLookup + ?Sized> BrushLookup for &L {
    fn brush(&self, id: BrushId) -> Option<&Brush> {
        (**self).brush(id)
    }
}

/// A change to the scene, addressed by brush id.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SceneEvent {
    /// A brush was inserted.
    Added(BrushId),
    /// A brush's geometry or flags changed.
    Changed(BrushId),
    /// A brush was removed; its id is now stale.
    Removed(BrushId),
}

impl SceneEvent {
    /// The brush this event refers to.
    pub fn id(&self) -> BrushId {
        match *self {
            Self::Added(id) | Self::Changed(id) | Self::Removed(id) => id,
        }
    }
}

#[derive(Clone, Debug)]
struct Slot {
    generation: u32,
    brush: Option<Brush>,
}

/// Generational storage for brushes, with a queue of [`SceneEvent`]s.
///
/// Every mutation appends an event. Events accumulate until drained with
/// [`take_events`](Self::take_events).
#[derive(Clone, Debug, Default)]
pub struct BrushArena {
    slots: Vec<Slot>,
    free_list: Vec<usize>,
    events: Vec<SceneEvent>,
    len: usize,
}

impl BrushArena {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live brushes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if no brushes are live.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert a brush and return its id.
    pub fn insert(&mut self, brush: Brush) -> BrushId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let slot = &mut self.slots[idx];
            slot.generation = slot.generation.wrapping_add(1);
            slot.brush = Some(brush);
            (idx, slot.generation)
        } else {
            self.slots.push(Slot {
                generation: 1,
                brush: Some(brush),
            });
            (self.slots.len() - 1, 1)
        };
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Brush ids are 32-bit; an arena never holds 2^32 slots."
        )]
        let id = BrushId::from_raw(idx as u32, generation);
        self.len += 1;
        self.events.push(SceneEvent::Added(id));
        id
    }

    /// Remove a brush, returning it. Stale ids return `None` and record nothing.
    pub fn remove(&mut self, id: BrushId) -> Option<Brush> {
        let slot = self.slot_mut(id)?;
        let brush = slot.brush.take()?;
        self.free_list.push(id.idx());
        self.len -= 1;
        self.events.push(SceneEvent::Removed(id));
        Some(brush)
    }

    /// Replace a brush's geometry, returning the previous value.
    pub fn replace(&mut self, id: BrushId, brush: Brush) -> Option<Brush> {
        let slot = self.slot_mut(id)?;
        let old = slot.brush.replace(brush)?;
        self.events.push(SceneEvent::Changed(id));
        Some(old)
    }

    /// Change a brush's flags. Returns `false` for stale ids.
    pub fn set_flags(&mut self, id: BrushId, flags: BrushFlags) -> bool {
        let Some(brush) = self.slot_mut(id).and_then(|s| s.brush.as_mut()) else {
            return false;
        };
        brush.set_flags(flags);
        self.events.push(SceneEvent::Changed(id));
        true
    }

    /// The brush for `id`, if live.
    pub fn get(&self, id: BrushId) -> Option<&Brush> {
        let slot = self.slots.get(id.idx())?;
        if slot.generation != id.1 {
            return None;
        }
        slot.brush.as_ref()
    }

    /// Whether `id` refers to a live brush.
    pub fn is_alive(&self, id: BrushId) -> bool {
        self.get(id).is_some()
    }

    /// Live brushes in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (BrushId, &Brush)> + '_ {
        self.slots.iter().enumerate().filter_map(|(i, slot)| {
            let brush = slot.brush.as_ref()?;
            #[allow(
                clippy::cast_possible_truncation,
                reason = "Slot indices were handed out as u32 on insert."
            )]
            let id = BrushId::from_raw(i as u32, slot.generation);
            Some((id, brush))
        })
    }

    /// Drain the events recorded since the last call, oldest first.
    pub fn take_events(&mut self) -> Vec<SceneEvent> {
        core::mem::take(&mut self.events)
    }

    fn slot_mut(&mut self, id: BrushId) -> Option<&mut Slot> {
        let slot = self.slots.get_mut(id.idx())?;
        (slot.generation == id.1).then_some(slot)
    }
}

impl BrushLookup for BrushArena {
    fn brush(&self, id: BrushId) -> Option<&Brush> {
        self.get(id)
    }
}

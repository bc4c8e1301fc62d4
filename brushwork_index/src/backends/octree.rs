// Copyright 2025 the Brushwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Octree backend over a fixed world box.
//!
//! Each object is stored exactly once, in the deepest node whose bounds fully
//! contain its AABB. A leaf splits into eight equal octants once it holds more
//! than [`OctreeConfig::max_objects_per_node`] objects, as long as the halves
//! would not be smaller than [`OctreeConfig::min_node_size`]. Objects that
//! straddle a split plane stay in the parent, so no object is ever duplicated
//! and ray traversal never needs a "seen" set.
//!
//! Objects that do not fit inside [`OctreeConfig::bounds`] at all are kept in an
//! overflow list that every query scans.

use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Debug;

use glam::Vec3;

use crate::backend::Backend;
use crate::types::{Aabb3D, Ray};

/// Tuning knobs for [`Octree`].
#[derive(Clone, Debug, PartialEq)]
pub struct OctreeConfig {
    /// World region covered by the root node.
    pub bounds: Aabb3D,
    /// A leaf splits when it holds more objects than this.
    pub max_objects_per_node: usize,
    /// Nodes are never split into children smaller than this edge length.
    ///
    /// Values below [`f32::EPSILON`], including zero and negative sizes, act
    /// as [`f32::EPSILON`].
    pub min_node_size: f32,
}

impl Default for OctreeConfig {
    fn default() -> Self {
        Self {
            bounds: Aabb3D::new(Vec3::splat(-4096.0), Vec3::splat(4096.0)),
            max_objects_per_node: 8,
            min_node_size: 32.0,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
struct NodeIdx(usize);

impl NodeIdx {
    const fn new(i: usize) -> Self {
        Self(i)
    }

    const fn get(self) -> usize {
        self.0
    }
}

/// Where a slot currently lives.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Home {
    Node(NodeIdx),
    Overflow,
}

#[derive(Copy, Clone, Debug)]
struct Placement {
    aabb: Aabb3D,
    home: Home,
}

struct Node {
    bounds: Aabb3D,
    // Index of the first of eight contiguous children.
    children: Option<NodeIdx>,
    objects: Vec<usize>,
}

impl Node {
    fn leaf(bounds: Aabb3D) -> Self {
        Self {
            bounds,
            children: None,
            objects: Vec::new(),
        }
    }
}

/// Octree backend. See the [module docs](self) for the storage policy.
pub struct Octree {
    config: OctreeConfig,
    nodes: Vec<Node>,
    overflow: Vec<usize>,
    slots: Vec<Option<Placement>>,
}

impl Default for Octree {
    fn default() -> Self {
        Self::with_config(OctreeConfig::default())
    }
}

impl Debug for Octree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let alive = self.slots.iter().filter(|s| s.is_some()).count();
        f.debug_struct("Octree")
            .field("bounds", &self.config.bounds)
            .field("nodes", &self.nodes.len())
            .field("alive", &alive)
            .field("overflow", &self.overflow.len())
            .finish_non_exhaustive()
    }
}

impl Octree {
    /// Create an empty octree covering `config.bounds`.
    pub fn with_config(config: OctreeConfig) -> Self {
        Self {
            nodes: vec![Node::leaf(config.bounds)],
            config,
            overflow: Vec::new(),
            slots: Vec::new(),
        }
    }

    /// The configuration this tree was built with.
    pub fn config(&self) -> &OctreeConfig {
        &self.config
    }

    /// Number of allocated nodes, including the root.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn can_split(&self, bounds: &Aabb3D) -> bool {
        let half = bounds.size().max_element() * 0.5;
        let center = bounds.center();
        // Some child must come out strictly smaller than its parent.
        half >= self.config.min_node_size.max(f32::EPSILON)
            && (bounds.min.cmplt(center) & center.cmplt(bounds.max)).any()
    }

    /// Deepest existing node that fully contains `aabb`. Assumes the root does.
    fn descend(&self, aabb: &Aabb3D) -> usize {
        let mut idx = 0;
        while let Some(first) = self.nodes[idx].children {
            match octant_of(&self.nodes[idx].bounds, aabb) {
                Some(o) => idx = first.get() + o,
                None => break,
            }
        }
        idx
    }

    fn maybe_split(&mut self, idx: usize) {
        let node = &self.nodes[idx];
        if node.children.is_some()
            || node.objects.len() <= self.config.max_objects_per_node
            || !self.can_split(&node.bounds)
        {
            return;
        }
        self.split(idx);
    }

    fn split(&mut self, idx: usize) {
        let bounds = self.nodes[idx].bounds;
        let first = self.nodes.len();
        for o in 0..8 {
            self.nodes.push(Node::leaf(octant_bounds(&bounds, o)));
        }
        self.nodes[idx].children = Some(NodeIdx::new(first));

        let objects = core::mem::take(&mut self.nodes[idx].objects);
        let mut kept = Vec::new();
        for slot in objects {
            let Some(p) = self.slots[slot].as_mut() else {
                continue;
            };
            match octant_of(&bounds, &p.aabb) {
                Some(o) => {
                    self.nodes[first + o].objects.push(slot);
                    p.home = Home::Node(NodeIdx::new(first + o));
                }
                None => kept.push(slot),
            }
        }
        #[cfg(feature = "tracing")]
        tracing::trace!(node = idx, kept = kept.len(), "octree node split");
        self.nodes[idx].objects = kept;

        for o in 0..8 {
            self.maybe_split(first + o);
        }
    }

    fn slot_on_ray(&self, slot: usize, ray: &Ray) -> bool {
        self.slots
            .get(slot)
            .and_then(Option::as_ref)
            .is_some_and(|p| p.aabb.ray_entry(ray).is_some())
    }
}

impl Backend for Octree {
    fn insert(&mut self, slot: usize, aabb: Aabb3D) {
        if self.slots.len() <= slot {
            self.slots.resize_with(slot + 1, || None);
        }
        if self.slots[slot].is_some() {
            self.remove(slot);
        }
        if !self.nodes[0].bounds.contains(&aabb) {
            self.overflow.push(slot);
            self.slots[slot] = Some(Placement {
                aabb,
                home: Home::Overflow,
            });
            return;
        }
        let idx = self.descend(&aabb);
        self.nodes[idx].objects.push(slot);
        self.slots[slot] = Some(Placement {
            aabb,
            home: Home::Node(NodeIdx::new(idx)),
        });
        self.maybe_split(idx);
    }

    fn update(&mut self, slot: usize, aabb: Aabb3D) {
        if self.slots.get(slot).is_some_and(Option::is_some) {
            self.remove(slot);
            self.insert(slot, aabb);
        }
    }

    fn remove(&mut self, slot: usize) {
        let Some(p) = self.slots.get_mut(slot).and_then(Option::take) else {
            return;
        };
        let list = match p.home {
            Home::Node(n) => &mut self.nodes[n.get()].objects,
            Home::Overflow => &mut self.overflow,
        };
        if let Some(pos) = list.iter().position(|&s| s == slot) {
            list.swap_remove(pos);
        }
    }

    fn clear(&mut self) {
        self.nodes.truncate(1);
        let root = &mut self.nodes[0];
        root.children = None;
        root.objects.clear();
        self.overflow.clear();
        self.slots.clear();
    }

    fn query_ray<'a>(&'a self, ray: Ray) -> Box<dyn Iterator<Item = usize> + 'a> {
        Box::new(RayTraversal::new(self, ray))
    }

    fn query_aabb<'a>(&'a self, aabb: Aabb3D) -> Box<dyn Iterator<Item = usize> + 'a> {
        let overlaps = |slot: &usize| {
            self.slots[*slot]
                .as_ref()
                .is_some_and(|p| p.aabb.overlaps(&aabb))
        };
        let mut out: Vec<usize> = self.overflow.iter().copied().filter(overlaps).collect();
        let mut stack = vec![0_usize];
        while let Some(idx) = stack.pop() {
            let node = &self.nodes[idx];
            if !node.bounds.overlaps(&aabb) {
                continue;
            }
            out.extend(node.objects.iter().copied().filter(overlaps));
            if let Some(first) = node.children {
                stack.extend(first.get()..first.get() + 8);
            }
        }
        Box::new(out.into_iter())
    }
}

/// Depth-first walk that pops the nearest child first, giving a near-to-far
/// node order. Objects within one node come out in storage order.
#[derive(Debug)]
struct RayTraversal<'a> {
    octree: &'a Octree,
    ray: Ray,
    current: core::slice::Iter<'a, usize>,
    stack: Vec<usize>,
}

impl<'a> RayTraversal<'a> {
    fn new(octree: &'a Octree, ray: Ray) -> Self {
        let mut stack = Vec::new();
        if octree.nodes[0].bounds.ray_entry(&ray).is_some() {
            stack.push(0);
        }
        Self {
            octree,
            ray,
            current: octree.overflow.iter(),
            stack,
        }
    }

    fn enter(&mut self, idx: usize) {
        let octree = self.octree;
        let node = &octree.nodes[idx];
        self.current = node.objects.iter();
        let Some(first) = node.children else {
            return;
        };
        let mut hits = [(0.0_f32, 0_usize); 8];
        let mut n = 0;
        for child in first.get()..first.get() + 8 {
            if let Some(t) = octree.nodes[child].bounds.ray_entry(&self.ray) {
                hits[n] = (t, child);
                n += 1;
            }
        }
        // Farthest first, so the nearest child is popped next.
        hits[..n].sort_unstable_by(|a, b| b.0.total_cmp(&a.0));
        self.stack.extend(hits[..n].iter().map(|&(_, child)| child));
    }
}

impl Iterator for RayTraversal<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        loop {
            for &slot in self.current.by_ref() {
                if self.octree.slot_on_ray(slot, &self.ray) {
                    return Some(slot);
                }
            }
            let idx = self.stack.pop()?;
            self.enter(idx);
        }
    }
}

/// Which octant of `bounds` fully contains `aabb`, if any.
///
/// Octant bits: bit 0 is +X, bit 1 is +Y, bit 2 is +Z. A box touching the
/// split plane from below belongs to the lower octant.
fn octant_of(bounds: &Aabb3D, aabb: &Aabb3D) -> Option<usize> {
    let center = bounds.center();
    let mut octant = 0;
    for axis in 0..3 {
        if aabb.max[axis] <= center[axis] {
            continue;
        }
        if aabb.min[axis] >= center[axis] {
            octant |= 1 << axis;
        } else {
            return None;
        }
    }
    Some(octant)
}

fn octant_bounds(bounds: &Aabb3D, octant: usize) -> Aabb3D {
    let center = bounds.center();
    let mut min = bounds.min;
    let mut max = bounds.max;
    for axis in 0..3 {
        if octant & (1 << axis) != 0 {
            min[axis] = center[axis];
        } else {
            max[axis] = center[axis];
        }
    }
    Aabb3D::new(min, max)
}

// Copyright 2025 the Brushwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The picker: an octree over brush bounds plus exact refinement passes.

use alloc::vec::Vec;

use brushwork_index::{Aabb3D, Index, Key, OctreeConfig, Ray};
use glam::Mat4;

use crate::arena::{BrushArena, BrushLookup, SceneEvent};
use crate::brush::Brush;
use crate::filter::Filter;
use crate::hit::{Hit, HitList, HitTarget};
use crate::intersect::{intersect_brush, intersect_face, intersect_vertex};
use crate::types::{BrushId, FaceRef, VertexRef};

// Indexed boxes are padded by the face edge tolerance so that near-edge hits
// accepted by the face test are never culled by the octree.
const BOUNDS_PADDING: f32 = 1e-3;

fn indexed_bounds(brush: &Brush) -> Aabb3D {
    brush.bounds().expand(BOUNDS_PADDING)
}

/// Ray picking over a scene of brushes.
///
/// The picker keeps an octree of brush bounding boxes keyed by [`BrushId`].
/// It never owns brushes: geometry is looked up through a [`BrushLookup`]
/// at query time, and ids the scene no longer knows are skipped.
///
/// Keep the index current by forwarding scene changes, either one at a time
/// ([`brush_added`](Self::brush_added), [`brush_changed`](Self::brush_changed),
/// [`brush_removed`](Self::brush_removed), [`apply`](Self::apply)) or in bulk
/// from a [`BrushArena`] with [`sync`](Self::sync).
#[derive(Debug, Default)]
pub struct Picker {
    index: Index<BrushId>,
    // Indexed by brush slot.
    keys: Vec<Option<(BrushId, Key)>>,
}

impl Picker {
    /// Create an empty picker with the default octree configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty picker with explicit octree bounds and split policy.
    pub fn with_config(config: OctreeConfig) -> Self {
        Self {
            index: Index::with_octree(config),
            keys: Vec::new(),
        }
    }

    /// Number of indexed brushes.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// True if no brushes are indexed.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Whether `id` is currently indexed.
    pub fn contains(&self, id: BrushId) -> bool {
        self.key(id).is_some()
    }

    /// Index a new brush. An id that is already indexed is updated instead.
    pub fn brush_added(&mut self, id: BrushId, brush: &Brush) {
        if let Some(key) = self.key(id) {
            self.index.update(key, indexed_bounds(brush));
            return;
        }
        let slot = id.idx();
        if self.keys.len() <= slot {
            self.keys.resize(slot + 1, None);
        }
        // An older generation of this slot is stale now.
        if let Some((_, old)) = self.keys[slot].take() {
            self.index.remove(old);
        }
        let key = self.index.insert(indexed_bounds(brush), id);
        self.keys[slot] = Some((id, key));
    }

    /// Re-index a brush whose geometry changed.
    pub fn brush_changed(&mut self, id: BrushId, brush: &Brush) {
        self.brush_added(id, brush);
    }

    /// Drop a brush from the index. Unknown or stale ids are ignored.
    pub fn brush_removed(&mut self, id: BrushId) {
        if self.key(id).is_none() {
            return;
        }
        if let Some((_, key)) = self.keys[id.idx()].take() {
            self.index.remove(key);
        }
    }

    /// Apply one scene event, reading current geometry from `scene`.
    ///
    /// Additions and changes for brushes the scene no longer has are treated
    /// as removals.
    pub fn apply(&mut self, event: SceneEvent, scene: &(impl BrushLookup + ?Sized)) {
        match event {
            SceneEvent::Added(id) | SceneEvent::Changed(id) => match scene.brush(id) {
                Some(brush) => self.brush_changed(id, brush),
                None => self.brush_removed(id),
            },
            SceneEvent::Removed(id) => self.brush_removed(id),
        }
    }

    /// Drain the arena's pending events into the index.
    pub fn sync(&mut self, arena: &mut BrushArena) {
        let events = arena.take_events();
        #[cfg(feature = "tracing")]
        tracing::trace!(events = events.len(), "picker sync");
        for event in events {
            self.apply(event, &*arena);
        }
    }

    /// Replace the whole index with `brushes`.
    pub fn rebuild<'a>(&mut self, brushes: impl IntoIterator<Item = (BrushId, &'a Brush)>) {
        self.index.clear();
        self.keys.clear();
        for (id, brush) in brushes {
            self.brush_added(id, brush);
        }
    }

    /// Broad-phase pick over the whole scene.
    ///
    /// Walks the octree along `ray`. Each brush that `filter` accepts and the
    /// ray enters contributes an object hit and a face hit for its entry face,
    /// both at the entry distance.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip_all, name = "picker::pick_objects")
    )]
    pub fn pick_objects(
        &self,
        scene: &(impl BrushLookup + ?Sized),
        ray: &Ray,
        filter: &(impl Filter + ?Sized),
    ) -> HitList {
        let mut hits = HitList::new();
        for (_, id) in self.index.objects_on_ray(ray) {
            let Some(brush) = scene.brush(id) else {
                continue;
            };
            if !filter.accepts(id, brush) {
                continue;
            }
            let Some(face_hit) = intersect_brush(ray, brush) else {
                continue;
            };
            hits.add(Hit {
                target: HitTarget::Object(id),
                distance: face_hit.distance,
                point: face_hit.point,
            });
            hits.add(Hit {
                target: HitTarget::Face(FaceRef {
                    brush: id,
                    face: face_hit.face,
                }),
                distance: face_hit.distance,
                point: face_hit.point,
            });
        }
        #[cfg(feature = "tracing")]
        tracing::trace!(hits = hits.len(), "pick_objects");
        hits
    }

    /// Add a face hit for every face of `brushes` the ray hits within `max_distance`.
    ///
    /// Bypasses the index. Existing hits are kept. A negative or non-finite
    /// `max_distance` adds nothing.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip_all, name = "picker::pick_close_faces")
    )]
    pub fn pick_close_faces(
        &self,
        scene: &(impl BrushLookup + ?Sized),
        ray: &Ray,
        brushes: &[BrushId],
        max_distance: f32,
        hits: &mut HitList,
    ) {
        if !max_distance.is_finite() || max_distance < 0.0 {
            return;
        }
        for &id in brushes {
            let Some(brush) = scene.brush(id) else {
                continue;
            };
            for (face, f) in brush.faces().iter().enumerate() {
                let Some(distance) = intersect_face(ray, f) else {
                    continue;
                };
                if distance <= max_distance {
                    hits.add(Hit {
                        target: HitTarget::Face(FaceRef { brush: id, face }),
                        distance,
                        point: ray.point_at(distance),
                    });
                }
            }
        }
    }

    /// Add a vertex hit for every vertex of `brushes` the ray passes within
    /// `handle_radius` of.
    ///
    /// Vertices shared by several faces are tested once. Bypasses the index.
    /// Existing hits are kept. A negative or non-finite radius adds nothing.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip_all, name = "picker::pick_vertices")
    )]
    pub fn pick_vertices(
        &self,
        scene: &(impl BrushLookup + ?Sized),
        ray: &Ray,
        brushes: &[BrushId],
        handle_radius: f32,
        hits: &mut HitList,
    ) {
        if !handle_radius.is_finite() || handle_radius < 0.0 {
            return;
        }
        for &id in brushes {
            let Some(brush) = scene.brush(id) else {
                continue;
            };
            for (vertex, v) in brush.vertices().iter().enumerate() {
                let Some(distance) = intersect_vertex(ray, *v, handle_radius) else {
                    continue;
                };
                hits.add(Hit {
                    target: HitTarget::Vertex(VertexRef { brush: id, vertex }),
                    distance,
                    point: ray.point_at(distance),
                });
            }
        }
    }

    fn key(&self, id: BrushId) -> Option<Key> {
        match self.keys.get(id.idx()) {
            Some(Some((stored, key))) if *stored == id => Some(*key),
            _ => None,
        }
    }
}

/// World-space radius of a screen-space handle.
///
/// `pixel_radius` is the handle size in pixels, `distance` the view depth of
/// the handle, `viewport_height` the viewport height in pixels, and
/// `projection` the camera's projection matrix. Orthographic projections
/// ignore `distance`. Degenerate inputs give `0.0`.
pub fn handle_radius(
    pixel_radius: f32,
    distance: f32,
    viewport_height: f32,
    projection: &Mat4,
) -> f32 {
    let scale = projection.y_axis.y;
    let orthographic = projection.w_axis.w == 1.0;
    let depth = if orthographic { 1.0 } else { distance };
    let radius = pixel_radius * 2.0 * depth / (scale * viewport_height);
    if radius.is_finite() && radius > 0.0 {
        radius
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{AcceptAll, FlagFilter};
    use crate::hit::HitKinds;
    use crate::types::BrushFlags;
    use alloc::vec;
    use glam::{Affine3A, Quat, Vec3};

    fn cube(center: Vec3, half: f32) -> Brush {
        Brush::cuboid(Aabb3D::from_center_half_extents(center, Vec3::splat(half)))
    }

    fn scene_with(brushes: impl IntoIterator<Item = Brush>) -> (BrushArena, Picker, Vec<BrushId>) {
        let mut arena = BrushArena::new();
        let ids = brushes.into_iter().map(|b| arena.insert(b)).collect();
        let mut picker = Picker::new();
        picker.sync(&mut arena);
        (arena, picker, ids)
    }

    #[test]
    fn unit_cube_hit_from_the_front() {
        let (arena, picker, ids) = scene_with([cube(Vec3::ZERO, 0.5)]);
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z).unwrap();
        let hits = picker.pick_objects(&arena, &ray, &AcceptAll);

        let objects: Vec<_> = hits.hits(HitKinds::OBJECT).collect();
        assert_eq!(objects.len(), 1);
        assert_eq!(objects[0].target, HitTarget::Object(ids[0]));
        assert_eq!(objects[0].distance, 4.5);

        let face = hits.first_hit(HitKinds::FACE, false).unwrap();
        assert_eq!(
            face.target,
            HitTarget::Face(FaceRef {
                brush: ids[0],
                face: 4
            })
        );
        assert_eq!(face.point, Vec3::new(0.0, 0.0, -0.5));
    }

    #[test]
    fn hits_come_back_nearest_first() {
        let (arena, picker, ids) = scene_with([
            cube(Vec3::new(0.0, 0.0, 30.0), 1.0),
            cube(Vec3::new(0.0, 0.0, 10.0), 1.0),
            cube(Vec3::new(5.0, 0.0, 20.0), 1.0),
            cube(Vec3::new(0.0, 0.0, 20.0), 1.0),
        ]);
        let ray = Ray::new(Vec3::ZERO, Vec3::Z).unwrap();
        let hits = picker.pick_objects(&arena, &ray, &AcceptAll);
        let order: Vec<_> = hits.hits(HitKinds::OBJECT).map(Hit::brush).collect();
        assert_eq!(order, [ids[1], ids[3], ids[0]]);
        let distances: Vec<f32> = hits.hits(HitKinds::OBJECT).map(|h| h.distance).collect();
        assert_eq!(distances, [9.0, 19.0, 29.0]);
        // Object then face for the same brush.
        assert_eq!(hits.as_slice()[0].kind(), HitKinds::OBJECT);
        assert_eq!(hits.as_slice()[1].kind(), HitKinds::FACE);
    }

    #[test]
    fn filters_run_before_geometry() {
        let (mut arena, mut picker, ids) = scene_with([
            cube(Vec3::new(0.0, 0.0, 10.0), 1.0),
            cube(Vec3::new(0.0, 0.0, 20.0), 1.0),
        ]);
        let ray = Ray::new(Vec3::ZERO, Vec3::Z).unwrap();
        let reject_all = |_: BrushId, _: &Brush| false;
        assert!(picker.pick_objects(&arena, &ray, &reject_all).is_empty());

        arena.set_flags(ids[0], BrushFlags::VISIBLE);
        picker.sync(&mut arena);
        let hits = picker.pick_objects(&arena, &ray, &FlagFilter::default());
        let first = hits.first_hit(HitKinds::OBJECT, false).unwrap();
        assert_eq!(first.brush(), ids[1], "unpickable brush must be skipped");
    }

    #[test]
    fn scene_changes_reach_the_index() {
        let (mut arena, mut picker, ids) = scene_with([
            cube(Vec3::new(0.0, 0.0, 10.0), 1.0),
            cube(Vec3::new(0.0, 0.0, 20.0), 1.0),
        ]);
        assert_eq!(picker.len(), 2);
        let ray = Ray::new(Vec3::ZERO, Vec3::Z).unwrap();

        arena.replace(ids[0], cube(Vec3::new(50.0, 0.0, 10.0), 1.0));
        arena.remove(ids[1]);
        picker.sync(&mut arena);
        assert!(!picker.contains(ids[1]));
        assert_eq!(picker.len(), 1);
        assert!(picker.pick_objects(&arena, &ray, &AcceptAll).is_empty());

        // The reused slot gets a new id; the old id stays dead.
        let fresh = arena.insert(cube(Vec3::new(0.0, 0.0, 5.0), 1.0));
        picker.sync(&mut arena);
        assert!(picker.contains(fresh));
        assert!(!picker.contains(ids[1]));
        picker.brush_removed(ids[1]);
        assert!(picker.contains(fresh));
        let hits = picker.pick_objects(&arena, &ray, &AcceptAll);
        assert_eq!(hits.first_hit(HitKinds::OBJECT, false).map(Hit::brush), Some(fresh));
    }

    #[test]
    fn add_then_remove_leaves_no_trace() {
        let (arena, mut picker, _) = scene_with([cube(Vec3::new(0.0, 0.0, 10.0), 1.0)]);
        let ray = Ray::new(Vec3::ZERO, Vec3::Z).unwrap();
        let before = picker.pick_objects(&arena, &ray, &AcceptAll);

        let mut other = BrushArena::new();
        let _ = other.insert(cube(Vec3::ZERO, 1.0));
        let extra = other.insert(cube(Vec3::new(0.0, 0.0, 4.0), 1.0));
        picker.brush_added(extra, other.get(extra).unwrap());
        picker.brush_removed(extra);
        picker.brush_removed(extra);

        let after = picker.pick_objects(&arena, &ray, &AcceptAll);
        assert_eq!(before.as_slice(), after.as_slice());
    }

    #[test]
    fn stale_ids_are_skipped() {
        let (mut arena, picker, ids) = scene_with([cube(Vec3::new(0.0, 0.0, 10.0), 1.0)]);
        // Removed from the scene but the picker was not told.
        arena.remove(ids[0]);
        let ray = Ray::new(Vec3::ZERO, Vec3::Z).unwrap();
        assert!(picker.pick_objects(&arena, &ray, &AcceptAll).is_empty());
        let mut hits = HitList::new();
        picker.pick_close_faces(&arena, &ray, &ids, 100.0, &mut hits);
        picker.pick_vertices(&arena, &ray, &ids, 100.0, &mut hits);
        assert!(hits.is_empty());
    }

    /// A scene model that is not a [`BrushArena`]: a flat list of brushes
    /// addressed by position, every id at generation 1.
    struct Document {
        brushes: Vec<Brush>,
    }

    impl BrushLookup for Document {
        fn brush(&self, id: BrushId) -> Option<&Brush> {
            if id.generation() != 1 {
                return None;
            }
            self.brushes.get(usize::try_from(id.slot()).ok()?)
        }
    }

    #[test]
    fn external_scene_models_drive_the_picker() {
        let doc = Document {
            brushes: vec![
                cube(Vec3::new(0.0, 0.0, 20.0), 1.0),
                cube(Vec3::new(0.0, 0.0, 10.0), 1.0),
            ],
        };
        let mut picker = Picker::new();
        for (slot, brush) in (0_u32..).zip(&doc.brushes) {
            picker.brush_added(BrushId::from_raw(slot, 1), brush);
        }
        assert_eq!(picker.len(), 2);

        let ray = Ray::new(Vec3::ZERO, Vec3::Z).unwrap();
        let hits = picker.pick_objects(&doc, &ray, &AcceptAll);
        let order: Vec<_> = hits.hits(HitKinds::OBJECT).map(Hit::brush).collect();
        assert_eq!(order, vec![BrushId::from_raw(1, 1), BrushId::from_raw(0, 1)]);
        assert_eq!(order[0].slot(), 1);
        assert_eq!(order[0].generation(), 1);

        // A newer generation in slot 1 replaces the old entry; the document
        // does not resolve it, so the pick skips it.
        picker.brush_added(BrushId::from_raw(1, 2), &doc.brushes[1]);
        assert!(!picker.contains(BrushId::from_raw(1, 1)));
        let hits = picker.pick_objects(&doc, &ray, &AcceptAll);
        let order: Vec<_> = hits.hits(HitKinds::OBJECT).map(Hit::brush).collect();
        assert_eq!(order, vec![BrushId::from_raw(0, 1)]);
    }

    #[test]
    fn transformed_brush_edges_and_corners_are_picked() {
        let placements = [
            Affine3A::IDENTITY,
            Affine3A::from_translation(Vec3::new(1500.0, -230.0, 77.0)),
            Affine3A::from_rotation_translation(
                Quat::from_euler(glam::EulerRot::XYZ, 0.3, 1.1, -0.7),
                Vec3::new(-12.0, 3.0, 55.0),
            ),
            Affine3A::from_scale_rotation_translation(
                Vec3::new(3.0, 0.5, 8.0),
                Quat::from_axis_angle(Vec3::ONE.normalize(), 2.0),
                Vec3::new(300.0, 40.0, -900.0),
            ),
            // Mirrored.
            Affine3A::from_scale_rotation_translation(
                Vec3::new(-2.0, 1.0, 1.0),
                Quat::from_rotation_y(0.4),
                Vec3::new(-64.0, 0.0, 128.0),
            ),
        ];
        // Corners and edge midpoints of the -Z face of a cube centered on the origin.
        let mut targets = Vec::new();
        for x in [-1.0, 0.0, 1.0] {
            for y in [-1.0, 0.0, 1.0] {
                if x != 0.0 || y != 0.0 {
                    targets.push(Vec3::new(x, y, -1.0));
                }
            }
        }
        for placement in placements {
            let brush = cube(Vec3::ZERO, 1.0).transformed(&placement);
            let normal = brush.faces()[4].plane().normal;
            let (arena, picker, ids) = scene_with([brush]);
            for target in &targets {
                let target = placement.transform_point3(*target);
                let ray = Ray::new(target + normal * 10.0, -normal).unwrap();
                let hits = picker.pick_objects(&arena, &ray, &AcceptAll);
                let context = (placement, target);
                assert_eq!(hits.hits(HitKinds::OBJECT).count(), 1, "{context:?}");
                assert_eq!(hits.hits(HitKinds::FACE).count(), 1, "{context:?}");
                let hit = hits.first_hit(HitKinds::OBJECT, false).unwrap();
                assert_eq!(hit.brush(), ids[0]);
                assert!((hit.distance - 10.0).abs() < 1e-2, "{context:?}: {hit:?}");
            }
        }
    }

    #[test]
    fn octree_pick_matches_brute_force() {
        let mut brushes = Vec::new();
        for i in 0..512_u32 {
            let c = Vec3::new(
                (i % 8) as f32 * 37.0 - 140.0,
                (i / 8 % 8) as f32 * 37.0 - 140.0,
                (i / 64) as f32 * 37.0 - 140.0,
            );
            brushes.push(cube(c, 6.0 + (i % 5) as f32 * 4.0));
        }
        let (arena, picker, _) = scene_with(brushes);
        let rays = [
            Ray::from_points(Vec3::splat(-300.0), Vec3::splat(300.0)).unwrap(),
            Ray::new(Vec3::new(3.0, 5.0, -500.0), Vec3::Z).unwrap(),
            Ray::from_points(Vec3::new(400.0, 17.0, -60.0), Vec3::new(-400.0, -9.0, 80.0)).unwrap(),
        ];
        for ray in rays {
            let hits = picker.pick_objects(&arena, &ray, &AcceptAll);
            let mut expected: Vec<(BrushId, f32)> = arena
                .iter()
                .filter_map(|(id, b)| intersect_brush(&ray, b).map(|h| (id, h.distance)))
                .collect();
            expected.sort_by(|a, b| a.1.total_cmp(&b.1));
            let got: Vec<(BrushId, f32)> = hits
                .hits(HitKinds::OBJECT)
                .map(|h| (h.brush(), h.distance))
                .collect();
            assert_eq!(got.len(), expected.len(), "{ray:?}");
            let mut got_ids: Vec<_> = got.iter().map(|g| g.0).collect();
            let mut expected_ids: Vec<_> = expected.iter().map(|e| e.0).collect();
            got_ids.sort_by_key(|id| id.idx());
            expected_ids.sort_by_key(|id| id.idx());
            assert_eq!(got_ids, expected_ids);
            assert_eq!(
                hits.first_hit(HitKinds::OBJECT, false).map(|h| h.distance),
                expected.first().map(|e| e.1)
            );
        }
    }

    #[test]
    fn close_faces_respect_max_distance() {
        let (arena, picker, ids) = scene_with([cube(Vec3::ZERO, 0.5)]);
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z).unwrap();

        let mut hits = HitList::new();
        picker.pick_close_faces(&arena, &ray, &ids, 4.4, &mut hits);
        assert!(hits.is_empty());
        picker.pick_close_faces(&arena, &ray, &ids, -1.0, &mut hits);
        picker.pick_close_faces(&arena, &ray, &ids, f32::NAN, &mut hits);
        assert!(hits.is_empty());

        picker.pick_close_faces(&arena, &ray, &ids, 4.5, &mut hits);
        assert_eq!(hits.len(), 1);
        let hit = hits.first_hit(HitKinds::FACE, false).unwrap();
        assert_eq!(hit.distance, 4.5);
        assert_eq!(
            hit.target,
            HitTarget::Face(FaceRef {
                brush: ids[0],
                face: 4
            })
        );

        // Additive.
        picker.pick_close_faces(&arena, &ray, &ids, 10.0, &mut hits);
        assert_eq!(hits.len(), 2);
    }

    fn near_corner_ray(offset: f32) -> Ray {
        let corner = Vec3::ONE;
        let back = Vec3::new(1.0, 2.0, 3.0).normalize();
        let side = Vec3::new(2.0, -1.0, 0.0).normalize();
        Ray::new(corner + side * offset + back * 5.0, -back).unwrap()
    }

    #[test]
    fn vertex_handles_within_radius() {
        let (arena, picker, ids) = scene_with([Brush::cuboid(Aabb3D::new(Vec3::ZERO, Vec3::ONE))]);
        let brush = arena.get(ids[0]).unwrap();

        let mut hits = HitList::new();
        picker.pick_vertices(&arena, &near_corner_ray(0.05), &ids, 0.1, &mut hits);
        assert_eq!(hits.len(), 1, "cube corners are reported once: {hits:?}");
        let hit = hits.first_hit(HitKinds::VERTEX, false).unwrap();
        let HitTarget::Vertex(v) = hit.target else {
            panic!("expected a vertex hit, got {hit:?}");
        };
        assert_eq!(v.brush, ids[0]);
        assert_eq!(brush.vertices()[v.vertex], Vec3::ONE);
        assert!((hit.distance - 5.0).abs() < 1e-4);

        let mut misses = HitList::new();
        picker.pick_vertices(&arena, &near_corner_ray(0.2), &ids, 0.1, &mut misses);
        picker.pick_vertices(&arena, &near_corner_ray(0.05), &ids, -0.1, &mut misses);
        assert!(misses.is_empty());
    }

    #[test]
    fn rebuild_replaces_the_index() {
        let (arena, mut picker, ids) = scene_with([
            cube(Vec3::new(0.0, 0.0, 10.0), 1.0),
            cube(Vec3::new(0.0, 0.0, 20.0), 1.0),
        ]);
        picker.rebuild(arena.iter().filter(|(id, _)| *id == ids[1]));
        assert_eq!(picker.len(), 1);
        assert!(!picker.contains(ids[0]));
        let ray = Ray::new(Vec3::ZERO, Vec3::Z).unwrap();
        let hits = picker.pick_objects(&arena, &ray, &AcceptAll);
        assert_eq!(hits.first_hit(HitKinds::OBJECT, false).map(Hit::brush), Some(ids[1]));

        let mut small = Picker::with_config(OctreeConfig {
            bounds: Aabb3D::new(Vec3::splat(-64.0), Vec3::splat(64.0)),
            max_objects_per_node: 1,
            min_node_size: 4.0,
        });
        small.rebuild(arena.iter());
        assert_eq!(small.len(), 2);
        assert_eq!(small.pick_objects(&arena, &ray, &AcceptAll).len(), 4);
    }

    #[test]
    fn handle_radius_scales_with_depth() {
        let perspective = Mat4::perspective_rh(core::f32::consts::FRAC_PI_2, 1.0, 0.1, 100.0);
        let near = handle_radius(5.0, 10.0, 1000.0, &perspective);
        let far = handle_radius(5.0, 20.0, 1000.0, &perspective);
        assert!((near - 0.1).abs() < 1e-5);
        assert!((far - 0.2).abs() < 1e-5);

        let ortho = Mat4::orthographic_rh(-10.0, 10.0, -10.0, 10.0, 0.1, 100.0);
        let a = handle_radius(5.0, 1.0, 1000.0, &ortho);
        let b = handle_radius(5.0, 50.0, 1000.0, &ortho);
        assert_eq!(a, b);
        assert!((a - 0.1).abs() < 1e-5);

        assert_eq!(handle_radius(5.0, 10.0, 0.0, &perspective), 0.0);
    }
}

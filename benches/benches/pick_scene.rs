// Copyright 2025 the Brushwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use brushwork_index::{Aabb3D, Ray};
use brushwork_pick::{
    AcceptAll, Brush, BrushArena, BrushId, FlagFilter, HitKinds, HitList, Picker, intersect_brush,
};
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use glam::Vec3;

/// A level-like grid of wall and pillar brushes.
fn build_scene(n: usize) -> (BrushArena, Picker, Vec<BrushId>) {
    let mut arena = BrushArena::new();
    let mut ids = Vec::with_capacity(n * n * 2);
    let cell = 64.0;
    let origin = -(n as f32) * cell * 0.5;
    for y in 0..n {
        for x in 0..n {
            let base = Vec3::new(x as f32 * cell + origin, 0.0, y as f32 * cell + origin);
            let floor = Aabb3D::new(base, base + Vec3::new(cell, 8.0, cell));
            ids.push(arena.insert(Brush::cuboid(floor)));
            let pillar_min = base + Vec3::new(24.0, 8.0, 24.0);
            let pillar = Aabb3D::new(pillar_min, pillar_min + Vec3::new(16.0, 96.0, 16.0));
            ids.push(arena.insert(Brush::cuboid(pillar)));
        }
    }
    let mut picker = Picker::new();
    picker.sync(&mut arena);
    (arena, picker, ids)
}

fn camera_rays(count: usize, extent: f32) -> Vec<Ray> {
    let eye = Vec3::new(0.0, 256.0, -extent);
    (0..count)
        .filter_map(|i| {
            let u = (i % 16) as f32 / 15.0 - 0.5;
            let v = (i / 16) as f32 / (count / 16).max(1) as f32;
            let target = Vec3::new(u * extent * 2.0, 0.0, v * extent);
            Ray::from_points(eye, target)
        })
        .collect()
}

fn bench_pick_objects(c: &mut Criterion) {
    let mut group = c.benchmark_group("pick_objects");
    for &n in &[16usize, 32] {
        let (arena, picker, _) = build_scene(n);
        let rays = camera_rays(64, n as f32 * 32.0);
        group.bench_function(format!("octree_{}_brushes", arena.len()), |b| {
            b.iter(|| {
                for ray in &rays {
                    let hits = picker.pick_objects(&arena, ray, &FlagFilter::default());
                    black_box(hits.first_hit(HitKinds::FACE, true));
                }
            });
        });
        group.bench_function(format!("brute_force_{}_brushes", arena.len()), |b| {
            b.iter(|| {
                for ray in &rays {
                    let nearest = arena
                        .iter()
                        .filter_map(|(_, brush)| intersect_brush(ray, brush))
                        .map(|h| h.distance)
                        .fold(f32::INFINITY, f32::min);
                    black_box(nearest);
                }
            });
        });
    }
    group.finish();
}

fn bench_refinement(c: &mut Criterion) {
    let mut group = c.benchmark_group("refine_selection");
    let (arena, picker, ids) = build_scene(16);
    let rays = camera_rays(64, 512.0);
    let selection = &ids[..64];
    group.bench_function("close_faces_and_vertices", |b| {
        b.iter(|| {
            for ray in &rays {
                let mut hits = picker.pick_objects(&arena, ray, &AcceptAll);
                picker.pick_close_faces(&arena, ray, selection, 2048.0, &mut hits);
                picker.pick_vertices(&arena, ray, selection, 4.0, &mut hits);
                black_box(hits.len());
            }
        });
    });
    group.bench_function("vertices_only", |b| {
        b.iter(|| {
            let mut hits = HitList::new();
            for ray in &rays {
                picker.pick_vertices(&arena, ray, selection, 4.0, &mut hits);
            }
            black_box(hits.len());
        });
    });
    group.finish();
}

criterion_group!(benches, bench_pick_objects, bench_refinement);
criterion_main!(benches);

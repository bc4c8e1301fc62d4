// Copyright 2025 the Brushwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use brushwork_index::{Aabb3D, Index, OctreeConfig, Ray};
use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use glam::Vec3;

fn gen_grid_boxes(n: usize, cell: f32) -> Vec<Aabb3D> {
    let mut out = Vec::with_capacity(n * n * n);
    let origin = -(n as f32) * cell * 0.5;
    for z in 0..n {
        for y in 0..n {
            for x in 0..n {
                let min = Vec3::new(x as f32, y as f32, z as f32) * cell + origin;
                out.push(Aabb3D::new(min, min + Vec3::splat(cell * 0.8)));
            }
        }
    }
    out
}

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f32(&mut self) -> f32 {
        (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32
    }
}

fn gen_random_rays(count: usize, extent: f32) -> Vec<Ray> {
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    let mut out = Vec::with_capacity(count);
    while out.len() < count {
        let mut point = || Vec3::new(rng.next_f32(), rng.next_f32(), rng.next_f32()) * 2.0 - 1.0;
        let from = point() * extent * 1.5;
        let to = point() * extent * 0.5;
        if let Some(ray) = Ray::from_points(from, to) {
            out.push(ray);
        }
    }
    out
}

fn bench_ray_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("ray_query");
    for &n in &[8usize, 16, 32] {
        let boxes = gen_grid_boxes(n, 16.0);
        let rays = gen_random_rays(64, n as f32 * 8.0);
        let mut tree: Index<u32> = Index::new();
        let mut flat = Index::<u32>::with_flat_vec();
        for (i, b) in boxes.iter().copied().enumerate() {
            tree.insert(b, i as u32);
            flat.insert(b, i as u32);
        }
        group.throughput(Throughput::Elements(rays.len() as u64));
        group.bench_function(format!("octree_n{}", n * n * n), |b| {
            b.iter(|| {
                let total: usize = rays.iter().map(|r| tree.objects_on_ray(r).count()).sum();
                black_box(total);
            });
        });
        group.bench_function(format!("flatvec_n{}", n * n * n), |b| {
            b.iter(|| {
                let total: usize = rays.iter().map(|r| flat.objects_on_ray(r).count()).sum();
                black_box(total);
            });
        });
    }
    group.finish();
}

fn bench_first_candidate(c: &mut Criterion) {
    let mut group = c.benchmark_group("ray_query_first");
    let boxes = gen_grid_boxes(32, 16.0);
    let rays = gen_random_rays(64, 256.0);
    let mut tree: Index<u32> = Index::new();
    for (i, b) in boxes.iter().copied().enumerate() {
        tree.insert(b, i as u32);
    }
    // Near-to-far node order makes an early exit cheap.
    group.bench_function("octree_take_1", |b| {
        b.iter(|| {
            let total: usize = rays.iter().map(|r| tree.objects_on_ray(r).take(1).count()).sum();
            black_box(total);
        });
    });
    group.finish();
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("octree_build");
    let boxes = gen_grid_boxes(24, 16.0);
    group.throughput(Throughput::Elements(boxes.len() as u64));
    for &capacity in &[4usize, 8, 32] {
        let config = OctreeConfig {
            max_objects_per_node: capacity,
            ..OctreeConfig::default()
        };
        group.bench_function(format!("insert_cap{capacity}"), |b| {
            b.iter_batched(
                || Index::with_octree(config.clone()),
                |mut idx: Index<u32>| {
                    for (i, aabb) in boxes.iter().copied().enumerate() {
                        let _ = idx.insert(aabb, i as u32);
                    }
                    black_box(idx.len());
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.bench_function("update_shift_all", |b| {
        b.iter_batched(
            || {
                let mut idx: Index<u32> = Index::new();
                let keys: Vec<_> = boxes
                    .iter()
                    .copied()
                    .enumerate()
                    .map(|(i, aabb)| idx.insert(aabb, i as u32))
                    .collect();
                (idx, keys)
            },
            |(mut idx, keys)| {
                for (k, aabb) in keys.into_iter().zip(boxes.iter()) {
                    let shifted = Aabb3D::new(aabb.min + Vec3::X * 3.0, aabb.max + Vec3::X * 3.0);
                    idx.update(k, shifted);
                }
                black_box(idx.len());
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_ray_queries,
    bench_first_candidate,
    bench_build
);
criterion_main!(benches);

// Copyright 2025 the Brushwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vertex handles and close faces.
//!
//! Refines a pick against the current selection the way a vertex editing
//! tool would: handle sizes come from pixels on screen, so the world-space
//! radius grows with distance under a perspective camera.
//!
//! Run:
//! - `cargo run -p brushwork_demos --example vertex_handles`

use brushwork_index::{Aabb3D, Ray};
use brushwork_pick::{
    Brush, BrushArena, BrushLookup, HitKinds, HitList, HitTarget, Picker, handle_radius,
};
use glam::{Mat4, Vec3};

const VIEWPORT_HEIGHT: f32 = 720.0;
const HANDLE_PIXELS: f32 = 6.0;

fn main() {
    let mut scene = BrushArena::new();
    let near = scene.insert(Brush::cuboid(Aabb3D::new(Vec3::ZERO, Vec3::splat(32.0))));
    let far = scene.insert(Brush::cuboid(Aabb3D::new(
        Vec3::new(0.0, 0.0, 256.0),
        Vec3::new(32.0, 32.0, 288.0),
    )));
    let mut picker = Picker::new();
    picker.sync(&mut scene);

    let projection = Mat4::perspective_rh(60_f32.to_radians(), 16.0 / 9.0, 1.0, 4096.0);
    let eye = Vec3::new(30.0, 31.0, -128.0);
    let selection = [near, far];

    // Rays from the eye towards each brush's +X+Y corner of the near face,
    // slightly off so the handle radius matters.
    for (label, corner) in [
        ("near corner", Vec3::new(32.0, 32.0, 0.0)),
        ("far corner", Vec3::new(32.0, 32.0, 256.0)),
    ] {
        let aim = corner + Vec3::new(-0.6, -0.4, 0.0);
        let Some(ray) = Ray::from_points(eye, aim) else {
            continue;
        };
        let depth = (corner - eye).length();
        let radius = handle_radius(HANDLE_PIXELS, depth, VIEWPORT_HEIGHT, &projection);
        println!("== {label}: depth {depth:.1}, handle radius {radius:.3} ==");

        let mut hits = HitList::new();
        picker.pick_vertices(&scene, &ray, &selection, radius, &mut hits);
        match hits.first_hit(HitKinds::VERTEX, true) {
            Some(hit) => {
                if let HitTarget::Vertex(v) = hit.target {
                    let position = scene.brush(v.brush).map(|b| b.vertices()[v.vertex]);
                    println!("  grabbed vertex {} of {:?} at {:?}", v.vertex, v.brush, position);
                }
            }
            None => println!("  no handle under the cursor"),
        }

        // Faces of the selection within reach of the tool.
        picker.pick_close_faces(&scene, &ray, &selection, depth + 64.0, &mut hits);
        for hit in hits.hits(HitKinds::FACE) {
            if let HitTarget::Face(f) = hit.target {
                println!("  face {} of {:?} at {:.2}", f.face, f.brush, hit.distance);
            }
        }
    }
}

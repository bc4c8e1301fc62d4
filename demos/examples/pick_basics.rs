// Copyright 2025 the Brushwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Picking basics.
//!
//! Builds a small room of brushes, keeps a picker in sync with scene edits,
//! and prints the ranked hits for a few rays.
//!
//! Run:
//! - `cargo run -p brushwork_demos --example pick_basics`

use brushwork_index::{Aabb3D, Ray};
use brushwork_pick::{
    AcceptAll, Brush, BrushArena, BrushFlags, FlagFilter, HitKinds, HitList, HitTarget, Picker,
};
use glam::{Affine3A, Quat, Vec3};

fn print_hits(label: &str, hits: &HitList) {
    println!("== {label} ==");
    if hits.is_empty() {
        println!("  (nothing)");
    }
    for hit in hits {
        match hit.target {
            HitTarget::Object(id) => println!("  {:>7.3}  object {id:?}", hit.distance),
            HitTarget::Face(f) => {
                println!("  {:>7.3}  face {} of {:?} at {:?}", hit.distance, f.face, f.brush, hit.point);
            }
            HitTarget::Vertex(v) => {
                println!("  {:>7.3}  vertex {} of {:?}", hit.distance, v.vertex, v.brush);
            }
        }
    }
}

fn main() {
    let mut scene = BrushArena::new();
    let floor = scene.insert(Brush::cuboid(Aabb3D::new(
        Vec3::new(-256.0, -16.0, -256.0),
        Vec3::new(256.0, 0.0, 256.0),
    )));
    let crate_box = scene.insert(Brush::cuboid(Aabb3D::new(
        Vec3::new(-32.0, 0.0, 64.0),
        Vec3::new(32.0, 64.0, 128.0),
    )));
    let pillar = Brush::cuboid(Aabb3D::from_center_half_extents(Vec3::ZERO, Vec3::new(8.0, 64.0, 8.0)));
    let pillar = scene.insert(pillar.transformed(&Affine3A::from_rotation_translation(
        Quat::from_rotation_y(0.4),
        Vec3::new(96.0, 64.0, 96.0),
    )));

    let mut picker = Picker::new();
    picker.sync(&mut scene);
    println!("indexed {} brushes", picker.len());

    // Looking down +Z at eye height: the crate is in front of the floor.
    let eye = Vec3::new(0.0, 32.0, -200.0);
    let ray = Ray::new(eye, Vec3::Z).expect("non-zero direction");
    let hits = picker.pick_objects(&scene, &ray, &AcceptAll);
    print_hits("straight ahead", &hits);
    if let Some(face) = hits.first_hit(HitKinds::FACE, true) {
        println!("  -> selected face {:?}", face.target);
    }

    // Aim at the floor past the crate.
    let ray = Ray::from_points(eye, Vec3::new(0.0, 0.0, 200.0)).expect("distinct points");
    print_hits("towards the floor", &picker.pick_objects(&scene, &ray, &AcceptAll));

    // Lock the crate: selection picks now see straight through it.
    scene.set_flags(crate_box, BrushFlags::default() | BrushFlags::LOCKED);
    picker.sync(&mut scene);
    let ray = Ray::new(eye, Vec3::Z).expect("non-zero direction");
    print_hits(
        "straight ahead, locked crate skipped",
        &picker.pick_objects(&scene, &ray, &FlagFilter::editable()),
    );

    // Move the pillar into the line of sight and pick again.
    if let Some(moved) = scene
        .get(pillar)
        .map(|b| b.transformed(&Affine3A::from_translation(Vec3::new(-96.0, -32.0, -96.0))))
    {
        scene.replace(pillar, moved);
    }
    picker.sync(&mut scene);
    print_hits("after moving the pillar", &picker.pick_objects(&scene, &ray, &AcceptAll));

    // Deleting the floor removes it from the index too.
    scene.remove(floor);
    picker.sync(&mut scene);
    let down = Ray::new(Vec3::new(200.0, 50.0, 200.0), Vec3::NEG_Y).expect("non-zero direction");
    print_hits("down, floor deleted", &picker.pick_objects(&scene, &down, &AcceptAll));
}

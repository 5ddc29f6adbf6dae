//! Behavioral smoke tests for the scene the demo builds: a static
//! ground plane, a driven box, and click-spawned boxes. These exercise
//! the physics wrapper exactly the way the frame loop does, minus the
//! window.

use macroquad::prelude::*;
use rapier2d::prelude::*;

use physics_sandbox::config::Tuning;
use physics_sandbox::physics::*;

const DT: f32 = 1.0 / 60.0;

fn spawn_box(simulation: &mut PhysicsSimulation, location: Vec2, size: f32) -> PhysicsHandle {
    let mut properties = PhysicalProperties::new(RigidBodyType::Dynamic);
    properties.colliders.push(
        ColliderBuilder::cuboid(size * 0.5, size * 0.5)
            .density(1.0)
            .friction(0.5)
            .restitution(0.0),
    );
    properties.set_location(location);
    simulation.create_body(&properties)
}

fn spawn_ground(simulation: &mut PhysicsSimulation, location: Vec2, size: Vec2) -> PhysicsHandle {
    let mut properties = PhysicalProperties::new(RigidBodyType::Fixed);
    properties
        .colliders
        .push(ColliderBuilder::cuboid(size.x * 0.5, size.y * 0.5).friction(0.5));
    properties.set_location(location);
    simulation.create_body(&properties)
}

#[test]
fn jump_force_kicks_the_box_upward() {
    let tuning = Tuning::default();
    let mut simulation = PhysicsSimulation::new(vec2(0.0, tuning.gravity));
    let player = spawn_box(&mut simulation, vec2(0.0, 0.0), tuning.box_size);

    // One frame's worth of jump: a single-step force of -jump_force on
    // a 1 kg box should leave it rising at roughly F * dt, minus one
    // step of gravity.
    simulation.apply_force(&player, vec2(0.0, -tuning.jump_force));
    simulation.step(DT);

    let velocity = simulation.velocity(&player);
    let expected = (-tuning.jump_force + tuning.gravity) * DT;
    assert!(
        (velocity.y - expected).abs() < 0.1,
        "vy after jump was {}, expected about {}",
        velocity.y,
        expected
    );
}

#[test]
fn held_drive_force_accelerates_frame_by_frame() {
    let tuning = Tuning::default();
    let mut simulation = PhysicsSimulation::new(Vec2::ZERO);
    let player = spawn_box(&mut simulation, vec2(0.0, 0.0), tuning.box_size);

    // Holding A applies the drive force anew every frame.
    for _ in 0..60 {
        simulation.apply_force(&player, vec2(-tuning.drive_force, 0.0));
        simulation.step(DT);
    }

    let velocity = simulation.velocity(&player);
    assert!(
        (velocity.x + tuning.drive_force).abs() < 0.3,
        "vx after one held second was {}, expected about {}",
        velocity.x,
        -tuning.drive_force
    );
}

#[test]
fn clicked_boxes_accumulate_and_fall_to_the_ground() {
    let tuning = Tuning::default();
    let mut simulation = PhysicsSimulation::new(vec2(0.0, tuning.gravity));
    spawn_ground(&mut simulation, vec2(26.0, 27.0), vec2(53.0, 1.25));

    let mut spawned = Vec::new();
    for i in 0..5 {
        let location = vec2(10.0 + i as f32 * 3.0, 5.0);
        spawned.push((
            location,
            spawn_box(&mut simulation, location, tuning.box_size),
        ));
    }
    assert_eq!(simulation.body_count(), 6);

    for _ in 0..600 {
        simulation.step(DT);
    }

    for (start, handle) in &spawned {
        let location = simulation.location(handle);
        assert!(
            location.y > start.y,
            "box spawned at {start} never fell, now at {location}"
        );
        // Resting on the ground top (26.375) with a half height of 0.5.
        assert!(
            (location.y - 25.875).abs() < 0.2,
            "box did not settle on the ground, at {location}"
        );
    }
}

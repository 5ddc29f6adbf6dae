use macroquad::prelude::*;
use rapier2d::prelude::*;

use crate::config::Tuning;
use crate::physics::*;

/// The keyboard-driven box.
///
/// A and D push it sideways while held, Space gives it a one-step
/// upward kick, and its orientation is pinned upright every frame no
/// matter what the solver did to it.
pub struct Player {
    physics: PhysicsHandle,
}

impl Player {
    /// `location` is in meters
    pub fn new(simulation: &mut PhysicsSimulation, location: Vec2, tuning: &Tuning) -> Self {
        let half = tuning.box_size * 0.5;
        let mut properties = PhysicalProperties::new(RigidBodyType::Dynamic);
        properties.colliders.push(
            ColliderBuilder::cuboid(half, half)
                .density(1.0)
                .friction(0.5)
                .restitution(0.0),
        );
        properties.set_location(location);
        Self {
            physics: simulation.create_body(&properties),
        }
    }

    /// Reads the keyboard and queues forces for the next step
    pub fn update(&self, simulation: &mut PhysicsSimulation, tuning: &Tuning) {
        if is_key_down(KeyCode::A) {
            simulation.apply_force(&self.physics, vec2(-tuning.drive_force, 0.0));
        }
        if is_key_down(KeyCode::D) {
            simulation.apply_force(&self.physics, vec2(tuning.drive_force, 0.0));
        }
        // Jump fires once per key press, not continuously
        if is_key_pressed(KeyCode::Space) {
            simulation.apply_force(&self.physics, vec2(0.0, -tuning.jump_force));
        }
    }

    /// Cancels whatever rotation the last step produced
    pub fn keep_upright(&self, simulation: &mut PhysicsSimulation) {
        simulation.set_angle(&self.physics, 0.0);
    }

    pub fn velocity(&self, simulation: &PhysicsSimulation) -> Vec2 {
        simulation.velocity(&self.physics)
    }

    pub fn draw(&self, simulation: &PhysicsSimulation) {
        simulation.draw_body_lines(&self.physics, 2.0, RED);
    }
}

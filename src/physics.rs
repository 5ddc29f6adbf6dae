use macroquad::prelude::*;
use rapier2d::prelude::*;

/// Scale between screen pixels and physics units (meters).
///
/// The world is y-down, matching screen orientation, so gravity points
/// in +y and no axis flip is needed when drawing.
pub const PIXELS_PER_METER: f32 = 16.0;

pub fn pixels_to_meters(source: Vec2) -> Vec2 {
    source / PIXELS_PER_METER
}

pub fn meters_to_pixels(source: Vec2) -> Vec2 {
    source * PIXELS_PER_METER
}

pub fn to_physics_vector(source: Vec2) -> Vector<Real> {
    vector![source.x, source.y]
}

/// Handles for a body and its colliders
#[derive(Debug, Default, Clone)]
pub struct PhysicsHandle {
    pub body: RigidBodyHandle,
    pub colliders: Vec<ColliderHandle>,
}

/// Properties for the body and colliders of an object, gathered before
/// the object is inserted into a simulation
#[derive(Debug, Default, Clone)]
pub struct PhysicalProperties {
    pub body: RigidBodyBuilder,
    pub colliders: Vec<ColliderBuilder>,
}

impl PhysicalProperties {
    pub fn new(body_type: RigidBodyType) -> Self {
        Self {
            body: RigidBodyBuilder::new(body_type),
            colliders: Vec::new(),
        }
    }

    /// Sets the body's starting location, in meters
    pub fn set_location(&mut self, location: Vec2) {
        self.body = self.body.clone().translation(to_physics_vector(location));
    }
}

/// State of the physics simulation
///
/// Owns the whole rapier pipeline. Callers only ever see
/// [PhysicsHandle]s; the rapier sets stay internal to this module.
pub struct PhysicsSimulation {
    pub gravity: Vector<Real>,
    pub rigid_body_set: RigidBodySet,
    pub collider_set: ColliderSet,
    pub physics_pipeline: PhysicsPipeline,
    pub integration_parameters: IntegrationParameters,
    pub island_manager: IslandManager,
    pub broad_phase: Box<dyn BroadPhase>,
    pub narrow_phase: NarrowPhase,
    pub impulse_joint_set: ImpulseJointSet,
    pub multibody_joint_set: MultibodyJointSet,
    pub ccd_solver: CCDSolver,
}

impl PhysicsSimulation {
    pub fn new(gravity: Vec2) -> Self {
        Self {
            gravity: to_physics_vector(gravity),
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            physics_pipeline: PhysicsPipeline::new(),
            integration_parameters: IntegrationParameters::default(),
            island_manager: IslandManager::new(),
            broad_phase: Box::new(BroadPhaseMultiSap::new()),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
        }
    }

    /// Adds a body to the physics world with both a rigid body and its
    /// colliders.
    pub fn create_body(&mut self, properties: &PhysicalProperties) -> PhysicsHandle {
        let body_handle = self.rigid_body_set.insert(properties.body.build());
        let mut collider_handles: Vec<ColliderHandle> = Vec::new();
        for collider in &properties.colliders {
            let handle = self.collider_set.insert_with_parent(
                collider.build(),
                body_handle,
                &mut self.rigid_body_set,
            );
            collider_handles.push(handle);
        }
        PhysicsHandle {
            body: body_handle,
            colliders: collider_handles,
        }
    }

    /// Advances the simulation by `time` seconds.
    ///
    /// User-applied forces only last for this one step: rapier keeps
    /// forces until they are reset, so they are cleared here after
    /// integration. Call [apply_force](Self::apply_force) again next
    /// frame to keep pushing.
    pub fn step(&mut self, time: f32) {
        self.integration_parameters.dt = time;
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut *self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            None,
            &(),
            &(),
        );
        for (_, body) in self.rigid_body_set.iter_mut() {
            body.reset_forces(false);
        }
    }

    /// Applies a force, in newtons, at the body's center of mass.
    ///
    /// The force acts for exactly one [step](Self::step).
    pub fn apply_force(&mut self, physics: &PhysicsHandle, force: Vec2) {
        if let Some(body) = self.rigid_body_set.get_mut(physics.body) {
            body.add_force(to_physics_vector(force), true);
        }
    }

    /// Snaps a body to a fixed orientation, in radians
    pub fn set_angle(&mut self, physics: &PhysicsHandle, angle: f32) {
        if let Some(body) = self.rigid_body_set.get_mut(physics.body) {
            body.set_rotation(Rotation::new(angle), true);
        }
    }

    /// Linear velocity in meters per second, or zero if the body is gone
    pub fn velocity(&self, physics: &PhysicsHandle) -> Vec2 {
        match self.rigid_body_set.get(physics.body) {
            Some(body) => vec2(body.linvel().x, body.linvel().y),
            None => Vec2::ZERO,
        }
    }

    /// Body location in meters, or zero if the body is gone
    pub fn location(&self, physics: &PhysicsHandle) -> Vec2 {
        match self.rigid_body_set.get(physics.body) {
            Some(body) => vec2(body.translation().x, body.translation().y),
            None => Vec2::ZERO,
        }
    }

    /// Rotation angle in radians, or zero if the body is gone
    pub fn angle(&self, physics: &PhysicsHandle) -> f32 {
        match self.rigid_body_set.get(physics.body) {
            Some(body) => body.rotation().angle(),
            None => 0.0,
        }
    }

    /// Number of rigid bodies currently in the world
    pub fn body_count(&self) -> usize {
        self.rigid_body_set.len()
    }

    /// Draws the outline of every collider attached to a body
    pub fn draw_body_lines(&self, physics: &PhysicsHandle, stroke: f32, color: Color) {
        for collider_handle in &physics.colliders {
            if let Some(collider) = self.collider_set.get(*collider_handle) {
                draw_shape_lines(collider.shape(), collider.position(), stroke, color);
            }
        }
    }

    /// Draws the axis-aligned bounding box of every collider attached
    /// to a body
    pub fn draw_body_aabb(&self, physics: &PhysicsHandle, stroke: f32, color: Color) {
        for collider_handle in &physics.colliders {
            if let Some(collider) = self.collider_set.get(*collider_handle) {
                let aabb = collider.compute_aabb();
                let mins = meters_to_pixels(vec2(aabb.mins.x, aabb.mins.y));
                let extents = meters_to_pixels(vec2(
                    aabb.half_extents().x * 2.0,
                    aabb.half_extents().y * 2.0,
                ));
                draw_rectangle_lines(mins.x, mins.y, extents.x, extents.y, stroke, color);
            }
        }
    }
}

/// Draws a collider outline in screen space
pub fn draw_shape_lines(shape: &dyn Shape, position: &Isometry<f32>, stroke: f32, color: Color) {
    let center = meters_to_pixels(vec2(position.translation.x, position.translation.y));
    let angle = position.rotation.angle();
    match shape.as_typed_shape() {
        TypedShape::Ball(ball) => {
            draw_circle_lines(center.x, center.y, ball.radius * PIXELS_PER_METER, stroke, color);
        }
        TypedShape::Cuboid(cuboid) => {
            let size = meters_to_pixels(vec2(
                cuboid.half_extents.x * 2.0,
                cuboid.half_extents.y * 2.0,
            ));
            draw_rectangle_lines_ex(
                center.x,
                center.y,
                size.x,
                size.y,
                stroke,
                DrawRectangleParams {
                    rotation: angle,
                    color,
                    offset: vec2(0.5, 0.5),
                },
            );
        }
        _ => {
            // No pretty outline for this shape, fall back to its AABB
            let aabb = shape.compute_aabb(position);
            let mins = meters_to_pixels(vec2(aabb.mins.x, aabb.mins.y));
            let extents = meters_to_pixels(vec2(
                aabb.half_extents().x * 2.0,
                aabb.half_extents().y * 2.0,
            ));
            draw_rectangle_lines(mins.x, mins.y, extents.x, extents.y, stroke, color);
        }
    }
}

/// Draws a background grid over `bounds` (in pixels) with a cell size
/// given in meters
pub fn draw_grid(bounds: Rect, cell_size: f32, thickness: f32, color: Color) {
    let step = cell_size * PIXELS_PER_METER;
    let mut x = bounds.x;
    while x <= bounds.x + bounds.w {
        draw_line(x, bounds.y, x, bounds.y + bounds.h, thickness, color);
        x += step;
    }
    let mut y = bounds.y;
    while y <= bounds.y + bounds.h {
        draw_line(bounds.x, y, bounds.x + bounds.w, y, thickness, color);
        y += step;
    }
}

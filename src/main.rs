use macroquad::prelude::*;
use rapier2d::prelude::*;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use physics_sandbox::config::{Tuning, TUNING_FILE};
use physics_sandbox::physics::*;
// Explicit import so the crate's 2D `draw_grid` wins over macroquad's
// prelude glob of the same name.
use physics_sandbox::physics::draw_grid;
use physics_sandbox::player::Player;

const WINDOW_WIDTH: i32 = 850;
const WINDOW_HEIGHT: i32 = 450;
const FIXED_DT: f32 = 1.0 / 60.0;
/// Grid cell size in meters
const GRID_CELL: f32 = 1.0;

fn make_box(simulation: &mut PhysicsSimulation, location: Vec2, size: f32) -> PhysicsHandle {
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

struct Scene {
    simulation: PhysicsSimulation,
    player: Player,
    ground: PhysicsHandle,
    spawned: Vec<PhysicsHandle>,
    tuning: Tuning,
}

impl Scene {
    fn new(tuning: Tuning) -> Self {
        let mut simulation = PhysicsSimulation::new(vec2(0.0, tuning.gravity));

        let player = Player::new(
            &mut simulation,
            pixels_to_meters(vec2(100.0, 100.0)),
            &tuning,
        );

        let mut ground_properties = PhysicalProperties::new(RigidBodyType::Fixed);
        let ground_size = pixels_to_meters(vec2(WINDOW_WIDTH as f32, 20.0));
        ground_properties.colliders.push(
            ColliderBuilder::cuboid(ground_size.x * 0.5, ground_size.y * 0.5).friction(0.5),
        );
        ground_properties.set_location(pixels_to_meters(vec2(
            WINDOW_WIDTH as f32 * 0.5,
            WINDOW_HEIGHT as f32 - 18.0,
        )));
        let ground = simulation.create_body(&ground_properties);

        Self {
            simulation,
            player,
            ground,
            spawned: Vec::new(),
            tuning,
        }
    }

    fn update(&mut self) {
        self.simulation.step(FIXED_DT);
        self.player.keep_upright(&mut self.simulation);
    }

    fn draw(&self) {
        draw_grid(
            Rect::new(0.0, 0.0, screen_width(), screen_height()),
            GRID_CELL,
            0.25,
            LIGHTGRAY,
        );
        self.simulation.draw_body_aabb(&self.ground, 1.0, DARKGRAY);
        self.player.draw(&self.simulation);
        for handle in &self.spawned {
            self.simulation.draw_body_lines(handle, 1.0, BLUE);
        }
    }

    fn draw_hud(&self) {
        draw_text("Click to drop boxes", 10.0, 20.0, 20.0, BLACK);
        let velocity = self.player.velocity(&self.simulation);
        draw_text(
            &format!("Box vel: {:.2}, {:.2}", velocity.x, velocity.y),
            10.0,
            44.0,
            20.0,
            DARKGRAY,
        );
        draw_text(
            &format!("Bodies: {}", self.simulation.body_count()),
            10.0,
            68.0,
            20.0,
            BLACK,
        );
        draw_text(&format!("FPS: {}", get_fps()), 10.0, 92.0, 20.0, DARKBLUE);
    }

    fn handle_input(&mut self) {
        // Hold to pour boxes out of the cursor, one per frame
        if is_mouse_button_down(MouseButton::Left) {
            let location = pixels_to_meters(mouse_position().into());
            let handle = make_box(&mut self.simulation, location, self.tuning.box_size);
            debug!(x = location.x, y = location.y, "spawned box");
            self.spawned.push(handle);
        }
        self.player.update(&mut self.simulation, &self.tuning);
    }
}

fn window_conf() -> Conf {
    Conf {
        window_title: "Physics Sandbox".to_string(),
        window_width: WINDOW_WIDTH,
        window_height: WINDOW_HEIGHT,
        ..Default::default()
    }
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

#[macroquad::main(window_conf)]
async fn main() {
    init_logging();
    let tuning = Tuning::load_or_default(TUNING_FILE);
    info!(?tuning, "starting sandbox");

    let mut scene = Scene::new(tuning);
    loop {
        scene.update();

        clear_background(WHITE);
        scene.draw();
        scene.draw_hud();

        scene.handle_input();

        next_frame().await
    }
}

//! Walkthrough - Headless movement demo
//!
//! Run with: `cargo run --bin walkthrough [config.json] [scene.json]`
//!
//! Drives the player simulation at a fixed 60 Hz with a scripted input
//! sequence and logs the avatar pose once per simulated second:
//!
//! - settle onto the ground
//! - walk forward, then run
//! - strafe right while turning
//! - jump
//! - run off the edge of the world until the respawn guard resets the avatar
//!
//! Without a scene file a built-in ground plane with a raised step is used.
//! Set `RUST_LOG=debug` for collider and input details.

use std::error::Error;
use std::path::Path;

use glam::Vec3;
use whiterun_engine::config::ExplorerConfig;
use whiterun_engine::input::{InputState, KeyCode, PointerButton};
use whiterun_engine::player::PlayerSimulation;
use whiterun_engine::world::{FrameClock, LocationColliders, MeshData, SceneNode, WorldEvent};

const STEP_HZ: f32 = 60.0;
const MAX_SECONDS: f32 = 30.0;

/// Scripted phase boundaries in simulated seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Settle,
    Walk,
    Run,
    Strafe,
    Jump,
    RunOffEdge,
}

impl Phase {
    fn at(t: f32) -> Self {
        match t {
            t if t < 1.0 => Phase::Settle,
            t if t < 3.0 => Phase::Walk,
            t if t < 5.0 => Phase::Run,
            t if t < 6.0 => Phase::Strafe,
            t if t < 6.5 => Phase::Jump,
            _ => Phase::RunOffEdge,
        }
    }

    fn held_keys(self) -> &'static [KeyCode] {
        match self {
            Phase::Settle => &[],
            Phase::Walk => &[KeyCode::W],
            Phase::Run | Phase::RunOffEdge => &[KeyCode::W, KeyCode::ShiftLeft],
            Phase::Strafe => &[KeyCode::D],
            Phase::Jump => &[KeyCode::Space],
        }
    }
}

/// Two triangles over `corners` ordered (-x,-z), (+x,-z), (+x,+z), (-x,+z); faces +Y.
fn push_quad(positions: &mut Vec<Vec3>, indices: &mut Vec<u32>, corners: [Vec3; 4]) {
    let base = positions.len() as u32;
    positions.extend_from_slice(&corners);
    indices.extend_from_slice(&[base, base + 3, base + 2, base, base + 2, base + 1]);
}

/// Flat ground around the spawn point with a low step across the walking path.
fn builtin_scene(spawn: Vec3) -> SceneNode {
    let mut positions = Vec::new();
    let mut indices = Vec::new();

    let half = 150.0;
    let (cx, cz) = (spawn.x, spawn.z);
    push_quad(
        &mut positions,
        &mut indices,
        [
            Vec3::new(cx - half, 0.0, cz - half),
            Vec3::new(cx + half, 0.0, cz - half),
            Vec3::new(cx + half, 0.0, cz + half),
            Vec3::new(cx - half, 0.0, cz + half),
        ],
    );

    // Step: top face plus the riser facing the spawn point
    let (step_h, near, far) = (0.2, cz - 20.0, cz - 26.0);
    let (x0, x1) = (cx - 10.0, cx + 10.0);
    push_quad(
        &mut positions,
        &mut indices,
        [
            Vec3::new(x0, step_h, far),
            Vec3::new(x1, step_h, far),
            Vec3::new(x1, step_h, near),
            Vec3::new(x0, step_h, near),
        ],
    );
    let base = positions.len() as u32;
    positions.extend_from_slice(&[
        Vec3::new(x0, 0.0, near),
        Vec3::new(x1, 0.0, near),
        Vec3::new(x1, step_h, near),
        Vec3::new(x0, step_h, near),
    ]);
    indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);

    SceneNode::new("whiterun")
        .with_child(SceneNode::new("landscape"))
        .with_child(SceneNode::new("collider").with_mesh(MeshData {
            positions,
            indices: Some(indices),
        }))
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => ExplorerConfig::load(Path::new(&path))?,
        None => ExplorerConfig::default(),
    };
    let scene = match args.next() {
        Some(path) => SceneNode::load_json(Path::new(&path))?,
        None => builtin_scene(config.respawn.spawn.position),
    };

    let mut colliders = LocationColliders::new();
    let events = colliders.subscribe();
    let collider = colliders.enter(&scene.name, &scene)?;
    for event in events.try_iter() {
        match event {
            WorldEvent::ColliderReady {
                location,
                triangle_count,
            } => log::info!("entered '{location}' ({triangle_count} collision triangles)"),
        }
    }

    let mut sim = PlayerSimulation::new(&config);
    let mut input = InputState::new();
    let mut clock = FrameClock::new(&config.clock);
    input.handle_pointer_down(PointerButton::Primary);

    let fixed_dt = 1.0 / STEP_HZ;
    let mut phase = Phase::Settle;
    let mut next_report = 0.0;
    let mut respawns = 0u32;

    while (clock.elapsed() as f32) < MAX_SECONDS {
        let t = clock.elapsed() as f32;
        let current = Phase::at(t);
        if current != phase {
            for key in phase.held_keys() {
                input.handle_key(*key, false);
            }
            for key in current.held_keys() {
                input.handle_key(*key, true);
            }
            log::info!("phase {current:?} at t={t:.2}s");
            phase = current;
        }
        if phase == Phase::Strafe {
            input.handle_pointer_motion(2.0, 0.0);
        }

        let dt = clock.advance(fixed_dt);
        let report = sim.step(dt, &input.snapshot(), collider.as_ref());

        if report.respawned {
            respawns += 1;
            log::info!("respawned at {:?} after t={t:.2}s", report.pose.position);
            break;
        }

        if t >= next_report {
            let pose = report.pose;
            log::info!(
                "t={t:5.2}s pos=({:7.2}, {:6.2}, {:7.2}) yaw={:5.2} state={:?} speed={:5.2}",
                pose.position.x,
                pose.position.y,
                pose.position.z,
                pose.yaw,
                report.state,
                sim.velocity().length()
            );
            next_report += 1.0;
        }
    }

    log::info!(
        "walkthrough finished: {} frames, {:.2}s simulated, {respawns} respawn(s)",
        clock.frame_count(),
        clock.elapsed()
    );
    Ok(())
}

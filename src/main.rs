/// Headless simulation runner
///
/// Loads a scene description and an optional config, steps the physics at the
/// fixed timestep and logs what happened. The player fires whenever it holds a
/// full round of ammo.
///
/// Usage: quiver-engine <scene.json> [config.toml] [steps]

use anyhow::{bail, Context, Result};
use quiver_engine::{
    spawn_projectile, PhysicsWorld, SceneDescription, SceneGraph, SimulationConfig, StepContext,
    StepReport,
};

const DEFAULT_STEPS: u32 = 600;

fn main() -> Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info,quiver_engine=debug"),
    )
    .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(scene_path) = args.first() else {
        bail!("usage: quiver-engine <scene.json> [config.toml] [steps]");
    };

    let config = match args.get(1) {
        Some(path) => SimulationConfig::load(path)
            .with_context(|| format!("loading config {}", path))?,
        None => SimulationConfig::default(),
    };
    let steps = match args.get(2) {
        Some(raw) => raw
            .parse::<u32>()
            .with_context(|| format!("invalid step count {:?}", raw))?,
        None => DEFAULT_STEPS,
    };

    let description = SceneDescription::load(scene_path)
        .with_context(|| format!("loading scene {}", scene_path))?;
    let mut scene = SceneGraph::from_description(&description)?;
    let ctx = StepContext::discover(&scene)?;

    if let Some(camera) = scene.node_mut(ctx.player)?.camera.as_mut() {
        camera.tuning = config.camera;
    }

    let dt = config.physics.fixed_timestep;
    let gameplay = config.gameplay;
    let mut world = PhysicsWorld::new(config);
    let mut total = StepReport::default();
    let mut fired = 0u32;

    for _ in 0..steps {
        if ctx.spawn_anchor.is_some() && ammo_of(&scene, &ctx)? >= 1.0 {
            let projectile = spawn_projectile(&mut scene, ctx.player, &gameplay)?;
            log::info!("Fired projectile {}", projectile);
            fired += 1;
        }

        let report = world.step(&mut scene, &ctx, dt)?;
        for pin in &report.pinned {
            log::info!("Projectile {} hit {}", pin.projectile, pin.struck);
        }
        for pickup in &report.collected {
            log::info!("Collected pickup {}", pickup);
        }
        total.merge(report);
    }

    let player = scene.node(ctx.player)?;
    let ammo = ammo_of(&scene, &ctx)?;
    log::info!(
        "Ran {} steps ({:.2}s): {} corrections, {} pickups, {} fired, {} pinned",
        total.steps,
        total.steps as f32 * dt,
        total.corrections,
        total.collected.len(),
        fired,
        total.pinned.len()
    );
    log::info!(
        "Player {} at {:?}, ammo {}",
        player.display_name(),
        scene.world_translation(ctx.player)?,
        ammo
    );

    Ok(())
}

fn ammo_of(scene: &SceneGraph, ctx: &StepContext) -> Result<f32> {
    Ok(scene
        .node(ctx.player)?
        .camera
        .map(|camera| camera.ammo)
        .unwrap_or_default())
}

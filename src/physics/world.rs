use glam::Vec3;

use crate::config::SimulationConfig;
use crate::constants::physics_constants::MAX_FRAME_TIME;
use crate::scene::{NodeCategory, NodeId, SceneGraph};
use super::aabb::{aabb_intersects, aabb_is_point, world_aabb, AABB};
use super::error::{invalid_timestep, missing_component, missing_player, PhysicsResult};
use super::integration::{
    follow_translation, integrate_patrol, integrate_player, integrate_projectile, rebake_player,
};
use super::resolution::minimum_translation_vector;
use super::rules::{is_excluded_pair, pickup_side, pinned_side, pushed_side, Side};

/// Explicit handles the step needs, passed in instead of reached through the graph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepContext {
    /// Body carrying the camera component; the only body ever pushed
    pub player: NodeId,
    /// Node that tracks the player and serves as projectile launch origin
    pub spawn_anchor: Option<NodeId>,
}

impl StepContext {
    pub fn new(player: NodeId) -> Self {
        Self {
            player,
            spawn_anchor: None,
        }
    }

    pub fn with_spawn_anchor(mut self, anchor: NodeId) -> Self {
        self.spawn_anchor = Some(anchor);
        self
    }

    /// Find the player by category and take the anchor from its camera
    pub fn discover(scene: &SceneGraph) -> PhysicsResult<Self> {
        let player = scene
            .find_first(NodeCategory::Player)
            .ok_or_else(missing_player)?;
        let camera = scene
            .node(player)?
            .camera
            .ok_or_else(|| missing_component(player, "camera"))?;

        Ok(Self {
            player,
            spawn_anchor: camera.spawn_anchor,
        })
    }
}

/// A projectile that stopped this step and what it stopped in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinEvent {
    pub projectile: NodeId,
    pub struck: NodeId,
}

/// What happened during one or more steps
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepReport {
    pub steps: u32,
    pub collected: Vec<NodeId>,
    pub pinned: Vec<PinEvent>,
    pub corrections: u32,
}

impl StepReport {
    pub fn merge(&mut self, other: StepReport) {
        self.steps += other.steps;
        self.collected.extend(other.collected);
        self.pinned.extend(other.pinned);
        self.corrections += other.corrections;
    }
}

/// Per-frame physics over a scene graph
pub struct PhysicsWorld {
    config: SimulationConfig,
    accumulator: f32,
    paused: bool,
}

impl PhysicsWorld {
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            config,
            accumulator: 0.0,
            paused: false,
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Fixed timestep update: accumulate frame time and run whole steps
    pub fn advance(
        &mut self,
        scene: &mut SceneGraph,
        ctx: &StepContext,
        frame_time: f32,
    ) -> PhysicsResult<StepReport> {
        if self.paused {
            return Ok(StepReport::default());
        }
        if !(frame_time.is_finite() && frame_time >= 0.0) {
            return Err(invalid_timestep(frame_time));
        }

        let fixed = self.config.physics.fixed_timestep;
        self.accumulator += frame_time.min(MAX_FRAME_TIME);

        let mut report = StepReport::default();
        let mut substeps = 0;
        while self.accumulator >= fixed && substeps < self.config.physics.max_substeps {
            report.merge(self.step(scene, ctx, fixed)?);
            self.accumulator -= fixed;
            substeps += 1;
        }

        if substeps == self.config.physics.max_substeps && self.accumulator >= fixed {
            log::warn!(
                "[PhysicsWorld] Dropping {:.3}s of simulation after {} substeps",
                self.accumulator,
                substeps
            );
            self.accumulator = 0.0;
        }

        Ok(report)
    }

    /// One physics step: all integration first, then the pairwise collision pass.
    ///
    /// The context is validated before anything is mutated, so an error leaves the
    /// scene exactly as it was.
    pub fn step(
        &mut self,
        scene: &mut SceneGraph,
        ctx: &StepContext,
        dt: f32,
    ) -> PhysicsResult<StepReport> {
        if self.paused {
            return Ok(StepReport::default());
        }
        self.validate(scene, ctx, dt)?;

        let order = scene.traversal_order();
        self.integrate(scene, ctx, &order, dt)?;

        let mut report = StepReport {
            steps: 1,
            ..StepReport::default()
        };
        self.resolve_collisions(scene, ctx, &order, &mut report)?;
        self.sync_spawn_anchor(scene, ctx)?;

        log::trace!(
            "[PhysicsWorld] Step dt={:.4}: {} corrections, {} pickups, {} pinned",
            dt,
            report.corrections,
            report.collected.len(),
            report.pinned.len()
        );
        Ok(report)
    }

    fn validate(&self, scene: &SceneGraph, ctx: &StepContext, dt: f32) -> PhysicsResult<()> {
        if !(dt.is_finite() && dt >= 0.0) {
            return Err(invalid_timestep(dt));
        }
        if scene.node(ctx.player)?.camera.is_none() {
            return Err(missing_component(ctx.player, "camera"));
        }
        if let Some(anchor) = ctx.spawn_anchor {
            scene.node(anchor)?;
        }
        for id in scene.traversal_order() {
            // Cycles would otherwise surface halfway through the collision pass
            scene.global_transform(id)?;
        }
        Ok(())
    }

    fn integrate(
        &self,
        scene: &mut SceneGraph,
        ctx: &StepContext,
        order: &[NodeId],
        dt: f32,
    ) -> PhysicsResult<()> {
        let gravity = self.config.physics.projectile_gravity;

        for &id in order {
            let node = scene.node_mut(id)?;
            if id == ctx.player {
                integrate_player(node, dt);
            } else if node.category == NodeCategory::Projectile {
                integrate_projectile(node, gravity, dt);
            } else if node.is_patrolling() {
                integrate_patrol(node);
            }
        }

        self.sync_spawn_anchor(scene, ctx)
    }

    fn sync_spawn_anchor(&self, scene: &mut SceneGraph, ctx: &StepContext) -> PhysicsResult<()> {
        if let Some(anchor) = ctx.spawn_anchor {
            let translation = scene.node(ctx.player)?.translation;
            follow_translation(scene.node_mut(anchor)?, translation);
        }
        Ok(())
    }

    fn collision_box(scene: &SceneGraph, id: NodeId) -> PhysicsResult<AABB> {
        let position = scene.world_translation(id)?;
        Ok(world_aabb(position, &scene.node(id)?.aabb))
    }

    /// Visit each unordered pair once, in traversal order
    fn resolve_collisions(
        &self,
        scene: &mut SceneGraph,
        ctx: &StepContext,
        order: &[NodeId],
        report: &mut StepReport,
    ) -> PhysicsResult<()> {
        for (i, &first) in order.iter().enumerate() {
            for &second in &order[i + 1..] {
                self.resolve_pair(scene, ctx, first, second, report)?;
            }
        }
        Ok(())
    }

    fn resolve_pair(
        &self,
        scene: &mut SceneGraph,
        ctx: &StepContext,
        first: NodeId,
        second: NodeId,
        report: &mut StepReport,
    ) -> PhysicsResult<()> {
        let (a, b) = (scene.node(first)?, scene.node(second)?);
        if !(a.collidable && b.collidable) {
            return Ok(());
        }
        let (category_a, category_b) = (a.category, b.category);
        if is_excluded_pair(category_a, category_b) {
            return Ok(());
        }
        // Zero-size boxes still trigger pickups and pins but are never pushed against
        let degenerate = aabb_is_point(&a.aabb) || aabb_is_point(&b.aabb);

        let box_a = Self::collision_box(scene, first)?;
        let box_b = Self::collision_box(scene, second)?;
        if !aabb_intersects(&box_a, &box_b) {
            return Ok(());
        }

        if let Some(side) = pickup_side(category_a, category_b) {
            self.collect_pickup(scene, ctx, side.pick(first, second), report)?;
        }

        if let Some(side) = pushed_side(category_a, category_b).filter(|_| !degenerate) {
            let (pushed, pushed_box, other_box) = match side {
                Side::First => (first, box_a, box_b),
                Side::Second => (second, box_b, box_a),
            };
            if let Some(push) = minimum_translation_vector(&pushed_box, &other_box) {
                Self::apply_push(scene, pushed, push)?;
                report.corrections += 1;
            }
        }

        if let Some(side) = pinned_side(category_a, category_b) {
            let projectile = side.pick(first, second);
            let struck = side.other().pick(first, second);
            let node = scene.node_mut(projectile)?;
            node.velocity = Vec3::ZERO;
            node.collidable = false;
            report.pinned.push(PinEvent { projectile, struck });
            log::debug!("[PhysicsWorld] Projectile {} pinned in {}", projectile, struck);
        }

        Ok(())
    }

    fn collect_pickup(
        &self,
        scene: &mut SceneGraph,
        ctx: &StepContext,
        pickup: NodeId,
        report: &mut StepReport,
    ) -> PhysicsResult<()> {
        let node = scene.node_mut(pickup)?;
        if node.picked_up {
            return Ok(());
        }
        node.picked_up = true;
        node.visible = false;

        let amount = self.config.gameplay.ammo_per_pickup;
        let player = scene.node_mut(ctx.player)?;
        let camera = player
            .camera
            .as_mut()
            .ok_or_else(|| missing_component(ctx.player, "camera"))?;
        camera.ammo += amount;

        report.collected.push(pickup);
        log::debug!(
            "[PhysicsWorld] Pickup {} collected, ammo now {}",
            pickup,
            camera.ammo
        );
        Ok(())
    }

    fn apply_push(scene: &mut SceneGraph, id: NodeId, push: Vec3) -> PhysicsResult<()> {
        let node = scene.node_mut(id)?;
        node.translation += push;
        if node.camera.is_some() {
            rebake_player(node);
        } else {
            node.update_matrix();
        }
        Ok(())
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new(SimulationConfig::default())
    }
}

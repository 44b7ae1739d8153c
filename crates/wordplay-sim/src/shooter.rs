//! Word Shooter: balloons carrying letters fall from the top, the player
//! shoots them in the order the target word spells.
//!
//! Balloons and bullets live in a hecs `World`; the spaceship is a singleton
//! field. Movement rates are per baseline frame and scaled by `dt`.

use glam::Vec2;
use hecs::{Entity, World};
use rand::Rng;

use wordplay_core::constants::*;
use wordplay_core::enums::{BalloonSprite, Direction, GameType, Key, Sound, StepOutcome};
use wordplay_core::state::{BalloonView, ModeView, ShooterView};
use wordplay_core::types::Rect;

use crate::engine::{EngineContext, GameEngine, InputState};
use crate::text::random_balloon_char;

/// Top-left corner of a balloon or bullet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position(pub Vec2);

#[derive(Debug, Clone, Copy)]
pub struct Balloon {
    pub letter: char,
    /// Pixels per baseline frame.
    pub fall_speed: f32,
    pub sprite: BalloonSprite,
}

/// Marker for projectiles.
#[derive(Debug, Clone, Copy)]
pub struct Bullet;

#[derive(Debug, Clone, Copy)]
pub struct Spaceship {
    pub position: Vec2,
    pub size: Vec2,
}

impl Spaceship {
    /// Centred horizontally, resting above the bottom edge.
    fn parked(bounds: Vec2) -> Self {
        Self {
            position: Vec2::new(
                bounds.x / 2.0 - SHIP_SIZE / 2.0,
                bounds.y - SHIP_SIZE - SHIP_BOTTOM_MARGIN,
            ),
            size: Vec2::splat(SHIP_SIZE),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            origin: self.position,
            size: self.size,
        }
    }

    /// Where new bullets appear.
    pub fn muzzle(&self) -> Vec2 {
        Vec2::new(
            self.position.x + self.size.x / 2.0 - BULLET_WIDTH / 2.0,
            self.position.y,
        )
    }
}

pub struct ShooterEngine {
    world: World,
    ship: Spaceship,
    collected: String,
    despawn_buffer: Vec<Entity>,
}

impl ShooterEngine {
    pub fn new(bounds: Vec2) -> Self {
        Self {
            world: World::new(),
            ship: Spaceship::parked(bounds),
            collected: String::new(),
            despawn_buffer: Vec::new(),
        }
    }

    pub fn collected(&self) -> &str {
        &self.collected
    }

    pub fn ship(&self) -> &Spaceship {
        &self.ship
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn balloon_count(&self) -> usize {
        self.world.query::<&Balloon>().iter().count()
    }

    pub fn bullet_count(&self) -> usize {
        self.world.query::<&Bullet>().iter().count()
    }

    /// Clear entities and progress, park the ship.
    pub fn clear(&mut self, bounds: Vec2) {
        self.world.clear();
        self.collected.clear();
        self.ship = Spaceship::parked(bounds);
    }

    /// Keep the ship inside new canvas bounds.
    pub fn fit_to_bounds(&mut self, bounds: Vec2) {
        let max = (bounds - self.ship.size).max(Vec2::ZERO);
        self.ship.position = self.ship.position.clamp(Vec2::ZERO, max);
    }

    /// Bernoulli spawn: at most one balloon per frame.
    pub fn spawn_tick(&mut self, ctx: &mut EngineContext) {
        if !ctx.rng.gen_bool(BALLOON_SPAWN_PROBABILITY) {
            return;
        }
        let min_x = BALLOON_SIDE_MARGIN;
        let max_x = ctx.bounds.x - BALLOON_SIZE - BALLOON_SIDE_MARGIN;
        let x = if max_x > min_x {
            ctx.rng.gen_range(min_x..max_x)
        } else {
            min_x
        };
        let balloon = Balloon {
            letter: random_balloon_char(ctx.rng),
            fall_speed: ctx.rng.gen_range(BALLOON_MIN_SPEED..BALLOON_MAX_SPEED),
            sprite: BalloonSprite::ALL[ctx.rng.gen_range(0..BalloonSprite::ALL.len())],
        };
        self.world
            .spawn((Position(Vec2::new(x, -BALLOON_SIZE)), balloon));
    }

    /// Fire one bullet from the ship's muzzle.
    pub fn shoot(&mut self, ctx: &mut EngineContext) {
        self.world.spawn((Position(self.ship.muzzle()), Bullet));
        ctx.play(Sound::Laser);
    }

    /// Resolve bullet/balloon hits. A bullet destroys at most one balloon.
    pub fn check_collisions(&mut self, ctx: &mut EngineContext) -> StepOutcome {
        let balloons: Vec<(Entity, Vec2, char)> = self
            .world
            .query::<(&Position, &Balloon)>()
            .iter()
            .map(|(e, (pos, b))| (e, pos.0, b.letter))
            .collect();
        let bullets: Vec<(Entity, Vec2)> = self
            .world
            .query::<(&Position, &Bullet)>()
            .iter()
            .map(|(e, (pos, _))| (e, pos.0))
            .collect();

        self.despawn_buffer.clear();
        for (bullet, point) in bullets {
            let hit = balloons.iter().find(|(balloon, origin, _)| {
                !self.despawn_buffer.contains(balloon)
                    && Rect {
                        origin: *origin,
                        size: Vec2::splat(BALLOON_SIZE),
                    }
                    .strictly_contains(point)
            });
            let Some(&(balloon, _, letter)) = hit else {
                continue;
            };
            if ctx.target_word.chars().nth(self.collected.chars().count()) == Some(letter) {
                self.collected.push(letter);
                ctx.play(Sound::Explosion);
            }
            self.despawn_buffer.push(bullet);
            self.despawn_buffer.push(balloon);
        }
        for entity in self.despawn_buffer.drain(..) {
            let _ = self.world.despawn(entity);
        }

        if !ctx.target_word.is_empty() && self.collected == ctx.target_word {
            log::debug!("shooter: collected {:?}", self.collected);
            self.clear(ctx.bounds);
            return StepOutcome::GameComplete;
        }
        StepOutcome::Continue
    }

    fn move_ship(&mut self, input: &InputState, step: f32, bounds: Vec2) {
        let mut delta = Vec2::ZERO;
        if input.is_held(Direction::Left) {
            delta.x -= 1.0;
        }
        if input.is_held(Direction::Right) {
            delta.x += 1.0;
        }
        if input.is_held(Direction::Up) {
            delta.y -= 1.0;
        }
        if input.is_held(Direction::Down) {
            delta.y += 1.0;
        }
        let max = (bounds - self.ship.size).max(Vec2::ZERO);
        self.ship.position = (self.ship.position + delta * SHIP_SPEED * step).clamp(Vec2::ZERO, max);
    }

    fn integrate(&mut self, step: f32) {
        for (_entity, (pos, balloon)) in self.world.query_mut::<(&mut Position, &Balloon)>() {
            pos.0.y += balloon.fall_speed * step;
        }
        for (_entity, (pos, _bullet)) in self.world.query_mut::<(&mut Position, &Bullet)>() {
            pos.0.y -= BULLET_SPEED * step;
        }
    }

    /// Drop bullets that left the top and balloons that reached the floor.
    fn prune(&mut self, bounds: Vec2) {
        self.despawn_buffer.clear();
        let floor = bounds.y - BALLOON_FLOOR_MARGIN;
        for (entity, (pos, _)) in self.world.query_mut::<(&Position, &Balloon)>() {
            if pos.0.y + BALLOON_SIZE > floor {
                self.despawn_buffer.push(entity);
            }
        }
        for (entity, (pos, _)) in self.world.query_mut::<(&Position, &Bullet)>() {
            if pos.0.y <= 0.0 {
                self.despawn_buffer.push(entity);
            }
        }
        for entity in self.despawn_buffer.drain(..) {
            let _ = self.world.despawn(entity);
        }
    }

    #[cfg(test)]
    pub fn spawn_test_balloon(&mut self, letter: char, at: Vec2) -> Entity {
        self.world.spawn((
            Position(at),
            Balloon {
                letter,
                fall_speed: BALLOON_MIN_SPEED,
                sprite: BalloonSprite::Classic,
            },
        ))
    }

    #[cfg(test)]
    pub fn spawn_test_bullet(&mut self, at: Vec2) -> Entity {
        self.world.spawn((Position(at), Bullet))
    }
}

impl GameEngine for ShooterEngine {
    fn game_type(&self) -> GameType {
        GameType::Shooter
    }

    fn begin(&mut self, ctx: &mut EngineContext) {
        self.clear(ctx.bounds);
    }

    fn reset(&mut self, ctx: &mut EngineContext) {
        self.clear(ctx.bounds);
    }

    fn update(&mut self, dt_ms: f32, input: &InputState, ctx: &mut EngineContext) -> StepOutcome {
        let step = dt_ms / BASELINE_FRAME_MS;
        self.move_ship(input, step, ctx.bounds);
        self.spawn_tick(ctx);
        self.integrate(step);
        self.prune(ctx.bounds);
        self.check_collisions(ctx)
    }

    fn handle_key(&mut self, key: Key, ctx: &mut EngineContext) -> StepOutcome {
        if key == Key::Space {
            self.shoot(ctx);
        }
        StepOutcome::Continue
    }

    fn progress_label(&self) -> String {
        if self.collected.is_empty() {
            "Letters hit".to_string()
        } else {
            self.collected.clone()
        }
    }

    fn view(&self) -> ModeView {
        let balloons = self
            .world
            .query::<(&Position, &Balloon)>()
            .iter()
            .map(|(_, (pos, b))| BalloonView {
                letter: b.letter,
                position: pos.0,
                sprite: b.sprite,
            })
            .collect();
        let bullets = self
            .world
            .query::<(&Position, &Bullet)>()
            .iter()
            .map(|(_, (pos, _))| pos.0)
            .collect();
        ModeView::Shooter(ShooterView {
            ship: self.ship.rect(),
            collected: self.collected.clone(),
            balloons,
            bullets,
        })
    }
}

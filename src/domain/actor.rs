//! Actors: positioned, sized, axis-aligned rectangles.
//!
//! One record shape for every variant. `ActorKind` is the type tag the level
//! reacts to on touch; `Motion` selects what `act` does each tick:
//!
//! | Variant            | Kind       | Motion              | Size      |
//! |--------------------|------------|---------------------|-----------|
//! | base actor         | `Actor`    | `Still`             | (1, 1)    |
//! | Player             | `Player`   | `Still`             | (0.8, 1.5)|
//! | Coin               | `Coin`     | `Spring`            | (0.6, 0.6)|
//! | HorizontalFireball | `Fireball` | `Bounce`, (2, 0)    | (1, 1)    |
//! | VerticalFireball   | `Fireball` | `Bounce`, (0, 2)    | (1, 1)    |
//! | FireRain           | `Fireball` | `Loop`, (0, 3)      | (1, 1)    |

use std::f64::consts::TAU;
use std::sync::atomic::{AtomicU64, Ordering};

use rand::Rng;

use super::obstacle::ObstacleMap;
use super::vector::Vector;
use crate::config::CoinConfig;
use crate::error::{KernelError, Result};

pub const PLAYER_SIZE: Vector = Vector::new(0.8, 1.5);
/// Spawn marks the player's feet; the box origin sits half a cell higher.
pub const PLAYER_SPAWN_OFFSET: Vector = Vector::new(0.0, -0.5);
pub const COIN_SIZE: Vector = Vector::new(0.6, 0.6);
/// Centers the coin inside its grid cell.
pub const COIN_SPAWN_OFFSET: Vector = Vector::new(0.2, 0.1);
pub const HORIZONTAL_FIREBALL_SPEED: Vector = Vector::new(2.0, 0.0);
pub const VERTICAL_FIREBALL_SPEED: Vector = Vector::new(0.0, 2.0);
pub const FIRE_RAIN_SPEED: Vector = Vector::new(0.0, 3.0);

static NEXT_ACTOR_ID: AtomicU64 = AtomicU64::new(1);

/// Actor identity. Clones of an actor share its id.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ActorId(u64);

impl ActorId {
    fn next() -> Self {
        ActorId(NEXT_ACTOR_ID.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ActorKind {
    Actor,
    Player,
    Coin,
    Fireball,
}

impl ActorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ActorKind::Actor => "actor",
            ActorKind::Player => "player",
            ActorKind::Coin => "coin",
            ActorKind::Fireball => "fireball",
        }
    }
}

/// Spring oscillation state for collectibles.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Spring {
    pub phase: f64,
    pub speed: f64,
    pub dist: f64,
    /// Centered spawn point. Never changes after construction.
    pub base_pos: Vector,
}

impl Spring {
    /// Vertical displacement from `base_pos` at the current phase.
    pub fn offset(&self) -> Vector {
        Vector::new(0.0, self.phase.sin() * self.dist)
    }
}

/// Per-tick behavior.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Motion {
    /// No self-driven motion.
    Still,
    /// Linear motion; reverse both speed components on obstacle.
    Bounce,
    /// Linear motion; jump back to `spawn` on obstacle.
    Loop { spawn: Vector },
    /// Vertical bobbing around a fixed base point.
    Spring(Spring),
}

/// Constructor arguments for a plain actor.
/// Defaults: pos (0, 0), size (1, 1), speed (0, 0).
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct ActorConfig {
    pub pos: Vector,
    pub size: Vector,
    pub speed: Vector,
}

impl Default for ActorConfig {
    fn default() -> Self {
        ActorConfig {
            pos: Vector::ZERO,
            size: Vector::ONE,
            speed: Vector::ZERO,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Actor {
    pub pos: Vector,
    pub size: Vector,
    pub speed: Vector,
    id: ActorId,
    kind: ActorKind,
    motion: Motion,
}

impl Actor {
    /// Plain actor of kind `Actor`. Every vector must be finite and the size
    /// must not be negative.
    pub fn new(config: ActorConfig) -> Result<Self> {
        Self::build(config, ActorKind::Actor, Motion::Still)
    }

    fn build(config: ActorConfig, kind: ActorKind, motion: Motion) -> Result<Self> {
        Ok(Actor {
            pos: config.pos.check_finite("pos")?,
            size: config.size.check_size()?,
            speed: config.speed.check_finite("speed")?,
            id: ActorId::next(),
            kind,
            motion,
        })
    }

    // ── Variants ──

    /// Player standing with its feet at `spawn`.
    pub fn player(spawn: Vector) -> Result<Self> {
        let config = ActorConfig {
            pos: spawn.check_finite("pos")?.plus(PLAYER_SPAWN_OFFSET),
            size: PLAYER_SIZE,
            speed: Vector::ZERO,
        };
        Self::build(config, ActorKind::Player, Motion::Still)
    }

    /// Bouncing fireball with an arbitrary speed.
    pub fn fireball(pos: Vector, speed: Vector) -> Result<Self> {
        let config = ActorConfig { pos, size: Vector::ONE, speed };
        Self::build(config, ActorKind::Fireball, Motion::Bounce)
    }

    pub fn horizontal_fireball(pos: Vector) -> Result<Self> {
        Self::fireball(pos, HORIZONTAL_FIREBALL_SPEED)
    }

    pub fn vertical_fireball(pos: Vector) -> Result<Self> {
        Self::fireball(pos, VERTICAL_FIREBALL_SPEED)
    }

    /// Falling fireball that restarts from `pos` whenever it is blocked.
    pub fn fire_rain_with_speed(pos: Vector, speed: Vector) -> Result<Self> {
        let spawn = pos.check_finite("pos")?;
        let config = ActorConfig { pos: spawn, size: Vector::ONE, speed };
        Self::build(config, ActorKind::Fireball, Motion::Loop { spawn })
    }

    pub fn fire_rain(pos: Vector) -> Result<Self> {
        Self::fire_rain_with_speed(pos, FIRE_RAIN_SPEED)
    }

    /// Coin in the cell at `cell`, with a random spring phase in [0, 2π).
    pub fn coin(cell: Vector) -> Result<Self> {
        Self::coin_with_rng(cell, &CoinConfig::default(), &mut rand::thread_rng())
    }

    pub fn coin_with_rng<R: Rng>(cell: Vector, config: &CoinConfig, rng: &mut R) -> Result<Self> {
        let phase = rng.gen_range(0.0..TAU);
        Self::coin_with_phase(cell, config, phase)
    }

    pub fn coin_with_phase(cell: Vector, config: &CoinConfig, phase: f64) -> Result<Self> {
        let base_pos = cell.check_finite("pos")?.plus(COIN_SPAWN_OFFSET);
        let spring = Spring {
            phase,
            speed: config.spring_speed,
            dist: config.spring_dist,
            base_pos,
        };
        let config = ActorConfig { pos: base_pos, size: COIN_SIZE, speed: Vector::ZERO };
        Self::build(config, ActorKind::Coin, Motion::Spring(spring))
    }

    // ── Accessors ──

    pub fn id(&self) -> ActorId {
        self.id
    }

    pub fn kind(&self) -> ActorKind {
        self.kind
    }

    pub fn motion(&self) -> &Motion {
        &self.motion
    }

    pub fn left(&self) -> f64 {
        self.pos.x
    }

    pub fn right(&self) -> f64 {
        self.pos.x + self.size.x
    }

    pub fn top(&self) -> f64 {
        self.pos.y
    }

    pub fn bottom(&self) -> f64 {
        self.pos.y + self.size.y
    }

    /// Strict rectangle overlap. Boxes that only share an edge do not
    /// intersect, and an actor never intersects itself.
    pub fn is_intersect(&self, other: &Actor) -> bool {
        if self.id == other.id {
            return false;
        }
        self.right() > other.left()
            && self.left() < other.right()
            && self.bottom() > other.top()
            && self.top() < other.bottom()
    }

    // ── Motion ──

    /// Where this actor would be after `time`.
    /// Linear movers: `pos + speed * time`. Springs: base point plus the
    /// current spring offset (the phase is advanced by `update_spring`).
    pub fn next_position(&self, time: f64) -> Vector {
        match &self.motion {
            Motion::Spring(spring) => spring.base_pos.plus(self.spring_vector()),
            _ => self.pos.plus(self.speed.times(time)),
        }
    }

    /// React to a blocked move.
    pub fn handle_obstacle(&mut self) {
        match self.motion {
            Motion::Bounce => {
                self.speed = self.speed.times(-1.0);
                log::trace!("{:?} bounced, speed now {:?}", self.id, self.speed);
            }
            Motion::Loop { spawn } => {
                self.pos = spawn;
                log::trace!("{:?} reset to spawn {:?}", self.id, spawn);
            }
            Motion::Still | Motion::Spring(_) => {}
        }
    }

    /// Advance the spring phase. No-op for actors without a spring.
    pub fn update_spring(&mut self, time: f64) {
        if let Motion::Spring(spring) = &mut self.motion {
            spring.phase += spring.speed * time;
        }
    }

    /// Current vertical spring offset; zero for actors without a spring.
    pub fn spring_vector(&self) -> Vector {
        match &self.motion {
            Motion::Spring(spring) => spring.offset(),
            _ => Vector::ZERO,
        }
    }

    /// One tick of self-driven behavior.
    ///
    /// Linear movers check `map` at their next position: clear means move
    /// there, blocked means `handle_obstacle` instead (never both).
    /// On error the actor is left unchanged.
    pub fn act<M: ObstacleMap + ?Sized>(&mut self, time: f64, map: &M) -> Result<()> {
        if !time.is_finite() {
            return Err(KernelError::NonFiniteTime(time));
        }
        match self.motion {
            Motion::Still => {}
            Motion::Spring(mut spring) => {
                spring.phase += spring.speed * time;
                let next = spring.base_pos.plus(spring.offset()).check_finite("pos")?;
                self.motion = Motion::Spring(spring);
                self.pos = next;
            }
            Motion::Bounce | Motion::Loop { .. } => {
                let next = self.next_position(time);
                if map.obstacle_at(next, self.size)?.is_none() {
                    self.pos = next;
                } else {
                    self.handle_obstacle();
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::obstacle::{Grid, Obstacle};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn v(x: f64, y: f64) -> Vector {
        Vector::new(x, y)
    }

    fn boxed(x: f64, y: f64, w: f64, h: f64) -> Actor {
        Actor::new(ActorConfig { pos: v(x, y), size: v(w, h), ..Default::default() }).unwrap()
    }

    fn assert_near(a: Vector, b: Vector) {
        assert!((a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9, "{a:?} != {b:?}");
    }

    fn open_grid(w: usize, h: usize) -> Grid {
        Grid::new(vec![vec![None; w]; h])
    }

    fn grid_from(rows: &[&str]) -> Grid {
        Grid::new(
            rows.iter()
                .map(|r| r.chars().map(Obstacle::from_symbol).collect())
                .collect(),
        )
    }

    // ── construction ──

    #[test]
    fn default_actor() {
        let a = Actor::new(ActorConfig::default()).unwrap();
        assert_eq!(a.pos, Vector::ZERO);
        assert_eq!(a.size, Vector::ONE);
        assert_eq!(a.speed, Vector::ZERO);
        assert_eq!(a.kind(), ActorKind::Actor);
        assert_eq!(a.kind().as_str(), "actor");
    }

    #[test]
    fn bounds_follow_pos_and_size() {
        let a = boxed(1.0, 2.0, 3.0, 4.0);
        assert_eq!(a.left(), 1.0);
        assert_eq!(a.right(), 4.0);
        assert_eq!(a.top(), 2.0);
        assert_eq!(a.bottom(), 6.0);
    }

    #[test]
    fn construction_rejects_bad_vectors() {
        let bad_pos = ActorConfig { pos: v(f64::NAN, 0.0), ..Default::default() };
        assert!(matches!(Actor::new(bad_pos), Err(KernelError::NonFinite { what: "pos", .. })));

        let bad_speed = ActorConfig { speed: v(0.0, f64::INFINITY), ..Default::default() };
        assert!(matches!(Actor::new(bad_speed), Err(KernelError::NonFinite { what: "speed", .. })));

        let bad_size = ActorConfig { size: v(1.0, -1.0), ..Default::default() };
        assert!(matches!(Actor::new(bad_size), Err(KernelError::NegativeSize { .. })));

        assert!(Actor::player(v(f64::NAN, 1.0)).is_err());
        assert!(Actor::fire_rain(v(0.0, f64::NAN)).is_err());
    }

    #[test]
    fn ids_are_unique_and_shared_by_clones() {
        let a = boxed(0.0, 0.0, 1.0, 1.0);
        let b = boxed(0.0, 0.0, 1.0, 1.0);
        assert_ne!(a.id(), b.id());
        assert_eq!(a.clone().id(), a.id());
    }

    // ── intersection ──

    #[test]
    fn overlapping_boxes_intersect() {
        let a = boxed(0.0, 0.0, 1.0, 1.0);
        let b = boxed(0.5, 0.5, 1.0, 1.0);
        assert!(a.is_intersect(&b));
        assert!(b.is_intersect(&a));
    }

    #[test]
    fn edge_touching_boxes_do_not_intersect() {
        let a = boxed(0.0, 0.0, 1.0, 1.0);
        let right = boxed(1.0, 0.0, 1.0, 1.0);
        let below = boxed(0.0, 1.0, 1.0, 1.0);
        let corner = boxed(1.0, 1.0, 1.0, 1.0);
        assert!(!a.is_intersect(&right));
        assert!(!a.is_intersect(&below));
        assert!(!a.is_intersect(&corner));
    }

    #[test]
    fn contained_box_intersects() {
        let outer = boxed(0.0, 0.0, 4.0, 4.0);
        let inner = boxed(1.0, 1.0, 1.0, 1.0);
        assert!(outer.is_intersect(&inner));
        assert!(inner.is_intersect(&outer));
    }

    #[test]
    fn self_never_intersects() {
        let a = boxed(0.0, 0.0, 1.0, 1.0);
        assert!(!a.is_intersect(&a));
        assert!(!a.is_intersect(&a.clone()));
    }

    #[test]
    fn identical_geometry_distinct_actors_intersect() {
        let a = boxed(0.0, 0.0, 1.0, 1.0);
        let b = boxed(0.0, 0.0, 1.0, 1.0);
        assert!(a.is_intersect(&b));
    }

    // ── player ──

    #[test]
    fn player_spawn_offset_and_size() {
        let p = Actor::player(v(3.0, 5.0)).unwrap();
        assert_eq!(p.pos, v(3.0, 4.5));
        assert_eq!(p.size, PLAYER_SIZE);
        assert_eq!(p.kind(), ActorKind::Player);
    }

    #[test]
    fn player_act_is_noop() {
        let mut p = Actor::player(v(1.0, 1.0)).unwrap();
        let before = p.pos;
        p.act(1.0, &open_grid(3, 3)).unwrap();
        assert_eq!(p.pos, before);
    }

    // ── fireballs ──

    #[test]
    fn fireball_next_position() {
        let f = Actor::fireball(v(5.0, 5.0), v(2.0, 3.0)).unwrap();
        assert_eq!(f.next_position(1.0), v(7.0, 8.0));
        assert_eq!(f.next_position(2.0), v(9.0, 11.0));
        assert_eq!(f.kind().as_str(), "fireball");
    }

    #[test]
    fn fireball_moves_when_clear() {
        let mut f = Actor::horizontal_fireball(v(0.0, 0.0)).unwrap();
        f.act(1.0, &open_grid(5, 1)).unwrap();
        assert_eq!(f.pos, v(2.0, 0.0));
        assert_eq!(f.speed, HORIZONTAL_FIREBALL_SPEED);
    }

    #[test]
    fn fireball_bounces_on_obstacle() {
        let mut f = Actor::horizontal_fireball(v(0.0, 0.0)).unwrap();
        let g = grid_from(&["  x"]);
        f.act(1.0, &g).unwrap();
        assert_eq!(f.pos, v(0.0, 0.0));
        assert_eq!(f.speed, v(-2.0, 0.0));
    }

    #[test]
    fn vertical_fireball_bounces_off_floor() {
        let mut f = Actor::vertical_fireball(v(0.0, 0.0)).unwrap();
        f.act(1.0, &open_grid(1, 2)).unwrap();
        // next box would end at y=3 > height 2 → lava counts as blocked
        assert_eq!(f.pos, v(0.0, 0.0));
        assert_eq!(f.speed, v(0.0, -2.0));
    }

    #[test]
    fn fire_rain_returns_to_spawn() {
        let mut f = Actor::fire_rain(v(0.0, 0.0)).unwrap();
        let g = open_grid(1, 5);
        f.act(1.0, &g).unwrap();
        assert_eq!(f.pos, v(0.0, 3.0));
        f.act(1.0, &g).unwrap();
        // would end at y=7 > 5: back to spawn, speed unchanged
        assert_eq!(f.pos, v(0.0, 0.0));
        assert_eq!(f.speed, FIRE_RAIN_SPEED);
    }

    #[test]
    fn act_rejects_non_finite_time() {
        let mut f = Actor::horizontal_fireball(v(0.0, 0.0)).unwrap();
        let err = f.act(f64::NAN, &open_grid(5, 1)).unwrap_err();
        assert!(matches!(err, KernelError::NonFiniteTime(t) if t.is_nan()));
        assert_eq!(f.pos, v(0.0, 0.0));
    }

    #[test]
    fn coin_rejects_overflowing_spring() {
        let mut c = Actor::coin_with_phase(v(0.0, 0.0), &CoinConfig::default(), 0.0).unwrap();
        let before = c.pos;
        // 8 * f64::MAX overflows the phase; sin(inf) is NaN
        let err = c.act(f64::MAX, &open_grid(3, 3)).unwrap_err();
        assert!(matches!(err, KernelError::NonFinite { what: "pos", .. }));
        assert_eq!(c.pos, before);
        assert!(c.pos.is_finite());
        match c.motion() {
            Motion::Spring(s) => assert_eq!(s.phase, 0.0),
            other => panic!("coin has motion {other:?}"),
        }
    }

    // ── coin ──

    #[test]
    fn coin_centered_in_cell() {
        let c = Actor::coin_with_phase(v(2.0, 3.0), &CoinConfig::default(), 0.0).unwrap();
        assert_near(c.pos, v(2.2, 3.1));
        assert_eq!(c.size, COIN_SIZE);
        assert_eq!(c.kind(), ActorKind::Coin);
    }

    #[test]
    fn coin_random_phase_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let c = Actor::coin_with_rng(v(0.0, 0.0), &CoinConfig::default(), &mut rng).unwrap();
            match c.motion() {
                Motion::Spring(s) => assert!((0.0..TAU).contains(&s.phase)),
                other => panic!("coin has motion {other:?}"),
            }
        }
    }

    #[test]
    fn coin_bobs_around_fixed_base() {
        let cfg = CoinConfig::default();
        let mut c = Actor::coin_with_phase(v(1.0, 1.0), &cfg, 0.0).unwrap();
        let base = v(1.2, 1.1);
        let g = open_grid(3, 3);

        c.act(0.1, &g).unwrap();
        let expected = (0.8f64).sin() * cfg.spring_dist;
        assert_near(c.pos, v(base.x, base.y + expected));

        for _ in 0..100 {
            c.act(0.05, &g).unwrap();
            assert!((c.pos.x - base.x).abs() < 1e-9);
            assert!((c.pos.y - base.y).abs() <= cfg.spring_dist + 1e-9);
        }
        match c.motion() {
            Motion::Spring(s) => assert_near(s.base_pos, base),
            other => panic!("coin has motion {other:?}"),
        }
    }

    #[test]
    fn spring_helpers_noop_without_spring() {
        let mut a = boxed(0.0, 0.0, 1.0, 1.0);
        a.update_spring(1.0);
        assert_eq!(a.spring_vector(), Vector::ZERO);
        a.handle_obstacle();
        assert_eq!(a.pos, Vector::ZERO);
    }
}

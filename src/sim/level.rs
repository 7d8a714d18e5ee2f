//! Level: the live simulation state of one stage.
//!
//! Owns the terrain `Grid` and the ordered actor list. The external driver
//! holds the level exclusively and, each tick:
//!   1. `act(time)`           — every actor moves (list order)
//!   2. `actor_at(player)`    — find what the player overlaps
//!   3. `player_touched(..)`  — apply the touch
//!   4. `is_finished()`       — stop once the end delay has run out
//!
//! ## Status
//!
//! `None → Won | Lost`, one way. Once set, further touches are ignored.
//! The driver decrements `finish_delay` after the status is set;
//! `is_finished` turns true when it drops below zero.

use crate::config::LevelConfig;
use crate::domain::actor::{Actor, ActorId, ActorKind};
use crate::domain::obstacle::{Grid, Obstacle, ObstacleMap};
use crate::domain::vector::Vector;
use crate::error::Result;

use super::event::GameEvent;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Status {
    Won,
    Lost,
}

/// What the player touched: terrain or another actor's kind.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Touch {
    Obstacle(Obstacle),
    Actor(ActorKind),
}

impl Touch {
    pub fn as_str(self) -> &'static str {
        match self {
            Touch::Obstacle(o) => o.as_str(),
            Touch::Actor(k) => k.as_str(),
        }
    }

    fn is_lethal(self) -> bool {
        match self {
            Touch::Obstacle(o) => o.is_lethal(),
            Touch::Actor(k) => k == ActorKind::Fireball,
        }
    }
}

impl From<Obstacle> for Touch {
    fn from(o: Obstacle) -> Self {
        Touch::Obstacle(o)
    }
}

impl From<ActorKind> for Touch {
    fn from(k: ActorKind) -> Self {
        Touch::Actor(k)
    }
}

#[derive(Clone, Debug)]
pub struct Level {
    grid: Grid,
    actors: Vec<Actor>,
    player: Option<ActorId>,
    status: Option<Status>,
    pub finish_delay: f64,
}

impl Level {
    /// Build a level. The player is the first actor of kind `Player`.
    pub fn new(grid: Grid, actors: Vec<Actor>) -> Self {
        let player = actors.iter().find(|a| a.kind() == ActorKind::Player).map(Actor::id);
        log::debug!(
            "level {}x{} with {} actors (player: {})",
            grid.width(),
            grid.height(),
            actors.len(),
            player.is_some(),
        );
        Level {
            grid,
            actors,
            player,
            status: None,
            finish_delay: LevelConfig::default().finish_delay,
        }
    }

    pub fn with_finish_delay(mut self, finish_delay: f64) -> Self {
        self.finish_delay = finish_delay;
        self
    }

    // ── Queries ──

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    /// Longest grid row; rows may be jagged.
    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn status(&self) -> Option<Status> {
        self.status
    }

    pub fn player(&self) -> Option<&Actor> {
        let id = self.player?;
        self.actors.iter().find(|a| a.id() == id)
    }

    pub fn player_mut(&mut self) -> Option<&mut Actor> {
        let id = self.player?;
        self.actors.iter_mut().find(|a| a.id() == id)
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_some() && self.finish_delay < 0.0
    }

    /// First actor in list order that overlaps `actor`.
    pub fn actor_at(&self, actor: &Actor) -> Option<&Actor> {
        self.actors.iter().find(|a| a.is_intersect(actor))
    }

    /// See `Grid::obstacle_at`.
    pub fn obstacle_at(&self, pos: Vector, size: Vector) -> Result<Option<Obstacle>> {
        self.grid.obstacle_at(pos, size)
    }

    pub fn no_more_actors(&self, kind: ActorKind) -> bool {
        !self.actors.iter().any(|a| a.kind() == kind)
    }

    // ── Mutation ──

    pub fn add_actor(&mut self, actor: Actor) {
        self.actors.push(actor);
    }

    /// Remove by identity. Returns the removed actor, if it was present.
    pub fn remove_actor(&mut self, id: ActorId) -> Option<Actor> {
        let idx = self.actors.iter().position(|a| a.id() == id)?;
        let removed = self.actors.remove(idx);
        log::debug!("removed {} {:?}", removed.kind().as_str(), id);
        Some(removed)
    }

    /// Apply a player touch.
    ///
    /// Ignored once the status is set. Lava or a fireball loses the level.
    /// A coin is removed (`actor` names which one); collecting the last coin
    /// wins. Anything else has no effect.
    pub fn player_touched(&mut self, touch: impl Into<Touch>, actor: Option<ActorId>) -> Vec<GameEvent> {
        let touch = touch.into();
        let mut events = Vec::new();
        if self.status.is_some() {
            return events;
        }

        if touch.is_lethal() {
            self.set_status(Status::Lost);
            events.push(GameEvent::PlayerKilled { by: touch });
            return events;
        }

        if touch == Touch::Actor(ActorKind::Coin) {
            if let Some(removed) = actor.and_then(|id| self.remove_actor(id)) {
                events.push(GameEvent::CoinCollected { id: removed.id() });
            }
            if self.no_more_actors(ActorKind::Coin) {
                self.set_status(Status::Won);
                events.push(GameEvent::AllCoinsCollected);
            }
        }
        events
    }

    fn set_status(&mut self, status: Status) {
        log::info!("level {:?}", status);
        self.status = Some(status);
    }

    /// One tick of actor behavior, in list order. Actors see the grid, never each other.
    ///
    /// All or nothing: the tick runs on a copy of the actor list, which
    /// replaces the live one only if every actor succeeded. On error the
    /// level is exactly as it was before the call.
    pub fn act(&mut self, time: f64) -> Result<()> {
        let mut next = self.actors.clone();
        for actor in next.iter_mut() {
            actor.act(time, &self.grid)?;
        }
        self.actors = next;
        Ok(())
    }
}

impl Default for Level {
    fn default() -> Self {
        Level::new(Grid::default(), Vec::new())
    }
}

impl ObstacleMap for Level {
    fn obstacle_at(&self, pos: Vector, size: Vector) -> Result<Option<Obstacle>> {
        self.grid.obstacle_at(pos, size)
    }
}

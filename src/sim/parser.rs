//! Level parser: ASCII schematic → live `Level`.
//!
//! ## Format
//!
//! One line per grid row; rows may differ in length. Each character is read
//! twice, by two independent passes:
//!   - terrain pass: `x` = wall, `!` = lava, anything else open
//!   - actor pass:   looked up in the symbol dictionary; a hit spawns one
//!                   actor at `(col, row)`, a miss is skipped silently
//!
//! ## Standard dictionary
//!   '@' = Player                 'o' = Coin
//!   '=' = Horizontal fireball    '|' = Vertical fireball
//!   'v' = Fire rain

use std::collections::HashMap;

use crate::config::EngineConfig;
use crate::domain::actor::Actor;
use crate::domain::obstacle::{Grid, Obstacle};
use crate::domain::vector::Vector;
use crate::error::Result;

use super::level::Level;

/// Builds an actor from its spawn cell.
pub type ActorFactory = Box<dyn Fn(Vector) -> Result<Actor>>;

pub struct LevelParser {
    dictionary: HashMap<char, ActorFactory>,
    finish_delay: f64,
}

impl Default for LevelParser {
    fn default() -> Self {
        LevelParser::new(HashMap::new())
    }
}

impl LevelParser {
    pub fn new(dictionary: HashMap<char, ActorFactory>) -> Self {
        LevelParser {
            dictionary,
            finish_delay: EngineConfig::default().level.finish_delay,
        }
    }

    /// Standard dictionary and finish delay, tuned by `config`.
    pub fn from_config(config: &EngineConfig) -> Self {
        LevelParser {
            dictionary: standard_dictionary(config),
            finish_delay: config.level.finish_delay,
        }
    }

    /// Register (or replace) the factory for `symbol`.
    pub fn with_symbol<F>(mut self, symbol: char, factory: F) -> Self
    where
        F: Fn(Vector) -> Result<Actor> + 'static,
    {
        self.dictionary.insert(symbol, Box::new(factory));
        self
    }

    pub fn actor_from_symbol(&self, symbol: char) -> Option<&ActorFactory> {
        self.dictionary.get(&symbol)
    }

    pub fn obstacle_from_symbol(&self, symbol: char) -> Option<Obstacle> {
        Obstacle::from_symbol(symbol)
    }

    pub fn create_grid<S: AsRef<str>>(&self, lines: &[S]) -> Grid {
        Grid::new(
            lines
                .iter()
                .map(|line| line.as_ref().chars().map(|ch| self.obstacle_from_symbol(ch)).collect())
                .collect(),
        )
    }

    /// Spawn one actor per dictionary symbol, in row-major order.
    /// A factory that fails is skipped (with a warning), like an unknown symbol.
    pub fn create_actors<S: AsRef<str>>(&self, lines: &[S]) -> Vec<Actor> {
        let mut actors = Vec::new();
        for (row, line) in lines.iter().enumerate() {
            for (col, ch) in line.as_ref().chars().enumerate() {
                let Some(factory) = self.actor_from_symbol(ch) else { continue };
                match factory(Vector::new(col as f64, row as f64)) {
                    Ok(actor) => actors.push(actor),
                    Err(e) => log::warn!("skipping '{ch}' at ({col}, {row}): {e}"),
                }
            }
        }
        actors
    }

    pub fn parse<S: AsRef<str>>(&self, lines: &[S]) -> Level {
        Level::new(self.create_grid(lines), self.create_actors(lines))
            .with_finish_delay(self.finish_delay)
    }

    /// Parse a whole level text. Trailing blank lines are dropped.
    pub fn parse_str(&self, text: &str) -> Level {
        let mut lines: Vec<&str> = text.lines().collect();
        while lines.last().map_or(false, |l| l.trim().is_empty()) {
            lines.pop();
        }
        self.parse(&lines)
    }
}

/// The symbol set used by the stock levels.
pub fn standard_dictionary(config: &EngineConfig) -> HashMap<char, ActorFactory> {
    let coin = config.coin.clone();
    let fb = &config.fireball;

    let mut dict: HashMap<char, ActorFactory> = HashMap::new();
    dict.insert('@', Box::new(Actor::player));
    dict.insert(
        'o',
        Box::new(move |pos| Actor::coin_with_rng(pos, &coin, &mut rand::thread_rng())),
    );
    let horizontal = Vector::new(fb.horizontal_speed, 0.0);
    dict.insert('=', Box::new(move |pos| Actor::fireball(pos, horizontal)));
    let vertical = Vector::new(0.0, fb.vertical_speed);
    dict.insert('|', Box::new(move |pos| Actor::fireball(pos, vertical)));
    let rain = Vector::new(0.0, fb.rain_speed);
    dict.insert('v', Box::new(move |pos| Actor::fire_rain_with_speed(pos, rain)));
    dict
}

//! Lava Run: tile-grid platformer simulation kernel.
//!
//! - `domain`: vectors, terrain grid, actors
//! - `sim`: the live level, its touch events, and the ASCII level parser
//! - `config`: tunables loaded from `lavarun.toml`
//!
//! Rendering, input and the frame loop are left to the caller.

pub mod config;
pub mod domain;
pub mod error;
pub mod sim;

pub use config::EngineConfig;
pub use domain::actor::{Actor, ActorConfig, ActorId, ActorKind, Motion};
pub use domain::obstacle::{Grid, Obstacle, ObstacleMap};
pub use domain::vector::Vector;
pub use error::{ConfigError, KernelError};
pub use sim::event::GameEvent;
pub use sim::level::{Level, Status, Touch};
pub use sim::parser::{standard_dictionary, ActorFactory, LevelParser};

//! Events emitted when the player touches something.
//! The presentation layer consumes these for animation/sound.

use super::level::Touch;
use crate::domain::actor::ActorId;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GameEvent {
    CoinCollected { id: ActorId },
    AllCoinsCollected,
    PlayerKilled { by: Touch },
}

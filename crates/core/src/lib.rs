//! Simulation core for a small top-down horror game.
//! Holds all rules and state; rendering, audio, and the save file live in
//! the frontend crate. The only inputs are sampled frames, the only outputs
//! are state to draw, cues to play, and save requests to fulfill.

pub mod content;
pub mod dialogue;
pub mod fx;
pub mod game;
pub mod rng;
pub mod state;
pub mod types;

pub use content::ContentPack;
pub use game::{BattlePhase, BattleState, Mode, Session};
pub use state::{Snapshot, WorldState};
pub use types::{Cue, Dir, InputFrame, LogEvent, Pos, RestoreError};

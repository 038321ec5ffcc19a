//! Sky Assault: a stage-based vertical shooter.
//!
//! The library is the whole simulation and knows nothing about terminals.
//! A host owns a `compute::Game`, feeds it one `InputState` and a frame delta
//! per display frame, and receives a HUD snapshot, draw calls through
//! `render::Surface`, and a queue of `events::GameEvent`s.
//!
//! Module map:
//! * `entities`: the `Entity` contract and every simulated object
//! * `collision`: circle overlap passes between entity collections
//! * `weapon`: fire-hold escalation and volley patterns
//! * `effects`: timed pickup effects and the modifiers they drive
//! * `director`: regular enemy spawning
//! * `boss`: boss spawn rule, movement, phases and abilities
//! * `stage`: the stage table and progression tracker
//! * `progression`: experience and level bonuses
//! * `compute`: the `Game` context, state machine and per-frame tick

pub mod boss;
pub mod collision;
pub mod compute;
pub mod config;
pub mod director;
pub mod effects;
pub mod entities;
pub mod error;
pub mod events;
pub mod hud;
pub mod input;
pub mod progression;
pub mod render;
pub mod rng;
pub mod stage;
pub mod weapon;

pub use compute::{Game, GameStatus};
pub use config::GameConfig;
pub use input::InputState;
pub use rng::{RandomSource, ScriptedRandom};

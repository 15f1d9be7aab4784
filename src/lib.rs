//! # d20-core-view
//!
//! Core roll sequencing and display library for d20 dice roller apps.
//!
//! This crate provides platform-agnostic data structures and logic for:
//! - Running an animated d20 roll (15 cosmetic draws, 80 ms apart, then a final draw)
//! - Classifying the result as critical hit, critical miss or a plain value
//! - Publishing every state change to presenters
//! - Building a view model of the roller screen
//!
//! ## Features
//!
//! - `serde` - Enable serialization/deserialization for data structures
//! - `toml` - Load [`RollerDetails`] from TOML
//! - `cli` - Build the `d20` terminal roller
//!
//! ## Example
//!
//! ```rust,ignore
//! use d20_core_view::{RollSequencer, RenderConfig};
//! use d20_core_view::render::render_screen;
//!
//! let sequencer = RollSequencer::new();
//! let config = RenderConfig::default();
//! sequencer.add_observer(move |state: &d20_core_view::RollState| {
//!     println!("{}", render_screen(state, &config).to_plain());
//! });
//!
//! sequencer.start_roll();
//! sequencer.wait_idle().await;
//! ```

mod animation;
pub mod color;
mod config;
mod error;
mod face;
mod outcome;
mod random;
pub mod render;
mod sequencer;
mod state;

pub use animation::{RollAnimation, RollPhase, Tick, ANIMATION_DELAY_MS, ANIMATION_ITERATIONS};
pub use config::{RollerConfig, RollerDetails};
pub use error::ConfigError;
pub use face::{Face, MAX_DICE_VALUE, MIN_DICE_VALUE};
pub use outcome::{MessageSet, RollOutcome};
pub use random::{DiceSource, RngDice, ScriptedDice};
pub use render::{RenderConfig, ScreenView};
pub use sequencer::{RollObserver, RollSequencer};
pub use state::RollState;

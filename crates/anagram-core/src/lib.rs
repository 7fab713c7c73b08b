//! # anagram-core
//!
//! Format-agnostic control core for the Anagram MIDI Control plugin.
//!
//! The crate owns the deterministic mapping between a fixed set of
//! automatable parameters / discrete user actions and the Control Change /
//! Program Change messages the Anagram hardware understands, plus the
//! per-block drain that emits them. It has no external dependencies and no
//! knowledge of any plugin ABI; the host-facing layer lives in
//! `anagram-control`.
//!
//! ## Main Types
//!
//! - [`ParamBank`] - current values and dirty flags for the parameter surface
//! - [`PendingActions`] - single-slot queues for bank/preset/scene/mode/tuner
//! - [`EmissionPass`] - the once-per-block dirty-state drain
//! - [`MidiQueue`] - bounded outbound event queue implementing [`MidiSink`]

pub mod actions;
pub mod emit;
pub mod error;
pub mod midi;
pub mod params;

// Re-exports for convenience
pub use actions::{ActionKind, PendingActions};
pub use emit::{EmissionPass, InvalidScenePolicy};
pub use error::{PluginError, PluginResult};
pub use midi::{cc, MidiEvent, MidiMessage, MidiQueue, MidiSink, MAX_MIDI_EVENTS};
pub use params::{
    controller_for, default_value, ParamBank, ParamKind, ALLOWED_CCS, EXP_PEDAL, FIRST_FOOT,
    FIRST_GENERIC, FIRST_POT, FOOT_COUNT, PARAM_COUNT, POT_COUNT,
};

//! # anagram-control
//!
//! Host-facing layer of the Anagram MIDI Control plugin: plugin identity,
//! the automatable parameter surface, the state key protocol, and the
//! per-block processing lifecycle. The mapping and queueing logic lives in
//! [`anagram_core`].
//!
//! A host wrapper drives exactly four entry points on [`AnagramControl`]:
//! `set_parameter`/`parameter` for automation, `set_state` for UI actions,
//! `activate` on the transition into a running state, and `process` once
//! per block with an outbound [`MidiSink`](anagram_core::MidiSink).

pub mod config;
pub mod plugin;
pub mod surface;

pub use config::PluginConfig;
pub use plugin::{state_key, AnagramControl};
pub use surface::{descriptor, descriptors, ParamDescriptor};

/// Plugin identity exported to host wrappers.
pub static CONFIG: PluginConfig = PluginConfig::new("Anagram MIDI Control", "AnagramMIDIControl")
    .with_vendor("Anagram MIDI Control developers")
    .with_url("https://github.com/anagram-midi/anagram-control")
    .with_version(env!("CARGO_PKG_VERSION"))
    .with_description("Controls the Anagram device's functions through MIDI");

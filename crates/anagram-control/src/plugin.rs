//! The Anagram MIDI Control plugin.
//!
//! Thin glue between the host wrapper and `anagram-core`: the host routes
//! parameter automation to [`AnagramControl::set_parameter`], UI state keys
//! to [`AnagramControl::set_state`], the activation transition to
//! [`AnagramControl::activate`], and calls [`AnagramControl::process`] once
//! per block with the inbound events and the outbound sink.
//!
//! All entry points take `&self`: the core state is atomic, and the host may
//! call the update methods from a non-realtime thread while the audio thread
//! is inside `process`.

use anagram_core::{
    ActionKind, EmissionPass, InvalidScenePolicy, MidiEvent, MidiSink, ParamBank, PendingActions,
    PluginError, PluginResult, PARAM_COUNT,
};

/// State keys accepted by [`AnagramControl::set_state`].
pub mod state_key {
    /// Bank preloading ("+", "-", or an absolute 0-based index).
    pub const BANK: &str = "bank";
    /// Preset selection ("+", "-", or an absolute 0-based program).
    pub const PRESET: &str = "preset";
    /// Scene selection ("0".."3", "+", "-").
    pub const SCENE: &str = "scene";
    /// Mode switch ("1".."3").
    pub const MODE: &str = "mode";
    /// Tuner trigger (value ignored).
    pub const TUNER: &str = "tuner";
}

/// The plugin: parameter bank, pending actions, and the emission pass.
#[derive(Debug, Default)]
pub struct AnagramControl {
    params: ParamBank,
    actions: PendingActions,
    pass: EmissionPass,
}

impl AnagramControl {
    /// Create a plugin with default parameter values and no pending actions.
    pub fn new() -> Self {
        Self {
            params: ParamBank::new(),
            actions: PendingActions::new(),
            pass: EmissionPass::new(),
        }
    }

    /// Override the invalid-scene policy (defaults to
    /// [`InvalidScenePolicy::Preserve`]).
    pub fn with_invalid_scene(mut self, policy: InvalidScenePolicy) -> Self {
        self.pass = self.pass.with_invalid_scene(policy);
        self
    }

    // =========================================================================
    // Parameter surface
    // =========================================================================

    /// Host parameter write. May be called from any context, including
    /// realtime; never panics, out-of-range indices no-op.
    #[inline]
    pub fn set_parameter(&self, index: usize, value: f32) {
        self.params.set(index, value);
    }

    /// Host parameter read. Returns 0.0 for an out-of-range index.
    #[inline]
    pub fn parameter(&self, index: usize) -> f32 {
        self.params.get(index)
    }

    // =========================================================================
    // State key protocol
    // =========================================================================

    /// UI/host state change. Known keys queue the matching action; unknown
    /// keys are ignored.
    pub fn set_state(&self, key: &str, value: &str) {
        let kind = match key {
            state_key::BANK => ActionKind::Bank,
            state_key::PRESET => ActionKind::Preset,
            state_key::SCENE => ActionKind::Scene,
            state_key::MODE => ActionKind::Mode,
            state_key::TUNER => ActionKind::Tuner,
            _ => {
                log::warn!("ignoring unknown state key {:?}", key);
                return;
            }
        };

        log::debug!("state change {:?} = {:?}", key, value);
        self.actions.request(kind, value);
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Host activation transition. Drops all pending actions and dirty
    /// flags; parameter values are kept.
    pub fn activate(&self) {
        log::debug!("activate: resetting pending state");
        self.actions.reset();
        self.params.clear_dirty();
    }

    /// Per-block processing.
    ///
    /// Inbound MIDI is received but not interpreted. Returns the number of
    /// events the sink accepted; everything the sink refused stays dirty
    /// for the next block.
    pub fn process(&self, inbound: &[MidiEvent], sink: &mut dyn MidiSink) -> usize {
        let _ = inbound;
        self.pass.run(&self.actions, &self.params, sink)
    }

    // =========================================================================
    // Host-managed state
    // =========================================================================

    /// Serialize parameter values for the host's project/preset state.
    ///
    /// One byte per parameter, in index order.
    pub fn save_state(&self) -> PluginResult<Vec<u8>> {
        Ok((0..PARAM_COUNT)
            .map(|index| self.parameter(index) as u8)
            .collect())
    }

    /// Restore parameter values from a previous [`save_state`] blob.
    ///
    /// Restored parameters are marked dirty so the next block re-syncs the
    /// hardware.
    ///
    /// [`save_state`]: Self::save_state
    pub fn load_state(&self, data: &[u8]) -> PluginResult<()> {
        if data.len() != PARAM_COUNT {
            return Err(PluginError::StateError(format!(
                "expected {} parameter bytes, got {}",
                PARAM_COUNT,
                data.len()
            )));
        }

        for (index, &value) in data.iter().enumerate() {
            self.set_parameter(index, value as f32);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anagram_core::{cc, MidiMessage, MidiQueue, EXP_PEDAL};

    fn cc_event(controller: u8, value: u8) -> MidiEvent {
        MidiEvent::at_block_start(MidiMessage::control_change(controller, value))
    }

    #[test]
    fn test_state_keys_route_to_actions() {
        let plugin = AnagramControl::new();
        let mut queue = MidiQueue::new();

        plugin.set_state("scene", "2");
        plugin.process(&[], &mut queue);
        assert_eq!(queue.as_slice(), &[cc_event(cc::SCENE_SET, 2)]);

        queue.clear();
        plugin.set_state("tuner", "");
        plugin.process(&[], &mut queue);
        assert_eq!(queue.as_slice(), &[cc_event(cc::TUNER, 0)]);
    }

    #[test]
    fn test_unknown_state_key_is_ignored() {
        let plugin = AnagramControl::new();
        let mut queue = MidiQueue::new();

        plugin.set_state("volume", "100");
        plugin.process(&[], &mut queue);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_automation_emits_on_next_block() {
        let plugin = AnagramControl::new();
        let mut queue = MidiQueue::new();

        plugin.set_parameter(0, 100.0);
        plugin.set_parameter(EXP_PEDAL, 64.0);
        assert_eq!(plugin.parameter(0), 100.0);

        let written = plugin.process(&[], &mut queue);
        assert_eq!(written, 2);
        assert_eq!(queue.as_slice(), &[cc_event(20, 100), cc_event(89, 64)]);

        // Nothing left dirty: a second block is silent.
        queue.clear();
        assert_eq!(plugin.process(&[], &mut queue), 0);
    }

    #[test]
    fn test_activate_drops_pending_state() {
        let plugin = AnagramControl::new();
        let mut queue = MidiQueue::new();

        plugin.set_parameter(2, 90.0);
        plugin.set_state("bank", "+");

        plugin.activate();
        assert_eq!(plugin.process(&[], &mut queue), 0);
        assert!(queue.is_empty());
        // Values survive the reset.
        assert_eq!(plugin.parameter(2), 90.0);
    }

    #[test]
    fn test_inbound_midi_is_not_interpreted() {
        let plugin = AnagramControl::new();
        let mut queue = MidiQueue::new();

        let inbound = [cc_event(20, 55), cc_event(102, 3)];
        assert_eq!(plugin.process(&inbound, &mut queue), 0);
        assert!(queue.is_empty());
        assert_eq!(plugin.parameter(0), 63.0);
    }

    #[test]
    fn test_state_roundtrip() {
        let plugin = AnagramControl::new();
        plugin.set_parameter(0, 12.0);
        plugin.set_parameter(EXP_PEDAL, 99.0);

        let blob = plugin.save_state().unwrap();
        assert_eq!(blob.len(), PARAM_COUNT);

        let restored = AnagramControl::new();
        restored.load_state(&blob).unwrap();
        assert_eq!(restored.parameter(0), 12.0);
        assert_eq!(restored.parameter(EXP_PEDAL), 99.0);

        // Restored values are dirty: the next block syncs the device.
        let mut queue = MidiQueue::new();
        assert_eq!(restored.process(&[], &mut queue), PARAM_COUNT);
    }

    #[test]
    fn test_load_state_rejects_wrong_length() {
        let plugin = AnagramControl::new();
        let err = plugin.load_state(&[0u8; 3]).unwrap_err();
        assert!(matches!(err, PluginError::StateError(_)));
    }

    #[test]
    fn test_discard_policy_is_configurable() {
        let plugin = AnagramControl::new().with_invalid_scene(InvalidScenePolicy::Discard);
        let mut queue = MidiQueue::new();

        plugin.set_state("scene", "9");
        assert_eq!(plugin.process(&[], &mut queue), 0);

        // Discarded: a valid scene afterwards is the only event.
        plugin.set_state("scene", "0");
        assert_eq!(plugin.process(&[], &mut queue), 1);
        assert_eq!(queue.as_slice(), &[cc_event(cc::SCENE_SET, 0)]);
    }
}

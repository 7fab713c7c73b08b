//! The per-block emission pass.
//!
//! Once per processing block the pass drains dirty actions, then dirty
//! parameters, translating each into exactly one outbound MIDI message. The
//! first refused write aborts the whole pass; everything still dirty is
//! retried from the top on the next block. There is no retry loop and no
//! explicit queue: a dirty flag plus its stored value is already a
//! deduplicating depth-1 queue.

use crate::actions::{ActionKind, PendingActions};
use crate::midi::{cc, MidiEvent, MidiMessage, MidiSink};
use crate::params::{controller_for, ParamBank, PARAM_COUNT};

// =============================================================================
// Configuration
// =============================================================================

/// What to do with a scene action whose payload is not `'0'..'3'`/`'+'`/`'-'`.
///
/// No event is ever emitted for such a payload; the policy only decides the
/// fate of its dirty flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InvalidScenePolicy {
    /// Leave the flag set. The slot is rescanned (and skipped) every block
    /// until a valid request overwrites it. This matches the original
    /// firmware-companion plugin.
    #[default]
    Preserve,
    /// Clear the flag and forget the payload.
    Discard,
}

// =============================================================================
// EmissionPass
// =============================================================================

/// Drains pending actions and parameters into a [`MidiSink`].
///
/// Actions go first, in the fixed order bank, preset, scene, mode, tuner;
/// parameters follow in index order. Dirty flags are cleared only after the
/// sink accepts the corresponding event, so a refused write leaves the exact
/// same dirty set for the next block.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmissionPass {
    invalid_scene: InvalidScenePolicy,
}

impl EmissionPass {
    /// Create a pass with the default (preserving) invalid-scene policy.
    pub const fn new() -> Self {
        Self {
            invalid_scene: InvalidScenePolicy::Preserve,
        }
    }

    /// Set the invalid-scene policy.
    pub const fn with_invalid_scene(mut self, policy: InvalidScenePolicy) -> Self {
        self.invalid_scene = policy;
        self
    }

    /// Run one pass. Returns the number of events the sink accepted.
    ///
    /// Real-time safe: no allocation, no locks, bounded by one event per
    /// dirty entry.
    pub fn run(
        &self,
        actions: &PendingActions,
        params: &ParamBank,
        sink: &mut dyn MidiSink,
    ) -> usize {
        let mut written = 0;

        for kind in ActionKind::ALL {
            if !actions.is_dirty(kind) {
                continue;
            }

            let message = match self.action_message(kind, actions.payload(kind)) {
                Some(message) => message,
                None => {
                    if self.invalid_scene == InvalidScenePolicy::Discard {
                        actions.mark_clean(kind);
                    }
                    continue;
                }
            };

            if !sink.try_write(MidiEvent::at_block_start(message)) {
                return written;
            }
            actions.mark_clean(kind);
            written += 1;
        }

        for index in 0..PARAM_COUNT {
            if !params.is_dirty(index) {
                continue;
            }

            let controller = match controller_for(index) {
                Some(controller) => controller,
                None => continue,
            };
            let message = MidiMessage::control_change(controller, params.value(index));

            if !sink.try_write(MidiEvent::at_block_start(message)) {
                return written;
            }
            params.mark_clean(index);
            written += 1;
        }

        written
    }

    /// Translate one action payload into its MIDI message.
    ///
    /// Returns `None` only for an invalid scene payload.
    fn action_message(&self, kind: ActionKind, payload: i8) -> Option<MidiMessage> {
        let message = match kind {
            ActionKind::Bank => match payload as u8 {
                b'+' => MidiMessage::control_change(cc::BANK_UP, 0),
                b'-' => MidiMessage::control_change(cc::BANK_DOWN, 0),
                // Absolute index, not reclamped: the requester keeps it in range.
                raw => MidiMessage::control_change(cc::BANK_SET, raw),
            },
            ActionKind::Preset => match payload as u8 {
                b'+' => MidiMessage::control_change(cc::PRESET_UP, 0),
                b'-' => MidiMessage::control_change(cc::PRESET_DOWN, 0),
                raw => MidiMessage::program_change(raw),
            },
            ActionKind::Scene => match payload as u8 {
                digit @ b'0'..=b'3' => MidiMessage::control_change(cc::SCENE_SET, digit - b'0'),
                b'+' => MidiMessage::control_change(cc::SCENE_UP, 0),
                b'-' => MidiMessage::control_change(cc::SCENE_DOWN, 0),
                _ => return None,
            },
            ActionKind::Mode => {
                let mode = (payload as i16 - b'1' as i16).clamp(0, 2) as u8;
                MidiMessage::control_change(cc::MODE, mode)
            }
            ActionKind::Tuner => MidiMessage::control_change(cc::TUNER, 0),
        };
        Some(message)
    }
}

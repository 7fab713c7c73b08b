//! Outbound MIDI types for the Anagram control protocol.
//!
//! The Anagram device is driven exclusively by Control Change and Program
//! Change messages, so these are the only event kinds modeled here. Values
//! are raw 7-bit MIDI bytes (0-127), not normalized floats - the device
//! protocol is specified in raw bytes and keeping them avoids a pointless
//! round-trip through floating point on the audio thread.
//!
//! All types are `Copy` and allocation-free, suitable for real-time use.

// =============================================================================
// Device Controller Numbers
// =============================================================================

/// Controller numbers understood by the Anagram hardware.
///
/// Navigation controllers come in triples: one absolute target plus a
/// relative up/down pair that carries no value.
pub mod cc {
    /// First foot switch (CC 17-19, one per switch).
    pub const FOOT_BASE: u8 = 17;
    /// First pot (CC 20-25, one per pot).
    pub const POT_BASE: u8 = 20;
    /// Mode select (value 0-2: preset, stomp, scene).
    pub const MODE: u8 = 85;
    /// Tuner trigger (value ignored by the device).
    pub const TUNER: u8 = 86;
    /// Expression pedal position.
    pub const EXPRESSION_PEDAL: u8 = 89;
    /// Absolute bank select (value = 0-based bank index).
    pub const BANK_SET: u8 = 102;
    /// Preload next bank.
    pub const BANK_UP: u8 = 103;
    /// Preload previous bank.
    pub const BANK_DOWN: u8 = 104;
    /// Next preset.
    pub const PRESET_UP: u8 = 105;
    /// Previous preset.
    pub const PRESET_DOWN: u8 = 106;
    /// Absolute scene select (value 0-3).
    pub const SCENE_SET: u8 = 107;
    /// Next scene.
    pub const SCENE_UP: u8 = 108;
    /// Previous scene.
    pub const SCENE_DOWN: u8 = 109;
}

// =============================================================================
// Messages and Events
// =============================================================================

/// A single outbound MIDI message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MidiMessage {
    /// Control Change (status 0xB0): controller number plus a 0-127 value.
    ControlChange {
        /// Controller number (0-127).
        controller: u8,
        /// Controller value (0-127).
        value: u8,
    },
    /// Program Change (status 0xC0): a single 0-127 program number.
    ProgramChange {
        /// Program number (0-127).
        program: u8,
    },
}

impl MidiMessage {
    /// Create a Control Change message.
    #[inline]
    pub const fn control_change(controller: u8, value: u8) -> Self {
        Self::ControlChange { controller, value }
    }

    /// Create a Program Change message.
    #[inline]
    pub const fn program_change(program: u8) -> Self {
        Self::ProgramChange { program }
    }

    /// MIDI status byte for this message (channel 1).
    #[inline]
    pub const fn status(&self) -> u8 {
        match self {
            Self::ControlChange { .. } => 0xB0,
            Self::ProgramChange { .. } => 0xC0,
        }
    }

    /// Encode into a raw MIDI byte buffer.
    ///
    /// Returns the number of bytes written: 3 for Control Change, 2 for
    /// Program Change.
    #[inline]
    pub fn to_bytes(&self, out: &mut [u8; 3]) -> usize {
        match *self {
            Self::ControlChange { controller, value } => {
                out[0] = 0xB0;
                out[1] = controller;
                out[2] = value;
                3
            }
            Self::ProgramChange { program } => {
                out[0] = 0xC0;
                out[1] = program;
                2
            }
        }
    }
}

/// A MIDI message tagged with its frame offset inside the current block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MidiEvent {
    /// Sample offset from the start of the block.
    pub frame: u32,
    /// The message to send.
    pub message: MidiMessage,
}

impl MidiEvent {
    /// Create an event at an explicit frame offset.
    #[inline]
    pub const fn new(frame: u32, message: MidiMessage) -> Self {
        Self { frame, message }
    }

    /// Create an event positioned at the start of the block.
    ///
    /// Everything the emission pass produces is timestamped at frame 0.
    #[inline]
    pub const fn at_block_start(message: MidiMessage) -> Self {
        Self { frame: 0, message }
    }
}

// =============================================================================
// Output Sink
// =============================================================================

/// Destination for outbound MIDI events with bounded per-block capacity.
///
/// `try_write` returns `false` when the sink cannot accept another event in
/// the current block. The emission pass treats that as backpressure: it stops
/// immediately and leaves everything still dirty for the next block.
pub trait MidiSink {
    /// Attempt to write one event. Returns `true` if accepted.
    fn try_write(&mut self, event: MidiEvent) -> bool;
}

/// Default capacity of [`MidiQueue`].
///
/// Generously above the worst case of one event per parameter and action.
pub const MAX_MIDI_EVENTS: usize = 64;

/// Fixed-capacity event queue backing one processing block.
///
/// The host wrapper drains this after each block. A failed write sets the
/// overflow flag and returns `false`, which is the backpressure signal the
/// emission pass stops on.
pub struct MidiQueue {
    events: [MidiEvent; MAX_MIDI_EVENTS],
    len: usize,
    /// Set to true when a write fails due to queue exhaustion.
    overflowed: bool,
}

impl MidiQueue {
    /// Create a new empty queue.
    pub fn new() -> Self {
        Self {
            events: [MidiEvent::at_block_start(MidiMessage::control_change(0, 0));
                MAX_MIDI_EVENTS],
            len: 0,
            overflowed: false,
        }
    }

    /// Remove all events and clear the overflow flag.
    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
        self.overflowed = false;
    }

    /// Number of queued events.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if no events are queued.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns true if any write failed since the last clear.
    #[inline]
    pub fn has_overflowed(&self) -> bool {
        self.overflowed
    }

    /// Queued events as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[MidiEvent] {
        &self.events[..self.len]
    }

    /// Iterate over queued events.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &MidiEvent> {
        self.events[..self.len].iter()
    }
}

impl Default for MidiQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl MidiSink for MidiQueue {
    #[inline]
    fn try_write(&mut self, event: MidiEvent) -> bool {
        if self.len < MAX_MIDI_EVENTS {
            self.events[self.len] = event;
            self.len += 1;
            true
        } else {
            self.overflowed = true;
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_change_bytes() {
        let mut buf = [0u8; 3];
        let msg = MidiMessage::control_change(cc::SCENE_SET, 2);
        assert_eq!(msg.to_bytes(&mut buf), 3);
        assert_eq!(buf, [0xB0, 107, 2]);
        assert_eq!(msg.status(), 0xB0);
    }

    #[test]
    fn test_program_change_bytes() {
        let mut buf = [0u8; 3];
        let msg = MidiMessage::program_change(12);
        assert_eq!(msg.to_bytes(&mut buf), 2);
        assert_eq!(&buf[..2], &[0xC0, 12]);
        assert_eq!(msg.status(), 0xC0);
    }

    #[test]
    fn test_queue_accepts_until_full() {
        let mut queue = MidiQueue::new();
        let event = MidiEvent::at_block_start(MidiMessage::control_change(cc::TUNER, 0));

        for _ in 0..MAX_MIDI_EVENTS {
            assert!(queue.try_write(event));
        }
        assert_eq!(queue.len(), MAX_MIDI_EVENTS);
        assert!(!queue.has_overflowed());

        assert!(!queue.try_write(event));
        assert!(queue.has_overflowed());
        assert_eq!(queue.len(), MAX_MIDI_EVENTS);

        queue.clear();
        assert!(queue.is_empty());
        assert!(!queue.has_overflowed());
    }

    #[test]
    fn test_events_are_block_aligned() {
        let event = MidiEvent::at_block_start(MidiMessage::program_change(3));
        assert_eq!(event.frame, 0);
    }
}

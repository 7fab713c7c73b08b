//! Pending discrete actions: bank/preset/scene navigation, mode, tuner.
//!
//! Each action is a single-slot, last-write-wins queue: one signed byte
//! payload plus a dirty flag. A request overwrites the payload and marks the
//! slot dirty; the per-block emission pass translates dirty slots into
//! exactly one MIDI message each and clears them on successful delivery.
//!
//! Payload encodings are action-specific. Requests never fail: an
//! unrecognized payload is stored as-is and dropped later at emission time.

use std::sync::atomic::{AtomicBool, AtomicI8, Ordering};

// =============================================================================
// Action Kinds
// =============================================================================

/// The discrete actions the device understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    /// Bank preloading. Payload: `'+'`/`'-'` for a relative step, otherwise
    /// an absolute 0-based bank index.
    Bank,
    /// Preset selection. Payload: `'+'`/`'-'` for a relative step, otherwise
    /// an absolute 0-based program number.
    Preset,
    /// Scene selection. Payload: `'0'..'3'` for an absolute scene, `'+'`/`'-'`
    /// for a relative step; anything else is invalid.
    Scene,
    /// Mode switch. Payload: `'1'..'3'` (preset, stomp, scene).
    Mode,
    /// Tuner trigger. Payload is ignored.
    Tuner,
}

impl ActionKind {
    /// All actions in emission priority order.
    pub const ALL: [ActionKind; 5] = [
        ActionKind::Bank,
        ActionKind::Preset,
        ActionKind::Scene,
        ActionKind::Mode,
        ActionKind::Tuner,
    ];

    /// Number of action kinds.
    pub const COUNT: usize = Self::ALL.len();

    /// Slot index of this action.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

// =============================================================================
// Payload Parsing
// =============================================================================

/// Parse a decimal payload the way C `atoi` would: skip leading whitespace,
/// accept an optional sign, stop at the first non-digit, zero on garbage.
fn parse_decimal(raw: &str) -> i8 {
    let mut bytes = raw.bytes().skip_while(|b| b.is_ascii_whitespace()).peekable();

    let negative = match bytes.peek() {
        Some(&b'-') => {
            bytes.next();
            true
        }
        Some(&b'+') => {
            bytes.next();
            false
        }
        _ => false,
    };

    let mut value: i32 = 0;
    for b in bytes {
        if !b.is_ascii_digit() {
            break;
        }
        value = value.saturating_mul(10).saturating_add((b - b'0') as i32);
    }

    if negative {
        value = -value;
    }
    value as i8
}

// =============================================================================
// PendingActions
// =============================================================================

/// One payload/dirty slot per action kind.
///
/// Shares the [`ParamBank`](crate::params::ParamBank) concurrency model:
/// small atomics, a Release store on the dirty flag paired with an Acquire
/// load in the emission pass, no locks.
pub struct PendingActions {
    /// Action-specific payload bytes.
    payloads: [AtomicI8; ActionKind::COUNT],
    /// Set on request, cleared by the emission pass on successful delivery.
    dirty: [AtomicBool; ActionKind::COUNT],
}

impl PendingActions {
    /// Create a table with all slots clean and zeroed.
    pub fn new() -> Self {
        Self {
            payloads: std::array::from_fn(|_| AtomicI8::new(0)),
            dirty: std::array::from_fn(|_| AtomicBool::new(false)),
        }
    }

    /// Store a request and mark the slot dirty.
    ///
    /// The raw value is interpreted per action kind (see [`ActionKind`]).
    /// This never fails: validation happens at emission time.
    pub fn request(&self, kind: ActionKind, raw: &str) {
        let slot = kind.index();

        match kind {
            ActionKind::Bank | ActionKind::Preset => {
                let payload = match raw.bytes().next() {
                    Some(b @ (b'+' | b'-')) => b as i8,
                    _ => parse_decimal(raw),
                };
                self.payloads[slot].store(payload, Ordering::Relaxed);
            }
            ActionKind::Scene | ActionKind::Mode => {
                let payload = raw.bytes().next().unwrap_or(0) as i8;
                self.payloads[slot].store(payload, Ordering::Relaxed);
            }
            // Only the dirty flag matters for the tuner.
            ActionKind::Tuner => {}
        }

        self.dirty[slot].store(true, Ordering::Release);
    }

    /// Current payload byte.
    #[inline]
    pub fn payload(&self, kind: ActionKind) -> i8 {
        self.payloads[kind.index()].load(Ordering::Relaxed)
    }

    /// Whether the action is pending emission.
    #[inline]
    pub fn is_dirty(&self, kind: ActionKind) -> bool {
        self.dirty[kind.index()].load(Ordering::Acquire)
    }

    /// Clear the dirty flag after successful emission (or an explicit drop).
    #[inline]
    pub fn mark_clean(&self, kind: ActionKind) {
        self.dirty[kind.index()].store(false, Ordering::Relaxed);
    }

    /// Zero all payloads and clear all dirty flags.
    ///
    /// Part of the activation reset.
    pub fn reset(&self) {
        for payload in &self.payloads {
            payload.store(0, Ordering::Relaxed);
        }
        for flag in &self.dirty {
            flag.store(false, Ordering::Relaxed);
        }
    }
}

impl Default for PendingActions {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for PendingActions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let pending: Vec<ActionKind> = ActionKind::ALL
            .into_iter()
            .filter(|&kind| self.is_dirty(kind))
            .collect();
        f.debug_struct("PendingActions")
            .field("pending", &pending)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_bank_stores_literal() {
        let actions = PendingActions::new();
        actions.request(ActionKind::Bank, "+");
        assert!(actions.is_dirty(ActionKind::Bank));
        assert_eq!(actions.payload(ActionKind::Bank), b'+' as i8);

        actions.request(ActionKind::Bank, "-");
        assert_eq!(actions.payload(ActionKind::Bank), b'-' as i8);
    }

    #[test]
    fn test_absolute_bank_parses_decimal() {
        let actions = PendingActions::new();
        actions.request(ActionKind::Bank, "17");
        assert_eq!(actions.payload(ActionKind::Bank), 17);

        actions.request(ActionKind::Preset, "0");
        assert_eq!(actions.payload(ActionKind::Preset), 0);

        actions.request(ActionKind::Preset, "not a number");
        assert_eq!(actions.payload(ActionKind::Preset), 0);
    }

    #[test]
    fn test_scene_and_mode_store_first_byte() {
        let actions = PendingActions::new();
        actions.request(ActionKind::Scene, "2");
        assert_eq!(actions.payload(ActionKind::Scene), b'2' as i8);

        actions.request(ActionKind::Scene, "9");
        assert_eq!(actions.payload(ActionKind::Scene), b'9' as i8);

        actions.request(ActionKind::Mode, "3");
        assert_eq!(actions.payload(ActionKind::Mode), b'3' as i8);
    }

    #[test]
    fn test_tuner_ignores_payload() {
        let actions = PendingActions::new();
        actions.request(ActionKind::Tuner, "whatever");
        assert!(actions.is_dirty(ActionKind::Tuner));
        assert_eq!(actions.payload(ActionKind::Tuner), 0);
    }

    #[test]
    fn test_last_write_wins() {
        let actions = PendingActions::new();
        actions.request(ActionKind::Preset, "5");
        actions.request(ActionKind::Preset, "+");
        assert_eq!(actions.payload(ActionKind::Preset), b'+' as i8);
    }

    #[test]
    fn test_reset_clears_payloads_and_flags() {
        let actions = PendingActions::new();
        actions.request(ActionKind::Bank, "+");
        actions.request(ActionKind::Tuner, "");

        actions.reset();
        for kind in ActionKind::ALL {
            assert!(!actions.is_dirty(kind));
            assert_eq!(actions.payload(kind), 0);
        }
    }

    #[test]
    fn test_parse_decimal_is_atoi_like() {
        assert_eq!(parse_decimal("42"), 42);
        assert_eq!(parse_decimal("  7"), 7);
        assert_eq!(parse_decimal("12abc"), 12);
        assert_eq!(parse_decimal(""), 0);
        assert_eq!(parse_decimal("abc"), 0);
    }
}

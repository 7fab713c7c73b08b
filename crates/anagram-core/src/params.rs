//! The automatable parameter bank.
//!
//! A fixed, ordered set of 0-127 integer parameters: six pots, three foot
//! switches, the expression pedal, and one generic slot per entry of
//! [`ALLOWED_CCS`]. Each slot pairs a current value with a dirty flag; the
//! per-block emission pass translates dirty slots into Control Change
//! messages and clears the flags on successful delivery.
//!
//! # Thread Safety
//!
//! The host may call [`ParamBank::set`] from a non-realtime thread while the
//! audio thread runs the emission pass, so values and dirty flags are small
//! atomics. No locks, no allocation after construction.

use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use crate::midi::cc;

// =============================================================================
// Index Layout
// =============================================================================

/// Number of pot parameters.
pub const POT_COUNT: usize = 6;

/// Number of foot switch parameters.
pub const FOOT_COUNT: usize = 3;

/// Controller numbers available to the generic CC slots.
///
/// Fixed for the process lifetime; entry order defines slot order and the
/// label shown by the host. None of these collide with the controllers the
/// device protocol reserves (17-25, 85, 86, 89, 102-109).
pub const ALLOWED_CCS: [u8; 10] = [1, 2, 4, 7, 11, 12, 13, 14, 15, 16];

/// Index of the first pot parameter.
pub const FIRST_POT: usize = 0;

/// Index of the first foot switch parameter.
pub const FIRST_FOOT: usize = FIRST_POT + POT_COUNT;

/// Index of the expression pedal parameter.
pub const EXP_PEDAL: usize = FIRST_FOOT + FOOT_COUNT;

/// Index of the first generic CC slot.
pub const FIRST_GENERIC: usize = EXP_PEDAL + 1;

/// Total number of parameters.
pub const PARAM_COUNT: usize = FIRST_GENERIC + ALLOWED_CCS.len();

/// Semantic kind of a parameter index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Continuous rotary control, default 63.
    Pot,
    /// Boolean-valued switch stored as 0/127.
    FootSwitch,
    /// Continuous expression pedal position.
    ExpressionPedal,
    /// Generic slot bound to one entry of [`ALLOWED_CCS`].
    GenericCc,
}

impl ParamKind {
    /// Kind of the parameter at `index`, or `None` when out of range.
    pub const fn of(index: usize) -> Option<Self> {
        if index < FIRST_FOOT {
            Some(Self::Pot)
        } else if index < EXP_PEDAL {
            Some(Self::FootSwitch)
        } else if index == EXP_PEDAL {
            Some(Self::ExpressionPedal)
        } else if index < PARAM_COUNT {
            Some(Self::GenericCc)
        } else {
            None
        }
    }
}

/// Default value for the parameter at `index` (63 for pots, 0 otherwise).
#[inline]
pub const fn default_value(index: usize) -> u8 {
    if index < FIRST_FOOT {
        63
    } else {
        0
    }
}

/// Controller number the parameter at `index` is emitted on.
///
/// Pots map to CC 20-25, foot switches to CC 17-19, the expression pedal to
/// CC 89, and generic slots to their allow-list entry. Returns `None` for an
/// out-of-range index.
pub const fn controller_for(index: usize) -> Option<u8> {
    if index < FIRST_FOOT {
        Some(cc::POT_BASE + index as u8)
    } else if index < EXP_PEDAL {
        Some(cc::FOOT_BASE + (index - FIRST_FOOT) as u8)
    } else if index == EXP_PEDAL {
        Some(cc::EXPRESSION_PEDAL)
    } else if index < PARAM_COUNT {
        Some(ALLOWED_CCS[index - FIRST_GENERIC])
    } else {
        None
    }
}

// =============================================================================
// ParamBank
// =============================================================================

/// Current values and dirty flags for every parameter.
///
/// All entry points absorb invalid indices silently (no-op sets, zero gets):
/// they may be called from a realtime context where panicking is not an
/// option.
pub struct ParamBank {
    /// Current values (0-127).
    values: [AtomicU8; PARAM_COUNT],
    /// Set on write, cleared by the emission pass on successful delivery.
    dirty: [AtomicBool; PARAM_COUNT],
}

impl ParamBank {
    /// Create a bank with every parameter at its default value and clean.
    pub fn new() -> Self {
        Self {
            values: std::array::from_fn(|i| AtomicU8::new(default_value(i))),
            dirty: std::array::from_fn(|_| AtomicBool::new(false)),
        }
    }

    /// Store a host-provided value and mark the parameter dirty.
    ///
    /// Rounds to the nearest integer and clamps to 0-127. Out-of-range
    /// indices are a silent no-op.
    pub fn set(&self, index: usize, value: f32) {
        if index >= PARAM_COUNT {
            return;
        }

        let clamped = value.round().clamp(0.0, 127.0) as u8;
        self.values[index].store(clamped, Ordering::Relaxed);
        // Release pairs with the Acquire in is_dirty so the emission pass
        // never observes the flag without the value stored above.
        self.dirty[index].store(true, Ordering::Release);
    }

    /// Current value as the host expects it. Returns 0.0 for an
    /// out-of-range index.
    #[inline]
    pub fn get(&self, index: usize) -> f32 {
        if index < PARAM_COUNT {
            self.values[index].load(Ordering::Relaxed) as f32
        } else {
            0.0
        }
    }

    /// Current raw value for emission. Returns 0 for an out-of-range index.
    #[inline]
    pub fn value(&self, index: usize) -> u8 {
        if index < PARAM_COUNT {
            self.values[index].load(Ordering::Relaxed)
        } else {
            0
        }
    }

    /// Whether the parameter has changed since it was last emitted.
    #[inline]
    pub fn is_dirty(&self, index: usize) -> bool {
        index < PARAM_COUNT && self.dirty[index].load(Ordering::Acquire)
    }

    /// Clear the dirty flag after successful emission.
    #[inline]
    pub fn mark_clean(&self, index: usize) {
        if index < PARAM_COUNT {
            self.dirty[index].store(false, Ordering::Relaxed);
        }
    }

    /// Clear every dirty flag, keeping current values.
    ///
    /// Part of the activation reset: nothing is re-emitted until the host
    /// writes again.
    pub fn clear_dirty(&self) {
        for flag in &self.dirty {
            flag.store(false, Ordering::Relaxed);
        }
    }
}

impl Default for ParamBank {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for ParamBank {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let dirty: Vec<usize> = (0..PARAM_COUNT).filter(|&i| self.is_dirty(i)).collect();
        f.debug_struct("ParamBank")
            .field("count", &PARAM_COUNT)
            .field("dirty", &dirty)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let bank = ParamBank::new();
        for i in FIRST_POT..FIRST_FOOT {
            assert_eq!(bank.get(i), 63.0);
        }
        for i in FIRST_FOOT..PARAM_COUNT {
            assert_eq!(bank.get(i), 0.0);
        }
        for i in 0..PARAM_COUNT {
            assert!(!bank.is_dirty(i));
        }
    }

    #[test]
    fn test_set_rounds_and_clamps() {
        let bank = ParamBank::new();

        bank.set(0, 99.6);
        assert_eq!(bank.get(0), 100.0);

        bank.set(0, 99.4);
        assert_eq!(bank.get(0), 99.0);

        bank.set(0, 300.0);
        assert_eq!(bank.get(0), 127.0);

        bank.set(0, -5.0);
        assert_eq!(bank.get(0), 0.0);
    }

    #[test]
    fn test_set_marks_dirty() {
        let bank = ParamBank::new();
        assert!(!bank.is_dirty(3));

        bank.set(3, 64.0);
        assert!(bank.is_dirty(3));

        bank.mark_clean(3);
        assert!(!bank.is_dirty(3));
        assert_eq!(bank.get(3), 64.0);
    }

    #[test]
    fn test_out_of_range_is_noop() {
        let bank = ParamBank::new();
        bank.set(PARAM_COUNT, 100.0);
        bank.set(usize::MAX, 100.0);
        assert_eq!(bank.get(PARAM_COUNT), 0.0);
        assert_eq!(bank.get(usize::MAX), 0.0);
        assert!(!bank.is_dirty(PARAM_COUNT));
    }

    #[test]
    fn test_clear_dirty_keeps_values() {
        let bank = ParamBank::new();
        bank.set(1, 90.0);
        bank.set(EXP_PEDAL, 40.0);

        bank.clear_dirty();
        assert!(!bank.is_dirty(1));
        assert!(!bank.is_dirty(EXP_PEDAL));
        assert_eq!(bank.get(1), 90.0);
        assert_eq!(bank.get(EXP_PEDAL), 40.0);
    }

    #[test]
    fn test_index_layout() {
        assert_eq!(PARAM_COUNT, 20);
        assert_eq!(ParamKind::of(0), Some(ParamKind::Pot));
        assert_eq!(ParamKind::of(FIRST_FOOT), Some(ParamKind::FootSwitch));
        assert_eq!(ParamKind::of(EXP_PEDAL), Some(ParamKind::ExpressionPedal));
        assert_eq!(ParamKind::of(FIRST_GENERIC), Some(ParamKind::GenericCc));
        assert_eq!(ParamKind::of(PARAM_COUNT), None);
    }

    #[test]
    fn test_controller_mapping() {
        assert_eq!(controller_for(0), Some(20));
        assert_eq!(controller_for(5), Some(25));
        assert_eq!(controller_for(FIRST_FOOT), Some(17));
        assert_eq!(controller_for(FIRST_FOOT + 2), Some(19));
        assert_eq!(controller_for(EXP_PEDAL), Some(89));
        for (slot, &ctrl) in ALLOWED_CCS.iter().enumerate() {
            assert_eq!(controller_for(FIRST_GENERIC + slot), Some(ctrl));
        }
        assert_eq!(controller_for(PARAM_COUNT), None);
    }
}

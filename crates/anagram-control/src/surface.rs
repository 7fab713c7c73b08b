//! The automatable parameter surface the host sees.
//!
//! One descriptor per [`anagram_core::params`] index: display name, short
//! symbol, 0-127 integer range, default, and a boolean hint for the foot
//! switches. Descriptors are built once at plugin construction (a
//! non-realtime context), so owned strings are fine here.

use anagram_core::params::{
    default_value, ParamKind, ALLOWED_CCS, FIRST_FOOT, FIRST_GENERIC, PARAM_COUNT,
};

/// Host-visible description of one parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamDescriptor {
    /// Display name (e.g. "Pot 1", "Exp.Pedal", "CC 11").
    pub name: String,
    /// Short symbol restricted to `_`, `a-z`, `0-9` (e.g. "pot1").
    pub symbol: String,
    /// Minimum value.
    pub min: u8,
    /// Maximum value.
    pub max: u8,
    /// Default value (63 for pots, 0 otherwise).
    pub default: u8,
    /// Whether the host should present the parameter as an on/off switch.
    pub is_boolean: bool,
    /// Whether the host may automate the parameter. Always true here.
    pub automatable: bool,
}

/// Descriptor for the parameter at `index`, or `None` when out of range.
pub fn descriptor(index: usize) -> Option<ParamDescriptor> {
    let kind = ParamKind::of(index)?;

    let (name, symbol) = match kind {
        ParamKind::Pot => {
            let n = index + 1;
            (format!("Pot {}", n), format!("pot{}", n))
        }
        ParamKind::FootSwitch => {
            let n = index - FIRST_FOOT + 1;
            (format!("Foot {}", n), format!("foot{}", n))
        }
        ParamKind::ExpressionPedal => ("Exp.Pedal".to_string(), "exp_pedal".to_string()),
        ParamKind::GenericCc => {
            let controller = ALLOWED_CCS[index - FIRST_GENERIC];
            (format!("CC {}", controller), format!("cc{}", controller))
        }
    };

    Some(ParamDescriptor {
        name,
        symbol,
        min: 0,
        max: 127,
        default: default_value(index),
        is_boolean: kind == ParamKind::FootSwitch,
        automatable: true,
    })
}

/// Descriptors for the whole surface, in index order.
pub fn descriptors() -> Vec<ParamDescriptor> {
    (0..PARAM_COUNT).filter_map(descriptor).collect()
}

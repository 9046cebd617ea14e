//! Precision rounding and the public snapshot view

use rust_decimal::{Decimal, RoundingStrategy};

use crate::state::{Projection, Snapshot};

/// Round `value` to `precision` decimal digits
///
/// Works on the exact decimal expansion of the float and rounds ties away from
/// zero, the way fixed-point number formatting does. The rounded text is parsed
/// back so the displayed value and the one used for arithmetic never drift apart.
pub fn round_to_precision(value: f64, precision: u32) -> f64 {
    match Decimal::from_f64_retain(value) {
        Some(exact) => exact
            .round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero)
            .to_string()
            .parse()
            .unwrap_or(value),
        None => value,
    }
}

/// Public view of a snapshot with its value rounded
pub fn project(snapshot: &Snapshot, precision: u32) -> Projection {
    Projection::new(snapshot.state, round_to_precision(snapshot.value, precision))
}

//! Currency amount conversion.
//!
//! The record store keeps appointment prices as decimal dollars; the billing
//! provider wants integer minor units (cents for USD). Conversion happens in
//! exactly one place so the truncation rule stays consistent.

/// Convert a decimal currency amount to integer minor units.
///
/// Fractions of a cent are truncated, not rounded: `12.5` → `1250`,
/// `10.999` → `1099`.
pub fn to_minor_units(amount: f64) -> i64 {
    (amount * 100.0).trunc() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_whole_and_fractional_dollars() {
        assert_eq!(to_minor_units(12.5), 1250);
        assert_eq!(to_minor_units(100.0), 10000);
        assert_eq!(to_minor_units(0.0), 0);
    }

    #[test]
    fn truncates_sub_cent_fractions() {
        assert_eq!(to_minor_units(10.999), 1099);
        assert_eq!(to_minor_units(0.009), 0);
    }
}

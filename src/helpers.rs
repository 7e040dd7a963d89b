use std::sync::LazyLock;

use regex::Regex;

use crate::config::MAX_DISPLAY_PRECISION;
use crate::error::DoseError;
use crate::models::{Dosage, LiquidConcentration, Volume, Weight};

/// Regex patterns for quantity parsing (compiled once via LazyLock).
static RE_QUANTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+(?:\.\d+)?|\.\d+)\s*([^\d\s].*?)$").unwrap());
static RE_CONCENTRATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(\d+(?:\.\d+)?|\.\d+)\s*([a-zµ]+)\s*(?:/|per)\s*(\d+(?:\.\d+)?|\.\d+)?\s*([a-z]+)$")
        .unwrap()
});

/// Split "22.5 lb" into its number and unit label.
fn split_quantity(input: &str) -> Result<(f64, &str), DoseError> {
    let unparseable = || DoseError::Unparseable {
        input: input.into(),
    };
    let caps = RE_QUANTITY.captures(input.trim()).ok_or_else(unparseable)?;
    let value = caps
        .get(1)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .ok_or_else(unparseable)?;
    let unit = caps.get(2).map(|m| m.as_str()).ok_or_else(unparseable)?;
    Ok((value, unit))
}

/// Parse a weight such as "22 lb", "3.5kg" or "800 g".
pub fn parse_weight(input: &str) -> Result<Weight, DoseError> {
    let (value, unit) = split_quantity(input)?;
    Weight::parse(value, unit)
}

/// Parse a dosage such as "5 mg/kg" or "10 mcg/kg".
pub fn parse_dosage(input: &str) -> Result<Dosage, DoseError> {
    let (value, unit) = split_quantity(input)?;
    Dosage::parse(value, unit)
}

/// Parse a liquid concentration such as "250 mg/5 mL", "250 mg per 5 mL"
/// or "50 mg/mL". A missing per-volume amount means 1.
pub fn parse_concentration(input: &str) -> Result<(LiquidConcentration, Volume), DoseError> {
    let unparseable = || DoseError::Unparseable {
        input: input.into(),
    };
    let caps = RE_CONCENTRATION
        .captures(input.trim())
        .ok_or_else(unparseable)?;

    let amount = caps
        .get(1)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .ok_or_else(unparseable)?;
    let mass_unit = caps.get(2).map(|m| m.as_str()).ok_or_else(unparseable)?;
    let volume = match caps.get(3) {
        Some(m) => m.as_str().parse::<f64>().map_err(|_| unparseable())?,
        None => 1.0,
    };
    let volume_unit = caps.get(4).map(|m| m.as_str()).ok_or_else(unparseable)?;

    Ok((
        LiquidConcentration::checked(amount, mass_unit.parse()?)?,
        Volume::checked(volume, volume_unit.parse()?)?,
    ))
}

/// Round half away from zero to `precision` decimal places.
///
/// Precision is clamped to `MAX_DISPLAY_PRECISION`. Values too large to scale
/// already have no fractional part and are returned as-is; non-finite input
/// becomes 0.
pub fn round_to(value: f64, precision: u32) -> f64 {
    let value = finite_or_zero(value);
    let factor = 10f64.powi(precision.min(MAX_DISPLAY_PRECISION) as i32);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    finite_or_zero(scaled.round() / factor)
}

/// Coerce NaN and infinities to zero.
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Format a quantity for display with a fixed number of decimals.
pub fn format_quantity(value: f64, precision: u32, unit: &str) -> String {
    format!("{:.*} {}", precision as usize, value, unit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DosageUnit, MassUnit, VolumeUnit, WeightUnit};

    #[test]
    fn parse_weight_variants() {
        assert_eq!(parse_weight("22 lb").unwrap(), Weight::new(22.0, WeightUnit::Lb));
        assert_eq!(parse_weight("3.5kg").unwrap(), Weight::new(3.5, WeightUnit::Kg));
        assert_eq!(parse_weight(" 800 grams ").unwrap(), Weight::new(800.0, WeightUnit::G));
        assert_eq!(parse_weight(".5 oz").unwrap(), Weight::new(0.5, WeightUnit::Oz));
    }

    #[test]
    fn parse_weight_errors() {
        assert!(matches!(parse_weight("heavy"), Err(DoseError::Unparseable { .. })));
        assert!(matches!(parse_weight("22"), Err(DoseError::Unparseable { .. })));
        assert!(matches!(parse_weight("22 stone"), Err(DoseError::InvalidUnit { .. })));
        assert!(parse_weight("").is_err());
    }

    #[test]
    fn parse_dosage_variants() {
        assert_eq!(parse_dosage("5 mg/kg").unwrap(), Dosage::new(5.0, DosageUnit::MgPerKg));
        assert_eq!(parse_dosage("10mcg/kg").unwrap(), Dosage::new(10.0, DosageUnit::McgPerKg));
        assert!(matches!(parse_dosage("5 mg/lb"), Err(DoseError::InvalidUnit { .. })));
    }

    #[test]
    fn parse_concentration_variants() {
        let (c, v) = parse_concentration("250 mg/5 mL").unwrap();
        assert_eq!(c, LiquidConcentration::new(250.0, MassUnit::Mg));
        assert_eq!(v, Volume::new(5.0, VolumeUnit::Ml));

        let (c, v) = parse_concentration("250 mg per 5 ml").unwrap();
        assert_eq!(c.value, 250.0);
        assert_eq!(v.unit, VolumeUnit::Ml);

        let (c, v) = parse_concentration("50 mg/mL").unwrap();
        assert_eq!(c.value, 50.0);
        assert_eq!(v, Volume::new(1.0, VolumeUnit::Ml));

        let (c, v) = parse_concentration("2 g/L").unwrap();
        assert_eq!(c.unit, MassUnit::G);
        assert_eq!(v.unit, VolumeUnit::L);
    }

    #[test]
    fn parse_concentration_errors() {
        assert!(matches!(parse_concentration("250 mg"), Err(DoseError::Unparseable { .. })));
        assert!(matches!(
            parse_concentration("250 mg/5 tsp"),
            Err(DoseError::InvalidUnit { .. })
        ));
        assert!(matches!(
            parse_concentration("250 kg/5 mL"),
            Err(DoseError::InvalidUnit { .. })
        ));
    }

    #[test]
    fn round_to_precision() {
        assert_eq!(round_to(1.25, 1), 1.3);
        assert_eq!(round_to(0.04, 1), 0.0);
        assert_eq!(round_to(33.3333, 2), 33.33);
        assert_eq!(round_to(7.6, 0), 8.0);
    }

    #[test]
    fn round_to_stays_finite_at_extremes() {
        assert_eq!(round_to(1e308, 1), 1e308);
        assert_eq!(round_to(f64::MAX, 6), f64::MAX);
        assert_eq!(round_to(1.23456789, 400), 1.234568);
        assert_eq!(round_to(f64::NAN, 1), 0.0);
        assert_eq!(round_to(f64::NEG_INFINITY, 1), 0.0);
    }

    #[test]
    fn finite_or_zero_coerces() {
        assert_eq!(finite_or_zero(f64::NAN), 0.0);
        assert_eq!(finite_or_zero(f64::INFINITY), 0.0);
        assert_eq!(finite_or_zero(-2.5), -2.5);
    }

    #[test]
    fn format_quantity_display() {
        assert_eq!(format_quantity(100.0, 1, "mg"), "100.0 mg");
        assert_eq!(format_quantity(1.04, 1, "mL"), "1.0 mL");
        assert_eq!(format_quantity(2.0, 0, "g"), "2 g");
    }
}

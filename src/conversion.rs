//! Conversion tables within a unit family.
//!
//! Each family is a total `(from, to)` lookup over its closed enum: the
//! match is exhaustive, so adding a unit without filling its row and column
//! fails to compile. Every cell is a plain `fn(f64) -> f64`; no rounding
//! happens here.

use crate::models::{MassUnit, VolumeUnit, WeightUnit};

// ═══════════════════════════════════════════════════════════
// Constants
// ═══════════════════════════════════════════════════════════

/// Defining weight factor. kg → lb uses its reciprocal (≈ 2.20462) so that
/// lb → kg → lb returns the input up to floating-point error.
pub const KG_PER_LB: f64 = 0.453592;
pub const OZ_PER_LB: f64 = 16.0;
pub const G_PER_KG: f64 = 1000.0;

pub const MG_PER_G: f64 = 1000.0;
pub const MCG_PER_MG: f64 = 1000.0;
pub const MCG_PER_G: f64 = 1_000_000.0;

pub const ML_PER_L: f64 = 1000.0;

/// A single cell of a conversion table.
pub type Converter = fn(f64) -> f64;

// ═══════════════════════════════════════════════════════════
// Weight: lb, kg, oz, g
// ═══════════════════════════════════════════════════════════

/// Look up the weight converter for `[from][to]`.
///
/// lb ↔ oz and kg ↔ g are direct; every other pair composes through kg.
pub fn weight_converter(from: WeightUnit, to: WeightUnit) -> Converter {
    use WeightUnit::*;
    match (from, to) {
        (Lb, Lb) | (Kg, Kg) | (Oz, Oz) | (G, G) => |v| v,

        (Lb, Kg) => |v| v * KG_PER_LB,
        (Lb, Oz) => |v| v * OZ_PER_LB,
        (Lb, G) => |v| v * KG_PER_LB * G_PER_KG,

        (Kg, Lb) => |v| v / KG_PER_LB,
        (Kg, Oz) => |v| v / KG_PER_LB * OZ_PER_LB,
        (Kg, G) => |v| v * G_PER_KG,

        (Oz, Lb) => |v| v / OZ_PER_LB,
        (Oz, Kg) => |v| v / OZ_PER_LB * KG_PER_LB,
        (Oz, G) => |v| v / OZ_PER_LB * KG_PER_LB * G_PER_KG,

        (G, Lb) => |v| v / G_PER_KG / KG_PER_LB,
        (G, Kg) => |v| v / G_PER_KG,
        (G, Oz) => |v| v / G_PER_KG / KG_PER_LB * OZ_PER_LB,
    }
}

pub fn convert_weight(value: f64, from: WeightUnit, to: WeightUnit) -> f64 {
    weight_converter(from, to)(value)
}

// ═══════════════════════════════════════════════════════════
// Liquid mass: mcg, mg, g
// ═══════════════════════════════════════════════════════════

/// Look up the mass converter for `[from][to]`.
pub fn mass_converter(from: MassUnit, to: MassUnit) -> Converter {
    use MassUnit::*;
    match (from, to) {
        (Mcg, Mcg) | (Mg, Mg) | (G, G) => |v| v,

        (G, Mg) => |v| v * MG_PER_G,
        (G, Mcg) => |v| v * MCG_PER_G,
        (Mg, Mcg) => |v| v * MCG_PER_MG,

        (Mg, G) => |v| v / MG_PER_G,
        (Mcg, G) => |v| v / MCG_PER_G,
        (Mcg, Mg) => |v| v / MCG_PER_MG,
    }
}

pub fn convert_mass(value: f64, from: MassUnit, to: MassUnit) -> f64 {
    mass_converter(from, to)(value)
}

// ═══════════════════════════════════════════════════════════
// Volume: mL, L
// ═══════════════════════════════════════════════════════════

/// Normalize a volume to millilitres.
pub fn volume_to_ml(value: f64, unit: VolumeUnit) -> f64 {
    match unit {
        VolumeUnit::L => value * ML_PER_L,
        VolumeUnit::Ml => value,
    }
}

pub fn convert_volume(value: f64, from: VolumeUnit, to: VolumeUnit) -> f64 {
    match (from, to) {
        (VolumeUnit::Ml, VolumeUnit::Ml) | (VolumeUnit::L, VolumeUnit::L) => value,
        (VolumeUnit::L, VolumeUnit::Ml) => value * ML_PER_L,
        (VolumeUnit::Ml, VolumeUnit::L) => value / ML_PER_L,
    }
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════


/// Property-based tests using proptest
#[cfg(test)]
mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    fn weight_unit() -> impl Strategy<Value = WeightUnit> {
        prop::sample::select(WeightUnit::ALL.to_vec())
    }

    fn mass_unit() -> impl Strategy<Value = MassUnit> {
        prop::sample::select(MassUnit::ALL.to_vec())
    }

    fn volume_unit() -> impl Strategy<Value = VolumeUnit> {
        prop::sample::select(VolumeUnit::ALL.to_vec())
    }

    fn relative_error(actual: f64, expected: f64) -> f64 {
        if expected == 0.0 {
            actual.abs()
        } else {
            ((actual - expected) / expected).abs()
        }
    }

    proptest! {
        /// A → B → A returns the original weight
        #[test]
        fn weight_round_trip(value in -1.0e6..1.0e6f64, a in weight_unit(), b in weight_unit()) {
            let back = convert_weight(convert_weight(value, a, b), b, a);
            prop_assert!(
                relative_error(back, value) < 1e-6,
                "{} {} -> {} -> {} gave {}", value, a, b, a, back
            );
        }

        /// A → B → A returns the original mass
        #[test]
        fn mass_round_trip(value in -1.0e6..1.0e6f64, a in mass_unit(), b in mass_unit()) {
            let back = convert_mass(convert_mass(value, a, b), b, a);
            prop_assert!(relative_error(back, value) < 1e-6);
        }

        #[test]
        fn volume_round_trip(value in 0.0..1.0e6f64, a in volume_unit(), b in volume_unit()) {
            let back = convert_volume(convert_volume(value, a, b), b, a);
            prop_assert!(relative_error(back, value) < 1e-6);
        }

        /// Same unit in and out is bit-identical
        #[test]
        fn identity_exact(value in proptest::num::f64::NORMAL, w in weight_unit(), m in mass_unit()) {
            prop_assert_eq!(convert_weight(value, w, w).to_bits(), value.to_bits());
            prop_assert_eq!(convert_mass(value, m, m).to_bits(), value.to_bits());
        }

        /// Every declared pair yields a finite number for finite input
        #[test]
        fn tables_are_total(
            value in -1.0e9..1.0e9f64,
            wa in weight_unit(),
            wb in weight_unit(),
            ma in mass_unit(),
            mb in mass_unit(),
        ) {
            prop_assert!(convert_weight(value, wa, wb).is_finite());
            prop_assert!(convert_mass(value, ma, mb).is_finite());
        }
    }
}

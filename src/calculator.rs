//! Weight-based and liquid dose calculation.

use crate::error::DoseError;
use crate::models::{Dosage, LiquidConcentration, Mass, Volume, Weight};

/// Total dose for a patient: `dosage × weight`, with weight normalized to the
/// dosage unit's denominator (kg).
///
/// The result is expressed in the dosage unit's mass numerator
/// (`dosage.unit.mass_unit()`); no unit is attached here.
pub fn calculate_dosage(dosage: &Dosage, weight: &Weight) -> f64 {
    let weight_in_target = weight.to(dosage.unit.weight_unit()).value;
    dosage.value * weight_in_target
}

/// Same as `calculate_dosage`, tagged with the dosage's numerator unit.
pub fn calculate_dosage_mass(dosage: &Dosage, weight: &Weight) -> Mass {
    Mass::new(calculate_dosage(dosage, weight), dosage.unit.mass_unit())
}

/// Volume of liquid formulation delivering `dose`, in millilitres.
///
/// `concentration` of drug is contained in `per_volume` of liquid, e.g.
/// 250 mg per 5 mL. The concentration is converted into the dose's mass unit
/// before dividing. A zero concentration is a `DivisionByZero` error rather
/// than an infinite volume.
pub fn calculate_liquid_dosage(
    dose: &Mass,
    concentration: &LiquidConcentration,
    per_volume: &Volume,
) -> Result<f64, DoseError> {
    let volume_in_ml = per_volume.in_ml();
    let converted_concentration = concentration.as_mass().to(dose.unit).value;

    if converted_concentration == 0.0 {
        return Err(DoseError::DivisionByZero {
            divisor: "concentration".into(),
        });
    }

    Ok(dose.value * volume_in_ml / converted_concentration)
}


/// Property-based tests using proptest
#[cfg(test)]
mod proptest_tests {
    use super::*;
    use crate::models::{DosageUnit, WeightUnit};
    use proptest::prelude::*;

    proptest! {
        /// Identical inputs give bit-identical output
        #[test]
        fn calculate_dosage_idempotent(
            dose in 0.0..1000.0f64,
            weight in 0.0..500.0f64,
            dosage_unit in prop::sample::select(DosageUnit::ALL.to_vec()),
            weight_unit in prop::sample::select(WeightUnit::ALL.to_vec()),
        ) {
            let dosage = Dosage::new(dose, dosage_unit);
            let weight = Weight::new(weight, weight_unit);
            prop_assert_eq!(
                calculate_dosage(&dosage, &weight).to_bits(),
                calculate_dosage(&dosage, &weight).to_bits()
            );
        }

        /// Dose scales linearly with weight in kg
        #[test]
        fn dose_is_dosage_times_kg(dose in 0.0..1000.0f64, kg in 0.0..500.0f64) {
            let dosage = Dosage::new(dose, DosageUnit::MgPerKg);
            let result = calculate_dosage(&dosage, &Weight::new(kg, WeightUnit::Kg));
            prop_assert_eq!(result, dose * kg);
        }
    }
}

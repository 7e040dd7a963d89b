//! Dispense pipeline: form inputs in, display quantities out.
//!
//! total dose → liquid dose → per-dose / per-course split → rounded display.
//! `try_calculate` is strict and reports the first problem as a `DoseError`.
//! `calculate` never fails: non-finite inputs and divisions by zero become 0
//! so an incomplete form always renders.

use serde::{Deserialize, Serialize};

use crate::calculator::{calculate_dosage_mass, calculate_liquid_dosage};
use crate::config::{CalculatorConfig, MAX_DISPLAY_PRECISION};
use crate::conversion::convert_volume;
use crate::error::{ensure_finite, DoseError};
use crate::frequency::{single_dose, total_quantity};
use crate::helpers::{finite_or_zero, format_quantity, round_to};
use crate::models::{
    Dosage, FrequencyMode, LiquidConcentration, MassUnit, Volume, VolumeUnit, Weight,
};

// ═══════════════════════════════════════════
// Request / result types
// ═══════════════════════════════════════════

/// Everything the dose calculator form collects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoseRequest {
    pub dosage: Dosage,
    pub weight: Weight,
    pub liquid_concentration: LiquidConcentration,
    pub per_volume: Volume,
    pub days_supply: f64,
    pub doses_per_day: f64,
    #[serde(default)]
    pub frequency_mode: FrequencyMode,
}

/// Unrounded results. Liquid amounts are in millilitres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoseQuantities {
    /// `dosage × weight`, before the frequency split.
    pub total_dose: f64,
    pub single_dose: f64,
    pub total_quantity: f64,
    pub single_liquid_dose_ml: f64,
    pub total_liquid_quantity_ml: f64,
    /// Mass unit of the solid quantities (the dosage numerator).
    pub dose_unit: MassUnit,
}

/// A rounded number with the unit label to show next to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayQuantity {
    pub value: f64,
    pub unit: String,
    #[serde(skip)]
    precision: u32,
}

impl DisplayQuantity {
    pub fn new(value: f64, unit: &str, precision: u32) -> Self {
        let precision = precision.min(MAX_DISPLAY_PRECISION);
        Self {
            value: round_to(finite_or_zero(value), precision),
            unit: unit.to_string(),
            precision,
        }
    }
}

impl std::fmt::Display for DisplayQuantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&format_quantity(self.value, self.precision, &self.unit))
    }
}

/// What the form shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DoseCalculation {
    pub single_dose: DisplayQuantity,
    pub total_quantity: DisplayQuantity,
    pub single_liquid_dose: DisplayQuantity,
    pub total_liquid_quantity: DisplayQuantity,
}

impl DoseCalculation {
    /// Round for display. Liquid amounts are expressed in `liquid_unit`.
    pub fn from_quantities(
        quantities: &DoseQuantities,
        liquid_unit: VolumeUnit,
        config: &CalculatorConfig,
    ) -> Self {
        let precision = config.precision();
        let dose_unit = quantities.dose_unit.as_str();
        let liquid = |ml: f64| convert_volume(ml, VolumeUnit::Ml, liquid_unit);

        Self {
            single_dose: DisplayQuantity::new(quantities.single_dose, dose_unit, precision),
            total_quantity: DisplayQuantity::new(quantities.total_quantity, dose_unit, precision),
            single_liquid_dose: DisplayQuantity::new(
                liquid(quantities.single_liquid_dose_ml),
                liquid_unit.as_str(),
                precision,
            ),
            total_liquid_quantity: DisplayQuantity::new(
                liquid(quantities.total_liquid_quantity_ml),
                liquid_unit.as_str(),
                precision,
            ),
        }
    }
}

// ═══════════════════════════════════════════
// Strict pipeline
// ═══════════════════════════════════════════

fn validate(request: &DoseRequest) -> Result<(), DoseError> {
    ensure_finite("dosage", request.dosage.value)?;
    ensure_finite("weight", request.weight.value)?;
    ensure_finite("concentration", request.liquid_concentration.value)?;
    ensure_finite("per volume", request.per_volume.value)?;
    ensure_finite("days supply", request.days_supply)?;
    ensure_finite("doses per day", request.doses_per_day)?;
    Ok(())
}

/// Strict calculation: any non-finite input or division by zero is an error.
pub fn try_calculate(request: &DoseRequest) -> Result<DoseQuantities, DoseError> {
    validate(request)?;
    tracing::debug!(
        dosage = %request.dosage,
        weight = %request.weight,
        mode = %request.frequency_mode,
        "Calculating dose"
    );

    let total = calculate_dosage_mass(&request.dosage, &request.weight);
    let single = single_dose(total.value, request.doses_per_day, request.frequency_mode)?;

    let liquid_ml = calculate_liquid_dosage(
        &total,
        &request.liquid_concentration,
        &request.per_volume,
    )?;
    let single_liquid_ml =
        single_dose(liquid_ml, request.doses_per_day, request.frequency_mode)?;

    Ok(DoseQuantities {
        total_dose: total.value,
        single_dose: single,
        total_quantity: total_quantity(single, request.days_supply, request.doses_per_day),
        single_liquid_dose_ml: single_liquid_ml,
        total_liquid_quantity_ml: total_quantity(
            single_liquid_ml,
            request.days_supply,
            request.doses_per_day,
        ),
        dose_unit: total.unit,
    })
}

// ═══════════════════════════════════════════
// Sanitized pipeline
// ═══════════════════════════════════════════

fn sanitize(field: &str, value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        tracing::warn!(field, value, "Non-finite input coerced to 0");
        0.0
    }
}

/// Replace every non-finite numeric input with 0.
pub fn sanitize_request(request: &DoseRequest) -> DoseRequest {
    DoseRequest {
        dosage: Dosage::new(sanitize("dosage", request.dosage.value), request.dosage.unit),
        weight: Weight::new(sanitize("weight", request.weight.value), request.weight.unit),
        liquid_concentration: LiquidConcentration::new(
            sanitize("concentration", request.liquid_concentration.value),
            request.liquid_concentration.unit,
        ),
        per_volume: Volume::new(
            sanitize("per volume", request.per_volume.value),
            request.per_volume.unit,
        ),
        days_supply: sanitize("days supply", request.days_supply),
        doses_per_day: sanitize("doses per day", request.doses_per_day),
        frequency_mode: request.frequency_mode,
    }
}

fn zero_on_error(quantity: &str, result: Result<f64, DoseError>) -> f64 {
    match result {
        Ok(value) => finite_or_zero(value),
        Err(e) => {
            tracing::warn!(quantity, error = %e, "Quantity shown as 0");
            0.0
        }
    }
}

/// Form-facing calculation. Never fails and never returns NaN or infinity.
///
/// Each quantity is computed independently, so a zero concentration zeroes
/// the liquid figures while the solid figures are still reported.
pub fn calculate(request: &DoseRequest) -> DoseQuantities {
    let request = sanitize_request(request);
    tracing::debug!(
        dosage = %request.dosage,
        weight = %request.weight,
        mode = %request.frequency_mode,
        "Calculating dose (sanitized)"
    );

    let total = calculate_dosage_mass(&request.dosage, &request.weight);
    let total_dose = finite_or_zero(total.value);
    let single = zero_on_error(
        "single dose",
        single_dose(total_dose, request.doses_per_day, request.frequency_mode),
    );

    let liquid_ml = zero_on_error(
        "liquid dose",
        calculate_liquid_dosage(&total, &request.liquid_concentration, &request.per_volume),
    );
    let single_liquid_ml = zero_on_error(
        "single liquid dose",
        single_dose(liquid_ml, request.doses_per_day, request.frequency_mode),
    );

    DoseQuantities {
        total_dose,
        single_dose: single,
        total_quantity: finite_or_zero(total_quantity(
            single,
            request.days_supply,
            request.doses_per_day,
        )),
        single_liquid_dose_ml: single_liquid_ml,
        total_liquid_quantity_ml: finite_or_zero(total_quantity(
            single_liquid_ml,
            request.days_supply,
            request.doses_per_day,
        )),
        dose_unit: total.unit,
    }
}

/// Sanitized calculation followed by the display step.
pub fn calculate_for_display(request: &DoseRequest, config: &CalculatorConfig) -> DoseCalculation {
    let quantities = calculate(request);
    DoseCalculation::from_quantities(&quantities, request.per_volume.unit, config)
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════

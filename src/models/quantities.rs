//! Unit-tagged values.
//!
//! A bare `f64` never enters the conversion system: each value carries
//! exactly one unit from a closed family, and values of different families
//! cannot be combined without going through `conversion` first.

use serde::{Deserialize, Serialize};

use super::enums::{DosageUnit, MassUnit, VolumeUnit, WeightUnit};
use crate::conversion;
use crate::error::{ensure_finite, DoseError};

/// Generates a `{ value, unit }` struct with infallible and checked constructors.
macro_rules! tagged_value {
    ($(#[$meta:meta])* $name:ident, $unit:ty, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
        pub struct $name {
            pub value: f64,
            pub unit: $unit,
        }

        impl $name {
            pub const fn new(value: f64, unit: $unit) -> Self {
                Self { value, unit }
            }

            /// Like `new`, but rejects NaN and infinities.
            pub fn checked(value: f64, unit: $unit) -> Result<Self, DoseError> {
                Ok(Self::new(ensure_finite($field, value)?, unit))
            }

            /// Parse the unit label, then construct. Unknown labels are `InvalidUnit`.
            pub fn parse(value: f64, unit: &str) -> Result<Self, DoseError> {
                Self::checked(value, unit.parse()?)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{} {}", self.value, self.unit)
            }
        }
    };
}

tagged_value!(
    /// Patient weight.
    Weight,
    WeightUnit,
    "weight"
);

tagged_value!(
    /// Prescribed amount per kg of patient weight.
    Dosage,
    DosageUnit,
    "dosage"
);

tagged_value!(
    /// An absolute mass of active ingredient, e.g. a computed dose.
    Mass,
    MassUnit,
    "mass"
);

tagged_value!(
    /// Mass numerator of a liquid formulation ("250 mg" of "250 mg per 5 mL").
    /// The per-volume denominator travels separately as a `Volume`.
    LiquidConcentration,
    MassUnit,
    "concentration"
);

tagged_value!(
    /// A liquid volume.
    Volume,
    VolumeUnit,
    "volume"
);

impl Weight {
    pub fn to(self, unit: WeightUnit) -> Weight {
        Weight::new(conversion::convert_weight(self.value, self.unit, unit), unit)
    }

    pub fn in_kg(self) -> f64 {
        self.to(WeightUnit::Kg).value
    }
}

impl Mass {
    pub fn to(self, unit: MassUnit) -> Mass {
        Mass::new(conversion::convert_mass(self.value, self.unit, unit), unit)
    }
}

impl LiquidConcentration {
    pub fn as_mass(self) -> Mass {
        Mass::new(self.value, self.unit)
    }
}

impl Volume {
    pub fn to(self, unit: VolumeUnit) -> Volume {
        Volume::new(conversion::convert_volume(self.value, self.unit, unit), unit)
    }

    pub fn in_ml(self) -> f64 {
        conversion::volume_to_ml(self.value, self.unit)
    }
}

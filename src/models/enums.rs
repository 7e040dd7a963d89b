use serde::{Deserialize, Serialize};

use crate::error::DoseError;

/// Macro to generate a closed unit enum with as_str + std::str::FromStr pattern.
///
/// The first literal is the canonical label (used by serde and `Display`);
/// any further literals are aliases accepted case-insensitively by `FromStr`.
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal $(| $alias:literal)*),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $s)]
                $variant
            ),+
        }

        impl $name {
            /// Every member of the family, in declaration order.
            pub const ALL: &'static [$name] = &[$(Self::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = DoseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                $(
                    if trimmed == $s {
                        return Ok(Self::$variant);
                    }
                )+
                $(
                    if trimmed.eq_ignore_ascii_case($s)
                        $(|| trimmed.eq_ignore_ascii_case($alias))*
                    {
                        return Ok(Self::$variant);
                    }
                )+
                Err(DoseError::InvalidUnit {
                    family: stringify!($name).into(),
                    value: s.into(),
                })
            }
        }
    };
}

str_enum!(WeightUnit {
    Lb => "lb" | "lbs" | "pound" | "pounds",
    Kg => "kg" | "kgs" | "kilogram" | "kilograms",
    Oz => "oz" | "ounce" | "ounces",
    G => "g" | "gram" | "grams",
});

str_enum!(DosageUnit {
    McgPerKg => "mcg/kg" | "ug/kg" | "µg/kg",
    MgPerKg => "mg/kg",
    GPerKg => "g/kg",
});

str_enum!(MassUnit {
    Mcg => "mcg" | "ug" | "µg" | "microgram" | "micrograms",
    Mg => "mg" | "milligram" | "milligrams",
    G => "g" | "gram" | "grams",
});

str_enum!(VolumeUnit {
    Ml => "mL" | "cc" | "milliliter" | "milliliters" | "millilitre" | "millilitres",
    L => "L" | "liter" | "liters" | "litre" | "litres",
});

str_enum!(FrequencyMode {
    PerDay => "day" | "per day" | "daily",
    PerDose => "dose" | "per dose",
});

impl DosageUnit {
    /// Mass numerator of the ratio: the unit a computed dose is expressed in.
    pub fn mass_unit(&self) -> MassUnit {
        match self {
            Self::McgPerKg => MassUnit::Mcg,
            Self::MgPerKg => MassUnit::Mg,
            Self::GPerKg => MassUnit::G,
        }
    }

    /// Weight denominator of the ratio. Every dosage unit is "per kg".
    pub fn weight_unit(&self) -> WeightUnit {
        match self {
            Self::McgPerKg | Self::MgPerKg | Self::GPerKg => WeightUnit::Kg,
        }
    }
}

impl Default for FrequencyMode {
    fn default() -> Self {
        Self::PerDay
    }
}

use serde::{Deserialize, Serialize};

use super::ModelError;

/// Macro to generate enum with as_str + std::str::FromStr pattern.
/// Serde names follow the wire labels, which may contain spaces
/// (e.g. "Nursing Facility") or symbols (e.g. ">200").
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(ModelError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(Disease {
    Pneumonia => "pneumonia",
    HeartFailure => "heart_failure",
    Diabetes => "diabetes",
});

str_enum!(RiskTier {
    Low => "Low",
    Medium => "Medium",
    High => "High",
});

str_enum!(Gender {
    Female => "Female",
    Male => "Male",
});

str_enum!(SmokingStatus {
    Never => "Never",
    Former => "Former",
    Current => "Current",
});

str_enum!(DischargeDisposition {
    Expired => "Expired",
    Home => "Home",
    NursingFacility => "Nursing Facility",
    Rehab => "Rehab",
    Other => "Other",
});

// The heart-failure model was trained without an "Other" disposition.
str_enum!(HfDischargeDisposition {
    Expired => "Expired",
    Home => "Home",
    NursingFacility => "Nursing Facility",
    Rehab => "Rehab",
});

str_enum!(Ethnicity {
    Asian => "Asian",
    Black => "Black",
    Hispanic => "Hispanic",
    Other => "Other",
    White => "White",
});

str_enum!(MedAdjustment {
    Down => "Down",
    No => "No",
    Steady => "Steady",
    Up => "Up",
});

str_enum!(Race {
    AfricanAmerican => "AfricanAmerican",
    Asian => "Asian",
    Caucasian => "Caucasian",
    Hispanic => "Hispanic",
    Other => "Other",
    Unknown => "Unknown",
});

str_enum!(MaxGluSerum {
    Above200 => ">200",
    Above300 => ">300",
    Norm => "Norm",
    Unknown => "Unknown",
});

str_enum!(A1CResult {
    Above7 => ">7",
    Above8 => ">8",
    Norm => "Norm",
    Unknown => "Unknown",
});

str_enum!(MedChange {
    Changed => "Ch",
    No => "No",
});

str_enum!(MedicalSpecialty {
    Cardiology => "Cardiology",
    EmergencyTrauma => "Emergency/Trauma",
    FamilyGeneralPractice => "Family/GeneralPractice",
    InternalMedicine => "InternalMedicine",
    Nephrology => "Nephrology",
    Orthopedics => "Orthopedics",
    OrthopedicsReconstructive => "Orthopedics-Reconstructive",
    Other => "Other",
    Radiologist => "Radiologist",
    SurgeryGeneral => "Surgery-General",
    Unknown => "Unknown",
});

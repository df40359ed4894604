use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::ModelError;

/// Macro to generate a unit enum with as_str + FromStr + wire-string serde.
///
/// Serialization uses the wire string (e.g. "Driving Licence"), not the
/// variant name, so output matches what downstream form renderers expect.
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
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

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(D::Error::custom)
            }
        }
    };
}

str_enum!(DocumentType {
    Pan => "PAN",
    Aadhaar => "Aadhaar",
    VoterId => "Voter ID",
    DrivingLicence => "Driving Licence",
    Marksheet => "Marksheet",
    Unknown => "Unknown",
});

impl DocumentType {
    /// The five concrete types a classifier can score (Unknown excluded).
    pub const CONCRETE: [DocumentType; 5] = [
        DocumentType::Pan,
        DocumentType::Aadhaar,
        DocumentType::VoterId,
        DocumentType::DrivingLicence,
        DocumentType::Marksheet,
    ];
}

str_enum!(FieldStatus {
    Pass => "PASS",
    Review => "REVIEW",
    Fail => "FAIL",
});

str_enum!(ClassifierStrategy {
    WeightedScoring => "weighted_scoring",
    KeywordRule => "keyword_rule",
    ScoreFallback => "score_fallback",
    Hint => "hint",
});

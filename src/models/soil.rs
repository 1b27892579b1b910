use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SoilType {
    Clay,
    Sandy,
    Loam,
    Rocky,
    Organic,
}

impl SoilType {
    pub const ALL: [SoilType; 5] = [
        SoilType::Clay,
        SoilType::Sandy,
        SoilType::Loam,
        SoilType::Rocky,
        SoilType::Organic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SoilType::Clay => "clay",
            SoilType::Sandy => "sandy",
            SoilType::Loam => "loam",
            SoilType::Rocky => "rocky",
            SoilType::Organic => "organic",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "clay" | "clayey" => Some(SoilType::Clay),
            "sandy" | "sand" => Some(SoilType::Sandy),
            "loam" | "loamy" | "silt" | "silty" => Some(SoilType::Loam),
            "rocky" | "rock" | "stony" => Some(SoilType::Rocky),
            "organic" | "peat" | "peaty" => Some(SoilType::Organic),
            _ => None,
        }
    }
}

impl std::fmt::Display for SoilType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<String> for SoilType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        SoilType::from_str(&value).ok_or_else(|| format!("unknown soil type '{}'", value))
    }
}

impl From<SoilType> for String {
    fn from(soil: SoilType) -> Self {
        soil.as_str().to_string()
    }
}

/// Reads an optional soil type, treating a blank string as "not known".
pub(crate) fn deserialize_optional_soil<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<SoilType>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    let value: Option<String> = Option::deserialize(deserializer)?;
    match value {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => SoilType::from_str(&s)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("unknown soil type '{}'", s))),
    }
}

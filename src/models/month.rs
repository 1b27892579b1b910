use serde::{Deserialize, Deserializer, Serialize};

/// Calendar month used for planting windows. Months form a 12-step cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
            Month::July => "July",
            Month::August => "August",
            Month::September => "September",
            Month::October => "October",
            Month::November => "November",
            Month::December => "December",
        }
    }

    /// Zero-based position in the year.
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Month from its calendar number (1 = January).
    pub fn from_number(number: u32) -> Option<Self> {
        match number {
            1..=12 => Some(Month::ALL[(number - 1) as usize]),
            _ => None,
        }
    }

    /// Accepts full names, three-letter abbreviations and calendar numbers.
    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        if let Ok(number) = s.parse::<u32>() {
            return Self::from_number(number);
        }
        Month::ALL.into_iter().find(|m| {
            let name = m.as_str().to_lowercase();
            name == s || (s.len() >= 3 && name.starts_with(&s))
        })
    }

    /// Shortest number of months between two months around the cycle (0..=6).
    pub fn distance(&self, other: Month) -> u8 {
        let forward = (other.index() as i32 - self.index() as i32).rem_euclid(12);
        forward.min(12 - forward) as u8
    }
}

impl std::fmt::Display for Month {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<String> for Month {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Month::from_str(&value).ok_or_else(|| format!("unknown month '{}'", value))
    }
}

impl From<Month> for String {
    fn from(month: Month) -> Self {
        month.as_str().to_string()
    }
}

/// Reads an optional month, treating a blank string as "not known".
pub(crate) fn deserialize_optional_month<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<Month>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    let value: Option<String> = Option::deserialize(deserializer)?;
    match value {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => Month::from_str(&s)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("unknown month '{}'", s))),
    }
}

use std::fmt;
use std::str::FromStr;

use serde_derive::{Deserialize, Serialize};

/// Predefined ArUco dictionaries understood by the marker detector.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(from = "String", into = "&'static str")]
pub enum ArucoDictionary {
    Dict4x4_50,
    Dict4x4_100,
    #[default]
    Dict4x4_250,
    Dict4x4_1000,
    Dict5x5_50,
    Dict5x5_100,
    Dict5x5_250,
    Dict5x5_1000,
    Dict6x6_50,
    Dict6x6_100,
    Dict6x6_250,
    Dict6x6_1000,
    Dict7x7_50,
    Dict7x7_100,
    Dict7x7_250,
    Dict7x7_1000,
}

impl ArucoDictionary {
    pub const ALL: [ArucoDictionary; 16] = [
        ArucoDictionary::Dict4x4_50,
        ArucoDictionary::Dict4x4_100,
        ArucoDictionary::Dict4x4_250,
        ArucoDictionary::Dict4x4_1000,
        ArucoDictionary::Dict5x5_50,
        ArucoDictionary::Dict5x5_100,
        ArucoDictionary::Dict5x5_250,
        ArucoDictionary::Dict5x5_1000,
        ArucoDictionary::Dict6x6_50,
        ArucoDictionary::Dict6x6_100,
        ArucoDictionary::Dict6x6_250,
        ArucoDictionary::Dict6x6_1000,
        ArucoDictionary::Dict7x7_50,
        ArucoDictionary::Dict7x7_100,
        ArucoDictionary::Dict7x7_250,
        ArucoDictionary::Dict7x7_1000,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ArucoDictionary::Dict4x4_50 => "DICT_4X4_50",
            ArucoDictionary::Dict4x4_100 => "DICT_4X4_100",
            ArucoDictionary::Dict4x4_250 => "DICT_4X4_250",
            ArucoDictionary::Dict4x4_1000 => "DICT_4X4_1000",
            ArucoDictionary::Dict5x5_50 => "DICT_5X5_50",
            ArucoDictionary::Dict5x5_100 => "DICT_5X5_100",
            ArucoDictionary::Dict5x5_250 => "DICT_5X5_250",
            ArucoDictionary::Dict5x5_1000 => "DICT_5X5_1000",
            ArucoDictionary::Dict6x6_50 => "DICT_6X6_50",
            ArucoDictionary::Dict6x6_100 => "DICT_6X6_100",
            ArucoDictionary::Dict6x6_250 => "DICT_6X6_250",
            ArucoDictionary::Dict6x6_1000 => "DICT_6X6_1000",
            ArucoDictionary::Dict7x7_50 => "DICT_7X7_50",
            ArucoDictionary::Dict7x7_100 => "DICT_7X7_100",
            ArucoDictionary::Dict7x7_250 => "DICT_7X7_250",
            ArucoDictionary::Dict7x7_1000 => "DICT_7X7_1000",
        }
    }

    /// Bits per side of the marker grid.
    pub fn grid_size(&self) -> u32 {
        match self.name().as_bytes()[5] {
            b'4' => 4,
            b'5' => 5,
            b'6' => 6,
            _ => 7,
        }
    }

    /// Number of distinct marker IDs; valid IDs are `0..capacity`.
    pub fn capacity(&self) -> u32 {
        self.name()
            .rsplit('_')
            .next()
            .and_then(|n| n.parse().ok())
            .unwrap_or(0)
    }

    pub fn contains(&self, id: u32) -> bool {
        id < self.capacity()
    }
}

impl FromStr for ArucoDictionary {
    type Err = std::convert::Infallible;

    /// Unknown names fall back to the default dictionary.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        Ok(Self::ALL
            .iter()
            .copied()
            .find(|d| d.name().eq_ignore_ascii_case(s))
            .unwrap_or_default())
    }
}

impl From<String> for ArucoDictionary {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(d) => d,
            Err(never) => match never {},
        }
    }
}

impl From<ArucoDictionary> for &'static str {
    fn from(d: ArucoDictionary) -> Self {
        d.name()
    }
}

impl fmt::Display for ArucoDictionary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        assert_eq!(
            "DICT_5X5_1000".parse::<ArucoDictionary>().unwrap(),
            ArucoDictionary::Dict5x5_1000
        );
        assert_eq!(
            "dict_7x7_50".parse::<ArucoDictionary>().unwrap(),
            ArucoDictionary::Dict7x7_50
        );
    }

    #[test]
    fn test_unknown_falls_back() {
        assert_eq!(
            "DICT_ARUCO_ORIGINAL".parse::<ArucoDictionary>().unwrap(),
            ArucoDictionary::Dict4x4_250
        );
    }

    #[test]
    fn test_name_roundtrip_and_shape() {
        for d in ArucoDictionary::ALL {
            assert_eq!(d.name().parse::<ArucoDictionary>().unwrap(), d);
        }

        assert_eq!(ArucoDictionary::Dict6x6_250.grid_size(), 6);
        assert_eq!(ArucoDictionary::Dict6x6_250.capacity(), 250);
        assert!(ArucoDictionary::Dict4x4_50.contains(49));
        assert!(!ArucoDictionary::Dict4x4_50.contains(50));
    }
}

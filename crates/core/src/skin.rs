use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Skin type produced by the quiz and used to pick routines and products.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SkinType {
    Oily,
    Dry,
    Combination,
    Normal,
    Sensitive,
}

impl SkinType {
    pub const ALL: [SkinType; 5] = [
        SkinType::Oily,
        SkinType::Dry,
        SkinType::Combination,
        SkinType::Normal,
        SkinType::Sensitive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SkinType::Oily => "OILY",
            SkinType::Dry => "DRY",
            SkinType::Combination => "COMBINATION",
            SkinType::Normal => "NORMAL",
            SkinType::Sensitive => "SENSITIVE",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SkinType::Oily => "Oily",
            SkinType::Dry => "Dry",
            SkinType::Combination => "Combination",
            SkinType::Normal => "Normal",
            SkinType::Sensitive => "Sensitive",
        }
    }
}

impl core::fmt::Display for SkinType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SkinType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        SkinType::ALL
            .into_iter()
            .find(|t| t.as_str() == upper)
            .ok_or_else(|| DomainError::validation(format!("unknown skin type: {s}")))
    }
}

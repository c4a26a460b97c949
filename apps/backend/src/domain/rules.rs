//! Table rules passed to the rule engine at the start of a round.

use serde::{Deserialize, Serialize};

use crate::errors::domain::DomainError;

pub const MIN_DECKS: u8 = 1;
pub const MAX_DECKS: u8 = 8;

/// Which two-card totals may be doubled.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum DoubleRule {
    #[default]
    #[serde(rename = "any")]
    Any,
    #[serde(rename = "9or10")]
    NineOrTen,
    #[serde(rename = "9or10or11")]
    NineTenOrEleven,
    #[serde(rename = "9thru15")]
    NineThroughFifteen,
    #[serde(rename = "none")]
    None,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Rules {
    pub decks: u8,
    pub stand_on_soft_17: bool,
    pub double: DoubleRule,
    pub split: bool,
    pub double_after_split: bool,
    pub surrender: bool,
    pub insurance: bool,
    pub showdown_after_ace_split: bool,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            decks: 1,
            stand_on_soft_17: true,
            double: DoubleRule::Any,
            split: true,
            double_after_split: true,
            surrender: true,
            insurance: true,
            showdown_after_ace_split: true,
        }
    }
}

/// Caller-supplied partial rule set; unset fields keep the defaults.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleOverrides {
    pub decks: Option<u8>,
    pub stand_on_soft_17: Option<bool>,
    pub double: Option<DoubleRule>,
    pub split: Option<bool>,
    pub double_after_split: Option<bool>,
    pub surrender: Option<bool>,
    pub insurance: Option<bool>,
    pub showdown_after_ace_split: Option<bool>,
}

impl RuleOverrides {
    pub fn with_decks(mut self, decks: u8) -> Self {
        self.decks = Some(decks);
        self
    }

    pub fn with_double(mut self, double: DoubleRule) -> Self {
        self.double = Some(double);
        self
    }

    pub fn without_surrender(mut self) -> Self {
        self.surrender = Some(false);
        self
    }

    /// Merge onto the default rule set.
    pub fn resolve(&self) -> Result<Rules, DomainError> {
        let base = Rules::default();
        let decks = self.decks.unwrap_or(base.decks);
        if !(MIN_DECKS..=MAX_DECKS).contains(&decks) {
            return Err(DomainError::validation(format!(
                "decks must be in range {MIN_DECKS}..={MAX_DECKS}, got {decks}"
            )));
        }

        Ok(Rules {
            decks,
            stand_on_soft_17: self.stand_on_soft_17.unwrap_or(base.stand_on_soft_17),
            double: self.double.unwrap_or(base.double),
            split: self.split.unwrap_or(base.split),
            double_after_split: self.double_after_split.unwrap_or(base.double_after_split),
            surrender: self.surrender.unwrap_or(base.surrender),
            insurance: self.insurance.unwrap_or(base.insurance),
            showdown_after_ace_split: self
                .showdown_after_ace_split
                .unwrap_or(base.showdown_after_ace_split),
        })
    }
}

//! Named customer scenarios

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ScenarioConfig;
use crate::error::ConfigError;

/// A named, complete scenario that replaces every input when selected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Preset {
    #[serde(alias = "thermofusion")]
    Thermofusion,
    #[serde(alias = "aalberts")]
    Aalberts,
}

impl Preset {
    pub const ALL: [Preset; 2] = [Preset::Thermofusion, Preset::Aalberts];

    pub fn name(&self) -> &'static str {
        match self {
            Preset::Thermofusion => "Thermofusion",
            Preset::Aalberts => "Aalberts",
        }
    }

    /// Fresh configuration for this preset
    pub fn config(&self) -> ScenarioConfig {
        match self {
            Preset::Thermofusion => ScenarioConfig {
                investment: 186_900.00,
                discount_rate: 0.045,
                project_life: 15,
                base_savings: 94_000.00,
                escalation: 0.03,
                savings_split: 0.50,
                corp_tax: 0.28,
                ira_credit_pct: 0.30,
                bonus_depr_pct: 0.40,
                finance_pct: 0.80,
                loan_rate: 0.09,
                loan_term: 3,
                ..ScenarioConfig::default()
            },
            Preset::Aalberts => ScenarioConfig {
                investment: 188_571.50,
                discount_rate: 0.07,
                project_life: 20,
                base_savings: 28_000.00,
                escalation: 0.059,
                savings_split: 0.50,
                corp_tax: 0.21,
                ira_credit_pct: 0.30,
                bonus_depr_pct: 1.00,
                finance_pct: 0.80,
                loan_rate: 0.05,
                loan_term: 5,
                ..ScenarioConfig::default()
            },
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownPreset(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        for preset in Preset::ALL {
            assert!(preset.config().validate().is_ok(), "{} is invalid", preset);
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("thermofusion".parse::<Preset>(), Ok(Preset::Thermofusion));
        assert_eq!(" AALBERTS ".parse::<Preset>(), Ok(Preset::Aalberts));
        assert_eq!(
            "acme".parse::<Preset>(),
            Err(ConfigError::UnknownPreset("acme".to_string()))
        );
    }

    #[test]
    fn test_preset_replaces_every_input() {
        let config = Preset::Thermofusion.config();
        assert_eq!(config.project_life, 15);
        assert_eq!(config.loan_term, 3);
        assert_eq!(config.evaluation_date, None);
        assert_ne!(config, ScenarioConfig::default());
    }
}

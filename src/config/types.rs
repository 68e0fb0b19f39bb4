//! Configuration types for the money-funnel engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files, together with their
//! built-in Swedish values.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{ChoreTier, EmployeeRatios, EntrepreneurDefaults, Mode, TaskDetails};

/// Parameter defaults file structure (`defaults.yaml`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Default ratios for the employee model.
    pub employee: EmployeeRatios,
    /// Default parameters for the sole-trader model.
    pub entrepreneur: EntrepreneurDefaults,
}

/// One value per chore tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerTier<T> {
    /// Value for tier A.
    #[serde(rename = "A")]
    pub a: T,
    /// Value for tier B.
    #[serde(rename = "B")]
    pub b: T,
    /// Value for tier C.
    #[serde(rename = "C")]
    pub c: T,
}

impl<T> PerTier<T> {
    /// Returns the value for `tier`.
    pub fn get(&self, tier: ChoreTier) -> &T {
        match tier {
            ChoreTier::A => &self.a,
            ChoreTier::B => &self.b,
            ChoreTier::C => &self.c,
        }
    }
}

/// Default hourly rates per tier, kept separately for each mode.
///
/// Sole-trader rates are VAT-inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierRates {
    /// Rates used in the employee model.
    pub employee: PerTier<Decimal>,
    /// Rates used in the sole-trader model.
    pub entrepreneur: PerTier<Decimal>,
}

/// Chore catalog file structure (`chores.yaml`).
///
/// Maps every known chore to a tier and every tier to a default rate per
/// mode. A chore belongs to at most one tier; the first tier listing it
/// wins on lookup.
///
/// # Example
///
/// ```
/// use fickpengar::config::ChoreCatalog;
/// use fickpengar::models::{ChoreTier, Mode};
/// use rust_decimal::Decimal;
///
/// let catalog = ChoreCatalog::default();
/// assert_eq!(catalog.tier_of("Snöskottning"), Some(ChoreTier::A));
/// assert_eq!(catalog.default_rate(ChoreTier::B, Mode::Employee), Decimal::from(120));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoreCatalog {
    /// Chore names per tier, in suggestion order.
    pub tiers: PerTier<Vec<String>>,
    /// Default hourly rates per tier and mode.
    pub rates: TierRates,
}

impl ChoreCatalog {
    /// Returns the tier the chore belongs to, if any.
    ///
    /// Matching is exact; free-form task names simply have no tier.
    pub fn tier_of(&self, chore: &str) -> Option<ChoreTier> {
        ChoreTier::ALL
            .into_iter()
            .find(|&tier| self.chores_in(tier).iter().any(|known| known == chore))
    }

    /// Returns the chores of a single tier.
    pub fn chores_in(&self, tier: ChoreTier) -> &[String] {
        self.tiers.get(tier)
    }

    /// Returns chore suggestions: one tier, or every chore from A to C.
    pub fn suggestions(&self, tier: Option<ChoreTier>) -> Vec<&str> {
        match tier {
            Some(tier) => self.chores_in(tier).iter().map(String::as_str).collect(),
            None => ChoreTier::ALL
                .into_iter()
                .flat_map(|tier| self.chores_in(tier))
                .map(String::as_str)
                .collect(),
        }
    }

    /// Returns the default hourly rate of a tier for the given mode.
    pub fn default_rate(&self, tier: ChoreTier, mode: Mode) -> Decimal {
        let rates = match mode {
            Mode::Employee => &self.rates.employee,
            Mode::Entrepreneur => &self.rates.entrepreneur,
        };
        *rates.get(tier)
    }

    /// Returns the default hourly rate for a named chore.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ChoreNotFound`] when the chore is in no tier.
    pub fn default_rate_for_chore(&self, chore: &str, mode: Mode) -> EngineResult<Decimal> {
        self.tier_of(chore)
            .map(|tier| self.default_rate(tier, mode))
            .ok_or_else(|| EngineError::ChoreNotFound {
                name: chore.to_string(),
            })
    }

    /// Returns the initial task for a mode: the first tier-A chore at its
    /// default rate for one hour.
    pub fn default_task(&self, mode: Mode) -> TaskDetails {
        let task_name = self
            .chores_in(ChoreTier::A)
            .first()
            .cloned()
            .unwrap_or_default();
        TaskDetails::new(task_name, self.default_rate(ChoreTier::A, mode), Decimal::ONE)
    }
}

impl Default for ChoreCatalog {
    /// The Swedish household chore catalog.
    fn default() -> Self {
        fn names(chores: &[&str]) -> Vec<String> {
            chores.iter().map(|chore| chore.to_string()).collect()
        }

        Self {
            tiers: PerTier {
                a: names(&[
                    "Biltvätt och rekond",
                    "Fönsterputsning",
                    "Gräsklippning",
                    "Grundlig städning av rum",
                    "Snöskottning",
                    "Cykelreparation/rengöring",
                ]),
                b: names(&[
                    "Tvätta och vika",
                    "Diskhantering",
                    "Matlagning / kökshjälp",
                    "Trädgårdsrensning / vattning",
                    "Organisera förråd",
                ]),
                c: names(&[
                    "Bädda sin egen säng",
                    "Städa sitt eget rum",
                    "Plocka undan disk",
                    "Grundläggande hygienuppgifter",
                ]),
            },
            rates: TierRates {
                employee: PerTier {
                    a: Decimal::from(250),
                    b: Decimal::from(120),
                    c: Decimal::from(60),
                },
                entrepreneur: PerTier {
                    a: Decimal::new(31250, 2),
                    b: Decimal::new(15000, 2),
                    c: Decimal::new(7500, 2),
                },
            },
        }
    }
}

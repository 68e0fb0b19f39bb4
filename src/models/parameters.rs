//! Parameter sets for the two calculators.
//!
//! Each calculator takes a complete parameter record. Callers usually hold a
//! partial override instead (from a form or from stored settings), which is
//! merged field by field over a set of defaults before calculating.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Flat deduction ratios for the employee model, each a fraction of gross.
///
/// The calculator does not require the ratios to sum to at most 1; an
/// over-allocated set yields a negative remainder.
///
/// # Example
///
/// ```
/// use fickpengar::models::EmployeeRatios;
/// use rust_decimal::Decimal;
///
/// let ratios = EmployeeRatios::default();
/// assert_eq!(ratios.tax_pct, Decimal::new(32, 2));
/// assert_eq!(ratios.total(), Decimal::new(89, 2));
/// assert!(!ratios.is_over_allocated());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRatios {
    /// Income tax withheld.
    pub tax_pct: Decimal,
    /// Rent or housing costs.
    pub housing_pct: Decimal,
    /// Groceries and meals.
    pub food_pct: Decimal,
    /// Public transport or fuel.
    pub transport_pct: Decimal,
    /// Utilities, phone, hygiene.
    pub essentials_pct: Decimal,
}

impl EmployeeRatios {
    /// Sum of all five ratios, saturating at the decimal range.
    pub fn total(&self) -> Decimal {
        [
            self.housing_pct,
            self.food_pct,
            self.transport_pct,
            self.essentials_pct,
        ]
        .into_iter()
        .fold(self.tax_pct, Decimal::saturating_add)
    }

    /// Returns true when the ratios claim more than the whole gross.
    pub fn is_over_allocated(&self) -> bool {
        self.total() > Decimal::ONE
    }
}

impl Default for EmployeeRatios {
    /// Typical Swedish shares of an average income.
    fn default() -> Self {
        Self {
            tax_pct: Decimal::new(32, 2),
            housing_pct: Decimal::new(30, 2),
            food_pct: Decimal::new(13, 2),
            transport_pct: Decimal::new(7, 2),
            essentials_pct: Decimal::new(7, 2),
        }
    }
}

/// Parameters of the sole-trader model.
///
/// # Example
///
/// ```
/// use fickpengar::models::EntrepreneurDefaults;
/// use rust_decimal::Decimal;
///
/// let defaults = EntrepreneurDefaults::default();
/// assert_eq!(defaults.social_fee_pct, Decimal::new(2897, 4));
/// assert_eq!(defaults.billable_hours_per_month, Decimal::from(120));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntrepreneurDefaults {
    /// VAT rate, e.g. 0.25 for 25%.
    pub vat_pct: Decimal,
    /// Self-employment social fees (egenavgifter) as a fraction of taxable income.
    pub social_fee_pct: Decimal,
    /// Municipal income tax as a fraction of taxable income.
    pub municipal_tax_pct: Decimal,
    /// Fixed monthly running costs.
    pub overhead_monthly: Decimal,
    /// Hours per month the overhead is spread over. Must be positive.
    pub billable_hours_per_month: Decimal,
}

impl Default for EntrepreneurDefaults {
    fn default() -> Self {
        Self {
            vat_pct: Decimal::new(25, 2),
            social_fee_pct: Decimal::new(2897, 4),
            municipal_tax_pct: Decimal::new(30, 2),
            overhead_monthly: Decimal::from(7500),
            billable_hours_per_month: Decimal::from(120),
        }
    }
}

/// A partial [`EmployeeRatios`]; absent fields fall back to defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRatiosOverride {
    /// Override for the tax ratio.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_pct: Option<Decimal>,
    /// Override for the housing ratio.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub housing_pct: Option<Decimal>,
    /// Override for the food ratio.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub food_pct: Option<Decimal>,
    /// Override for the transport ratio.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport_pct: Option<Decimal>,
    /// Override for the essentials ratio.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub essentials_pct: Option<Decimal>,
}

impl EmployeeRatiosOverride {
    /// Builds a complete record, taking each present field from `self`.
    ///
    /// No validation happens here: the merged ratios may sum past 1.
    pub fn merged_over(&self, defaults: &EmployeeRatios) -> EmployeeRatios {
        EmployeeRatios {
            tax_pct: self.tax_pct.unwrap_or(defaults.tax_pct),
            housing_pct: self.housing_pct.unwrap_or(defaults.housing_pct),
            food_pct: self.food_pct.unwrap_or(defaults.food_pct),
            transport_pct: self.transport_pct.unwrap_or(defaults.transport_pct),
            essentials_pct: self.essentials_pct.unwrap_or(defaults.essentials_pct),
        }
    }
}

/// A partial [`EntrepreneurDefaults`]; absent fields fall back to defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntrepreneurDefaultsOverride {
    /// Override for the VAT rate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vat_pct: Option<Decimal>,
    /// Override for the social fee rate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_fee_pct: Option<Decimal>,
    /// Override for the municipal tax rate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub municipal_tax_pct: Option<Decimal>,
    /// Override for the monthly overhead.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overhead_monthly: Option<Decimal>,
    /// Override for the billable hours per month.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billable_hours_per_month: Option<Decimal>,
}

impl EntrepreneurDefaultsOverride {
    /// Builds a complete record, taking each present field from `self`.
    pub fn merged_over(&self, defaults: &EntrepreneurDefaults) -> EntrepreneurDefaults {
        EntrepreneurDefaults {
            vat_pct: self.vat_pct.unwrap_or(defaults.vat_pct),
            social_fee_pct: self.social_fee_pct.unwrap_or(defaults.social_fee_pct),
            municipal_tax_pct: self.municipal_tax_pct.unwrap_or(defaults.municipal_tax_pct),
            overhead_monthly: self.overhead_monthly.unwrap_or(defaults.overhead_monthly),
            billable_hours_per_month: self
                .billable_hours_per_month
                .unwrap_or(defaults.billable_hours_per_month),
        }
    }
}

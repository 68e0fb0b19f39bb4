//! Calculation result models for the money-funnel engine.
//!
//! This module contains the [`CalculationResult`] type and its associated
//! structures: the ordered [`MoneyFunnelLine`] breakdown and the three
//! [`ChartSegment`]s used for proportion charts.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Mode, TaskDetails};

/// Stable line keys. Presentation and export layers look lines up by these.
pub mod keys {
    /// Gross revenue (both modes).
    pub const GROSS: &str = "gross";

    /// Employee: income tax withheld.
    pub const TAXES: &str = "taxes";
    /// Employee: housing share.
    pub const HOUSING: &str = "housing";
    /// Employee: food share.
    pub const FOOD: &str = "food";
    /// Employee: transport share.
    pub const TRANSPORT: &str = "transport";
    /// Employee: essentials share.
    pub const ESSENTIALS: &str = "essentials";
    /// Employee: what is left to spend.
    pub const DISCRETIONARY: &str = "discretionary";

    /// Entrepreneur: VAT contained in the gross.
    pub const VAT: &str = "vat";
    /// Entrepreneur: revenue excluding VAT.
    pub const NET_REVENUE: &str = "netRevenue";
    /// Entrepreneur: 25% standard deduction.
    pub const SCHABLONAVDRAG: &str = "schablonavdrag";
    /// Entrepreneur: base for income tax and social fees.
    pub const TAXABLE_INCOME: &str = "taxableIncome";
    /// Entrepreneur: municipal income tax.
    pub const INCOME_TAX: &str = "incomeTax";
    /// Entrepreneur: self-employment social fees.
    pub const SOCIAL_FEES: &str = "socialFees";
    /// Entrepreneur: cash left after taxes.
    pub const NET_INCOME: &str = "netIncome";
    /// Entrepreneur: hourly share of monthly overhead.
    pub const LIVING_OVERHEAD: &str = "livingOverhead";
    /// Entrepreneur: take-home after all costs.
    pub const FINAL_PROFIT: &str = "finalProfit";

    /// Employee line keys in funnel order.
    pub const EMPLOYEE: [&str; 7] = [GROSS, TAXES, HOUSING, FOOD, TRANSPORT, ESSENTIALS, DISCRETIONARY];

    /// Entrepreneur line keys in funnel order.
    pub const ENTREPRENEUR: [&str; 10] = [
        GROSS,
        VAT,
        NET_REVENUE,
        SCHABLONAVDRAG,
        TAXABLE_INCOME,
        INCOME_TAX,
        SOCIAL_FEES,
        NET_INCOME,
        LIVING_OVERHEAD,
        FINAL_PROFIT,
    ];
}

/// Chart label for the aggregated taxes slice.
pub const CHART_TAXES: &str = "Skatter";
/// Chart label for the aggregated costs slice.
pub const CHART_COSTS: &str = "Kostnader";
/// Chart label for the pocket money slice.
pub const CHART_POCKET: &str = "Fickpengar";

/// One row of the money funnel.
///
/// Positive amounts are inflows or subtotals; negative amounts are outflows.
///
/// # Example
///
/// ```
/// use fickpengar::models::MoneyFunnelLine;
/// use rust_decimal::Decimal;
///
/// let line = MoneyFunnelLine::new("gross", "Gross Revenue", Decimal::from(1000));
/// assert!(!line.is_outflow());
/// assert_eq!(line.description, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoneyFunnelLine {
    /// Stable identifier, unique within a result.
    pub key: String,
    /// Human-readable label.
    pub label: String,
    /// Signed amount.
    pub amount: Decimal,
    /// Optional explanation of the line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The configured share of gross, in percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pct_of_gross: Option<Decimal>,
}

impl MoneyFunnelLine {
    /// Creates a line without description or percentage.
    pub fn new(key: &str, label: &str, amount: Decimal) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            amount,
            description: None,
            pct_of_gross: None,
        }
    }

    /// Attaches a description.
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Attaches a share of gross in percent.
    pub fn with_pct_of_gross(mut self, pct: Decimal) -> Self {
        self.pct_of_gross = Some(pct);
        self
    }

    /// Returns true for deductions and costs.
    pub fn is_outflow(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }
}

/// One slice of the proportion chart. Values are signed; consumers size
/// slices by absolute value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSegment {
    /// Slice label.
    pub label: String,
    /// Signed aggregate amount.
    pub value: Decimal,
}

impl ChartSegment {
    /// Creates a chart segment.
    pub fn new(label: &str, value: Decimal) -> Self {
        Self {
            label: label.to_string(),
            value,
        }
    }
}

/// The complete, immutable output of one calculation.
///
/// # Example
///
/// ```
/// use fickpengar::calculation::calculate_employee;
/// use fickpengar::models::{Mode, TaskDetails};
/// use rust_decimal::Decimal;
///
/// let task = TaskDetails::new("Gräsklippning", Decimal::from(250), Decimal::from(4));
/// let result = calculate_employee(&task, None).unwrap();
///
/// assert_eq!(result.mode, Mode::Employee);
/// assert_eq!(result.amount("discretionary"), Some(Decimal::from(110)));
/// assert_eq!(result.chart.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// The model that produced this result.
    pub mode: Mode,
    /// Echo of the input task.
    pub task: TaskDetails,
    /// `rate × hours`, rounded.
    pub gross_revenue: Decimal,
    /// The headline take-home figure.
    pub final_net: Decimal,
    /// Funnel lines in display order.
    pub lines: Vec<MoneyFunnelLine>,
    /// Taxes, costs and pocket money aggregates, in that order.
    pub chart: [ChartSegment; 3],
    /// Named intermediate values for diagnostics and export.
    pub meta: BTreeMap<String, Decimal>,
}

impl CalculationResult {
    /// Looks up a line by its key.
    pub fn line(&self, key: &str) -> Option<&MoneyFunnelLine> {
        self.lines.iter().find(|line| line.key == key)
    }

    /// Looks up a line amount by its key.
    pub fn amount(&self, key: &str) -> Option<Decimal> {
        self.line(key).map(|line| line.amount)
    }

    /// Share of each chart segment in percent, by absolute value.
    ///
    /// All shares are zero when every segment is zero.
    pub fn chart_shares(&self) -> [Decimal; 3] {
        let mut magnitudes = self.chart.each_ref().map(|segment| segment.value.abs());
        let total = match magnitudes
            .iter()
            .try_fold(Decimal::ZERO, |acc, value| acc.checked_add(*value))
        {
            Some(total) => total,
            // Shares do not depend on scale; quartered values cannot overflow.
            None => {
                magnitudes = magnitudes.map(|value| value / Decimal::from(4));
                magnitudes.iter().sum()
            }
        };
        if total.is_zero() {
            return [Decimal::ZERO; 3];
        }
        magnitudes.map(|value| value / total * Decimal::ONE_HUNDRED)
    }
}

//! Employee money funnel.
//!
//! Gross pay is split by flat ratios into taxes and four living-cost
//! categories; whatever remains is the discretionary pocket money.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::error::EngineResult;
use crate::models::{
    CHART_COSTS, CHART_POCKET, CHART_TAXES, CalculationResult, ChartSegment, EmployeeRatios,
    EmployeeRatiosOverride, Mode, MoneyFunnelLine, TaskDetails, keys,
};

use super::checked;
use super::rounding::{negate, round_money};

/// Calculates the employee funnel, merging `overrides` over the Swedish
/// default ratios first.
///
/// # Errors
///
/// Returns [`crate::error::EngineError::AmountOutOfRange`] when an amount does not fit in
/// a decimal; see [`calculate_employee_with`].
///
/// # Examples
///
/// ```
/// use fickpengar::calculation::calculate_employee;
/// use fickpengar::models::TaskDetails;
/// use rust_decimal::Decimal;
///
/// let task = TaskDetails::new("Gräsklippning", Decimal::from(250), Decimal::from(4));
/// let result = calculate_employee(&task, None).unwrap();
///
/// assert_eq!(result.gross_revenue, Decimal::from(1000));
/// assert_eq!(result.final_net, Decimal::from(110));
/// ```
pub fn calculate_employee(
    task: &TaskDetails,
    overrides: Option<&EmployeeRatiosOverride>,
) -> EngineResult<CalculationResult> {
    let defaults = EmployeeRatios::default();
    let ratios = overrides.map_or(defaults, |partial| partial.merged_over(&defaults));
    calculate_employee_with(task, &ratios)
}

/// Calculates the employee funnel with a complete set of ratios.
///
/// Ratios summing past 1 are not rejected: the discretionary remainder and
/// its percentage simply go negative so the caller can flag the
/// over-allocation.
///
/// The seven lines are always emitted in the order gross, taxes, housing,
/// food, transport, essentials, discretionary, with every deduction as a
/// negative amount (a zero ratio yields a zero line, not a missing one).
///
/// # Errors
///
/// Returns [`crate::error::EngineError::AmountOutOfRange`] when rate, hours or a ratio is
/// so large that a step leaves the decimal range.
pub fn calculate_employee_with(
    task: &TaskDetails,
    ratios: &EmployeeRatios,
) -> EngineResult<CalculationResult> {
    if ratios.is_over_allocated() {
        warn!(
            ratio_total = %ratios.total(),
            task = %task.task_name,
            "Employee ratios exceed gross pay; discretionary income will be negative"
        );
    }

    let gross_revenue = round_money(checked::mul(task.rate, task.hours, "gross revenue")?);
    let outflow = |pct: Decimal, step: &str| -> EngineResult<Decimal> {
        Ok(negate(checked::mul(gross_revenue, pct, step)?))
    };

    let tax_amount = outflow(ratios.tax_pct, "taxes")?;
    let housing = outflow(ratios.housing_pct, "housing")?;
    let food = outflow(ratios.food_pct, "food")?;
    let transport = outflow(ratios.transport_pct, "transport")?;
    let essentials = outflow(ratios.essentials_pct, "essentials")?;
    let overhead_sum = round_money(checked::sum(
        &[housing, food, transport, essentials],
        "living costs",
    )?);
    let discretionary = round_money(checked::sum(
        &[gross_revenue, tax_amount, overhead_sum],
        "pocket money",
    )?);

    // Percentages echo the configured ratios, not the rounded amounts.
    let pct = |ratio: Decimal| -> EngineResult<Decimal> {
        Ok(round_money(checked::mul(
            ratio,
            Decimal::ONE_HUNDRED,
            "percentage of gross",
        )?))
    };
    let ratio_total = checked::sum(
        &[
            ratios.tax_pct,
            ratios.housing_pct,
            ratios.food_pct,
            ratios.transport_pct,
            ratios.essentials_pct,
        ],
        "ratio total",
    )?;
    let remainder_pct = pct(checked::minus_all(
        Decimal::ONE,
        &[ratio_total],
        "ratio remainder",
    )?)?;

    let lines = vec![
        MoneyFunnelLine::new(keys::GROSS, "Gross Revenue", gross_revenue),
        MoneyFunnelLine::new(keys::TAXES, "Taxes", tax_amount)
            .with_description("Estimated income taxes (Sweden ~30%)")
            .with_pct_of_gross(pct(ratios.tax_pct)?),
        MoneyFunnelLine::new(keys::HOUSING, "Housing", housing)
            .with_description("Rent or housing costs")
            .with_pct_of_gross(pct(ratios.housing_pct)?),
        MoneyFunnelLine::new(keys::FOOD, "Food", food)
            .with_description("Groceries and meals")
            .with_pct_of_gross(pct(ratios.food_pct)?),
        MoneyFunnelLine::new(keys::TRANSPORT, "Transport", transport)
            .with_description("Public transport or fuel")
            .with_pct_of_gross(pct(ratios.transport_pct)?),
        MoneyFunnelLine::new(keys::ESSENTIALS, "Essentials", essentials)
            .with_description("Utilities, phone, hygiene")
            .with_pct_of_gross(pct(ratios.essentials_pct)?),
        MoneyFunnelLine::new(keys::DISCRETIONARY, "Net Pocket Money", discretionary)
            .with_description("Remaining discretionary income")
            .with_pct_of_gross(remainder_pct),
    ];

    let chart = [
        ChartSegment::new(CHART_TAXES, tax_amount),
        ChartSegment::new(CHART_COSTS, overhead_sum),
        ChartSegment::new(CHART_POCKET, discretionary),
    ];

    let mut meta = BTreeMap::new();
    meta.insert("tax_amount".to_string(), tax_amount);
    // Subtracts the already negative tax amount.
    meta.insert(
        "net_after_tax".to_string(),
        round_money(checked::minus_all(gross_revenue, &[tax_amount], "net after tax")?),
    );
    meta.insert("overhead_sum".to_string(), overhead_sum);

    debug!(
        mode = "employee",
        gross_revenue = %gross_revenue,
        final_net = %discretionary,
        "Employee funnel calculated"
    );

    Ok(CalculationResult {
        mode: Mode::Employee,
        task: task.clone(),
        gross_revenue,
        final_net: discretionary,
        lines,
        chart,
        meta,
    })
}

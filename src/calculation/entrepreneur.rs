//! Sole-trader money funnel.
//!
//! The task rate is VAT-inclusive. The funnel extracts the VAT, applies the
//! standard deduction (schablonavdrag) to find taxable income, deducts
//! income tax and social fees, and finally charges the task its hourly share
//! of the monthly overhead.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    CHART_COSTS, CHART_POCKET, CHART_TAXES, CalculationResult, ChartSegment, EntrepreneurDefaults,
    EntrepreneurDefaultsOverride, Mode, MoneyFunnelLine, TaskDetails, keys,
};

use super::checked;
use super::rounding::{negate, round_money};

/// Returns the standard deduction rate applied to net revenue.
///
/// The rate is 0.25 (25%) and is not configurable.
pub fn schablon_deduction_rate() -> Decimal {
    Decimal::new(25, 2)
}

/// Returns the share of net revenue that is taxable (0.75).
pub fn taxable_income_share() -> Decimal {
    Decimal::new(75, 2)
}

/// Calculates the sole-trader funnel, merging `overrides` over the Swedish
/// defaults first.
///
/// # Errors
///
/// Returns [`EngineError::InvalidConfiguration`] when the merged parameters
/// cannot be divided by and [`EngineError::AmountOutOfRange`] when an amount
/// does not fit in a decimal; see [`calculate_entrepreneur_with`].
///
/// # Examples
///
/// ```
/// use fickpengar::calculation::calculate_entrepreneur;
/// use fickpengar::models::TaskDetails;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let task = TaskDetails::new("Snöskottning", Decimal::from(500), Decimal::from(10));
/// let result = calculate_entrepreneur(&task, None).unwrap();
///
/// assert_eq!(result.gross_revenue, Decimal::from(5000));
/// assert_eq!(result.final_net, Decimal::from_str("1605.90").unwrap());
/// ```
pub fn calculate_entrepreneur(
    task: &TaskDetails,
    overrides: Option<&EntrepreneurDefaultsOverride>,
) -> EngineResult<CalculationResult> {
    let defaults = EntrepreneurDefaults::default();
    let params = overrides.map_or(defaults, |partial| partial.merged_over(&defaults));
    calculate_entrepreneur_with(task, &params)
}

/// Calculates the sole-trader funnel with a complete parameter set.
///
/// Each step is rounded on its own. Taxable income and the standard
/// deduction are both taken from net revenue, and the final profit is
/// recomputed from gross rather than from net income, so they may differ
/// from their subtraction forms by a rounding unit. The hourly overhead is
/// the only unrounded intermediate.
///
/// # Errors
///
/// Returns [`EngineError::InvalidConfiguration`] when
/// `billable_hours_per_month` is not positive or `vat_pct` is -1, and
/// [`EngineError::AmountOutOfRange`] when a step leaves the decimal range,
/// e.g. a large overhead spread over a tiny number of billable hours.
pub fn calculate_entrepreneur_with(
    task: &TaskDetails,
    params: &EntrepreneurDefaults,
) -> EngineResult<CalculationResult> {
    validate(params)?;

    let gross_revenue = round_money(checked::mul(task.rate, task.hours, "gross revenue")?);
    let vat_share = checked::div(
        params.vat_pct,
        checked::sum(&[Decimal::ONE, params.vat_pct], "VAT divisor")?,
        "VAT share",
    )?;
    let vat_portion = round_money(checked::mul(gross_revenue, vat_share, "VAT portion")?);
    let net_revenue = round_money(checked::minus_all(
        gross_revenue,
        &[vat_portion],
        "net revenue",
    )?);
    let schablon_deduction = round_money(checked::mul(
        net_revenue,
        schablon_deduction_rate(),
        "schablonavdrag",
    )?);
    let taxable_income = round_money(checked::mul(
        net_revenue,
        taxable_income_share(),
        "taxable income",
    )?);
    let income_tax = round_money(checked::mul(
        taxable_income,
        params.municipal_tax_pct,
        "income tax",
    )?);
    let social_fees = round_money(checked::mul(
        taxable_income,
        params.social_fee_pct,
        "social fees",
    )?);
    // The deduction only lowers the tax base; no cash leaves for it.
    let net_income = round_money(checked::minus_all(
        net_revenue,
        &[income_tax, social_fees],
        "net income",
    )?);
    let overhead_hourly = checked::div(
        params.overhead_monthly,
        params.billable_hours_per_month,
        "hourly overhead",
    )?;
    let living_overhead =
        round_money(checked::mul(overhead_hourly, task.hours, "living overhead")?);
    let final_profit = round_money(checked::minus_all(
        gross_revenue,
        &[vat_portion, income_tax, social_fees, living_overhead],
        "final profit",
    )?);
    let tax_slice = round_money(checked::sum(
        &[vat_portion, social_fees, income_tax],
        "tax total",
    )?);

    let lines = vec![
        MoneyFunnelLine::new(keys::GROSS, "Gross Revenue (VAT incl.)", gross_revenue),
        MoneyFunnelLine::new(keys::VAT, "VAT Portion", negate(vat_portion))
            .with_description("Value Added Tax inside price"),
        MoneyFunnelLine::new(keys::NET_REVENUE, "Net Revenue (ex VAT)", net_revenue),
        MoneyFunnelLine::new(keys::SCHABLONAVDRAG, "Schablonavdrag", negate(schablon_deduction))
            .with_description("Standard deduction (non-cash) before taxes"),
        MoneyFunnelLine::new(keys::TAXABLE_INCOME, "Taxable Income", taxable_income)
            .with_description("Basis for income tax & social fees"),
        MoneyFunnelLine::new(keys::INCOME_TAX, "Income Tax", negate(income_tax))
            .with_description("Municipal income tax on taxable income"),
        MoneyFunnelLine::new(keys::SOCIAL_FEES, "Social Fees", negate(social_fees))
            .with_description("Egenavgifter on taxable income"),
        MoneyFunnelLine::new(keys::NET_INCOME, "Net Income (after taxes)", net_income),
        MoneyFunnelLine::new(keys::LIVING_OVERHEAD, "Living Overhead", negate(living_overhead))
            .with_description("Hourly share of monthly living costs"),
        MoneyFunnelLine::new(keys::FINAL_PROFIT, "Final Profit", final_profit)
            .with_description("True take-home after all costs"),
    ];

    // The schablon deduction is non-cash and stays out of the tax slice.
    let chart = [
        ChartSegment::new(CHART_TAXES, negate(tax_slice)),
        ChartSegment::new(CHART_COSTS, negate(living_overhead)),
        ChartSegment::new(CHART_POCKET, final_profit),
    ];

    let meta = BTreeMap::from([
        ("vat_portion".to_string(), vat_portion),
        ("net_revenue".to_string(), net_revenue),
        ("schablon_deduction".to_string(), schablon_deduction),
        ("taxable_income".to_string(), taxable_income),
        ("income_tax".to_string(), income_tax),
        ("social_fees".to_string(), social_fees),
        ("net_income".to_string(), net_income),
        ("overhead_hourly".to_string(), overhead_hourly),
        ("living_overhead".to_string(), living_overhead),
    ]);

    debug!(
        mode = "entrepreneur",
        gross_revenue = %gross_revenue,
        vat_portion = %vat_portion,
        final_net = %final_profit,
        "Entrepreneur funnel calculated"
    );

    Ok(CalculationResult {
        mode: Mode::Entrepreneur,
        task: task.clone(),
        gross_revenue,
        final_net: final_profit,
        lines,
        chart,
        meta,
    })
}

/// Rejects parameter sets whose divisors are zero or meaningless.
fn validate(params: &EntrepreneurDefaults) -> EngineResult<()> {
    if params.billable_hours_per_month <= Decimal::ZERO {
        return Err(EngineError::InvalidConfiguration {
            field: "billable_hours_per_month".to_string(),
            message: format!(
                "must be greater than zero, got {}",
                params.billable_hours_per_month
            ),
        });
    }

    if params.vat_pct == Decimal::NEGATIVE_ONE {
        return Err(EngineError::InvalidConfiguration {
            field: "vat_pct".to_string(),
            message: "a VAT rate of -1 leaves no VAT-exclusive price".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn task(rate: &str, hours: &str) -> TaskDetails {
        TaskDetails::new("Snöskottning", dec(rate), dec(hours))
    }

    /// SF-001: Swedish defaults on 500 kr × 10 h
    #[test]
    fn test_swedish_defaults_scenario() {
        let result = calculate_entrepreneur(&task("500", "10"), None).unwrap();

        assert_eq!(result.mode, Mode::Entrepreneur);
        assert_eq!(result.gross_revenue, dec("5000.00"));
        assert_eq!(result.meta["vat_portion"], dec("1000.00"));
        assert_eq!(result.meta["net_revenue"], dec("4000.00"));
        assert_eq!(result.meta["schablon_deduction"], dec("1000.00"));
        assert_eq!(result.meta["taxable_income"], dec("3000.00"));
        assert_eq!(result.meta["income_tax"], dec("900.00"));
        assert_eq!(result.meta["social_fees"], dec("869.10"));
        assert_eq!(result.meta["net_income"], dec("2230.90"));
        assert_eq!(result.meta["overhead_hourly"], dec("62.5"));
        assert_eq!(result.meta["living_overhead"], dec("625.00"));
        assert_eq!(result.final_net, dec("1605.90"));
    }

    /// SF-002: lines come out in the fixed funnel order with outflows negative
    #[test]
    fn test_line_order_and_signs() {
        let result = calculate_entrepreneur(&task("500", "10"), None).unwrap();

        let keys: Vec<&str> = result.lines.iter().map(|line| line.key.as_str()).collect();
        assert_eq!(keys, keys::ENTREPRENEUR.to_vec());

        let amounts: Vec<Decimal> = result.lines.iter().map(|line| line.amount).collect();
        assert_eq!(
            amounts,
            vec![
                dec("5000.00"),
                dec("-1000.00"),
                dec("4000.00"),
                dec("-1000.00"),
                dec("3000.00"),
                dec("-900.00"),
                dec("-869.10"),
                dec("2230.90"),
                dec("-625.00"),
                dec("1605.90"),
            ]
        );
    }

    /// SF-003: VAT is extracted from a VAT-inclusive price
    #[test]
    fn test_vat_extracted_not_added() {
        let result = calculate_entrepreneur(&task("1250", "1"), None).unwrap();
        assert_eq!(result.meta["vat_portion"], dec("250.00"));
        assert_eq!(result.amount(keys::NET_REVENUE), Some(dec("1000.00")));
    }

    #[test]
    fn test_vat_extraction_at_twelve_percent() {
        let overrides = EntrepreneurDefaultsOverride {
            vat_pct: Some(dec("0.12")),
            ..Default::default()
        };
        let result = calculate_entrepreneur(&task("112", "1"), Some(&overrides)).unwrap();
        assert_eq!(result.meta["vat_portion"], dec("12.00"));
        assert_eq!(result.meta["net_revenue"], dec("100.00"));
    }

    /// SF-004: deduction and taxable income are rounded independently
    #[test]
    fn test_schablon_and_taxable_income_rounded_independently() {
        let result = calculate_entrepreneur(&task("0.03", "1"), None).unwrap();

        assert_eq!(result.meta["vat_portion"], dec("0.01"));
        assert_eq!(result.meta["net_revenue"], dec("0.02"));
        assert_eq!(result.meta["schablon_deduction"], dec("0.01"));
        assert_eq!(result.meta["taxable_income"], dec("0.02"));
    }

    /// SF-005: hourly overhead is not rounded before multiplying by hours
    #[test]
    fn test_hourly_overhead_stays_unrounded() {
        let overrides = EntrepreneurDefaultsOverride {
            overhead_monthly: Some(dec("7400")),
            ..Default::default()
        };
        let result = calculate_entrepreneur(&task("300", "3"), Some(&overrides)).unwrap();

        // 61.67 × 3 would give 185.01
        assert_eq!(result.meta["living_overhead"], dec("185.00"));
        assert!(result.meta["overhead_hourly"] > dec("61.666"));
        assert!(result.meta["overhead_hourly"] < dec("61.667"));
    }

    /// SF-006: zero billable hours is rejected
    #[test]
    fn test_zero_billable_hours_rejected() {
        let overrides = EntrepreneurDefaultsOverride {
            billable_hours_per_month: Some(Decimal::ZERO),
            ..Default::default()
        };
        let error = calculate_entrepreneur(&task("500", "10"), Some(&overrides)).unwrap_err();

        match error {
            EngineError::InvalidConfiguration { field, .. } => {
                assert_eq!(field, "billable_hours_per_month");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_negative_billable_hours_rejected() {
        let params = EntrepreneurDefaults {
            billable_hours_per_month: dec("-10"),
            ..Default::default()
        };
        assert!(calculate_entrepreneur_with(&task("500", "10"), &params).is_err());
    }

    #[test]
    fn test_vat_of_minus_one_rejected() {
        let params = EntrepreneurDefaults {
            vat_pct: dec("-1"),
            ..Default::default()
        };
        let error = calculate_entrepreneur_with(&task("500", "10"), &params).unwrap_err();
        assert!(error.to_string().contains("vat_pct"));
    }

    /// SF-007: the tax slice excludes the non-cash deduction
    #[test]
    fn test_chart_excludes_schablon_deduction() {
        let result = calculate_entrepreneur(&task("500", "10"), None).unwrap();

        assert_eq!(result.chart[0].label, "Skatter");
        assert_eq!(result.chart[0].value, dec("-2769.10"));
        assert_eq!(result.chart[1].label, "Kostnader");
        assert_eq!(result.chart[1].value, dec("-625.00"));
        assert_eq!(result.chart[2].label, "Fickpengar");
        assert_eq!(result.chart[2].value, dec("1605.90"));
    }

    #[test]
    fn test_final_profit_recomputed_from_gross() {
        let result = calculate_entrepreneur(&task("437.77", "3.3"), None).unwrap();
        let m = &result.meta;

        let recomputed = result.gross_revenue
            - m["vat_portion"]
            - m["income_tax"]
            - m["social_fees"]
            - m["living_overhead"];
        assert_eq!(result.final_net, recomputed);
        assert_eq!(result.amount(keys::FINAL_PROFIT), Some(result.final_net));
    }

    #[test]
    fn test_zero_overhead_leaves_net_income() {
        let overrides = EntrepreneurDefaultsOverride {
            overhead_monthly: Some(Decimal::ZERO),
            ..Default::default()
        };
        let result = calculate_entrepreneur(&task("500", "10"), Some(&overrides)).unwrap();

        assert_eq!(result.amount(keys::LIVING_OVERHEAD).unwrap().to_string(), "0.00");
        assert_eq!(result.final_net, dec("2230.90"));
    }

    #[test]
    fn test_deduction_rates() {
        assert_eq!(schablon_deduction_rate(), dec("0.25"));
        assert_eq!(taxable_income_share(), dec("0.75"));
        assert_eq!(schablon_deduction_rate() + taxable_income_share(), Decimal::ONE);
    }

    #[test]
    fn test_identical_inputs_give_identical_results() {
        let first = calculate_entrepreneur(&task("312.50", "2.25"), None).unwrap();
        let second = calculate_entrepreneur(&task("312.50", "2.25"), None).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_oversized_gross_is_rejected() {
        let error = calculate_entrepreneur(&task("100000000000000000000", "10000000000"), None)
            .unwrap_err();
        assert!(matches!(error, EngineError::AmountOutOfRange { ref step } if step == "gross revenue"));
    }

    #[test]
    fn test_tiny_billable_hours_overflow_is_rejected() {
        let overrides = EntrepreneurDefaultsOverride {
            overhead_monthly: Some(dec("1000000000000000000000")),
            billable_hours_per_month: Some(dec("0.0000000001")),
            ..Default::default()
        };
        let error = calculate_entrepreneur(&task("500", "10"), Some(&overrides)).unwrap_err();
        assert!(matches!(error, EngineError::AmountOutOfRange { ref step } if step == "hourly overhead"));
    }
}

//! Earnings statement and invoice summary.
//!
//! A [`Statement`] groups the funnel lines of a result into report
//! sections, one set of sections per mode, and renders them as a plain-text
//! table with a final take-home box.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{CalculationResult, Mode, MoneyFunnelLine, keys};

use super::format::{format_pct_of_gross, format_sek};

/// Keys rendered as emphasized subtotal rows.
const SUBTOTAL_KEYS: [&str; 6] = [
    keys::GROSS,
    keys::NET_REVENUE,
    keys::NET_INCOME,
    keys::FINAL_PROFIT,
    keys::DISCRETIONARY,
    keys::TAXABLE_INCOME,
];

/// Descriptions are cut to this many characters.
const DESCRIPTION_LIMIT: usize = 60;

const STAGE_WIDTH: usize = 30;
const ITEM_WIDTH: usize = 46;
const PCT_WIDTH: usize = 8;
const AMOUNT_WIDTH: usize = 18;

/// Report sections as (label, line keys).
type SectionLayout = &'static [(&'static str, &'static [&'static str])];

const ENTREPRENEUR_SECTIONS: SectionLayout = &[
    ("VAT Deduction", &[keys::GROSS, keys::VAT, keys::NET_REVENUE]),
    (
        "Tax Deductions & Taxes",
        &[
            keys::SCHABLONAVDRAG,
            keys::TAXABLE_INCOME,
            keys::INCOME_TAX,
            keys::SOCIAL_FEES,
            keys::NET_INCOME,
        ],
    ),
    (
        "Living Costs & Final Profit",
        &[keys::LIVING_OVERHEAD, keys::FINAL_PROFIT],
    ),
];

const EMPLOYEE_SECTIONS: SectionLayout = &[
    ("Gross Pay", &[keys::GROSS]),
    ("Tax", &[keys::TAXES]),
    (
        "Living Costs",
        &[keys::HOUSING, keys::FOOD, keys::TRANSPORT, keys::ESSENTIALS],
    ),
    ("Take-home", &[keys::DISCRETIONARY]),
];

fn section_layout(mode: Mode) -> SectionLayout {
    match mode {
        Mode::Employee => EMPLOYEE_SECTIONS,
        Mode::Entrepreneur => ENTREPRENEUR_SECTIONS,
    }
}

/// Optional header details for a statement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementOptions {
    /// Household shown in the header; "Household" when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub household_name: Option<String>,
    /// Child shown in the header; "Child" when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child_name: Option<String>,
    /// Issue date printed under the header, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issued_on: Option<NaiveDate>,
}

/// One row of a statement section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementRow {
    /// Stable key of the funnel line.
    pub key: String,
    /// Row label.
    pub label: String,
    /// Line description, cut to sixty characters.
    pub description: Option<String>,
    /// Share of gross, e.g. "20.0%", or empty when gross is zero.
    pub pct: String,
    /// Signed amount.
    pub amount: Decimal,
    /// Whether the row is a subtotal.
    pub emphasized: bool,
}

impl StatementRow {
    fn from_line(line: &MoneyFunnelLine, gross: Decimal) -> Self {
        Self {
            key: line.key.clone(),
            label: line.label.clone(),
            description: line
                .description
                .as_ref()
                .map(|text| text.chars().take(DESCRIPTION_LIMIT).collect()),
            pct: format_pct_of_gross(line.amount, gross),
            amount: line.amount,
            emphasized: SUBTOTAL_KEYS.contains(&line.key.as_str()),
        }
    }
}

/// A labelled group of rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementSection {
    /// Section label, e.g. "VAT Deduction".
    pub label: String,
    /// Rows in funnel order.
    pub rows: Vec<StatementRow>,
}

/// A printable earnings statement (employee) or invoice summary
/// (sole trader).
///
/// # Example
///
/// ```
/// use fickpengar::calculation::calculate_employee;
/// use fickpengar::export::{Statement, StatementOptions};
/// use fickpengar::models::TaskDetails;
/// use rust_decimal::Decimal;
///
/// let task = TaskDetails::new("Gräsklippning", Decimal::from(250), Decimal::from(4));
/// let result = calculate_employee(&task, None).unwrap();
/// let statement = Statement::build(&result, &StatementOptions::default());
///
/// assert_eq!(statement.title, "EARNINGS STATEMENT");
/// assert_eq!(statement.sections.len(), 4);
/// assert!(statement.to_string().contains("FINAL TAKE-HOME"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    /// The funnel model the statement reports on.
    pub mode: Mode,
    /// Document title.
    pub title: &'static str,
    /// Suggested download file name.
    pub file_name: &'static str,
    /// Household name.
    pub household_name: String,
    /// Child name.
    pub child_name: String,
    /// Task label.
    pub task_name: String,
    /// Hourly rate.
    pub rate: Decimal,
    /// Hours worked.
    pub hours: Decimal,
    /// Issue date, if any.
    pub issued_on: Option<NaiveDate>,
    /// Non-empty sections in report order.
    pub sections: Vec<StatementSection>,
    /// Label of the final take-home box.
    pub final_label: &'static str,
    /// Headline take-home amount.
    pub final_net: Decimal,
}

impl Statement {
    /// Builds a statement from a calculation result.
    ///
    /// Lines are looked up by key: keys missing from the result are
    /// skipped and sections left without rows are dropped.
    pub fn build(result: &CalculationResult, options: &StatementOptions) -> Self {
        let sections = section_layout(result.mode)
            .iter()
            .filter_map(|(label, section_keys)| {
                let rows: Vec<StatementRow> = section_keys
                    .iter()
                    .filter_map(|key| result.line(key))
                    .map(|line| StatementRow::from_line(line, result.gross_revenue))
                    .collect();

                (!rows.is_empty()).then(|| StatementSection {
                    label: label.to_string(),
                    rows,
                })
            })
            .collect();

        Self {
            mode: result.mode,
            title: title(result.mode),
            file_name: file_name(result.mode),
            household_name: options
                .household_name
                .clone()
                .unwrap_or_else(|| "Household".to_string()),
            child_name: options
                .child_name
                .clone()
                .unwrap_or_else(|| "Child".to_string()),
            task_name: result.task.task_name.clone(),
            rate: result.task.rate,
            hours: result.task.hours,
            issued_on: options.issued_on,
            sections,
            final_label: match result.mode {
                Mode::Employee => "FINAL TAKE-HOME",
                Mode::Entrepreneur => "FINAL PROFIT (TAKE-HOME)",
            },
            final_net: result.final_net,
        }
    }
}

/// Returns the document title for a mode.
pub fn title(mode: Mode) -> &'static str {
    match mode {
        Mode::Employee => "EARNINGS STATEMENT",
        Mode::Entrepreneur => "INVOICE SUMMARY",
    }
}

/// Returns the download file name for a mode.
pub fn file_name(mode: Mode) -> &'static str {
    match mode {
        Mode::Employee => "earnings-statement.pdf",
        Mode::Entrepreneur => "invoice-summary.pdf",
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "-".repeat(STAGE_WIDTH + ITEM_WIDTH + PCT_WIDTH + AMOUNT_WIDTH);

        writeln!(f, "{}", self.title)?;
        writeln!(f, "Household: {}", self.household_name)?;
        writeln!(f, "Child: {}", self.child_name)?;
        writeln!(f, "Task: {}", self.task_name)?;
        writeln!(f, "Rate: {} kr", self.rate)?;
        writeln!(f, "Hours: {}", self.hours)?;
        if let Some(date) = self.issued_on {
            writeln!(f, "Issued: {}", date.format("%Y-%m-%d"))?;
        }
        writeln!(f, "{rule}")?;
        writeln!(
            f,
            "{:<STAGE_WIDTH$}{:<ITEM_WIDTH$}{:>PCT_WIDTH$}{:>AMOUNT_WIDTH$}",
            "Stage", "Item", "Pct", "Amount (kr)"
        )?;
        writeln!(f, "{rule}")?;

        for section in &self.sections {
            for (index, row) in section.rows.iter().enumerate() {
                let stage = if index == 0 { section.label.as_str() } else { "" };
                let item = if row.emphasized {
                    row.label.clone()
                } else {
                    format!("  {}", row.label)
                };
                writeln!(
                    f,
                    "{:<STAGE_WIDTH$}{:<ITEM_WIDTH$}{:>PCT_WIDTH$}{:>AMOUNT_WIDTH$}",
                    stage,
                    item,
                    row.pct,
                    format_sek(row.amount)
                )?;
                if let Some(description) = &row.description {
                    writeln!(f, "{:<STAGE_WIDTH$}    {}", "", description)?;
                }
            }
            writeln!(f, "{rule}")?;
        }

        writeln!(f)?;
        writeln!(f, "{}: {}", self.final_label, format_sek(self.final_net))?;
        writeln!(f, "This is what you actually keep after all costs.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::{calculate_employee, calculate_entrepreneur};
    use crate::models::TaskDetails;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn entrepreneur_result() -> CalculationResult {
        let task = TaskDetails::new("Snöskottning", dec("500"), dec("10"));
        calculate_entrepreneur(&task, None).unwrap()
    }

    fn employee_result() -> CalculationResult {
        let task = TaskDetails::new("Gräsklippning", dec("250"), dec("4"));
        calculate_employee(&task, None).unwrap()
    }

    fn section_keys(statement: &Statement) -> Vec<(String, Vec<String>)> {
        statement
            .sections
            .iter()
            .map(|section| {
                let keys = section.rows.iter().map(|row| row.key.clone()).collect();
                (section.label.clone(), keys)
            })
            .collect()
    }

    #[test]
    fn test_entrepreneur_sections() {
        let statement = Statement::build(&entrepreneur_result(), &StatementOptions::default());

        assert_eq!(statement.title, "INVOICE SUMMARY");
        assert_eq!(statement.file_name, "invoice-summary.pdf");
        assert_eq!(statement.final_label, "FINAL PROFIT (TAKE-HOME)");
        assert_eq!(
            section_keys(&statement),
            vec![
                (
                    "VAT Deduction".to_string(),
                    vec!["gross".to_string(), "vat".to_string(), "netRevenue".to_string()]
                ),
                (
                    "Tax Deductions & Taxes".to_string(),
                    vec![
                        "schablonavdrag".to_string(),
                        "taxableIncome".to_string(),
                        "incomeTax".to_string(),
                        "socialFees".to_string(),
                        "netIncome".to_string(),
                    ]
                ),
                (
                    "Living Costs & Final Profit".to_string(),
                    vec!["livingOverhead".to_string(), "finalProfit".to_string()]
                ),
            ]
        );
    }

    #[test]
    fn test_employee_sections() {
        let statement = Statement::build(&employee_result(), &StatementOptions::default());

        assert_eq!(statement.title, "EARNINGS STATEMENT");
        assert_eq!(statement.file_name, "earnings-statement.pdf");
        assert_eq!(statement.final_label, "FINAL TAKE-HOME");

        let labels: Vec<&str> = statement
            .sections
            .iter()
            .map(|section| section.label.as_str())
            .collect();
        assert_eq!(labels, vec!["Gross Pay", "Tax", "Living Costs", "Take-home"]);
        assert_eq!(statement.sections[2].rows.len(), 4);
    }

    #[test]
    fn test_row_percentages_and_emphasis() {
        let statement = Statement::build(&entrepreneur_result(), &StatementOptions::default());
        let rows: Vec<&StatementRow> = statement
            .sections
            .iter()
            .flat_map(|section| section.rows.iter())
            .collect();

        assert_eq!(rows[0].pct, "100.0%");
        assert!(rows[0].emphasized);
        assert_eq!(rows[1].pct, "20.0%");
        assert!(!rows[1].emphasized);
        assert_eq!(rows[3].key, "schablonavdrag");
        assert_eq!(rows[3].pct, "20.0%");
        assert!(rows[4].emphasized);
    }

    #[test]
    fn test_zero_gross_leaves_pct_empty() {
        let task = TaskDetails::new("Snöskottning", dec("500"), dec("0"));
        let result = calculate_entrepreneur(&task, None).unwrap();
        let statement = Statement::build(&result, &StatementOptions::default());

        assert!(
            statement
                .sections
                .iter()
                .flat_map(|section| section.rows.iter())
                .all(|row| row.pct.is_empty())
        );
    }

    #[test]
    fn test_missing_lines_skipped_and_empty_sections_dropped() {
        let mut result = employee_result();
        result.lines.retain(|line| line.key != keys::TAXES);
        result.lines.retain(|line| line.key != keys::FOOD);

        let statement = Statement::build(&result, &StatementOptions::default());
        let labels: Vec<&str> = statement
            .sections
            .iter()
            .map(|section| section.label.as_str())
            .collect();

        assert_eq!(labels, vec!["Gross Pay", "Living Costs", "Take-home"]);
        assert_eq!(statement.sections[1].rows.len(), 3);
    }

    #[test]
    fn test_header_defaults_and_overrides() {
        let statement = Statement::build(&employee_result(), &StatementOptions::default());
        assert_eq!(statement.household_name, "Household");
        assert_eq!(statement.child_name, "Child");

        let options = StatementOptions {
            household_name: Some("Familjen Berg".to_string()),
            child_name: Some("Elsa".to_string()),
            issued_on: NaiveDate::from_ymd_opt(2025, 3, 14),
        };
        let statement = Statement::build(&employee_result(), &options);
        let text = statement.to_string();

        assert!(text.contains("Household: Familjen Berg"));
        assert!(text.contains("Child: Elsa"));
        assert!(text.contains("Issued: 2025-03-14"));
    }

    #[test]
    fn test_rendered_text() {
        let statement = Statement::build(&entrepreneur_result(), &StatementOptions::default());
        let text = statement.to_string();

        assert!(text.starts_with("INVOICE SUMMARY\n"));
        assert!(text.contains("Task: Snöskottning"));
        assert!(text.contains("Rate: 500 kr"));
        assert!(text.contains("Hours: 10"));
        assert!(text.contains("-1\u{a0}000,00 kr"));
        assert!(text.contains("Egenavgifter on taxable income"));
        assert!(text.contains("FINAL PROFIT (TAKE-HOME): 1\u{a0}605,90 kr"));
        assert!(!text.contains("Issued:"));
    }

    #[test]
    fn test_long_descriptions_are_cut() {
        let mut result = employee_result();
        result.lines[1].description = Some("x".repeat(80));

        let statement = Statement::build(&result, &StatementOptions::default());
        let description = statement.sections[1].rows[0].description.as_ref().unwrap();
        assert_eq!(description.chars().count(), 60);
    }
}

//! Calculation logic for the money-funnel engine.
//!
//! This module contains the shared monetary rounding and the two funnel
//! calculators: the employee model with flat ratio deductions and the
//! sole-trader model with VAT extraction, standard deduction, income tax,
//! social fees and an hourly share of monthly overhead.
//!
//! Both calculators are pure: identical inputs always give identical
//! results and no state is shared between calls.

mod checked;
mod employee;
mod entrepreneur;
mod rounding;

pub use employee::{calculate_employee, calculate_employee_with};
pub use entrepreneur::{
    calculate_entrepreneur, calculate_entrepreneur_with, schablon_deduction_rate,
    taxable_income_share,
};
pub use rounding::{negate, round_money};

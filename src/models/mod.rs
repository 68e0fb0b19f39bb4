//! Core data models for the money-funnel engine.
//!
//! This module contains all the domain models used throughout the engine.

mod calculation_result;
mod chore;
mod parameters;
mod task;

pub use calculation_result::{
    CHART_COSTS, CHART_POCKET, CHART_TAXES, CalculationResult, ChartSegment, MoneyFunnelLine, keys,
};
pub use chore::ChoreTier;
pub use parameters::{
    EmployeeRatios, EmployeeRatiosOverride, EntrepreneurDefaults, EntrepreneurDefaultsOverride,
};
pub use task::{Mode, TaskDetails, TaskDetailsOverride};

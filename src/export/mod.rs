//! Statement export.
//!
//! Turns a calculation result into the grouped earnings statement or
//! invoice summary that a household prints or hands over, with amounts
//! formatted for the Swedish locale.

mod format;
mod statement;

pub use format::{GROUP_SEPARATOR, format_pct_of_gross, format_sek};
pub use statement::{
    Statement, StatementOptions, StatementRow, StatementSection, file_name, title,
};

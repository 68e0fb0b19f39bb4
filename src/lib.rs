//! Money-funnel engine for household pocket money.
//!
//! This crate turns the pay for a household chore (rate × hours) into the
//! amount a child actually keeps, under two models: an employee model with
//! flat ratio deductions and a Swedish sole-trader model with VAT, standard
//! deduction, income tax, social fees and monthly overhead. Around the two
//! calculators it provides the chore catalog, statement export, Swish
//! payment links, settings persistence and an HTTP API.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod payment;
pub mod persistence;

//! HTTP API module for the money-funnel engine.
//!
//! This module provides the REST API endpoints for calculating money
//! funnels, listing chores, rendering statements and creating payment links.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::{ChoresResponse, create_router};
pub use request::{CalculationRequest, PaymentLinkRequest, StatementRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;

//! HTTP API module for the payroll engine.
//!
//! Exposes pay statements, the pay period calendar and team summaries
//! over JSON.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::{MAX_HISTORY_LENGTH, create_router};
pub use request::{
    AgentRecordsRequest, PayPeriodRequest, PeriodSelection, PeriodsQuery, SaleRequest,
    ShiftRequest, StatementRequest, TeamSummaryRequest,
};
pub use response::{
    ApiError, ApiErrorResponse, PeriodsResponse, StatementResponse, TeamSummaryResponse,
};
pub use state::AppState;

//! Web layer for the ride-sharing service.
//!
//! JSON endpoints for the organiser dashboard and the ride matcher, plus
//! CSV downloads.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;

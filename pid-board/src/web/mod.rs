//! Web layer for the departure board.
//!
//! Serves the nearby and configured-stops boards, as JSON or as an HTML
//! page depending on the request's Accept header.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
pub use templates::*;

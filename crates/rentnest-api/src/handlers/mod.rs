//! Request handlers, grouped the way the routes are: marketplace-wide
//! (`app`), landlord and tenant.

pub mod app;
pub mod health;
pub mod landlord;
mod profiles;
pub mod tenant;

use axum::http::StatusCode;

/// Status reported by the remote store for the underlying call.
pub(crate) fn remote_status(status: u16) -> StatusCode {
    StatusCode::from_u16(status).unwrap_or(StatusCode::OK)
}

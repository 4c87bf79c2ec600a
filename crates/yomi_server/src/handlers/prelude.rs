//! Frequently used imports for handlers.

pub use crate::{
    error::{YomiError, YomiResult},
    session::CurrentSession,
    YomiState,
};
pub use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
pub use tracing::instrument;
pub use yomi_api::{request as req, response as res};

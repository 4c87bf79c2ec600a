//! yomi server error type.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use yomi_api::response as res;

pub type YomiResult<T> = Result<T, YomiError>;

pub struct YomiError {
    status: StatusCode,
    report: eyre::Report,
}

impl YomiError {
    /// An error caused by the client, reported with the given status.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            report: eyre::eyre!(message.into()),
        }
    }
}

impl<E> From<E> for YomiError
where
    E: Into<eyre::Error>,
{
    fn from(value: E) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            report: value.into(),
        }
    }
}

impl IntoResponse for YomiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!("{:?}", self.report);
        }
        let err = res::Error {
            message: format!("{:#}", self.report),
        };
        (self.status, Json(err)).into_response()
    }
}

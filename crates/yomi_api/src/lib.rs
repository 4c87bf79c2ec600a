//! Types for communication between the server and its clients.

pub mod request;
pub mod response;

pub const SESSION_COOKIE_NAME: &str = "yomi_session";

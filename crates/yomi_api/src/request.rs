//! Types for requests from clients to the server.

use serde::{Deserialize, Serialize};

/// Text produced by a speech recognizer or pasted by the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    pub text: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Check {
    /// The typed answer, used when no transcript has been captured.
    #[serde(default)]
    pub answer: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct History {
    pub limit: Option<usize>,
}

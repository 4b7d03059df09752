use serde::{Deserialize, Serialize};

/// JSON body the server returns on every failed request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

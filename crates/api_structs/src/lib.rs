mod reminder;
mod status;

use serde::{Deserialize, Serialize};

pub mod dtos {
    pub use crate::reminder::dtos::*;
}

pub use crate::reminder::api::*;
pub use crate::status::api::*;

/// Body of every error response
#[derive(Debug, Deserialize, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Password submission on the access page.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UnlockRequest {
    /// Candidate password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

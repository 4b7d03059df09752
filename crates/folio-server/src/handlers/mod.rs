pub mod cards;
pub mod profiles;

use uuid::Uuid;

use crate::error::AppError;

/// Non-UUID ids are reported as missing
fn parse_id(raw: &str, entity: &'static str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound(entity))
}

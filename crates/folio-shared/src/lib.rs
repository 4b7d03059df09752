pub mod api;
pub mod models;
pub mod vcard;

pub use models::*;

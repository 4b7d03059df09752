mod cards;
mod error;
mod profiles;

pub use cards::*;
pub use error::*;
pub use profiles::*;

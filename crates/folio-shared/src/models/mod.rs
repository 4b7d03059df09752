mod card;
mod profile;

pub use card::*;
pub use profile::*;

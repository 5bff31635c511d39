pub mod attribute;
pub mod player;

pub use attribute::*;
pub use player::*;

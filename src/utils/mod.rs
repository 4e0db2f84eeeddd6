pub mod units;
pub mod validators;

pub use units::*;
pub use validators::*;

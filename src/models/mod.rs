pub mod enums;
pub mod quantities;

pub use enums::*;
pub use quantities::*;

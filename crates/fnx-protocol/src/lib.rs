pub mod endpoint;
pub mod health;

pub use endpoint::*;
pub use health::*;

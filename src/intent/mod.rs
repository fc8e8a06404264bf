pub mod classifier;
pub mod types;

pub use classifier::*;
pub use types::*;

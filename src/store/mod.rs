pub mod commerce;
pub mod memory;
pub mod types;

pub use commerce::*;
pub use memory::*;
pub use types::*;

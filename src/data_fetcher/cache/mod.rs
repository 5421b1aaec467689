mod core;
pub mod types;

// Re-export cache types
pub use types::*;
// Re-export the cache itself
pub use core::GameCache;

pub mod api;
pub mod cache;
pub mod directory;
pub mod models;
pub mod processors;

pub use directory::{CacheKey, DirectoryEvent, DirectoryObserver, GameDirectory};
pub use models::{Event, EventStatus, StreamCandidate, StreamQuality};
pub use processors::{GameFilter, failover_stream, select_default_stream};

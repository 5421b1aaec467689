pub mod fetch_utils;
pub mod http_client;
pub mod retry;
pub mod source;
pub mod urls;

// Re-export URL utilities
pub use urls::*;
// Re-export HTTP client utilities
pub use http_client::create_http_client_with_timeout;
// Re-export the retry wrapper and the source seam
pub use retry::{RetryPolicy, fetch_with_retry};
pub use source::{GameSource, HttpGameSource};

//! Prompts used when no config file exists yet

use crate::error::AppError;
use tokio::io::{self, AsyncBufReadExt};

/// Asks for the stream directory backend URL on stdin and returns it trimmed.
///
/// # Example
/// ```no_run
/// use live_sports_streams::config::user_prompts::prompt_for_backend_url;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let backend_url = prompt_for_backend_url().await?;
/// println!("Using backend: {}", backend_url);
/// # Ok(())
/// # }
/// ```
pub async fn prompt_for_backend_url() -> Result<String, AppError> {
    println!("Please enter the stream directory backend URL: ");
    let mut input = String::new();
    let mut reader = io::BufReader::new(io::stdin());
    reader.read_line(&mut input).await?;
    Ok(input.trim().to_string())
}

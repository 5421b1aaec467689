use serde::{Deserialize, Deserializer};

pub mod event;
pub mod stream;

pub use event::{Event, EventStatus};
pub use stream::{StreamCandidate, StreamQuality};

/// Treats an explicit `null` the same as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

use super::null_as_default;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Resolution tier advertised by a stream provider.
///
/// The wire format is a free-form string. `FHD`, `HD` and `SD` are recognized
/// case-insensitively; anything else is kept verbatim as [`StreamQuality::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StreamQuality {
    Fhd,
    Hd,
    Sd,
    Other(String),
}

impl StreamQuality {
    /// Fixed rank used for ordering: FHD 3, HD 2, SD 1, anything else 0.
    pub fn rank(&self) -> u8 {
        match self {
            StreamQuality::Fhd => 3,
            StreamQuality::Hd => 2,
            StreamQuality::Sd => 1,
            StreamQuality::Other(_) => 0,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            StreamQuality::Fhd => "FHD",
            StreamQuality::Hd => "HD",
            StreamQuality::Sd => "SD",
            StreamQuality::Other(label) => label,
        }
    }
}

impl From<String> for StreamQuality {
    fn from(label: String) -> Self {
        let trimmed = label.trim();
        if trimmed.eq_ignore_ascii_case("FHD") {
            StreamQuality::Fhd
        } else if trimmed.eq_ignore_ascii_case("HD") {
            StreamQuality::Hd
        } else if trimmed.eq_ignore_ascii_case("SD") {
            StreamQuality::Sd
        } else {
            StreamQuality::Other(label)
        }
    }
}

impl From<&str> for StreamQuality {
    fn from(label: &str) -> Self {
        StreamQuality::from(label.to_string())
    }
}

impl From<StreamQuality> for String {
    fn from(quality: StreamQuality) -> Self {
        match quality {
            StreamQuality::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

impl Default for StreamQuality {
    fn default() -> Self {
        StreamQuality::Other(String::new())
    }
}

impl fmt::Display for StreamQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One provider's link to watch an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamCandidate {
    pub id: String,
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub quality: StreamQuality,
    #[serde(default, deserialize_with = "null_as_default")]
    pub server: String,
    #[serde(
        rename = "isWorking",
        alias = "working",
        default,
        deserialize_with = "null_as_default"
    )]
    pub is_working: bool,
}

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    #[default]
    Movie,
    Tv,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Tv => "tv",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseMediaTypeError(String);

impl fmt::Display for ParseMediaTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown media type '{}', expected 'movie' or 'tv'", self.0)
    }
}

impl std::error::Error for ParseMediaTypeError {}

impl FromStr for MediaType {
    type Err = ParseMediaTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "movie" => Ok(MediaType::Movie),
            "tv" | "show" | "series" => Ok(MediaType::Tv),
            _ => Err(ParseMediaTypeError(s.to_string())),
        }
    }
}

/// Identity of a title across every collection: the provider id plus its media type.
///
/// A movie and a series may share the same numeric id, so the id alone is never a key.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct MediaKey {
    pub id: u64,
    pub media_type: MediaType,
}

impl MediaKey {
    pub fn new(id: u64, media_type: MediaType) -> Self {
        Self { id, media_type }
    }

    pub fn movie(id: u64) -> Self {
        Self::new(id, MediaType::Movie)
    }

    pub fn tv(id: u64) -> Self {
        Self::new(id, MediaType::Tv)
    }

    /// Key used in the persisted ratings map, e.g. `tv_1399`.
    pub fn storage_key(&self) -> String {
        format!("{}_{}", self.media_type, self.id)
    }
}

impl fmt::Display for MediaKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.media_type, self.id)
    }
}

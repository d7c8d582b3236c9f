pub mod error;
pub mod traits;
pub mod tmdb;

pub use error::SourceError;
pub use traits::{Locale, MetadataProvider};
pub use tmdb::TmdbClient;

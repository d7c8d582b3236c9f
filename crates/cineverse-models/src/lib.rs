pub mod country;
pub mod media;
pub mod continue_watching;
pub mod profile;
pub mod rating;
pub mod season;
pub mod watchlist;

pub use country::Country;
pub use media::{MediaKey, MediaType, ParseMediaTypeError};
pub use continue_watching::ContinueWatchingEntry;
pub use profile::{MaturityRating, Profile, ProfileSettings};
pub use rating::{RatingEntry, Thumb};
pub use season::{Episode, EpisodePosition, Season, SeasonDetails};
pub use watchlist::WatchListEntry;

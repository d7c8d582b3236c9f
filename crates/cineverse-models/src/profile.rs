use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MaturityRating {
    Kids,
    All,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfileSettings {
    pub language: String,
    pub maturity_rating: MaturityRating,
    pub autoplay: bool,
}

impl ProfileSettings {
    pub fn for_kids(is_kids: bool) -> Self {
        Self {
            language: "fr-FR".to_string(),
            maturity_rating: if is_kids { MaturityRating::Kids } else { MaturityRating::All },
            autoplay: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub is_kids: bool,
    pub avatar: String,
    pub created_date: DateTime<Utc>,
    pub settings: ProfileSettings,
}

impl Profile {
    pub const DEFAULT_ID: &'static str = "main";

    /// Avatar used when a profile is created without one.
    pub fn default_avatar(seed: &str) -> String {
        format!("https://i.pravatar.cc/150?u={}", seed)
    }

    /// The profile synthesized when none exist yet.
    pub fn default_main() -> Self {
        Self {
            id: Self::DEFAULT_ID.to_string(),
            name: "Profil Principal".to_string(),
            is_kids: false,
            avatar: Self::default_avatar(Self::DEFAULT_ID),
            created_date: Utc::now(),
            settings: ProfileSettings::for_kids(false),
        }
    }
}

use crate::error::StoreError;
use crate::storage::KeyValueStorage;
use crate::store::WatchStateStore;
use cineverse_models::Country;
use std::cmp::Ordering;
use tracing::info;

/// Language used for unknown countries and for the "all countries" sentinel.
pub const DEFAULT_LANGUAGE: &str = "fr-FR";

/// Country code to display language, sorted by code for binary search.
const COUNTRY_LANGUAGES: &[(&str, &str)] = &[
    ("AE", "ar-AE"),
    ("AR", "ar-SA"),
    ("AT", "de-AT"),
    ("AU", "en-AU"),
    ("BE", "fr-BE"),
    ("BR", "pt-BR"),
    ("CA", "en-CA"),
    ("CH", "de-CH"),
    ("CN", "zh-CN"),
    ("CZ", "cs-CZ"),
    ("DE", "de-DE"),
    ("DK", "da-DK"),
    ("EG", "ar-EG"),
    ("ES", "es-ES"),
    ("FI", "fi-FI"),
    ("FR", "fr-FR"),
    ("GB", "en-GB"),
    ("GR", "el-GR"),
    ("HU", "hu-HU"),
    ("ID", "id-ID"),
    ("IE", "en-IE"),
    ("IL", "he-IL"),
    ("IN", "hi-IN"),
    ("IT", "it-IT"),
    ("JP", "ja-JP"),
    ("KR", "ko-KR"),
    ("MX", "es-MX"),
    ("MY", "ms-MY"),
    ("NL", "nl-NL"),
    ("NO", "nb-NO"),
    ("NZ", "en-NZ"),
    ("PH", "tl-PH"),
    ("PL", "pl-PL"),
    ("PT", "pt-PT"),
    ("RU", "ru-RU"),
    ("SA", "ar-SA"),
    ("SE", "sv-SE"),
    ("SG", "en-SG"),
    ("TH", "th-TH"),
    ("TR", "tr-TR"),
    ("US", "en-US"),
    ("VN", "vi-VN"),
    ("ZA", "en-ZA"),
];

/// Countries pinned to the top of pickers, in this order.
const POPULAR_COUNTRIES: &[&str] = &["FR", "US", "GB", "DE", "ES", "IT", "CA", "JP", "KR", "IN"];

/// Map a country code to its display language. Total: unknown codes and `""` give [`DEFAULT_LANGUAGE`].
///
/// Matching is exact; `"fr"` is not `"FR"`.
pub fn resolve_language(country_code: &str) -> &'static str {
    COUNTRY_LANGUAGES
        .binary_search_by(|(code, _)| (*code).cmp(country_code))
        .map(|index| COUNTRY_LANGUAGES[index].1)
        .unwrap_or(DEFAULT_LANGUAGE)
}

/// Trim and upper-case user input. `Some("")` is "all countries"; `None` if it is not a two-letter code.
pub fn normalize_country_code(input: &str) -> Option<String> {
    let code = input.trim().to_ascii_uppercase();
    if code.is_empty() || (code.len() == 2 && code.chars().all(|c| c.is_ascii_uppercase())) {
        Some(code)
    } else {
        None
    }
}

/// Popular countries first in fixed order, then everything else by native name.
pub fn sort_countries(countries: &mut [Country]) {
    let rank = |code: &str| POPULAR_COUNTRIES.iter().position(|p| *p == code);
    countries.sort_by(|a, b| match (rank(&a.code), rank(&b.code)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.native_name.cmp(&b.native_name),
    });
}

pub fn country_display_name(code: &str, countries: &[Country]) -> String {
    if code.is_empty() {
        return "Tous les pays".to_string();
    }
    countries
        .iter()
        .find(|c| c.code == code)
        .map(|c| c.native_name.clone())
        .unwrap_or_else(|| code.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionChange {
    pub country: String,
    pub language: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&RegionChange)>;

/// The active country/language pair, with explicit listeners for changes.
pub struct RegionSettings {
    country: String,
    language: String,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

impl RegionSettings {
    /// Initialise from the persisted region.
    pub fn load<S: KeyValueStorage>(store: &WatchStateStore<S>) -> Result<Self, StoreError> {
        let country = store.region()?;
        Ok(Self::new(&country))
    }

    pub fn new(country: &str) -> Self {
        Self {
            country: country.to_string(),
            language: resolve_language(country).to_string(),
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn current(&self) -> RegionChange {
        RegionChange {
            country: self.country.clone(),
            language: self.language.clone(),
        }
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&RegionChange) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns whether the subscription existed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    /// Persist the new country, derive its language and notify listeners.
    ///
    /// Nothing changes in memory and nobody is notified if persisting fails.
    pub fn change_country<S: KeyValueStorage>(
        &mut self,
        store: &mut WatchStateStore<S>,
        country_code: &str,
    ) -> Result<RegionChange, StoreError> {
        store.set_region(country_code)?;

        self.country = country_code.to_string();
        self.language = resolve_language(country_code).to_string();
        let change = self.current();
        info!("Country changed to '{}', language {}", change.country, change.language);

        for (_, listener) in self.listeners.iter_mut() {
            listener(&change);
        }
        Ok(change)
    }
}

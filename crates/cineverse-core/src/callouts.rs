use chrono::NaiveDate;

const MAX_CALLOUTS: usize = 2;

/// Fields of a catalogue item that drive its badges.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalloutInput {
    pub vote_average: f64,
    pub popularity: f64,
    pub vote_count: u64,
    pub release_date: Option<NaiveDate>,
    pub original_language: Option<String>,
}

/// Short badges for an item, most significant first, at most two.
///
/// A missing original language counts as non-English.
pub fn contextual_callouts(item: &CalloutInput) -> Vec<&'static str> {
    let recent_cutoff = NaiveDate::from_ymd_opt(2023, 1, 1);
    let rules: [(bool, &'static str); 6] = [
        (item.vote_average >= 8.0, "Très bien noté"),
        (item.popularity > 100.0, "Tendance"),
        (item.vote_count > 5000, "Très regardé"),
        (
            matches!((item.release_date, recent_cutoff), (Some(d), Some(cutoff)) if d > cutoff),
            "Nouveau",
        ),
        (item.original_language.as_deref() != Some("en"), "International"),
        (item.vote_average >= 8.5 && item.vote_count > 1000, "Primé"),
    ];

    rules
        .into_iter()
        .filter_map(|(applies, label)| applies.then_some(label))
        .take(MAX_CALLOUTS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn english() -> Option<String> {
        Some("en".to_string())
    }

    #[test]
    fn test_plain_english_title_has_no_callouts() {
        let item = CalloutInput {
            vote_average: 6.1,
            popularity: 12.0,
            vote_count: 300,
            release_date: NaiveDate::from_ymd_opt(2010, 5, 1),
            original_language: english(),
        };
        assert!(contextual_callouts(&item).is_empty());
    }

    #[test]
    fn test_truncated_to_first_two_in_rule_order() {
        let item = CalloutInput {
            vote_average: 8.7,
            popularity: 250.0,
            vote_count: 12000,
            release_date: NaiveDate::from_ymd_opt(2024, 3, 1),
            original_language: Some("ko".to_string()),
        };
        assert_eq!(contextual_callouts(&item), vec!["Très bien noté", "Tendance"]);
    }

    #[test]
    fn test_release_cutoff_is_exclusive() {
        let mut item = CalloutInput {
            release_date: NaiveDate::from_ymd_opt(2023, 1, 1),
            original_language: english(),
            ..Default::default()
        };
        assert!(contextual_callouts(&item).is_empty());

        item.release_date = NaiveDate::from_ymd_opt(2023, 1, 2);
        assert_eq!(contextual_callouts(&item), vec!["Nouveau"]);
    }

    #[test]
    fn test_missing_language_counts_as_international() {
        let item = CalloutInput::default();
        assert_eq!(contextual_callouts(&item), vec!["International"]);
    }

    #[test]
    fn test_award_needs_score_and_count() {
        let item = CalloutInput {
            vote_average: 8.5,
            vote_count: 1001,
            original_language: english(),
            ..Default::default()
        };
        // "Très bien noté" comes first, "Primé" second
        assert_eq!(contextual_callouts(&item), vec!["Très bien noté", "Primé"]);
    }
}

use shared_models::{Person, PersonStatus};

use crate::models::{TabCounts, TabKey};

/// Records visible under `tab` whose name, email (or patient phone) contains `query`.
///
/// Both filters are per-record predicates, so the result does not depend on which
/// is applied first. Input order is preserved. A blank query matches everything.
pub fn select_view(records: &[Person], tab: TabKey, query: &str) -> Vec<Person> {
    let needle = normalize_query(query);

    records
        .iter()
        .filter(|record| matches_tab(record, tab))
        .filter(|record| match &needle {
            Some(needle) => matches_query(record, needle),
            None => true,
        })
        .cloned()
        .collect()
}

pub fn matches_tab(record: &Person, tab: TabKey) -> bool {
    match tab.status() {
        None => true,
        Some(status) => record.status == Some(status),
    }
}

/// `needle` must already be lower-cased and trimmed.
pub fn matches_query(record: &Person, needle: &str) -> bool {
    if record.full_name.to_lowercase().contains(needle)
        || record.email.to_lowercase().contains(needle)
    {
        return true;
    }

    record.is_patient()
        && record
            .phone
            .as_deref()
            .is_some_and(|phone| phone.to_lowercase().contains(needle))
}

fn normalize_query(query: &str) -> Option<String> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

pub fn tab_counts(records: &[Person]) -> TabCounts {
    records.iter().fold(
        TabCounts {
            all: records.len(),
            ..TabCounts::default()
        },
        |mut counts, record| {
            match record.status {
                Some(PersonStatus::Active) => counts.active += 1,
                Some(PersonStatus::Inactive) => counts.inactive += 1,
                Some(PersonStatus::Critical) => counts.critical += 1,
                Some(PersonStatus::OnLeave) => counts.on_leave += 1,
                None => {}
            }
            counts
        },
    )
}

/// Avatar initials: first letter of each word, upper-cased, at most two.
pub fn initials(full_name: &str) -> String {
    let letters: String = full_name
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect();

    if letters.is_empty() {
        "UN".to_string()
    } else {
        letters
    }
}

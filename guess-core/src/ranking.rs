use std::collections::HashSet;

use guess_types::GuessRecord;

/// Orders records by similarity, best first.
///
/// `sort_by` is stable, so equal scores keep their insertion order.
pub fn rank_records(records: &mut [GuessRecord]) {
    records.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
}

pub fn is_ranked(records: &[GuessRecord]) -> bool {
    records
        .windows(2)
        .all(|pair| pair[0].similarity >= pair[1].similarity)
}

/// Keeps the first record for each word and drops later repeats.
pub fn dedup_words(records: Vec<GuessRecord>) -> Vec<GuessRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| seen.insert(record.word.clone()))
        .collect()
}

/// A timestamp strictly after every existing one, preferring the wall clock.
pub fn next_timestamp(records: &[GuessRecord], now_millis: i64) -> i64 {
    match records.iter().map(|record| record.timestamp).max() {
        Some(latest) if latest >= now_millis => latest.saturating_add(1),
        _ => now_millis,
    }
}

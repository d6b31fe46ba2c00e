//! Identifier assignment.
//!
//! Two policies exist:
//!
//! - [`IdPolicy::Renumber`]: new id is `max + 1` (or 1 when empty), and removing a
//!   record renumbers the survivors to `1..N` in order. Ids are contiguous but an id
//!   seen yesterday may name a different record today.
//! - [`IdPolicy::Stable`]: new id is one past the larger of the current max and the
//!   persisted high-water mark. Survivors keep their ids and no id is handed out twice.

use crate::model::Record;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdPolicy {
    Renumber,
    Stable,
}

impl fmt::Display for IdPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdPolicy::Renumber => write!(f, "renumber"),
            IdPolicy::Stable => write!(f, "stable"),
        }
    }
}

impl FromStr for IdPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "renumber" => Ok(IdPolicy::Renumber),
            "stable" => Ok(IdPolicy::Stable),
            other => Err(format!(
                "unknown id policy '{}' (expected renumber or stable)",
                other
            )),
        }
    }
}

pub fn max_id<R: Record>(records: &[R]) -> u32 {
    records.iter().map(Record::id).max().unwrap_or(0)
}

/// Next identifier given the current records and the highest id ever issued.
pub fn next_id<R: Record>(records: &[R], high_water: u32) -> u32 {
    max_id(records).max(high_water).saturating_add(1)
}

/// Rewrites ids to `1..N` in slice order, stamping each record as updated.
pub fn renumber<R: Record>(records: &mut [R], now: DateTime<Utc>) {
    for (position, record) in records.iter_mut().enumerate() {
        record.set_id(position as u32 + 1);
        record.touch(now);
    }
}

/// Ids that appear more than once, in first-seen order.
pub fn duplicate_ids<R: Record>(records: &[R]) -> Vec<u32> {
    let mut seen = std::collections::HashSet::new();
    let mut dupes = Vec::new();
    for id in records.iter().map(Record::id) {
        if !seen.insert(id) && !dupes.contains(&id) {
            dupes.push(id);
        }
    }
    dupes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Gender, Patient, PatientDraft};

    fn patient(id: u32) -> Patient {
        let draft = PatientDraft::new("P", "Q", 30, Gender::Other, "5550000000", "p@q.io");
        Patient::build(id, draft, Utc::now())
    }

    #[test]
    fn empty_collection_starts_at_one() {
        let records: Vec<Patient> = vec![];
        assert_eq!(next_id(&records, 0), 1);
    }

    #[test]
    fn next_id_uses_max_not_len() {
        let records = vec![patient(7), patient(2)];
        assert_eq!(next_id(&records, 0), 8);
    }

    #[test]
    fn high_water_mark_wins_over_current_max() {
        let records = vec![patient(2)];
        assert_eq!(next_id(&records, 5), 6);
    }

    #[test]
    fn renumber_is_contiguous_in_order() {
        let mut records = vec![patient(4), patient(9), patient(2)];
        renumber(&mut records, Utc::now());
        let ids: Vec<u32> = records.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn finds_duplicates_once() {
        let records = vec![patient(1), patient(2), patient(1), patient(1)];
        assert_eq!(duplicate_ids(&records), vec![1]);
    }

    #[test]
    fn parses_policy_names() {
        assert_eq!("Stable".parse::<IdPolicy>(), Ok(IdPolicy::Stable));
        assert!("monotonic".parse::<IdPolicy>().is_err());
    }
}

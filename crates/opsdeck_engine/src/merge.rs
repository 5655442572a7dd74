use std::collections::HashMap;

use crate::Record;

/// Collapses source collections into a single unique-by-id sequence.
///
/// The first occurrence of an id fixes its position in the output; a later
/// occurrence overwrites the value at that position, so the last write per
/// key wins while first-seen order is preserved.
pub fn merge_records(sources: &[Vec<Record>]) -> Vec<Record> {
    let mut merged: Vec<Record> = Vec::new();
    let mut slots: HashMap<u64, usize> = HashMap::new();
    for record in sources.iter().flatten() {
        match slots.get(&record.id) {
            Some(&slot) => merged[slot] = record.clone(),
            None => {
                slots.insert(record.id, merged.len());
                merged.push(record.clone());
            }
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::merge_records;
    use crate::Record;

    fn record(id: u64, title: &str) -> Record {
        Record {
            id,
            title: title.to_owned(),
            location: format!("{}.example.com", title.to_lowercase()),
        }
    }

    #[test]
    fn empty_input_merges_to_empty() {
        assert!(merge_records(&[]).is_empty());
        assert!(merge_records(&[Vec::new(), Vec::new()]).is_empty());
    }

    #[test]
    fn disjoint_sources_concatenate_in_order() {
        let merged = merge_records(&[
            vec![record(1, "A"), record(2, "B")],
            vec![record(3, "C")],
        ]);
        let ids: Vec<u64> = merged.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn duplicate_key_keeps_first_position_and_last_value() {
        let merged = merge_records(&[
            vec![record(1, "A"), record(2, "B")],
            vec![record(2, "B2"), record(3, "C")],
        ]);

        assert_eq!(merged.len(), 3);
        assert_eq!(merged[0], record(1, "A"));
        assert_eq!(merged[1], record(2, "B2"));
        assert_eq!(merged[2], record(3, "C"));
    }

    #[test]
    fn duplicates_within_one_source_collapse_too() {
        let merged = merge_records(&[vec![record(7, "X"), record(7, "Y"), record(7, "Z")]]);
        assert_eq!(merged, vec![record(7, "Z")]);
    }

    #[test]
    fn every_output_id_is_unique() {
        let merged = merge_records(&[
            vec![record(1, "A"), record(2, "B"), record(1, "A3")],
            vec![record(2, "B2"), record(1, "A2"), record(4, "D")],
        ]);
        let mut ids: Vec<u64> = merged.iter().map(|r| r.id).collect();
        let before = ids.len();
        ids.dedup();
        assert_eq!(ids.len(), before);
        assert_eq!(ids, vec![1, 2, 4]);
        assert_eq!(merged[0].title, "A2");
    }
}

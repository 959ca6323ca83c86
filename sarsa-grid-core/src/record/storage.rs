//! Aggregation of stored records.
use super::{Record, RecordValue};
use std::collections::HashSet;
use xxhash_rust::xxh3::Xxh3Builder;

/// Stores records and aggregates them.
///
/// On [`RecordStorage::aggregate`], scalars stored under the same key more than once
/// are summarised as `{key}_min`, `{key}_max`, `{key}_mean` and `{key}_median`. A key
/// stored once keeps its value. For arrays and strings the most recent value is kept.
#[derive(Debug, Default)]
pub struct RecordStorage {
    data: Vec<Record>,
}

fn min(vs: &[f32]) -> RecordValue {
    RecordValue::Scalar(vs.iter().copied().fold(f32::INFINITY, f32::min))
}

fn max(vs: &[f32]) -> RecordValue {
    RecordValue::Scalar(vs.iter().copied().fold(f32::NEG_INFINITY, f32::max))
}

fn mean(vs: &[f32]) -> RecordValue {
    RecordValue::Scalar(vs.iter().sum::<f32>() / vs.len() as f32)
}

/// Upper median.
fn median(mut vs: Vec<f32>) -> RecordValue {
    vs.sort_by(|x, y| x.total_cmp(y));
    RecordValue::Scalar(vs[vs.len() / 2])
}

impl RecordStorage {
    /// Creates an empty storage.
    pub fn new() -> Self {
        Self { data: vec![] }
    }

    fn get_keys(&self) -> HashSet<String, Xxh3Builder> {
        let mut keys = HashSet::<String, Xxh3Builder>::default();
        for record in self.data.iter() {
            for k in record.keys() {
                keys.insert(k.clone());
            }
        }
        keys
    }

    /// The most recent value of `key`.
    fn latest(&self, key: &str) -> Option<&RecordValue> {
        self.data.iter().rev().find_map(|record| record.get(key))
    }

    /// # Panics
    ///
    /// Panics if a value stored under `key` is not a scalar.
    fn scalar(&self, key: &str) -> Record {
        let vs: Vec<f32> = self
            .data
            .iter()
            .filter_map(|record| match record.get(key) {
                Some(RecordValue::Scalar(v)) => Some(*v),
                Some(_) => panic!("Expect RecordValue::Scalar for {}", key),
                None => None,
            })
            .collect();

        if vs.len() == 1 {
            Record::from_slice(&[(key, RecordValue::Scalar(vs[0]))])
        } else {
            Record::from_slice(&[
                (format!("{}_min", key), min(&vs)),
                (format!("{}_max", key), max(&vs)),
                (format!("{}_mean", key), mean(&vs)),
                (format!("{}_median", key), median(vs)),
            ])
        }
    }

    /// Stores a record.
    pub fn store(&mut self, record: Record) {
        self.data.push(record);
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether no record is stored.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Aggregates the stored records and clears the storage.
    ///
    /// # Panics
    ///
    /// Panics if values of different types are stored under the same key.
    pub fn aggregate(&mut self) -> Record {
        let mut record = Record::empty();

        for key in self.get_keys().iter() {
            let r = match self.latest(key) {
                Some(RecordValue::Scalar(..)) => self.scalar(key),
                Some(value) => Record::from_slice(&[(key.as_str(), value.clone())]),
                None => continue,
            };
            record.merge_inplace(r);
        }

        self.data.clear();
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregate_scalars() {
        let mut storage = RecordStorage::new();
        for v in [4.0, 1.0, 3.0, 2.0].iter() {
            storage.store(Record::from_scalar("r", *v));
        }
        storage.store(Record::from_scalar("once", 7.0));

        let record = storage.aggregate();
        assert_eq!(record.get_scalar("r_min").unwrap(), 1.0);
        assert_eq!(record.get_scalar("r_max").unwrap(), 4.0);
        assert_eq!(record.get_scalar("r_mean").unwrap(), 2.5);
        assert_eq!(record.get_scalar("r_median").unwrap(), 3.0);
        assert_eq!(record.get_scalar("once").unwrap(), 7.0);
        assert!(record.get("r").is_none());
        assert!(storage.is_empty());
    }

    #[test]
    fn test_aggregate_keeps_latest_string() {
        let mut storage = RecordStorage::new();
        storage.store(Record::from_slice(&[(
            "termination",
            RecordValue::String("blocked".to_string()),
        )]));
        storage.store(Record::from_slice(&[(
            "termination",
            RecordValue::String("goal".to_string()),
        )]));
        let record = storage.aggregate();
        assert_eq!(record.get_string("termination").unwrap(), "goal");
    }

    #[test]
    fn test_aggregate_empty() {
        assert!(RecordStorage::new().aggregate().is_empty());
    }

    #[test]
    #[should_panic]
    fn test_mixed_types_panic() {
        let mut storage = RecordStorage::new();
        storage.store(Record::from_scalar("x", 1.0));
        storage.store(Record::from_slice(&[("x", RecordValue::Array1(vec![1.0]))]));
        storage.store(Record::from_scalar("x", 2.0));
        storage.aggregate();
    }
}

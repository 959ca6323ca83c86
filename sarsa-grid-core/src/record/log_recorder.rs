use super::{AggregateRecorder, Record, RecordStorage, RecordValue, Recorder};
use log::info;

/// Writes records through the `log` facade at level `info`.
///
/// Stored records are aggregated with [`RecordStorage`] and written as a single line,
/// keys sorted, on [`AggregateRecorder::flush`].
#[derive(Debug, Default)]
pub struct LogRecorder {
    storage: RecordStorage,
}

impl LogRecorder {
    /// Constructs the recorder.
    pub fn new() -> Self {
        Self::default()
    }
}

fn format_value(value: &RecordValue) -> String {
    match value {
        RecordValue::Scalar(v) => format!("{:.4}", v),
        RecordValue::Array1(vs) => format!("{:?}", vs),
        RecordValue::String(s) => s.clone(),
    }
}

/// Formats `record` as `key=value` pairs in key order.
pub(crate) fn format_record(record: &Record) -> String {
    let mut pairs: Vec<_> = record.iter().collect();
    pairs.sort_by(|a, b| a.0.cmp(b.0));
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", k, format_value(v)))
        .collect::<Vec<_>>()
        .join(", ")
}

impl Recorder for LogRecorder {
    fn write(&mut self, record: Record) {
        info!("{}", format_record(&record));
    }
}

impl AggregateRecorder for LogRecorder {
    fn store(&mut self, record: Record) {
        self.storage.store(record);
    }

    fn flush(&mut self, step: i64) {
        let record = self.storage.aggregate();
        if !record.is_empty() {
            info!("[{}] {}", step, format_record(&record));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_record() {
        let record = Record::from_slice(&[
            ("b", RecordValue::Scalar(0.5)),
            ("a", RecordValue::String("goal".to_string())),
            ("c", RecordValue::Array1(vec![1.0, 2.0])),
        ]);
        assert_eq!(format_record(&record), "a=goal, b=0.5000, c=[1.0, 2.0]");
    }

    #[test]
    fn test_flush_clears_storage() {
        let mut recorder = LogRecorder::new();
        recorder.store(Record::from_scalar("r", 1.0));
        recorder.flush(1);
        assert!(recorder.storage.is_empty());
    }
}

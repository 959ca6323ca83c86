use super::Record;

/// Writes a record to an output destination with [`Recorder::write`].
pub trait Recorder {
    /// Writes a record.
    fn write(&mut self, record: Record);
}

/// Stores records and writes values aggregated over them.
pub trait AggregateRecorder {
    /// Stores a record.
    fn store(&mut self, record: Record);

    /// Writes values aggregated from the stored records, then forgets them.
    ///
    /// `step` is the training progress at which the aggregate is written, e.g. the
    /// number of completed episodes.
    fn flush(&mut self, step: i64);
}

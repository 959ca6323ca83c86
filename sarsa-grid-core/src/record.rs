//! Types and traits for recording training and evaluation metrics.
//!
//! * [`Record`] - key-value pairs of [`RecordValue`]s
//! * [`Recorder`] - writes records one by one
//! * [`AggregateRecorder`] - stores records and writes values aggregated over them
//! * [`RecordStorage`] - aggregation of stored records
//! * [`BufferedRecorder`] - keeps records in memory
//! * [`LogRecorder`] - writes aggregated records through the `log` facade
//! * [`NullRecorder`] - discards records
//!
//! ```rust
//! use sarsa_grid_core::record::{Record, RecordValue};
//!
//! let mut record = Record::empty();
//! record.insert("episode", RecordValue::Scalar(3.0));
//! record.insert("episode_return", RecordValue::Scalar(1.0));
//! record.insert("termination", RecordValue::String("goal".to_string()));
//! assert_eq!(record.get_scalar("episode_return").unwrap(), 1.0);
//! ```
//!
//! [`Trainer`](crate::Trainer) stores one record per completed episode with
//! [`EpisodeSummary::record`](crate::EpisodeSummary::record) and flushes the aggregate
//! periodically.
mod base;
mod buffered_recorder;
mod log_recorder;
mod null_recorder;
mod recorder;
mod storage;

pub use base::{Record, RecordValue};
pub use buffered_recorder::BufferedRecorder;
pub use log_recorder::LogRecorder;
pub use null_recorder::NullRecorder;
pub use recorder::{AggregateRecorder, Recorder};
pub use storage::RecordStorage;

//! Dataset
//!
//! Loading the accident CSV into typed, immutable records.

pub mod error;
pub mod loader;
pub mod record;
pub mod source;

pub use error::{DatasetError, DatasetResult};
pub use loader::{parse_fatalities, DatasetLoader};
pub use record::{Dataset, LoadReport, Record, UNKNOWN};
pub use source::{DatasetSource, StaticSource, DEFAULT_DATASET_PATH};

#[cfg(not(target_arch = "wasm32"))]
pub use source::FileSource;

#[cfg(feature = "server")]
pub use source::{source_for, HttpSource};

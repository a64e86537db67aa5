//! Dataset Sources
//!
//! Where a renderer gets its records from. The fetch is the only
//! asynchronous step of a chart's lifecycle.

use async_trait::async_trait;

use super::error::DatasetResult;
use super::loader::DatasetLoader;
use super::record::Dataset;

/// Default location of the dataset relative to the application root
pub const DEFAULT_DATASET_PATH: &str = "Dataset/US_Car_Accident_Dataset.csv";

/// A place the accident dataset can be fetched from.
///
/// Futures are not required to be `Send`: the browser fetch runs on a
/// single-threaded event loop.
#[async_trait(?Send)]
pub trait DatasetSource {
    /// Human-readable origin used in logs
    fn describe(&self) -> String;

    /// Fetch and parse the dataset
    async fn fetch(&self) -> DatasetResult<Dataset>;
}

/// CSV text already held in memory
#[derive(Debug, Clone)]
pub struct StaticSource {
    text: String,
    loader: DatasetLoader,
}

impl StaticSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            loader: DatasetLoader::new(),
        }
    }
}

#[async_trait(?Send)]
impl DatasetSource for StaticSource {
    fn describe(&self) -> String {
        format!("inline CSV ({} bytes)", self.text.len())
    }

    async fn fetch(&self) -> DatasetResult<Dataset> {
        self.loader.load_str(&self.text)
    }
}

/// CSV file on the local filesystem
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileSource {
    path: std::path::PathBuf,
    loader: DatasetLoader,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileSource {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self {
            path: path.into(),
            loader: DatasetLoader::new(),
        }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[async_trait(?Send)]
impl DatasetSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> DatasetResult<Dataset> {
        self.loader.load_path(&self.path)
    }
}

/// CSV served over HTTP
#[cfg(feature = "server")]
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
    client: reqwest::Client,
    loader: DatasetLoader,
}

#[cfg(feature = "server")]
impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
            loader: DatasetLoader::new(),
        }
    }
}

#[cfg(feature = "server")]
#[async_trait(?Send)]
impl DatasetSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> DatasetResult<Dataset> {
        use super::error::DatasetError;

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| DatasetError::Fetch(format!("Network error: {}", e)))?;

        if !response.status().is_success() {
            return Err(DatasetError::Fetch(format!(
                "{} returned HTTP {}",
                self.url,
                response.status()
            )));
        }

        let text = response
            .text()
            .await
            .map_err(|e| DatasetError::Fetch(format!("Body read error: {}", e)))?;

        self.loader.load_str(&text)
    }
}

/// Pick a source for a CLI/config location: URLs go over HTTP, anything else
/// is a file path.
#[cfg(feature = "server")]
pub fn source_for(location: &str) -> Box<dyn DatasetSource> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Box::new(HttpSource::new(location))
    } else {
        Box::new(FileSource::new(location))
    }
}

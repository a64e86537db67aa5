//! HTTP Dataset Client
//!
//! Fetches the accident CSV with `gloo-net` and parses it with the shared
//! loader.

use async_trait::async_trait;
use gloo_net::http::Request;

use crashviz::dataset::{Dataset, DatasetError, DatasetLoader, DatasetResult, DatasetSource};

/// Default dataset URL, relative to the page
pub const DEFAULT_DATASET_URL: &str = "./Dataset/US_Car_Accident_Dataset.csv";

const STORAGE_KEY: &str = "crashviz_dataset_url";

/// Get the dataset URL from local storage or use default
pub fn get_dataset_url() -> String {
    let stored = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(STORAGE_KEY).ok().flatten());
    normalize_url(stored.as_deref())
}

fn normalize_url(stored: Option<&str>) -> String {
    match stored.map(str::trim) {
        Some(url) if !url.is_empty() => url.to_string(),
        _ => DEFAULT_DATASET_URL.to_string(),
    }
}

/// CSV fetched by the browser
#[derive(Debug, Clone)]
pub struct GlooSource {
    url: String,
    loader: DatasetLoader,
}

impl GlooSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            loader: DatasetLoader::new(),
        }
    }
}

#[async_trait(?Send)]
impl DatasetSource for GlooSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> DatasetResult<Dataset> {
        let response = Request::get(&self.url)
            .send()
            .await
            .map_err(|e| DatasetError::Fetch(format!("Network error: {}", e)))?;

        if !response.ok() {
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

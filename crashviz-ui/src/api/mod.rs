//! Dataset access from the browser.

pub mod client;

pub use client::{get_dataset_url, GlooSource};

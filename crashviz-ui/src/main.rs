//! Crashviz Dashboard
//!
//! The accident charts in the browser, built with Leptos (WASM).
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application. Each chart
//! component owns a renderer from the `crashviz` crate drawing into its own
//! `<div>`, fetches the CSV on mount and redraws on button clicks from the
//! records it already holds.

use leptos::*;

mod api;
mod app;
mod components;
mod target;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}

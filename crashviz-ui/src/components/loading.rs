//! Loading Component

use leptos::*;

/// Shown above a chart until its data arrives
#[component]
pub fn Loading(#[prop(into)] loading: Signal<bool>) -> impl IntoView {
    view! {
        <Show when=move || loading.get()>
            <p class="loading">"Loading data..."</p>
        </Show>
    }
}

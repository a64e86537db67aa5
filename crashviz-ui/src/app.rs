//! App Root Component

use leptos::*;

use crate::api::get_dataset_url;
use crate::components::{BarPlot, LineChart};

/// Both charts, each loading the dataset on its own
#[component]
pub fn App() -> impl IntoView {
    let dataset_url = get_dataset_url();

    view! {
        <main>
            <section class="chart-section">
                <h2>"Fatalities by atmospheric condition"</h2>
                <BarPlot dataset_url=dataset_url.clone() />
            </section>

            <section class="chart-section">
                <h2>"Monthly fatalities by gender"</h2>
                <LineChart dataset_url=dataset_url />
            </section>
        </main>
    }
}

//! Bar Plot Component
//!
//! Fatalities per atmospheric condition, drawn once when the CSV arrives.

use leptos::*;

use crashviz::chart::BarChartConfig;
use crashviz::dataset::DatasetSource;
use crashviz::render::{contain, BarRenderer, BAR_TARGET_ID};

use crate::api::GlooSource;
use crate::components::Loading;
use crate::target::{report_error, DomTarget};

#[component]
pub fn BarPlot(#[prop(into)] dataset_url: String) -> impl IntoView {
    let container = create_node_ref::<html::Div>();
    let renderer = store_value(BarRenderer::new(
        DomTarget::new(BAR_TARGET_ID, container),
        BarChartConfig::default(),
    ));
    let (loading, set_loading) = create_signal(true);

    container.on_load(move |_| {
        let source = GlooSource::new(dataset_url.clone());
        spawn_local(async move {
            let result = source.fetch().await;

            renderer.update_value(|renderer| {
                let frame = renderer.config().frame;
                let outcome = renderer.on_loaded(result);
                if let Err(e) = &outcome {
                    report_error("Bar chart", e);
                }
                contain(renderer.target_mut(), &frame, outcome);
            });
            set_loading.set(false);
        });
    });

    view! {
        <div class="chart">
            <Loading loading=loading />
            <div id=BAR_TARGET_ID node_ref=container />
        </div>
    }
}

//! Line Chart Component
//!
//! Monthly fatalities with one button per filter. Clicks redraw from the
//! records the renderer already holds; clicks before the data arrives do
//! nothing.

use leptos::*;

use crashviz::aggregate::FIXED_FILTERS;
use crashviz::chart::LineChartConfig;
use crashviz::dataset::DatasetSource;
use crashviz::render::{contain, LineRenderer, RenderResult, LINE_TARGET_ID};

use crate::api::GlooSource;
use crate::components::Loading;
use crate::target::{report_error, DomTarget};

type Renderer = LineRenderer<DomTarget>;

/// Log a failed draw and leave a placeholder in the container
fn settle(renderer: &mut Renderer, outcome: RenderResult<()>) {
    if let Err(e) = &outcome {
        report_error("Line chart", e);
    }
    let frame = renderer.config().frame;
    contain(renderer.target_mut(), &frame, outcome);
}

#[component]
pub fn LineChart(#[prop(into)] dataset_url: String) -> impl IntoView {
    let container = create_node_ref::<html::Div>();
    let renderer = store_value(LineRenderer::new(
        DomTarget::new(LINE_TARGET_ID, container),
        LineChartConfig::default(),
    ));

    let (loading, set_loading) = create_signal(true);
    let (categories, set_categories) =
        create_signal(FIXED_FILTERS.iter().map(|s| s.to_string()).collect::<Vec<_>>());
    let (selected, set_selected) = create_signal(String::from("All"));

    container.on_load(move |_| {
        let source = GlooSource::new(dataset_url.clone());
        spawn_local(async move {
            let result = source.fetch().await;

            renderer.update_value(|renderer| {
                let outcome = renderer.on_loaded(result);
                settle(renderer, outcome);
                set_categories.set(renderer.categories());
                set_selected.set(renderer.selected().label().to_string());
            });
            set_loading.set(false);
        });
    });

    let on_select = move |label: String| {
        renderer.update_value(|renderer| {
            let outcome = renderer.on_filter_selected(&label).map(|_| ());
            settle(renderer, outcome);
            set_selected.set(renderer.selected().label().to_string());
        });
    };

    view! {
        <div class="chart">
            <div class="filters">
                <For
                    each=move || categories.get()
                    key=|label| label.clone()
                    children=move |label| {
                        let for_class = label.clone();
                        let for_click = label.clone();
                        view! {
                            <button
                                class:active=move || selected.get() == for_class
                                on:click=move |_| on_select(for_click.clone())
                            >
                                {label}
                            </button>
                        }
                    }
                />
            </div>
            <Loading loading=loading />
            <div id=LINE_TARGET_ID node_ref=container />
        </div>
    }
}

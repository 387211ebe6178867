use super::super::Model;
use super::utils::display_name;
use shared::{FlowStatus, HistoryBatch, Image, PredictionResult, health_label, health_of};
use yew::prelude::*;

pub fn render_results(model: &Model) -> Html {
    match &model.status {
        FlowStatus::Failed(message) => html! {
            <div class="error-message">
                <i class="fa-solid fa-circle-exclamation"></i>
                <p>{ message.clone() }</p>
            </div>
        },
        FlowStatus::Loading => html! {
            <div class="loading-preview">
                <i class="fa-solid fa-spinner fa-spin fa-2x"></i>
                <p style="margin-left: 10px;">{"Analyzing image(s)..."}</p>
            </div>
        },
        FlowStatus::Idle => html! {
            <p class="no-results-message">{"No prediction results yet"}</p>
        },
        FlowStatus::Succeeded(batch) => render_batch(model, batch),
    }
}

fn render_batch(model: &Model, batch: &HistoryBatch) -> Html {
    html! {
        <div class="results-list">
            { for batch.entries().map(|(image, group)| render_result_card(model, image, group)) }
        </div>
    }
}

/// One card per image: preview, health badge and every result it got.
pub fn render_result_card(model: &Model, image: &Image, group: &[PredictionResult]) -> Html {
    let health = health_of(group);

    html! {
        <div class={classes!(
            "results-container",
            health.map(|healthy| if healthy { "healthy" } else { "unhealthy" })
        )}>
            <div class="result-header">
                {
                    match model.preview_url(image) {
                        Some(url) => html! { <img class="result-thumb" src={url} alt={image.name().to_string()} /> },
                        None => html! {},
                    }
                }
                <h2 title={image.name().to_string()}>
                    { display_name(image.name()) }
                    { render_health_badge(health) }
                </h2>
            </div>
            <div class="detailed-results">
                { for group.iter().map(render_result_details) }
            </div>
        </div>
    }
}

pub fn render_health_badge(health: Option<bool>) -> Html {
    match health {
        Some(healthy) => html! {
            <span class={classes!("badge", if healthy { "badge-healthy" } else { "badge-unhealthy" })}>
                { health_label(healthy) }
            </span>
        },
        None => html! {},
    }
}

pub fn render_result_details(result: &PredictionResult) -> Html {
    let percent = result.confidence_percent();

    html! {
        <div class="result-item">
            <h3>{ result.kind().title() }</h3>
            { for result.detail_lines().into_iter().map(|(label, value)| html! {
                <div class="result-row">
                    <span class="result-label">{ format!("{}:", label) }</span>
                    <span class="result-value">{ value }</span>
                </div>
            }) }
            {
                match percent {
                    Some(p) => html! {
                        <div class="result-bar-container">
                            <div class="result-bar" style={format!("width: {}%", p)}></div>
                        </div>
                    },
                    None => html! {},
                }
            }
            {
                if result.message.is_empty() {
                    html! {}
                } else {
                    html! { <p class="result-message">{ result.message.clone() }</p> }
                }
            }
        </div>
    }
}

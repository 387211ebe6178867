use super::super::{Model, Msg};
use super::results::{render_health_badge, render_result_details};
use super::utils::display_name;
use shared::{HistoryBatch, health_of};
use yew::prelude::*;

const RECENT_LIMIT: usize = 3;

pub fn render_history_panel(model: &Model, ctx: &Context<Model>) -> Html {
    let history = &model.history;

    html! {
        <div class="history-panel">
            <h2>{"Previous Predictions"}</h2>
            {
                if history.is_empty() {
                    html! { <p class="no-results-message">{"No previous predictions"}</p> }
                } else {
                    html! {
                        <ul class="history-list">
                            { for history.recent(RECENT_LIMIT).map(render_history_summary) }
                        </ul>
                    }
                }
            }
            <button
                class="analyze-btn"
                disabled={history.is_empty()}
                onclick={ctx.link().callback(|_| Msg::ShowHistory(true))}
            >
                <i class="fa-solid fa-clock-rotate-left"></i>{" View Full History"}
            </button>
        </div>
    }
}

fn render_history_summary(batch: &HistoryBatch) -> Html {
    let names = batch
        .images()
        .iter()
        .map(|image| display_name(image.name()))
        .collect::<Vec<_>>()
        .join(", ");

    html! {
        <li key={batch.id().to_string()}>
            <span class="history-category">{ batch.category().to_string() }</span>
            <span class="history-images">{ names }</span>
            <span class="history-time">{ batch.completed_at().format("%H:%M:%S").to_string() }</span>
        </li>
    }
}

pub fn render_history_dialog(model: &Model, ctx: &Context<Model>) -> Html {
    if !model.show_history {
        return html! {};
    }

    html! {
        <div class="modal-overlay" onclick={ctx.link().callback(|_| Msg::ShowHistory(false))}>
            <div class="modal" onclick={Callback::from(|e: MouseEvent| e.stop_propagation())}>
                <div class="modal-header">
                    <h2>{"Prediction History"}</h2>
                    <button
                        class="remove-btn"
                        title="Close"
                        onclick={ctx.link().callback(|_| Msg::ShowHistory(false))}
                    >
                        <i class="fa-solid fa-times"></i>
                    </button>
                </div>
                <div class="modal-body">
                    { for model.history.numbered().map(|(number, batch)| render_history_entry(model, number, batch)) }
                </div>
            </div>
        </div>
    }
}

fn render_history_entry(model: &Model, number: usize, batch: &HistoryBatch) -> Html {
    html! {
        <div class="history-entry" key={batch.id().to_string()}>
            { for batch.entries().map(|(image, group)| {
                let title = group
                    .first()
                    .map(|result| result.kind().title())
                    .unwrap_or("Prediction");
                html! {
                    <div class="results-container">
                        <div class="result-header">
                            {
                                match model.preview_url(image) {
                                    Some(url) => html! { <img class="result-thumb" src={url} alt={image.name().to_string()} /> },
                                    None => html! {},
                                }
                            }
                            <h3>{ format!("{} #{}", title, number) }</h3>
                            <span class="history-images">{ display_name(image.name()) }</span>
                            { for group.iter().map(|result| html! {
                                <span class={classes!("badge", if result.is_success() { "badge-success" } else { "badge-error" })}>
                                    { result.status.clone() }
                                </span>
                            }) }
                            { render_health_badge(health_of(group)) }
                        </div>
                        <div class="detailed-results">
                            { for group.iter().map(render_result_details) }
                        </div>
                    </div>
                }
            }) }
        </div>
    }
}

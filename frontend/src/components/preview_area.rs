use super::super::{Model, Msg};
use super::utils::{debounce, display_name, render_notice};
use shared::{Category, Image};
use yew::prelude::*;

const CATEGORIES: [(Category, &str); 4] = [
    (Category::Disease, "Disease"),
    (Category::Variety, "Variety"),
    (Category::Age, "Age"),
    (Category::All, "All"),
];

pub fn render_preview_area(model: &Model, ctx: &Context<Model>) -> Html {
    let link = ctx.link().clone();
    let busy = model.status.is_loading();

    html! {
        <div id="preview-container">
            { render_notice(model.notice.as_deref()) }
            {
                if model.selection.is_empty() {
                    html! {}
                } else {
                    html! {
                        <>
                            <h2>{ format!("Selected Images: {}", model.selection.len()) }</h2>
                            <div id="image-previews">
                                { for model.selection.images().iter().enumerate()
                                    .map(|(index, image)| render_preview_item(model, ctx, index, image)) }
                            </div>
                        </>
                    }
                }
            }
            { render_category_selector(model, ctx) }
            <div class="button-container">
                <button
                    id="clear-all-btn"
                    class="analyze-btn"
                    style="background-color: var(--clear-color);"
                    disabled={busy || model.selection.is_empty()}
                    onclick={debounce(300, {
                        let link = link.clone();
                        move || link.send_message(Msg::ClearImages)
                    })}
                >
                    <i class="fa-solid fa-trash"></i>{" Remove All"}
                </button>
                <button
                    id="analyze-btn"
                    class="analyze-btn"
                    style="background-color: var(--primary-color);"
                    disabled={busy || model.selection.is_empty()}
                    onclick={debounce(300, {
                        let link = link.clone();
                        move || link.send_message(Msg::Analyze)
                    })}
                >
                    { render_analyze_button_content(model) }
                </button>
            </div>
        </div>
    }
}

fn render_preview_item(model: &Model, ctx: &Context<Model>, index: usize, image: &Image) -> Html {
    let busy = model.status.is_loading();
    let (name, size) = image.identity();

    html! {
        <div class="preview-item" key={format!("{}-{}", name, size)} title={name.to_string()}>
            {
                if let Some(url) = model.preview_url(image) {
                    html! { <img src={url} alt={name.to_string()} /> }
                } else {
                    html! { <div class="preview-placeholder preview-placeholder-centered">{"..."}</div> }
                }
            }
            <span class="preview-caption">{ display_name(name) }</span>
            <button
                class="remove-btn"
                title="Remove this image"
                disabled={busy}
                onclick={ctx.link().callback(move |e: MouseEvent| {
                    e.stop_propagation();
                    Msg::RemoveImage(index)
                })}
            >
                <i class="fa-solid fa-times" style="font-size: 10px;"></i>
            </button>
        </div>
    }
}

fn render_category_selector(model: &Model, ctx: &Context<Model>) -> Html {
    html! {
        <div class="processing-mode-selector">
            { for CATEGORIES.iter().map(|&(category, label)| html! {
                <label>
                    <input
                        type="radio"
                        name="category"
                        value={category.to_string()}
                        checked={model.category == category}
                        disabled={model.status.is_loading()}
                        onchange={ctx.link().callback(move |_| Msg::SetCategory(category))}
                    />
                    <span class="radio-label-text">{ label }</span>
                </label>
            }) }
        </div>
    }
}

fn render_analyze_button_content(model: &Model) -> Html {
    if model.status.is_loading() {
        html! { <><i class="fa-solid fa-spinner fa-spin"></i>{" Analyzing..."}</> }
    } else {
        html! {
            <>
                <i class="fa-solid fa-magnifying-glass"></i>
                { format!(" Analyze ({})", model.category) }
            </>
        }
    }
}

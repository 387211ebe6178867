use super::super::{Model, Msg};
use yew::html::Scope;
use yew::prelude::*;

/// Renders the application header
pub fn render_header() -> Html {
    html! {
        <header class="app-header">
            <h1><i class="fa-solid fa-seedling"></i> {" Paddy Plant Analysis"}</h1>
            <p class="subtitle">{"Detect disease, identify variety and estimate age from leaf images"}</p>
        </header>
    }
}

pub fn render_theme_toggle(theme: &str, link: &Scope<Model>) -> Html {
    let dark = theme == "dark";
    html! {
        <button
            id="theme-toggle"
            class="theme-toggle"
            onclick={link.callback(|_| Msg::ToggleTheme)}
            title={ if dark { "Switch to Light Mode" } else { "Switch to Dark Mode" } }
        >
            <i class={classes!("fa-solid", if dark { "fa-sun" } else { "fa-moon" })}></i>
        </button>
    }
}

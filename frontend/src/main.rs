mod api;
mod components;

use std::collections::HashMap;
use std::rc::Rc;

use api::GlooClassifier;
use components::handlers;
use components::header::{render_header, render_theme_toggle};
use components::history::{render_history_dialog, render_history_panel};
use components::preview_area::render_preview_area;
use components::results::render_results;
use components::upload_section::render_upload_section;
use gloo_events::EventListener;
use gloo_file::{File as GlooFile, ObjectUrl};
use shared::{BatchError, Category, FlowStatus, HistoryBatch, HistoryLog, Image, ImageSelection};
use wasm_bindgen::JsCast;
use web_sys::{ClipboardEvent, DragEvent};
use yew::prelude::*;

/// Preview URLs are keyed by image identity so history cards keep working
/// after an image leaves the selection.
type PreviewKey = (String, usize);

fn preview_key(image: &Image) -> PreviewKey {
    (image.name().to_string(), image.size())
}

pub enum Msg {
    // Selection
    FilesPicked(Vec<GlooFile>),
    ImagesLoaded(Vec<Image>),
    RemoveImage(usize),
    ClearImages,
    SetCategory(Category),

    // Prediction
    Analyze,
    BatchSettled(Result<HistoryBatch, BatchError>),

    // UI states
    SetNotice(Option<String>),
    SetDragging(bool),
    ShowHistory(bool),
    ToggleTheme,

    // Input events
    HandleDrop(DragEvent),
    HandlePaste(ClipboardEvent),
}

pub struct Model {
    classifier: Rc<GlooClassifier>,
    selection: ImageSelection,
    previews: HashMap<PreviewKey, ObjectUrl>,
    category: Category,
    status: FlowStatus,
    history: HistoryLog,
    notice: Option<String>,
    is_dragging: bool,
    show_history: bool,
    paste_listener: Option<EventListener>,
    theme: String,
}

impl Model {
    fn preview_url(&self, image: &Image) -> Option<String> {
        self.previews.get(&preview_key(image)).map(|url| url.to_string())
    }
}

impl Component for Model {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let mut model = Self {
            classifier: Rc::new(GlooClassifier::default()),
            selection: ImageSelection::new(),
            previews: HashMap::new(),
            category: Category::default(),
            status: FlowStatus::Idle,
            history: HistoryLog::new(),
            notice: None,
            is_dragging: false,
            show_history: false,
            paste_listener: None,
            theme: "light".to_string(),
        };

        let link = ctx.link().clone();
        if let Some(window) = web_sys::window() {
            let listener = EventListener::new(&window, "paste", move |event| {
                if let Some(clipboard_event) = event.dyn_ref::<ClipboardEvent>() {
                    link.send_message(Msg::HandlePaste(clipboard_event.clone()));
                }
            });
            model.paste_listener = Some(listener);
        }

        model
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::FilesPicked(files) => handlers::handle_files_picked(self, ctx, files),
            Msg::ImagesLoaded(images) => handlers::handle_images_loaded(self, images),
            Msg::RemoveImage(index) => handlers::handle_remove_image(self, index),
            Msg::ClearImages => handlers::handle_clear_images(self),
            Msg::SetCategory(category) => {
                self.category = category;
                true
            }

            Msg::Analyze => handlers::handle_analyze(self, ctx),
            Msg::BatchSettled(outcome) => handlers::handle_batch_settled(self, outcome),

            Msg::SetNotice(notice) => {
                self.notice = notice;
                true
            }
            Msg::SetDragging(is_dragging) => {
                self.is_dragging = is_dragging;
                true
            }
            Msg::ShowHistory(open) => {
                self.show_history = open;
                true
            }
            Msg::ToggleTheme => handlers::handle_toggle_theme(self),

            Msg::HandleDrop(event) => handlers::handle_drop(self, ctx, event),
            Msg::HandlePaste(event) => handlers::handle_paste(ctx, event),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="container">
                { render_header() }
                <div class="top-right">
                    { render_theme_toggle(&self.theme, ctx.link()) }
                </div>

                <main class="main-content two-column">
                    <section class="column inputs">
                        { render_upload_section(self, ctx) }
                        { render_preview_area(self, ctx) }
                        { render_history_panel(self, ctx) }
                    </section>
                    <section class="column outputs">
                        <h2>{"Results"}</h2>
                        { render_results(self) }
                    </section>
                </main>

                { render_history_dialog(self, ctx) }

                <footer class="app-footer">
                    <p>{"Paddy Plant Analysis | Fullstack Rust WASM"}</p>
                </footer>
            </div>
        }
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("App starting...");
    yew::Renderer::<Model>::new().render();
}

use super::super::{Model, Msg, preview_key};
use gloo_file::futures::read_as_bytes;
use gloo_file::{Blob, File as GlooFile, ObjectUrl};
use shared::{BatchError, FlowStatus, HistoryBatch, Image, run_batch};
use wasm_bindgen_futures::spawn_local;
use web_sys::{ClipboardEvent, DragEvent, FileList};
use yew::prelude::*;

/// Reads picked files into memory off the update loop.
pub fn handle_files_picked(model: &mut Model, ctx: &Context<Model>, files: Vec<GlooFile>) -> bool {
    model.notice = None;
    let link = ctx.link().clone();

    spawn_local(async move {
        let mut images = Vec::with_capacity(files.len());
        for file in files {
            match read_as_bytes(&file).await {
                Ok(bytes) => images.push(Image::new(file.name(), file.raw_mime_type(), bytes)),
                Err(e) => {
                    log::warn!("Failed to read {}: {}", file.name(), e);
                    link.send_message(Msg::SetNotice(Some(format!(
                        "Could not read {}",
                        file.name()
                    ))));
                }
            }
        }
        link.send_message(Msg::ImagesLoaded(images));
    });

    true
}

pub fn handle_images_loaded(model: &mut Model, images: Vec<Image>) -> bool {
    let offered = images.len();
    let mut added = 0;

    for image in images {
        if image.is_empty() {
            log::warn!("Skipping empty file: {}", image.name());
            continue;
        }
        let key = preview_key(&image);
        if model.selection.add([image.clone()]) == 1 {
            added += 1;
            model.previews.entry(key).or_insert_with(|| preview_for(&image));
        }
    }

    let skipped = offered - added;
    if skipped > 0 {
        model.notice = Some(format!("Skipped {} duplicate or empty image(s).", skipped));
    }
    true
}

fn preview_for(image: &Image) -> ObjectUrl {
    ObjectUrl::from(Blob::new_with_options(image.bytes(), Some(image.mime_type())))
}

pub fn handle_remove_image(model: &mut Model, index: usize) -> bool {
    model.selection.remove(index).is_some()
}

pub fn handle_clear_images(model: &mut Model) -> bool {
    model.selection.clear();
    model.notice = None;
    true
}

pub fn handle_analyze(model: &mut Model, ctx: &Context<Model>) -> bool {
    if model.selection.is_empty() || model.status.is_loading() {
        return false;
    }

    let images = model.selection.images().to_vec();
    let category = model.category;
    let classifier = model.classifier.clone();
    let link = ctx.link().clone();

    model.status = FlowStatus::Loading;
    model.notice = None;

    spawn_local(async move {
        let outcome = run_batch(classifier.as_ref(), &images, category).await;
        link.send_message(Msg::BatchSettled(outcome));
    });

    true
}

/// The only place the history log is written.
pub fn handle_batch_settled(model: &mut Model, outcome: Result<HistoryBatch, BatchError>) -> bool {
    model.status = FlowStatus::settled(&outcome);
    if let Ok(batch) = outcome {
        model.history.record(batch);
    }
    true
}

pub fn handle_toggle_theme(model: &mut Model) -> bool {
    let Some(body) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.body())
    else {
        return false;
    };

    let result = if model.theme == "light" {
        model.theme = "dark".to_string();
        body.class_list().add_1("dark-mode")
    } else {
        model.theme = "light".to_string();
        body.class_list().remove_1("dark-mode")
    };
    if let Err(e) = result {
        log::warn!("Failed to switch theme: {:?}", e);
    }

    true
}

pub fn handle_drop(model: &mut Model, ctx: &Context<Model>, event: DragEvent) -> bool {
    event.prevent_default();
    model.is_dragging = false;

    if let Some(data_transfer) = event.data_transfer() {
        if let Some(file_list) = data_transfer.files() {
            process_file_list(ctx, file_list);
        }
    }

    true
}

pub fn handle_paste(ctx: &Context<Model>, event: ClipboardEvent) -> bool {
    if let Some(data_transfer) = event.clipboard_data() {
        if let Some(file_list) = data_transfer.files() {
            event.prevent_default();
            process_file_list(ctx, file_list);
            return true;
        }
    }
    false
}

pub fn process_file_list(ctx: &Context<Model>, file_list: FileList) {
    let mut files_to_process = Vec::new();

    for i in 0..file_list.length() {
        if let Some(file) = file_list.item(i) {
            if file.type_().starts_with("image/") {
                files_to_process.push(GlooFile::from(file));
            } else {
                log::warn!("Skipping non-image file: {}", file.name());
                ctx.link().send_message(Msg::SetNotice(Some(format!(
                    "Skipped non-image file: {}",
                    file.name()
                ))));
            }
        }
    }

    if !files_to_process.is_empty() {
        ctx.link().send_message(Msg::FilesPicked(files_to_process));
    }
}

//! Update function for the designer shell.
//!
//! Elm-style: receives the current `DesignerShell` state, the `Context`,
//! and a `Msg`, mutates the state accordingly, and returns whether the
//! view should re-render. Every asynchronous surface (file reads, catalog
//! fetches, generation) is started here with `spawn_local` and completes
//! by sending another message; load completions carry the session's
//! `LoadTicket` so superseded results are discarded instead of clobbering
//! newer state.

use gloo_file::futures::{read_as_data_url, read_as_text};
use gloo_file::Blob;
use gloo_net::http::Request;
use wasm_bindgen::JsValue;
use yew::platform::spawn_local;
use yew::prelude::*;

use common::session::{ImportOutcome, Phase, SessionError};

use crate::generator;
use crate::widget::PdfDesigner;

use super::helpers::{download_json_file, show_toast};
use super::messages::Msg;
use super::state::DesignerShell;

/// Central update function for the component.
pub fn update(shell: &mut DesignerShell, ctx: &Context<DesignerShell>, msg: Msg) -> bool {
    // The toolbar renders before the widget finishes mounting; until the
    // session is ready those actions have nothing to operate on.
    if !matches!(msg, Msg::FontReady(_)) && shell.session.phase() != Phase::Ready {
        show_toast("The editor is still starting.");
        return false;
    }

    match msg {
        Msg::FontReady(result) => {
            shell.font = match result {
                Ok(font) => font,
                Err(err) => {
                    gloo_console::warn!(format!(
                        "font resource unavailable, continuing without: {err}"
                    ));
                    JsValue::UNDEFINED
                }
            };
            mount_widget(shell, ctx);
            true
        }

        Msg::BasePdfSelected(file) => {
            let link = ctx.link().clone();
            spawn_local(async move {
                let result = read_as_data_url(&Blob::from(file))
                    .await
                    .map_err(|e| e.to_string());
                link.send_message(Msg::BasePdfRead(result));
            });
            false
        }
        Msg::BasePdfRead(result) => {
            let applied = result.and_then(|data_url| {
                shell
                    .session
                    .replace_base_pdf(data_url)
                    .map_err(|e| e.to_string())
            });
            match applied {
                Ok(()) => show_toast("Base PDF replaced."),
                Err(err) => show_toast(&format!("Could not replace the base PDF: {err}")),
            }
            true
        }

        Msg::TemplateFileSelected(file) => {
            let ticket = shell.session.begin_file_import();
            let link = ctx.link().clone();
            spawn_local(async move {
                let result = read_as_text(&Blob::from(file))
                    .await
                    .map_err(|e| e.to_string());
                link.send_message(Msg::TemplateFileRead { ticket, result });
            });
            false
        }
        Msg::TemplateFileRead { ticket, result } => {
            match result {
                Ok(content) => report_import(
                    shell.session.finish_file_import(ticket, &content),
                    "Template loaded.",
                ),
                Err(err) => show_toast(&format!("Could not read the template file: {err}")),
            }
            true
        }

        Msg::CatalogEntrySelected(entry) => {
            shell.selected_entry = entry.clone();
            if entry.is_empty() {
                return true;
            }
            let ticket = shell.session.begin_catalog_import(&entry);
            let url = format!("{}/{}", ctx.props().catalog_base, entry);
            let link = ctx.link().clone();
            spawn_local(async move {
                let result = fetch_catalog_entry(&url).await;
                link.send_message(Msg::CatalogFetched { ticket, result });
            });
            true
        }
        Msg::CatalogFetched { ticket, result } => {
            report_import(
                shell.session.finish_catalog_import(ticket, result),
                "Catalog template loaded.",
            );
            true
        }

        Msg::ExportTemplate => {
            match shell.session.export_current() {
                Ok(export) => {
                    if let Err(err) = download_json_file(&export.file_name, &export.json) {
                        show_toast(&format!("Download failed: {err}"));
                    }
                }
                Err(err) => show_toast(&format!("Could not export the template: {err}")),
            }
            false
        }

        Msg::SaveTemplate(override_template) => {
            match shell.session.save_current(override_template) {
                Ok(()) => show_toast("Template saved."),
                Err(err) => show_toast(&format!("Could not save the template: {err}")),
            }
            false
        }

        Msg::ResetTemplate => {
            shell.session.reset_to_default();
            shell.selected_entry.clear();
            show_toast("Template reset to default.");
            true
        }

        Msg::GeneratePdf => {
            if shell.generating {
                return false;
            }
            match shell.session.preview_request() {
                Ok(request) => {
                    shell.generating = true;
                    let font = shell.font.clone();
                    let link = ctx.link().clone();
                    spawn_local(async move {
                        let result = generator::generate_pdf(&request, &font).await;
                        link.send_message(Msg::GenerateFinished(result));
                    });
                }
                Err(err) => show_toast(&format!("Could not gather the preview inputs: {err}")),
            }
            true
        }
        Msg::GenerateFinished(result) => {
            shell.generating = false;
            if let Err(err) = result.and_then(|bytes| generator::open_pdf(&bytes)) {
                show_toast(&format!("PDF generation failed: {err}"));
            }
            true
        }
    }
}

/// Mounts the canvas widget once both the container and the font are
/// available, hands it the initial template, and attaches it to the
/// session. The widget's own save trigger feeds back into `update` as a
/// `SaveTemplate` message carrying the validated template.
fn mount_widget(shell: &mut DesignerShell, ctx: &Context<DesignerShell>) {
    let Some(container) = shell.container_ref.cast::<web_sys::Element>() else {
        gloo_console::error!("designer container is not mounted");
        return;
    };
    let Some(template) = shell.pending_initial.take() else {
        return;
    };
    let on_save = ctx.link().callback(|template| Msg::SaveTemplate(Some(template)));
    match PdfDesigner::mount(&container, &template, &shell.font, on_save) {
        Ok(widget) => shell.session.attach_widget(widget),
        Err(err) => show_toast(&format!("The editor failed to start: {err}")),
    }
}

/// Surfaces an import outcome: applied loads get a toast, stale ones are
/// only logged, transport failures go to the console, and validation
/// failures show the raw rejection detail so the user learns why their
/// file was refused.
fn report_import(outcome: Result<ImportOutcome, SessionError>, applied_message: &str) {
    match outcome {
        Ok(ImportOutcome::Applied) => show_toast(applied_message),
        Ok(ImportOutcome::Stale) => gloo_console::log!("superseded import result ignored"),
        Err(SessionError::Transport(err)) => {
            gloo_console::error!(format!("catalog fetch failed: {err}"));
        }
        Err(err) => show_toast(&format!(
            "Invalid template file.\n--------------------------\n{err}"
        )),
    }
}

async fn fetch_catalog_entry(url: &str) -> Result<String, String> {
    let response = Request::get(url).send().await.map_err(|e| e.to_string())?;
    if response.status() != 200 {
        return Err(format!("{}: HTTP {}", url, response.status()));
    }
    response.text().await.map_err(|e| e.to_string())
}

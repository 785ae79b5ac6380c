//! View rendering for the designer shell: a header toolbar (base-PDF
//! upload, template import, catalog dropdown, export/save/reset/generate)
//! above the container div the canvas widget mounts into.

use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use super::messages::Msg;
use super::state::DesignerShell;

pub fn view(shell: &DesignerShell, ctx: &Context<DesignerShell>) -> Html {
    let link = ctx.link();

    html! {
        <div class="designer-root">
            <header
                class="designer-header"
                style="display: flex; align-items: center; gap: 1rem; padding: 0.5rem;"
            >
                <strong>{"Designer"}</strong>
                <label>
                    {"Change base PDF "}
                    <input
                        type="file"
                        accept="application/pdf"
                        onchange={link.batch_callback(|e: Event| {
                            selected_file(&e).map(Msg::BasePdfSelected)
                        })}
                    />
                </label>
                <label>
                    {"Load template "}
                    <input
                        type="file"
                        accept="application/json"
                        onchange={link.batch_callback(|e: Event| {
                            selected_file(&e).map(Msg::TemplateFileSelected)
                        })}
                    />
                </label>
                { build_catalog_select(shell, ctx) }
                <button onclick={link.callback(|_| Msg::ExportTemplate)}>
                    {"Download template"}
                </button>
                <button onclick={link.callback(|_| Msg::SaveTemplate(None))}>
                    {"Save template"}
                </button>
                <button onclick={link.callback(|_| Msg::ResetTemplate)}>
                    {"Reset template"}
                </button>
                <button disabled={shell.generating} onclick={link.callback(|_| Msg::GeneratePdf)}>
                    { if shell.generating { "Generating..." } else { "Generate PDF" } }
                </button>
            </header>
            <div class="designer-canvas" ref={shell.container_ref.clone()} />
        </div>
    }
}

fn build_catalog_select(shell: &DesignerShell, ctx: &Context<DesignerShell>) -> Html {
    let link = ctx.link();
    let entries = ctx.props().catalog_entries.clone();

    html! {
        <select onchange={link.batch_callback(|e: Event| {
            e.target()
                .and_then(|t| t.dyn_into::<HtmlSelectElement>().ok())
                .map(|select| Msg::CatalogEntrySelected(select.value()))
        })}>
            <option value="" selected={shell.selected_entry.is_empty()}>
                {"Select a schema"}
            </option>
            {
                for entries.iter().map(|entry| html! {
                    <option value={entry.clone()} selected={shell.selected_entry == *entry}>
                        { entry.clone() }
                    </option>
                })
            }
        </select>
    }
}

/// Pulls the chosen file out of a file-input change event and clears the
/// input so the same file can be picked again later.
fn selected_file(event: &Event) -> Option<web_sys::File> {
    let input = event.target()?.dyn_into::<HtmlInputElement>().ok()?;
    let file = input.files()?.get(0);
    input.set_value("");
    file
}

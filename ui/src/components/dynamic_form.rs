//! Dynamic Form
//!
//! Loads a field schema from a local JSON file and renders one input per
//! field. All state lives in a single [`FormSession`] signal.

use dynform::adapters::FormSession;
use dynform::domain::{FieldDescriptor, FieldKey, SchemaFormat};
use leptos::prelude::*;
use leptos::web_sys;
use wasm_bindgen_futures::JsFuture;

use super::fields::FieldRow;
use super::submitted_values::SubmittedValues;

#[component]
pub fn DynamicForm() -> impl IntoView {
    let session = RwSignal::new(FormSession::new());

    // Rows only change when a new definition is loaded, not on every edit
    let fields = Memo::new(move |_| {
        session.with(|s| {
            s.definition()
                .iter()
                .map(|(key, field)| (key, field.clone()))
                .collect::<Vec<(FieldKey, FieldDescriptor)>>()
        })
    });

    let on_file = move |ev: web_sys::Event| {
        let input = event_target::<web_sys::HtmlInputElement>(&ev);
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };

        wasm_bindgen_futures::spawn_local(async move {
            match JsFuture::from(file.text()).await {
                Ok(text) => {
                    let text = text.as_string().unwrap_or_default();
                    session.update(|s| {
                        if let Err(e) = s.load_str(&text, SchemaFormat::Json) {
                            log::error!("Invalid JSON file: {}", e);
                        }
                    });
                }
                Err(e) => log::error!("Failed to read {}: {:?}", file.name(), e),
            }
        });
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        session.update(|s| {
            s.submit();
        });
    };

    view! {
        <div class="container max-w-2xl mx-auto p-6">
            <h1 class="text-2xl font-bold mb-4">"Dynamic Form"</h1>
            <input
                class="custom-file-input mb-6"
                type="file"
                accept=".json"
                on:change=on_file
            />
            <form class="space-y-4" on:submit=on_submit>
                <For
                    each=move || fields.get()
                    key=|(_, field)| field.id
                    children=move |(position, field)| {
                        view! { <FieldRow position=position field=field session=session/> }
                    }
                />
                <button
                    type="submit"
                    class="px-4 py-2 bg-blue-600 text-white rounded-md hover:bg-blue-700"
                >
                    "Submit"
                </button>
            </form>
            <SubmittedValues session=session/>
        </div>
    }
}

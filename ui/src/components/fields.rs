//! Field Renderers
//!
//! One row per field: label, the input chosen by the dispatcher, and an
//! inline error annotation when the field failed its last check.

use dynform::adapters::{EditEvent, FieldDispatcher, FormSession, InputWidget, EMPTY_OPTION_LABEL};
use dynform::domain::{Choice, FieldDescriptor, FieldId, FieldKey};
use leptos::prelude::*;
use leptos::web_sys;

const INPUT_CLASS: &str =
    "w-full px-3 py-2 text-sm border border-gray-300 rounded-md focus:outline-none focus:ring-2 focus:ring-blue-500";

// ============================================================================
// Field Row
// ============================================================================

#[component]
pub fn FieldRow(position: FieldKey, field: FieldDescriptor, session: RwSignal<FormSession>) -> impl IntoView {
    let id = field.id;
    let name = position.to_string();
    let label = FieldDispatcher::label_for(&field);

    let value = {
        let field = field.clone();
        Signal::derive(move || session.with(|s| s.store().current_value(&field).to_string()))
    };
    let error = move || {
        session.with(|s| {
            s.store()
                .error(id)
                .filter(|message| !message.is_empty())
                .map(String::from)
        })
    };

    let input = match FieldDispatcher::widget_for(&field) {
        InputWidget::TextArea => view! {
            <TextAreaInput id=id name=name value=value session=session/>
        }
        .into_any(),
        InputWidget::TextInput => view! {
            <TextInput id=id name=name value=value session=session/>
        }
        .into_any(),
        InputWidget::NumberInput { min, max } => view! {
            <NumberInput id=id name=name min=min max=max value=value session=session/>
        }
        .into_any(),
        InputWidget::Select { options } => view! {
            <OptionSelect id=id name=name options=options value=value session=session/>
        }
        .into_any(),
    };

    view! {
        <div>
            <label class="block text-sm font-medium text-gray-700 mb-1">{label}</label>
            {input}
            {move || error().map(|message| view! { <p class="error text-sm text-red-600 mt-1">{message}</p> })}
        </div>
    }
}

fn on_edit(session: RwSignal<FormSession>, id: FieldId) -> impl Fn(web_sys::Event) + Copy {
    move |ev| {
        let raw = event_target_value(&ev);
        session.update(|s| {
            s.edit(EditEvent::new(id, raw));
        });
    }
}

// ============================================================================
// Inputs
// ============================================================================

#[component]
fn TextAreaInput(id: FieldId, name: String, value: Signal<String>, session: RwSignal<FormSession>) -> impl IntoView {
    view! {
        <textarea
            name=name
            class=INPUT_CLASS
            prop:value=move || value.get()
            on:input=on_edit(session, id)
        />
    }
}

#[component]
fn TextInput(id: FieldId, name: String, value: Signal<String>, session: RwSignal<FormSession>) -> impl IntoView {
    view! {
        <input
            type="text"
            name=name
            class=INPUT_CLASS
            prop:value=move || value.get()
            on:input=on_edit(session, id)
        />
    }
}

#[component]
fn NumberInput(
    id: FieldId,
    name: String,
    min: Option<f64>,
    max: Option<f64>,
    value: Signal<String>,
    session: RwSignal<FormSession>,
) -> impl IntoView {
    view! {
        <input
            type="number"
            name=name
            class=INPUT_CLASS
            min=min.map(|n| n.to_string())
            max=max.map(|n| n.to_string())
            prop:value=move || value.get()
            on:input=on_edit(session, id)
        />
    }
}

#[component]
fn OptionSelect(
    id: FieldId,
    name: String,
    options: Vec<Choice>,
    value: Signal<String>,
    session: RwSignal<FormSession>,
) -> impl IntoView {
    view! {
        <select
            name=name
            class=INPUT_CLASS
            prop:value=move || value.get()
            on:change=on_edit(session, id)
        >
            <option value="">{EMPTY_OPTION_LABEL}</option>
            {options
                .into_iter()
                .map(|option| {
                    let text = option.to_string();
                    view! { <option value=text.clone()>{text}</option> }
                })
                .collect_view()}
        </select>
    }
}

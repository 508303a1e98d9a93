use dynform::adapters::FormSession;
use leptos::prelude::*;

/// Read-only view of the published snapshot; hidden while editing.
#[component]
pub fn SubmittedValues(session: RwSignal<FormSession>) -> impl IntoView {
    let snapshot_json = move || {
        session.with(|s| {
            s.snapshot().map(|snapshot| {
                snapshot
                    .to_json_string(true)
                    .unwrap_or_else(|e| format!("Failed to display submitted values: {}", e))
            })
        })
    };

    view! {
        {move || {
            snapshot_json().map(|json| {
                view! {
                    <div class="submitted-values mt-8">
                        <h2 class="text-xl font-semibold mb-2">"Submitted Values:"</h2>
                        <pre class="p-4 bg-white rounded-md text-sm font-mono">{json}</pre>
                    </div>
                }
            })
        }}
    }
}

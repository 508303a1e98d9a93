use leptos::prelude::*;

mod components;

use components::dynamic_form::DynamicForm;

#[component]
pub fn App() -> impl IntoView {
    view! {
        <div class="min-h-screen bg-gray-100">
            <DynamicForm/>
        </div>
    }
}

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::mount_to_body(App);
}

use leptos::prelude::*;

/// Labelled text input bound to a signal.
#[component]
pub fn TextField(
    label: &'static str,
    name: &'static str,
    value: RwSignal<String>,
    #[prop(default = "text")] kind: &'static str,
) -> impl IntoView {
    view! {
        <div class="form-row">
            <label for=name>{label}</label>
            <input
                id=name
                name=name
                type=kind
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        </div>
    }
}

/// Inline error or notice line; renders nothing when empty.
#[component]
pub fn Notice(
    message: RwSignal<Option<String>>,
    #[prop(default = "error")] tone: &'static str,
) -> impl IntoView {
    move || {
        message
            .get()
            .map(|text| view! { <p class=tone>{text}</p> })
    }
}

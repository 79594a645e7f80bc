//! Timetable generation.

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::form::Notice;
use crate::session::use_session;

#[component]
pub fn TimetableGeneratorPage() -> impl IntoView {
    let session = use_session();
    let stats = LocalResource::new(move || {
        let backend = session.backend();
        async move { backend?.timetable_stats().await.into_result() }
    });

    view! {
        <div class="timetable-generator">
            <h1>"Timetable Generator"</h1>
            <Suspense fallback=|| view! { <p>"Loading..."</p> }>
                {move || stats.get().map(|result| match result {
                    Ok(stats) => view! { <p>{stats.total}" timetables on record"</p> }.into_any(),
                    Err(err) => view! { <p class="error">{err}</p> }.into_any(),
                })}
            </Suspense>
            <GenerateTimetableButton on_generated=Callback::new(move |()| stats.refetch())/>
        </div>
    }
}

/// Triggers generation for the signed-in administrator's department and
/// reports the backend's answer.
#[component]
pub fn GenerateTimetableButton(#[prop(optional)] on_generated: Option<Callback<()>>) -> impl IntoView {
    let session = use_session();
    let running = RwSignal::new(false);
    let notice = RwSignal::new(None::<String>);
    let error = RwSignal::new(None::<String>);

    let on_click = move |_| {
        let backend = match session.backend() {
            Ok(backend) => backend,
            Err(err) => {
                error.set(Some(err));
                return;
            }
        };
        running.set(true);
        notice.set(None);
        error.set(None);
        spawn_local(async move {
            let response = backend.generate_timetable().await;
            if response.success {
                let message = response
                    .data
                    .as_ref()
                    .and_then(|outcome| outcome.message.clone())
                    .or(response.message)
                    .unwrap_or_else(|| "Timetables generated".to_string());
                notice.set(Some(message));
                if let Some(callback) = on_generated {
                    callback.run(());
                }
            } else {
                error.set(Some(response.error_or("Generation failed").to_string()));
            }
            running.set(false);
        });
    };

    view! {
        <div class="generate-timetable">
            <button on:click=on_click disabled=move || running.get()>
                {move || if running.get() { "Generating..." } else { "Generate timetable" }}
            </button>
            <Notice message=notice tone="notice"/>
            <Notice message=error/>
        </div>
    }
}

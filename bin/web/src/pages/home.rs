//! Landing page.

use leptos::prelude::*;
use timetable_admin_platform_access::{LOGIN_PATH, SessionState};

use crate::session::use_session;

/// Landing page pointing visitors at login, or users at their dashboard.
#[component]
pub fn HomePage() -> impl IntoView {
    let session = use_session();
    let backend_up = LocalResource::new(move || {
        let backend = session.backend();
        async move {
            match backend {
                Ok(backend) => backend.health().await,
                Err(_) => false,
            }
        }
    });

    view! {
        <div class="home-page">
            <h1>"Timetable Admin"</h1>
            <p>"Manage departments, onboard staff and generate academic timetables."</p>
            {move || match session.state().with(SessionState::role) {
                Some(role) => view! {
                    <a href=role.home_path() class="cta-button">
                        {format!("Go to {}", role.label())}
                    </a>
                }
                .into_any(),
                None => view! {
                    <a href=LOGIN_PATH class="cta-button">"Log in"</a>
                }
                .into_any(),
            }}
            <Suspense fallback=|| ()>
                {move || backend_up.get().map(|up| view! {
                    <p class={if up { "status notice" } else { "status error" }}>
                        {if up { "Backend online" } else { "Backend unreachable" }}
                    </p>
                })}
            </Suspense>
        </div>
    }
}

//! Login page.

use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;
use timetable_admin_platform_access::SessionState;

use super::form::{Notice, TextField};
use crate::session::use_session;

/// Email and password form. A signed-in user is sent on to the dashboard
/// for their role, which is also what happens after a successful login.
#[component]
pub fn LoginPage() -> impl IntoView {
    let session = use_session();
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let pending = RwSignal::new(false);

    Effect::new(move |_| {
        if let Some(role) = session.state().with(SessionState::role) {
            navigate(
                role.home_path(),
                NavigateOptions {
                    replace: true,
                    ..Default::default()
                },
            );
        }
    });

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }
        pending.set(true);
        error.set(None);

        let email = email.get_untracked();
        let password = password.get_untracked();
        spawn_local(async move {
            if let Err(err) = session.login(&email, &password).await {
                error.set(Some(err.user_message().to_string()));
            }
            pending.set(false);
        });
    };

    view! {
        <div class="login-page">
            <form class="login-box" on:submit=on_submit>
                <h1>"Log in to Timetable Admin"</h1>
                <TextField label="Email" name="email" kind="email" value=email/>
                <TextField label="Password" name="password" kind="password" value=password/>
                <Notice message=error/>
                <button type="submit" class="login-button" disabled=move || pending.get()>
                    {move || if pending.get() { "Signing in..." } else { "Log in" }}
                </button>
            </form>
        </div>
    }
}

//! Route guard component.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::Redirect;
use timetable_admin_platform_access::{GuardDecision, Role, RouteGuard};

use crate::session::use_session;

/// Renders `children` only for a signed-in user holding `role` (any
/// signed-in user when `role` is omitted).
///
/// Visitors who may not enter are sent to the login page with a history
/// replace. Nothing is rendered while the session is still initializing.
#[component]
pub fn ProtectedRoute(#[prop(optional)] role: Option<Role>, children: ChildrenFn) -> impl IntoView {
    let session = use_session();
    let guard = RouteGuard::new(role);

    move || match session.state().with(|state| guard.evaluate(state)) {
        GuardDecision::Loading => view! {
            <div class="loading" aria-busy="true">"Loading..."</div>
        }
        .into_any(),
        GuardDecision::Render => children().into_any(),
        GuardDecision::Redirect(redirect) => view! {
            <Redirect
                path=redirect.to
                options=NavigateOptions {
                    replace: redirect.replace,
                    ..Default::default()
                }
            />
        }
        .into_any(),
    }
}

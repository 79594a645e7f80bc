//! Department workspace.

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;
use timetable_admin_core::DepartmentId;

use super::timetable::GenerateTimetableButton;
use crate::session::use_session;

#[component]
pub fn DepartmentPage() -> impl IntoView {
    let session = use_session();
    let params = use_params_map();
    let department_id =
        move || DepartmentId::new(params.with(|p| p.get("dept_id").unwrap_or_default()));

    let departments = LocalResource::new(move || {
        let backend = session.backend();
        async move { backend?.list_departments().await.into_result() }
    });

    view! {
        <div class="department-page">
            <Suspense fallback=|| view! { <p>"Loading department..."</p> }>
                {move || departments.get().map(|result| {
                    let id = department_id();
                    match result.map(|items| items.into_iter().find(|d| d.id == id)) {
                        Ok(Some(department)) => view! {
                            <h1>{department.name}</h1>
                            <p class="subtitle">{department.code}</p>
                            <GenerateTimetableButton/>
                        }
                        .into_any(),
                        Ok(None) => view! {
                            <h1>"Department not found"</h1>
                            <p>{format!("No department with id {id}.")}</p>
                        }
                        .into_any(),
                        Err(err) => view! { <p class="error">{err}</p> }.into_any(),
                    }
                })}
            </Suspense>
        </div>
    }
}

//! Main administrator dashboard.

use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use timetable_admin_gateway::NewDepartment;

use super::form::{Notice, TextField};
use crate::session::use_session;

#[component]
pub fn MainAdminDashboard() -> impl IntoView {
    view! {
        <div class="dashboard main-admin">
            <h1>"Main Administrator"</h1>
            <TimetableStatsCard/>
            <DepartmentsSection/>
            <UsersSection/>
        </div>
    }
}

#[component]
fn TimetableStatsCard() -> impl IntoView {
    let session = use_session();
    let stats = LocalResource::new(move || {
        let backend = session.backend();
        async move { backend?.timetable_stats().await.into_result() }
    });

    view! {
        <section class="stats-card">
            <h2>"Timetables"</h2>
            <Suspense fallback=|| view! { <p>"Loading..."</p> }>
                {move || stats.get().map(|result| match result {
                    Ok(stats) => view! { <p class="stat">{stats.total}" generated"</p> }.into_any(),
                    Err(err) => view! { <p class="error">{err}</p> }.into_any(),
                })}
            </Suspense>
        </section>
    }
}

/// Department list with a creation form.
#[component]
fn DepartmentsSection() -> impl IntoView {
    let session = use_session();
    let departments = LocalResource::new(move || {
        let backend = session.backend();
        async move { backend?.list_departments().await.into_result() }
    });

    let name = RwSignal::new(String::new());
    let code = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let department = NewDepartment::new(&name.get_untracked(), &code.get_untracked());
        let backend = match session.backend() {
            Ok(backend) => backend,
            Err(err) => {
                error.set(Some(err));
                return;
            }
        };
        spawn_local(async move {
            match backend.create_department(&department).await.into_result() {
                Ok(_) => {
                    name.set(String::new());
                    code.set(String::new());
                    error.set(None);
                    departments.refetch();
                }
                Err(err) => error.set(Some(err)),
            }
        });
    };

    view! {
        <section class="departments">
            <h2>"Departments"</h2>
            <form class="inline-form" on:submit=on_submit>
                <TextField label="Name" name="department-name" value=name/>
                <TextField label="Code" name="department-code" value=code/>
                <button type="submit">"Add department"</button>
            </form>
            <Notice message=error/>
            <Suspense fallback=|| view! { <p>"Loading departments..."</p> }>
                {move || departments.get().map(|result| match result {
                    Ok(items) if items.is_empty() => view! {
                        <p class="empty-state">"No departments yet."</p>
                    }
                    .into_any(),
                    Ok(items) => view! {
                        <table class="departments-table">
                            <thead>
                                <tr><th>"Code"</th><th>"Name"</th></tr>
                            </thead>
                            <tbody>
                                {items.into_iter().map(|department| view! {
                                    <tr>
                                        <td>{department.code}</td>
                                        <td>
                                            <a href=format!("/department/{}", department.id)>
                                                {department.name}
                                            </a>
                                        </td>
                                    </tr>
                                }).collect_view()}
                            </tbody>
                        </table>
                    }
                    .into_any(),
                    Err(err) => view! { <p class="error">{err}</p> }.into_any(),
                })}
            </Suspense>
        </section>
    }
}

#[component]
fn UsersSection() -> impl IntoView {
    let session = use_session();
    let users = LocalResource::new(move || {
        let backend = session.backend();
        async move { backend?.list_users().await.into_result() }
    });

    view! {
        <section class="users">
            <h2>"Users"</h2>
            <Suspense fallback=|| view! { <p>"Loading users..."</p> }>
                {move || users.get().map(|result| match result {
                    Ok(items) => view! {
                        <table class="users-table">
                            <thead>
                                <tr>
                                    <th>"Name"</th>
                                    <th>"Email"</th>
                                    <th>"Role"</th>
                                    <th>"Department"</th>
                                </tr>
                            </thead>
                            <tbody>
                                {items.into_iter().map(|user| view! {
                                    <tr>
                                        <td>{user.name}</td>
                                        <td>{user.email}</td>
                                        <td>{user.role.label()}</td>
                                        <td>{user.department_name.unwrap_or_else(|| "-".to_string())}</td>
                                    </tr>
                                }).collect_view()}
                            </tbody>
                        </table>
                    }
                    .into_any(),
                    Err(err) => view! { <p class="error">{err}</p> }.into_any(),
                })}
            </Suspense>
        </section>
    }
}

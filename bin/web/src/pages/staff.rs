//! Staff dashboard.

use leptos::prelude::*;

use super::choice_forms::{MyTimetable, StaffChoiceForms};
use crate::session::use_session;

/// Profile, subject preferences and timetable of the signed-in staff
/// member.
#[component]
pub fn StaffDashboard() -> impl IntoView {
    let session = use_session();

    move || {
        session.user().map(|user| {
            let subjects = user.subjects_selected().to_vec();
            let locked = user.subjects_locked();
            view! {
                <div class="dashboard staff">
                    <h1>{format!("Welcome, {}", user.name())}</h1>
                    <dl class="profile">
                        <dt>"Email"</dt>
                        <dd>{user.email().to_string()}</dd>
                        <dt>"Employee ID"</dt>
                        <dd>{user.employee_id().unwrap_or("-").to_string()}</dd>
                        <dt>"Department"</dt>
                        <dd>{user.department_name().unwrap_or("-").to_string()}</dd>
                        <dt>"Position"</dt>
                        <dd>{user.staff_role().map_or("-", |role| role.label())}</dd>
                    </dl>
                    <section class="subjects">
                        <h2>"Subjects"</h2>
                        {if subjects.is_empty() {
                            view! { <p class="empty-state">"No subjects selected yet."</p> }.into_any()
                        } else {
                            view! {
                                <ul>
                                    {subjects.into_iter().map(|subject| view! { <li>{subject}</li> }).collect_view()}
                                </ul>
                            }
                            .into_any()
                        }}
                        {locked.then(|| view! { <p class="notice">"Your subject choice is locked."</p> })}
                    </section>
                    <StaffChoiceForms/>
                    <MyTimetable/>
                </div>
            }
        })
    }
}

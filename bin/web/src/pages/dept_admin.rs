//! Department administrator dashboard: staff onboarding, subject choice
//! forms and timetable generation for the administrator's department.

use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use timetable_admin_gateway::{StaffCredentials, StaffRegistration};
use timetable_admin_platform_access::StaffRole;

use super::choice_forms::ChoiceFormsAdmin;
use super::form::{Notice, TextField};
use super::timetable::GenerateTimetableButton;
use crate::session::use_session;

#[component]
pub fn DeptAdminDashboard() -> impl IntoView {
    let session = use_session();
    let department = move || {
        session
            .user()
            .and_then(|user| user.department_name().map(str::to_string))
            .unwrap_or_else(|| "Your department".to_string())
    };

    view! {
        <div class="dashboard dept-admin">
            <h1>"Department Administrator"</h1>
            <p class="subtitle">{department}</p>
            <StaffRegistrationForm/>
            <ChoiceFormsAdmin/>
            <section class="generate">
                <h2>"Timetable"</h2>
                <GenerateTimetableButton/>
            </section>
        </div>
    }
}

/// Registers staff and shows the login the backend generated for them.
#[component]
fn StaffRegistrationForm() -> impl IntoView {
    let session = use_session();
    let registrations = LocalResource::new(move || {
        let backend = session.backend();
        async move { backend?.list_staff_registrations().await.into_result() }
    });

    let name = RwSignal::new(String::new());
    let employee_id = RwSignal::new(String::new());
    let college = RwSignal::new(String::new());
    let faculty = RwSignal::new(String::new());
    let campus = RwSignal::new(String::new());
    let contact_number = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let staff_role = RwSignal::new(StaffRole::AssistantProfessor);

    let error = RwSignal::new(None::<String>);
    let issued = RwSignal::new(None::<StaffCredentials>);

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let registration = StaffRegistration {
            name: name.get_untracked(),
            employee_id: employee_id.get_untracked(),
            college: college.get_untracked(),
            faculty: faculty.get_untracked(),
            campus: campus.get_untracked(),
            contact_number: contact_number.get_untracked(),
            email: email.get_untracked(),
            staff_role: staff_role.get_untracked(),
        };
        let backend = match session.backend() {
            Ok(backend) => backend,
            Err(err) => {
                error.set(Some(err));
                return;
            }
        };
        error.set(None);
        issued.set(None);
        spawn_local(async move {
            match backend.register_staff(&registration).await.into_result() {
                Ok(receipt) => {
                    for field in [name, employee_id, college, faculty, campus, contact_number, email] {
                        field.set(String::new());
                    }
                    issued.set(Some(receipt.credentials));
                    registrations.refetch();
                }
                Err(err) => error.set(Some(err)),
            }
        });
    };

    view! {
        <section class="staff-registration">
            <h2>"Register staff"</h2>
            <form on:submit=on_submit>
                <TextField label="Name" name="staff-name" value=name/>
                <TextField label="Employee ID" name="employee-id" value=employee_id/>
                <TextField label="College" name="college" value=college/>
                <TextField label="Faculty" name="faculty" value=faculty/>
                <TextField label="Campus" name="campus" value=campus/>
                <TextField label="Contact number" name="contact-number" kind="tel" value=contact_number/>
                <TextField label="Email" name="staff-email" kind="email" value=email/>
                <div class="form-row">
                    <label for="staff-role">"Position"</label>
                    <select
                        id="staff-role"
                        on:change=move |ev| {
                            if let Ok(role) = event_target_value(&ev).parse::<StaffRole>() {
                                staff_role.set(role);
                            }
                        }
                    >
                        {StaffRole::ALL.into_iter().map(|role| view! {
                            <option
                                value=role.as_str()
                                selected=move || staff_role.get() == role
                            >
                                {role.label()}
                            </option>
                        }).collect_view()}
                    </select>
                </div>
                <button type="submit">"Register"</button>
            </form>
            <Notice message=error/>
            {move || issued.get().map(|credentials| view! {
                <div class="issued-credentials">
                    <p>"Share these credentials with the staff member:"</p>
                    <dl>
                        <dt>"Username"</dt><dd>{credentials.username}</dd>
                        <dt>"Password"</dt><dd>{credentials.password}</dd>
                    </dl>
                </div>
            })}

            <h3>"Registrations"</h3>
            <Suspense fallback=|| view! { <p>"Loading registrations..."</p> }>
                {move || registrations.get().map(|result| match result {
                    Ok(items) if items.is_empty() => view! {
                        <p class="empty-state">"No staff registered yet."</p>
                    }
                    .into_any(),
                    Ok(items) => view! {
                        <ul class="registrations">
                            {items.into_iter().map(|record| view! {
                                <li>
                                    <strong>{record.name}</strong>" "
                                    <span>{record.email}</span>" "
                                    <span class="staff-role">
                                        {record
                                            .staff_role
                                            .as_deref()
                                            .and_then(|raw| raw.parse::<StaffRole>().ok())
                                            .map(|role| role.label().to_string())
                                            .or(record.staff_role)
                                            .unwrap_or_default()}
                                    </span>
                                    {(!record.registered).then(|| view! {
                                        <span class="pending">" (pending)"</span>
                                    })}
                                </li>
                            }).collect_view()}
                        </ul>
                    }
                    .into_any(),
                    Err(err) => view! { <p class="error">{err}</p> }.into_any(),
                })}
            </Suspense>
        </section>
    }
}

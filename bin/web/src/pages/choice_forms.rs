//! Subject preference collection.
//!
//! Department administrators publish choice forms; staff rank the subjects
//! they want to teach on each open form.

use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use timetable_admin_gateway::{ChoiceForm, ChoiceFormStatus, ChoicePreferences, NewChoiceForm};

use super::form::{Notice, TextField};
use crate::session::use_session;

/// Department administrator's view: create forms, open and close them.
#[component]
pub fn ChoiceFormsAdmin() -> impl IntoView {
    let session = use_session();
    let forms = LocalResource::new(move || {
        let backend = session.backend();
        async move { backend?.list_choice_forms().await.into_result() }
    });

    let title = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let open_date = RwSignal::new(String::new());
    let close_date = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let form = NewChoiceForm::new(
            &title.get_untracked(),
            &description.get_untracked(),
            &open_date.get_untracked(),
            &close_date.get_untracked(),
        );
        let backend = match session.backend() {
            Ok(backend) => backend,
            Err(err) => {
                error.set(Some(err));
                return;
            }
        };
        spawn_local(async move {
            let response = backend.create_choice_form(&form).await;
            if response.success {
                for field in [title, description, open_date, close_date] {
                    field.set(String::new());
                }
                error.set(None);
                forms.refetch();
            } else {
                error.set(Some(response.error_or("Failed to create form").to_string()));
            }
        });
    };

    let toggle = move |form: ChoiceForm| {
        let backend = match session.backend() {
            Ok(backend) => backend,
            Err(err) => {
                error.set(Some(err));
                return;
            }
        };
        spawn_local(async move {
            let response = backend
                .set_choice_form_status(&form.id, form.status.toggled())
                .await;
            if response.success {
                forms.refetch();
            } else {
                error.set(Some(response.error_or("Failed to update form").to_string()));
            }
        });
    };

    view! {
        <section class="choice-forms">
            <h2>"Subject choice forms"</h2>
            <form on:submit=on_submit>
                <TextField label="Title" name="form-title" value=title/>
                <TextField label="Description" name="form-description" value=description/>
                <TextField label="Opens" name="form-open" kind="date" value=open_date/>
                <TextField label="Closes" name="form-close" kind="date" value=close_date/>
                <button type="submit">"Create form"</button>
            </form>
            <Notice message=error/>
            <Suspense fallback=|| view! { <p>"Loading forms..."</p> }>
                {move || forms.get().map(|result| match result {
                    Ok(items) if items.is_empty() => view! {
                        <p class="empty-state">"No choice forms yet."</p>
                    }
                    .into_any(),
                    Ok(items) => view! {
                        <table class="choice-forms-table">
                            <thead>
                                <tr>
                                    <th>"Title"</th>
                                    <th>"Window"</th>
                                    <th>"Status"</th>
                                    <th>"Responses"</th>
                                    <th></th>
                                </tr>
                            </thead>
                            <tbody>
                                {items.into_iter().map(|form| {
                                    let action = if form.status.toggled() == ChoiceFormStatus::Open {
                                        "Open"
                                    } else {
                                        "Close"
                                    };
                                    let row = form.clone();
                                    view! {
                                        <tr>
                                            <td>{form.title}</td>
                                            <td>{format!("{} to {}", form.open_date, form.close_date)}</td>
                                            <td>{form.status.as_str()}</td>
                                            <td>{form.submission_count}</td>
                                            <td>
                                                <button on:click=move |_| toggle(row.clone())>
                                                    {action}
                                                </button>
                                            </td>
                                        </tr>
                                    }
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

/// Staff view: answer open forms and review past submissions.
#[component]
pub fn StaffChoiceForms() -> impl IntoView {
    let session = use_session();
    let forms = LocalResource::new(move || {
        let backend = session.backend();
        async move { backend?.available_choice_forms().await.into_result() }
    });
    let submissions = LocalResource::new(move || {
        let backend = session.backend();
        async move { backend?.my_choice_submissions().await.into_result() }
    });
    let refresh = Callback::new(move |()| {
        forms.refetch();
        submissions.refetch();
    });

    view! {
        <section class="choice-forms">
            <h2>"Subject preferences"</h2>
            <Suspense fallback=|| view! { <p>"Loading forms..."</p> }>
                {move || forms.get().map(|result| match result {
                    Ok(items) if items.is_empty() => view! {
                        <p class="empty-state">"No forms are open right now."</p>
                    }
                    .into_any(),
                    Ok(items) => items
                        .into_iter()
                        .map(|form| view! { <PreferenceForm form on_submitted=refresh/> })
                        .collect_view()
                        .into_any(),
                    Err(err) => view! { <p class="error">{err}</p> }.into_any(),
                })}
            </Suspense>

            <h3>"My submissions"</h3>
            <Suspense fallback=|| view! { <p>"Loading submissions..."</p> }>
                {move || submissions.get().map(|result| match result {
                    Ok(items) if items.is_empty() => view! {
                        <p class="empty-state">"Nothing submitted yet."</p>
                    }
                    .into_any(),
                    Ok(items) => view! {
                        <ul class="submissions">
                            {items.into_iter().map(|record| {
                                let ranked = record.preferences().join(", ");
                                view! {
                                    <li>
                                        <strong>{record.form_title}</strong>": "
                                        <span>{ranked}</span>
                                        {record.submitted_at.map(|at| view! {
                                            <span class="submitted-at">{format!(" ({at})")}</span>
                                        })}
                                    </li>
                                }
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

#[component]
fn PreferenceForm(form: ChoiceForm, on_submitted: Callback<()>) -> impl IntoView {
    let session = use_session();
    let subjects = RwSignal::new(String::new());
    let notes = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let notice = RwSignal::new(None::<String>);
    let id = form.id.clone();
    let field_id = format!("subjects-{}", form.id);

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let preferences =
            ChoicePreferences::from_list(&subjects.get_untracked(), &notes.get_untracked());
        let backend = match session.backend() {
            Ok(backend) => backend,
            Err(err) => {
                error.set(Some(err));
                return;
            }
        };
        let id = id.clone();
        error.set(None);
        notice.set(None);
        spawn_local(async move {
            let response = backend.submit_choice_form(&id, &preferences).await;
            if response.success {
                notice.set(Some(
                    response
                        .message
                        .unwrap_or_else(|| "Preferences submitted".to_string()),
                ));
                on_submitted.run(());
            } else {
                error.set(Some(response.error_or("Submission failed").to_string()));
            }
        });
    };

    view! {
        <article class="choice-form">
            <h3>{form.title}</h3>
            {form.description.map(|text| view! { <p>{text}</p> })}
            <p class="window">{format!("Closes {}", form.close_date)}</p>
            {form.has_submitted.then(|| view! {
                <p class="notice">"Submitted. Sending again replaces your answer."</p>
            })}
            <form on:submit=on_submit>
                <div class="form-row">
                    <label for=field_id.clone()>"Subjects, most preferred first (comma separated)"</label>
                    <input
                        id=field_id
                        prop:value=move || subjects.get()
                        on:input=move |ev| subjects.set(event_target_value(&ev))
                    />
                </div>
                <div class="form-row">
                    <label>"Notes"</label>
                    <textarea
                        prop:value=move || notes.get()
                        on:input=move |ev| notes.set(event_target_value(&ev))
                    ></textarea>
                </div>
                <button type="submit">"Submit preferences"</button>
            </form>
            <Notice message=error/>
            <Notice message=notice tone="notice"/>
        </article>
    }
}

/// The staff member's approved timetable, if one exists.
#[component]
pub fn MyTimetable() -> impl IntoView {
    let session = use_session();
    let timetable = LocalResource::new(move || {
        let backend = session.backend();
        async move { backend?.my_timetable().await.into_result() }
    });

    view! {
        <section class="my-timetable">
            <h2>"My timetable"</h2>
            <Suspense fallback=|| view! { <p>"Loading timetable..."</p> }>
                {move || timetable.get().map(|result| match result {
                    Ok(timetable) if timetable.is_empty() => view! {
                        <p class="empty-state">"No approved timetable yet."</p>
                    }
                    .into_any(),
                    Ok(timetable) => view! {
                        <table>
                            <tbody>
                                {timetable.entries().into_iter().map(|(slot, entry)| view! {
                                    <tr><th>{slot}</th><td>{entry}</td></tr>
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

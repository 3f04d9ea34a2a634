//! Admin subject catalogue: create and delete subjects.

#[cfg(test)]
#[path = "admin_subjects_test.rs"]
mod admin_subjects_test;

use leptos::prelude::*;
use session::types::{Subject, SubjectDraft};

use crate::pages::{optional, report_failure};
use crate::state::auth::SharedStore;
use crate::state::notification::NotificationState;
use crate::util::task::spawn;

pub(crate) fn subject_draft(name: &str, code: &str, semester: &str) -> Result<SubjectDraft, &'static str> {
    let name = optional(name).ok_or("A subject needs a name.")?;
    Ok(SubjectDraft { name, code: optional(code), semester: optional(semester) })
}

/// Alphabetical by name.
pub(crate) fn sorted(subjects: &[Subject]) -> Vec<Subject> {
    let mut list = subjects.to_vec();
    list.sort_by_key(|s| s.name.to_lowercase());
    list
}

#[component]
pub fn AdminSubjectsPage() -> impl IntoView {
    let store = expect_context::<SharedStore>();
    let notifications = expect_context::<RwSignal<NotificationState>>();

    let subjects = RwSignal::new(Vec::<Subject>::new());
    let name = RwSignal::new(String::new());
    let code = RwSignal::new(String::new());
    let semester = RwSignal::new(String::new());

    {
        let store = store.clone();
        spawn(async move {
            match store.gateway().list_subjects().await {
                Ok(list) => subjects.set(list),
                Err(err) => report_failure(&store, notifications, "load subjects", err),
            }
        });
    }

    let create_store = store.clone();
    let on_create = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let draft = match subject_draft(&name.get(), &code.get(), &semester.get()) {
            Ok(draft) => draft,
            Err(message) => {
                notifications.update(|n| {
                    n.warning(message);
                });
                return;
            }
        };
        let store = create_store.clone();
        spawn(async move {
            match store.gateway().create_subject(&draft).await {
                Ok(subject) => {
                    subjects.update(|list| list.push(subject));
                    name.set(String::new());
                    code.set(String::new());
                    semester.set(String::new());
                    notifications.update(|n| {
                        n.success("Subject created.");
                    });
                }
                Err(err) => report_failure(&store, notifications, "create the subject", err),
            }
        });
    };

    let on_delete = move |id: u64| {
        let store = store.clone();
        spawn(async move {
            match store.gateway().delete_subject(id).await {
                Ok(()) => subjects.update(|list| list.retain(|s| s.id != id)),
                Err(err) => report_failure(&store, notifications, "delete the subject", err),
            }
        });
    };

    view! {
        <div class="admin-page">
            <header class="page-header">
                <h2>"Subjects"</h2>
            </header>
            <form class="admin-form" on:submit=on_create>
                <input type="text" placeholder="Name" prop:value=move || name.get() on:input=move |ev| name.set(event_target_value(&ev))/>
                <input type="text" placeholder="Code" prop:value=move || code.get() on:input=move |ev| code.set(event_target_value(&ev))/>
                <input
                    type="text"
                    placeholder="Semester"
                    prop:value=move || semester.get()
                    on:input=move |ev| semester.set(event_target_value(&ev))
                />
                <button class="btn" type="submit">"Add subject"</button>
            </form>
            <ul class="subject-list">
                <For each=move || sorted(&subjects.get()) key=|s| s.id let:s>
                    <li>
                        <span class="subject-list__name">{s.name.clone()}</span>
                        <span class="subject-list__meta">
                            {s.code.clone().unwrap_or_default()} " " {s.semester.clone().unwrap_or_default()}
                        </span>
                        {
                            let on_delete = on_delete.clone();
                            let id = s.id;
                            view! { <button class="btn btn--danger" on:click=move |_| on_delete(id)>"Delete"</button> }
                        }
                    </li>
                </For>
            </ul>
        </div>
    }
}

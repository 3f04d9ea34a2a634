//! Admin user directory and instructor account creation.

#[cfg(test)]
#[path = "admin_users_test.rs"]
mod admin_users_test;

use leptos::prelude::*;
use session::types::UserDraft;
use session::{Identity, Role};

use crate::pages::{optional, report_failure};
use crate::state::auth::SharedStore;
use crate::state::notification::NotificationState;
use crate::util::task::spawn;

/// Shortest password the account endpoint accepts.
pub(crate) const MIN_PASSWORD_LEN: usize = 6;

#[derive(Clone, Default, PartialEq, Eq)]
pub(crate) struct InstructorForm {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub document: String,
    pub phone: String,
    pub password: String,
}

impl InstructorForm {
    pub(crate) fn to_draft(&self) -> Result<UserDraft, &'static str> {
        let username = optional(&self.username).ok_or("A username is required.")?;
        let document = optional(&self.document).ok_or("An identity document is required.")?;
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err("The password must have at least 6 characters.");
        }
        let email = optional(&self.email);
        if email.as_deref().is_some_and(|e| !e.contains('@')) {
            return Err("The email address is not valid.");
        }
        Ok(UserDraft {
            username: Some(username),
            email,
            first_name: optional(&self.first_name),
            last_name: optional(&self.last_name),
            password: Some(self.password.clone()),
            role: Some(Role::Instructor),
            phone: optional(&self.phone),
            document: Some(document),
        })
    }
}

#[component]
pub fn AdminUsersPage() -> impl IntoView {
    let store = expect_context::<SharedStore>();
    let notifications = expect_context::<RwSignal<NotificationState>>();

    let users = RwSignal::new(Vec::<Identity>::new());
    let form = RwSignal::new(InstructorForm::default());
    let busy = RwSignal::new(false);

    {
        let store = store.clone();
        spawn(async move {
            match store.gateway().list_users().await {
                Ok(list) => users.set(list),
                Err(err) => report_failure(&store, notifications, "load users", err),
            }
        });
    }

    let on_create = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let draft = match form.with_untracked(InstructorForm::to_draft) {
            Ok(draft) => draft,
            Err(message) => {
                notifications.update(|n| {
                    n.warning(message);
                });
                return;
            }
        };
        busy.set(true);
        let store = store.clone();
        spawn(async move {
            match store.gateway().create_instructor(&draft).await {
                Ok(created) => {
                    notifications.update(|n| {
                        n.success(format!("Instructor {} created.", created.display_name()));
                    });
                    users.update(|list| list.push(created));
                    form.set(InstructorForm::default());
                }
                Err(err) => report_failure(&store, notifications, "create the instructor", err),
            }
            busy.set(false);
        });
    };

    let input = move |placeholder: &'static str, kind: &'static str, read: fn(&InstructorForm) -> String, write: fn(&mut InstructorForm, String)| {
        view! {
            <input
                type=kind
                placeholder=placeholder
                prop:value=move || form.with(read)
                on:input=move |ev| form.update(|f| write(f, event_target_value(&ev)))
            />
        }
    };

    view! {
        <div class="admin-page">
            <header class="page-header">
                <h2>"Users"</h2>
            </header>
            <form class="admin-form" on:submit=on_create>
                <h3>"New instructor"</h3>
                {input("Username", "text", |f| f.username.clone(), |f, v| f.username = v)}
                {input("First name", "text", |f| f.first_name.clone(), |f, v| f.first_name = v)}
                {input("Last name", "text", |f| f.last_name.clone(), |f, v| f.last_name = v)}
                {input("Email", "email", |f| f.email.clone(), |f, v| f.email = v)}
                {input("Document", "text", |f| f.document.clone(), |f, v| f.document = v)}
                {input("Phone", "tel", |f| f.phone.clone(), |f, v| f.phone = v)}
                {input("Password", "password", |f| f.password.clone(), |f, v| f.password = v)}
                <button class="btn" type="submit" disabled=move || busy.get()>"Create instructor"</button>
            </form>
            <table class="data-table">
                <thead>
                    <tr>
                        <th>"Username"</th>
                        <th>"Name"</th>
                        <th>"Email"</th>
                        <th>"Role"</th>
                    </tr>
                </thead>
                <tbody>
                    <For each=move || users.get() key=|u| u.id let:u>
                        <tr>
                            <td>{u.username.clone()}</td>
                            <td>{u.display_name()}</td>
                            <td>{u.email.clone().unwrap_or_default()}</td>
                            <td>{u.role.label()}</td>
                        </tr>
                    </For>
                </tbody>
            </table>
        </div>
    }
}

//! Login page: username + password against the token endpoint.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use session::Credentials;

use crate::state::auth::{AuthState, SharedStore};
use crate::state::notification::NotificationState;
use crate::util::task::spawn;

pub(crate) fn validate_login_input(username: &str, password: &str) -> Result<Credentials, &'static str> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err("Enter both username and password.");
    }
    Ok(Credentials::new(username, password))
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let store = expect_context::<SharedStore>();
    let notifications = expect_context::<RwSignal<NotificationState>>();

    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if auth.get_untracked().is_pending() {
            return;
        }
        let credentials = match validate_login_input(&username.get(), &password.get()) {
            Ok(credentials) => credentials,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        info.set(String::new());

        let store = store.clone();
        spawn(async move {
            match store.login(&credentials).await {
                Ok(identity) => {
                    password.set(String::new());
                    notifications.update(|n| {
                        n.success(format!("Welcome, {}.", identity.display_name()));
                    });
                }
                // Shown through `last_error`.
                Err(err) => leptos::logging::warn!("login failed: {err}"),
            }
        });
    };

    let error = move || auth.get().session.last_error().map(ToOwned::to_owned);

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"GECOS"</h1>
                <p class="login-card__subtitle">"Room booking"</p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="text"
                        autocomplete="username"
                        placeholder="Username"
                        prop:value=move || username.get()
                        on:input=move |ev| username.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        autocomplete="current-password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || auth.get().is_pending()>
                        {move || if auth.get().is_pending() { "Signing in..." } else { "Sign in" }}
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
                <Show when=move || error().is_some()>
                    <p class="login-message login-message--error">{move || error().unwrap_or_default()}</p>
                </Show>
            </div>
        </div>
    }
}

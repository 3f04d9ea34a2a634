//! Room list with text filter and availability search.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the authenticated landing route. It loads the full room inventory
//! once, then optionally narrows it to rooms free in a date/time window.

#[cfg(test)]
#[path = "rooms_test.rs"]
mod rooms_test;

use leptos::prelude::*;
use leptos_router::components::A;
use session::types::{AvailabilityWindow, Room};
use session::AppRoute;

use crate::pages::report_failure;
use crate::state::auth::SharedStore;
use crate::state::notification::NotificationState;
use crate::util::task::spawn;

/// Validate an availability query. Times are `HH:MM`, dates `YYYY-MM-DD`.
pub(crate) fn availability_window(date: &str, start: &str, end: &str) -> Result<AvailabilityWindow, &'static str> {
    let (date, start, end) = (date.trim(), start.trim(), end.trim());
    if date.is_empty() || start.is_empty() || end.is_empty() {
        return Err("Pick a date, a start time and an end time.");
    }
    // Zero-padded HH:MM compares correctly as text.
    if start >= end {
        return Err("The end time must be after the start time.");
    }
    Ok(AvailabilityWindow { date: date.to_owned(), start: start.to_owned(), end: end.to_owned() })
}

/// Case-insensitive match on name, code, or block.
pub(crate) fn filter_rooms(rooms: &[Room], query: &str) -> Vec<Room> {
    let query = query.trim().to_lowercase();
    rooms
        .iter()
        .filter(|room| {
            query.is_empty()
                || [&room.name, &room.code, &room.block]
                    .iter()
                    .any(|field| field.to_lowercase().contains(&query))
        })
        .cloned()
        .collect()
}

/// Equipment badges shown on a room card.
pub(crate) fn amenities(room: &Room) -> Vec<&'static str> {
    [
        (room.has_projector, "Projector"),
        (room.has_computers, "Computers"),
        (room.has_air_conditioning, "A/C"),
        (room.has_smart_tv, "Smart TV"),
        (room.has_audio, "Audio"),
        (room.has_wifi, "Wi-Fi"),
    ]
    .into_iter()
    .filter_map(|(present, label)| present.then_some(label))
    .collect()
}

#[component]
pub fn RoomsPage() -> impl IntoView {
    let store = expect_context::<SharedStore>();
    let notifications = expect_context::<RwSignal<NotificationState>>();

    let rooms = RwSignal::new(Vec::<Room>::new());
    let loading = RwSignal::new(true);
    let query = RwSignal::new(String::new());
    let date = RwSignal::new(String::new());
    let start = RwSignal::new(String::new());
    let end = RwSignal::new(String::new());
    let window = RwSignal::new(None::<AvailabilityWindow>);

    let load = {
        let store = store.clone();
        move |window_filter: Option<AvailabilityWindow>| {
            let store = store.clone();
            loading.set(true);
            spawn(async move {
                let result = match &window_filter {
                    Some(w) => store.gateway().available_rooms(w).await,
                    None => store.gateway().list_rooms(&[]).await,
                };
                match result {
                    Ok(list) => rooms.set(list),
                    Err(err) => report_failure(&store, notifications, "load rooms", err),
                }
                loading.set(false);
            });
        }
    };
    load(None);

    let on_search = {
        let load = load.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            match availability_window(&date.get(), &start.get(), &end.get()) {
                Ok(w) => {
                    window.set(Some(w.clone()));
                    load(Some(w));
                }
                Err(message) => notifications.update(|n| {
                    n.warning(message);
                }),
            }
        }
    };

    let on_clear = move |_| {
        window.set(None);
        load(None);
    };

    let visible = move || filter_rooms(&rooms.get(), &query.get());

    view! {
        <div class="rooms-page">
            <header class="page-header">
                <h2>"Rooms"</h2>
                <input
                    class="search-input"
                    type="search"
                    placeholder="Filter by name, code or block"
                    prop:value=move || query.get()
                    on:input=move |ev| query.set(event_target_value(&ev))
                />
            </header>
            <form class="availability-form" on:submit=on_search>
                <input type="date" prop:value=move || date.get() on:input=move |ev| date.set(event_target_value(&ev))/>
                <input type="time" prop:value=move || start.get() on:input=move |ev| start.set(event_target_value(&ev))/>
                <input type="time" prop:value=move || end.get() on:input=move |ev| end.set(event_target_value(&ev))/>
                <button class="btn" type="submit">"Find available rooms"</button>
                <Show when=move || window.get().is_some()>
                    <button class="btn btn--secondary" type="button" on:click=on_clear.clone()>"Show all"</button>
                </Show>
            </form>
            <Show when=move || !loading.get() fallback=|| view! { <p class="page-status">"Loading rooms..."</p> }>
                <Show when=move || !visible().is_empty() fallback=|| view! { <p class="page-status">"No rooms match."</p> }>
                    <div class="room-grid">
                        <For each=visible key=|room| room.id let:room>
                            <RoomCard room/>
                        </For>
                    </div>
                </Show>
            </Show>
        </div>
    }
}

#[component]
fn RoomCard(room: Room) -> impl IntoView {
    let badges = amenities(&room)
        .into_iter()
        .map(|label| view! { <span class="badge">{label}</span> })
        .collect_view();
    view! {
        <article class="room-card">
            <h3>
                <A href=AppRoute::room_detail(room.id)>{room.name.clone()}</A>
            </h3>
            <p class="room-card__meta">
                {room.code.clone()} " · " {room.kind.label()} " · capacity " {room.capacity}
            </p>
            <p class="room-card__status">{room.status.label()}</p>
            <div class="room-card__badges">{badges}</div>
        </article>
    }
}

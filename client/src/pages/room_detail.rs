//! Room detail with its reservation calendar and a booking form.

#[cfg(test)]
#[path = "room_detail_test.rs"]
mod room_detail_test;

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;
use session::types::{Reservation, ReservationDraft, Room};

use crate::pages::{optional, report_failure};
use crate::state::auth::SharedStore;
use crate::state::notification::NotificationState;
use crate::util::task::spawn;

/// Raw booking form input.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct ReservationForm {
    pub date: String,
    pub start: String,
    pub end: String,
    pub purpose: String,
    pub description: String,
    pub attendees: String,
}

impl ReservationForm {
    /// Validate against `room` and build the create payload.
    pub(crate) fn to_draft(&self, room: &Room) -> Result<ReservationDraft, &'static str> {
        let (date, start, end) = (self.date.trim(), self.start.trim(), self.end.trim());
        if date.is_empty() || start.is_empty() || end.is_empty() {
            return Err("Pick a date, a start time and an end time.");
        }
        if start >= end {
            return Err("The end time must be after the start time.");
        }
        let purpose = optional(&self.purpose).ok_or("Describe the purpose of the reservation.")?;
        let attendees = match optional(&self.attendees) {
            None => None,
            Some(raw) => Some(raw.parse::<u32>().map_err(|_| "Attendees must be a whole number.")?),
        };
        if attendees.is_some_and(|n| room.capacity > 0 && n > room.capacity) {
            return Err("Attendees exceed the room capacity.");
        }
        Ok(ReservationDraft {
            room_id: Some(room.id),
            date: Some(date.to_owned()),
            start_time: Some(start.to_owned()),
            end_time: Some(end.to_owned()),
            purpose: Some(purpose),
            description: optional(&self.description),
            attendees,
        })
    }
}

/// Open reservations of the room, earliest first.
pub(crate) fn schedule(reservations: &[Reservation]) -> Vec<Reservation> {
    let mut open: Vec<Reservation> = reservations.iter().filter(|r| r.status.is_open()).cloned().collect();
    open.sort_by(|a, b| (&a.date, &a.start_time).cmp(&(&b.date, &b.start_time)));
    open
}

#[component]
pub fn RoomDetailPage() -> impl IntoView {
    let store = expect_context::<SharedStore>();
    let notifications = expect_context::<RwSignal<NotificationState>>();
    let params = use_params_map();

    let room = RwSignal::new(None::<Room>);
    let reservations = RwSignal::new(Vec::<Reservation>::new());
    let form = RwSignal::new(ReservationForm::default());
    let busy = RwSignal::new(false);

    let room_id = move || params.with(|p| p.get("id").and_then(|id| id.parse::<u64>().ok()));

    let load_store = store.clone();
    Effect::new(move || {
        let Some(id) = room_id() else {
            notifications.update(|n| {
                n.warning("Unknown room.");
            });
            return;
        };
        let store = load_store.clone();
        spawn(async move {
            match store.gateway().room(id).await {
                Ok(found) => room.set(Some(found)),
                Err(err) => {
                    report_failure(&store, notifications, "load the room", err);
                    return;
                }
            }
            match store.gateway().list_reservations(Some(id)).await {
                Ok(list) => reservations.set(list),
                Err(err) => report_failure(&store, notifications, "load reservations", err),
            }
        });
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(current) = room.get_untracked() else {
            return;
        };
        if busy.get_untracked() {
            return;
        }
        let draft = match form.with_untracked(|f| f.to_draft(&current)) {
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
            match store.gateway().create_reservation(&draft).await {
                Ok(created) => {
                    reservations.update(|list| list.push(created));
                    form.set(ReservationForm::default());
                    notifications.update(|n| {
                        n.success("Reservation requested. It is pending confirmation.");
                    });
                }
                Err(err) => report_failure(&store, notifications, "create the reservation", err),
            }
            busy.set(false);
        });
    };

    let field = move |read: fn(&ReservationForm) -> String, write: fn(&mut ReservationForm, String)| {
        (move || form.with(read), move |ev: leptos::ev::Event| form.update(|f| write(f, event_target_value(&ev))))
    };
    let (date_value, on_date) = field(|f| f.date.clone(), |f, v| f.date = v);
    let (start_value, on_start) = field(|f| f.start.clone(), |f, v| f.start = v);
    let (end_value, on_end) = field(|f| f.end.clone(), |f, v| f.end = v);
    let (purpose_value, on_purpose) = field(|f| f.purpose.clone(), |f, v| f.purpose = v);
    let (description_value, on_description) = field(|f| f.description.clone(), |f, v| f.description = v);
    let (attendees_value, on_attendees) = field(|f| f.attendees.clone(), |f, v| f.attendees = v);

    view! {
        <div class="room-detail-page">
            <Show when=move || room.get().is_some() fallback=|| view! { <p class="page-status">"Loading room..."</p> }>
                {move || {
                    room.get()
                        .map(|r| {
                            view! {
                                <header class="page-header">
                                    <h2>{r.name.clone()}</h2>
                                    <span class="badge">{r.status.label()}</span>
                                </header>
                                <p class="room-detail__meta">
                                    {r.code.clone()} " · " {r.kind.label()} " · block " {r.block.clone()}
                                    " · floor " {r.floor.clone()} " · capacity " {r.capacity}
                                </p>
                                <p class="room-detail__description">{r.description.clone()}</p>
                            }
                        })
                }}
            </Show>

            <section class="room-detail__schedule">
                <h3>"Upcoming reservations"</h3>
                <ul>
                    <For each=move || schedule(&reservations.get()) key=|r| r.id let:r>
                        <li>
                            {r.date.clone()} " " {r.start_time.clone()} "–" {r.end_time.clone()} ": "
                            {r.purpose.clone()} " (" {r.status.label()} ")"
                        </li>
                    </For>
                </ul>
            </section>

            <form class="reservation-form" on:submit=on_submit>
                <h3>"Book this room"</h3>
                <input type="date" prop:value=date_value on:input=on_date/>
                <input type="time" prop:value=start_value on:input=on_start/>
                <input type="time" prop:value=end_value on:input=on_end/>
                <input type="text" placeholder="Purpose" prop:value=purpose_value on:input=on_purpose/>
                <textarea placeholder="Description (optional)" prop:value=description_value on:input=on_description></textarea>
                <input type="number" min="1" placeholder="Attendees" prop:value=attendees_value on:input=on_attendees/>
                <button class="btn" type="submit" disabled=move || busy.get()>"Request reservation"</button>
            </form>
        </div>
    }
}

//! The signed-in user's reservations, with cancellation.

#[cfg(test)]
#[path = "my_reservations_test.rs"]
mod my_reservations_test;

use leptos::prelude::*;
use session::types::{Reservation, ReservationStatus};

use crate::pages::report_failure;
use crate::state::auth::SharedStore;
use crate::state::notification::NotificationState;
use crate::util::task::spawn;

/// Open reservations first, then history; newest date first inside each group.
pub(crate) fn arrange(reservations: &[Reservation]) -> Vec<Reservation> {
    let mut list = reservations.to_vec();
    list.sort_by(|a, b| {
        b.status
            .is_open()
            .cmp(&a.status.is_open())
            .then_with(|| (&b.date, &b.start_time).cmp(&(&a.date, &a.start_time)))
    });
    list
}

/// Replace the entry with the same id.
pub(crate) fn replace(list: &mut [Reservation], updated: Reservation) {
    if let Some(slot) = list.iter_mut().find(|r| r.id == updated.id) {
        *slot = updated;
    }
}

pub(crate) fn status_class(status: ReservationStatus) -> &'static str {
    match status {
        ReservationStatus::Pending => "badge badge--pending",
        ReservationStatus::Confirmed => "badge badge--confirmed",
        ReservationStatus::Cancelled => "badge badge--cancelled",
        ReservationStatus::Completed | ReservationStatus::Unknown => "badge",
    }
}

#[component]
pub fn MyReservationsPage() -> impl IntoView {
    let store = expect_context::<SharedStore>();
    let notifications = expect_context::<RwSignal<NotificationState>>();

    let reservations = RwSignal::new(Vec::<Reservation>::new());
    let loading = RwSignal::new(true);

    {
        let store = store.clone();
        spawn(async move {
            match store.gateway().my_reservations().await {
                Ok(list) => reservations.set(list),
                Err(err) => report_failure(&store, notifications, "load your reservations", err),
            }
            loading.set(false);
        });
    }

    let on_cancel = Callback::new(move |id: u64| {
        let store = store.clone();
        spawn(async move {
            match store.gateway().cancel_reservation(id).await {
                Ok(updated) => {
                    reservations.update(|list| replace(list, updated));
                    notifications.update(|n| {
                        n.success("Reservation cancelled.");
                    });
                }
                Err(err) => report_failure(&store, notifications, "cancel the reservation", err),
            }
        });
    });

    view! {
        <div class="reservations-page">
            <header class="page-header">
                <h2>"My reservations"</h2>
            </header>
            <Show when=move || !loading.get() fallback=|| view! { <p class="page-status">"Loading..."</p> }>
                <Show
                    when=move || !reservations.get().is_empty()
                    fallback=|| view! { <p class="page-status">"You have no reservations yet."</p> }
                >
                    <table class="data-table">
                        <thead>
                            <tr>
                                <th>"Room"</th>
                                <th>"Date"</th>
                                <th>"Time"</th>
                                <th>"Purpose"</th>
                                <th>"Status"</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            <For each=move || arrange(&reservations.get()) key=|r| (r.id, r.status) let:r>
                                <tr>
                                    <td>{r.room.as_ref().map_or_else(|| format!("#{}", r.room_id), |room| room.name.clone())}</td>
                                    <td>{r.date.clone()}</td>
                                    <td>{format!("{}–{}", r.start_time, r.end_time)}</td>
                                    <td>{r.purpose.clone()}</td>
                                    <td><span class=status_class(r.status)>{r.status.label()}</span></td>
                                    <td>
                                        {r.status.is_open().then(|| {
                                            let on_cancel = on_cancel.clone();
                                            let id = r.id;
                                            view! {
                                                <button class="btn btn--danger" on:click=move |_| on_cancel.run(id)>
                                                    "Cancel"
                                                </button>
                                            }
                                        })}
                                    </td>
                                </tr>
                            </For>
                        </tbody>
                    </table>
                </Show>
            </Show>
        </div>
    }
}

//! Admin view of every reservation, with confirm and cancel actions.

#[cfg(test)]
#[path = "admin_reservations_test.rs"]
mod admin_reservations_test;

use leptos::prelude::*;
use session::types::{Reservation, ReservationStatus};

use crate::pages::my_reservations::{arrange, replace, status_class};
use crate::pages::report_failure;
use crate::state::auth::SharedStore;
use crate::state::notification::NotificationState;
use crate::util::task::spawn;

pub(crate) const STATUS_FILTERS: [(Option<ReservationStatus>, &str); 5] = [
    (None, "All"),
    (Some(ReservationStatus::Pending), "Pending"),
    (Some(ReservationStatus::Confirmed), "Confirmed"),
    (Some(ReservationStatus::Cancelled), "Cancelled"),
    (Some(ReservationStatus::Completed), "Completed"),
];

pub(crate) fn filter_by_status(list: &[Reservation], status: Option<ReservationStatus>) -> Vec<Reservation> {
    let filtered: Vec<Reservation> = list
        .iter()
        .filter(|r| status.is_none_or(|s| r.status == s))
        .cloned()
        .collect();
    arrange(&filtered)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Decision {
    Confirm,
    Cancel,
}

#[component]
pub fn AdminReservationsPage() -> impl IntoView {
    let store = expect_context::<SharedStore>();
    let notifications = expect_context::<RwSignal<NotificationState>>();

    let reservations = RwSignal::new(Vec::<Reservation>::new());
    let filter = RwSignal::new(None::<ReservationStatus>);

    {
        let store = store.clone();
        spawn(async move {
            match store.gateway().list_reservations(None).await {
                Ok(list) => reservations.set(list),
                Err(err) => report_failure(&store, notifications, "load reservations", err),
            }
        });
    }

    let decide = move |id: u64, decision: Decision| {
        let store = store.clone();
        spawn(async move {
            let (result, action, done) = match decision {
                Decision::Confirm => {
                    (store.gateway().confirm_reservation(id).await, "confirm the reservation", "Reservation confirmed.")
                }
                Decision::Cancel => {
                    (store.gateway().cancel_reservation(id).await, "cancel the reservation", "Reservation cancelled.")
                }
            };
            match result {
                Ok(updated) => {
                    reservations.update(|list| replace(list, updated));
                    notifications.update(|n| {
                        n.success(done);
                    });
                }
                Err(err) => report_failure(&store, notifications, action, err),
            }
        });
    };

    view! {
        <div class="admin-page">
            <header class="page-header">
                <h2>"All reservations"</h2>
                <div class="filter-chips">
                    {STATUS_FILTERS
                        .into_iter()
                        .map(|(status, label)| {
                            view! {
                                <button
                                    class="chip"
                                    class:chip--active=move || filter.get() == status
                                    on:click=move |_| filter.set(status)
                                >
                                    {label}
                                </button>
                            }
                        })
                        .collect_view()}
                </div>
            </header>
            <table class="data-table">
                <thead>
                    <tr>
                        <th>"User"</th>
                        <th>"Room"</th>
                        <th>"Date"</th>
                        <th>"Time"</th>
                        <th>"Purpose"</th>
                        <th>"Status"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || filter_by_status(&reservations.get(), filter.get())
                        key=|r| (r.id, r.status)
                        let:r
                    >
                        <tr>
                            <td>{r.user_name.clone().unwrap_or_else(|| format!("#{}", r.user_id))}</td>
                            <td>{r.room.as_ref().map_or_else(|| format!("#{}", r.room_id), |room| room.name.clone())}</td>
                            <td>{r.date.clone()}</td>
                            <td>{format!("{}–{}", r.start_time, r.end_time)}</td>
                            <td>{r.purpose.clone()}</td>
                            <td><span class=status_class(r.status)>{r.status.label()}</span></td>
                            <td class="data-table__actions">
                                {(r.status == ReservationStatus::Pending).then(|| {
                                    let decide = decide.clone();
                                    let id = r.id;
                                    view! {
                                        <button class="btn" on:click=move |_| decide(id, Decision::Confirm)>"Confirm"</button>
                                    }
                                })}
                                {r.status.is_open().then(|| {
                                    let decide = decide.clone();
                                    let id = r.id;
                                    view! {
                                        <button class="btn btn--danger" on:click=move |_| decide(id, Decision::Cancel)>"Cancel"</button>
                                    }
                                })}
                            </td>
                        </tr>
                    </For>
                </tbody>
            </table>
        </div>
    }
}

//! Admin metrics: occupancy figures computed from the room and reservation
//! lists.

#[cfg(test)]
#[path = "admin_metrics_test.rs"]
mod admin_metrics_test;

use std::collections::HashMap;

use leptos::prelude::*;
use session::types::{Reservation, ReservationStatus, Room, RoomStatus};

use crate::pages::report_failure;
use crate::state::auth::SharedStore;
use crate::state::notification::NotificationState;
use crate::util::task::spawn;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Metrics {
    pub total_rooms: usize,
    pub total_capacity: u64,
    pub rooms_by_status: Vec<(RoomStatus, usize)>,
    pub total_reservations: usize,
    pub reservations_by_status: Vec<(ReservationStatus, usize)>,
    /// Room names ranked by number of non-cancelled reservations.
    pub busiest_rooms: Vec<(String, usize)>,
}

const ROOM_STATUSES: [RoomStatus; 3] = [RoomStatus::Available, RoomStatus::Occupied, RoomStatus::Maintenance];
const RESERVATION_STATUSES: [ReservationStatus; 4] = [
    ReservationStatus::Pending,
    ReservationStatus::Confirmed,
    ReservationStatus::Cancelled,
    ReservationStatus::Completed,
];
const BUSIEST_LIMIT: usize = 5;

impl Metrics {
    pub(crate) fn compute(rooms: &[Room], reservations: &[Reservation]) -> Self {
        let rooms_by_status = ROOM_STATUSES
            .into_iter()
            .map(|status| (status, rooms.iter().filter(|r| r.status == status).count()))
            .collect();
        let reservations_by_status = RESERVATION_STATUSES
            .into_iter()
            .map(|status| (status, reservations.iter().filter(|r| r.status == status).count()))
            .collect();

        let mut per_room: HashMap<u64, usize> = HashMap::new();
        for reservation in reservations.iter().filter(|r| r.status != ReservationStatus::Cancelled) {
            *per_room.entry(reservation.room_id).or_default() += 1;
        }
        let mut busiest: Vec<(String, usize)> = per_room
            .into_iter()
            .map(|(room_id, count)| {
                let name = rooms
                    .iter()
                    .find(|r| r.id == room_id)
                    .map_or_else(|| format!("#{room_id}"), |r| r.name.clone());
                (name, count)
            })
            .collect();
        busiest.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        busiest.truncate(BUSIEST_LIMIT);

        Self {
            total_rooms: rooms.len(),
            total_capacity: rooms.iter().map(|r| u64::from(r.capacity)).sum(),
            rooms_by_status,
            total_reservations: reservations.len(),
            reservations_by_status,
            busiest_rooms: busiest,
        }
    }
}

#[component]
pub fn AdminMetricsPage() -> impl IntoView {
    let store = expect_context::<SharedStore>();
    let notifications = expect_context::<RwSignal<NotificationState>>();

    let metrics = RwSignal::new(None::<Metrics>);

    spawn(async move {
        let rooms = match store.gateway().list_rooms(&[]).await {
            Ok(rooms) => rooms,
            Err(err) => return report_failure(&store, notifications, "load rooms", err),
        };
        let reservations = match store.gateway().list_reservations(None).await {
            Ok(list) => list,
            Err(err) => return report_failure(&store, notifications, "load reservations", err),
        };
        metrics.set(Some(Metrics::compute(&rooms, &reservations)));
    });

    view! {
        <div class="admin-page metrics-page">
            <header class="page-header">
                <h2>"Metrics"</h2>
            </header>
            {move || match metrics.get() {
                None => view! { <p class="page-status">"Loading metrics..."</p> }.into_any(),
                Some(m) => view! {
                    <div class="metrics-grid">
                        <section class="metric-card">
                            <h3>"Rooms"</h3>
                            <p class="metric-card__value">{m.total_rooms}</p>
                            <p>"Total capacity: " {m.total_capacity}</p>
                            <ul>
                                {m.rooms_by_status
                                    .into_iter()
                                    .map(|(status, count)| view! { <li>{status.label()} ": " {count}</li> })
                                    .collect_view()}
                            </ul>
                        </section>
                        <section class="metric-card">
                            <h3>"Reservations"</h3>
                            <p class="metric-card__value">{m.total_reservations}</p>
                            <ul>
                                {m.reservations_by_status
                                    .into_iter()
                                    .map(|(status, count)| view! { <li>{status.label()} ": " {count}</li> })
                                    .collect_view()}
                            </ul>
                        </section>
                        <section class="metric-card">
                            <h3>"Busiest rooms"</h3>
                            <ol>
                                {m.busiest_rooms
                                    .into_iter()
                                    .map(|(name, count)| view! { <li>{name} " (" {count} ")"</li> })
                                    .collect_view()}
                            </ol>
                        </section>
                    </div>
                }
                .into_any(),
            }}
        </div>
    }
}

//! Admin room management: create and delete rooms.

#[cfg(test)]
#[path = "admin_rooms_test.rs"]
mod admin_rooms_test;

use leptos::prelude::*;
use session::types::{Room, RoomDraft, RoomKind, RoomStatus};

use crate::pages::{optional, report_failure};
use crate::state::auth::SharedStore;
use crate::state::notification::NotificationState;
use crate::util::task::spawn;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct RoomForm {
    pub name: String,
    pub code: String,
    pub kind: RoomKind,
    pub block: String,
    pub floor: String,
    pub capacity: String,
}

impl RoomForm {
    pub(crate) fn to_draft(&self) -> Result<RoomDraft, &'static str> {
        let name = optional(&self.name).ok_or("A room needs a name.")?;
        let code = optional(&self.code).ok_or("A room needs a code.")?;
        let capacity = self
            .capacity
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or("Capacity must be a positive whole number.")?;
        Ok(RoomDraft {
            name: Some(name),
            code: Some(code),
            kind: Some(self.kind),
            block: optional(&self.block),
            floor: optional(&self.floor),
            capacity: Some(capacity),
            description: None,
            status: Some(RoomStatus::Available),
        })
    }
}

/// Map a `<select>` value back to a room kind.
pub(crate) fn kind_from_index(raw: &str) -> RoomKind {
    raw.parse::<usize>().ok().and_then(|i| RoomKind::ALL.get(i).copied()).unwrap_or_default()
}

#[component]
pub fn AdminRoomsPage() -> impl IntoView {
    let store = expect_context::<SharedStore>();
    let notifications = expect_context::<RwSignal<NotificationState>>();

    let rooms = RwSignal::new(Vec::<Room>::new());
    let form = RwSignal::new(RoomForm::default());
    let busy = RwSignal::new(false);

    {
        let store = store.clone();
        spawn(async move {
            match store.gateway().list_rooms(&[]).await {
                Ok(list) => rooms.set(list),
                Err(err) => report_failure(&store, notifications, "load rooms", err),
            }
        });
    }

    let create_store = store.clone();
    let on_create = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let draft = match form.with_untracked(RoomForm::to_draft) {
            Ok(draft) => draft,
            Err(message) => {
                notifications.update(|n| {
                    n.warning(message);
                });
                return;
            }
        };
        busy.set(true);
        let store = create_store.clone();
        spawn(async move {
            match store.gateway().create_room(&draft).await {
                Ok(room) => {
                    notifications.update(|n| {
                        n.success(format!("Room {} created.", room.name));
                    });
                    rooms.update(|list| list.push(room));
                    form.set(RoomForm::default());
                }
                Err(err) => report_failure(&store, notifications, "create the room", err),
            }
            busy.set(false);
        });
    };

    let on_delete = move |id: u64| {
        let store = store.clone();
        spawn(async move {
            match store.gateway().delete_room(id).await {
                Ok(()) => {
                    rooms.update(|list| list.retain(|r| r.id != id));
                    notifications.update(|n| {
                        n.success("Room deleted.");
                    });
                }
                Err(err) => report_failure(&store, notifications, "delete the room", err),
            }
        });
    };

    view! {
        <div class="admin-page">
            <header class="page-header">
                <h2>"Manage rooms"</h2>
            </header>
            <form class="admin-form" on:submit=on_create>
                <input
                    type="text"
                    placeholder="Name"
                    prop:value=move || form.with(|f| f.name.clone())
                    on:input=move |ev| form.update(|f| f.name = event_target_value(&ev))
                />
                <input
                    type="text"
                    placeholder="Code"
                    prop:value=move || form.with(|f| f.code.clone())
                    on:input=move |ev| form.update(|f| f.code = event_target_value(&ev))
                />
                <select on:change=move |ev| form.update(|f| f.kind = kind_from_index(&event_target_value(&ev)))>
                    {RoomKind::ALL
                        .iter()
                        .enumerate()
                        .map(|(i, kind)| view! { <option value=i.to_string()>{kind.label()}</option> })
                        .collect_view()}
                </select>
                <input
                    type="text"
                    placeholder="Block"
                    prop:value=move || form.with(|f| f.block.clone())
                    on:input=move |ev| form.update(|f| f.block = event_target_value(&ev))
                />
                <input
                    type="text"
                    placeholder="Floor"
                    prop:value=move || form.with(|f| f.floor.clone())
                    on:input=move |ev| form.update(|f| f.floor = event_target_value(&ev))
                />
                <input
                    type="number"
                    min="1"
                    placeholder="Capacity"
                    prop:value=move || form.with(|f| f.capacity.clone())
                    on:input=move |ev| form.update(|f| f.capacity = event_target_value(&ev))
                />
                <button class="btn" type="submit" disabled=move || busy.get()>"Create room"</button>
            </form>
            <table class="data-table">
                <thead>
                    <tr>
                        <th>"Code"</th>
                        <th>"Name"</th>
                        <th>"Type"</th>
                        <th>"Capacity"</th>
                        <th>"Status"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <For each=move || rooms.get() key=|r| r.id let:r>
                        <tr>
                            <td>{r.code.clone()}</td>
                            <td>{r.name.clone()}</td>
                            <td>{r.kind.label()}</td>
                            <td>{r.capacity}</td>
                            <td>{r.status.label()}</td>
                            <td>
                                {
                                    let on_delete = on_delete.clone();
                                    let id = r.id;
                                    view! {
                                        <button class="btn btn--danger" on:click=move |_| on_delete(id)>"Delete"</button>
                                    }
                                }
                            </td>
                        </tr>
                    </For>
                </tbody>
            </table>
        </div>
    }
}

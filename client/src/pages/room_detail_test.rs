use super::*;

fn room(capacity: u32) -> Room {
    serde_json::from_value(serde_json::json!({"id": 12, "nombre": "Lab 2", "capacidad": capacity}))
        .expect("room")
}

fn reservation(id: u64, date: &str, start: &str, status: &str) -> Reservation {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "salon": 12,
        "fecha": date,
        "hora_inicio": start,
        "hora_fin": "23:00",
        "motivo": "class",
        "estado": status
    }))
    .expect("reservation")
}

fn filled() -> ReservationForm {
    ReservationForm {
        date: "2025-04-02".to_owned(),
        start: "09:00".to_owned(),
        end: "11:00".to_owned(),
        purpose: " Networks lab ".to_owned(),
        description: String::new(),
        attendees: "25".to_owned(),
    }
}

// =============================================================================
// ReservationForm::to_draft
// =============================================================================

#[test]
fn to_draft_builds_payload_for_room() {
    let draft = filled().to_draft(&room(30)).expect("valid");
    assert_eq!(draft.room_id, Some(12));
    assert_eq!(draft.purpose.as_deref(), Some("Networks lab"));
    assert_eq!(draft.description, None);
    assert_eq!(draft.attendees, Some(25));
    let wire = serde_json::to_value(&draft).expect("json");
    assert_eq!(wire["salon"], 12);
    assert_eq!(wire["hora_inicio"], "09:00");
}

#[test]
fn to_draft_requires_purpose() {
    let form = ReservationForm { purpose: "  ".to_owned(), ..filled() };
    assert_eq!(form.to_draft(&room(30)), Err("Describe the purpose of the reservation."));
}

#[test]
fn to_draft_rejects_bad_attendees() {
    let form = ReservationForm { attendees: "many".to_owned(), ..filled() };
    assert_eq!(form.to_draft(&room(30)), Err("Attendees must be a whole number."));
    assert_eq!(filled().to_draft(&room(10)), Err("Attendees exceed the room capacity."));
}

#[test]
fn to_draft_attendees_optional() {
    let form = ReservationForm { attendees: String::new(), ..filled() };
    assert_eq!(form.to_draft(&room(30)).expect("valid").attendees, None);
}

#[test]
fn to_draft_rejects_inverted_times() {
    let form = ReservationForm { start: "12:00".to_owned(), ..filled() };
    assert_eq!(form.to_draft(&room(30)), Err("The end time must be after the start time."));
}

// =============================================================================
// schedule
// =============================================================================

#[test]
fn schedule_keeps_open_reservations_in_order() {
    let list = vec![
        reservation(1, "2025-04-03", "08:00", "pendiente"),
        reservation(2, "2025-04-02", "10:00", "confirmada"),
        reservation(3, "2025-04-01", "08:00", "cancelada"),
        reservation(4, "2025-04-02", "08:00", "pendiente"),
    ];
    let ids: Vec<u64> = schedule(&list).iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![4, 2, 1]);
}

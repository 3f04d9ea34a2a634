use super::*;
use session::Session;

fn state_for(role: &str) -> AuthState {
    let identity = serde_json::from_value(serde_json::json!({"id": 1, "rol": role})).expect("identity");
    AuthState { session: Session::authenticated("tok", identity) }
}

#[test]
fn guests_get_no_links() {
    assert!(nav_links(&AuthState::default()).is_empty());
}

#[test]
fn instructors_get_booking_links_only() {
    let routes: Vec<AppRoute> = nav_links(&state_for("docente")).into_iter().map(|(r, _)| r).collect();
    assert_eq!(routes, vec![AppRoute::Rooms, AppRoute::MyReservations]);
}

#[test]
fn admins_also_get_admin_links() {
    let links = nav_links(&state_for("admin"));
    assert_eq!(links.len(), 7);
    assert!(links.iter().all(|(route, _)| route.requires_authentication()));
    assert!(links.iter().any(|(route, _)| *route == AppRoute::AdminMetrics));
}

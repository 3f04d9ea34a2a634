//! Client route table and its static admission requirements.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use crate::guard::RouteIntent;

/// Every screen the client can navigate to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AppRoute {
    /// `/`, which immediately redirects to [`AppRoute::Login`].
    Home,
    Login,
    /// Room list, the default authenticated landing view.
    Rooms,
    RoomDetail,
    MyReservations,
    AdminRooms,
    AdminReservations,
    AdminSubjects,
    AdminUsers,
    AdminMetrics,
}

impl AppRoute {
    pub const ALL: [Self; 10] = [
        Self::Home,
        Self::Login,
        Self::Rooms,
        Self::RoomDetail,
        Self::MyReservations,
        Self::AdminRooms,
        Self::AdminReservations,
        Self::AdminSubjects,
        Self::AdminUsers,
        Self::AdminMetrics,
    ];

    /// Default authenticated landing view.
    pub const LANDING: Self = Self::Rooms;

    /// Router pattern (`:id` marks a parameter segment).
    #[must_use]
    pub fn pattern(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Login => "/login",
            Self::Rooms => "/salones",
            Self::RoomDetail => "/aula/:id",
            Self::MyReservations => "/reservas",
            Self::AdminRooms => "/admin/salones",
            Self::AdminReservations => "/admin/reservas",
            Self::AdminSubjects => "/admin/asignaturas",
            Self::AdminUsers => "/admin/usuarios",
            Self::AdminMetrics => "/admin/metricas",
        }
    }

    /// Navigable path for parameterless routes.
    ///
    /// For [`AppRoute::RoomDetail`] use [`AppRoute::room_detail`].
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::RoomDetail => Self::Rooms.pattern(),
            other => other.pattern(),
        }
    }

    #[must_use]
    pub fn room_detail(room_id: u64) -> String {
        format!("/aula/{room_id}")
    }

    #[must_use]
    pub fn requires_authentication(self) -> bool {
        !matches!(self, Self::Home | Self::Login)
    }

    #[must_use]
    pub fn requires_admin(self) -> bool {
        matches!(
            self,
            Self::AdminRooms
                | Self::AdminReservations
                | Self::AdminSubjects
                | Self::AdminUsers
                | Self::AdminMetrics
        )
    }

    /// Only reachable while signed out.
    #[must_use]
    pub fn requires_guest(self) -> bool {
        matches!(self, Self::Login)
    }

    /// Navigation attempt to this route at `path`.
    #[must_use]
    pub fn intent(self, path: impl Into<String>) -> RouteIntent {
        RouteIntent {
            path: path.into(),
            requires_authentication: self.requires_authentication(),
            requires_admin: self.requires_admin(),
            requires_guest: self.requires_guest(),
        }
    }

    /// Match a concrete path (query and fragment ignored) against the table.
    #[must_use]
    pub fn resolve(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        Self::ALL.into_iter().find(|route| {
            let pattern: Vec<&str> = route.pattern().split('/').filter(|s| !s.is_empty()).collect();
            pattern.len() == segments.len()
                && pattern.iter().zip(&segments).all(|(expected, actual)| {
                    expected.starts_with(':') || expected == actual
                })
        })
    }
}

impl RouteIntent {
    /// Intent for an arbitrary path. Unknown paths carry no requirements.
    #[must_use]
    pub fn for_path(path: &str) -> Self {
        match AppRoute::resolve(path) {
            Some(route) => route.intent(path),
            None => Self::open(path),
        }
    }
}

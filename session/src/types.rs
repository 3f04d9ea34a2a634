//! Wire-level DTOs for the remote booking API.
//!
//! DESIGN
//! ======
//! Field names on the wire are the backend's (Spanish); the Rust names are
//! English and mapped with `serde(rename)`. Every field the backend may omit
//! in a list serializer carries a default so partial payloads still decode.
//! Draft types are used for both create and partial update: unset fields are
//! skipped on serialization.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::fmt;

use serde::{Deserialize, Serialize};

// =============================================================================
// IDENTITY
// =============================================================================

/// Authorization level attached to an identity.
///
/// Only [`Role::Admin`] is load-bearing for route admission; every other
/// value is treated as a regular user.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[serde(rename = "docente", alias = "instructor")]
    Instructor,
    /// Any role string this client does not know about.
    #[default]
    #[serde(other)]
    Member,
}

impl Role {
    #[must_use]
    pub fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Display label for badges and menus.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Admin => "Administrator",
            Self::Instructor => "Instructor",
            Self::Member => "Member",
        }
    }
}

/// Profile of the authenticated principal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: u64,
    #[serde(default)]
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(rename = "rol", alias = "role", default)]
    pub role: Role,
    #[serde(rename = "telefono", default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "documento", default, skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,
    #[serde(rename = "fecha_creacion", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl Identity {
    /// Full name when known, otherwise the username.
    #[must_use]
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_owned()
        }
    }
}

/// Username/password payload for `POST login/`.
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self { username: username.into(), password: password.into() }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Successful login response: bearer token plus the user it belongs to.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct LoginGrant {
    pub token: String,
    pub user: Identity,
}

// =============================================================================
// ROOMS
// =============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomKind {
    #[default]
    #[serde(rename = "aula")]
    Classroom,
    #[serde(rename = "laboratorio")]
    Laboratory,
    #[serde(rename = "auditorio")]
    Auditorium,
    #[serde(rename = "sala_conferencias")]
    ConferenceRoom,
    #[serde(other)]
    Other,
}

impl RoomKind {
    pub const ALL: [Self; 4] = [Self::Classroom, Self::Laboratory, Self::Auditorium, Self::ConferenceRoom];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Classroom => "Classroom",
            Self::Laboratory => "Laboratory",
            Self::Auditorium => "Auditorium",
            Self::ConferenceRoom => "Conference room",
            Self::Other => "Other",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomStatus {
    #[default]
    #[serde(rename = "disponible")]
    Available,
    #[serde(rename = "ocupado")]
    Occupied,
    #[serde(rename = "mantenimiento")]
    Maintenance,
    #[serde(other)]
    Unknown,
}

impl RoomStatus {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Occupied => "Occupied",
            Self::Maintenance => "Maintenance",
            Self::Unknown => "Unknown",
        }
    }
}

/// A bookable room.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: u64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "codigo", default)]
    pub code: String,
    #[serde(rename = "tipo", default)]
    pub kind: RoomKind,
    #[serde(rename = "bloque", default)]
    pub block: String,
    #[serde(rename = "piso", default)]
    pub floor: String,
    #[serde(rename = "capacidad", default)]
    pub capacity: u32,
    #[serde(rename = "descripcion", default)]
    pub description: String,
    #[serde(rename = "tiene_proyector", default)]
    pub has_projector: bool,
    #[serde(rename = "tiene_computadores", default)]
    pub has_computers: bool,
    #[serde(rename = "tiene_aire_acondicionado", default)]
    pub has_air_conditioning: bool,
    #[serde(rename = "tiene_smart_tv", default)]
    pub has_smart_tv: bool,
    #[serde(rename = "tiene_audio", default)]
    pub has_audio: bool,
    #[serde(rename = "tiene_wifi", default)]
    pub has_wifi: bool,
    #[serde(rename = "estado", default)]
    pub status: RoomStatus,
    #[serde(rename = "imagen_url", default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Create/update payload for a room.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RoomDraft {
    #[serde(rename = "nombre", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "codigo", skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(rename = "tipo", skip_serializing_if = "Option::is_none")]
    pub kind: Option<RoomKind>,
    #[serde(rename = "bloque", skip_serializing_if = "Option::is_none")]
    pub block: Option<String>,
    #[serde(rename = "piso", skip_serializing_if = "Option::is_none")]
    pub floor: Option<String>,
    #[serde(rename = "capacidad", skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    #[serde(rename = "descripcion", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "estado", skip_serializing_if = "Option::is_none")]
    pub status: Option<RoomStatus>,
}

/// Date and time window for the available-rooms search.
///
/// Values are passed through verbatim (`YYYY-MM-DD`, `HH:MM`); the API
/// validates them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AvailabilityWindow {
    pub date: String,
    pub start: String,
    pub end: String,
}

impl AvailabilityWindow {
    /// Query pairs understood by `salones/disponibles/`.
    #[must_use]
    pub fn query(&self) -> Vec<(String, String)> {
        vec![
            ("fecha".to_owned(), self.date.clone()),
            ("hora_inicio".to_owned(), self.start.clone()),
            ("hora_fin".to_owned(), self.end.clone()),
        ]
    }
}

// =============================================================================
// RESERVATIONS
// =============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReservationStatus {
    #[default]
    #[serde(rename = "pendiente")]
    Pending,
    #[serde(rename = "confirmada")]
    Confirmed,
    #[serde(rename = "cancelada")]
    Cancelled,
    #[serde(rename = "completada")]
    Completed,
    #[serde(other)]
    Unknown,
}

impl ReservationStatus {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Confirmed => "Confirmed",
            Self::Cancelled => "Cancelled",
            Self::Completed => "Completed",
            Self::Unknown => "Unknown",
        }
    }

    /// Whether the reservation can still be cancelled by its owner.
    #[must_use]
    pub fn is_open(self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed)
    }
}

/// A room reservation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: u64,
    #[serde(rename = "usuario", default)]
    pub user_id: u64,
    #[serde(rename = "usuario_nombre", default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(rename = "salon")]
    pub room_id: u64,
    #[serde(rename = "salon_detalle", default, skip_serializing_if = "Option::is_none")]
    pub room: Option<Room>,
    #[serde(rename = "fecha")]
    pub date: String,
    #[serde(rename = "hora_inicio")]
    pub start_time: String,
    #[serde(rename = "hora_fin")]
    pub end_time: String,
    #[serde(rename = "motivo", default)]
    pub purpose: String,
    #[serde(rename = "descripcion", default)]
    pub description: String,
    #[serde(rename = "numero_asistentes", default)]
    pub attendees: u32,
    #[serde(rename = "estado", default)]
    pub status: ReservationStatus,
}

/// Create/update payload for a reservation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ReservationDraft {
    #[serde(rename = "salon", skip_serializing_if = "Option::is_none")]
    pub room_id: Option<u64>,
    #[serde(rename = "fecha", skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(rename = "hora_inicio", skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(rename = "hora_fin", skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(rename = "motivo", skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    #[serde(rename = "descripcion", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "numero_asistentes", skip_serializing_if = "Option::is_none")]
    pub attendees: Option<u32>,
}

// =============================================================================
// SUBJECTS & USERS
// =============================================================================

/// A course subject that reservations can be made for.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: u64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "codigo", default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(rename = "semestre", default, skip_serializing_if = "Option::is_none")]
    pub semester: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SubjectDraft {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "codigo", skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(rename = "semestre", skip_serializing_if = "Option::is_none")]
    pub semester: Option<String>,
}

/// Create/update payload for a user account.
#[derive(Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(rename = "rol", skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(rename = "telefono", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "documento", skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,
}

impl fmt::Debug for UserDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserDraft")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("role", &self.role)
            .field("document", &self.document)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish_non_exhaustive()
    }
}

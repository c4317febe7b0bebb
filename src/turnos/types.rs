//! Appointment ("turno") records, lifecycle states, and request payloads

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::duenios::Duenio;

/// Lifecycle state of a turno, serialized the way the backend stores it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TurnoEstado {
    Pendiente,
    Confirmado,
    Completado,
    Cancelado,
}

impl TurnoEstado {
    /// The wire representation, also used in log output.
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnoEstado::Pendiente => "pendiente",
            TurnoEstado::Confirmado => "confirmado",
            TurnoEstado::Completado => "completado",
            TurnoEstado::Cancelado => "cancelado",
        }
    }
}

impl std::fmt::Display for TurnoEstado {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scheduled veterinary visit tied to one dueño.
///
/// `fecha_turno` is kept as the raw ISO-8601 string the backend serves;
/// [`Turno::fecha`] parses it on demand for time arithmetic.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Turno {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub nombre_mascota: String,
    pub fecha_turno: String,
    pub tratamiento: String,
    pub id_duenio: i64,
    pub estado: TurnoEstado,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    /// Owner snapshot embedded by the backend when it joins the tables
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duenio: Option<Duenio>,
}

impl Turno {
    /// Parse `fecha_turno` into a date-time, or `None` when malformed.
    pub fn fecha(&self) -> Option<NaiveDateTime> {
        parse_fecha(&self.fecha_turno)
    }
}

/// Body for `POST /turnos`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateTurnoPayload {
    pub nombre_mascota: String,
    pub fecha_turno: String,
    pub tratamiento: String,
    pub id_duenio: i64,
    /// Defaults to `pendiente` server-side when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estado: Option<TurnoEstado>,
}

/// Body for `PUT /turnos/:id`. All fields optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UpdateTurnoPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nombre_mascota: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fecha_turno: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tratamiento: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_duenio: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estado: Option<TurnoEstado>,
}

/// Body for `PUT /turnos/:id/estado`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpdateEstadoPayload {
    pub estado: TurnoEstado,
}

/// Status tallies over the cached turno list.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct Estadisticas {
    pub total: usize,
    pub pendientes: usize,
    pub confirmados: usize,
    pub completados: usize,
    pub cancelados: usize,
}

/// Parse a backend date-time string.
///
/// The backend serves ISO-8601 with a `T` separator; seconds are optional
/// and older rows may use a space separator instead.
pub(crate) fn parse_fecha(value: &str) -> Option<NaiveDateTime> {
    const FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ];
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

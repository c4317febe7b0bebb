//! Owner ("dueño") records and request payloads

use serde::{Deserialize, Serialize};

/// A pet-owning customer record as served by the backend.
///
/// `id` and the timestamps are assigned server-side, so they are absent on
/// payloads that have not completed a round-trip yet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Duenio {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub nombre_apellido: String,
    pub telefono: String,
    pub email: String,
    pub direccion: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Body for `POST /duenios`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateDuenioPayload {
    pub nombre_apellido: String,
    pub telefono: String,
    pub email: String,
    pub direccion: String,
}

/// Body for `PUT /duenios/:id`. All fields optional, the backend applies
/// only the ones present.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UpdateDuenioPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nombre_apellido: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telefono: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direccion: Option<String>,
}

//! HTTP gateway for the veterinaria REST API
//!
//! One method per backend resource/action. Every method performs a single
//! request through [`Fetch`](crate::fetch::Fetch), unwraps the backend's
//! success envelope, and returns the typed resource. Classification of
//! failures lives in [`Error`](crate::error::Error).

use std::collections::HashMap;

use reqwest::Client;
use serde::Deserialize;

use crate::config::{ClientConfig, ClientOptions};
use crate::duenios::{CreateDuenioPayload, Duenio, UpdateDuenioPayload};
use crate::error::Error;
use crate::fetch::{Fetch, FetchBuilder};
use crate::turnos::{
    CreateTurnoPayload, Turno, TurnoEstado, UpdateEstadoPayload, UpdateTurnoPayload,
};

/// Success envelope used by every backend endpoint:
/// `{ "success": true, "message": "...", "data": { ... } }`
#[derive(Deserialize, Debug)]
struct Envelope<T> {
    #[serde(default)]
    #[allow(dead_code)]
    success: bool,
    #[allow(dead_code)]
    message: Option<String>,
    data: Option<T>,
}

impl<T> Envelope<T> {
    fn into_data(self) -> Result<T, Error> {
        self.data
            .ok_or_else(|| Error::UnexpectedResponse("response body missing data".to_string()))
    }
}

#[derive(Deserialize, Debug)]
struct DueniosData {
    duenios: Vec<Duenio>,
}

#[derive(Deserialize, Debug)]
struct DuenioData {
    duenio: Duenio,
}

#[derive(Deserialize, Debug)]
struct TurnosData {
    turnos: Vec<Turno>,
}

#[derive(Deserialize, Debug)]
struct TurnoData {
    turno: Turno,
}

/// Optional pagination for list endpoints.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageParams {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl PageParams {
    fn apply(&self, params: &mut HashMap<String, String>) {
        if let Some(limit) = self.limit {
            params.insert("limit".to_string(), limit.to_string());
        }
        if let Some(offset) = self.offset {
            params.insert("offset".to_string(), offset.to_string());
        }
    }
}

/// Optional server-side filters for `GET /turnos`.
#[derive(Debug, Clone, Default)]
pub struct TurnoListFilter {
    pub page: PageParams,
    pub estado: Option<TurnoEstado>,
    /// Inclusive lower bound, `YYYY-MM-DD`
    pub fecha_desde: Option<String>,
    /// Inclusive upper bound, `YYYY-MM-DD`
    pub fecha_hasta: Option<String>,
}

impl TurnoListFilter {
    fn into_params(self) -> HashMap<String, String> {
        let mut params = HashMap::new();
        self.page.apply(&mut params);
        if let Some(estado) = self.estado {
            params.insert("estado".to_string(), estado.as_str().to_string());
        }
        if let Some(desde) = self.fecha_desde {
            params.insert("fecha_desde".to_string(), desde);
        }
        if let Some(hasta) = self.fecha_hasta {
            params.insert("fecha_hasta".to_string(), hasta);
        }
        params
    }
}

/// Gateway to the veterinaria REST API.
///
/// Cheap to clone: the underlying `reqwest::Client` shares its connection
/// pool across clones.
#[derive(Debug, Clone)]
pub struct VetApi {
    base_url: String,
    http_client: Client,
    options: ClientOptions,
    user_agent: String,
}

impl VetApi {
    /// Create a new gateway over an existing HTTP client.
    pub fn new(config: &ClientConfig, options: ClientOptions, http_client: Client) -> Self {
        Self {
            base_url: config.base_url.as_str().trim_end_matches('/').to_string(),
            http_client,
            options,
            user_agent: config.user_agent(),
        }
    }

    /// The base URL requests are issued against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn prepare<'a>(&self, builder: FetchBuilder<'a>) -> FetchBuilder<'a> {
        builder
            .header("User-Agent", &self.user_agent)
            .timeout(self.options.request_timeout)
    }

    // --- Dueños ---

    /// `GET /duenios`
    pub async fn list_duenios(&self, page: PageParams) -> Result<Vec<Duenio>, Error> {
        let mut params = HashMap::new();
        page.apply(&mut params);
        let envelope: Envelope<DueniosData> = self
            .prepare(Fetch::get(&self.http_client, &self.endpoint("duenios")))
            .query(params)
            .execute()
            .await?;
        Ok(envelope.into_data()?.duenios)
    }

    /// `GET /duenios/:id`
    pub async fn get_duenio(&self, id: i64) -> Result<Duenio, Error> {
        let envelope: Envelope<DuenioData> = self
            .prepare(Fetch::get(
                &self.http_client,
                &self.endpoint(&format!("duenios/{id}")),
            ))
            .execute()
            .await?;
        Ok(envelope.into_data()?.duenio)
    }

    /// `POST /duenios`
    pub async fn create_duenio(&self, payload: &CreateDuenioPayload) -> Result<Duenio, Error> {
        let envelope: Envelope<DuenioData> = self
            .prepare(Fetch::post(&self.http_client, &self.endpoint("duenios")))
            .json(payload)?
            .execute()
            .await?;
        Ok(envelope.into_data()?.duenio)
    }

    /// `PUT /duenios/:id`
    pub async fn update_duenio(
        &self,
        id: i64,
        payload: &UpdateDuenioPayload,
    ) -> Result<Duenio, Error> {
        let envelope: Envelope<DuenioData> = self
            .prepare(Fetch::put(
                &self.http_client,
                &self.endpoint(&format!("duenios/{id}")),
            ))
            .json(payload)?
            .execute()
            .await?;
        Ok(envelope.into_data()?.duenio)
    }

    /// `DELETE /duenios/:id`
    pub async fn delete_duenio(&self, id: i64) -> Result<(), Error> {
        let _: Envelope<serde_json::Value> = self
            .prepare(Fetch::delete(
                &self.http_client,
                &self.endpoint(&format!("duenios/{id}")),
            ))
            .execute()
            .await?;
        Ok(())
    }

    /// `GET /duenios/search?q=`
    pub async fn search_duenios(&self, query: &str) -> Result<Vec<Duenio>, Error> {
        let mut params = HashMap::new();
        params.insert("q".to_string(), query.to_string());
        let envelope: Envelope<DueniosData> = self
            .prepare(Fetch::get(
                &self.http_client,
                &self.endpoint("duenios/search"),
            ))
            .query(params)
            .execute()
            .await?;
        Ok(envelope.into_data()?.duenios)
    }

    // --- Turnos ---

    /// `GET /turnos`
    pub async fn list_turnos(&self, filter: TurnoListFilter) -> Result<Vec<Turno>, Error> {
        let envelope: Envelope<TurnosData> = self
            .prepare(Fetch::get(&self.http_client, &self.endpoint("turnos")))
            .query(filter.into_params())
            .execute()
            .await?;
        Ok(envelope.into_data()?.turnos)
    }

    /// `GET /turnos/:id`
    pub async fn get_turno(&self, id: i64) -> Result<Turno, Error> {
        let envelope: Envelope<TurnoData> = self
            .prepare(Fetch::get(
                &self.http_client,
                &self.endpoint(&format!("turnos/{id}")),
            ))
            .execute()
            .await?;
        Ok(envelope.into_data()?.turno)
    }

    /// `POST /turnos`
    pub async fn create_turno(&self, payload: &CreateTurnoPayload) -> Result<Turno, Error> {
        let envelope: Envelope<TurnoData> = self
            .prepare(Fetch::post(&self.http_client, &self.endpoint("turnos")))
            .json(payload)?
            .execute()
            .await?;
        Ok(envelope.into_data()?.turno)
    }

    /// `PUT /turnos/:id`
    pub async fn update_turno(
        &self,
        id: i64,
        payload: &UpdateTurnoPayload,
    ) -> Result<Turno, Error> {
        let envelope: Envelope<TurnoData> = self
            .prepare(Fetch::put(
                &self.http_client,
                &self.endpoint(&format!("turnos/{id}")),
            ))
            .json(payload)?
            .execute()
            .await?;
        Ok(envelope.into_data()?.turno)
    }

    /// `DELETE /turnos/:id`
    pub async fn delete_turno(&self, id: i64) -> Result<(), Error> {
        let _: Envelope<serde_json::Value> = self
            .prepare(Fetch::delete(
                &self.http_client,
                &self.endpoint(&format!("turnos/{id}")),
            ))
            .execute()
            .await?;
        Ok(())
    }

    /// `GET /turnos/duenio/:id`
    pub async fn turnos_by_duenio(&self, id_duenio: i64) -> Result<Vec<Turno>, Error> {
        let envelope: Envelope<TurnosData> = self
            .prepare(Fetch::get(
                &self.http_client,
                &self.endpoint(&format!("turnos/duenio/{id_duenio}")),
            ))
            .execute()
            .await?;
        Ok(envelope.into_data()?.turnos)
    }

    /// `GET /turnos/fecha/:fecha` where `fecha` is `YYYY-MM-DD`
    pub async fn turnos_by_fecha(&self, fecha: &str) -> Result<Vec<Turno>, Error> {
        let envelope: Envelope<TurnosData> = self
            .prepare(Fetch::get(
                &self.http_client,
                &self.endpoint(&format!("turnos/fecha/{fecha}")),
            ))
            .execute()
            .await?;
        Ok(envelope.into_data()?.turnos)
    }

    /// `PUT /turnos/:id/estado`
    pub async fn update_turno_estado(
        &self,
        id: i64,
        estado: TurnoEstado,
    ) -> Result<Turno, Error> {
        let envelope: Envelope<TurnoData> = self
            .prepare(Fetch::put(
                &self.http_client,
                &self.endpoint(&format!("turnos/{id}/estado")),
            ))
            .json(&UpdateEstadoPayload { estado })?
            .execute()
            .await?;
        Ok(envelope.into_data()?.turno)
    }
}

//! Client-side store for turno records
//!
//! On top of the CRUD cycle this store computes derived views over the
//! cached list: status partitions, today's agenda, the upcoming week, and
//! an advisory schedule-conflict check. Derivations are pure functions
//! recomputed on every call; nothing is memoized.

mod types;

pub use types::{
    CreateTurnoPayload, Estadisticas, Turno, TurnoEstado, UpdateEstadoPayload, UpdateTurnoPayload,
};

use chrono::{Duration, Utc};
use log::{debug, error};

use crate::api::{TurnoListFilter, VetApi};
use types::parse_fecha;

/// Minimum spacing between two non-cancelled turnos before they are
/// flagged as a conflict.
const CONFLICT_MARGIN_MINUTES: i64 = 30;

/// In-memory cache of turno records plus error/loading state.
///
/// Single-caller model, same as [`DuenioStore`](crate::duenios::DuenioStore):
/// no locking, no cancellation, last applied response wins.
#[derive(Debug, Clone)]
pub struct TurnoStore {
    api: VetApi,
    turnos: Vec<Turno>,
    current: Option<Turno>,
    turnos_by_duenio: Vec<Turno>,
    turnos_by_fecha: Vec<Turno>,
    loading: bool,
    error: Option<String>,
}

impl TurnoStore {
    pub fn new(api: VetApi) -> Self {
        Self {
            api,
            turnos: Vec::new(),
            current: None,
            turnos_by_duenio: Vec::new(),
            turnos_by_fecha: Vec::new(),
            loading: false,
            error: None,
        }
    }

    // --- State accessors ---

    /// The cached turno list, as of the last successful round-trip.
    pub fn turnos(&self) -> &[Turno] {
        &self.turnos
    }

    /// The turno selected by the last `fetch_one`/`create`.
    pub fn current(&self) -> Option<&Turno> {
        self.current.as_ref()
    }

    /// Results of the last `fetch_by_duenio`.
    pub fn turnos_by_duenio(&self) -> &[Turno] {
        &self.turnos_by_duenio
    }

    /// Results of the last `fetch_by_fecha`.
    pub fn turnos_by_fecha(&self) -> &[Turno] {
        &self.turnos_by_fecha
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn total(&self) -> usize {
        self.turnos.len()
    }

    // --- Derived views ---

    pub fn pendientes(&self) -> Vec<&Turno> {
        self.filter_by_estado(TurnoEstado::Pendiente)
    }

    pub fn confirmados(&self) -> Vec<&Turno> {
        self.filter_by_estado(TurnoEstado::Confirmado)
    }

    pub fn completados(&self) -> Vec<&Turno> {
        self.filter_by_estado(TurnoEstado::Completado)
    }

    pub fn cancelados(&self) -> Vec<&Turno> {
        self.filter_by_estado(TurnoEstado::Cancelado)
    }

    /// Status tallies over the cached list.
    pub fn estadisticas(&self) -> Estadisticas {
        let mut stats = Estadisticas {
            total: self.turnos.len(),
            ..Default::default()
        };
        for turno in &self.turnos {
            match turno.estado {
                TurnoEstado::Pendiente => stats.pendientes += 1,
                TurnoEstado::Confirmado => stats.confirmados += 1,
                TurnoEstado::Completado => stats.completados += 1,
                TurnoEstado::Cancelado => stats.cancelados += 1,
            }
        }
        stats
    }

    /// Turnos whose date prefix equals today's date, sorted ascending by
    /// the raw `fecha_turno` string.
    pub fn turnos_hoy(&self) -> Vec<&Turno> {
        let today = Utc::now().format("%Y-%m-%d").to_string();
        let mut hoy: Vec<&Turno> = self
            .turnos
            .iter()
            .filter(|t| t.fecha_turno.starts_with(&today))
            .collect();
        hoy.sort_by(|a, b| a.fecha_turno.cmp(&b.fecha_turno));
        hoy
    }

    /// Non-cancelled turnos within the next 7 days, both bounds inclusive,
    /// sorted ascending.
    pub fn proximos_turnos(&self) -> Vec<&Turno> {
        let now = Utc::now().naive_utc();
        let limit = now + Duration::days(7);
        let mut proximos: Vec<&Turno> = self
            .turnos
            .iter()
            .filter(|t| {
                if t.estado == TurnoEstado::Cancelado {
                    return false;
                }
                match t.fecha() {
                    Some(fecha) => fecha >= now && fecha <= limit,
                    None => false,
                }
            })
            .collect();
        proximos.sort_by(|a, b| a.fecha_turno.cmp(&b.fecha_turno));
        proximos
    }

    /// Advisory schedule-conflict check: every non-cancelled turno whose
    /// date-time lies strictly within 30 minutes of `fecha`.
    ///
    /// `exclude_id` skips the turno being rescheduled. The check is a
    /// linear scan over the cached list and is not enforced against
    /// concurrent writes from other clients.
    pub fn check_conflicts(&self, fecha: &str, exclude_id: Option<i64>) -> Vec<&Turno> {
        let Some(target) = parse_fecha(fecha) else {
            return Vec::new();
        };
        self.turnos
            .iter()
            .filter(|t| {
                if exclude_id.is_some() && t.id == exclude_id {
                    return false;
                }
                if t.estado == TurnoEstado::Cancelado {
                    return false;
                }
                match t.fecha() {
                    Some(fecha_turno) => {
                        let diff = (target - fecha_turno).num_minutes().abs();
                        diff < CONFLICT_MARGIN_MINUTES
                    }
                    None => false,
                }
            })
            .collect()
    }

    /// Turnos in the cached list with the given estado.
    pub fn filter_by_estado(&self, estado: TurnoEstado) -> Vec<&Turno> {
        self.turnos.iter().filter(|t| t.estado == estado).collect()
    }

    /// Turnos whose date prefix falls inside `[start, end]`, both
    /// `YYYY-MM-DD` inclusive.
    pub fn filter_by_date_range(&self, start: &str, end: &str) -> Vec<&Turno> {
        self.turnos
            .iter()
            .filter(|t| {
                let fecha = t.fecha_turno.split('T').next().unwrap_or(&t.fecha_turno);
                fecha >= start && fecha <= end
            })
            .collect()
    }

    /// Case-insensitive text search over pet name, treatment, and the
    /// embedded dueño's name and phone. A blank query returns everything.
    pub fn search_turnos(&self, query: &str) -> Vec<&Turno> {
        let term = query.trim().to_lowercase();
        if term.is_empty() {
            return self.turnos.iter().collect();
        }
        self.turnos
            .iter()
            .filter(|t| {
                t.nombre_mascota.to_lowercase().contains(&term)
                    || t.tratamiento.to_lowercase().contains(&term)
                    || t.duenio.as_ref().map_or(false, |d| {
                        d.nombre_apellido.to_lowercase().contains(&term)
                            || d.telefono.contains(&term)
                    })
            })
            .collect()
    }

    /// Find a turno in the cached list by id.
    pub fn find_by_id(&self, id: i64) -> Option<&Turno> {
        self.turnos.iter().find(|t| t.id == Some(id))
    }

    // --- Actions ---

    /// Fetch every turno and replace the cached list.
    ///
    /// On failure the list is emptied rather than left stale.
    pub async fn fetch_all(&mut self) {
        self.loading = true;
        self.error = None;

        match self.api.list_turnos(TurnoListFilter::default()).await {
            Ok(turnos) => {
                debug!("loaded {} turnos", turnos.len());
                self.turnos = turnos;
            }
            Err(err) => {
                error!("failed to fetch turnos: {err}");
                self.error = Some(err.to_string());
                self.turnos.clear();
            }
        }

        self.loading = false;
    }

    /// Fetch one turno by id and make it the current selection.
    pub async fn fetch_one(&mut self, id: i64) -> Option<Turno> {
        self.loading = true;
        self.error = None;

        let result = match self.api.get_turno(id).await {
            Ok(turno) => {
                debug!("loaded turno {id}: {}", turno.nombre_mascota);
                self.current = Some(turno.clone());
                Some(turno)
            }
            Err(err) => {
                error!("failed to fetch turno {id}: {err}");
                self.error = Some(err.to_string());
                self.current = None;
                None
            }
        };

        self.loading = false;
        result
    }

    /// Create a turno, appending the server's record to the cached list.
    ///
    /// A `fecha_turno` in the past is rejected locally: the error state is
    /// set and no request is issued. The authoritative validation still
    /// happens server-side.
    pub async fn create(&mut self, payload: CreateTurnoPayload) -> Option<Turno> {
        self.loading = true;
        self.error = None;

        if let Some(fecha) = parse_fecha(&payload.fecha_turno) {
            if fecha < Utc::now().naive_utc() {
                error!("rejected turno for {}: date is in the past", payload.fecha_turno);
                self.error = Some("Cannot schedule a turno on a past date".to_string());
                self.loading = false;
                return None;
            }
        }

        let result = match self.api.create_turno(&payload).await {
            Ok(turno) => {
                debug!("created turno: {}", turno.nombre_mascota);
                self.turnos.push(turno.clone());
                self.current = Some(turno.clone());
                Some(turno)
            }
            Err(err) => {
                error!("failed to create turno: {err}");
                self.error = Some(err.to_string());
                None
            }
        };

        self.loading = false;
        result
    }

    /// Update a turno, replacing the cached list entry wholesale.
    pub async fn update(&mut self, id: i64, payload: UpdateTurnoPayload) -> Option<Turno> {
        self.loading = true;
        self.error = None;

        let result = match self.api.update_turno(id, &payload).await {
            Ok(turno) => {
                debug!("updated turno {id}");
                self.replace_cached(id, &turno);
                Some(turno)
            }
            Err(err) => {
                error!("failed to update turno {id}: {err}");
                self.error = Some(err.to_string());
                None
            }
        };

        self.loading = false;
        result
    }

    /// Delete a turno and drop it from the cached list.
    pub async fn remove(&mut self, id: i64) -> bool {
        self.loading = true;
        self.error = None;

        let result = match self.api.delete_turno(id).await {
            Ok(()) => {
                debug!("deleted turno {id}");
                self.turnos.retain(|t| t.id != Some(id));
                if self.current.as_ref().and_then(|t| t.id) == Some(id) {
                    self.current = None;
                }
                true
            }
            Err(err) => {
                error!("failed to delete turno {id}: {err}");
                self.error = Some(err.to_string());
                false
            }
        };

        self.loading = false;
        result
    }

    /// Fetch the turnos of one dueño into the by-duenio view.
    pub async fn fetch_by_duenio(&mut self, id_duenio: i64) {
        self.loading = true;
        self.error = None;

        match self.api.turnos_by_duenio(id_duenio).await {
            Ok(turnos) => {
                debug!("loaded {} turnos for duenio {id_duenio}", turnos.len());
                self.turnos_by_duenio = turnos;
            }
            Err(err) => {
                error!("failed to fetch turnos for duenio {id_duenio}: {err}");
                self.error = Some(err.to_string());
                self.turnos_by_duenio.clear();
            }
        }

        self.loading = false;
    }

    /// Fetch the turnos of one calendar date into the by-fecha view.
    pub async fn fetch_by_fecha(&mut self, fecha: &str) {
        self.loading = true;
        self.error = None;

        match self.api.turnos_by_fecha(fecha).await {
            Ok(turnos) => {
                debug!("loaded {} turnos for {fecha}", turnos.len());
                self.turnos_by_fecha = turnos;
            }
            Err(err) => {
                error!("failed to fetch turnos for {fecha}: {err}");
                self.error = Some(err.to_string());
                self.turnos_by_fecha.clear();
            }
        }

        self.loading = false;
    }

    /// Transition a turno's estado, replacing the cached entry wholesale.
    pub async fn update_estado(&mut self, id: i64, estado: TurnoEstado) -> Option<Turno> {
        self.loading = true;
        self.error = None;

        let result = match self.api.update_turno_estado(id, estado).await {
            Ok(turno) => {
                debug!("turno {id} moved to estado {estado}");
                self.replace_cached(id, &turno);
                Some(turno)
            }
            Err(err) => {
                error!("failed to change estado of turno {id}: {err}");
                self.error = Some(err.to_string());
                None
            }
        };

        self.loading = false;
        result
    }

    pub fn clear_filters(&mut self) {
        self.turnos_by_duenio.clear();
        self.turnos_by_fecha.clear();
        self.error = None;
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn clear_current(&mut self) {
        self.current = None;
    }

    fn replace_cached(&mut self, id: i64, turno: &Turno) {
        if let Some(entry) = self.turnos.iter_mut().find(|t| t.id == Some(id)) {
            *entry = turno.clone();
        }
        if self.current.as_ref().and_then(|t| t.id) == Some(id) {
            self.current = Some(turno.clone());
        }
    }
}

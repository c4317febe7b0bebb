//! Client-side store for dueño records
//!
//! Mirrors the last known server state in memory. Actions go through the
//! [`VetApi`] gateway; failures never escape an action, they are stored as
//! a user-readable message on the store instead.

mod types;

pub use types::{CreateDuenioPayload, Duenio, UpdateDuenioPayload};

use log::{debug, error};

use crate::api::{PageParams, VetApi};

/// In-memory cache of dueño records plus error/loading state.
///
/// Single-caller model: actions take `&mut self`, there is no locking and
/// no cancellation of in-flight requests. If two actions race, whichever
/// response is applied last wins.
#[derive(Debug, Clone)]
pub struct DuenioStore {
    api: VetApi,
    duenios: Vec<Duenio>,
    current: Option<Duenio>,
    search_results: Vec<Duenio>,
    loading: bool,
    error: Option<String>,
}

impl DuenioStore {
    pub fn new(api: VetApi) -> Self {
        Self {
            api,
            duenios: Vec::new(),
            current: None,
            search_results: Vec::new(),
            loading: false,
            error: None,
        }
    }

    // --- State accessors ---

    /// The cached dueño list, as of the last successful round-trip.
    pub fn duenios(&self) -> &[Duenio] {
        &self.duenios
    }

    /// The dueño selected by the last `fetch_one`/`create`.
    pub fn current(&self) -> Option<&Duenio> {
        self.current.as_ref()
    }

    /// Results of the last remote search.
    pub fn search_results(&self) -> &[Duenio] {
        &self.search_results
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
        self.duenios.len()
    }

    // --- Actions ---

    /// Fetch every dueño and replace the cached list.
    ///
    /// On failure the list is emptied rather than left stale.
    pub async fn fetch_all(&mut self) {
        self.loading = true;
        self.error = None;

        match self.api.list_duenios(PageParams::default()).await {
            Ok(duenios) => {
                debug!("loaded {} duenios", duenios.len());
                self.duenios = duenios;
            }
            Err(err) => {
                error!("failed to fetch duenios: {err}");
                self.error = Some(err.to_string());
                self.duenios.clear();
            }
        }

        self.loading = false;
    }

    /// Fetch one dueño by id and make it the current selection.
    pub async fn fetch_one(&mut self, id: i64) -> Option<Duenio> {
        self.loading = true;
        self.error = None;

        let result = match self.api.get_duenio(id).await {
            Ok(duenio) => {
                debug!("loaded duenio {id}: {}", duenio.nombre_apellido);
                self.current = Some(duenio.clone());
                Some(duenio)
            }
            Err(err) => {
                error!("failed to fetch duenio {id}: {err}");
                self.error = Some(err.to_string());
                self.current = None;
                None
            }
        };

        self.loading = false;
        result
    }

    /// Create a dueño, appending the server's record to the cached list.
    pub async fn create(&mut self, payload: CreateDuenioPayload) -> Option<Duenio> {
        self.loading = true;
        self.error = None;

        let result = match self.api.create_duenio(&payload).await {
            Ok(duenio) => {
                debug!("created duenio: {}", duenio.nombre_apellido);
                self.duenios.push(duenio.clone());
                self.current = Some(duenio.clone());
                Some(duenio)
            }
            Err(err) => {
                error!("failed to create duenio: {err}");
                self.error = Some(err.to_string());
                None
            }
        };

        self.loading = false;
        result
    }

    /// Update a dueño, replacing the cached list entry wholesale.
    pub async fn update(&mut self, id: i64, payload: UpdateDuenioPayload) -> Option<Duenio> {
        self.loading = true;
        self.error = None;

        let result = match self.api.update_duenio(id, &payload).await {
            Ok(duenio) => {
                debug!("updated duenio {id}");
                if let Some(entry) = self.duenios.iter_mut().find(|d| d.id == Some(id)) {
                    *entry = duenio.clone();
                }
                if self.current.as_ref().and_then(|d| d.id) == Some(id) {
                    self.current = Some(duenio.clone());
                }
                Some(duenio)
            }
            Err(err) => {
                error!("failed to update duenio {id}: {err}");
                self.error = Some(err.to_string());
                None
            }
        };

        self.loading = false;
        result
    }

    /// Delete a dueño and drop it from the cached list.
    pub async fn remove(&mut self, id: i64) -> bool {
        self.loading = true;
        self.error = None;

        let result = match self.api.delete_duenio(id).await {
            Ok(()) => {
                debug!("deleted duenio {id}");
                self.duenios.retain(|d| d.id != Some(id));
                if self.current.as_ref().and_then(|d| d.id) == Some(id) {
                    self.current = None;
                }
                true
            }
            Err(err) => {
                error!("failed to delete duenio {id}: {err}");
                self.error = Some(err.to_string());
                false
            }
        };

        self.loading = false;
        result
    }

    /// Remote search by name or email. A blank query clears the previous
    /// results without issuing a request.
    pub async fn search(&mut self, query: &str) {
        self.loading = true;
        self.error = None;

        if query.trim().is_empty() {
            self.search_results.clear();
            self.loading = false;
            return;
        }

        match self.api.search_duenios(query).await {
            Ok(duenios) => {
                debug!("search '{query}' returned {} results", duenios.len());
                self.search_results = duenios;
            }
            Err(err) => {
                error!("search '{query}' failed: {err}");
                self.error = Some(err.to_string());
                self.search_results.clear();
            }
        }

        self.loading = false;
    }

    // --- Local helpers, no HTTP involved ---

    /// Find a dueño in the cached list by id.
    pub fn find_by_id(&self, id: i64) -> Option<&Duenio> {
        self.duenios.iter().find(|d| d.id == Some(id))
    }

    /// Case-insensitive substring filter over name, email, and phone.
    /// A blank query returns the full cached list.
    pub fn filter_local(&self, query: &str) -> Vec<&Duenio> {
        let term = query.trim().to_lowercase();
        if term.is_empty() {
            return self.duenios.iter().collect();
        }
        self.duenios
            .iter()
            .filter(|d| {
                d.nombre_apellido.to_lowercase().contains(&term)
                    || d.email.to_lowercase().contains(&term)
                    || d.telefono.contains(&term)
            })
            .collect()
    }

    pub fn clear_search(&mut self) {
        self.search_results.clear();
        self.error = None;
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn clear_current(&mut self) {
        self.current = None;
    }
}

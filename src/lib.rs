//! Rust client for the veterinaria turnos API
//!
//! A typed client library for the veterinary appointment-management REST
//! backend. It exposes a thin HTTP gateway ([`api::VetApi`]) plus two
//! stateful stores that cache the last known server state and compute
//! derived views over it:
//!
//! - [`duenios::DuenioStore`]: pet-owner records with remote and local search
//! - [`turnos::TurnoStore`]: appointments with status partitions, today's
//!   agenda, the upcoming week, and advisory schedule-conflict detection
//!
//! # Example
//!
//! ```no_run
//! use turnos_rust::VetClient;
//!
//! # async fn run() -> Result<(), turnos_rust::Error> {
//! let client = VetClient::new("http://localhost:5000/api")?;
//! let mut turnos = client.turnos();
//! turnos.fetch_all().await;
//! for turno in turnos.turnos_hoy() {
//!     println!("{} {}", turno.fecha_turno, turno.nombre_mascota);
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod duenios;
pub mod error;
pub mod fetch;
pub mod turnos;

use reqwest::Client;

use crate::api::VetApi;
use crate::config::{ClientConfig, ClientOptions};
use crate::duenios::DuenioStore;
use crate::turnos::TurnoStore;

pub use crate::error::Error;

/// The main entry point for the veterinaria client.
///
/// Owns the shared HTTP client and the configuration; stores and gateways
/// created from it reuse the same connection pool.
#[derive(Debug, Clone)]
pub struct VetClient {
    config: ClientConfig,
    options: ClientOptions,
    http_client: Client,
}

impl VetClient {
    /// Create a new client against the given API base URL.
    ///
    /// # Example
    ///
    /// ```
    /// use turnos_rust::VetClient;
    ///
    /// let client = VetClient::new("http://localhost:5000/api").unwrap();
    /// ```
    pub fn new(base_url: &str) -> Result<Self, Error> {
        Self::new_with_options(ClientConfig::new(base_url)?, ClientOptions::default())
    }

    /// Create a new client with explicit configuration and options.
    pub fn new_with_options(config: ClientConfig, options: ClientOptions) -> Result<Self, Error> {
        Ok(Self {
            config,
            options,
            http_client: Client::new(),
        })
    }

    /// Create a client from `VETERINARIA_API_URL` and related environment
    /// variables. See [`ClientConfig::from_env`].
    pub fn from_env() -> Result<Self, Error> {
        Self::new_with_options(ClientConfig::from_env()?, ClientOptions::default())
    }

    /// The client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Create a gateway for direct, stateless API access.
    pub fn api(&self) -> VetApi {
        VetApi::new(&self.config, self.options.clone(), self.http_client.clone())
    }

    /// Create a dueño store backed by this client.
    pub fn duenios(&self) -> DuenioStore {
        DuenioStore::new(self.api())
    }

    /// Create a turno store backed by this client.
    pub fn turnos(&self) -> TurnoStore {
        TurnoStore::new(self.api())
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::api::VetApi;
    pub use crate::config::{ClientConfig, ClientOptions};
    pub use crate::duenios::{CreateDuenioPayload, Duenio, DuenioStore, UpdateDuenioPayload};
    pub use crate::error::Error;
    pub use crate::turnos::{
        CreateTurnoPayload, Turno, TurnoEstado, TurnoStore, UpdateTurnoPayload,
    };
    pub use crate::VetClient;
}

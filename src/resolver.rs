use reqwest::blocking::Client;
use std::time::Duration;

use crate::api::{nominatim, osrm};
use crate::config::ServiceConfig;
use crate::domain::{OsmKind, Place, Route, TravelMode};
use crate::error::{ResolutionError, RoutingError};

/// Resolves places through Nominatim and routes between them through OSRM.
///
/// Each call makes exactly one blocking request; there are no retries and no
/// caching. The resolver holds no mutable state, so one instance can be
/// shared between threads.
#[derive(Debug, Clone)]
pub struct PlaceResolver {
    client: Client,
    config: ServiceConfig,
}

impl PlaceResolver {
    /// Resolver against the public Nominatim and OSRM servers
    pub fn new() -> reqwest::Result<Self> {
        Self::with_config(ServiceConfig::default())
    }

    pub fn with_config(config: ServiceConfig) -> reqwest::Result<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Resolve `name` within `country` to the first candidate of `kind`.
    ///
    /// # Errors
    /// * [`ResolutionError::Status`] - Nominatim answered with a non-success status
    /// * [`ResolutionError::NoMatch`] - no candidate (possibly none at all) has the requested kind
    pub fn resolve(
        &self,
        name: &str,
        country: &str,
        kind: OsmKind,
    ) -> Result<Place, ResolutionError> {
        let query = nominatim::build_query(name, country);
        let response = nominatim::search(&self.client, &self.config.nominatim_url, &query)?;
        nominatim::select_place(response, kind, &query)
    }

    /// Compute a route from `origin` to `destination`.
    ///
    /// The returned path is in (lat, lon) order.
    pub fn route_between(
        &self,
        origin: &Place,
        destination: &Place,
        mode: TravelMode,
    ) -> Result<Route, RoutingError> {
        osrm::fetch_route(
            &self.client,
            &self.config.osrm_url,
            mode,
            origin.coordinates(),
            destination.coordinates(),
        )
    }
}

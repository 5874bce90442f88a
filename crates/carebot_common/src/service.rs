//! Health service - binds configuration to a ready router.
//!
//! Built once at startup by the daemon and by the CLI's local mode.

use crate::config::{Config, Provider};
use crate::generator::HttpGenerator;
use crate::knowledge::KnowledgePack;
use crate::router::{Plan, Router};
use crate::types::RoutingDecision;
use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

pub struct HealthService {
    router: Router,
    provider: Provider,
    generator_available: bool,
}

impl HealthService {
    pub fn new(router: Router, provider: Provider, generator_available: bool) -> Self {
        Self {
            router,
            provider,
            generator_available,
        }
    }

    /// Load the knowledge pack and connect the generator named by `config`
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;

        let router = match &config.knowledge.path {
            Some(path) => {
                let pack = KnowledgePack::load(path)
                    .with_context(|| format!("loading knowledge pack {}", path.display()))?;
                Router::from_pack(pack)
            }
            None => Router::builtin(),
        };

        let generator = &config.generator;
        if !generator.is_available() {
            info!("No generator configured for {}, running in fallback mode", generator.provider);
            return Ok(Self::new(router, generator.provider, false));
        }

        let client = HttpGenerator::new(generator).context("creating generator client")?;
        info!(
            "Generator enabled: {} ({}), timeout {}s",
            generator.provider,
            client.model(),
            generator.timeout_secs
        );
        let router = router
            .with_generator(Arc::new(client))
            .with_params(generator.params())
            .with_timeout(Duration::from_secs(generator.timeout_secs));

        Ok(Self::new(router, generator.provider, true))
    }

    pub fn generator_available(&self) -> bool {
        self.generator_available
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    /// "generator" or "fallback"
    pub fn mode(&self) -> &'static str {
        if self.generator_available {
            "generator"
        } else {
            "fallback"
        }
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn topics(&self) -> Vec<&str> {
        self.router.topics()
    }

    /// Deterministic routing only; never calls the generator
    pub fn plan(&self, message: &str) -> Plan {
        self.router.plan(message, self.generator_available)
    }

    pub async fn respond(&self, message: &str) -> RoutingDecision {
        self.router.dispatch(message, self.generator_available).await
    }
}

use anyhow::Context;
use std::env;
use std::time::Duration;

/// Runtime settings for the relay.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port the HTTP front end listens on.
    pub port: u16,
    /// How often the expiry sweeper runs a pass.
    pub sweep_interval: Duration,
    /// Maximum age of an undelivered message. Also the idle cutoff after
    /// which an empty mailbox's peer is evicted.
    pub max_age: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            sweep_interval: Duration::from_secs(10),
            max_age: Duration::from_secs(30),
        }
    }
}

impl ServerConfig {
    /// Reads overrides from the environment (`PORT`), keeping defaults for
    /// everything else.
    pub fn from_env() -> anyhow::Result<Self> {
        let mut config = Self::default();
        if let Ok(port) = env::var("PORT") {
            config.port = port
                .parse()
                .with_context(|| format!("invalid PORT value: {port:?}"))?;
        }
        Ok(config)
    }
}

use std::time::Duration;

use serde::Deserialize;

const PREFIX: &str = "GHPB_";
const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: Option<u16>,
    #[serde(default = "default_pushbullet_url")]
    pub pushbullet_url: String,
    #[serde(default = "default_push_timeout_secs")]
    pub push_timeout_secs: u64,
}

/// Port assigned by the hosting platform.
#[derive(Debug, Deserialize)]
struct Platform {
    port: Option<u16>,
}

fn default_host() -> String {
    "0.0.0.0".into()
}

fn default_pushbullet_url() -> String {
    "https://api.pushbullet.com".into()
}

fn default_push_timeout_secs() -> u64 {
    10
}

impl Config {
    pub fn from_env() -> Result<Self, envy::Error> {
        Self::from_vars(std::env::vars())
    }

    /// `GHPB_*` variables win; `PORT` is only consulted when `GHPB_PORT` is unset.
    pub fn from_vars<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let vars: Vec<(String, String)> = vars.into_iter().collect();
        let mut config: Config = envy::prefixed(PREFIX).from_iter(vars.clone())?;
        if config.port.is_none() {
            config.port = envy::from_iter::<_, Platform>(vars)?.port;
        }
        if config.push_timeout_secs == 0 {
            return Err(envy::Error::Custom(format!(
                "{}PUSH_TIMEOUT_SECS must be at least 1",
                PREFIX
            )));
        }
        Ok(config)
    }

    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    pub fn push_timeout(&self) -> Duration {
        Duration::from_secs(self.push_timeout_secs)
    }
}

use crate::types::ClawPulseConfig;
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default HTTP port for `clawpulse serve`
pub const DEFAULT_PORT: u16 = 3210;

/// Default fleet deadline in milliseconds
pub const DEFAULT_FLEET_TIMEOUT_MS: u64 = 2000;

/// Connection details for the hosted store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteSettings {
    pub url: String,
    pub key: String,
}

/// Effective settings after layering ENV > local > global > default.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub data_root: PathBuf,
    pub port: u16,
    /// `None` disables the fleet deadline
    pub fleet_timeout: Option<Duration>,
    pub remote: Option<RemoteSettings>,
    pub display_names: HashMap<String, String>,
}

impl Settings {
    /// Resolve settings from the process environment and config files.
    pub fn load() -> Result<Self> {
        let local = load_local_config()?;
        let global = load_global_config()?;
        resolve(
            |key| std::env::var(key).ok(),
            local.as_ref(),
            global.as_ref(),
        )
    }
}

/// Layer one source of values over the others: ENV > local > global > default.
pub fn resolve(
    env: impl Fn(&str) -> Option<String>,
    local: Option<&ClawPulseConfig>,
    global: Option<&ClawPulseConfig>,
) -> Result<Settings> {
    let layers: Vec<&ClawPulseConfig> = local.into_iter().chain(global).collect();
    let pick = |get: fn(&ClawPulseConfig) -> Option<String>| layers.iter().find_map(|c| get(c));
    let env = |key: &str| env(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

    let data_root = match env("CLAWPULSE_DATA_ROOT").or_else(|| pick(|c| c.data_root.clone())) {
        Some(path) => expand_home(&path),
        None => default_data_root()?,
    };

    let port = match env("CLAWPULSE_PORT") {
        Some(raw) => raw
            .parse::<u16>()
            .with_context(|| format!("Invalid CLAWPULSE_PORT '{raw}'"))?,
        None => layers
            .iter()
            .find_map(|c| c.port)
            .unwrap_or(DEFAULT_PORT),
    };

    let timeout_ms = match env("CLAWPULSE_FLEET_TIMEOUT_MS") {
        Some(raw) => raw
            .parse::<u64>()
            .with_context(|| format!("Invalid CLAWPULSE_FLEET_TIMEOUT_MS '{raw}'"))?,
        None => layers
            .iter()
            .find_map(|c| c.fleet_timeout_ms)
            .unwrap_or(DEFAULT_FLEET_TIMEOUT_MS),
    };
    let fleet_timeout = (timeout_ms > 0).then(|| Duration::from_millis(timeout_ms));

    let url = env("CLAWPULSE_REMOTE_URL").or_else(|| pick(|c| c.remote_url.clone()));
    let key = env("CLAWPULSE_REMOTE_KEY").or_else(|| pick(|c| c.remote_key.clone()));
    let remote = match url {
        Some(url) => Some(RemoteSettings {
            url,
            key: key.context("Remote store URL is set but no remote key was configured")?,
        }),
        None => None,
    };

    // Global entries first so local ones win
    let mut display_names = HashMap::new();
    for layer in layers.iter().rev() {
        display_names.extend(layer.display_names.clone());
    }

    Ok(Settings {
        data_root,
        port,
        fleet_timeout,
        remote,
        display_names,
    })
}

/// OpenClaw keeps per-agent state under ~/.openclaw/agents
fn default_data_root() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Failed to get home directory")?;
    Ok(home.join(".openclaw").join("agents"))
}

fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Load local config from .clawpulse/config.json
pub fn load_local_config() -> Result<Option<ClawPulseConfig>> {
    let config_path = PathBuf::from(".clawpulse").join("config.json");
    load_config_file(&config_path).context("Failed to load local config")
}

/// Load global config from ~/.config/clawpulse/config.json
pub fn load_global_config() -> Result<Option<ClawPulseConfig>> {
    let config_path = dirs::config_dir()
        .context("Failed to get config directory")?
        .join("clawpulse")
        .join("config.json");
    load_config_file(&config_path).context("Failed to load global config")
}

/// Read one config layer. A missing file is `None`; anything else unreadable is an error.
pub fn load_config_file(path: &Path) -> Result<Option<ClawPulseConfig>> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(err).with_context(|| format!("Failed to read {}", path.display()))
        }
    };
    let config: ClawPulseConfig = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(Some(config))
}

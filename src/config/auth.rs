//! Token lookup, delegated to the GitHub CLI's credential store.
//!
//! Order: environment variables, gh's `hosts.yml`, then `gh auth token`.
//! Nothing is ever prompted for or written.

use crate::config::ConfigError;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, warn};

/// One host entry in gh's `hosts.yml`.
#[derive(Debug, Default, Deserialize)]
struct HostEntry {
    #[serde(default)]
    oauth_token: Option<String>,
}

/// Token from environment variables, looked up through `var`.
/// `GH_TOKEN` wins everywhere; the fallback differs for github.com and
/// enterprise hosts.
pub fn token_from_env<F>(host: &str, var: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    let fallbacks: &[&str] = if host == super::DEFAULT_HOST {
        &["GITHUB_TOKEN"]
    } else {
        &["GH_ENTERPRISE_TOKEN", "GITHUB_ENTERPRISE_TOKEN"]
    };

    std::iter::once("GH_TOKEN")
        .chain(fallbacks.iter().copied())
        .filter_map(|name| var(name))
        .find(|value| !value.trim().is_empty())
}

/// gh's configuration directory: `$GH_CONFIG_DIR`, else `<config dir>/gh`.
pub fn gh_config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("GH_CONFIG_DIR") {
        if !dir.is_empty() {
            return Some(PathBuf::from(dir));
        }
    }
    dirs::config_dir().map(|d| d.join("gh"))
}

/// Token stored for `host` in a gh `hosts.yml` file.
/// A missing file is not an error; a malformed one is.
pub fn token_from_hosts_file(path: &Path, host: &str) -> Result<Option<String>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::HostsFile {
        path: path.to_path_buf(),
        message: source.to_string(),
    })?;

    if content.trim().is_empty() {
        return Ok(None);
    }

    let hosts: HashMap<String, HostEntry> =
        serde_yaml::from_str(&content).map_err(|source| ConfigError::HostsFile {
            path: path.to_path_buf(),
            message: source.to_string(),
        })?;

    Ok(hosts
        .into_iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(host))
        .and_then(|(_, entry)| entry.oauth_token)
        .filter(|t| !t.is_empty()))
}

/// Ask the gh binary itself (covers tokens kept in the system keyring).
pub fn token_from_gh_cli(host: &str) -> Option<String> {
    let output = Command::new("gh")
        .args(["auth", "token", "--hostname", host])
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }
    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!token.is_empty()).then_some(token)
}

/// Resolve a token for `host`, or `None` to go unauthenticated.
pub fn resolve_token(host: &str) -> Option<String> {
    if let Some(token) = token_from_env(host, |name| std::env::var(name).ok()) {
        debug!("Using token from environment");
        return Some(token);
    }

    if let Some(dir) = gh_config_dir() {
        match token_from_hosts_file(&dir.join("hosts.yml"), host) {
            Ok(Some(token)) => {
                debug!("Using token from {}", dir.display());
                return Some(token);
            }
            Ok(None) => {}
            Err(e) => warn!("{}", e),
        }
    }

    let token = token_from_gh_cli(host);
    if token.is_none() {
        debug!("No token found for {}, continuing unauthenticated", host);
    }
    token
}

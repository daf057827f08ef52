//! Repository references: `OWNER/REPO`, `HOST/OWNER/REPO`, or a git remote URL.

use crate::config::ConfigError;
use std::fmt;
use std::process::Command;

pub const DEFAULT_HOST: &str = "github.com";

/// A repository on a GitHub host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub host: String,
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    pub fn new(
        host: impl Into<String>,
        owner: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Parse a `--repo` style argument. `OWNER/REPO` gets `default_host`;
    /// remote URLs are accepted too.
    pub fn parse(input: &str, default_host: &str) -> Result<Self, ConfigError> {
        let input = input.trim();
        if input.contains("://") || input.starts_with("git@") {
            return Self::from_remote_url(input);
        }

        let parts: Vec<&str> = input.split('/').collect();
        let (host, owner, name) = match parts.as_slice() {
            [owner, name] => (default_host, *owner, *name),
            [host, owner, name] => (*host, *owner, *name),
            _ => return Err(ConfigError::InvalidRepo(input.to_string())),
        };
        Self::checked(host, owner, name, input)
    }

    /// Parse a git remote URL:
    /// `https://host/owner/repo(.git)`, `ssh://git@host[:port]/owner/repo(.git)`,
    /// or scp-like `git@host:owner/repo(.git)`.
    pub fn from_remote_url(url: &str) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidRepo(url.to_string());

        let (authority, path) = if let Some((_, rest)) = url.split_once("://") {
            rest.split_once('/').ok_or_else(invalid)?
        } else if let Some((authority, path)) = url.split_once(':') {
            (authority, path)
        } else {
            return Err(invalid());
        };

        // Drop credentials and port
        let host = authority.rsplit('@').next().unwrap_or(authority);
        let host = host.split(':').next().unwrap_or(host);

        let path = path.trim_matches('/');
        let path = path.strip_suffix(".git").unwrap_or(path);
        let (owner, name) = path.split_once('/').ok_or_else(invalid)?;

        Self::checked(host, owner, name, url)
    }

    fn checked(host: &str, owner: &str, name: &str, input: &str) -> Result<Self, ConfigError> {
        let valid = |s: &str| !s.is_empty() && !s.contains('/') && !s.contains(char::is_whitespace);
        if !valid(host) || !valid(owner) || !valid(name) {
            return Err(ConfigError::InvalidRepo(input.to_string()));
        }
        Ok(Self::new(host.to_lowercase(), owner, name))
    }

    pub fn is_github_com(&self) -> bool {
        self.host == DEFAULT_HOST
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// URL of the `origin` remote of the git checkout in the current directory.
pub fn origin_remote_url() -> Result<String, ConfigError> {
    let output = Command::new("git")
        .args(["remote", "get-url", "origin"])
        .output()
        .map_err(ConfigError::Git)?;

    if !output.status.success() {
        return Err(ConfigError::NoRepository);
    }

    let url = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if url.is_empty() {
        return Err(ConfigError::NoRepository);
    }
    Ok(url)
}

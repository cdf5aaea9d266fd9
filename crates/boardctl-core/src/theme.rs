use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use tracing::{debug, instrument, warn};

use crate::api::BoardService;
use crate::store::LocalStore;

/// Two-state theme. Applying one implies removing the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn flipped(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl FromStr for Theme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(anyhow!("unknown theme: {other}")),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Light => write!(f, "light"),
            Self::Dark => write!(f, "dark"),
        }
    }
}

/// Resolves the theme to apply: the locally stored value wins, else the
/// first remote entry flagged active, else none. The remote list is
/// read-only and is never consulted once a local value exists.
#[instrument(skip(store, api))]
pub fn resolve(store: &LocalStore, api: &dyn BoardService) -> anyhow::Result<Option<Theme>> {
    if let Some(theme) = store.theme()? {
        debug!(%theme, "theme resolved from local store");
        return Ok(Some(theme));
    }

    let entries = match api.themes() {
        Ok(entries) => entries,
        Err(err) => {
            warn!(error = %err, "failed to fetch remote theme list");
            return Ok(None);
        }
    };

    let Some(active) = entries.iter().find(|entry| entry.is_active) else {
        debug!("no active remote theme");
        return Ok(None);
    };

    match active.label.to_lowercase().parse::<Theme>() {
        Ok(theme) => {
            debug!(%theme, "theme resolved from remote active entry");
            Ok(Some(theme))
        }
        Err(err) => {
            warn!(label = %active.label, error = %err, "remote active theme has unknown label");
            Ok(None)
        }
    }
}

/// Flips the effective theme and persists the result locally. No remote
/// write ever happens. With nothing resolved the board starts light, so
/// the first toggle lands on dark.
#[instrument(skip(store, api))]
pub fn toggle(store: &LocalStore, api: &dyn BoardService) -> anyhow::Result<Theme> {
    let current = resolve(store, api)?.unwrap_or(Theme::Light);
    let next = current.flipped();
    store.set_theme(next)?;
    Ok(next)
}

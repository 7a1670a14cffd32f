//! Owned theme state with persistence.
//!
//! Explicitly constructed and passed by reference to whatever renders;
//! there is no ambient global. Preference order at init: saved choice,
//! then the host's dark-mode preference, then light.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

const THEME_FILE: &str = "theme.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    fn flipped(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ThemeFile {
    theme: Theme,
}

/// Theme preference for one app instance.
#[derive(Debug)]
pub struct ThemeState {
    current: Theme,
    path: PathBuf,
}

impl ThemeState {
    /// Initialize from the saved preference under `data_dir`, falling back
    /// to the host preference and finally to light.
    pub fn init(data_dir: &Path, system_prefers_dark: bool) -> Self {
        let path = data_dir.join(THEME_FILE);
        let saved = std::fs::read_to_string(&path)
            .ok()
            .and_then(|s| serde_json::from_str::<ThemeFile>(&s).ok())
            .map(|f| f.theme);
        let current = saved.unwrap_or(if system_prefers_dark {
            Theme::Dark
        } else {
            Theme::Light
        });
        Self { current, path }
    }

    pub fn theme(&self) -> Theme {
        self.current
    }

    pub fn is_dark(&self) -> bool {
        self.current == Theme::Dark
    }

    /// Switch themes and persist the choice. A failed save is logged and
    /// the in-memory state still flips.
    pub fn toggle(&mut self) -> Theme {
        self.set(self.current.flipped());
        self.current
    }

    pub fn set(&mut self, theme: Theme) {
        self.current = theme;
        if let Err(err) = self.save() {
            warn!("failed to persist theme preference: {err:#}");
        }
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating theme directory {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(&ThemeFile { theme: self.current })?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("writing {}", self.path.display()))?;
        Ok(())
    }
}

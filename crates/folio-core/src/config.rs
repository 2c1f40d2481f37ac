//! Lightweight configuration loader and path helpers.
//!
//! Uses Figment to merge built-in defaults + `config.toml` + `config.<env>.toml`
//! + `APP_*` env vars (`__` separates nested keys, e.g. `APP_SEARCH__DEBOUNCE_MS`).

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());

        let mut figment = Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(Toml::file("config.toml"));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file("config.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("config.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("config.test.toml")),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));

        let config = Self { figment };
        config.validate_for_env(&env_name)?;
        Ok(config)
    }

    /// Wraps an already-assembled figment. Used by tests and embedders that
    /// do not want file or environment lookups.
    pub fn from_figment(figment: Figment) -> Self {
        Self { figment }
    }

    pub fn get<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| anyhow::anyhow!("Failed to get '{}': {}", key, e))
    }

    pub fn settings(&self) -> anyhow::Result<Settings> {
        let settings: Settings = self
            .figment
            .extract()
            .map_err(|e| anyhow::anyhow!("Failed to extract settings: {}", e))?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate_for_env(&self, env: &str) -> anyhow::Result<()> {
        if matches!(env, "prod" | "production") {
            let debounce: u64 = self.get("search.debounce_ms")?;
            if debounce == 0 {
                anyhow::bail!("search.debounce_ms must be > 0 in production");
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub data: DataSettings,
    pub search: SearchSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSettings {
    /// Published `content.json`.
    pub content_path: String,
    /// Directory holding unpublished drafts.
    pub draft_dir: String,
    /// Where `publish` writes the exported document.
    pub export_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSettings {
    pub debounce_ms: u64,
    pub suggestion_limit: usize,
    pub page_initial: usize,
    pub page_step: usize,
    pub title_word_typos: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data: DataSettings {
                content_path: "data/content.json".to_string(),
                draft_dir: "~/.local/share/folio/drafts".to_string(),
                export_path: "content.json".to_string(),
            },
            search: SearchSettings {
                debounce_ms: 300,
                suggestion_limit: 5,
                page_initial: 9,
                page_step: 6,
                title_word_typos: true,
            },
        }
    }
}

impl Settings {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.search.suggestion_limit == 0 {
            anyhow::bail!("search.suggestion_limit must be at least 1");
        }
        if self.search.page_initial == 0 || self.search.page_step == 0 {
            anyhow::bail!("search.page_initial and search.page_step must be at least 1");
        }
        Ok(())
    }

    pub fn content_path(&self, base: &Path) -> PathBuf {
        resolve_with_base(base, &self.data.content_path)
    }

    pub fn draft_dir(&self, base: &Path) -> PathBuf {
        resolve_with_base(base, &self.data.draft_dir)
    }

    pub fn export_path(&self, base: &Path) -> PathBuf {
        resolve_with_base(base, &self.data.export_path)
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
/// If `p` is absolute, it's returned as-is; otherwise `base.join(p)` is returned.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}

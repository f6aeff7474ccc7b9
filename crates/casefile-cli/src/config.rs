//! CLI configuration and case loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use casefile_core::parser::load_case_directory;
use casefile_core::CaseBook;

/// Top-level casefile configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CasefileConfig {
    /// Directory of extra case files, loaded alongside the built-in cases.
    #[serde(default)]
    pub case_dir: Option<PathBuf>,
    /// Case used when a command is given no `--case`.
    #[serde(default = "default_case")]
    pub default_case: String,
}

fn default_case() -> String {
    "1".to_string()
}

impl Default for CasefileConfig {
    fn default() -> Self {
        Self {
            case_dir: None,
            default_case: default_case(),
        }
    }
}

impl CasefileConfig {
    /// Built-in cases plus everything under `case_dir`.
    pub fn case_book(&self) -> Result<CaseBook> {
        let mut book = CaseBook::with_builtin()?;

        if let Some(dir) = &self.case_dir {
            for case in load_case_directory(dir)? {
                let id = case.id.clone();
                book.insert(case)
                    .with_context(|| format!("cannot load case {id} from {}", dir.display()))?;
            }
        }

        tracing::debug!(cases = book.len(), "case book loaded");
        Ok(book)
    }

    /// The explicit case id, or the configured default.
    pub fn case_id(&self, explicit: Option<String>) -> String {
        explicit.unwrap_or_else(|| self.default_case.clone())
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are copied through as-is and never expanded again.
/// An unterminated `${` is kept literally.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + end];
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `casefile.toml` in the current directory
/// 2. `~/.config/casefile/config.toml`
///
/// Environment variable overrides: `CASEFILE_CASE_DIR`, `CASEFILE_DEFAULT_CASE`.
pub fn load_config_from(path: Option<&Path>) -> Result<CasefileConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("casefile.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<CasefileConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => CasefileConfig::default(),
    };

    apply_env_overrides(&mut config);

    config.case_dir = config
        .case_dir
        .map(|dir| PathBuf::from(resolve_env_vars(&dir.to_string_lossy())));

    Ok(config)
}

fn apply_env_overrides(config: &mut CasefileConfig) {
    if let Ok(dir) = std::env::var("CASEFILE_CASE_DIR") {
        config.case_dir = Some(PathBuf::from(dir));
    }
    if let Ok(case) = std::env::var("CASEFILE_DEFAULT_CASE") {
        config.default_case = case;
    }
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("casefile"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_CASEFILE_TEST_VAR", "cases");
        assert_eq!(resolve_env_vars("${_CASEFILE_TEST_VAR}"), "cases");
        assert_eq!(
            resolve_env_vars("/srv/${_CASEFILE_TEST_VAR}/extra"),
            "/srv/cases/extra"
        );
        std::env::remove_var("_CASEFILE_TEST_VAR");
    }

    #[test]
    fn resolve_env_vars_does_not_expand_values() {
        std::env::set_var("_CASEFILE_SELF_VAR", "${_CASEFILE_SELF_VAR}");
        assert_eq!(
            resolve_env_vars("${_CASEFILE_SELF_VAR}/cases"),
            "${_CASEFILE_SELF_VAR}/cases"
        );
        std::env::remove_var("_CASEFILE_SELF_VAR");
    }

    #[test]
    fn resolve_env_vars_unset_and_unterminated() {
        assert_eq!(resolve_env_vars("a${_CASEFILE_UNSET_VAR}b"), "ab");
        assert_eq!(resolve_env_vars("cases/${OPEN"), "cases/${OPEN");
        assert_eq!(resolve_env_vars("plain"), "plain");
    }

    #[test]
    fn default_config() {
        let config = CasefileConfig::default();
        assert_eq!(config.default_case, "1");
        assert!(config.case_dir.is_none());
        assert_eq!(config.case_id(None), "1");
        assert_eq!(config.case_id(Some("7".into())), "7");
    }

    #[test]
    fn parse_config() {
        let config: CasefileConfig = toml::from_str(
            r#"
case_dir = "./cases"
default_case = "gallery"
"#,
        )
        .unwrap();
        assert_eq!(config.case_dir, Some(PathBuf::from("./cases")));
        assert_eq!(config.default_case, "gallery");
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let err = load_config_from(Some(Path::new("/no/such/casefile.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn case_book_includes_builtin() {
        let book = CasefileConfig::default().case_book().unwrap();
        assert!(book.get("1").is_ok());
    }
}

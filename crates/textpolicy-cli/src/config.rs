use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

pub const DEFAULT_LOG_LEVEL: &str = "warn";

// Marks stdin as the policy source.
const STDIN_PATH: &str = "-";

// CLI configuration sourced from environment variables, an optional YAML file
// and command-line flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    // Casbin model conf; the embedded RBAC model is used when unset.
    pub model_path: Option<PathBuf>,
    // Policy text file, or `-` for stdin.
    pub policy_path: Option<PathBuf>,
    // Log filter used when RUST_LOG is unset.
    pub log_level: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicySource {
    Stdin,
    File(PathBuf),
}

#[derive(Debug, Deserialize)]
struct CliConfigOverride {
    model_path: Option<PathBuf>,
    policy_path: Option<PathBuf>,
    log_level: Option<String>,
}

impl CliConfig {
    pub fn from_env() -> Self {
        let model_path = std::env::var_os("TEXTPOLICY_MODEL").map(PathBuf::from);
        let policy_path = std::env::var_os("TEXTPOLICY_POLICY").map(PathBuf::from);
        let log_level =
            std::env::var("TEXTPOLICY_LOG").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string());
        Self {
            model_path,
            policy_path,
            log_level,
        }
    }

    pub fn from_env_or_yaml() -> Result<Self> {
        let mut config = Self::from_env();
        if let Ok(path) = std::env::var("TEXTPOLICY_CONFIG") {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("read TEXTPOLICY_CONFIG: {path}"))?;
            config.apply_yaml(&contents)?;
        }
        Ok(config)
    }

    pub fn apply_yaml(&mut self, contents: &str) -> Result<()> {
        let override_cfg: CliConfigOverride =
            serde_yaml::from_str(contents).with_context(|| "parse textpolicy config yaml")?;
        if let Some(value) = override_cfg.model_path {
            self.model_path = Some(value);
        }
        if let Some(value) = override_cfg.policy_path {
            self.policy_path = Some(value);
        }
        if let Some(value) = override_cfg.log_level {
            self.log_level = value;
        }
        Ok(())
    }

    // Command-line flags win over every other source.
    pub fn with_overrides(mut self, model: Option<PathBuf>, policy: Option<PathBuf>) -> Self {
        if model.is_some() {
            self.model_path = model;
        }
        if policy.is_some() {
            self.policy_path = policy;
        }
        self
    }

    pub fn policy_source(&self) -> Result<PolicySource> {
        match &self.policy_path {
            None => bail!("no policy text configured; pass --policy or set TEXTPOLICY_POLICY"),
            Some(path) if path.as_os_str() == STDIN_PATH => Ok(PolicySource::Stdin),
            Some(path) => Ok(PolicySource::File(path.clone())),
        }
    }
}

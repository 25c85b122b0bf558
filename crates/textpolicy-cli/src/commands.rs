//! Command implementations behind the `textpolicy` binary.
use crate::config::{CliConfig, PolicySource};
use anyhow::{Context, Result};
use casbin::{CoreApi, DefaultModel, Enforcer};
use std::path::Path;
use textpolicy_adapter::{TextAdapter, rbac_model, rbac_model_string};
use tokio::io::AsyncReadExt;

/// One `sub, obj, act` request to enforce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessRequest {
    pub subject: String,
    pub object: String,
    pub action: String,
}

/// Load the casbin model from `path`, or the embedded RBAC model when unset.
pub async fn load_model(path: Option<&Path>) -> Result<DefaultModel> {
    match path {
        Some(path) => DefaultModel::from_file(path)
            .await
            .with_context(|| format!("load casbin model: {}", path.display())),
        None => rbac_model().await.context("build embedded rbac model"),
    }
}

/// Conf text of the model `load_model` would use for `path`.
pub async fn model_conf(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("read casbin model: {}", path.display())),
        None => Ok(rbac_model_string().to_string()),
    }
}

pub async fn read_policy_text(source: &PolicySource) -> Result<String> {
    match source {
        PolicySource::Stdin => {
            let mut text = String::new();
            tokio::io::stdin()
                .read_to_string(&mut text)
                .await
                .context("read policy text from stdin")?;
            Ok(text)
        }
        PolicySource::File(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("read policy text: {}", path.display())),
    }
}

/// Load the configured model and policy text.
pub async fn load_inputs(config: &CliConfig) -> Result<(DefaultModel, String)> {
    let model = load_model(config.model_path.as_deref()).await?;
    let text = read_policy_text(&config.policy_source()?).await?;
    Ok((model, text))
}

/// Build an enforcer over `text` and enforce `request`.
pub async fn check(model: DefaultModel, text: String, request: &AccessRequest) -> Result<bool> {
    let enforcer = Enforcer::new(model, TextAdapter::new(text))
        .await
        .context("build enforcer from policy text")?;
    let allowed = enforcer
        .enforce((
            request.subject.as_str(),
            request.object.as_str(),
            request.action.as_str(),
        ))
        .context("enforce request")?;
    tracing::info!(
        subject = %request.subject,
        object = %request.object,
        action = %request.action,
        allowed,
        "request enforced"
    );
    Ok(allowed)
}

/// Round-trip `text` through `model` and return the text the adapter saves.
pub fn normalize(model: &mut DefaultModel, text: String) -> Result<String> {
    let mut adapter = TextAdapter::new(text);
    adapter.load(&mut *model).context("load policy text")?;
    adapter.save(&*model).context("save policy text")?;
    Ok(adapter.into_text())
}

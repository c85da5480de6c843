//! Agents panel: orchestration engine and LLM configuration

use super::{Cell, Field, PanelBody, PanelId, PanelProvider, Tone};
use crate::config::MekonConfig;

pub struct AgentsProvider {
    config: MekonConfig,
}

impl AgentsProvider {
    pub fn new(config: MekonConfig) -> Self {
        Self { config }
    }
}

impl PanelProvider for AgentsProvider {
    fn panel(&self) -> PanelId {
        PanelId::Agents
    }

    fn probe(&self) -> anyhow::Result<PanelBody> {
        let engine = if self.config.engine_location().exists() {
            Cell::new("available", Tone::Good)
        } else {
            Cell::new("missing", Tone::Bad)
        };

        let llm = if self.config.has_llm_key() {
            Cell::new("configured", Tone::Good)
        } else {
            Cell::new("no key", Tone::Warn)
        };

        let data = if self.config.data_path().exists() {
            Cell::new("exists", Tone::Good)
        } else {
            Cell::muted("not created")
        };

        Ok(PanelBody::Fields {
            fields: vec![
                Field::new("Engine", engine),
                Field::new("LLM API", llm),
                Field::new("Model", Cell::plain(self.config.llm_model.clone())),
                Field::new("Data", data),
            ],
            extra: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn values(body: PanelBody) -> Vec<String> {
        match body {
            PanelBody::Fields { fields, .. } => fields.into_iter().map(|f| f.value.text).collect(),
            other => panic!("unexpected body {other:?}"),
        }
    }

    #[test]
    fn test_unconfigured_environment() {
        let dir = TempDir::new().unwrap();
        let config = MekonConfig {
            engine_path: dir.path().join("no-engine").display().to_string(),
            data_dir: dir.path().join("no-data").display().to_string(),
            ..MekonConfig::default()
        };

        let content = AgentsProvider::new(config).collect();
        assert_eq!(content.title(), "[3] Agents");
        assert_eq!(
            values(content.body),
            vec!["missing", "no key", "gpt-4", "not created"]
        );
    }

    #[test]
    fn test_configured_environment() {
        let dir = TempDir::new().unwrap();
        let config = MekonConfig {
            engine_path: dir.path().display().to_string(),
            data_dir: dir.path().display().to_string(),
            llm_api_key: "sk-test-9876".to_string(),
            llm_model: "claude-sonnet".to_string(),
            ..MekonConfig::default()
        };

        let content = AgentsProvider::new(config).collect();
        assert_eq!(
            values(content.body),
            vec!["available", "configured", "claude-sonnet", "exists"]
        );
    }
}

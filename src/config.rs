use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::inventory::{
    BuildOptions, DuplicateIdPolicy, Result, DEFAULT_INVENTORY_PATH, DEFAULT_ROOT_NAME,
};
use crate::render::LayoutKind;

/// Viewer settings as read from a TOML file.  Every key is optional:
///
/// ```toml
/// inventory = "inventories/prod/hosts.yml"
/// root = "all"
/// show_vars = true
/// duplicate_policy = "keep-first"
/// layout = "breadthfirst"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ViewerConfig {
    pub inventory: Option<PathBuf>,
    pub root: Option<String>,
    pub show_vars: Option<bool>,
    pub duplicate_policy: Option<DuplicateIdPolicy>,
    pub layout: Option<LayoutKind>,
}

impl ViewerConfig {
    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading viewer config");
        let text = fs::read_to_string(path)?;
        ViewerConfig::parse(&text)
    }

    pub fn inventory_path(&self) -> PathBuf {
        self.inventory
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_INVENTORY_PATH))
    }

    pub fn root_name(&self) -> &str {
        self.root.as_deref().unwrap_or(DEFAULT_ROOT_NAME)
    }

    pub fn layout(&self) -> LayoutKind {
        self.layout.unwrap_or_default()
    }

    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            show_vars: self.show_vars.unwrap_or(false),
            duplicate_policy: self.duplicate_policy.unwrap_or_default(),
        }
    }

    /// Layer `overrides` on top of `self`; set keys in `overrides` win.
    pub fn merged_with(&self, overrides: ViewerConfig) -> ViewerConfig {
        ViewerConfig {
            inventory: overrides.inventory.or_else(|| self.inventory.clone()),
            root: overrides.root.or_else(|| self.root.clone()),
            show_vars: overrides.show_vars.or(self.show_vars),
            duplicate_policy: overrides.duplicate_policy.or(self.duplicate_policy),
            layout: overrides.layout.or(self.layout),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::GraphError;

    #[test]
    fn test_defaults() {
        let config = ViewerConfig::parse("").unwrap();
        assert_eq!(config.inventory_path(), PathBuf::from("hosts.yml"));
        assert_eq!(config.root_name(), "all");
        assert_eq!(config.layout(), LayoutKind::Dagre);
        assert_eq!(config.build_options(), BuildOptions::default());
    }

    #[test]
    fn test_parse_and_merge() {
        let config = ViewerConfig::parse(
            r#"
inventory = "site/hosts.yml"
show_vars = true
duplicate_policy = "reject"
layout = "cose"
"#,
        )
        .unwrap();
        assert_eq!(config.build_options().duplicate_policy, DuplicateIdPolicy::Reject);
        assert!(config.build_options().show_vars);

        let merged = config.merged_with(ViewerConfig {
            show_vars: Some(false),
            root: Some("ungrouped".to_string()),
            ..Default::default()
        });
        assert!(!merged.build_options().show_vars);
        assert_eq!(merged.root_name(), "ungrouped");
        assert_eq!(merged.inventory_path(), PathBuf::from("site/hosts.yml"));
        assert_eq!(merged.layout(), LayoutKind::Cose);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        assert!(matches!(
            ViewerConfig::parse("show_variables = true\n"),
            Err(GraphError::ParseError(_))
        ));
    }
}

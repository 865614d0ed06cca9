//! Tree providers: the built-in questionnaire and TOML tree files
//!
//! TOML format, one table per node keyed by node key:
//!
//! ```toml
//! [nodes.initial]
//! id = "initial"
//! options = ["0", "1"]
//!
//! [nodes.0]
//! id = "0"
//! label = "Question"
//! options = ["00"]
//!
//! [nodes.00]
//! id = "00"
//! outcome_id = 1
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;

use crate::application::IoResultExt;
use crate::domain::{voters_decision_tree, Node, Tree};
use crate::infrastructure::traits::{FileSystem, TreeProvider};
use crate::infrastructure::{InfraError, InfraResult};

/// The shipped voting-eligibility questionnaire.
#[derive(Debug, Default, Clone, Copy)]
pub struct StaticTreeProvider;

impl TreeProvider for StaticTreeProvider {
    fn load_tree(&self) -> InfraResult<Tree> {
        voters_decision_tree().map_err(|e| InfraError::InvalidTree {
            source_name: self.describe(),
            message: e.to_string(),
        })
    }

    fn describe(&self) -> String {
        "built-in questionnaire".to_string()
    }
}

#[derive(Debug, Deserialize)]
struct TreeDocument {
    #[serde(default)]
    nodes: BTreeMap<String, Node>,
}

/// Loads a tree from a TOML file.
pub struct FileTreeProvider {
    fs: Arc<dyn FileSystem>,
    path: PathBuf,
}

impl FileTreeProvider {
    pub fn new(fs: Arc<dyn FileSystem>, path: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Parse TOML tree content; `source_name` only labels errors.
pub fn parse_tree(content: &str, source_name: &str) -> InfraResult<Tree> {
    let document: TreeDocument =
        toml::from_str(content).map_err(|e| InfraError::InvalidTree {
            source_name: source_name.to_string(),
            message: e.to_string(),
        })?;
    Tree::new(document.nodes).map_err(|e| InfraError::InvalidTree {
        source_name: source_name.to_string(),
        message: e.to_string(),
    })
}

impl TreeProvider for FileTreeProvider {
    fn load_tree(&self) -> InfraResult<Tree> {
        debug!("load_tree: path={}", self.path.display());
        if !self.fs.exists(&self.path) {
            return Err(InfraError::TreeNotFound(self.path.clone()));
        }
        let content = self
            .fs
            .read_to_string(&self.path)
            .with_path_context("read tree file", &self.path)?;
        parse_tree(&content, &self.describe())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Provider that always fails; useful to exercise the error path.
#[derive(Debug, Clone)]
pub struct FailingTreeProvider {
    reason: String,
}

impl FailingTreeProvider {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl TreeProvider for FailingTreeProvider {
    fn load_tree(&self) -> InfraResult<Tree> {
        Err(InfraError::Unavailable(self.reason.clone()))
    }

    fn describe(&self) -> String {
        "failing provider".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_minimal_document_when_parsing_then_builds_tree() {
        let tree = parse_tree(
            r#"
[nodes.initial]
id = "initial"
options = ["a"]

[nodes.a]
id = "a"
outcome_id = 4
"#,
            "inline",
        )
        .unwrap();
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.get("a").unwrap().outcome_id, Some(4));
        assert!(tree.get("a").unwrap().options.is_empty());
    }

    #[test]
    fn given_dangling_reference_when_parsing_then_invalid_tree() {
        let err = parse_tree(
            r#"
[nodes.initial]
id = "initial"
options = ["ghost"]
"#,
            "inline",
        )
        .unwrap_err();
        assert!(matches!(err, InfraError::InvalidTree { .. }));
        assert!(err.to_string().contains("ghost"));
    }

    #[test]
    fn given_broken_toml_when_parsing_then_invalid_tree() {
        let err = parse_tree("[nodes.initial\n", "inline").unwrap_err();
        assert!(matches!(err, InfraError::InvalidTree { .. }));
    }

    #[test]
    fn given_static_provider_when_loading_then_shipped_tree() {
        let tree = StaticTreeProvider.load_tree().unwrap();
        assert_eq!(tree.terminal_outcomes().len(), 8);
    }
}

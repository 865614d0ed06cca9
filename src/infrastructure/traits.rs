//! I/O boundary traits for testability
//!
//! These traits abstract the tree source and interactive selection,
//! allowing the navigator and CLI to be tested with mock implementations.

use std::io;
use std::path::Path;

use crate::domain::Tree;
use crate::infrastructure::InfraResult;

/// Source of the decision tree.
pub trait TreeProvider: Send + Sync {
    /// Produce the tree. Called at most once per navigator.
    fn load_tree(&self) -> InfraResult<Tree>;

    /// Short description for logs, e.g. "built-in" or a file path.
    fn describe(&self) -> String;
}

/// Filesystem abstraction for testability.
pub trait FileSystem: Send + Sync {
    /// Read file contents to string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Item for FZF-style selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionItem {
    /// Display text shown in selector
    pub display: String,
    /// Actual value (e.g., node id)
    pub value: String,
}

/// Interactive FZF-style selector abstraction.
pub trait Selector {
    /// Present items to user and return selected one.
    /// Returns None if user cancels (Esc/Ctrl-C).
    fn select_one(
        &self,
        items: &[SelectionItem],
        prompt: &str,
    ) -> Result<Option<SelectionItem>, String>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real filesystem implementation.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// Real selector implementation using skim (FZF-like).
#[derive(Debug)]
pub struct SkimSelector {
    height: String,
}

impl Default for SkimSelector {
    fn default() -> Self {
        Self::new("50%")
    }
}

/// Map a picked display line back to its item.
///
/// Skim hands back only the text, so displays must be unique per call.
pub fn item_for_display(items: &[SelectionItem], display: &str) -> Option<SelectionItem> {
    items.iter().find(|i| i.display == display).cloned()
}

impl SkimSelector {
    pub fn new(height: impl Into<String>) -> Self {
        Self {
            height: height.into(),
        }
    }
}

impl Selector for SkimSelector {
    fn select_one(
        &self,
        items: &[SelectionItem],
        prompt: &str,
    ) -> Result<Option<SelectionItem>, String> {
        use skim::prelude::*;
        use std::io::Cursor;

        if items.is_empty() {
            return Ok(None);
        }

        // Build input as newline-separated display strings
        let input = items
            .iter()
            .map(|i| i.display.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        let options = SkimOptionsBuilder::default()
            .prompt(Some(prompt))
            .height(Some(self.height.as_str()))
            .multi(false)
            .build()
            .map_err(|e| format!("failed to build skim options: {e}"))?;

        let item_reader = SkimItemReader::default();
        let items_arc = item_reader.of_bufread(Cursor::new(input));

        let output = Skim::run_with(&options, Some(items_arc));

        match output {
            Some(out) if out.is_abort => Ok(None),
            Some(out) => {
                if let Some(selected) = out.selected_items.first() {
                    Ok(item_for_display(items, &selected.output()))
                } else {
                    Ok(None)
                }
            }
            None => Ok(None),
        }
    }
}

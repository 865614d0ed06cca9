//! Domain entities: core data structures

use std::collections::{BTreeMap, BTreeSet};

use serde::Deserialize;

use crate::domain::error::DomainError;

/// Key of the distinguished entry holding the top-level branches.
pub const INITIAL_ID: &str = "initial";

/// One question or terminal outcome in the decision tree.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Node {
    /// Node identifier (normally equal to its key in the tree)
    pub id: String,
    /// Prompt text; absent on terminal nodes and on `initial`
    #[serde(default)]
    pub label: Option<String>,
    /// Child node ids, in display order. Empty for terminal nodes.
    #[serde(default)]
    pub options: Vec<String>,
    /// Eligibility category reached; only set on terminal nodes
    #[serde(default)]
    pub outcome_id: Option<u32>,
}

impl Node {
    /// Question node with a label and children.
    pub fn question(id: &str, label: &str, options: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            label: Some(label.to_string()),
            options: options.iter().map(|o| o.to_string()).collect(),
            outcome_id: None,
        }
    }

    /// Terminal node naming an outcome.
    pub fn outcome(id: &str, outcome_id: u32) -> Self {
        Self {
            id: id.to_string(),
            label: None,
            options: Vec::new(),
            outcome_id: Some(outcome_id),
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.options.is_empty()
    }

    /// Label for transcript rendering; missing labels render as empty.
    pub fn label_or_empty(&self) -> &str {
        self.label.as_deref().unwrap_or("")
    }
}

/// Immutable questionnaire: node key → node, including the `initial` entry.
///
/// Lookups go by key. The `id` stored inside a node is never checked against
/// its key, so a node may be reachable under a key that differs from its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    nodes: BTreeMap<String, Node>,
}

impl Tree {
    /// Build a tree, rejecting a missing `initial` entry and dangling option references.
    pub fn new(nodes: BTreeMap<String, Node>) -> Result<Self, DomainError> {
        if !nodes.contains_key(INITIAL_ID) {
            return Err(DomainError::MissingInitial);
        }
        for (key, node) in &nodes {
            if let Some(option) = node.options.iter().find(|o| !nodes.contains_key(*o)) {
                return Err(DomainError::DanglingReference {
                    node: key.clone(),
                    option: option.clone(),
                });
            }
        }
        Ok(Self { nodes })
    }

    /// Build from `(key, node)` pairs.
    pub fn from_entries<I>(entries: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = (String, Node)>,
    {
        Self::new(entries.into_iter().collect())
    }

    pub fn get(&self, key: &str) -> Option<&Node> {
        self.nodes.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.nodes.contains_key(key)
    }

    /// The `initial` entry; guaranteed by construction.
    pub fn initial(&self) -> &Node {
        &self.nodes[INITIAL_ID]
    }

    /// Options of `key` resolved to their nodes, in order.
    ///
    /// Returns an empty list for unknown or terminal keys.
    pub fn children(&self, key: &str) -> Vec<&Node> {
        self.get(key)
            .map(|node| {
                node.options
                    .iter()
                    .filter_map(|option| self.nodes.get(option))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Distinct outcome ids carried by terminal nodes, ascending.
    pub fn terminal_outcomes(&self) -> Vec<u32> {
        self.nodes
            .values()
            .filter_map(|n| n.outcome_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// The user's position: the ids visited so far, starting at `initial`.
///
/// The current node is always the last path element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    path: Vec<String>,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::initial()
    }
}

impl NavigationState {
    pub fn initial() -> Self {
        Self {
            path: vec![INITIAL_ID.to_string()],
        }
    }

    pub fn path(&self) -> &[String] {
        &self.path
    }

    pub fn current_id(&self) -> &str {
        // path is never empty
        self.path.last().map(String::as_str).unwrap_or(INITIAL_ID)
    }

    /// True only for exactly `["initial"]`.
    pub fn is_initial(&self) -> bool {
        self.path.len() == 1 && self.path[0] == INITIAL_ID
    }

    /// New state with `id` appended.
    pub fn advanced(&self, id: &str) -> Self {
        let mut path = self.path.clone();
        path.push(id.to_string());
        Self { path }
    }

    /// New state with the last step removed, or `None` when already at the start.
    pub fn retreated(&self) -> Option<Self> {
        if self.path.len() < 2 {
            return None;
        }
        Some(Self {
            path: self.path[..self.path.len() - 1].to_vec(),
        })
    }
}

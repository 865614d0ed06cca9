//! Pure derivations from tree and navigation state.

use itertools::Itertools;

use crate::domain::{NavigationState, Node, Tree, INITIAL_ID};

/// Prompt shown before the first choice.
pub const INTRO_PROMPT: &str = "Începe prin a alege una din opțiunile de mai jos";

const TRANSCRIPT_SUFFIX: &str = "...";

/// Running transcript of the labels visited so far, or the intro prompt at the start.
///
/// Nodes without a label, or missing from the tree, contribute an empty string.
pub fn prompt_text(tree: &Tree, state: &NavigationState) -> String {
    if state.is_initial() {
        return INTRO_PROMPT.to_string();
    }
    let transcript = state
        .path()
        .iter()
        .map(|id| tree.get(id).map(Node::label_or_empty).unwrap_or(""))
        .join(" ");
    format!("{transcript}{TRANSCRIPT_SUFFIX}").trim().to_string()
}

/// Options of the current node as full nodes.
///
/// `None` when the current node is unknown or terminal; the options view
/// does not emit in that case.
pub fn current_options(tree: &Tree, state: &NavigationState) -> Option<Vec<Node>> {
    let node = tree.get(state.current_id())?;
    if node.options.is_empty() {
        return None;
    }
    Some(tree.children(state.current_id()).into_iter().cloned().collect())
}

pub fn is_beyond_start(state: &NavigationState) -> bool {
    state.current_id() != INITIAL_ID
}

/// Outcome of the current node, if it is a terminal node.
pub fn current_outcome(tree: &Tree, state: &NavigationState) -> Option<u32> {
    tree.get(state.current_id())
        .filter(|node| node.is_terminal())
        .and_then(|node| node.outcome_id)
}

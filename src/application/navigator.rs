//! Navigator: the questionnaire state machine
//!
//! Holds the user's path through the decision tree and republishes the
//! derived views after every change. While the tree is unavailable only the
//! error channel ever emits.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::application::observable::Observable;
use crate::application::tree_cache::{LoadedTree, TreeCache};
use crate::application::views;
use crate::domain::{NavigationState, Node, Tree};
use crate::infrastructure::traits::TreeProvider;

pub struct Navigator {
    cache: TreeCache,
    state: NavigationState,
    state_changes: Observable<NavigationState>,
    prompt_text: Observable<String>,
    options: Observable<Vec<Node>>,
    is_beyond_start: Observable<bool>,
    has_error: Observable<bool>,
}

impl Navigator {
    /// Load the tree (once) and publish the views for the initial state.
    pub fn new(provider: Arc<dyn TreeProvider>) -> Self {
        let state = NavigationState::initial();
        let navigator = Self {
            cache: TreeCache::new(provider),
            state_changes: Observable::new(state.clone()),
            state,
            prompt_text: Observable::empty(),
            options: Observable::empty(),
            is_beyond_start: Observable::empty(),
            has_error: Observable::empty(),
        };

        if let Err(e) = navigator.cache.get() {
            warn!("navigator started without a tree: {}", e.reason);
            navigator.has_error.set(true);
        }
        navigator.publish_views();
        navigator
    }

    /// Move to `option_id`. The id is not checked against the tree.
    pub fn select_option(&mut self, option_id: &str) {
        if let Ok(tree) = self.cache.get() {
            if !tree.contains(option_id) {
                warn!("selected unknown node '{}'", option_id);
            }
        }
        let next = self.state.advanced(option_id);
        self.replace_state(next);
    }

    /// Step back one node; no-op at the start.
    pub fn back(&mut self) {
        match self.state.retreated() {
            Some(previous) => self.replace_state(previous),
            None => debug!("back at initial state ignored"),
        }
    }

    pub fn start_over(&mut self) {
        self.replace_state(NavigationState::initial());
    }

    fn replace_state(&mut self, next: NavigationState) {
        debug!("path: {:?}", next.path());
        self.state = next;
        self.state_changes.set(self.state.clone());
        self.publish_views();
    }

    fn publish_views(&self) {
        let Ok(tree) = self.cache.get() else {
            return;
        };
        self.prompt_text.set(views::prompt_text(tree, &self.state));
        match views::current_options(tree, &self.state) {
            Some(options) => self.options.set(options),
            None => self.options.withdraw(),
        }
        self.is_beyond_start.set(views::is_beyond_start(&self.state));
    }

    // ---- channels ----

    pub fn prompt_text(&self) -> &Observable<String> {
        &self.prompt_text
    }

    pub fn options(&self) -> &Observable<Vec<Node>> {
        &self.options
    }

    pub fn is_beyond_start(&self) -> &Observable<bool> {
        &self.is_beyond_start
    }

    /// Emits `true` once if the tree failed to load; never emits otherwise.
    pub fn has_error(&self) -> &Observable<bool> {
        &self.has_error
    }

    pub fn state_changes(&self) -> &Observable<NavigationState> {
        &self.state_changes
    }

    // ---- snapshots ----

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn tree(&self) -> &LoadedTree {
        self.cache.get()
    }

    pub fn current_node(&self) -> Option<&Node> {
        self.loaded_tree()?.get(self.state.current_id())
    }

    pub fn is_terminal(&self) -> bool {
        self.current_node().is_some_and(Node::is_terminal)
    }

    pub fn outcome(&self) -> Option<u32> {
        views::current_outcome(self.loaded_tree()?, &self.state)
    }

    fn loaded_tree(&self) -> Option<&Tree> {
        self.cache.get().as_ref().ok().map(Arc::as_ref)
    }
}

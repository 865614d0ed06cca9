//! One-shot memoized tree loading
//!
//! The provider runs at most once; its result, tree or failure, is cached
//! and handed to every later caller.

use std::cell::OnceCell;
use std::sync::Arc;

use tracing::{debug, error};

use crate::domain::{Tree, TreeUnavailable};
use crate::infrastructure::traits::TreeProvider;

/// A loaded tree, or the reason it could not be produced.
pub type LoadedTree = Result<Arc<Tree>, TreeUnavailable>;

pub struct TreeCache {
    provider: Arc<dyn TreeProvider>,
    cell: OnceCell<LoadedTree>,
}

impl TreeCache {
    pub fn new(provider: Arc<dyn TreeProvider>) -> Self {
        Self {
            provider,
            cell: OnceCell::new(),
        }
    }

    /// Load on first access, then replay the cached result.
    pub fn get(&self) -> &LoadedTree {
        self.cell.get_or_init(|| {
            debug!("loading decision tree from {}", self.provider.describe());
            match self.provider.load_tree() {
                Ok(tree) => {
                    debug!("decision tree loaded: {} nodes", tree.len());
                    Ok(Arc::new(tree))
                }
                Err(e) => {
                    error!("decision tree unavailable: {}", e);
                    Err(TreeUnavailable::new(e.to_string()))
                }
            }
        })
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::providers::{FailingTreeProvider, StaticTreeProvider};
    use crate::infrastructure::InfraResult;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingProvider {
        calls: AtomicUsize,
    }

    impl TreeProvider for CountingProvider {
        fn load_tree(&self) -> InfraResult<Tree> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            StaticTreeProvider.load_tree()
        }

        fn describe(&self) -> String {
            "counting".into()
        }
    }

    #[test]
    fn given_repeated_access_when_loading_then_provider_called_once() {
        let provider = Arc::new(CountingProvider {
            calls: AtomicUsize::new(0),
        });
        let cache = TreeCache::new(provider.clone());
        assert!(!cache.is_loaded());

        let first = cache.get().as_ref().map(Arc::clone).unwrap();
        let second = cache.get().as_ref().map(Arc::clone).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
        assert!(cache.is_loaded());
    }

    #[test]
    fn given_failing_provider_when_loading_then_caches_error() {
        let cache = TreeCache::new(Arc::new(FailingTreeProvider::new("offline")));
        let err = cache.get().clone().unwrap_err();
        assert!(err.reason.contains("offline"));
        assert_eq!(cache.get().clone().unwrap_err(), err);
    }
}

//! Service container for dependency injection
//!
//! Wires settings, filesystem and tree provider, and builds navigators.

use std::sync::Arc;

use tracing::debug;

use crate::application::Navigator;
use crate::config::Settings;
use crate::infrastructure::providers::{FileTreeProvider, StaticTreeProvider};
use crate::infrastructure::traits::{FileSystem, RealFileSystem, SkimSelector, TreeProvider};

/// Container holding the application's collaborators.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Tree source: the configured tree file, or the built-in questionnaire
    pub provider: Arc<dyn TreeProvider>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);
        let provider = Self::provider_for(&settings, Arc::clone(&fs));
        Self::with_deps(settings, fs, provider)
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        fs: Arc<dyn FileSystem>,
        provider: Arc<dyn TreeProvider>,
    ) -> Self {
        let settings = Arc::new(settings);

        Self {
            settings,
            fs,
            provider,
        }
    }

    fn provider_for(settings: &Settings, fs: Arc<dyn FileSystem>) -> Arc<dyn TreeProvider> {
        match &settings.tree_file {
            Some(path) => {
                debug!("using tree file {}", path.display());
                Arc::new(FileTreeProvider::new(fs, path.clone()))
            }
            None => Arc::new(StaticTreeProvider),
        }
    }

    /// Build a fresh navigator; each one loads the tree once.
    pub fn navigator(&self) -> Navigator {
        Navigator::new(Arc::clone(&self.provider))
    }

    /// Interactive selector configured from settings.
    pub fn selector(&self) -> SkimSelector {
        SkimSelector::new(self.settings.selector_height.clone())
    }
}

//! Application layer: navigation state machine and derived views
//!
//! This layer orchestrates domain logic and depends on the tree provider boundary trait.

pub mod error;
pub mod error_ext;
pub mod navigator;
pub mod observable;
pub mod tree_cache;
pub mod views;

pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use navigator::Navigator;
pub use observable::{Observable, Subscription};
pub use tree_cache::{LoadedTree, TreeCache};
pub use views::INTRO_PROMPT;

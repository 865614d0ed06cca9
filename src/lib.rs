//! votenav: voting-eligibility questionnaire engine
//!
//! A [`Navigator`](application::Navigator) walks a decision [`Tree`](domain::Tree)
//! supplied by a [`TreeProvider`](infrastructure::traits::TreeProvider) and
//! publishes the current prompt text, options and flags through replay-latest
//! [`Observable`](application::Observable) channels.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

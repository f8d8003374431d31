//! Service layer
//!
//! Business logic sitting between the repositories and the poll loop.

mod notifier;

pub use notifier::Notifier;

//! Repository layer
//!
//! Repositories are thin HTTP adapters for the two remote systems the bot
//! talks to: the homework review API and the Telegram Bot API. They carry
//! no business logic.
//!
//! Both are trait-based so the poller can be driven by in-memory fakes.

mod homeworks;
mod messenger;

// Re-export traits
pub use homeworks::HomeworkRepository;
pub use messenger::{DeliveryError, Messenger};

// Re-export implementations
pub use homeworks::HttpHomeworkRepository;
pub use messenger::TelegramMessenger;

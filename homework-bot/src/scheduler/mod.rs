//! Scheduler layer
//!
//! Owns the poll loop: fetch, validate, notify, sleep, repeat. Also holds
//! the only piece of mutable state in the bot, the poll cursor.

pub mod error;
pub mod poller;

pub use poller::Poller;

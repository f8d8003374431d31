//! Homework Core
//!
//! Core types and rules for the homework status bot.
//!
//! This crate contains:
//! - Domain types: submission records, review statuses, credentials
//! - DTOs: the shape of the review API response and its validation

pub mod domain;
pub mod dto;

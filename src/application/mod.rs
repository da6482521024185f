//! # Application Layer
//!
//! Contains the core business logic and orchestration of the bot.
//! This includes message parsing and command routing.

pub mod parsing;
pub mod router;

//! # Infrastructure Layer
//!
//! Handles interactions with external systems and services.
//! Implements the traits defined in the Domain layer (ChatProvider,
//! ShipDataProvider, ShipListStore).

pub mod discord;
pub mod shipdata;
pub mod store;

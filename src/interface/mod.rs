//! # Interface Layer
//!
//! Command handlers invoked by the Router.

pub mod commands;

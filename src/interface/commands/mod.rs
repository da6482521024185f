//! # Command Handlers
//!
//! Contains one handler per supported command workflow (`$mm`/`$mymarry`,
//! `!ship`, `!mudae`). These handlers are invoked by the Router.

pub mod mudae;
pub mod ship;
pub mod sync;

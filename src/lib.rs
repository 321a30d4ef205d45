//! Account client: authentication, profile management and a persisted
//! session on top of a small observable store.

pub mod account;
pub mod api;
pub mod bootstrap;
pub mod cli;
pub mod config;
pub mod logging;
pub mod persist;
pub mod state;
pub mod store;

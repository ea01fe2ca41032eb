//! Core modules: configuration, errors, and the SQLite storage path.
//!
//! Everything that touches the database goes through [`broker::DbBroker`].

pub mod broker;
pub mod config;
pub mod db;
pub mod error;
pub mod output;
pub mod schemas;
pub mod store;

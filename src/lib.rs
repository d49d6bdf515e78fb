//! Job application tracker.
//!
//! The server side exposes job records over a REST API backed by
//! PostgreSQL ([`api`], [`db`]). The client side keeps a kanban board in
//! sync with that API through optimistic drag-and-drop ([`board`],
//! [`client`]). [`status`] is the one place application statuses are
//! translated between their display and storage forms.

pub mod api;
pub mod board;
pub mod cli;
pub mod client;
pub mod config;
pub mod db;
pub mod shutdown;
pub mod status;

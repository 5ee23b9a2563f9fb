//! Kanban board server: task CRUD over a remote document store, and a
//! per-connection gesture controller that turns raw browser pointer events
//! into card drags, taps and column pans.

pub mod board;
pub mod contact;
pub mod error;
pub mod gesture;
pub mod routes;
pub mod state;
pub mod store;
pub mod task;
pub mod websocket;

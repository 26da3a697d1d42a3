//! # atrium-server
//!
//! HTTP API over the Atrium asset engine.
//!
//! The server owns one [`state::Session`]: the uploaded table, the active
//! column mapping, the derived asset list and tree, and the selection. Any
//! change to the table or the mapping fully re-derives the rest and clears
//! the selection.
//!
//! - **State**: [`state::AppState`], [`state::Session`]
//! - **Routes**: [`routes::router`]
//! - **Tree projection**: [`view::TreeNodeView`]
//! - **Errors**: [`errors::ApiError`]

#![deny(unsafe_code)]

pub mod errors;
pub mod routes;
pub mod state;
pub mod view;

pub use errors::{ApiError, Result};
pub use routes::router;
pub use state::{AppState, Session, View};
pub use view::TreeNodeView;

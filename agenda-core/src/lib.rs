//! Client core for the classroom agenda.
//!
//! This crate provides everything the front end needs to talk to the agenda
//! backend:
//! - typed records (`event`, `task`, `student`, `pedagogical`) and their
//!   create/update payloads
//! - `ApiClient`, `Session`/`TokenStore` and the login/registration calls
//! - `sync::load_all` and `profile::load_profile`
//! - `App`, which owns the state and dispatches mutations
//! - screen digests (`summary`), the calendar `agenda` and its `export`

pub mod agenda;
pub mod agenda_config;
pub mod app;
pub mod client;
pub mod error;
pub mod event;
pub mod export;
pub mod pedagogical;
pub mod profile;
pub mod session;
pub mod student;
pub mod summary;
pub mod sync;
pub mod task;
pub mod view;

pub use agenda_config::AgendaConfig;
pub use app::{App, NewRecord};
pub use client::ApiClient;
pub use error::{AgendaError, AgendaResult};
pub use session::{Session, TokenStore};
pub use sync::{AggregateState, ResourceKind};
pub use view::{Screen, View, ViewRouter};

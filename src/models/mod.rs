//! Data models for the G2L session backend.
//!
//! Persisted shapes serialise with the camelCase field names the browser client stores.

mod game;
mod session;
mod settings;

pub use game::*;
pub use session::*;
pub use settings::*;

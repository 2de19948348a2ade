//! Request middleware.

pub mod require_session;
pub mod trace;

pub use require_session::RequireSession;
pub use trace::Trace;

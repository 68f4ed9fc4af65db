mod handoff;
mod session;

pub use handoff::PendingLogins;
pub use session::Session;

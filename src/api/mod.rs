//! # API Module
//!
//! HTTP endpoints served by the local callback server while `spotback login`
//! is waiting for the user to grant access.
//!
//! ## Endpoints
//!
//! - [`callback`] - `GET /api/auth/callback/spotify`. Exchanges the
//!   authorization code for an access token and redirects the browser to the
//!   landing page. The credentials used for the exchange are looked up through
//!   the opaque `state` value; when no state is given the server-side
//!   credentials from the environment are used, unless a login started by
//!   the CLI is waiting, in which case the callback is rejected.
//! - [`home`] - `GET /`. Landing page reporting the login outcome.
//! - [`health`] - `GET /health`. Status and version.
//!
//! All handlers receive the shared [`crate::server::AppState`] through an
//! axum [`Extension`](axum::Extension).
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use spotback::{config::Settings, server::{AppState, router}};
//!
//! let state = AppState::new(Settings::from_env()?, reqwest::Client::new());
//! let app = router(state);
//! ```

mod callback;
mod health;
mod home;

pub use callback::{CallbackParams, MISSING_CODE, MISSING_STATE, callback};
pub use health::health;
pub use home::{HomeParams, home};

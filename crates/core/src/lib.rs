//! Core business logic for forum-warga.
//!
//! Services share one [`Session`] and the repositories of a
//! [`Store`](forum_warga_db::Store); [`AppState`] wires them together.
//!
//! ```no_run
//! # async fn demo() -> forum_warga_common::AppResult<()> {
//! use forum_warga_common::Config;
//! use forum_warga_core::{AppState, LoginInput};
//!
//! let state = AppState::seeded(&Config::load()?)?;
//! state
//!     .auth_service
//!     .login(LoginInput::new("ahmad.wijaya@email.com", "A-15"))
//!     .await?;
//! state.vote("1", vec!["1a".to_string()]).await?;
//! # Ok(())
//! # }
//! ```

pub mod services;
pub mod state;
pub mod validation;

pub use services::*;
pub use state::{AppState, OptionSummary, PollSummary};

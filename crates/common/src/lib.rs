//! Common utilities and shared types for forum-warga.
//!
//! - **Configuration**: Application settings via [`Config`]
//! - **Error handling**: Unified error types via [`AppError`] and [`AppResult`]
//! - **ID Generation**: ULID-based unique identifiers via [`IdGenerator`]
//! - **Latency**: Injectable simulated delays via [`SimulatedLatency`]
//!
//! # Example
//!
//! ```no_run
//! use forum_warga_common::{AppResult, Config, IdGenerator};
//!
//! fn example() -> AppResult<()> {
//!     let config = Config::load()?;
//!     let id_gen = IdGenerator::new();
//!     println!("{} - {}", config.app.name, id_gen.generate());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod id;
pub mod latency;

pub use config::{AppConfig, Config, ExportConfig, LatencyConfig};
pub use error::{AppError, AppResult, FieldErrors};
pub use id::IdGenerator;
pub use latency::SimulatedLatency;

//! Business logic services.

#![allow(missing_docs)]

pub mod auth;
pub mod poll;
pub mod roster;
pub mod session;
pub mod visibility;

pub use auth::{AuthService, DemoAccount, LoginInput, RegistrationInput};
pub use poll::{CreatePollInput, PollService};
pub use roster::{CsvExport, RosterService, VoterQuery, VoterReport, VoterRow, VoterSort};
pub use session::Session;
pub use visibility::can_view_roster;

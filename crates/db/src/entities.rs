//! Domain records.

#![allow(missing_docs)]

pub mod poll;
pub mod user;
pub mod user_vote;
pub mod vote_record;

pub use poll::{
    CategoryFilter, Model as Poll, PollCategory, PollStatus, VoteOption,
};
pub use user::{Model as User, UserRole};
pub use user_vote::Model as UserVote;
pub use vote_record::Model as VoteRecord;

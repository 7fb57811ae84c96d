//! Account/request context types shared across layers.
//!
//! An `AccountContext` is what an orchestrator holds for the lifetime of one
//! auction request: who the account is and the activity facade to consult
//! before each governed operation.

pub mod account;

pub use account::{resolve_account, AccountContext};

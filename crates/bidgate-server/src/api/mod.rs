//! JSON API for out-of-process callers.

pub mod activity;

//! Top-level facade crate for bidgate.
//!
//! Re-exports the activity engine and the server library so users can depend on a single crate.

pub mod core {
    pub use bidgate_core::*;
}

pub mod server {
    pub use bidgate_server::*;
}

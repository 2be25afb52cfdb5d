//! Top-level facade crate for the SRE practice app.
//!
//! Re-exports core types and the server library so users can depend on a single crate.

pub mod core {
    pub use srepractice_core::*;
}

pub mod server {
    pub use srepractice_server::*;
}

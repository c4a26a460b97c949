//! Backend test support utilities
//!
//! Shared logging bootstrap and unique-data helpers for the backend's
//! integration tests.

pub mod logging;
pub mod unique_helpers;

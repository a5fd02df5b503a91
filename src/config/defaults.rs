//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

/// Config file looked up when `-C` is not given.
pub const CONFIG_FILE: &str = "tourwithme.toml";

// ============================================================================
// [storage] Section Defaults
// ============================================================================

pub mod storage {
    use std::path::PathBuf;

    pub fn dir() -> PathBuf {
        ".tourwithme".into()
    }
}

// ============================================================================
// [serve] Section Defaults
// ============================================================================

pub mod serve {
    pub fn interface() -> String {
        "127.0.0.1".into()
    }

    pub fn port() -> u16 {
        5277
    }
}

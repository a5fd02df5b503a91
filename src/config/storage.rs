//! `[storage]` section configuration.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[storage]` section in tourwithme.toml - where site content is persisted.
///
/// Each slice is written to `<dir>/<key>.json`.
///
/// # Example
/// ```toml
/// [storage]
/// dir = "~/.local/share/tourwithme"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Storage directory; `~` is expanded.
    #[serde(default = "defaults::storage::dir")]
    #[educe(Default = defaults::storage::dir())]
    pub dir: PathBuf,
}

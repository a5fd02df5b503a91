//! Errors raised while loading `tourwithme.toml`.

use std::{io, path::PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read site config `{}`", .0.display())]
    Io(PathBuf, #[source] io::Error),

    /// Bad TOML syntax, a wrong value type, or an unknown section/field.
    #[error("site config `{path}` is malformed: {err}", path = .0.display(), err = .1)]
    Toml(PathBuf, #[source] toml::de::Error),

    #[error("site config rejected: {0}")]
    Validation(String),
}

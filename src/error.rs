//! Error taxonomy for the combat simulation core.

use thiserror::Error;

/// What kind of catalog entry an [`Error::UnknownReference`] failed to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Ship,
    Weapon,
    Shield,
}

impl std::fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ReferenceKind::Ship => "ship",
            ReferenceKind::Weapon => "weapon",
            ReferenceKind::Shield => "shield",
        };
        f.write_str(label)
    }
}

/// Errors surfaced by equipment normalizers and the simulation driver.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("descriptor is missing required field `{path}`")]
    DescriptorMissingField { path: String },

    #[error("loadout references unknown {kind} `{name}`")]
    UnknownReference { kind: ReferenceKind, name: String },

    #[error("{contestant} is not ready to engage")]
    NotReady { contestant: String },

    #[error("invalid arithmetic: {detail}")]
    InvalidArithmetic { detail: String },
}

pub type Result<T> = std::result::Result<T, Error>;

//! Parse errors.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use wl12xx_core::Arch;

#[derive(Error, Debug)]
pub enum IniError {
    #[error("cannot open {}: {source}", path.display())]
    FileOpen { path: PathBuf, source: io::Error },
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("missing '=' separator")]
    Format,
    #[error("{field}: '{token}' is not a hexadecimal number")]
    Syntax { field: String, token: String },
    #[error("{field}: value '{token}' exceeds {max:#x}")]
    Overflow { field: String, token: String, max: u64 },
    #[error("{field}: too many values, expected {expected}")]
    TooManyValues { field: String, expected: usize },
    #[error("{field}: too few values, expected {expected}, got {got}")]
    TooFewValues { field: String, expected: usize, got: usize },
    #[error("'{0}' does not start a known section")]
    UnknownSection(String),
    #[error("unknown field '{0}'")]
    UnknownField(String),
    #[error("architecture conflict: bound to {bound}, found {found}")]
    ArchitectureConflict { bound: Arch, found: Arch },
    #[error("architecture not resolved before field dispatch")]
    ArchitectureUnresolved,
    #[error("section '{section}' is not supported on {arch}")]
    UnsupportedSection { section: String, arch: Arch },
    #[error("unknown architecture for NVS size {0}")]
    UnknownArchitecture(usize),
    #[error("invalid FEM index {0}")]
    FemIndex(u8),
    #[error("line {number} '{text}': {source}")]
    AtLine {
        number: usize,
        text: String,
        source: Box<IniError>,
    },
}

/// Error categories, for callers that branch on the failure class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IniErrorKind {
    FileOpen,
    Io,
    Format,
    Syntax,
    Overflow,
    Arity,
    UnknownSection,
    UnknownField,
    ArchitectureConflict,
    ArchitectureUnresolved,
    UnsupportedSection,
    UnknownArchitecture,
    FemIndex,
}

impl IniError {
    /// Category of the error; line context is looked through.
    pub fn kind(&self) -> IniErrorKind {
        match self {
            Self::FileOpen { .. } => IniErrorKind::FileOpen,
            Self::Io(_) => IniErrorKind::Io,
            Self::Format => IniErrorKind::Format,
            Self::Syntax { .. } => IniErrorKind::Syntax,
            Self::Overflow { .. } => IniErrorKind::Overflow,
            Self::TooManyValues { .. } | Self::TooFewValues { .. } => IniErrorKind::Arity,
            Self::UnknownSection(_) => IniErrorKind::UnknownSection,
            Self::UnknownField(_) => IniErrorKind::UnknownField,
            Self::ArchitectureConflict { .. } => IniErrorKind::ArchitectureConflict,
            Self::ArchitectureUnresolved => IniErrorKind::ArchitectureUnresolved,
            Self::UnsupportedSection { .. } => IniErrorKind::UnsupportedSection,
            Self::UnknownArchitecture(_) => IniErrorKind::UnknownArchitecture,
            Self::FemIndex(_) => IniErrorKind::FemIndex,
            Self::AtLine { source, .. } => source.kind(),
        }
    }

    /// Logical line number the error was raised on, if known.
    pub fn line_number(&self) -> Option<usize> {
        match self {
            Self::AtLine { number, .. } => Some(*number),
            _ => None,
        }
    }
}

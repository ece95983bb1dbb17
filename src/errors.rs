//! Error Types
//!
//! This module defines the error types used throughout the animation core.
//!
//! # Overview
//!
//! The main error type [`Error`] covers every recoverable failure mode:
//! - Importing pipeline data that carries no animation channels
//! - File read/write failures while persisting or loading assets
//! - Binary buffers whose declared counts do not fit the data
//! - Player requests that reference a clip that does not exist
//!
//! Pose evaluation and skinning never fail: degenerate input yields a frozen
//! or default pose instead of an error.
//!
//! # Usage
//!
//! All fallible public APIs return [`Result<T>`], an alias for
//! `std::result::Result<T, Error>`.
//!
//! ```rust,ignore
//! use tabula::errors::Result;
//!
//! fn load() -> Result<()> {
//!     let _bytes = tabula::assets::io::read_file("clip.trAnimation")?;
//!     Ok(())
//! }
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for the animation core.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Import Errors
    // ========================================================================
    /// The source animation has zero channels; nothing was registered.
    #[error("Animation '{name}' has no channels to import")]
    ImportEmpty {
        /// Name reported by the pipeline (may be empty)
        name: String,
    },

    // ========================================================================
    // I/O Errors
    // ========================================================================
    /// Reading or writing an asset file failed.
    #[error("File IO error on '{}': {source}", path.display())]
    FileIo {
        /// Path of the file being accessed
        path: PathBuf,
        /// Underlying OS error
        #[source]
        source: std::io::Error,
    },

    // ========================================================================
    // Format Errors
    // ========================================================================
    /// A binary buffer is shorter than its header-declared counts imply.
    #[error("Format mismatch while reading {context}: need {needed} bytes, {available} available")]
    FormatMismatch {
        /// What was being decoded
        context: &'static str,
        /// Bytes required by the declared layout
        needed: usize,
        /// Bytes left in the buffer
        available: usize,
    },

    // ========================================================================
    // Player & Registry Errors
    // ========================================================================
    /// A clip index outside the player's clip list.
    #[error("Clip index out of bounds: {index} (clip count: {count})")]
    ClipIndexOutOfBounds {
        /// The requested index
        index: usize,
        /// Number of clips held by the player
        count: usize,
    },

    /// The requested asset was not found in the registry.
    #[error("Asset not found: {0}")]
    AssetNotFound(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileIo {
            path: path.into(),
            source,
        }
    }
}

/// Alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

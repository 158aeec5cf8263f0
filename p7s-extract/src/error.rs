// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use {cryptographic_message_syntax::CmsError, std::path::PathBuf, thiserror::Error};

/// Reasons content extraction can fail.
///
/// None of these are retryable with the same input.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ExtractError {
    /// The input could not be parsed as a `SignedData` structure.
    #[error("malformed signed data container: {0}")]
    MalformedContainer(String),

    /// The content is detached or empty.
    ///
    /// Both conditions are reported identically: from the perspective of
    /// someone wanting the signed document, there is nothing to extract.
    #[error("signed data container does not contain any data")]
    NoEmbeddedContent,

    /// The structure parsed but its content could not be obtained.
    #[error("error retrieving content from signed data container: {0}")]
    ContentRetrievalFailed(String),
}

/// Unified error type for the command line tool.
#[derive(Debug, Error)]
pub enum P7sError {
    #[error("unknown command")]
    CliUnknownCommand,

    #[error("bad argument")]
    CliBadArgument,

    #[error("{0}")]
    Extract(#[from] ExtractError),

    #[error("CMS error: {0}")]
    Cms(#[from] CmsError),

    #[error("input file does not exist: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("input path is a directory: {}", .0.display())]
    InputIsDirectory(PathBuf),

    #[error("output path is a directory: {}", .0.display())]
    OutputIsDirectory(PathBuf),

    #[error("output file already exists (use --force to overwrite): {}", .0.display())]
    OutputExists(PathBuf),

    #[error("error reading {}: {source}", .path.display())]
    ReadInput {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("error writing extracted data to {}: {source}", .path.display())]
    WriteOutput {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

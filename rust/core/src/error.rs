// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for decode operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading a BDEngine project
#[derive(Error, Debug)]
pub enum Error {
    /// A required input (path, stream, text) was empty. Raised before any I/O.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),
}

/// The single underlying cause of a failed decode
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("error reading file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid file path: {0}")]
    InvalidPath(String),

    #[error("error reading from input stream")]
    Stream(#[source] std::io::Error),

    #[error("container is not valid base64")]
    Base64(#[from] base64::DecodeError),

    #[error("container payload is not a valid gzip stream")]
    Gzip(#[source] std::io::Error),

    #[error("decompressed payload is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("invalid project JSON")]
    Json(#[from] serde_json::Error),

    #[error("project document is empty")]
    EmptyDocument,

    #[error("project document is null")]
    NullDocument,

    #[error("element at {path} has {len} transform values, expected 16")]
    MalformedTransforms { path: String, len: usize },
}

impl Error {
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Error::InvalidArgument(message.into())
    }

    /// Returns the decode cause, if this is a decode failure
    pub fn as_decode(&self) -> Option<&DecodeError> {
        match self {
            Error::Decode(cause) => Some(cause),
            Error::InvalidArgument(_) => None,
        }
    }
}

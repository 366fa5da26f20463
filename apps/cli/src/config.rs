// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Inspector configuration loaded from environment variables.

use bdengine_engine::{Encoding, PropagationPolicy};
use std::path::Path;

/// Which decoder to run on the input file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingChoice {
    /// Pick by file extension
    Auto,
    Json,
    Container,
}

impl EncodingChoice {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "auto" => Some(Self::Auto),
            "json" => Some(Self::Json),
            "container" | "bdengine" => Some(Self::Container),
            _ => None,
        }
    }

    pub fn resolve(self, path: &Path) -> Encoding {
        match self {
            Self::Auto => Encoding::from_path(path),
            Self::Json => Encoding::Json,
            Self::Container => Encoding::Container,
        }
    }
}

/// Inspector configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Decoder selection.
    pub encoding: EncodingChoice,
    /// Fold collection default transforms into child propagation (legacy).
    pub fold_default_transforms: bool,
    /// Decimal places when printing matrices.
    pub precision: usize,
    /// Print every element, not only display entities.
    pub show_all: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            encoding: std::env::var("BDENGINE_ENCODING")
                .ok()
                .and_then(|value| EncodingChoice::parse(&value))
                .unwrap_or(EncodingChoice::Auto),
            fold_default_transforms: std::env::var("BDENGINE_FOLD_DEFAULT_TRANSFORMS")
                .map(|value| matches!(value.trim(), "1" | "true" | "yes"))
                .unwrap_or(false),
            precision: std::env::var("BDENGINE_PRECISION")
                .unwrap_or_else(|_| "6".into())
                .parse()
                .unwrap_or(6),
            show_all: false,
        }
    }

    pub fn policy(&self) -> PropagationPolicy {
        if self.fold_default_transforms {
            PropagationPolicy::FoldCollectionDefault
        } else {
            PropagationPolicy::TransformsOnly
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

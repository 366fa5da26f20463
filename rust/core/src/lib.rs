// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # BDEngine-Lite Core
//!
//! Decoder and element model for BDEngine project files: trees of Minecraft
//! display entities (item, block and text displays) grouped into collections.
//!
//! ## Overview
//!
//! - **Element model**: [`Element`] with typed flags, the 16-value local
//!   `transforms` array and opaque passthrough payloads
//! - **Plain JSON**: a top-level array of elements
//! - **Container**: base64 over gzip over the same JSON (`.bdengine` files)
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use bdengine_core::{decode_container_file, walk_forest};
//!
//! let forest = decode_container_file("twme-skin.bdengine")?;
//! for element in walk_forest(&forest).filter(|e| e.is_display_entity()) {
//!     println!("{}", element);
//! }
//! ```
//!
//! Decoding never computes world transforms; see `bdengine-geometry` for that.

pub mod decoder;
pub mod error;
pub mod model;

pub use decoder::{
    check_transforms, decode, decode_container_file, decode_container_reader,
    decode_container_str, decode_json_file, decode_json_reader, decode_json_str, Encoding,
    Source,
};
pub use error::{DecodeError, Error, Result};
pub use model::{
    walk_forest, Brightness, DefaultTransform, DisplayKind, Element, Rotation, TagHead, Walk,
    TRANSFORM_LEN,
};

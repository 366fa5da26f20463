// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # BDEngine-Lite Engine
//!
//! Stable facade over the decoder and the world-transform calculator.
//!
//! ```rust,ignore
//! use bdengine_engine::{display_entities, Encoding, SceneParser};
//!
//! let parser = SceneParser::new();
//! let forest = parser.parse_file("restaurant-sign.bdengine", Encoding::Container)?;
//! for entity in display_entities(&forest) {
//!     println!("{} {:?}", entity, entity.world_transform);
//! }
//! ```

pub mod error;
pub mod parser;

pub use bdengine_core::{walk_forest, DecodeError, DisplayKind, Element, Encoding, Source};
pub use bdengine_geometry::{
    approx_equal, identity, to_row_major, Matrix4, PropagationPolicy, Vector3,
};
pub use error::{Error, ErrorKind, Result};
pub use parser::{
    create_axis_angle_rotation, create_axis_angle_rotation_xyz, display_entities,
    total_element_count, SceneParser,
};

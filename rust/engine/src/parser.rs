// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scene parser facade
//!
//! Composes the decoder and the world-transform calculator. "Raw" entry
//! points stop after decoding; the others also populate `world_transform` on
//! every element.

use crate::error::Result;
use bdengine_core::{check_transforms, decode, walk_forest, Element, Encoding, Source};
use bdengine_geometry::{
    rotate_axis_angle, Matrix4, PropagationPolicy, Vector3, WorldTransformCalculator,
};
use std::io::Read;
use std::path::Path;

/// Decodes BDEngine projects and computes world transforms
#[derive(Debug, Clone, Default)]
pub struct SceneParser {
    calculator: WorldTransformCalculator,
}

impl SceneParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parser whose calculator hands children the given propagation policy
    pub fn with_policy(policy: PropagationPolicy) -> Self {
        Self {
            calculator: WorldTransformCalculator::with_policy(policy),
        }
    }

    pub fn policy(&self) -> PropagationPolicy {
        self.calculator.policy()
    }

    // --- Raw decoding (no transform calculation) ---

    /// Decode without computing world transforms
    pub fn decode_raw(&self, source: Source<'_>, encoding: Encoding) -> Result<Vec<Element>> {
        Ok(decode(source, encoding)?)
    }

    pub fn parse_file_raw(
        &self,
        path: impl AsRef<Path>,
        encoding: Encoding,
    ) -> Result<Vec<Element>> {
        self.decode_raw(Source::File(path.as_ref()), encoding)
    }

    pub fn parse_reader_raw<R: Read>(
        &self,
        mut reader: R,
        encoding: Encoding,
    ) -> Result<Vec<Element>> {
        self.decode_raw(Source::Reader(&mut reader), encoding)
    }

    pub fn parse_json_str_raw(&self, json: &str) -> Result<Vec<Element>> {
        self.decode_raw(Source::Text(json), Encoding::Json)
    }

    pub fn parse_container_str_raw(&self, data: &str) -> Result<Vec<Element>> {
        self.decode_raw(Source::Text(data), Encoding::Container)
    }

    // --- Decoding with transform calculation ---

    /// Decode, then compute world transforms for every element.
    ///
    /// Every element must carry a 16-value `transforms` array; otherwise this
    /// fails with a decode error naming the offending node.
    pub fn decode_and_compute(
        &self,
        source: Source<'_>,
        encoding: Encoding,
    ) -> Result<Vec<Element>> {
        let mut forest = self.decode_raw(source, encoding)?;
        self.compute_in_place(&mut forest)?;
        tracing::debug!(
            roots = forest.len(),
            elements = total_element_count(&forest),
            "computed world transforms"
        );
        Ok(forest)
    }

    pub fn parse_file(&self, path: impl AsRef<Path>, encoding: Encoding) -> Result<Vec<Element>> {
        self.decode_and_compute(Source::File(path.as_ref()), encoding)
    }

    pub fn parse_reader<R: Read>(&self, mut reader: R, encoding: Encoding) -> Result<Vec<Element>> {
        self.decode_and_compute(Source::Reader(&mut reader), encoding)
    }

    pub fn parse_json_str(&self, json: &str) -> Result<Vec<Element>> {
        self.decode_and_compute(Source::Text(json), Encoding::Json)
    }

    pub fn parse_container_str(&self, data: &str) -> Result<Vec<Element>> {
        self.decode_and_compute(Source::Text(data), Encoding::Container)
    }

    /// Compute world transforms for an already decoded forest. Idempotent.
    ///
    /// Fails with a decode error naming the first node whose `transforms` is
    /// not 16 values long; the forest is left untouched in that case.
    pub fn compute_in_place(&self, forest: &mut [Element]) -> Result<()> {
        check_transforms(forest)?;
        self.calculator.calculate(forest)?;
        Ok(())
    }
}

/// Number of elements in the forest, roots and descendants
pub fn total_element_count(forest: &[Element]) -> usize {
    walk_forest(forest).count()
}

/// Item, block and text displays in pre-order
pub fn display_entities(forest: &[Element]) -> Vec<&Element> {
    walk_forest(forest)
        .filter(|element| element.is_display_entity())
        .collect()
}

/// Rotation around an arbitrary axis, for composing with computed world transforms
pub fn create_axis_angle_rotation(axis: Vector3<f64>, angle: f64) -> Result<Matrix4<f64>> {
    Ok(rotate_axis_angle(&axis, angle)?)
}

/// Component form of [`create_axis_angle_rotation`]
pub fn create_axis_angle_rotation_xyz(x: f64, y: f64, z: f64, angle: f64) -> Result<Matrix4<f64>> {
    create_axis_angle_rotation(Vector3::new(x, y, z), angle)
}

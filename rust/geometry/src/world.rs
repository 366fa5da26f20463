// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! World transforms: compose each element's local transform with its
//! ancestors', root first.

use crate::error::Result;
use crate::transform::{default_transform_matrix, local_matrix};
use bdengine_core::{walk_forest, Element};
use nalgebra::Matrix4;

/// What a node hands down to its children
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PropagationPolicy {
    /// Children receive the parent's world transform. `transforms` already
    /// carries everything; this matches reference renderer output.
    #[default]
    TransformsOnly,
    /// Legacy behavior: a collection with a `defaultTransform` hands its
    /// children `world × default`. Kept for comparing against old exports.
    FoldCollectionDefault,
}

/// Populates `world_transform` on every element of a forest
#[derive(Debug, Clone, Default)]
pub struct WorldTransformCalculator {
    policy: PropagationPolicy,
}

impl WorldTransformCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: PropagationPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> PropagationPolicy {
        self.policy
    }

    /// Compute world transforms for every root and its descendants.
    ///
    /// Each root starts from the identity. Results always overwrite, so
    /// running this twice gives bit-identical output. If any node's
    /// `transforms` is malformed, nothing is written.
    pub fn calculate(&self, roots: &mut [Element]) -> Result<()> {
        for element in walk_forest(roots) {
            local_matrix(element)?;
        }

        let origin = Matrix4::identity();
        for root in roots.iter_mut() {
            self.calculate_recursive(root, &origin)?;
        }
        Ok(())
    }

    fn calculate_recursive(
        &self,
        element: &mut Element,
        parent_world: &Matrix4<f64>,
    ) -> Result<()> {
        let local = local_matrix(element)?;

        // Compose: parent * local
        let world = parent_world * local;
        element.world_transform = Some(world);
        tracing::trace!(name = element.name(), "world transform computed");

        let for_children = match (self.policy, &element.default_transform) {
            (PropagationPolicy::FoldCollectionDefault, Some(default)) if element.is_group() => {
                world * default_transform_matrix(default)
            }
            _ => world,
        };

        for child in element.children.iter_mut() {
            self.calculate_recursive(child, &for_children)?;
        }
        Ok(())
    }
}

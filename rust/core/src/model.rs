// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Element tree model
//!
//! One [`Element`] per node of a BDEngine project. Keys follow the project
//! file's camelCase spelling; `null` and absent keys both decode to "not set".
//! Payloads the parser does not interpret (NBT, textures, text options) are
//! carried through untouched.

use nalgebra::Matrix4;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fmt;

/// Number of values in a row-major 4x4 `transforms` array
pub const TRANSFORM_LEN: usize = 16;

/// One node of a BDEngine scene tree
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    /// Display label, not unique
    pub name: Option<String>,
    pub is_collection: Option<bool>,
    pub is_back_collection: Option<bool>,
    pub is_item_display: Option<bool>,
    pub is_block_display: Option<bool>,
    pub is_text_display: Option<bool>,
    /// Local transform, 16 values in row-major order
    pub transforms: Option<Vec<f64>>,
    pub default_transform: Option<DefaultTransform>,
    /// Children in render order
    #[serde(default, deserialize_with = "null_as_empty")]
    pub children: Vec<Element>,

    pub nbt: Option<String>,
    pub tag_head: Option<TagHead>,
    pub texture_value_list: Option<Vec<String>>,
    pub paint_texture: Option<Value>,
    pub default_texture_value: Option<String>,
    pub brightness: Option<Brightness>,
    /// Text display styling, kept as raw JSON
    pub options: Option<Value>,

    /// Transform relative to the tree root. Written only by the world-transform calculator.
    #[serde(skip)]
    pub world_transform: Option<Matrix4<f64>>,
}

/// Secondary position/rotation/scale transform stored on some nodes
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DefaultTransform {
    pub position: Option<Vec<f64>>,
    pub rotation: Option<Rotation>,
    pub scale: Option<Vec<f64>>,
}

/// Per-axis rotation in radians. Missing or `null` axes are zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct Rotation {
    #[serde(default, deserialize_with = "null_as_zero")]
    pub x: f64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub y: f64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub z: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TagHead {
    #[serde(rename = "Value")]
    pub value: Option<String>,
}

/// Light override for a display entity.
///
/// Levels may be written as integers or integral floats (`15.0`); `null` is zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct Brightness {
    #[serde(default, deserialize_with = "light_level")]
    pub sky: i32,
    #[serde(default, deserialize_with = "light_level")]
    pub block: i32,
}

/// Kind of renderable leaf
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayKind {
    Item,
    Block,
    Text,
}

impl DisplayKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayKind::Item => "item_display",
            DisplayKind::Block => "block_display",
            DisplayKind::Text => "text_display",
        }
    }
}

impl fmt::Display for DisplayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Element>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Element>>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

fn light_level<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<f64>::deserialize(deserializer)? {
        None => Ok(0),
        Some(level)
            if level.fract() == 0.0
                && level >= f64::from(i32::MIN)
                && level <= f64::from(i32::MAX) =>
        {
            Ok(level as i32)
        }
        Some(level) => Err(D::Error::custom(format!(
            "brightness level {level} is not an integer"
        ))),
    }
}

#[inline]
fn flag(value: Option<bool>) -> bool {
    value.unwrap_or(false)
}

impl Element {
    /// Name, or an empty string when unset
    #[inline]
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    /// Which display entity this node is, if any.
    ///
    /// The flags are meant to be exclusive; if a file sets more than one,
    /// item wins over block, block over text.
    pub fn display_kind(&self) -> Option<DisplayKind> {
        if flag(self.is_item_display) {
            Some(DisplayKind::Item)
        } else if flag(self.is_block_display) {
            Some(DisplayKind::Block)
        } else if flag(self.is_text_display) {
            Some(DisplayKind::Text)
        } else {
            None
        }
    }

    #[inline]
    pub fn is_display_entity(&self) -> bool {
        self.display_kind().is_some()
    }

    /// Collection or back-collection grouping node
    #[inline]
    pub fn is_group(&self) -> bool {
        flag(self.is_collection) || flag(self.is_back_collection)
    }

    /// True when `transforms` holds exactly 16 values
    #[inline]
    pub fn has_valid_transforms(&self) -> bool {
        self.transforms
            .as_ref()
            .is_some_and(|values| values.len() == TRANSFORM_LEN)
    }

    /// Pre-order iterator over this node and all of its descendants
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.display_kind() {
            Some(kind) => kind.as_str(),
            None if self.is_group() => "collection",
            None => "element",
        };
        write!(
            f,
            "{} '{}' ({} children)",
            kind,
            self.name(),
            self.children.len()
        )
    }
}

/// Pre-order iterator over every element of a forest
pub fn walk_forest(forest: &[Element]) -> Walk<'_> {
    Walk {
        stack: forest.iter().rev().collect(),
    }
}

/// Parent-before-child, sibling-order-preserving traversal
pub struct Walk<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<&'a Element> {
        let element = self.stack.pop()?;
        self.stack.extend(element.children.iter().rev());
        Some(element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str, children: Vec<Element>) -> Element {
        Element {
            name: Some(name.to_string()),
            children,
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_and_null_keys_are_unset() {
        let element: Element = serde_json::from_str(
            r#"{"name":"root","isCollection":null,"children":null,"transforms":null}"#,
        )
        .unwrap();

        assert_eq!(element.name(), "root");
        assert!(!element.is_group());
        assert!(element.children.is_empty());
        assert!(element.transforms.is_none());
        assert!(element.world_transform.is_none());
    }

    #[test]
    fn test_payload_fields_pass_through() {
        let element: Element = serde_json::from_str(
            r##"{
                "name": "sign",
                "isTextDisplay": true,
                "tagHead": {"Value": "abc"},
                "brightness": {"sky": 15, "block": 7},
                "paintTexture": {"layers": [1, 2]},
                "options": {"color": "#ffffff", "bold": true},
                "unknownKey": 42
            }"##,
        )
        .unwrap();

        assert_eq!(element.display_kind(), Some(DisplayKind::Text));
        assert_eq!(element.tag_head.unwrap().value.as_deref(), Some("abc"));
        assert_eq!(element.brightness, Some(Brightness { sky: 15, block: 7 }));
        assert_eq!(element.paint_texture.unwrap()["layers"][1], 2);
        assert_eq!(element.options.unwrap()["bold"], true);
    }

    #[test]
    fn test_default_transform_shape() {
        let element: Element = serde_json::from_str(
            r#"{"defaultTransform":{"position":[1,2,3],"rotation":{"x":0.5},"scale":[2,2,2]}}"#,
        )
        .unwrap();

        let dt = element.default_transform.unwrap();
        assert_eq!(dt.position, Some(vec![1.0, 2.0, 3.0]));
        assert_eq!(
            dt.rotation,
            Some(Rotation {
                x: 0.5,
                y: 0.0,
                z: 0.0
            })
        );
    }

    #[test]
    fn test_null_rotation_axes_are_zero() {
        let element: Element = serde_json::from_str(
            r#"{"defaultTransform":{"rotation":{"x":null,"y":0,"z":1.5}}}"#,
        )
        .unwrap();

        let rotation = element.default_transform.unwrap().rotation.unwrap();
        assert_eq!(
            rotation,
            Rotation {
                x: 0.0,
                y: 0.0,
                z: 1.5
            }
        );
    }

    #[test]
    fn test_brightness_accepts_integral_floats_and_null() {
        let element: Element =
            serde_json::from_str(r#"{"brightness":{"sky":15.0,"block":null}}"#).unwrap();
        assert_eq!(element.brightness, Some(Brightness { sky: 15, block: 0 }));

        let result = serde_json::from_str::<Element>(r#"{"brightness":{"sky":7.5}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_unclassified_element_is_not_display_entity() {
        let element = named("plain", Vec::new());
        assert_eq!(element.display_kind(), None);
        assert!(!element.is_display_entity());
    }

    #[test]
    fn test_walk_is_pre_order() {
        let forest = vec![
            named("a", vec![named("a1", vec![named("a1x", Vec::new())]), named("a2", Vec::new())]),
            named("b", Vec::new()),
        ];

        let names: Vec<&str> = walk_forest(&forest).map(Element::name).collect();
        assert_eq!(names, ["a", "a1", "a1x", "a2", "b"]);
        assert_eq!(forest[0].walk().count(), 4);
    }

    #[test]
    fn test_has_valid_transforms() {
        let mut element = Element::default();
        assert!(!element.has_valid_transforms());
        element.transforms = Some(vec![0.0; 15]);
        assert!(!element.has_valid_transforms());
        element.transforms = Some(vec![0.0; 16]);
        assert!(element.has_valid_transforms());
    }
}

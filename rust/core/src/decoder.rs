// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Project Decoder - bytes to element forest
//!
//! Two encodings are supported:
//!
//! - **Json**: a UTF-8 document whose top level is an array of elements
//! - **Container**: a single base64 token wrapping a gzip stream of the same JSON
//!
//! Every entry point returns the forest with `world_transform` unset. There is
//! no fallback between encodings; callers pick the one that matches the input.

use crate::error::{DecodeError, Error, Result};
use crate::model::Element;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use flate2::read::GzDecoder;
use std::io::Read;
use std::path::Path;

/// Input encoding of a project document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Plain JSON array of elements (`.json`)
    Json,
    /// base64(gzip(json)) as saved by BDEngine (`.bdengine`)
    Container,
}

impl Encoding {
    /// Guess the encoding from a file extension. `.bdengine` is a container,
    /// everything else is treated as plain JSON.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        match path.as_ref().extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("bdengine") => Encoding::Container,
            _ => Encoding::Json,
        }
    }
}

/// Where a project document comes from
pub enum Source<'a> {
    File(&'a Path),
    Reader(&'a mut dyn Read),
    Text(&'a str),
}

impl<'a> From<&'a str> for Source<'a> {
    fn from(text: &'a str) -> Self {
        Source::Text(text)
    }
}

impl<'a> From<&'a Path> for Source<'a> {
    fn from(path: &'a Path) -> Self {
        Source::File(path)
    }
}

/// Decode a project from any source in the given encoding
pub fn decode(source: Source<'_>, encoding: Encoding) -> Result<Vec<Element>> {
    match (source, encoding) {
        (Source::File(path), Encoding::Json) => decode_json_file(path),
        (Source::File(path), Encoding::Container) => decode_container_file(path),
        (Source::Reader(reader), Encoding::Json) => decode_json_reader(reader),
        (Source::Reader(reader), Encoding::Container) => decode_container_reader(reader),
        (Source::Text(text), Encoding::Json) => decode_json_str(text),
        (Source::Text(text), Encoding::Container) => decode_container_str(text),
    }
}

// --- Plain JSON ---

/// Parse a JSON string holding an array of elements
pub fn decode_json_str(json: &str) -> Result<Vec<Element>> {
    if json.trim().is_empty() {
        return Err(Error::invalid_argument("JSON string cannot be empty"));
    }
    parse_json(json)
}

/// Parse a JSON document from a reader
pub fn decode_json_reader<R: Read>(reader: R) -> Result<Vec<Element>> {
    let elements: Option<Vec<Element>> =
        serde_json::from_reader(reader).map_err(|err| {
            if err.is_io() {
                DecodeError::Stream(err.into())
            } else {
                DecodeError::Json(err)
            }
        })?;
    finish(elements)
}

/// Read and parse a JSON project file
pub fn decode_json_file(path: impl AsRef<Path>) -> Result<Vec<Element>> {
    let content = read_file(path.as_ref())?;
    parse_json(&content)
}

// --- Container ---

/// Decode a container token: base64, then gzip, then JSON
pub fn decode_container_str(data: &str) -> Result<Vec<Element>> {
    if data.trim().is_empty() {
        return Err(Error::invalid_argument("Container data cannot be empty"));
    }
    parse_container(data)
}

/// Read a container token from a reader and decode it
pub fn decode_container_reader<R: Read>(mut reader: R) -> Result<Vec<Element>> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(DecodeError::Stream)?;
    let data = String::from_utf8(bytes).map_err(DecodeError::from)?;
    parse_container(&data)
}

/// Read and decode a `.bdengine` container file
pub fn decode_container_file(path: impl AsRef<Path>) -> Result<Vec<Element>> {
    let content = read_file(path.as_ref())?;
    parse_container(&content)
}

/// Check that every node carries a 16-value `transforms` array.
///
/// Run before the world-transform calculator on full decode paths. The
/// error names the offending node by its index path from the root, e.g. `0/2/1`.
pub fn check_transforms(forest: &[Element]) -> Result<()> {
    fn visit(element: &Element, path: &mut Vec<usize>) -> Result<()> {
        if !element.has_valid_transforms() {
            let len = element.transforms.as_ref().map_or(0, Vec::len);
            let path = path
                .iter()
                .map(usize::to_string)
                .collect::<Vec<_>>()
                .join("/");
            return Err(DecodeError::MalformedTransforms { path, len }.into());
        }
        for (index, child) in element.children.iter().enumerate() {
            path.push(index);
            visit(child, path)?;
            path.pop();
        }
        Ok(())
    }

    let mut path = Vec::new();
    for (index, root) in forest.iter().enumerate() {
        path.push(index);
        visit(root, &mut path)?;
        path.pop();
    }
    Ok(())
}

// Content already read from a file, stream or container; blank means EmptyDocument
fn parse_json(json: &str) -> Result<Vec<Element>> {
    if json.trim().is_empty() {
        return Err(DecodeError::EmptyDocument.into());
    }
    let elements: Option<Vec<Element>> =
        serde_json::from_str(json).map_err(DecodeError::from)?;
    finish(elements)
}

fn parse_container(data: &str) -> Result<Vec<Element>> {
    let token = data.trim();
    if token.is_empty() {
        return Err(DecodeError::EmptyDocument.into());
    }

    let compressed = STANDARD.decode(token).map_err(DecodeError::from)?;
    let json = inflate(&compressed)?;
    tracing::debug!(
        compressed_bytes = compressed.len(),
        json_bytes = json.len(),
        "inflated container"
    );
    parse_json(&json)
}

fn finish(elements: Option<Vec<Element>>) -> Result<Vec<Element>> {
    let elements = elements.ok_or(DecodeError::NullDocument)?;
    tracing::debug!(roots = elements.len(), "decoded project");
    Ok(elements)
}

fn read_file(path: &Path) -> Result<String> {
    if path.as_os_str().is_empty() || path.to_string_lossy().trim().is_empty() {
        return Err(Error::invalid_argument("File path cannot be empty"));
    }
    if path.to_str().is_some_and(|p| p.contains('\0')) {
        return Err(DecodeError::InvalidPath(path.display().to_string()).into());
    }
    std::fs::read_to_string(path).map_err(|source| {
        DecodeError::Io {
            path: path.to_path_buf(),
            source,
        }
        .into()
    })
}

fn inflate(compressed: &[u8]) -> Result<String> {
    let mut decoder = GzDecoder::new(compressed);
    let mut bytes = Vec::new();
    decoder
        .read_to_end(&mut bytes)
        .map_err(DecodeError::Gzip)?;
    String::from_utf8(bytes).map_err(|err| DecodeError::from(err).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    const SCENE: &str = r#"[
        {
            "name": "root",
            "isCollection": true,
            "transforms": [1,0,0,0, 0,1,0,0, 0,0,1,0, 0,0,0,1],
            "children": [
                {"name": "stone", "isBlockDisplay": true,
                 "transforms": [1,0,0,2, 0,1,0,0, 0,0,1,0, 0,0,0,1]}
            ]
        }
    ]"#;

    fn pack(json: &str) -> String {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(json.as_bytes()).unwrap();
        STANDARD.encode(encoder.finish().unwrap())
    }

    #[test]
    fn test_decode_json_str() {
        let forest = decode_json_str(SCENE).unwrap();
        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].children[0].name(), "stone");
        assert!(forest[0].world_transform.is_none());
        assert!(forest[0].children[0].world_transform.is_none());
    }

    #[test]
    fn test_empty_array_is_empty_forest() {
        assert!(decode_json_str("[]").unwrap().is_empty());
    }

    #[test]
    fn test_not_json_is_decode_error() {
        let err = decode_json_str("not json").unwrap_err();
        assert!(matches!(err, Error::Decode(DecodeError::Json(_))));
    }

    #[test]
    fn test_non_array_top_level_is_decode_error() {
        let err = decode_json_str("{}").unwrap_err();
        assert!(matches!(err, Error::Decode(DecodeError::Json(_))));

        let err = decode_json_str("null").unwrap_err();
        assert!(matches!(err, Error::Decode(DecodeError::NullDocument)));
    }

    #[test]
    fn test_empty_string_is_invalid_argument() {
        assert!(matches!(
            decode_json_str("  \n").unwrap_err(),
            Error::InvalidArgument(_)
        ));
        assert!(matches!(
            decode_container_str("").unwrap_err(),
            Error::InvalidArgument(_)
        ));
    }

    #[test]
    fn test_decode_json_reader() {
        let forest = decode_json_reader(SCENE.as_bytes()).unwrap();
        assert_eq!(forest[0].children.len(), 1);
    }

    #[test]
    fn test_container_matches_json() {
        let token = format!("  {}\n", pack(SCENE));
        let from_container = decode_container_str(&token).unwrap();
        let from_json = decode_json_str(SCENE).unwrap();

        assert_eq!(from_container.len(), from_json.len());
        assert_eq!(
            from_container[0].children[0].transforms,
            from_json[0].children[0].transforms
        );
    }

    #[test]
    fn test_container_reader() {
        let token = pack(SCENE);
        let forest = decode_container_reader(token.as_bytes()).unwrap();
        assert_eq!(forest[0].name(), "root");
    }

    #[test]
    fn test_invalid_base64() {
        let err = decode_container_str("@@not-base64@@").unwrap_err();
        assert!(matches!(err, Error::Decode(DecodeError::Base64(_))));
    }

    #[test]
    fn test_invalid_gzip() {
        let token = STANDARD.encode(b"plain bytes, no gzip header");
        let err = decode_container_str(&token).unwrap_err();
        assert!(matches!(err, Error::Decode(DecodeError::Gzip(_))));
    }

    #[test]
    fn test_invalid_utf8_payload() {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&[0xff, 0xfe, 0xfd]).unwrap();
        let token = STANDARD.encode(encoder.finish().unwrap());

        let err = decode_container_str(&token).unwrap_err();
        assert!(matches!(err, Error::Decode(DecodeError::Utf8(_))));
    }

    #[test]
    fn test_missing_file() {
        let err = decode_json_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, Error::Decode(DecodeError::Io { .. })));
    }

    #[test]
    fn test_empty_path_is_invalid_argument() {
        let err = decode_container_file("").unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_empty_file_is_decode_error() {
        let path = std::env::temp_dir().join(format!("bdengine-core-{}-empty", std::process::id()));
        std::fs::write(&path, "  \n").unwrap();

        let json_err = decode_json_file(&path).unwrap_err();
        let container_err = decode_container_file(&path).unwrap_err();
        let _ = std::fs::remove_file(&path);

        assert!(matches!(json_err, Error::Decode(DecodeError::EmptyDocument)));
        assert!(matches!(container_err, Error::Decode(DecodeError::EmptyDocument)));
    }

    #[test]
    fn test_empty_stream_is_decode_error() {
        let err = decode_container_reader(&b""[..]).unwrap_err();
        assert!(matches!(err, Error::Decode(DecodeError::EmptyDocument)));

        let err = decode_json_reader(&b""[..]).unwrap_err();
        assert!(err.as_decode().is_some());
    }

    #[test]
    fn test_container_with_empty_payload_is_decode_error() {
        let err = decode_container_str(&pack("")).unwrap_err();
        assert!(matches!(err, Error::Decode(DecodeError::EmptyDocument)));
    }

    #[test]
    fn test_decode_dispatch() {
        let token = pack(SCENE);
        let forest = decode(Source::Text(&token), Encoding::Container).unwrap();
        assert_eq!(forest.len(), 1);

        let mut reader = SCENE.as_bytes();
        let forest = decode(Source::Reader(&mut reader), Encoding::Json).unwrap();
        assert_eq!(forest.len(), 1);
    }

    #[test]
    fn test_encoding_from_path() {
        assert_eq!(Encoding::from_path("skin.bdengine"), Encoding::Container);
        assert_eq!(Encoding::from_path("skin.BDENGINE"), Encoding::Container);
        assert_eq!(Encoding::from_path("skin.json"), Encoding::Json);
        assert_eq!(Encoding::from_path("skin"), Encoding::Json);
    }

    #[test]
    fn test_check_transforms_reports_path() {
        let mut forest = decode_json_str(SCENE).unwrap();
        assert!(check_transforms(&forest).is_ok());

        forest[0].children[0].transforms = Some(vec![1.0; 9]);
        match check_transforms(&forest).unwrap_err() {
            Error::Decode(DecodeError::MalformedTransforms { path, len }) => {
                assert_eq!(path, "0/0");
                assert_eq!(len, 9);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}

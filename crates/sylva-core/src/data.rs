//! Startup data records.
//!
//! The explorer consumes exactly one document at startup. It is either
//! `{ "data": <node>, "abbr": { ... } }` or a bare `<node>` record.

use crate::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::future::Future;
use std::io::Read;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<NodeData>>,
}

impl NodeData {
    pub fn leaf(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            desc: None,
            color: color.into(),
            children: None,
        }
    }

    pub fn with_desc(mut self, desc: impl Into<String>) -> Self {
        self.desc = Some(desc.into());
        self
    }

    pub fn with_children(mut self, children: Vec<NodeData>) -> Self {
        self.children = Some(children);
        self
    }

    /// Total number of records in this subtree, including `self`.
    pub fn count(&self) -> usize {
        1 + self
            .children
            .iter()
            .flatten()
            .map(NodeData::count)
            .sum::<usize>()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub data: NodeData,
    /// Normalized display name -> expanded form (e.g. an acronym's full name).
    #[serde(default)]
    pub abbr: IndexMap<String, String>,
}

impl Dataset {
    pub fn new(data: NodeData) -> Self {
        Self {
            data,
            abbr: IndexMap::new(),
        }
    }

    pub fn from_value(value: Value) -> Result<Self> {
        let wrapped = value.as_object().is_some_and(|o| o.contains_key("data"));
        let parsed = if wrapped {
            serde_json::from_value::<Dataset>(value)
        } else {
            serde_json::from_value::<NodeData>(value).map(Dataset::new)
        };
        parsed.map_err(load_error)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text).map_err(load_error)?;
        Self::from_value(value)
    }

    pub fn from_reader(mut reader: impl Read) -> Result<Self> {
        let mut text = String::new();
        reader.read_to_string(&mut text).map_err(|e| {
            tracing::warn!(error = %e, "tree data could not be read");
            Error::Load {
                message: e.to_string(),
            }
        })?;
        Self::from_json_str(&text)
    }

    /// Awaits the one-time startup fetch and parses its body.
    ///
    /// Runtime-agnostic: the future is polled by whatever executor the caller uses, and parsing is
    /// synchronous.
    pub async fn load<F>(fetch: F) -> Result<Self>
    where
        F: Future<Output = std::io::Result<String>>,
    {
        let text = fetch.await.map_err(|e| {
            tracing::warn!(error = %e, "tree data fetch failed");
            Error::Load {
                message: e.to_string(),
            }
        })?;
        Self::from_json_str(&text)
    }
}

fn load_error(e: serde_json::Error) -> Error {
    tracing::warn!(error = %e, "tree data is malformed");
    Error::Load {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    #[test]
    fn wrapped_document_keeps_abbreviations() {
        let ds = Dataset::from_json_str(
            r##"{"data":{"name":"root","color":"#3b82f6","children":[{"name":"CNN","color":"#10b981"}]},
                "abbr":{"CNN":"Convolutional Neural Network"}}"##,
        )
        .expect("valid dataset");
        assert_eq!(ds.data.count(), 2);
        assert_eq!(ds.abbr["CNN"], "Convolutional Neural Network");
    }

    #[test]
    fn bare_node_document_is_accepted() {
        let ds = Dataset::from_json_str(r##"{"name":"root","color":"#fff"}"##).expect("bare node");
        assert_eq!(ds.data.name, "root");
        assert!(ds.abbr.is_empty());
    }

    #[test]
    fn missing_required_field_is_a_load_error() {
        let err = Dataset::from_json_str(r#"{"data":{"name":"root"}}"#).unwrap_err();
        assert!(matches!(err, Error::Load { .. }), "{err:?}");
        assert!(err.to_string().contains("color"), "{err}");
    }

    #[test]
    fn invalid_json_is_a_load_error() {
        assert!(matches!(
            Dataset::from_json_str("{not json"),
            Err(Error::Load { .. })
        ));
    }

    #[test]
    fn async_load_surfaces_fetch_failure() {
        let fetch = async {
            Err::<String, _>(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "data.json",
            ))
        };
        let err = block_on(Dataset::load(fetch)).unwrap_err();
        assert!(matches!(err, Error::Load { .. }));
    }

    #[test]
    fn async_load_parses_body() {
        let fetch = async { Ok(r##"{"name":"root","color":"#000"}"##.to_string()) };
        let ds = block_on(Dataset::load(fetch)).expect("loaded");
        assert_eq!(ds.data.color, "#000");
    }
}

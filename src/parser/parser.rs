use crate::error::{Error, Result};
use crate::parser::types::*;
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{debug, trace};

/// Folder fields other than the children, which the parser walks itself.
#[derive(Deserialize)]
struct FolderHeader {
    name: Option<String>,
    description: Option<Description>,
    auth: Option<Auth>,
}

/// Converts raw collection JSON into the tagged [`Collection`] model.
///
/// The tree shape is checked by hand so that errors carry the location of
/// the offending node; leaf records are handed to serde.
pub struct CollectionParser;

impl CollectionParser {
    pub fn parse_str(&self, json: &str) -> Result<Collection> {
        let value: Value = serde_json::from_str(json)?;
        self.parse_value(&value)
    }

    pub fn parse_value(&self, document: &Value) -> Result<Collection> {
        let root = document
            .as_object()
            .ok_or_else(|| Error::malformed("$", "expected a collection object"))?;

        let info = match root.get("info") {
            Some(info @ Value::Object(_)) => deserialize_at::<Info>(info, "$.info")?,
            Some(_) => return Err(Error::malformed("$.info", "expected an object")),
            None => return Err(Error::malformed("$.info", "missing required object")),
        };

        let auth = match root.get("auth") {
            Some(auth) => deserialize_at::<Option<Auth>>(auth, "$.auth")?,
            None => None,
        };

        let item = match root.get("item") {
            Some(items) => self.parse_nodes(items, "$.item")?,
            None => return Err(Error::malformed("$.item", "missing required array")),
        };

        debug!(
            name = info.name.as_deref().unwrap_or_default(),
            top_level_nodes = item.len(),
            "parsed collection"
        );

        Ok(Collection { info, auth, item })
    }

    fn parse_nodes(&self, items: &Value, path: &str) -> Result<Vec<Node>> {
        let items = items
            .as_array()
            .ok_or_else(|| Error::malformed(path, "expected an array of nodes"))?;

        items
            .iter()
            .enumerate()
            .map(|(index, node)| self.parse_node(node, &format!("{}[{}]", path, index)))
            .collect()
    }

    fn parse_node(&self, node: &Value, path: &str) -> Result<Node> {
        let fields = node
            .as_object()
            .ok_or_else(|| Error::malformed(path, "expected a folder or request object"))?;

        match fields.get("item") {
            // Only an array makes a folder; an empty one is still a folder
            Some(children @ Value::Array(_)) => {
                let header = deserialize_at::<FolderHeader>(node, path)?;
                let item = self.parse_nodes(children, &format!("{}.item", path))?;
                trace!(path = path, children = item.len(), "folder");
                Ok(Node::Folder(Folder {
                    name: header.name,
                    description: header.description,
                    auth: header.auth,
                    item,
                }))
            }
            None | Some(Value::Null) => {
                trace!(path = path, "request");
                Ok(Node::Request(deserialize_at::<RequestNode>(node, path)?))
            }
            Some(_) => Err(Error::malformed(
                format!("{}.item", path),
                "expected an array of nodes",
            )),
        }
    }
}

fn deserialize_at<T>(value: &Value, path: &str) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    T::deserialize(value).map_err(|e| Error::malformed(path, e.to_string()))
}

/// Parses collection JSON text.
pub fn parse_collection(json: &str) -> Result<Collection> {
    CollectionParser.parse_str(json)
}

/// Reads and parses a collection file.
pub fn load_collection(path: impl AsRef<Path>) -> Result<Collection> {
    let path = path.as_ref();
    debug!(path = %path.display(), "loading collection");
    let json = fs::read_to_string(path)?;
    parse_collection(&json)
}

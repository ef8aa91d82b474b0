use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use std::fmt;

/// Root of a parsed collection document.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection {
    pub info: Info,
    pub auth: Option<Auth>,
    pub item: Vec<Node>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Info {
    pub name: Option<String>,
    pub description: Option<Description>,
}

/// Descriptions come either as plain text or as `{ "content": .., "type": .. }`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Description {
    Text(String),
    Rich {
        #[serde(default)]
        content: String,
    },
}

impl Description {
    pub fn as_str(&self) -> &str {
        match self {
            Description::Text(text) => text.as_str(),
            Description::Rich { content } => content.as_str(),
        }
    }
}

impl From<&str> for Description {
    fn from(text: &str) -> Self {
        Description::Text(text.to_string())
    }
}

/// A tree node. The variant is decided once by the loader.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Folder(Folder),
    Request(RequestNode),
}

impl Node {
    pub fn name(&self) -> Option<&str> {
        match self {
            Node::Folder(folder) => folder.name.as_deref(),
            Node::Request(request) => request.name.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Folder {
    pub name: Option<String>,
    pub description: Option<Description>,
    pub auth: Option<Auth>,
    pub item: Vec<Node>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RequestNode {
    pub name: Option<String>,
    pub request: Option<RequestSpec>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub response: Vec<ResponseSample>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RequestSpec {
    pub method: Option<String>,
    pub url: Option<Url>,
    pub description: Option<Description>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub header: Vec<Header>,
    pub body: Option<Body>,
    pub auth: Option<Auth>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Header {
    #[serde(default)]
    pub key: String,
    #[serde(default, deserialize_with = "value_as_text")]
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "UrlRepr")]
pub struct Url {
    pub raw: Option<String>,
    pub query: Option<Vec<Param>>,
    pub variable: Option<Vec<Param>>,
}

impl From<&str> for Url {
    fn from(raw: &str) -> Self {
        Url {
            raw: Some(raw.to_string()),
            ..Default::default()
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum UrlRepr {
    Raw(String),
    Detailed {
        #[serde(default)]
        raw: Option<String>,
        #[serde(default)]
        query: Option<Vec<Param>>,
        #[serde(default)]
        variable: Option<Vec<Param>>,
    },
}

impl From<UrlRepr> for Url {
    fn from(repr: UrlRepr) -> Self {
        match repr {
            UrlRepr::Raw(raw) => Url {
                raw: Some(raw),
                query: None,
                variable: None,
            },
            UrlRepr::Detailed {
                raw,
                query,
                variable,
            } => Url {
                raw,
                query,
                variable,
            },
        }
    }
}

/// A query parameter or a path variable.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Param {
    pub key: Option<String>,
    #[serde(default, deserialize_with = "optional_value_as_text")]
    pub value: Option<String>,
    pub description: Option<Description>,
}

/// Request body, tagged by its `mode`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "BodyRepr")]
pub enum Body {
    Raw {
        language: Option<String>,
        text: Option<String>,
    },
    FormData(Vec<FormField>),
    UrlEncoded(Vec<FormField>),
    GraphQl(GraphQlBody),
    Other(String),
}

impl Body {
    pub fn mode(&self) -> &str {
        match self {
            Body::Raw { .. } => "raw",
            Body::FormData(_) => "formdata",
            Body::UrlEncoded(_) => "urlencoded",
            Body::GraphQl(_) => "graphql",
            Body::Other(mode) => mode.as_str(),
        }
    }
}

#[derive(Deserialize)]
struct BodyRepr {
    #[serde(default)]
    mode: Option<String>,
    #[serde(default)]
    raw: Option<String>,
    #[serde(default)]
    options: Option<BodyOptions>,
    #[serde(default, deserialize_with = "null_as_empty")]
    formdata: Vec<FormField>,
    #[serde(default, deserialize_with = "null_as_empty")]
    urlencoded: Vec<FormField>,
    #[serde(default)]
    graphql: Option<GraphQlBody>,
}

#[derive(Deserialize)]
struct BodyOptions {
    #[serde(default)]
    raw: Option<RawOptions>,
}

#[derive(Deserialize)]
struct RawOptions {
    #[serde(default)]
    language: Option<String>,
}

impl From<BodyRepr> for Body {
    fn from(repr: BodyRepr) -> Self {
        match repr.mode.as_deref() {
            Some("raw") => Body::Raw {
                language: repr
                    .options
                    .and_then(|options| options.raw)
                    .and_then(|raw| raw.language),
                text: repr.raw,
            },
            Some("formdata") => Body::FormData(repr.formdata),
            Some("urlencoded") => Body::UrlEncoded(repr.urlencoded),
            Some("graphql") => Body::GraphQl(repr.graphql.unwrap_or_default()),
            other => Body::Other(other.unwrap_or_default().to_string()),
        }
    }
}

/// One row of a `formdata` or `urlencoded` body.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FormField {
    #[serde(default)]
    pub key: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "optional_value_as_text")]
    pub value: Option<String>,
    #[serde(default)]
    pub src: Option<FileSource>,
}

impl FormField {
    /// Field type, `text` when the document leaves it out.
    pub fn kind(&self) -> &str {
        self.kind.as_deref().unwrap_or("text")
    }

    /// File fields show their source path; everything else shows the value
    /// with literal `\n` escape sequences removed.
    pub fn display_value(&self) -> String {
        if self.kind() == "file" {
            return self
                .src
                .as_ref()
                .map(FileSource::joined)
                .unwrap_or_default();
        }
        self.value
            .as_deref()
            .map(|value| value.replace("\\n", ""))
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FileSource {
    One(String),
    Many(Vec<String>),
}

impl FileSource {
    pub fn joined(&self) -> String {
        match self {
            FileSource::One(path) => path.clone(),
            FileSource::Many(paths) => paths.join(", "),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GraphQlBody {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub variables: Option<Value>,
}

impl GraphQlBody {
    /// Variables as text, or `None` when there is nothing worth showing.
    pub fn variables_text(&self) -> Option<String> {
        match self.variables.as_ref()? {
            Value::Null => None,
            Value::String(text) if text.trim().is_empty() => None,
            Value::String(text) => Some(text.clone()),
            other => serde_json::to_string_pretty(other).ok(),
        }
    }
}

/// Authorization settings. Parameters are read from the member named after `type`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "AuthRepr")]
pub struct Auth {
    pub kind: Option<String>,
    pub params: Option<AuthParams>,
}

impl Auth {
    pub fn is_noauth(&self) -> bool {
        self.kind.as_deref() == Some("noauth")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AuthParams {
    /// The single `{ "token": .. }` record form.
    Token(String),
    Entries(Vec<AuthEntry>),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AuthEntry {
    #[serde(default)]
    pub key: String,
    #[serde(default, deserialize_with = "value_as_text")]
    pub value: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

#[derive(Deserialize)]
struct AuthRepr {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(flatten)]
    members: Map<String, Value>,
}

impl TryFrom<AuthRepr> for Auth {
    type Error = String;

    fn try_from(repr: AuthRepr) -> Result<Self, Self::Error> {
        let members = repr.kind.as_deref().and_then(|kind| repr.members.get(kind));
        let params = match members {
            None | Some(Value::Null) => None,
            Some(Value::Object(record)) => match record.get("token") {
                Some(token) => Some(AuthParams::Token(value_text(token))),
                None => Some(AuthParams::Entries(
                    record
                        .iter()
                        .map(|(key, value)| AuthEntry {
                            key: key.clone(),
                            value: value_text(value),
                            kind: Some("string".to_string()),
                        })
                        .collect(),
                )),
            },
            Some(entries @ Value::Array(_)) => Some(AuthParams::Entries(
                serde_json::from_value(entries.clone()).map_err(|e| e.to_string())?,
            )),
            Some(other) => {
                return Err(format!(
                    "unexpected `{}` auth parameters: {}",
                    repr.kind.as_deref().unwrap_or_default(),
                    other
                ))
            }
        };

        Ok(Auth {
            kind: repr.kind,
            params,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ResponseSample {
    pub code: Option<StatusCode>,
    pub body: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum StatusCode {
    Number(u64),
    Text(String),
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusCode::Number(code) => write!(f, "{}", code),
            StatusCode::Text(code) => write!(f, "{}", code),
        }
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn value_as_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_text(&Value::deserialize(deserializer)?))
}

fn optional_value_as_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        other => Some(value_text(&other)),
    })
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

use super::{ItemRule, RequestSchema, SchemaError, SchemaItem, SchemaModel};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct SchemaDocument {
    schemas: Vec<RequestSchema>,
    #[serde(default)]
    field_aliases: BTreeMap<String, String>,
    #[serde(default)]
    tag_aliases: BTreeMap<String, String>,
}

impl SchemaModel {
    /// Loads a schema file, picking the parser from the extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, SchemaError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        let parse: fn(&str) -> Result<Self, SchemaError> = match extension.as_deref() {
            Some("json") => Self::from_json_str,
            Some("yaml") | Some("yml") => Self::from_yaml_str,
            _ => {
                return Err(SchemaError::UnsupportedFormat {
                    path: path.display().to_string(),
                })
            }
        };

        debug!(path = %path.display(), "loading request schema");
        parse(&std::fs::read_to_string(path)?)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, SchemaError> {
        let document: SchemaDocument = serde_json::from_str(raw)?;
        document.into_model()
    }

    pub fn from_yaml_str(raw: &str) -> Result<Self, SchemaError> {
        let document: SchemaDocument = serde_yaml::from_str(raw)?;
        document.into_model()
    }
}

impl SchemaDocument {
    fn into_model(self) -> Result<SchemaModel, SchemaError> {
        SchemaModel::new(self.schemas, self.field_aliases, self.tag_aliases)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

/// Tag lists may be written as a bare string when there is only one tag.
pub(super) fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(tag) => vec![tag],
        OneOrMany::Many(tags) => tags,
    })
}

// Items are written as a map keyed by tag; keep declaration order and let
// validation report duplicate keys instead of silently keeping the last one.
pub(super) fn deserialize_items<'de, D>(deserializer: D) -> Result<Vec<SchemaItem>, D::Error>
where
    D: Deserializer<'de>,
{
    struct ItemsVisitor;

    impl<'de> Visitor<'de> for ItemsVisitor {
        type Value = Vec<SchemaItem>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of request tags to item rules")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut items = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((tag, rule)) = map.next_entry::<String, ItemRule>()? {
                items.push(SchemaItem { tag, rule });
            }
            Ok(items)
        }
    }

    deserializer.deserialize_map(ItemsVisitor)
}

#[allow(clippy::ptr_arg)]
pub(super) fn serialize_items<S>(items: &Vec<SchemaItem>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(items.len()))?;
    for item in items {
        map.serialize_entry(&item.tag, &item.rule)?;
    }
    map.end()
}

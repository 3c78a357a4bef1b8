//! Declarative model of request categories and the status tags that close them.

mod export;
mod loader;
pub mod standard;

pub use export::{flat_rows, write_schema_csv, FlatSchemaRow};

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// One category of requests: the record field holding requested item tags, the
/// field holding outcome tags, and the rule for every known item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestSchema {
    pub request_field: String,
    pub status_field: String,
    #[serde(
        serialize_with = "loader::serialize_items",
        deserialize_with = "loader::deserialize_items"
    )]
    pub items: Vec<SchemaItem>,
}

impl RequestSchema {
    pub fn new(request_field: &str, status_field: &str, items: Vec<SchemaItem>) -> Self {
        Self {
            request_field: request_field.to_string(),
            status_field: status_field.to_string(),
            items,
        }
    }

    /// Exact, case-sensitive lookup of an item rule at this level.
    pub fn rule(&self, tag: &str) -> Option<&ItemRule> {
        self.items
            .iter()
            .find(|item| item.tag == tag)
            .map(|item| &item.rule)
    }

    fn validate(&self, context: &str) -> Result<(), SchemaError> {
        if self.request_field.trim().is_empty() || self.status_field.trim().is_empty() {
            return Err(SchemaError::EmptyField {
                context: context.to_string(),
            });
        }

        let mut seen = HashSet::with_capacity(self.items.len());
        for item in &self.items {
            if !seen.insert(item.tag.as_str()) {
                return Err(SchemaError::DuplicateTag {
                    field: self.request_field.clone(),
                    tag: item.tag.clone(),
                });
            }
            if item.rule.delivered.is_empty() && item.rule.timeout.is_empty() {
                return Err(SchemaError::EmptyRule {
                    field: self.request_field.clone(),
                    tag: item.tag.clone(),
                });
            }
            if let Some(nested) = &item.rule.items {
                nested.validate(&format!("item '{}'", item.tag))?;
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SchemaItem {
    pub tag: String,
    pub rule: ItemRule,
}

impl SchemaItem {
    pub fn new(tag: &str, rule: ItemRule) -> Self {
        Self {
            tag: tag.to_string(),
            rule,
        }
    }
}

/// Status tags that resolve a single requested item.
///
/// `missed` marks a failed appointment; the item stays open. `items` turns the
/// item into a category of its own whose sub-items are read from a separate
/// request field. `inherit_delivered_from_parent` lets an item nested under
/// such a category also close on the parent item's delivered tags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRule {
    #[serde(default, deserialize_with = "loader::one_or_many")]
    pub delivered: Vec<String>,
    #[serde(default, deserialize_with = "loader::one_or_many")]
    pub timeout: Vec<String>,
    #[serde(
        default,
        deserialize_with = "loader::one_or_many",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub invalid: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<RequestSchema>>,
    #[serde(default = "active_default", skip_serializing_if = "is_active")]
    pub active: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub inherit_delivered_from_parent: bool,
}

fn active_default() -> bool {
    true
}

fn is_active(active: &bool) -> bool {
    *active
}

fn is_false(flag: &bool) -> bool {
    !*flag
}

impl ItemRule {
    pub fn new(delivered: &[&str], timeout: &[&str]) -> Self {
        Self {
            delivered: to_tags(delivered),
            timeout: to_tags(timeout),
            invalid: Vec::new(),
            missed: None,
            items: None,
            active: true,
            inherit_delivered_from_parent: false,
        }
    }

    pub fn with_invalid(mut self, invalid: &[&str]) -> Self {
        self.invalid = to_tags(invalid);
        self
    }

    pub fn with_missed(mut self, missed: &str) -> Self {
        self.missed = Some(missed.to_string());
        self
    }

    pub fn with_items(mut self, schema: RequestSchema) -> Self {
        self.items = Some(Box::new(schema));
        self
    }

    pub fn historical(mut self) -> Self {
        self.active = false;
        self
    }

    pub fn inheriting_delivered(mut self) -> Self {
        self.inherit_delivered_from_parent = true;
        self
    }

    pub fn nested(&self) -> Option<&RequestSchema> {
        self.items.as_deref()
    }
}

fn to_tags(tags: &[&str]) -> Vec<String> {
    tags.iter().map(|tag| tag.to_string()).collect()
}

/// Validated, immutable set of top-level request categories plus the alias
/// tables used to rewrite legacy field names and tags on ingestion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaModel {
    schemas: Vec<RequestSchema>,
    field_aliases: BTreeMap<String, String>,
    tag_aliases: BTreeMap<String, String>,
}

impl SchemaModel {
    pub fn new(
        schemas: Vec<RequestSchema>,
        field_aliases: BTreeMap<String, String>,
        tag_aliases: BTreeMap<String, String>,
    ) -> Result<Self, SchemaError> {
        if schemas.is_empty() {
            return Err(SchemaError::NoSchemas);
        }

        for (index, schema) in schemas.iter().enumerate() {
            schema.validate(&format!("top-level schema #{}", index + 1))?;
        }

        for aliases in [&field_aliases, &tag_aliases] {
            if let Some(alias) = aliases
                .iter()
                .find(|(alias, target)| alias != target && aliases.contains_key(*target))
                .map(|(alias, _)| alias.clone())
            {
                return Err(SchemaError::AliasChain { alias });
            }
        }

        Ok(Self {
            schemas,
            field_aliases,
            tag_aliases,
        })
    }

    /// Schema model without legacy aliases, mostly useful in tests.
    pub fn from_schemas(schemas: Vec<RequestSchema>) -> Result<Self, SchemaError> {
        Self::new(schemas, BTreeMap::new(), BTreeMap::new())
    }

    pub fn schemas(&self) -> &[RequestSchema] {
        &self.schemas
    }

    pub fn field_aliases(&self) -> &BTreeMap<String, String> {
        &self.field_aliases
    }

    pub fn tag_aliases(&self) -> &BTreeMap<String, String> {
        &self.tag_aliases
    }

    pub fn canonical_field<'a>(&'a self, field: &'a str) -> &'a str {
        self.field_aliases
            .get(field)
            .map(String::as_str)
            .unwrap_or(field)
    }

    pub fn canonical_tag<'a>(&'a self, tag: &'a str) -> &'a str {
        self.tag_aliases.get(tag).map(String::as_str).unwrap_or(tag)
    }

    /// Finds a top-level item (not a nested one) by tag across all categories.
    pub fn top_level_item(&self, tag: &str) -> Option<(&RequestSchema, &ItemRule)> {
        self.schemas
            .iter()
            .find_map(|schema| schema.rule(tag).map(|rule| (schema, rule)))
    }

    /// Every item rule across every nesting level, parents before children.
    pub fn flatten(&self) -> Vec<FlatItem<'_>> {
        let mut flat = Vec::new();
        for schema in &self.schemas {
            collect_flat(schema, None, 0, &mut flat);
        }
        flat
    }

    /// Request field names reachable from the top-level schemas, deduplicated
    /// in visiting order.
    pub fn request_fields(&self) -> Vec<&str> {
        let mut fields: Vec<&str> = Vec::new();
        for schema in &self.schemas {
            collect_fields(schema, &mut fields);
        }
        fields
    }
}

/// Borrowed view of one item rule with the schemas it sits in.
#[derive(Debug, Clone, Copy)]
pub struct FlatItem<'a> {
    pub schema: &'a RequestSchema,
    pub parent: Option<&'a RequestSchema>,
    pub depth: usize,
    pub tag: &'a str,
    pub rule: &'a ItemRule,
}

fn collect_flat<'a>(
    schema: &'a RequestSchema,
    parent: Option<&'a RequestSchema>,
    depth: usize,
    flat: &mut Vec<FlatItem<'a>>,
) {
    for item in &schema.items {
        flat.push(FlatItem {
            schema,
            parent,
            depth,
            tag: &item.tag,
            rule: &item.rule,
        });
        if let Some(nested) = item.rule.nested() {
            collect_flat(nested, Some(schema), depth + 1, flat);
        }
    }
}

fn collect_fields<'a>(schema: &'a RequestSchema, fields: &mut Vec<&'a str>) {
    if !fields.contains(&schema.request_field.as_str()) {
        fields.push(&schema.request_field);
    }
    for item in &schema.items {
        if let Some(nested) = item.rule.nested() {
            collect_fields(nested, fields);
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("schema declares no request categories")]
    NoSchemas,
    #[error("{context} has an empty request or status field name")]
    EmptyField { context: String },
    #[error("item '{tag}' in '{field}' declares neither delivered nor timeout tags")]
    EmptyRule { field: String, tag: String },
    #[error("item '{tag}' appears more than once in '{field}'")]
    DuplicateTag { field: String, tag: String },
    #[error("alias '{alias}' resolves to another alias")]
    AliasChain { alias: String },
    #[error("unsupported schema format for {path}; expected .json, .yaml, or .yml")]
    UnsupportedFormat { path: String },
    #[error("failed to read schema file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON schema: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid YAML schema: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kitchen() -> RequestSchema {
        RequestSchema::new(
            "Kitchen Items",
            "Goods Status",
            vec![
                SchemaItem::new("Microwave", ItemRule::new(&["Microwave Delivered"], &[])),
                SchemaItem::new("Plates", ItemRule::new(&[], &["Plates Timeout"])),
            ],
        )
    }

    fn goods() -> RequestSchema {
        RequestSchema::new(
            "Goods Requests",
            "Goods Status",
            vec![
                SchemaItem::new(
                    "Kitchen",
                    ItemRule::new(&["Kitchen Delivered"], &["Kitchen Timeout"])
                        .with_items(kitchen()),
                ),
                SchemaItem::new("Soap", ItemRule::new(&["Soap Delivered"], &["Soap Timeout"])),
            ],
        )
    }

    #[test]
    fn lookup_is_exact_and_case_sensitive() {
        let schema = goods();
        assert!(schema.rule("Soap").is_some());
        assert!(schema.rule("soap").is_none());
        assert!(schema.rule("Soap ").is_none());
        assert!(schema.rule("Microwave").is_none(), "nested tags live one level down");
    }

    #[test]
    fn rejects_rules_without_delivered_or_timeout_tags() {
        let mut schema = goods();
        schema
            .items
            .push(SchemaItem::new("Stroller", ItemRule::new(&[], &[])));

        match SchemaModel::from_schemas(vec![schema]) {
            Err(SchemaError::EmptyRule { field, tag }) => {
                assert_eq!(field, "Goods Requests");
                assert_eq!(tag, "Stroller");
            }
            other => panic!("expected empty rule error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_malformed_nested_rules() {
        let mut nested = kitchen();
        nested.items.push(SchemaItem::new("Cups", ItemRule::new(&[], &[])));
        let schema = RequestSchema::new(
            "Goods Requests",
            "Goods Status",
            vec![SchemaItem::new(
                "Kitchen",
                ItemRule::new(&["Kitchen Delivered"], &[]).with_items(nested),
            )],
        );

        assert!(matches!(
            SchemaModel::from_schemas(vec![schema]),
            Err(SchemaError::EmptyRule { .. })
        ));
    }

    #[test]
    fn rejects_duplicate_tags_within_a_level() {
        let mut schema = goods();
        schema.items.push(SchemaItem::new(
            "Soap",
            ItemRule::new(&["Soap Delivered"], &[]),
        ));

        assert!(matches!(
            SchemaModel::from_schemas(vec![schema]),
            Err(SchemaError::DuplicateTag { .. })
        ));
    }

    #[test]
    fn rejects_empty_model_and_alias_chains() {
        assert!(matches!(
            SchemaModel::from_schemas(Vec::new()),
            Err(SchemaError::NoSchemas)
        ));

        let mut tags = BTreeMap::new();
        tags.insert("old".to_string(), "older".to_string());
        tags.insert("older".to_string(), "Soap".to_string());
        assert!(matches!(
            SchemaModel::new(vec![goods()], BTreeMap::new(), tags),
            Err(SchemaError::AliasChain { .. })
        ));
    }

    #[test]
    fn flatten_walks_every_level_parents_first() {
        let model = SchemaModel::from_schemas(vec![goods()]).expect("valid schema");
        let flat = model.flatten();

        let tags: Vec<&str> = flat.iter().map(|item| item.tag).collect();
        assert_eq!(tags, vec!["Kitchen", "Microwave", "Plates", "Soap"]);

        let microwave = flat
            .iter()
            .find(|item| item.tag == "Microwave")
            .expect("nested item present");
        assert_eq!(microwave.depth, 1);
        assert_eq!(microwave.schema.request_field, "Kitchen Items");
        assert_eq!(
            microwave.parent.map(|parent| parent.request_field.as_str()),
            Some("Goods Requests")
        );
        assert_eq!(model.request_fields(), vec!["Goods Requests", "Kitchen Items"]);
    }

    #[test]
    fn canonical_lookups_fall_back_to_input() {
        let mut fields = BTreeMap::new();
        fields.insert("Which Kitchen".to_string(), "Kitchen Items".to_string());
        let mut tags = BTreeMap::new();
        tags.insert("Jabon".to_string(), "Soap".to_string());
        let model = SchemaModel::new(vec![goods()], fields, tags).expect("valid schema");

        assert_eq!(model.canonical_field("Which Kitchen"), "Kitchen Items");
        assert_eq!(model.canonical_field("Goods Status"), "Goods Status");
        assert_eq!(model.canonical_tag("Jabon"), "Soap");
        assert_eq!(model.canonical_tag("Kitchen"), "Kitchen");
        assert!(model.top_level_item("Soap").is_some());
        assert!(model.top_level_item("Microwave").is_none());
    }
}

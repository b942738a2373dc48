//! JSON-LD structured data validation.
//!
//! Every `<script type="application/ld+json">` block is parsed with
//! `serde_json`. A block that is empty or does not parse is recorded as
//! invalid and the rest of the page is still validated. Parsed blocks are
//! expanded into entities (a top-level array or an `@graph` yields several)
//! and each entity is checked for `@context`, `@type`, and the required
//! properties of its type.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::dom::{self, Document};

const JSON_LD_SELECTOR: &str = r#"script[type="application/ld+json"]"#;

/// One validated schema entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaEntity {
    /// `@type` values as written.
    pub types: Vec<String>,
    /// Has `@context` and `@type`.
    pub valid: bool,
    /// Required properties that are missing or empty.
    pub missing_properties: Vec<String>,
    /// Why the entity or its block is invalid.
    pub problem: Option<String>,
}

/// A `@type` declared by more than one valid entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaConflict {
    /// The duplicated type.
    pub schema_type: String,
    /// How many entities declare it.
    pub count: usize,
}

/// Validation result for all JSON-LD on the page.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StructuredDataReport {
    /// Number of JSON-LD script blocks, valid or not.
    pub block_count: usize,
    /// Entities in document order.
    pub entities: Vec<SchemaEntity>,
    /// Syntax and shape errors.
    pub errors: Vec<String>,
    /// Missing required properties.
    pub warnings: Vec<String>,
    /// Duplicated types.
    pub conflicts: Vec<SchemaConflict>,
}

impl StructuredDataReport {
    /// At least one JSON-LD block exists.
    #[must_use]
    pub fn has_schema(&self) -> bool {
        self.block_count > 0
    }

    /// Number of valid entities.
    #[must_use]
    pub fn valid_count(&self) -> usize {
        self.entities.iter().filter(|e| e.valid).count()
    }

    /// Whether a valid entity declares `schema_type` (case-insensitive).
    #[must_use]
    pub fn has_type(&self, schema_type: &str) -> bool {
        self.entities
            .iter()
            .filter(|e| e.valid)
            .flat_map(|e| &e.types)
            .any(|t| t.eq_ignore_ascii_case(schema_type))
    }

    /// Validation score out of 10: 5 for having valid schema, 2 without
    /// errors, 2 without warnings, 1 without conflicts. `0` when nothing is
    /// valid.
    #[must_use]
    pub fn validation_score(&self) -> u8 {
        if self.valid_count() == 0 {
            return 0;
        }
        let no_errors = if self.errors.is_empty() { 2 } else { 0 };
        let no_warnings = if self.warnings.is_empty() { 2 } else { 0 };
        5 + no_errors + no_warnings + u8::from(self.conflicts.is_empty())
    }
}

/// Required properties by schema type.
fn required_properties(schema_type: &str) -> &'static [&'static str] {
    match schema_type {
        "Article" | "BlogPosting" | "NewsArticle" => &["headline", "author", "datePublished"],
        "Product" => &["name", "description"],
        "Organization" | "WebSite" => &["name", "url"],
        "BreadcrumbList" => &["itemListElement"],
        "FAQPage" => &["mainEntity"],
        "HowTo" => &["name", "step"],
        "Recipe" => &["name", "recipeIngredient"],
        "Review" => &["itemReviewed", "reviewBody", "author"],
        "VideoObject" => &["name", "description", "thumbnailUrl"],
        "LocalBusiness" => &["name", "address"],
        "Person" => &["name"],
        _ => &["name", "description"],
    }
}

/// Parse every JSON-LD block, skipping empty and malformed ones.
#[must_use]
pub fn parse_blocks(page: &Document) -> Vec<Value> {
    page.select(JSON_LD_SELECTOR)
        .iter()
        .filter_map(|script| serde_json::from_str(dom::text_content(&script).trim()).ok())
        .collect()
}

/// Expand a parsed block into its entities, carrying `@context` down into
/// arrays and `@graph` members.
pub(crate) fn entities(block: &Value) -> Vec<(Option<&Value>, &Map<String, Value>)> {
    let mut found = Vec::new();
    expand(block, None, &mut found);
    found
}

fn expand<'a>(
    value: &'a Value,
    context: Option<&'a Value>,
    found: &mut Vec<(Option<&'a Value>, &'a Map<String, Value>)>,
) {
    match value {
        Value::Array(items) => {
            for item in items {
                expand(item, context, found);
            }
        }
        Value::Object(map) => {
            let context = map.get("@context").or(context);
            match map.get("@graph") {
                Some(graph @ Value::Array(_)) if !map.contains_key("@type") => {
                    expand(graph, context, found);
                }
                _ => found.push((context, map)),
            }
        }
        _ => {}
    }
}

/// `@type` values of an entity.
pub(crate) fn schema_types(entity: &Map<String, Value>) -> Vec<String> {
    match entity.get("@type") {
        Some(Value::String(t)) => vec![t.clone()],
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

/// Whether a JSON value counts as present: not null, false, zero, or an
/// empty string.
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[must_use]
pub fn collect(page: &Document) -> StructuredDataReport {
    let mut report = StructuredDataReport::default();
    let mut type_counts: BTreeMap<String, usize> = BTreeMap::new();

    for script in page.select(JSON_LD_SELECTOR).iter() {
        report.block_count += 1;
        let text = dom::text_content(&script);
        let text = text.trim();

        if text.is_empty() {
            report.entities.push(invalid("Empty schema block"));
            continue;
        }

        let block: Value = match serde_json::from_str(text) {
            Ok(block) => block,
            Err(e) => {
                report.errors.push(format!("Invalid JSON syntax: {e}"));
                report.entities.push(invalid("Invalid JSON syntax"));
                continue;
            }
        };

        let found = entities(&block);
        if found.is_empty() {
            report.errors.push("Schema block contains no objects".to_string());
            report.entities.push(invalid("No schema objects"));
        }

        for (context, entity) in found {
            let types = schema_types(entity);
            let mut problems = Vec::new();
            if context.is_none_or(|c| !is_present(c)) {
                problems.push("Missing @context");
            }
            if types.is_empty() {
                problems.push("Missing @type");
            }

            if !problems.is_empty() {
                report.errors.extend(problems.iter().map(ToString::to_string));
                report.entities.push(SchemaEntity {
                    types,
                    ..invalid(&problems.join(", "))
                });
                continue;
            }

            let primary = types[0].as_str();
            let missing: Vec<String> = required_properties(primary)
                .iter()
                .filter(|prop| {
                    let present = entity.get(**prop).is_some_and(is_present)
                        || entity.get(&prop.to_lowercase()).is_some_and(is_present);
                    !present
                })
                .map(|prop| (*prop).to_string())
                .collect();

            if !missing.is_empty() {
                report
                    .warnings
                    .push(format!("{primary}: missing {}", missing.join(", ")));
            }

            *type_counts.entry(types.join(",")).or_default() += 1;
            report.entities.push(SchemaEntity {
                types,
                valid: true,
                missing_properties: missing,
                problem: None,
            });
        }
    }

    report.conflicts = type_counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(schema_type, count)| SchemaConflict { schema_type, count })
        .collect();

    report
}

fn invalid(problem: &str) -> SchemaEntity {
    SchemaEntity {
        types: Vec::new(),
        valid: false,
        missing_properties: Vec::new(),
        problem: Some(problem.to_string()),
    }
}

//! Wire schema for the structured reply.
//!
//! The JSON Schema is derived from [`AnalysisResult`] and rewritten into the
//! OpenAPI subset the generative backend accepts as `responseSchema`.

use once_cell::sync::Lazy;
use schemars::generate::SchemaSettings;
use serde_json::{Map, Value};

use crate::analysis::AnalysisResult;

static RESPONSE_SCHEMA: Lazy<Value> = Lazy::new(|| {
    let generator = SchemaSettings::draft07()
        .with(|settings| settings.inline_subschemas = true)
        .into_generator();
    let root = generator.into_root_schema_for::<AnalysisResult>();
    let value = serde_json::to_value(&root).expect("derived schema is serializable");
    to_wire_schema(&value)
});

pub fn response_schema() -> &'static Value {
    &RESPONSE_SCHEMA
}

/// Rewrites a JSON Schema node into the backend dialect.
///
/// Only `type`, `properties`, `items` and `required` survive. A nullable
/// union (`["string", "null"]` or `anyOf` with a null arm) collapses to its
/// non-null arm.
pub fn to_wire_schema(node: &Value) -> Value {
    let Some(object) = node.as_object() else {
        return Value::Object(Map::new());
    };
    if let Some(inner) = single_non_null_arm(object) {
        return to_wire_schema(inner);
    }

    let mut out = Map::new();
    if let Some(type_name) = resolve_type(object) {
        out.insert("type".to_string(), Value::String(type_name.to_string()));
    }
    if let Some(properties) = object.get("properties").and_then(Value::as_object) {
        let converted = properties
            .iter()
            .map(|(name, schema)| (name.clone(), to_wire_schema(schema)))
            .collect::<Map<_, _>>();
        out.insert("properties".to_string(), Value::Object(converted));
    }
    if let Some(required) = object.get("required").and_then(Value::as_array) {
        out.insert("required".to_string(), Value::Array(required.clone()));
    }
    if let Some(items) = object.get("items") {
        out.insert("items".to_string(), to_wire_schema(items));
    }
    Value::Object(out)
}

fn resolve_type(object: &Map<String, Value>) -> Option<&'static str> {
    match object.get("type") {
        Some(Value::String(name)) => wire_type(name),
        Some(Value::Array(names)) => names
            .iter()
            .filter_map(Value::as_str)
            .find(|n| *n != "null")
            .and_then(wire_type),
        _ => None,
    }
}

fn wire_type(json_type: &str) -> Option<&'static str> {
    match json_type {
        "object" => Some("OBJECT"),
        "array" => Some("ARRAY"),
        "string" => Some("STRING"),
        "number" => Some("NUMBER"),
        "integer" => Some("INTEGER"),
        "boolean" => Some("BOOLEAN"),
        _ => None,
    }
}

fn union_arms(object: &Map<String, Value>) -> Option<&Vec<Value>> {
    object
        .get("anyOf")
        .or_else(|| object.get("oneOf"))
        .or_else(|| object.get("allOf"))
        .and_then(Value::as_array)
}

fn single_non_null_arm(object: &Map<String, Value>) -> Option<&Value> {
    let arms = union_arms(object)?;
    let mut non_null = arms.iter().filter(|arm| !is_null_schema(arm));
    let first = non_null.next()?;
    if non_null.next().is_some() {
        return None;
    }
    Some(first)
}

fn is_null_schema(node: &Value) -> bool {
    node.get("type").and_then(Value::as_str) == Some("null")
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use serde_json::{json, Value};

    use super::{response_schema, to_wire_schema};
    use crate::analysis::AnalysisResult;

    fn required_set(node: &Value) -> BTreeSet<String> {
        node["required"]
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    #[test]
    fn root_requires_every_top_level_field() {
        let schema = response_schema();
        assert_eq!(schema["type"], "OBJECT");
        let expected = AnalysisResult::FIELD_NAMES
            .iter()
            .map(|s| s.to_string())
            .collect::<BTreeSet<_>>();
        assert_eq!(required_set(schema), expected);
        let properties = schema["properties"].as_object().expect("properties");
        assert_eq!(properties.len(), expected.len());
    }

    #[test]
    fn nested_shapes_match_the_data_model() {
        let schema = response_schema();
        let comparison = &schema["properties"]["frameworkComparisons"];
        assert_eq!(comparison["type"], "ARRAY");
        assert_eq!(comparison["items"]["type"], "OBJECT");
        let framework = &comparison["items"]["properties"]["framework1"];
        assert_eq!(framework["properties"]["techStack"]["type"], "ARRAY");
        assert_eq!(framework["properties"]["techStack"]["items"]["type"], "STRING");

        let storage = &schema["properties"]["saasArchitecture"]["properties"]["dataStorage"];
        assert_eq!(
            required_set(storage),
            ["strategy", "technologies"]
                .iter()
                .map(|s| s.to_string())
                .collect()
        );
    }

    #[test]
    fn likelihood_is_advertised_as_number() {
        let schema = response_schema();
        let likelihood =
            &schema["properties"]["simulationResults"]["items"]["properties"]["likelihood"];
        assert_eq!(likelihood["type"], "NUMBER");
    }

    #[test]
    fn script_outlines_require_optimizations() {
        let schema = response_schema();
        for name in [
            "processMiningScriptOutline",
            "predictiveAnalyticsProcessScriptOutline",
            "predictiveAnalyticsMarketScriptOutline",
        ] {
            let outline = &schema["properties"][name];
            let expected = [
                "name",
                "description",
                "keyFunctions",
                "inputOutput",
                "dependencies",
                "potentialOptimizations",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect::<BTreeSet<_>>();
            assert_eq!(required_set(outline), expected, "{name}");
            assert_eq!(
                outline["properties"]["potentialOptimizations"],
                json!({"type": "ARRAY", "items": {"type": "STRING"}})
            );
        }
    }

    #[test]
    fn brand_reaction_is_an_optional_plain_string() {
        let schema = response_schema();
        let dialogue = &schema["properties"]["brandComparisonSimulation"]["properties"]
            ["dialogueLog"]["items"];
        let required = required_set(dialogue);
        assert!(required.contains("participantName"));
        assert!(!required.contains("brandReactedTo"));
        assert_eq!(
            dialogue["properties"]["brandReactedTo"],
            json!({"type": "STRING"})
        );
    }

    #[test]
    fn hat_is_a_plain_string() {
        let schema = response_schema();
        let hat = &schema["properties"]["sixHatExercise"]["items"]["properties"]["hat"];
        assert_eq!(hat, &json!({"type": "STRING"}));
    }

    #[test]
    fn no_descriptions_reach_the_wire() {
        let text = serde_json::to_string(response_schema()).expect("serialize schema");
        assert!(!text.contains("\"description\":\""));
        assert!(!text.contains("\"enum\""));
        assert!(!text.contains("\"nullable\""));
    }

    #[test]
    fn collapses_nullable_unions() {
        let converted = to_wire_schema(&json!({
            "type": ["string", "null"],
            "enum": ["Vertical AI", "Vert", null]
        }));
        assert_eq!(converted, json!({"type": "STRING"}));

        let converted = to_wire_schema(&json!({
            "description": "Brand reacted to",
            "anyOf": [{"type": "string", "enum": ["Vert"]}, {"type": "null"}]
        }));
        assert_eq!(converted, json!({"type": "STRING"}));
    }

    #[test]
    fn drops_keywords_outside_the_dialect() {
        let converted = to_wire_schema(&json!({
            "$schema": "http://json-schema.org/draft-07/schema#",
            "title": "Thing",
            "description": "A thing",
            "type": "integer",
            "format": "uint8",
            "minimum": 0
        }));
        assert_eq!(converted, json!({"type": "INTEGER"}));
    }
}

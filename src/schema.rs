//! Structural validation of JSON instances against a [`RootSchema`].
//!
//! Unlike deserialization, validation does not stop at the first problem:
//! every missing property and every type mismatch is reported.

use schemars::schema::{InstanceType, RootSchema, Schema, SchemaObject, SingleOrVec};
use serde_json::Value;

const DEFINITIONS_PREFIX: &str = "#/definitions/";

/// Validates `instance` against `root` and returns every violation found.
///
/// An empty result means the instance conforms to the schema.
pub fn validate_instance(root: &RootSchema, instance: &Value) -> Vec<String> {
    let mut errors = Vec::new();

    validate_schema_object(root, &root.schema, instance, "instance", &mut errors);

    errors
}

fn validate_schema_object(
    root: &RootSchema,
    schema: &SchemaObject,
    value: &Value,
    path: &str,
    errors: &mut Vec<String>,
) {
    if let Some(reference) = &schema.reference {
        match resolve_reference(root, reference) {
            Some(Schema::Object(referenced)) => {
                validate_schema_object(root, referenced, value, path, errors)
            }
            Some(Schema::Bool(false)) => errors.push(format!("{path} is not allowed")),
            Some(Schema::Bool(true)) => {}
            None => tracing::warn!(%reference, "Unresolvable schema reference"),
        }

        return;
    }

    if let Some(instance_type) = &schema.instance_type {
        if !matches_instance_type(instance_type, value) {
            errors.push(format!(
                "{path} is not of a type(s) {}",
                instance_type_names(instance_type)
            ));

            return;
        }
    }

    let (Some(object), Value::Object(map)) = (&schema.object, value) else {
        return;
    };

    for required in &object.required {
        if !map.contains_key(required) {
            errors.push(format!("{path} requires property \"{required}\""));
        }
    }

    for (name, property) in &object.properties {
        let Some(value) = map.get(name) else {
            continue;
        };

        let property_path = format!("{path}.{name}");

        match property {
            Schema::Object(property) => {
                validate_schema_object(root, property, value, &property_path, errors)
            }
            Schema::Bool(false) => errors.push(format!("{property_path} is not allowed")),
            Schema::Bool(true) => {}
        }
    }
}

fn resolve_reference<'a>(root: &'a RootSchema, reference: &str) -> Option<&'a Schema> {
    let name = reference.strip_prefix(DEFINITIONS_PREFIX)?;

    root.definitions.get(name)
}

fn matches_instance_type(instance_type: &SingleOrVec<InstanceType>, value: &Value) -> bool {
    match instance_type {
        SingleOrVec::Single(single) => matches_single_type(single, value),
        SingleOrVec::Vec(types) => types.iter().any(|single| matches_single_type(single, value)),
    }
}

fn matches_single_type(instance_type: &InstanceType, value: &Value) -> bool {
    match instance_type {
        InstanceType::Null => value.is_null(),
        InstanceType::Boolean => value.is_boolean(),
        InstanceType::Object => value.is_object(),
        InstanceType::Array => value.is_array(),
        InstanceType::Number => value.is_number(),
        InstanceType::String => value.is_string(),
        InstanceType::Integer => value.is_i64() || value.is_u64(),
    }
}

fn instance_type_names(instance_type: &SingleOrVec<InstanceType>) -> String {
    match instance_type {
        SingleOrVec::Single(single) => instance_type_name(single).to_string(),
        SingleOrVec::Vec(types) => types
            .iter()
            .map(instance_type_name)
            .collect::<Vec<_>>()
            .join(","),
    }
}

fn instance_type_name(instance_type: &InstanceType) -> &'static str {
    match instance_type {
        InstanceType::Null => "null",
        InstanceType::Boolean => "boolean",
        InstanceType::Object => "object",
        InstanceType::Array => "array",
        InstanceType::Number => "number",
        InstanceType::String => "string",
        InstanceType::Integer => "integer",
    }
}

//! Field schemas, required-field validation and allow-list extraction

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::{Map, Value};

/// Per-field descriptor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct FieldSpec {
    /// The key must be present (any value, including `null`)
    #[serde(default)]
    pub required: bool,
}

impl FieldSpec {
    pub const REQUIRED: Self = Self { required: true };
    pub const OPTIONAL: Self = Self { required: false };
}

/// Declarative mapping from field name to [`FieldSpec`].
///
/// Field names are unique; declaring a name twice keeps the first position
/// and the last descriptor. Iteration follows declaration order.
///
/// # Example
/// ```
/// use bizdir_core::Schema;
/// use serde_json::json;
///
/// let schema = Schema::new().required("a").optional("b");
///
/// assert!(schema.validate(&json!({ "a": 1, "c": 3 })));
/// assert_eq!(schema.extract(&json!({ "a": 1, "c": 3 })), json!({ "a": 1 }).as_object().cloned().unwrap());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "BTreeMap<String, FieldSpec>")]
pub struct Schema {
    fields: Vec<(Cow<'static, str>, FieldSpec)>,
}

impl Schema {
    /// Empty schema: validates every object, extracts nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a field, replacing the descriptor of an existing one.
    pub fn field(mut self, name: impl Into<Cow<'static, str>>, spec: FieldSpec) -> Self {
        let name = name.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, existing)) => *existing = spec,
            None => self.fields.push((name, spec)),
        }
        self
    }

    /// Declare a required field.
    pub fn required(self, name: impl Into<Cow<'static, str>>) -> Self {
        self.field(name, FieldSpec::REQUIRED)
    }

    /// Declare an optional field.
    pub fn optional(self, name: impl Into<Cow<'static, str>>) -> Self {
        self.field(name, FieldSpec::OPTIONAL)
    }

    /// Look up the descriptor for a field.
    pub fn get(&self, name: &str) -> Option<FieldSpec> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, spec)| *spec)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// All declared fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, FieldSpec)> + '_ {
        self.fields.iter().map(|(name, spec)| (name.as_ref(), *spec))
    }

    /// All declared field names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.fields.iter().map(|(name, _)| name.as_ref())
    }

    /// Names of the fields whose key must be present.
    pub fn required_fields(&self) -> impl Iterator<Item = &str> + '_ {
        self.fields()
            .filter(|(_, spec)| spec.required)
            .map(|(name, _)| name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Required fields absent from `candidate`, in declaration order.
    ///
    /// Presence is by key only: `null`, `false`, `0` and `""` all count.
    pub fn missing_fields(&self, candidate: &Map<String, Value>) -> Vec<&str> {
        self.required_fields()
            .filter(|name| !candidate.contains_key(*name))
            .collect()
    }

    /// True when `candidate` is an object holding every required key.
    ///
    /// Non-objects (null, scalars, arrays) never validate. Undeclared keys
    /// are ignored.
    pub fn validate(&self, candidate: &Value) -> bool {
        match candidate.as_object() {
            Some(object) => self.required_fields().all(|name| object.contains_key(name)),
            None => false,
        }
    }

    /// Copy the declared keys present in `candidate` into a new object.
    ///
    /// Declared-but-absent keys are omitted rather than set to null, and
    /// undeclared keys are dropped. A non-object candidate is treated as an
    /// empty object and yields an empty result.
    pub fn extract(&self, candidate: &Value) -> Map<String, Value> {
        let Some(object) = candidate.as_object() else {
            return Map::new();
        };

        self.names()
            .filter_map(|name| {
                object
                    .get(name)
                    .map(|value| (name.to_owned(), value.clone()))
            })
            .collect()
    }
}

impl<K> FromIterator<(K, FieldSpec)> for Schema
where
    K: Into<Cow<'static, str>>,
{
    fn from_iter<I: IntoIterator<Item = (K, FieldSpec)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |schema, (name, spec)| schema.field(name, spec))
    }
}

/// Deserialized schemas are ordered by field name.
impl From<BTreeMap<String, FieldSpec>> for Schema {
    fn from(fields: BTreeMap<String, FieldSpec>) -> Self {
        fields.into_iter().collect()
    }
}

/// Free-function form of [`Schema::validate`].
pub fn validate_against_schema(candidate: &Value, schema: &Schema) -> bool {
    schema.validate(candidate)
}

/// Free-function form of [`Schema::extract`].
pub fn extract_valid_fields(candidate: &Value, schema: &Schema) -> Map<String, Value> {
    schema.extract(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    fn a_req_b_opt() -> Schema {
        Schema::new().required("a").optional("b")
    }

    #[test]
    fn accepts_required_present_and_ignores_extras() {
        let candidate = json!({ "a": 1, "c": 3 });
        assert!(validate_against_schema(&candidate, &a_req_b_opt()));
        assert_eq!(
            extract_valid_fields(&candidate, &a_req_b_opt()),
            object(json!({ "a": 1 }))
        );
    }

    #[test]
    fn rejects_missing_required() {
        let schema = Schema::new().required("a");
        assert!(!schema.validate(&json!({ "b": 2 })));
    }

    #[test]
    fn rejects_non_objects() {
        let schema = Schema::new().required("a");
        for candidate in [json!(null), json!([1, 2]), json!(42), json!("a"), json!(true)] {
            assert!(!schema.validate(&candidate), "{candidate} validated");
        }
    }

    #[test]
    fn presence_not_truthiness() {
        let schema = Schema::new().required("a").required("b").required("c").required("d");
        let candidate = json!({ "a": null, "b": false, "c": 0, "d": "" });
        assert!(schema.validate(&candidate));
    }

    #[test]
    fn no_required_fields_accepts_empty_object() {
        let schema = Schema::new().optional("website");
        assert!(schema.validate(&json!({})));
        assert!(Schema::new().validate(&json!({})));
    }

    #[test]
    fn empty_schema_extracts_nothing() {
        let extracted = Schema::new().extract(&json!({ "a": 1, "b": 2 }));
        assert!(extracted.is_empty());
    }

    #[test]
    fn absent_optional_is_omitted_not_null() {
        let extracted = a_req_b_opt().extract(&json!({ "a": "x" }));
        assert!(!extracted.contains_key("b"));
    }

    #[test]
    fn null_values_are_copied() {
        let extracted = a_req_b_opt().extract(&json!({ "a": null, "b": [1] }));
        assert_eq!(extracted, object(json!({ "a": null, "b": [1] })));
    }

    #[test]
    fn extract_from_non_object_is_empty() {
        assert!(a_req_b_opt().extract(&json!(null)).is_empty());
        assert!(a_req_b_opt().extract(&json!([{ "a": 1 }])).is_empty());
    }

    #[test]
    fn missing_fields_in_declaration_order() {
        let schema = Schema::new()
            .required("name")
            .optional("website")
            .required("city")
            .required("zip");
        let missing = schema.missing_fields(&object(json!({ "city": "Corvallis" })));
        assert_eq!(missing, vec!["name", "zip"]);
    }

    #[test]
    fn redeclaring_replaces_descriptor() {
        let schema = Schema::new().required("a").optional("b").optional("a");
        assert_eq!(schema.len(), 2);
        assert_eq!(schema.get("a"), Some(FieldSpec::OPTIONAL));
        assert_eq!(schema.names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert!(schema.validate(&json!({})));
    }

    #[test]
    fn deserializes_from_descriptor_map() {
        let schema: Schema = serde_json::from_value(json!({
            "userid": { "required": true },
            "caption": { "required": false },
            "tag": {}
        }))
        .unwrap();

        assert_eq!(schema.get("userid"), Some(FieldSpec::REQUIRED));
        assert_eq!(schema.get("caption"), Some(FieldSpec::OPTIONAL));
        assert_eq!(schema.get("tag"), Some(FieldSpec::OPTIONAL));
        assert_eq!(schema.required_fields().collect::<Vec<_>>(), vec!["userid"]);
    }

    #[test]
    fn collects_from_pairs() {
        let schema: Schema = [("a", FieldSpec::REQUIRED), ("b", FieldSpec::OPTIONAL)]
            .into_iter()
            .collect();
        assert_eq!(schema, a_req_b_opt());
    }
}

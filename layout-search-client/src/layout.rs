use chrono::{DateTime, Utc};
use getset::{CopyGetters, Getters, Setters};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Publication metadata of a shared layout, as served under `layout_meta`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, Getters, CopyGetters, Setters)]
#[serde(default)]
pub struct LayoutMeta {
    #[serde(deserialize_with = "null_default")]
    #[getset(get = "pub", set = "pub")]
    uuid: String,
    /// Unix timestamp in seconds
    #[serde(deserialize_with = "null_default")]
    #[getset(get_copy = "pub", set = "pub")]
    date: i64,
    #[serde(deserialize_with = "null_default")]
    #[getset(get = "pub", set = "pub")]
    creator: String,
    #[serde(deserialize_with = "null_default")]
    #[getset(get = "pub", set = "pub")]
    parent_uuid: String,
    #[serde(deserialize_with = "null_default")]
    #[getset(get = "pub", set = "pub")]
    firmware_api_version: String,
    #[serde(deserialize_with = "null_default")]
    #[getset(get = "pub", set = "pub")]
    title: String,
    #[serde(deserialize_with = "null_default")]
    #[getset(get = "pub", set = "pub")]
    notes: String,
    #[serde(deserialize_with = "null_default")]
    #[getset(get = "pub", set = "pub")]
    tags: Vec<String>,
    #[serde(deserialize_with = "null_default")]
    #[getset(get_copy = "pub", set = "pub")]
    unlisted: bool,
    #[serde(deserialize_with = "null_default")]
    #[getset(get_copy = "pub", set = "pub")]
    deleted: bool,
    #[serde(deserialize_with = "null_default")]
    #[getset(get_copy = "pub", set = "pub")]
    compiled: bool,
    #[serde(deserialize_with = "null_default")]
    #[getset(get_copy = "pub", set = "pub")]
    searchable: bool,
}

impl LayoutMeta {
    pub fn new(uuid: impl Into<String>, title: impl Into<String>, creator: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            title: title.into(),
            creator: creator.into(),
            ..Default::default()
        }
    }
}

/// One shared keyboard layout. `config` and `compiler_input` are not
/// interpreted and round-trip through the cache as-is.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, Getters, Setters)]
#[getset(get = "pub", set = "pub")]
pub struct LayoutRecord {
    #[serde(rename = "layout_meta", default, deserialize_with = "null_default")]
    meta: LayoutMeta,
    #[serde(default)]
    config: Value,
    #[serde(default)]
    compiler_input: Value,
}

impl LayoutRecord {
    pub fn new(meta: LayoutMeta) -> Self {
        Self {
            meta,
            ..Default::default()
        }
    }

    pub fn id(&self) -> &str {
        &self.meta.uuid
    }

    pub fn title(&self) -> &str {
        &self.meta.title
    }

    pub fn creator(&self) -> &str {
        &self.meta.creator
    }

    pub fn notes(&self) -> &str {
        &self.meta.notes
    }

    /// Publication time, `None` if the timestamp is out of range.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.meta.date, 0)
    }

    pub fn semantic_key(&self) -> SemanticKey {
        SemanticKey {
            title: self.meta.title.clone(),
            creator: self.meta.creator.clone(),
        }
    }
}

/// The service sends `null` for unset fields; read those as the empty value.
fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Two layouts with the same title by the same creator are treated as the
/// same layout, whatever their ids.
#[derive(Hash, Eq, PartialEq, Clone, Debug)]
pub struct SemanticKey {
    pub title: String,
    pub creator: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_service_document() {
        let body = json!({
            "layout_meta": {
                "uuid": "5b2c1f0e",
                "date": 1136214245,
                "creator": "Alice",
                "parent_uuid": "",
                "firmware_api_version": "v25.05",
                "title": "Colemak-DH",
                "notes": "home row mods",
                "tags": ["colemak", "hrm"],
                "unlisted": false,
                "deleted": false,
                "compiled": true,
                "searchable": true
            },
            "config": {"layer_names": ["Base", "Lower"]},
            "compiler_input": null
        });

        let record: LayoutRecord = serde_json::from_value(body.clone()).unwrap();
        assert_eq!(record.id(), "5b2c1f0e");
        assert_eq!(record.title(), "Colemak-DH");
        assert_eq!(record.meta().tags(), &vec!["colemak".to_string(), "hrm".to_string()]);
        assert!(record.meta().compiled());
        assert_eq!(record.config(), &json!({"layer_names": ["Base", "Lower"]}));

        assert_eq!(serde_json::to_value(&record).unwrap(), body);
    }

    #[test]
    fn test_missing_fields_default() {
        let record: LayoutRecord =
            serde_json::from_str(r#"{"layout_meta": {"uuid": "x", "title": "T"}}"#).unwrap();
        assert_eq!(record.creator(), "");
        assert_eq!(record.meta().date(), 0);
        assert!(!record.meta().searchable());
        assert_eq!(record.config(), &Value::Null);
    }

    #[test]
    fn test_null_fields_read_as_empty() {
        let record: LayoutRecord = serde_json::from_str(
            r#"{"layout_meta": {"uuid": "x", "title": "T", "parent_uuid": null,
                "tags": null, "date": null, "compiled": null, "notes": null}}"#,
        )
        .unwrap();
        assert_eq!(record.id(), "x");
        assert_eq!(record.meta().parent_uuid(), "");
        assert!(record.meta().tags().is_empty());
        assert_eq!(record.meta().date(), 0);
        assert!(!record.meta().compiled());
        assert_eq!(record.notes(), "");

        let record: LayoutRecord = serde_json::from_str(r#"{"layout_meta": null}"#).unwrap();
        assert_eq!(record.meta(), &LayoutMeta::default());
    }

    #[test]
    fn test_created_at() {
        let mut meta = LayoutMeta::new("x", "T", "A");
        meta.set_date(1136214245);
        let record = LayoutRecord::new(meta);
        assert_eq!(
            record.created_at().unwrap().to_rfc3339(),
            "2006-01-02T15:04:05+00:00"
        );
    }

    #[test]
    fn test_semantic_key_ignores_id() {
        let a = LayoutRecord::new(LayoutMeta::new("1", "Foo", "Alice"));
        let b = LayoutRecord::new(LayoutMeta::new("2", "Foo", "Alice"));
        let c = LayoutRecord::new(LayoutMeta::new("3", "Foo", "Bob"));
        assert_eq!(a.semantic_key(), b.semantic_key());
        assert_ne!(a.semantic_key(), c.semantic_key());
    }
}

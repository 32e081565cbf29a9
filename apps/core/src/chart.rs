use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::warn;

/// A `{data, layout}` chart document, carried through untouched for the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub data: Vec<Value>,
    pub layout: Map<String, Value>,
}

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("chart payload is not valid JSON: {0}")]
    Syntax(#[from] serde_json::Error),
    #[error("chart payload has no {0}")]
    Shape(&'static str),
}

impl ChartSpec {
    /// Decodes a chart document that arrives as a JSON string nested inside a response.
    ///
    /// An absent or blank field means "no chart". A malformed field is logged
    /// and also yields `None`; it never fails the surrounding view.
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        let raw = raw.map(str::trim).filter(|raw| !raw.is_empty())?;
        match serde_json::from_str::<Value>(raw)
            .map_err(ChartError::from)
            .and_then(Self::try_from_value)
        {
            Ok(spec) => Some(spec),
            Err(err) => {
                warn!(%err, "dropping chart payload");
                None
            }
        }
    }

    /// Like [`ChartSpec::parse`] but for a chart that is already decoded JSON
    pub fn from_value(value: Value) -> Option<Self> {
        match Self::try_from_value(value) {
            Ok(spec) => Some(spec),
            Err(err) => {
                warn!(%err, "dropping chart payload");
                None
            }
        }
    }

    /// Extracts the chart field from a response object.
    ///
    /// The field normally holds a string, but an inline object is accepted too.
    pub fn from_field(payload: &Value, field: &str) -> Option<Self> {
        match payload.get(field)? {
            Value::Null => None,
            Value::String(raw) => Self::parse(Some(raw)),
            other => Self::from_value(other.clone()),
        }
    }

    fn try_from_value(value: Value) -> Result<Self, ChartError> {
        let Value::Object(mut document) = value else {
            return Err(ChartError::Shape("top-level object"));
        };
        let Some(Value::Array(data)) = document.remove("data") else {
            return Err(ChartError::Shape("data sequence"));
        };
        let Some(Value::Object(layout)) = document.remove("layout") else {
            return Err(ChartError::Shape("layout mapping"));
        };
        Ok(Self { data, layout })
    }
}

#[cfg(test)]
mod tests {
    use super::ChartSpec;
    use serde_json::json;

    #[test]
    fn absent_or_blank_field_is_no_chart() {
        assert_eq!(ChartSpec::parse(None), None);
        assert_eq!(ChartSpec::parse(Some("")), None);
        assert_eq!(ChartSpec::parse(Some("   ")), None);
    }

    #[test]
    fn malformed_json_is_no_chart() {
        assert_eq!(ChartSpec::parse(Some("not json")), None);
        assert_eq!(ChartSpec::parse(Some(r#"{"data": [1, 2"#)), None);
    }

    #[test]
    fn wrong_shape_is_no_chart() {
        assert_eq!(ChartSpec::parse(Some("[1, 2, 3]")), None);
        assert_eq!(ChartSpec::parse(Some(r#"{"layout": {}}"#)), None);
        assert_eq!(ChartSpec::parse(Some(r#"{"data": []}"#)), None);
        assert_eq!(ChartSpec::parse(Some(r#"{"data": {}, "layout": {}}"#)), None);
        assert_eq!(ChartSpec::parse(Some(r#"{"data": [], "layout": []}"#)), None);
    }

    #[test]
    fn empty_document_parses() {
        let spec = ChartSpec::parse(Some(r#"{"data":[],"layout":{}}"#));
        assert_eq!(
            spec,
            Some(ChartSpec {
                data: Vec::new(),
                layout: serde_json::Map::new(),
            })
        );
    }

    #[test]
    fn serialized_spec_parses_back_unchanged() -> Result<(), serde_json::Error> {
        let spec: ChartSpec = serde_json::from_value(json!({
            "data": [
                {"type": "scatter", "x": [2019, 2020], "y": [1, 2], "name": "Lewis Hamilton"},
                {"type": "bar", "x": ["a"], "y": [3.5], "marker": {"color": "#E10600"}}
            ],
            "layout": {
                "title": {"text": "Championship Position by Year"},
                "yaxis": {"autorange": "reversed"},
                "template": {"layout": {"paper_bgcolor": "#111"}}
            }
        }))?;

        let raw = serde_json::to_string(&spec)?;
        assert_eq!(ChartSpec::parse(Some(&raw)), Some(spec));
        Ok(())
    }

    #[test]
    fn extra_top_level_keys_are_ignored() {
        let spec = ChartSpec::parse(Some(r#"{"data":[],"layout":{},"frames":[]}"#));
        assert!(spec.is_some());
    }

    #[test]
    fn from_field_handles_string_object_and_null() {
        let payload = json!({
            "nested": "{\"data\":[{\"y\":[1]}],\"layout\":{}}",
            "inline": {"data": [], "layout": {"height": 400}},
            "missing": null,
            "broken": "not json"
        });

        assert_eq!(
            ChartSpec::from_field(&payload, "nested").map(|spec| spec.data.len()),
            Some(1)
        );
        assert!(ChartSpec::from_field(&payload, "inline").is_some());
        assert_eq!(ChartSpec::from_field(&payload, "missing"), None);
        assert_eq!(ChartSpec::from_field(&payload, "broken"), None);
        assert_eq!(ChartSpec::from_field(&payload, "absent"), None);
    }
}

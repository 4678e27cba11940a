//! JSON export of `mnp_gate_config`.

use crate::models::GatewayConfig;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key holding config text that is not a JSON object.
pub const RAW_CONFIG_KEY: &str = "_raw";

/// One exported configuration. `config` is omitted when the stored text is empty or NULL.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConfigExport {
    pub id: i64,
    pub engine: Option<String>,
    pub max_workers: Option<i64>,
    pub cache_days: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<Map<String, Value>>,
}

impl From<GatewayConfig> for ConfigExport {
    fn from(c: GatewayConfig) -> Self {
        let config = parse_config(c.config_text.as_deref());
        ConfigExport {
            id: c.id,
            engine: c.engine,
            max_workers: c.max_workers,
            cache_days: c.cache_days,
            config,
        }
    }
}

/// Parses stored config text as a JSON object. Anything else is kept verbatim under [`RAW_CONFIG_KEY`].
pub fn parse_config(text: Option<&str>) -> Option<Map<String, Value>> {
    let text = text.filter(|t| !t.is_empty())?;
    match serde_json::from_str::<Map<String, Value>>(text) {
        Ok(map) => Some(map),
        Err(_) => {
            let mut raw = Map::new();
            raw.insert(RAW_CONFIG_KEY.to_string(), Value::String(text.to_string()));
            Some(raw)
        }
    }
}

/// Whole document, two-space indented, newline-terminated. Built fully before anything is sent.
pub fn encode(configs: &[ConfigExport]) -> Result<Vec<u8>, serde_json::Error> {
    let mut body = serde_json::to_vec_pretty(configs)?;
    body.push(b'\n');
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config(id: i64, text: Option<&str>) -> GatewayConfig {
        GatewayConfig {
            id,
            engine: Some("hlr".into()),
            max_workers: Some(4),
            cache_days: None,
            config_text: text.map(str::to_string),
        }
    }

    #[test]
    fn object_text_is_parsed() {
        let parsed = parse_config(Some(r#"{"a":1}"#)).unwrap();
        assert_eq!(Value::Object(parsed), json!({"a": 1}));
    }

    #[test]
    fn invalid_text_is_kept_raw() {
        let parsed = parse_config(Some("not json")).unwrap();
        assert_eq!(Value::Object(parsed), json!({"_raw": "not json"}));
    }

    #[test]
    fn non_object_json_is_kept_raw() {
        let parsed = parse_config(Some("[1,2]")).unwrap();
        assert_eq!(Value::Object(parsed), json!({"_raw": "[1,2]"}));
    }

    #[test]
    fn empty_or_null_text_has_no_config() {
        assert_eq!(parse_config(Some("")), None);
        assert_eq!(parse_config(None), None);
    }

    #[test]
    fn nested_keys_keep_order() {
        let parsed = parse_config(Some(r#"{"z":{"b":[true,null]},"a":"x"}"#)).unwrap();
        let keys: Vec<_> = parsed.keys().map(String::as_str).collect();
        assert_eq!(keys, ["z", "a"]);
    }

    #[test]
    fn encode_is_pretty_and_omits_missing_config() {
        let body = encode(&[ConfigExport::from(config(1, None))]).unwrap();
        let text = String::from_utf8(body).unwrap();
        assert_eq!(
            text,
            "[\n  {\n    \"id\": 1,\n    \"engine\": \"hlr\",\n    \"max_workers\": 4,\n    \"cache_days\": null\n  }\n]\n"
        );
    }

    #[test]
    fn decode_after_encode_keeps_fields() {
        let source = vec![
            config(1, Some(r#"{"a":1}"#)),
            config(2, Some("not json")),
            config(3, Some("")),
            config(4, None),
        ];
        let exported: Vec<ConfigExport> = source.iter().cloned().map(ConfigExport::from).collect();
        let decoded: Vec<ConfigExport> = serde_json::from_slice(&encode(&exported).unwrap()).unwrap();

        assert_eq!(decoded.len(), source.len());
        for (d, s) in decoded.iter().zip(&source) {
            assert_eq!(d.id, s.id);
            assert_eq!(d.engine, s.engine);
            assert_eq!(d.max_workers, s.max_workers);
            assert_eq!(d.cache_days, s.cache_days);
            let had_text = s.config_text.as_deref().is_some_and(|t| !t.is_empty());
            assert_eq!(d.config.is_some(), had_text, "id {}", s.id);
        }
    }

    #[test]
    fn empty_collection_is_an_array() {
        assert_eq!(encode(&[]).unwrap(), b"[]\n");
    }
}

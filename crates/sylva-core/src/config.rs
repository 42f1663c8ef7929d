use crate::{Error, Result};
use serde_json::{Map, Value, json};

/// Explorer configuration backed by a JSON object.
///
/// Lookups use dotted paths (`"layout.unitPx"`). [`ExplorerConfig::default`] carries every key the
/// explorer reads, so user overrides only need to name the values they change.
#[derive(Debug, Clone, PartialEq)]
pub struct ExplorerConfig(Value);

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self(default_config_value())
    }
}

fn default_config_value() -> Value {
    json!({
        "fontFamily": "'Segoe UI','Hiragino Sans','Meiryo',sans-serif",
        "layout": {
            "levelGap": [0.0, 180.0, 145.0, 125.0, 110.0],
            "linkGap": 18.0,
            "siblingGap": 0.08,
            "unitPx": 28.0,
            "initialCollapseDepth": 2
        },
        "scene": {
            "originX": 60.0
        },
        "interaction": {
            "longPressMs": 420
        },
        "viewport": {
            "minScale": 0.05,
            "maxScale": 5.0,
            "frameMinScale": 0.8,
            "wheelZoomIn": 1.1,
            "wheelZoomOut": 0.9
        },
        "minimap": {
            "width": 200.0,
            "height": 140.0,
            "padding": 10.0
        }
    })
}

impl ExplorerConfig {
    /// Defaults with `overrides` deep-merged on top.
    pub fn with_overrides(overrides: &Value) -> Self {
        let mut cfg = Self::default();
        cfg.deep_merge(overrides);
        cfg
    }

    /// Parses a JSON5 override document (comments and trailing commas allowed) and merges it over
    /// the defaults.
    pub fn from_json5_str(text: &str) -> Result<Self> {
        let overrides: Value = json5::from_str(text).map_err(|e| Error::Config {
            message: e.to_string(),
        })?;
        if !overrides.is_object() {
            return Err(Error::Config {
                message: "config overrides must be an object".to_string(),
            });
        }
        Ok(Self::with_overrides(&overrides))
    }

    fn lookup(&self, dotted_path: &str) -> Option<&Value> {
        let mut cur = &self.0;
        for segment in dotted_path.split('.') {
            cur = cur.as_object()?.get(segment)?;
        }
        Some(cur)
    }

    pub fn get_str(&self, dotted_path: &str) -> Option<&str> {
        self.lookup(dotted_path)?.as_str()
    }

    pub fn get_f64(&self, dotted_path: &str) -> Option<f64> {
        let v = self.lookup(dotted_path)?;
        v.as_f64()
            .or_else(|| v.as_i64().map(|n| n as f64))
            .filter(|n| n.is_finite())
    }

    pub fn get_u64(&self, dotted_path: &str) -> Option<u64> {
        let v = self.lookup(dotted_path)?;
        v.as_u64()
            .or_else(|| v.as_f64().filter(|n| *n >= 0.0).map(|n| n as u64))
    }

    /// Numeric array lookup; non-numeric entries are skipped.
    pub fn get_f64_list(&self, dotted_path: &str) -> Option<Vec<f64>> {
        let arr = self.lookup(dotted_path)?.as_array()?;
        Some(arr.iter().filter_map(Value::as_f64).collect())
    }

    /// Writes `value` at `dotted_path`. Missing or non-object intermediate tables are replaced by
    /// empty objects.
    pub fn set_value(&mut self, dotted_path: &str, value: Value) {
        let mut slot = &mut self.0;
        for segment in dotted_path.split('.') {
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            let Value::Object(table) = slot else {
                return;
            };
            slot = table.entry(segment).or_insert(Value::Null);
        }
        *slot = value;
    }

    /// Objects merge key by key; any other incoming value replaces what is there.
    pub fn deep_merge(&mut self, other: &Value) {
        merge_into(&mut self.0, other);
    }
}

fn merge_into(base: &mut Value, incoming: &Value) {
    if let (Some(table), Value::Object(overrides)) = (base.as_object_mut(), incoming) {
        for (key, value) in overrides {
            merge_into(table.entry(key.as_str()).or_insert(Value::Null), value);
        }
        return;
    }
    *base = incoming.clone();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_layout_constants() {
        let cfg = ExplorerConfig::default();
        assert_eq!(cfg.get_f64("layout.unitPx"), Some(28.0));
        assert_eq!(cfg.get_f64("layout.siblingGap"), Some(0.08));
        assert_eq!(cfg.get_u64("interaction.longPressMs"), Some(420));
        assert_eq!(
            cfg.get_f64_list("layout.levelGap"),
            Some(vec![0.0, 180.0, 145.0, 125.0, 110.0])
        );
    }

    #[test]
    fn overrides_merge_without_dropping_siblings() {
        let cfg = ExplorerConfig::with_overrides(&json!({ "layout": { "unitPx": 32 } }));
        assert_eq!(cfg.get_f64("layout.unitPx"), Some(32.0));
        assert_eq!(cfg.get_f64("layout.linkGap"), Some(18.0));
    }

    #[test]
    fn json5_overrides_accept_comments() {
        let cfg = ExplorerConfig::from_json5_str(
            "{ // tighter minimap\n minimap: { width: 160, }, }",
        )
        .expect("json5 config");
        assert_eq!(cfg.get_f64("minimap.width"), Some(160.0));
        assert_eq!(cfg.get_f64("minimap.height"), Some(140.0));
    }

    #[test]
    fn json5_rejects_non_object_overrides() {
        assert!(matches!(
            ExplorerConfig::from_json5_str("[1, 2]"),
            Err(Error::Config { .. })
        ));
    }

    #[test]
    fn set_value_creates_intermediate_objects() {
        let mut cfg = ExplorerConfig::default();
        cfg.set_value("viewport.maxScale", json!(3.0));
        assert_eq!(cfg.get_f64("viewport.maxScale"), Some(3.0));
        assert_eq!(cfg.get_f64("viewport.minScale"), Some(0.05));

        cfg.set_value("scene.originX.nested", json!(1));
        assert_eq!(cfg.get_u64("scene.originX.nested"), Some(1));
        cfg.set_value("extra.deeper.key", json!("v"));
        assert_eq!(cfg.get_str("extra.deeper.key"), Some("v"));
    }

    #[test]
    fn merge_replaces_scalars_and_appends_new_keys() {
        let mut cfg = ExplorerConfig::default();
        cfg.deep_merge(&json!({ "layout": { "levelGap": [0, 100] }, "custom": { "a": 1 } }));
        assert_eq!(cfg.get_f64_list("layout.levelGap"), Some(vec![0.0, 100.0]));
        assert_eq!(cfg.get_u64("custom.a"), Some(1));
        assert_eq!(cfg.get_u64("layout.initialCollapseDepth"), Some(2));
    }
}

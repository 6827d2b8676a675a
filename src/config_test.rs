use super::*;

#[test]
fn default_uses_crate_constants() {
    let config = MeasureConfig::default();
    assert_eq!(config.cleanup_delay_ms, 500);
    assert_eq!(config.container_class, "svgdom-measure-tmp");
    assert_eq!(config.container_width_px, 5000);
    assert_eq!(config.z_index, 9999);
}

#[test]
fn deserialize_empty_object_gives_defaults() {
    let config: MeasureConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config, MeasureConfig::default());
}

#[test]
fn deserialize_partial_overrides_only_named_fields() {
    let config: MeasureConfig = serde_json::from_str(r#"{"cleanupDelayMs": 50, "containerClass": "probe"}"#).unwrap();
    assert_eq!(config.cleanup_delay_ms, 50);
    assert_eq!(config.container_class, "probe");
    assert_eq!(config.container_width_px, 5000);
}

#[test]
fn container_styles_hide_and_pin_to_origin() {
    let styles = MeasureConfig::default().container_styles();
    let get = |name: &str| {
        styles
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.clone())
    };
    assert_eq!(get("position").as_deref(), Some("absolute"));
    assert_eq!(get("top").as_deref(), Some("0"));
    assert_eq!(get("left").as_deref(), Some("0"));
    assert_eq!(get("visibility").as_deref(), Some("hidden"));
    assert_eq!(get("z-index").as_deref(), Some("9999"));
    assert_eq!(get("width").as_deref(), Some("5000px"));
}

#[test]
fn container_styles_follow_overrides() {
    let config = MeasureConfig { container_width_px: 800, z_index: -1, ..MeasureConfig::default() };
    let styles = config.container_styles();
    assert!(styles.contains(&("width", "800px".to_owned())));
    assert!(styles.contains(&("z-index", "-1".to_owned())));
}

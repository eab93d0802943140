use compressor_core::{Catalog, CatalogError, ErrorKey};

const EN: &str = r#"{
  "VideoCompressor": {
    "compressingProgress": "Compressing... {progress}%",
    "errors": { "unsupportedType": "Only mp4 videos or common image formats are supported" },
    "retries": 0
  }
}"#;

#[test]
fn nested_keys_are_flattened_with_dots() {
    let catalog = Catalog::from_json("en", EN).unwrap();
    assert_eq!(catalog.locale(), "en");
    assert_eq!(
        catalog.get(ErrorKey::UnsupportedFileType.catalog_key()),
        Some("Only mp4 videos or common image formats are supported")
    );
    assert_eq!(catalog.get("VideoCompressor.retries"), Some("0"));
    assert_eq!(catalog.len(), 3);
}

#[test]
fn translate_substitutes_parameters() {
    let catalog = Catalog::from_json("en", EN).unwrap();
    let text = catalog.translate(
        "VideoCompressor.compressingProgress",
        &[("progress", 42.to_string())],
    );
    assert_eq!(text, "Compressing... 42%");
}

#[test]
fn missing_key_renders_as_key() {
    let catalog = Catalog::from_json("en", EN).unwrap();
    assert_eq!(catalog.translate("Nope.missing", &[]), "Nope.missing");
}

#[test]
fn rejects_non_object_and_invalid_json() {
    assert!(matches!(
        Catalog::from_json("zh", "[1, 2]"),
        Err(CatalogError::NotAnObject(locale)) if locale == "zh"
    ));
    assert!(matches!(
        Catalog::from_json("zh", "{"),
        Err(CatalogError::Parse { .. })
    ));
}

//! # Configured Presenters
//!
//! Presenters assembled from YAML configuration, alone and layered on top of
//! code-defined custom attributes.

use presenter_core::{ConfigError, PresentError, Presenter, PresenterConfig};
use serde_json::{json, Value};

const PERSON_YAML: &str = r#"
customAttributes:
  fullName: "{firstName} {lastName}"
  fullNameWithSalutation: "{@salutation}. {@fullName}"
strategies:
  stationery:
    whitelist: [firstName]
    customAttributes: [salutation, fullNameWithSalutation]
  blacklisted:
    blacklist: [ssn]
"#;

fn person() -> Value {
    json!({
        "firstName": "John",
        "lastName": "Smith",
        "gender": "male",
        "married": true,
        "ssn": "111-11-1111"
    })
}

fn code_defined() -> presenter_core::PresenterBuilder {
    Presenter::builder().custom_attribute("salutation", |ctx| {
        Ok(json!(match ctx.attribute_str("gender") {
            Some("female") => "Ms",
            _ => "Mr",
        }))
    })
}

#[test]
fn config_layers_onto_code_defined_attributes() {
    let presenter = PresenterConfig::from_yaml_str(PERSON_YAML)
        .unwrap()
        .apply(code_defined())
        .unwrap()
        .build();

    let presented = presenter
        .present_value(Some(person()), "stationery")
        .unwrap();
    assert_eq!(
        presented,
        Some(json!({
            "firstName": "John",
            "salutation": "Mr",
            "fullNameWithSalutation": "Mr. John Smith"
        }))
    );
}

#[test]
fn config_alone_reports_missing_dependency() {
    let presenter = PresenterConfig::from_yaml_str(PERSON_YAML)
        .unwrap()
        .into_presenter()
        .unwrap();

    // salutation is declared in code only, so the strategy cannot resolve it.
    assert_eq!(
        presenter
            .present_value(Some(person()), "stationery")
            .unwrap_err(),
        PresentError::UnknownCustomAttribute {
            name: "salutation".into()
        }
    );

    let presented = presenter
        .present_value(Some(person()), "blacklisted")
        .unwrap()
        .unwrap();
    assert!(presented.get("ssn").is_none());
    assert_eq!(presented["lastName"], "Smith");
}

#[test]
fn configured_strategy_overrides_code_strategy() {
    let builder = code_defined().strategy(
        "stationery",
        presenter_core::Strategy::new().whitelist(["ssn"]),
    );
    let presenter = PresenterConfig::from_yaml_str(PERSON_YAML)
        .unwrap()
        .apply(builder)
        .unwrap()
        .build();

    let presented = presenter
        .present_value(Some(person()), "stationery")
        .unwrap()
        .unwrap();
    assert!(presented.get("ssn").is_none());
    assert_eq!(presented["firstName"], "John");
}

#[test]
fn loads_yaml_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("person.yaml");
    std::fs::write(&path, PERSON_YAML).unwrap();

    let config = PresenterConfig::from_path(&path).unwrap();
    assert_eq!(config.strategies.as_ref().map(|s| s.len()), Some(2));
    assert_eq!(config.custom_attributes.as_ref().map(|c| c.len()), Some(2));
}

#[test]
fn invalid_yaml_is_a_config_error() {
    let err = PresenterConfig::from_yaml_str("strategies: [not, a, map]").unwrap_err();
    assert!(matches!(err, ConfigError::Yaml(_)));
}

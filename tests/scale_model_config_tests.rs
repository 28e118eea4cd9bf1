use std::cell::RefCell;
use std::rc::Rc;

use plotscale::api::{
    LinearScaleConfig, LinearScaleModel, SCALE_MODEL_SNAPSHOT_JSON_SCHEMA_V1, ScaleModelSnapshot,
};
use plotscale::core::{Domain, ValidationMode, ViewExtent};

#[test]
fn config_json_defaults_missing_fields() {
    let config = LinearScaleConfig::from_json_str(r#"{ "min": 2.5 }"#).expect("parse config");

    assert_eq!(config.min, Some(2.5));
    assert_eq!(config.max, None);
    assert!(!config.reverse);
    assert_eq!(config.validation, ValidationMode::Permissive);
}

#[test]
fn config_json_round_trips() {
    let config = LinearScaleConfig::new()
        .with_max(9.0)
        .with_reverse(true)
        .with_validation(ValidationMode::Strict);

    let json = config.to_json_pretty().expect("serialize config");
    assert!(json.contains("\"strict\""));
    let parsed = LinearScaleConfig::from_json_str(&json).expect("parse config");
    assert_eq!(parsed, config);
}

#[test]
fn malformed_config_json_is_rejected() {
    assert!(LinearScaleConfig::from_json_str("{ \"reverse\": \"yes\" }").is_err());
}

#[test]
fn model_applies_initial_config() {
    let mut model = LinearScaleModel::new(LinearScaleConfig::new().with_min(0.0).with_reverse(true))
        .expect("model init");
    model
        .set_view_extent("bars", ViewExtent::new(-3.0, 12.0))
        .expect("extent");

    assert_eq!(model.domain(), Domain::Span(12.0, 0.0));
    assert!(model.reconciler().is_reversed());
}

#[test]
fn unchanged_config_fields_are_not_forwarded() {
    let mut model = LinearScaleModel::new(LinearScaleConfig::new()).expect("model init");
    model
        .set_view_extent("line", ViewExtent::new(1.0, 5.0))
        .expect("extent");

    let events = Rc::new(RefCell::new(Vec::<Domain>::new()));
    let sink = events.clone();
    model.on_domain_changed(move |domain| sink.borrow_mut().push(*domain));

    model.set_reverse(false).expect("same reverse");
    model.set_min(None).expect("same min");
    assert!(events.borrow().is_empty());

    model.set_reverse(true).expect("reverse");
    model.set_max(Some(8.0)).expect("max");
    assert_eq!(
        *events.borrow(),
        vec![Domain::Span(5.0, 1.0), Domain::Span(8.0, 1.0)]
    );
    assert_eq!(model.config().max, Some(8.0));
}

#[test]
fn strict_rejection_keeps_previous_config() {
    let mut model = LinearScaleModel::new(
        LinearScaleConfig::new()
            .with_min(0.0)
            .with_max(10.0)
            .with_validation(ValidationMode::Strict),
    )
    .expect("model init");

    assert!(model.set_max(Some(-1.0)).is_err());
    assert_eq!(model.config().max, Some(10.0));
    assert_eq!(model.domain(), Domain::Span(0.0, 10.0));
}

#[test]
fn strict_initial_config_is_validated() {
    let config = LinearScaleConfig::new()
        .with_min(4.0)
        .with_max(1.0)
        .with_validation(ValidationMode::Strict);

    assert!(LinearScaleModel::new(config).is_err());
}

#[test]
fn snapshot_json_contract_round_trips() {
    let mut model = LinearScaleModel::new(LinearScaleConfig::new().with_max(50.0)).expect("init");
    model
        .set_view_extent("a", ViewExtent::new(-2.0, 10.0))
        .expect("a");
    model.set_view_extent("b", ViewExtent::Empty).expect("b");

    let snapshot = model.snapshot();
    let json = snapshot
        .to_json_contract_v1_pretty()
        .expect("serialize snapshot");
    assert!(json.contains(&format!(
        "\"schema_version\": {SCALE_MODEL_SNAPSHOT_JSON_SCHEMA_V1}"
    )));

    let parsed = ScaleModelSnapshot::from_json_compat_str(&json).expect("parse contract");
    assert_eq!(parsed, snapshot);
    assert_eq!(parsed.domain, Domain::Span(-2.0, 50.0));
    assert_eq!(parsed.views.len(), 2);
}

#[test]
fn snapshot_loader_accepts_bare_snapshot() {
    let mut model = LinearScaleModel::default();
    model
        .set_view_extent("only", ViewExtent::new(1.0, 2.0))
        .expect("extent");
    let snapshot = model.snapshot();
    let bare = serde_json::to_string(&snapshot).expect("bare json");

    let parsed = ScaleModelSnapshot::from_json_compat_str(&bare).expect("parse bare");
    assert_eq!(parsed, snapshot);
}

#[test]
fn snapshot_loader_rejects_unknown_schema() {
    let payload = r#"{
        "schema_version": 99,
        "snapshot": {
            "config": {},
            "domain": "Empty",
            "views": {}
        }
    }"#;

    assert!(ScaleModelSnapshot::from_json_compat_str(payload).is_err());
}

#[test]
fn fresh_model_snapshot_round_trips_sentinel_domain() {
    let model = LinearScaleModel::new(LinearScaleConfig::new()).expect("model init");
    assert_eq!(model.domain(), Domain::Span(f64::INFINITY, f64::NEG_INFINITY));

    let json = model
        .snapshot()
        .to_json_contract_v1_pretty()
        .expect("serialize snapshot");
    assert!(json.contains("\"inf\""));
    assert!(json.contains("\"-inf\""));

    let parsed = ScaleModelSnapshot::from_json_compat_str(&json).expect("parse contract");
    assert_eq!(parsed, model.snapshot());
}

#[test]
fn non_finite_extent_and_bounds_survive_json() {
    let mut model =
        LinearScaleModel::new(LinearScaleConfig::new().with_max(f64::INFINITY)).expect("init");
    model
        .set_view_extent("open", ViewExtent::new(f64::NEG_INFINITY, 3.0))
        .expect("extent");

    let snapshot = model.snapshot();
    let json = snapshot
        .to_json_contract_v1_pretty()
        .expect("serialize snapshot");
    let parsed = ScaleModelSnapshot::from_json_compat_str(&json).expect("parse contract");

    assert_eq!(parsed, snapshot);
    assert_eq!(parsed.config.max, Some(f64::INFINITY));
}

#[test]
fn default_model_matches_new_with_default_config() {
    let mut from_default = LinearScaleModel::default();
    let mut from_new = LinearScaleModel::new(LinearScaleConfig::default()).expect("model init");

    assert_eq!(from_default.domain(), from_new.domain());
    assert_eq!(from_default.config(), from_new.config());
    assert_eq!(from_default.snapshot(), from_new.snapshot());

    let default_events = Rc::new(RefCell::new(0usize));
    let sink = default_events.clone();
    from_default.on_domain_changed(move |_| *sink.borrow_mut() += 1);
    let new_events = Rc::new(RefCell::new(0usize));
    let sink = new_events.clone();
    from_new.on_domain_changed(move |_| *sink.borrow_mut() += 1);

    from_default.set_reverse(true).expect("reverse default");
    from_new.set_reverse(true).expect("reverse new");

    assert_eq!(*default_events.borrow(), 1);
    assert_eq!(*new_events.borrow(), 1);
    assert_eq!(from_default.domain(), from_new.domain());
}

#[test]
fn rejected_apply_config_keeps_validation_mode() {
    let mut model = LinearScaleModel::new(LinearScaleConfig::new()).expect("model init");
    model
        .set_view_extent("v", ViewExtent::new(0.0, 4.0))
        .expect("extent");

    let strict_inverted = LinearScaleConfig::new()
        .with_min(5.0)
        .with_max(1.0)
        .with_validation(ValidationMode::Strict);
    assert!(model.apply_config(strict_inverted).is_err());

    assert_eq!(model.config(), LinearScaleConfig::new());
    assert_eq!(
        model.reconciler().validation_mode(),
        ValidationMode::Permissive
    );
    assert_eq!(model.domain(), Domain::Span(0.0, 4.0));

    model
        .set_view_extent("v", ViewExtent::new(9.0, 2.0))
        .expect("permissive mode still accepts inverted extents");
}

#[test]
fn accepted_apply_config_switches_validation_mode() {
    let mut model = LinearScaleModel::new(LinearScaleConfig::new()).expect("model init");

    model
        .apply_config(LinearScaleConfig::new().with_validation(ValidationMode::Strict))
        .expect("strict mode");

    assert_eq!(model.config().validation, ValidationMode::Strict);
    assert_eq!(model.reconciler().validation_mode(), ValidationMode::Strict);
    assert!(model.set_view_extent("v", ViewExtent::new(9.0, 2.0)).is_err());
}

#[test]
fn apply_config_changing_bounds_and_reverse_notifies_per_step() {
    let mut model = LinearScaleModel::new(LinearScaleConfig::new()).expect("model init");
    model
        .set_view_extent("v", ViewExtent::new(1.0, 6.0))
        .expect("extent");
    let events = Rc::new(RefCell::new(Vec::<Domain>::new()));
    let sink = events.clone();
    model.on_domain_changed(move |domain| sink.borrow_mut().push(*domain));

    model
        .apply_config(LinearScaleConfig::new().with_min(0.0).with_reverse(true))
        .expect("apply");

    assert_eq!(
        *events.borrow(),
        vec![Domain::Span(0.0, 6.0), Domain::Span(6.0, 0.0)]
    );
}

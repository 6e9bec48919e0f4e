use crate::integration_tests::_support::{recording_model, style};
use bson::{Bson, doc};
use nexuslite_password::schema::FieldKind;
use nexuslite_password::{
    COMPARE_PASSWORD_METHOD, CompareStyle, Model, PasswordError, PasswordOptions, PasswordPlugin,
    Schema,
};

#[test]
fn adds_required_password_field() {
    let (model, _) = recording_model(PasswordOptions::default());
    let field = model.schema().field("password").expect("password field declared");
    assert!(field.required);
    assert_eq!(field.kind, FieldKind::String);
}

#[test]
fn saves_hashed_version_of_password() {
    let (model, _) = recording_model(PasswordOptions::default());
    let mut doc = model.create(doc! { "foo": "bar", "password": "asdf" });
    model.save(&mut doc).unwrap();

    let stored = doc.get_str("password").unwrap();
    assert_ne!(stored, "asdf");
    assert!(stored.starts_with("$2b$"));
    assert_eq!(doc.get_str("foo").unwrap(), "bar");
}

#[test]
fn password_field_is_configurable() {
    let opts = PasswordOptions { password_field: "pwd".into(), ..PasswordOptions::default() };
    let (model, _) = recording_model(opts);
    assert!(model.schema().field("password").is_none());

    let mut doc = model.create(doc! { "foo": "bar", "pwd": "asdf" });
    model.save(&mut doc).unwrap();

    assert!(doc.get("password").is_none());
    assert_ne!(doc.get_str("pwd").unwrap(), "asdf");
    let stored = model.stored_data(&doc.id).unwrap();
    assert!(!stored.contains_key("password"));
}

#[test]
fn nested_password_field_is_hashed_and_siblings_untouched() {
    let opts =
        PasswordOptions { password_field: "auth.local.pwd".into(), ..PasswordOptions::default() };
    let (model, _) = recording_model(opts);
    let mut doc = model.create(doc! {
        "foo": "bar",
        "auth": { "local": { "pwd": "asdf", "user": "alice" }, "provider": "local" }
    });
    model.save(&mut doc).unwrap();

    let hashed = doc.get_str("auth.local.pwd").unwrap().to_string();
    assert_ne!(hashed, "asdf");
    assert_eq!(doc.get_str("auth.local.user").unwrap(), "alice");
    assert_eq!(doc.get_str("auth.provider").unwrap(), "local");
    assert_eq!(doc.get_str("foo").unwrap(), "bar");

    let verifier = model.compare_password().unwrap().as_callback().unwrap().clone();
    let (tx, rx) = std::sync::mpsc::channel();
    verifier.bind(&doc).compare_password("asdf", move |r| tx.send(r).unwrap());
    assert!(rx.recv().unwrap().unwrap());
}

#[test]
fn rehashes_when_password_changes() {
    let (model, _) = recording_model(PasswordOptions::default());
    let mut doc = model.create(doc! { "foo": "bar", "password": "asdf" });
    model.save(&mut doc).unwrap();
    let old = doc.get_str("password").unwrap().to_string();

    doc.set("password", "foobar").unwrap();
    model.save(&mut doc).unwrap();

    let new = doc.get_str("password").unwrap();
    assert_ne!(new, "foobar");
    assert_ne!(new, old);
}

#[test]
fn unrelated_save_keeps_hash_byte_for_byte() {
    let (model, hasher) = recording_model(PasswordOptions::default());
    let mut doc = model.create(doc! { "foo": "bar", "password": "asdf" });
    model.save(&mut doc).unwrap();
    let before = doc.get_str("password").unwrap().to_string();

    doc.set("foo", "baz").unwrap();
    model.save(&mut doc).unwrap();

    assert_eq!(doc.get_str("password").unwrap(), before);
    assert_eq!(hasher.salt_calls(), 1);
    assert_eq!(model.stored_data(&doc.id).unwrap().get_str("password").unwrap(), before);
}

#[test]
fn reassigning_same_plaintext_still_rehashes() {
    let (model, hasher) = recording_model(style("sync"));
    let mut doc = model.create(doc! { "password": "asdf" });
    model.save(&mut doc).unwrap();
    let first = doc.get_str("password").unwrap().to_string();

    doc.set("password", "asdf").unwrap();
    model.save(&mut doc).unwrap();
    let second = doc.get_str("password").unwrap().to_string();

    assert_ne!(first, second);
    assert_eq!(hasher.hash_calls(), 2);
    let verify = model.compare_password().unwrap().as_blocking().unwrap().clone();
    assert!(verify.bind(&doc).compare_password("asdf").unwrap());
}

#[test]
fn default_cost_is_ten() {
    let (model, hasher) = recording_model(PasswordOptions::default());
    let mut doc = model.create(doc! { "foo": "bar", "password": "asdf" });
    model.save(&mut doc).unwrap();
    assert_eq!(hasher.costs(), vec![10]);
}

#[test]
fn cost_is_configurable() {
    let opts = PasswordOptions { hash_cost: 13, ..PasswordOptions::default() };
    let (model, hasher) = recording_model(opts);
    let mut doc = model.create(doc! { "foo": "bar", "password": "asdf" });
    model.save(&mut doc).unwrap();
    assert_eq!(hasher.costs(), vec![13]);
}

#[test]
fn out_of_range_cost_fails_at_save_not_setup() {
    let opts = PasswordOptions { hash_cost: 99, ..PasswordOptions::default() };
    let (model, _) = recording_model(opts);
    let mut doc = model.create(doc! { "password": "asdf" });
    let err = model.save(&mut doc).unwrap_err();
    assert!(matches!(err, PasswordError::InvalidCost { cost: 99, min: 4, max: 31 }));
    assert_eq!(doc.get_str("password").unwrap(), "asdf");
    assert_eq!(model.count(), 0);
}

#[test]
fn adds_compare_password_method() {
    let (model, _) = recording_model(PasswordOptions::default());
    let method = model.method(COMPARE_PASSWORD_METHOD).expect("comparePassword attached");
    assert_eq!(method.style(), CompareStyle::Callback);
    assert_eq!(method.field().as_str(), "password");
}

#[test]
fn each_compare_type_selects_its_style() {
    for (name, expected) in [
        ("callback", CompareStyle::Callback),
        ("sync", CompareStyle::Blocking),
        ("promise", CompareStyle::Future),
        ("future", CompareStyle::Future),
    ] {
        let (model, _) = recording_model(style(name));
        assert_eq!(model.compare_password().unwrap().style(), expected, "{name}");
    }
}

#[test]
fn unsupported_compare_type_fails_setup() {
    let mut schema = Schema::new();
    let plugin = PasswordPlugin::with_options(style("anything else"));
    let err = schema.plugin(&plugin).unwrap_err();
    assert_eq!(err.to_string(), "anything else is not a supported type for 'comparePasswordType'");
    assert!(schema.fields().is_empty());
    assert!(schema.pre_save_hooks().is_empty());
    assert!(schema.method(COMPARE_PASSWORD_METHOD).is_none());
}

#[test]
fn options_from_json() {
    let opts = PasswordOptions::from_json(
        r#"{"passwordField":"pwd","hashCost":4,"comparePasswordType":"sync"}"#,
    )
    .unwrap();
    let mut schema = Schema::new();
    schema.plugin(&PasswordPlugin::with_options(opts)).unwrap();
    let model = Model::new("JsonConfigured", schema);

    let mut doc = model.create(doc! { "pwd": "asdf" });
    model.save(&mut doc).unwrap();
    assert!(doc.get_str("pwd").unwrap().starts_with("$2b$04$"));
    let verify = model.compare_password().unwrap().as_blocking().unwrap().clone();
    assert!(verify.bind(&doc).compare_password("asdf").unwrap());
}

#[test]
fn plaintext_never_reaches_the_store() {
    let (model, _) = recording_model(PasswordOptions::default());
    let mut doc = model.create(doc! { "password": "asdf" });
    model.save(&mut doc).unwrap();
    let stored = model.stored_data(&doc.id).unwrap();
    match stored.get("password") {
        Some(Bson::String(s)) => assert_ne!(s, "asdf"),
        other => panic!("unexpected stored password: {other:?}"),
    }
}

#[test]
fn argon2_algorithm_hashes_and_verifies_through_the_plugin() {
    let opts = PasswordOptions {
        hash_algorithm: "argon2".into(),
        hash_cost: 1,
        compare_password_type: "sync".into(),
        ..PasswordOptions::default()
    };
    let mut schema = Schema::new();
    schema.plugin(&PasswordPlugin::with_options(opts)).unwrap();
    let model = Model::new("Argon", schema);

    let mut doc = model.create(doc! { "password": "asdf" });
    model.save(&mut doc).unwrap();

    let stored = doc.get_str("password").unwrap();
    assert!(stored.starts_with("$argon2id$v=19$"));
    assert!(stored.contains(",t=1,"));
    let verify = model.compare_password().unwrap().as_blocking().unwrap().clone();
    assert!(verify.bind(&doc).compare_password("asdf").unwrap());
    assert!(!verify.bind(&doc).compare_password("some other password").unwrap());
}

#[test]
fn argon2id_alias_selects_argon2() {
    let opts = PasswordOptions::from_json(
        r#"{"hashAlgorithm":"argon2id","hashCost":1,"comparePasswordType":"sync"}"#,
    )
    .unwrap();
    let mut schema = Schema::new();
    schema.plugin(&PasswordPlugin::with_options(opts)).unwrap();
    let model = Model::new("ArgonAlias", schema);

    let mut doc = model.create(doc! { "password": "asdf" });
    model.save(&mut doc).unwrap();
    assert!(doc.get_str("password").unwrap().starts_with("$argon2id$"));
}

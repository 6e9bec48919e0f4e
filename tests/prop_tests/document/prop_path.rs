use proptest::prelude::*;

proptest! {
    #![proptest_config(proptest::test_runner::Config {
        failure_persistence: Some(Box::new(proptest::test_runner::FileFailurePersistence::WithSource("proptest-regressions"))),
        cases: 64,
        .. proptest::test_runner::Config::default()
    })]
    #[test]
    fn prop_set_then_get_nested(segs in proptest::collection::vec("[a-z]{1,6}", 1..5), val in "[ -~]{0,16}") {
        use nexuslite_password::document::{get_str_path, set_path};
        let path = segs.join(".");
        let mut d = bson::doc! { "sibling": 1 };
        prop_assume!(segs[0] != "sibling");
        set_path(&mut d, &path, bson::Bson::String(val.clone())).unwrap();
        prop_assert_eq!(get_str_path(&d, &path).unwrap(), val.as_str());
        prop_assert_eq!(d.get_i32("sibling").unwrap(), 1);
    }

    #[test]
    fn prop_field_path_round_trips_valid_paths(segs in proptest::collection::vec("[a-zA-Z_][a-zA-Z0-9_]{0,8}", 1..8)) {
        use nexuslite_password::FieldPath;
        let raw = segs.join(".");
        let p = FieldPath::parse(&raw).unwrap();
        prop_assert_eq!(p.as_str(), raw.as_str());
        prop_assert_eq!(p.segments().count(), segs.len());
        prop_assert!(p.overlaps(&segs[0]));
    }
}

use scenebridge_attr_core::request::declarations_from_json;
use scenebridge_attr_core::{
    AttributeBuilder, AttributeKind, AttributeRegistry, BuildError, Outcome, ScalarUnit,
    TypedDataKind,
};
use scenebridge_test_fixtures::{declarations, invalid};

fn build_fixture(name: &str) -> (AttributeRegistry, Vec<Outcome<scenebridge_attr_core::AttrId>>) {
    let value = declarations::value(name).expect("fixture");
    let mut reg = AttributeRegistry::new();
    let outcomes = AttributeBuilder::new(&mut reg)
        .build_json(value)
        .unwrap_or_else(|e| panic!("{name}: {e}"));
    (reg, outcomes)
}

#[test]
fn every_valid_fixture_builds() {
    for key in declarations::keys() {
        let (reg, outcomes) = build_fixture(&key);
        let built = outcomes.iter().filter(|o| !o.is_ignored()).count();
        assert_eq!(reg.roots().count(), built, "{key}");
    }
}

#[test]
fn rig_controls_tree() {
    let (reg, outcomes) = build_fixture("rig-controls");
    assert_eq!(outcomes.len(), 8);
    assert!(outcomes.iter().all(|o| !o.is_ignored()));

    let iterations = reg.resolve("iterations").unwrap();
    let range = iterations.range.unwrap();
    assert_eq!((range.min, range.max), (1.0, 64.0));
    assert_eq!((range.soft_min, range.soft_max), (1.0, 16.0));

    let twist = reg.resolve("twist").unwrap();
    assert_eq!(
        twist.kind,
        AttributeKind::Unit {
            unit: ScalarUnit::Angle
        }
    );
    assert_eq!(twist.range.unwrap().soft_max, 180.0);

    let offset = reg.resolve("offset").unwrap();
    assert!(offset.flags.readable && offset.flags.writable && !offset.flags.storable);

    let result = reg.resolve("result").unwrap();
    assert_eq!(result.kind, AttributeKind::Matrix);
    assert!(result.flags.readable && !result.flags.writable);

    assert_eq!(
        reg.resolve("weights").unwrap().kind,
        AttributeKind::Typed {
            data: TypedDataKind::DoubleArray
        }
    );

    let limb = reg.resolve("limb").unwrap();
    assert!(limb.flags.array && limb.flags.uses_array_data_builder);
    let names: Vec<&str> = reg.children(limb.id).map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["length", "joints", "label", "pose"]);
    assert_eq!(
        reg.resolve("limb.length").unwrap().kind,
        AttributeKind::Unit {
            unit: ScalarUnit::Distance
        }
    );
    assert!(reg.resolve("limb.joints").unwrap().flags.array);
    assert!(reg.resolve("limb.pose.up.upX").is_some());

    let json = reg.to_json(limb.id);
    assert_eq!(json["kind"], "compound");
    assert_eq!(json["children"][3]["children"][0]["name"], "aim");
}

#[test]
fn deformer_complex_data_flags() {
    let (reg, _) = build_fixture("deformer");
    for name in ["inMesh", "outMesh", "guide", "strands", "debugLines", "cache"] {
        let node = reg.resolve(name).unwrap();
        assert!(!node.flags.storable && !node.flags.keyable, "{name}");
    }
    let tint = reg.resolve("tint").unwrap();
    assert_eq!(tint.kind, AttributeKind::Color);
    assert!(tint.flags.storable && tint.flags.keyable);
    assert!(reg.resolve("tint.tintG").unwrap().flags.keyable);
    assert_eq!(
        reg.resolve("debugLines").unwrap().kind,
        AttributeKind::Typed {
            data: TypedDataKind::NurbsCurve
        }
    );

    let tracks = reg.resolve("tracks").unwrap();
    assert_eq!(tracks.kind, AttributeKind::Message);
    assert!(tracks.flags.array && !tracks.flags.uses_array_data_builder);

    assert_eq!(
        reg.resolve("time").unwrap().kind,
        AttributeKind::Unit {
            unit: ScalarUnit::Time
        }
    );

    // Hints given through the structure of a plain attribute.
    let falloff = reg.resolve("falloff").unwrap();
    assert_eq!(
        falloff.kind,
        AttributeKind::Unit {
            unit: ScalarUnit::Distance
        }
    );
    assert_eq!(falloff.range.unwrap().max, 5.0);

    let masks = reg.resolve("layers.masks").unwrap();
    assert!(masks.flags.array);
    let names: Vec<&str> = reg.children(masks.id).map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["weight", "region"]);
    assert!(reg.resolve("layers.masks.region").unwrap().flags.array);
    assert_eq!(reg.resolve("layers.masks.weight").unwrap().range.unwrap().max, 1.0);
}

#[test]
fn legacy_declarations_are_ignored() {
    let (reg, outcomes) = build_fixture("legacy-handles");
    let ignored: Vec<&str> = outcomes
        .iter()
        .filter_map(|o| match o {
            Outcome::Ignored { type_name } => Some(type_name.as_str()),
            Outcome::Built(_) => None,
        })
        .collect();
    assert_eq!(ignored, vec!["DrawingHandle", "ManipHandle", "Execute"]);
    assert_eq!(reg.len(), 1);
    assert!(reg.resolve("amount").unwrap().range.is_some());
}

#[test]
fn invalid_fixtures_fail() {
    let mut reg = AttributeRegistry::new();
    let err = AttributeBuilder::new(&mut reg)
        .build_json(invalid::value("curve-array").unwrap())
        .unwrap_err();
    assert!(matches!(err, BuildError::CurveArray));

    let mut reg = AttributeRegistry::new();
    let err = AttributeBuilder::new(&mut reg)
        .build_json(invalid::value("bad-structure").unwrap())
        .unwrap_err();
    match err {
        BuildError::InChild { path, source } => {
            assert_eq!(path, "nested.mode");
            assert!(matches!(*source, BuildError::MalformedStructure { .. }));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn declarations_round_trip_through_serde() {
    let decls = declarations_from_json(declarations::value("rig-controls").unwrap()).unwrap();
    let text = serde_json::to_string(&decls).unwrap();
    let back = declarations_from_json(serde_json::from_str(&text).unwrap()).unwrap();
    assert_eq!(decls, back);
}

use serde_json::json;

use scenebridge_attr_core::{
    AttributeBuilder, AttributeKind, AttributeRegistry, AttributeRequest, BuildError, Cardinality,
    DeclaredType, NumericKind, PortMode, Variant,
};

fn compound(structure: serde_json::Value) -> AttributeRequest {
    AttributeRequest::new("rec", DeclaredType::CompoundParam, Cardinality::Single)
        .with_structure(Variant::from_json(structure))
}

#[test]
fn typed_entries_become_children() {
    let mut reg = AttributeRegistry::new();
    let id = AttributeBuilder::new(&mut reg)
        .build(&compound(json!({
            "a": { "dataType": "Scalar" },
            "b": { "dataType": "Integer[]" }
        })))
        .unwrap();

    let parent = reg.get(id).unwrap();
    assert_eq!(parent.kind, AttributeKind::Compound);
    assert_eq!(parent.children.len(), 2);

    let a = reg.child(id, "a").unwrap();
    assert_eq!(
        a.kind,
        AttributeKind::Numeric {
            numeric: NumericKind::Double
        }
    );
    assert!(!a.flags.array);

    let b = reg.child(id, "b").unwrap();
    assert_eq!(
        b.kind,
        AttributeKind::Numeric {
            numeric: NumericKind::Int
        }
    );
    assert!(b.flags.array && b.flags.uses_array_data_builder);
}

#[test]
fn children_keep_declaration_order() {
    let mut reg = AttributeRegistry::new();
    let id = AttributeBuilder::new(&mut reg)
        .build(&compound(json!({
            "zeta": "Boolean",
            "alpha": { "dataType": "String" },
            "mid": { "dataType": "Color" }
        })))
        .unwrap();
    let names: Vec<&str> = reg.children(id).map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["zeta", "alpha", "mid"]);
}

#[test]
fn parent_compound_is_created_once() {
    let mut reg = AttributeRegistry::new();
    AttributeBuilder::new(&mut reg)
        .build(&compound(json!({
            "a": "Scalar", "b": "Scalar", "c": "Scalar", "d": "Scalar"
        })))
        .unwrap();
    let parents = reg.roots().filter(|n| n.name == "rec").count();
    assert_eq!(parents, 1);
    assert_eq!(reg.len(), 5);
}

#[test]
fn untyped_dictionaries_nest() {
    let mut reg = AttributeRegistry::new();
    AttributeBuilder::new(&mut reg)
        .build(&compound(json!({
            "pose": {
                "aim": { "dataType": "Vec3" },
                "roll": { "dataType": "Scalar", "scalarUnit": "angle", "uiMin": -90, "uiMax": 90 }
            },
            "weight": "Scalar"
        })))
        .unwrap();

    let pose = reg.resolve("rec.pose").unwrap();
    assert_eq!(pose.kind, AttributeKind::Compound);
    assert_eq!(reg.resolve("rec.pose.aim").unwrap().kind, AttributeKind::NumericCompound);
    assert!(reg.resolve("rec.pose.aim.aimZ").is_some());
    let roll = reg.resolve("rec.pose.roll").unwrap();
    assert!(matches!(roll.kind, AttributeKind::Unit { .. }));
    assert_eq!(roll.range.unwrap().min, -90.0);
}

#[test]
fn children_inherit_direction_and_are_finalized() {
    let mut reg = AttributeRegistry::new();
    let id = AttributeBuilder::new(&mut reg)
        .build(
            &AttributeRequest::new(
                "rec",
                DeclaredType::CompoundParam,
                Cardinality::ArrayOfCompounds,
            )
            .with_port_mode(PortMode::IO)
            .with_structure(Variant::from_json(
                json!({ "mesh": "PolygonMesh", "n": "Integer" }),
            )),
        )
        .unwrap();

    let parent = reg.get(id).unwrap().flags;
    assert!(parent.array && parent.uses_array_data_builder);
    assert!(parent.readable && parent.writable);

    let n = reg.child(id, "n").unwrap().flags;
    assert!(n.readable && n.writable && !n.array);
    let mesh = reg.child(id, "mesh").unwrap().flags;
    assert!(!mesh.storable && !mesh.keyable);
}

#[test]
fn null_and_legacy_entries_are_skipped() {
    let mut reg = AttributeRegistry::new();
    let id = AttributeBuilder::new(&mut reg)
        .build(&compound(json!({
            "gone": null,
            "handle": { "dataType": "DrawingHandle" },
            "manip": "ManipHandle",
            "exec": { "dataType": "Execute" },
            "kept": "Scalar"
        })))
        .unwrap();
    let names: Vec<&str> = reg.children(id).map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["kept"]);
}

#[test]
fn missing_structure_is_a_contract_error() {
    let mut reg = AttributeRegistry::new();
    let err = AttributeBuilder::new(&mut reg)
        .build(&AttributeRequest::new(
            "rec",
            DeclaredType::CompoundParam,
            Cardinality::Single,
        ))
        .unwrap_err();
    assert!(matches!(err, BuildError::MissingStructure { ref name } if name == "rec"));

    let err = AttributeBuilder::new(&mut reg)
        .build(&compound(json!("Scalar")))
        .unwrap_err();
    assert!(matches!(err, BuildError::MalformedStructure { found: "string", .. }));
    assert!(reg.is_empty());
}

#[test]
fn nested_failures_report_the_child_path() {
    let mut reg = AttributeRegistry::new();
    let err = AttributeBuilder::new(&mut reg)
        .build(&compound(json!({
            "ok": "Scalar",
            "inner": { "deeper": { "dataType": "Curve[]" } }
        })))
        .unwrap_err();
    match &err {
        BuildError::InChild { path, source } => {
            assert_eq!(path, "inner.deeper");
            assert!(matches!(**source, BuildError::CurveArray));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.is_incompatible());
}

#[test]
fn typed_compound_child_reads_members_from_its_entry() {
    let mut reg = AttributeRegistry::new();
    let id = AttributeBuilder::new(&mut reg)
        .build(&compound(json!({
            "items": {
                "dataType": "CompoundParam[]",
                "w": { "dataType": "Scalar", "uiMin": 0, "uiMax": 1 },
                "tag": "String"
            }
        })))
        .unwrap();

    let items = reg.child(id, "items").unwrap();
    assert_eq!(items.kind, AttributeKind::Compound);
    assert!(items.flags.array && items.flags.uses_array_data_builder);
    let names: Vec<&str> = reg.children(items.id).map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["w", "tag"]);
    assert_eq!(reg.resolve("rec.items.w").unwrap().range.unwrap().max, 1.0);
}

#[test]
fn typed_compound_child_without_members_is_empty() {
    let mut reg = AttributeRegistry::new();
    let id = AttributeBuilder::new(&mut reg)
        .build(&compound(json!({ "sub": { "dataType": "CompoundParam" } })))
        .unwrap();
    let sub = reg.child(id, "sub").unwrap();
    assert_eq!(sub.kind, AttributeKind::Compound);
    assert_eq!(reg.children(sub.id).count(), 0);

    let err = AttributeBuilder::new(&mut reg)
        .build(&compound(json!({ "raw": "CompoundParam" })))
        .unwrap_err();
    assert!(matches!(
        err.root_cause(),
        BuildError::MissingStructure { name } if name == "raw"
    ));
}

#[test]
fn any_array_annotation_makes_a_multi_child() {
    let mut reg = AttributeRegistry::new();
    let id = AttributeBuilder::new(&mut reg)
        .build(&compound(json!({
            "fixed": { "dataType": "Scalar[3]" },
            "ids": "UInt32[]",
            "gain": "Float32"
        })))
        .unwrap();
    let fixed = reg.child(id, "fixed").unwrap();
    assert!(fixed.flags.array);
    assert_eq!(
        fixed.kind,
        AttributeKind::Numeric {
            numeric: NumericKind::Double
        }
    );
    let ids = reg.child(id, "ids").unwrap();
    assert!(ids.flags.array);
    assert_eq!(
        ids.kind,
        AttributeKind::Numeric {
            numeric: NumericKind::Int
        }
    );
    assert!(!reg.child(id, "gain").unwrap().flags.array);
}

#[test]
fn failed_compound_leaves_nothing_behind() {
    let mut reg = AttributeRegistry::new();
    let err = AttributeBuilder::new(&mut reg)
        .build(&compound(json!({ "a": "Scalar", "b": "Vec3", "c": "Curve[]" })))
        .unwrap_err();
    assert!(matches!(err.root_cause(), BuildError::CurveArray));
    assert!(reg.is_empty());
}

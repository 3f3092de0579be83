//! Integration test: element validation before and after the textbox patch.
//!
//! Exercises the host the way the annotation service does: elements arrive
//! as JSON, are checked against the active validator, and rejections carry
//! the violated constraint. The typed decoder in `hui-core` is checked to
//! agree with the schema on the same inputs.

use hui_core::AnnotationElement;
use hui_schema::{AnnotationSchemaHost, PatchOutcome, SchemaValidationError};
use proptest::prelude::*;
use serde_json::{json, Value};

fn patched_host() -> AnnotationSchemaHost {
    let host = AnnotationSchemaHost::large_image().expect("baseline host builds");
    host.patch_textbox().expect("textbox patch applies");
    host
}

fn hello_textbox() -> Value {
    json!({
        "type": "textbox",
        "center": [100, 200, 0],
        "width": 50,
        "height": 30,
        "text": "Hello World"
    })
}

fn without(element: &Value, field: &str) -> Value {
    let mut element = element.clone();
    if let Some(obj) = element.as_object_mut() {
        obj.remove(field);
    }
    element
}

fn is_no_matching_alternative(err: &SchemaValidationError) -> bool {
    err.violations
        .violations()
        .iter()
        .any(|v| v.schema_path.contains("anyOf") || v.message.contains("anyOf"))
}

#[test]
fn textbox_rejected_before_patch() {
    let host = AnnotationSchemaHost::large_image().unwrap();
    let err = host.validate(&hello_textbox()).unwrap_err();
    assert!(
        is_no_matching_alternative(&err),
        "expected an anyOf violation, got: {err}"
    );
}

#[test]
fn textbox_accepted_after_patch() {
    patched_host().validate(&hello_textbox()).unwrap();
}

#[test]
fn textbox_with_optional_fields_accepted() {
    let element = json!({
        "type": "textbox",
        "id": "0123456789abcdef01234567",
        "center": [512, 256, 0],
        "width": 200,
        "height": 80,
        "rotation": 0.5,
        "normal": [0, 0, 1],
        "text": "Region of interest",
        "fillColor": "rgba(255, 255, 255, 0)",
        "lineColor": "rgb(0, 0, 0)",
        "lineWidth": 2,
        "group": "tumor",
        "label": {"value": "ROI", "visibility": "always"},
        "user": {"reviewer": "pathologist-2"}
    });
    patched_host().validate(&element).unwrap();
}

#[test]
fn textbox_missing_required_fields_rejected() {
    let host = patched_host();
    for field in ["width", "height", "text", "center"] {
        let element = without(&hello_textbox(), field);
        assert!(
            host.validate(&element).is_err(),
            "textbox without '{field}' was accepted"
        );
    }
    let bare = json!({"type": "textbox", "center": [100, 200, 0]});
    assert!(host.validate(&bare).is_err());
}

#[test]
fn textbox_extra_property_rejected() {
    let mut element = hello_textbox();
    element["fontFamily"] = json!("serif");
    assert!(patched_host().validate(&element).is_err());
}

#[test]
fn textbox_field_constraints() {
    let host = patched_host();
    let cases = [
        ("width", json!(-1)),
        ("height", json!(-0.5)),
        ("lineWidth", json!(-2)),
        ("text", json!(42)),
        ("id", json!("0123456789ABCDEF01234567")),
        ("center", json!([1, 2])),
        ("fillColor", json!("white")),
    ];
    for (field, value) in cases {
        let mut element = hello_textbox();
        element[field] = value.clone();
        assert!(
            host.validate(&element).is_err(),
            "textbox with {field} = {value} was accepted"
        );
    }

    let mut rotated = hello_textbox();
    rotated["rotation"] = json!(-3.14);
    host.validate(&rotated).unwrap();
}

#[test]
fn idempotent_patch_keeps_one_entry() {
    let host = AnnotationSchemaHost::large_image().unwrap();
    host.patch_textbox().unwrap();
    let after_first = host.registry().len();
    assert_eq!(host.patch_textbox().unwrap(), PatchOutcome::AlreadyRegistered);
    assert_eq!(host.registry().len(), after_first);
    assert_eq!(host.count_type("textbox"), 1);
}

#[test]
fn rectangle_still_accepted_after_patch() {
    let element = json!({
        "type": "rectangle",
        "center": [100, 200, 0],
        "width": 50,
        "height": 30
    });
    patched_host().validate(&element).unwrap();
}

#[test]
fn arrow_point_count() {
    let host = patched_host();
    host.validate(&json!({
        "type": "arrow",
        "points": [[100, 200, 0], [300, 400, 0]],
        "lineColor": "rgb(0, 0, 0)",
        "lineWidth": 2,
        "fillColor": "rgba(0, 0, 0, 0.5)"
    }))
    .unwrap();

    assert!(host.validate(&json!({"type": "arrow"})).is_err());
    for points in [
        json!([]),
        json!([[100, 200, 0]]),
        json!([[100, 200, 0], [300, 400, 0], [500, 600, 0]]),
    ] {
        let element = json!({"type": "arrow", "points": points});
        assert!(host.validate(&element).is_err(), "{element} was accepted");
    }
}

#[test]
fn typed_decoder_agrees_with_schema() {
    let host = patched_host();
    let samples = vec![
        hello_textbox(),
        without(&hello_textbox(), "text"),
        json!({"type": "textbox", "center": [0, 0, 0], "width": 1, "height": 1, "text": "", "extra": 1}),
        json!({"type": "arrow", "points": [[0, 0, 0], [1, 1, 0]]}),
        json!({"type": "arrow", "points": [[0, 0, 0]]}),
        json!({"type": "rectangle", "center": [0, 0, 0], "width": -1, "height": 1}),
        json!({"type": "circle", "center": [0, 0, 0], "radius": 4, "fillColor": "#ff000080"}),
        json!({"type": "circle", "center": [0, 0, 0], "radius": -4}),
        json!({"type": "ellipse", "center": [5, 5, 0], "width": 4, "height": 2, "rotation": 1.2}),
        json!({"type": "point", "center": [0, 0, 0], "label": {"value": "p", "visibility": "sometimes"}}),
        json!({"type": "point", "center": [0, 0, 0], "lineColor": "red"}),
        json!({"type": "point", "id": "ABCDEF0123456789abcdef01", "center": [0, 0, 0]}),
        json!({"type": "polyline", "points": [[0, 0, 0], [4, 0, 0], [4, 4, 0]], "closed": true,
               "holes": [[[1, 1, 0], [2, 1, 0], [2, 2, 0]]]}),
        json!({"type": "polyline", "points": [[0, 0, 0]]}),
        json!({"type": "rectanglegrid", "center": [0, 0, 0], "width": 10, "height": 10,
               "widthSubdivisions": 2, "heightSubdivisions": 3}),
        json!({"type": "rectanglegrid", "center": [0, 0, 0], "width": 10, "height": 10,
               "widthSubdivisions": 0, "heightSubdivisions": 3}),
        json!({"type": "rectanglegrid", "center": [0, 0, 0], "width": 10, "height": 10,
               "widthSubdivisions": 2.0, "heightSubdivisions": 3}),
        json!({"type": "rectanglegrid", "center": [0, 0, 0], "width": 10, "height": 10,
               "widthSubdivisions": 2.5, "heightSubdivisions": 3}),
        json!({"type": "rectanglegrid", "center": [0, 0, 0], "width": 10, "height": 10,
               "widthSubdivisions": 5_000_000_000u64, "heightSubdivisions": 3}),
        json!({"type": "hexagon", "center": [0, 0, 0]}),
    ];

    let validator = host.validator();
    for sample in &samples {
        let schema_ok = validator.is_valid(sample);
        let typed_ok = AnnotationElement::from_value(sample).is_ok();
        assert_eq!(
            schema_ok, typed_ok,
            "schema and typed decoder disagree on {sample}"
        );
    }
}

fn rectangle_like() -> impl Strategy<Value = Value> {
    (
        prop_oneof![Just("rectangle"), Just("ellipse"), Just("point"), Just("circle")],
        -50.0f64..50.0,
        -50.0f64..50.0,
        prop::option::of(-7.0f64..7.0),
        prop::option::of(prop_oneof![Just("text"), Just("fontSize"), Just("lineWidth")]),
    )
        .prop_map(|(kind, width, height, rotation, extra)| {
            let mut element = json!({
                "type": kind,
                "center": [10, 20, 0],
                "width": width,
                "height": height,
                "radius": width,
            });
            if let Some(rotation) = rotation {
                element["rotation"] = json!(rotation);
            }
            if let Some(extra) = extra {
                element[extra] = json!(1);
            }
            element
        })
}

proptest! {
    /// Patching never changes the verdict on non-textbox elements.
    #[test]
    fn patch_does_not_change_other_types(element in rectangle_like()) {
        let before = AnnotationSchemaHost::large_image().unwrap().validator();
        let after = patched_host().validator();
        prop_assert_eq!(before.is_valid(&element), after.is_valid(&element));
    }

    /// Arrows are accepted exactly when they have two points.
    #[test]
    fn arrow_accepted_iff_two_points(count in 0usize..5) {
        let points: Vec<Value> = (0..count).map(|i| json!([i, i, 0])).collect();
        let element = json!({"type": "arrow", "points": points});
        prop_assert_eq!(patched_host().validator().is_valid(&element), count == 2);
    }
}

//! Tests for the field model and pure forest operations

use rstest::rstest;

use rschema::domain::{
    add_field_to_parent, create_default_field, find_field_by_id, iter_fields,
    remove_field_from_array, update_field_in_array, DefaultValue, Field, FieldId, FieldKind,
    FieldUpdate,
};
use rschema::util::testing::init_test_setup;

fn string_field(id: &str, name: &str) -> Field {
    Field::new(id.into(), FieldKind::String).with_name(name)
}

fn object_field(id: &str, name: &str, children: Vec<Field>) -> Field {
    Field::new(id.into(), FieldKind::Object)
        .with_name(name)
        .with_children(children)
}

/// A: [A1, A2], B
fn sample_tree() -> Vec<Field> {
    vec![
        object_field("A", "a", vec![string_field("A1", "a1"), string_field("A2", "a2")]),
        string_field("B", "b"),
    ]
}

// ============================================================
// create_default_field
// ============================================================

#[rstest]
#[case(FieldKind::String, Some(DefaultValue::Text(String::new())))]
#[case(FieldKind::Email, Some(DefaultValue::Text(String::new())))]
#[case(FieldKind::Url, Some(DefaultValue::Text(String::new())))]
#[case(FieldKind::Date, Some(DefaultValue::Text(String::new())))]
#[case(FieldKind::Nested, Some(DefaultValue::Text(String::new())))]
#[case(FieldKind::Number, Some(DefaultValue::Number(0.into())))]
#[case(FieldKind::Integer, Some(DefaultValue::Number(0.into())))]
#[case(FieldKind::Float, Some(DefaultValue::Number(0.into())))]
#[case(FieldKind::Boolean, Some(DefaultValue::Bool(false)))]
#[case(FieldKind::Array, None)]
#[case(FieldKind::Object, None)]
fn given_kind_when_creating_default_field_then_exactly_one_slot_set(
    #[case] kind: FieldKind,
    #[case] expected_default: Option<DefaultValue>,
) {
    init_test_setup();
    let field = create_default_field(kind);

    assert_eq!(field.kind, kind);
    assert!(field.name.is_empty());
    assert_eq!(field.default_value, expected_default);
    assert_eq!(field.children.is_some(), kind.is_container());
    if kind.is_container() {
        assert!(field.children().is_empty());
    }
    assert!(field.is_well_formed());
}

#[test]
fn given_two_default_fields_when_created_then_ids_differ() {
    let a = create_default_field(FieldKind::String);
    let b = create_default_field(FieldKind::String);
    assert_ne!(a.id, b.id);
}

// ============================================================
// find_field_by_id / traversal
// ============================================================

#[test]
fn given_forest_when_traversing_then_visits_parent_before_children_in_order() {
    let tree = sample_tree();

    let ids: Vec<&str> = iter_fields(&tree).map(|(_, f)| f.id.as_str()).collect();

    assert_eq!(ids, vec!["A", "A1", "A2", "B"]);
}

#[test]
fn given_nested_id_when_finding_then_returns_field() {
    let tree = sample_tree();

    let found = find_field_by_id(&tree, &FieldId::from("A2")).unwrap();

    assert_eq!(found.name, "a2");
}

#[test]
fn given_unknown_id_when_finding_then_returns_none() {
    assert!(find_field_by_id(&sample_tree(), &FieldId::from("zz")).is_none());
}

// ============================================================
// update_field_in_array
// ============================================================

#[test]
fn given_unknown_id_when_updating_then_forest_equal_to_input() {
    let tree = sample_tree();

    let result = update_field_in_array(&tree, &"missing".into(), &FieldUpdate::rename("x"));

    assert_eq!(result, tree);
}

#[test]
fn given_nested_field_when_renaming_then_only_that_field_changes() {
    let tree = sample_tree();

    let result = update_field_in_array(&tree, &"A1".into(), &FieldUpdate::rename("first"));

    assert_eq!(result[0].children()[0].name, "first");
    assert_eq!(result[0].children()[1], tree[0].children()[1]);
    assert_eq!(result[1], tree[1]);
    // input untouched
    assert_eq!(tree[0].children()[0].name, "a1");
}

#[test]
fn given_string_field_when_changing_kind_to_array_then_default_replaced_by_children() {
    let tree = sample_tree();

    let result = update_field_in_array(&tree, &"B".into(), &FieldUpdate::change_kind(FieldKind::Array));

    let b = &result[1];
    assert_eq!(b.kind, FieldKind::Array);
    assert_eq!(b.children, Some(vec![]));
    assert_eq!(b.default_value, None);
    assert_eq!(b.name, "b");
}

#[test]
fn given_object_when_changing_kind_to_boolean_then_subtree_discarded() {
    let tree = sample_tree();

    let result = update_field_in_array(&tree, &"A".into(), &FieldUpdate::change_kind(FieldKind::Boolean));

    assert_eq!(result[0].children, None);
    assert_eq!(result[0].default_value, Some(DefaultValue::Bool(false)));
    assert!(find_field_by_id(&result, &"A1".into()).is_none());
}

// ============================================================
// remove_field_from_array
// ============================================================

#[rstest]
#[case("A")]
#[case("A1")]
#[case("B")]
#[case("missing")]
fn given_any_id_when_removing_then_it_is_not_found_afterwards(#[case] id: &str) {
    let id = FieldId::from(id);

    let result = remove_field_from_array(&sample_tree(), &id);

    assert!(find_field_by_id(&result, &id).is_none());
}

#[test]
fn given_parent_when_removing_then_whole_subtree_gone_and_siblings_kept() {
    let result = remove_field_from_array(&sample_tree(), &"A".into());

    let ids: Vec<&str> = iter_fields(&result).map(|(_, f)| f.id.as_str()).collect();
    assert_eq!(ids, vec!["B"]);
}

#[test]
fn given_unknown_id_when_removing_then_forest_equivalent() {
    let tree = sample_tree();
    assert_eq!(remove_field_from_array(&tree, &"nope".into()), tree);
}

// ============================================================
// add_field_to_parent
// ============================================================

#[test]
fn given_empty_object_when_adding_child_then_child_appended() {
    let tree = vec![object_field("a", "obj", vec![])];
    let child = Field::new("b".into(), FieldKind::Number).with_name("x");

    let result = add_field_to_parent(&tree, &"a".into(), &child);

    assert_eq!(
        result[0].children(),
        &[Field {
            id: "b".into(),
            name: "x".into(),
            kind: FieldKind::Number,
            children: None,
            default_value: Some(DefaultValue::Number(0.into())),
        }]
    );
}

#[test]
fn given_nested_child_when_deleting_then_parent_empty_again() {
    let tree = vec![object_field("a", "obj", vec![])];
    let child = Field::new("b".into(), FieldKind::Number).with_name("x");
    let tree = add_field_to_parent(&tree, &"a".into(), &child);

    let result = remove_field_from_array(&tree, &"b".into());

    assert_eq!(result[0].children(), &[] as &[Field]);
    assert!(find_field_by_id(&result, &"b".into()).is_none());
}

#[test]
fn given_array_with_children_when_adding_then_appended_at_end() {
    let tree = vec![Field::new("arr".into(), FieldKind::Array).with_children(vec![string_field("x", "x")])];

    let result = add_field_to_parent(&tree, &"arr".into(), &string_field("y", "y"));

    let ids: Vec<&str> = result[0].children().iter().map(|f| f.id.as_str()).collect();
    assert_eq!(ids, vec!["x", "y"]);
}

#[rstest]
#[case(FieldKind::String)]
#[case(FieldKind::Boolean)]
#[case(FieldKind::Float)]
#[case(FieldKind::Nested)]
fn given_scalar_parent_when_adding_child_then_children_stay_absent(#[case] kind: FieldKind) {
    let tree = vec![Field::new("s".into(), kind).with_name("scalar")];

    let result = add_field_to_parent(&tree, &"s".into(), &string_field("c", "c"));

    assert_eq!(result[0].children, None);
    assert_eq!(result, tree);
}

#[test]
fn given_unknown_parent_when_adding_then_forest_equivalent() {
    let tree = sample_tree();
    assert_eq!(add_field_to_parent(&tree, &"nope".into(), &string_field("c", "c")), tree);
}

#[test]
fn given_deep_object_when_adding_to_grandchild_then_reaches_it() {
    let tree = vec![object_field("root", "root", vec![object_field("inner", "inner", vec![])])];

    let result = add_field_to_parent(&tree, &"inner".into(), &string_field("leaf", "leaf"));

    assert_eq!(result[0].children()[0].children()[0].id.as_str(), "leaf");
}

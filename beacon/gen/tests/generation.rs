//! Integration tests for generation from a parameter reference page.
//!
//! These tests run the full pipeline on a trimmed copy of the protocol's
//! parameter reference and verify that:
//! - Every parameter lands in exactly the hit types it declares
//! - Required parameters are always serialized, optional ones only once set
//! - Templated keys splice their index members in with `format!`
//! - The dispatch table and the output order are deterministic

use std::fs;

use beacon_gen::document::extract;
use beacon_gen::errors::GeneratorError;
use beacon_gen::model::HitType;
use beacon_gen::output::{GeneratedUnit, write_units};
use beacon_gen::pipeline::{build_model, generate_from_html};
use tempfile::TempDir;

const PROTOCOL: &str = include_str!("fixtures/protocol.html");

fn units() -> Vec<GeneratedUnit> {
    generate_from_html(PROTOCOL).expect("fixture should generate")
}

fn unit<'a>(units: &'a [GeneratedUnit], filename: &str) -> &'a str {
    &units
        .iter()
        .find(|u| u.filename == filename)
        .unwrap_or_else(|| panic!("missing unit {filename}"))
        .content
}

fn model() -> Vec<HitType> {
    build_model(&extract(PROTOCOL).unwrap()).unwrap()
}

fn hit<'a>(model: &'a [HitType], name: &str) -> &'a HitType {
    model.iter().find(|h| h.name == name).unwrap()
}

// =============================================================================
// Model tests
// =============================================================================

#[test]
fn every_parameter_lands_in_each_declared_type_once() {
    let extraction = extract(PROTOCOL).unwrap();
    let model = build_model(&extraction).unwrap();

    for raw in &extraction.fields {
        for declared in &raw.hit_types {
            let name = if declared == "all" { "client" } else { declared.as_str() };
            let count = hit(&model, name)
                .fields
                .iter()
                .filter(|f| f.param == raw.param)
                .count();
            assert_eq!(count, 1, "{} in {}", raw.param, name);
        }
    }
}

#[test]
fn hit_type_entry_is_not_a_field() {
    let extraction = extract(PROTOCOL).unwrap();
    assert!(extraction.fields.iter().all(|f| f.param != "t"));
    assert_eq!(extraction.discriminator.as_deref(), Some("t"));
}

#[test]
fn client_holds_only_common_fields() {
    let model = model();
    let client = hit(&model, "client");
    assert!(
        client
            .fields
            .iter()
            .all(|f| f.hit_types.is_empty() || f.hit_types == ["all"])
    );
    assert!(hit(&model, "event").fields.iter().all(|f| f.param != "cid"));
}

#[test]
fn client_indices_are_sorted_pseudo_fields() {
    let model = model();
    let client = hit(&model, "client");
    assert_eq!(client.indices, vec!["dimensionIndex", "listIndex", "productIndex"]);

    let tail: Vec<&str> = client
        .fields
        .iter()
        .rev()
        .take(3)
        .rev()
        .map(|f| f.name.as_str())
        .collect();
    assert_eq!(tail, vec!["DimensionIndex", "ListIndex", "ProductIndex"]);
}

#[test]
fn dispatch_ids_are_sorted() {
    let model = model();
    assert_eq!(
        hit(&model, "client").hit_type_ids,
        vec!["event", "exception", "item", "pageview", "screenview", "social", "timing", "transaction"]
    );
}

#[test]
fn must_not_be_empty_makes_event_fields_required() {
    let model = model();
    let event = hit(&model, "event");
    let required: Vec<&str> = event
        .fields
        .iter()
        .filter(|f| f.required)
        .map(|f| f.name.as_str())
        .collect();
    assert_eq!(required, vec!["Category", "Action"]);
    assert!(
        event
            .fields
            .iter()
            .all(|f| f.docs.iter().all(|l| !l.contains("Must not be empty")))
    );
}

#[test]
fn protocol_version_and_client_id_are_optional() {
    let model = model();
    let client = hit(&model, "client");
    for name in ["ProtocolVersion", "ClientID"] {
        let field = client.fields.iter().find(|f| f.name == name).unwrap();
        assert!(!field.required, "{name}");
    }
    let tracking = client.fields.iter().find(|f| f.name == "TrackingID").unwrap();
    assert!(tracking.required);
}

// =============================================================================
// Generated code tests
// =============================================================================

#[test]
fn units_are_sorted_by_filename() {
    let units = units();
    let names: Vec<&str> = units.iter().map(|u| u.filename.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "mod.rs",
            "type-client.rs",
            "type-event.rs",
            "type-exception.rs",
            "type-item.rs",
            "type-pageview.rs",
            "type-screenview.rs",
            "type-social.rs",
            "type-timing.rs",
            "type-transaction.rs",
        ]
    );
}

#[test]
fn required_fields_are_serialized_unconditionally() {
    let units = units();
    let event = unit(&units, "type-event.rs");
    assert!(
        event.contains(r#"v.push(("ec".to_string(), self.category.clone()));"#),
        "Generated code:\n{event}"
    );
    assert!(!event.contains("category_set"));
}

#[test]
fn required_client_fields_are_settable_and_always_sent() {
    let units = units();
    let client = unit(&units, "type-client.rs");
    assert!(
        client.contains("pub(crate) fn tracking_id(&mut self, tracking_id: impl Into<String>)"),
        "Generated code:\n{client}"
    );
    assert!(client.contains(r#"v.push(("tid".to_string(), self.tracking_id.clone()));"#));
    assert!(!client.contains("if self.tracking_id_set"));
}

#[test]
fn optional_fields_are_guarded_by_set_flag() {
    let units = units();
    let event = unit(&units, "type-event.rs");
    assert!(event.contains("if self.label_set {"), "Generated code:\n{event}");
    assert!(event.contains("if self.value_set {"));
    assert!(event.contains("self.value.to_string()"));
}

#[test]
fn templated_keys_use_index_members() {
    let units = units();
    let client = unit(&units, "type-client.rs");
    assert!(
        client.contains(r#"format!("pr{}id", self.product_index)"#),
        "Generated code:\n{client}"
    );
    assert!(client.contains(r#"format!("cd{}", self.dimension_index)"#));
    assert!(client.contains(r#"format!("il{}pi{}id", self.list_index, self.product_index)"#));
}

#[test]
fn index_members_have_setters_but_no_key() {
    let units = units();
    let client = unit(&units, "type-client.rs");
    assert!(client.contains("pub fn product_index(&mut self, product_index: impl Into<String>)"));
    assert!(client.contains("/// ProductIndex is required by other properties"));
}

#[test]
fn booleans_are_sent_as_one_or_zero() {
    let units = units();
    let exception = unit(&units, "type-exception.rs");
    assert!(exception.contains("if self.is_exception_fatal_set {"));
    assert!(exception.contains(r#""1""#), "Generated code:\n{exception}");
    assert!(exception.contains(r#""0""#));
}

#[test]
fn dispatch_follows_sorted_ids() {
    let units = units();
    let client = unit(&units, "type-client.rs");
    let ids = [
        "Event", "Exception", "Item", "Pageview", "Screenview", "Social", "Timing", "Transaction",
    ];
    let positions: Vec<usize> = ids
        .iter()
        .map(|name| {
            client
                .find(&format!("TypeId::of::<{name}>()"))
                .unwrap_or_else(|| panic!("no branch for {name}"))
        })
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
    assert!(client.contains(r#"self.hit_type = "screenview".to_string();"#));
}

#[test]
fn all_required_constructor_needs_no_default() {
    let units = units();
    let social = unit(&units, "type-social.rs");
    assert!(social.contains("pub fn new("));
    assert!(!social.contains("..Self::default()"));
    assert!(!social.contains("_set"));
}

#[test]
fn all_optional_constructor_is_default() {
    let units = units();
    let timing = unit(&units, "type-timing.rs");
    assert!(timing.contains("pub fn new() -> Self"));
    assert!(timing.contains("Self::default()"));
}

// =============================================================================
// Run properties
// =============================================================================

#[test]
fn generation_is_idempotent() {
    assert_eq!(units(), units());
}

#[test]
fn unknown_kind_aborts_before_writing() {
    let temp_dir = TempDir::new().unwrap();
    let broken = PROTOCOL.replacen("<td>integer</td>", "<td>decimal</td>", 1);

    let result = generate_from_html(&broken)
        .and_then(|units| write_units(temp_dir.path(), &units, false));

    assert!(matches!(
        result,
        Err(GeneratorError::UnknownValueKind { kind, param }) if kind == "decimal" && param == "qt"
    ));
    assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 0);
}

#[test]
fn empty_hit_type_cell_aborts_before_writing() {
    let temp_dir = TempDir::new().unwrap();
    let broken = PROTOCOL.replace(
        "<td><code>plt</code></td><td>integer</td><td><span class=\"none\">None</span></td><td>None</td><td>timing</td>",
        "<td><code>plt</code></td><td>integer</td><td><span class=\"none\">None</span></td><td>None</td><td></td>",
    );

    let result = generate_from_html(&broken)
        .and_then(|units| write_units(temp_dir.path(), &units, false));

    assert!(matches!(
        result,
        Err(GeneratorError::UnknownHitType { name, param }) if name.is_empty() && param == "plt"
    ));
    assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 0);
}

#[test]
fn missing_hit_type_entry_is_fatal() {
    let without = PROTOCOL.replace(">Hit type</a>", ">Hit kind</a>");
    assert!(matches!(
        generate_from_html(&without),
        Err(GeneratorError::MissingHitTypeEntry)
    ));
}

#[test]
fn written_units_match_rendered_units() {
    let temp_dir = TempDir::new().unwrap();
    let out_dir = temp_dir.path().join("hits");
    let units = units();

    write_units(&out_dir, &units, false).unwrap();

    for unit in &units {
        let written = fs::read_to_string(out_dir.join(&unit.filename)).unwrap();
        assert_eq!(written, unit.content, "{}", unit.filename);
    }
}

use cfgm_core::provenance::{RunProvenance, SchemaVersion};
use cfgm_core::{DegreeSequence, Edge};

#[test]
fn provenance_round_trip_json() {
    let provenance = RunProvenance {
        input_hash: "input".into(),
        seed: Some(99),
        retry_budget: 10_000,
        draw_threshold: 1_000_000,
        tool_versions: [("cfgm-core".into(), "0.1.0".into())].into_iter().collect(),
    };

    let json = serde_json::to_string_pretty(&provenance).expect("serialize");
    let decoded: RunProvenance = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(decoded, provenance);
    assert_eq!(SchemaVersion::default(), SchemaVersion::new(1, 0, 0));
}

#[test]
fn degree_sequence_serializes_as_ordered_map() {
    let degrees = DegreeSequence::from([("b".to_string(), 2), ("a".to_string(), 3)]);
    let json = serde_json::to_string(&degrees).expect("serialize");
    assert_eq!(json, r#"{"b":2,"a":3}"#);
    let decoded: DegreeSequence<String> = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(decoded, degrees);
}

#[test]
fn edge_round_trip_json() {
    let edge = Edge::new(1u64, 2u64);
    let json = serde_json::to_string(&edge).expect("serialize");
    let decoded: Edge<u64> = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(decoded, edge);
}

#[test]
fn schema_compatibility_follows_major_version() {
    let reader = SchemaVersion::new(1, 2, 0);
    assert!(reader.is_compatible_with(&SchemaVersion::new(1, 0, 7)));
    assert!(!reader.is_compatible_with(&SchemaVersion::new(2, 0, 0)));
    assert_eq!(reader.to_string(), "1.2.0");
}

#[test]
fn provenance_without_tool_versions_still_loads() {
    let decoded: RunProvenance = serde_json::from_str(
        r#"{"input_hash":"x","seed":null,"retry_budget":3,"draw_threshold":5}"#,
    )
    .expect("deserialize");
    assert!(decoded.tool_versions.is_empty());
    assert_eq!(decoded.seed, None);
}

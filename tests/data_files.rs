//! Integration tests for the LDF fixtures in tests/data.

use ldf_rs::{ErrorKind, InitValue, LdfParser, Result, SectionKind};
use std::path::Path;

const TEST_DATA_DIR: &str = "tests/data";

fn test_data_path(filename: &str) -> String {
    Path::new(TEST_DATA_DIR)
        .join(filename)
        .to_string_lossy()
        .to_string()
}

// ============================================================================
// Complete cluster description
// ============================================================================

#[test]
fn body_header_and_nodes() -> Result<()> {
    let doc = ldf_rs::parse_file(&test_data_path("body.ldf"))?;

    let header = doc.header();
    assert_eq!(header.protocol_version.as_deref(), Some("2.1"));
    assert_eq!(header.language_version.as_deref(), Some("2.1"));
    assert_eq!(header.speed_kbps, Some(19.2));
    assert_eq!(header.channel_name.as_deref(), Some("BODY_LIN"));

    let nodes = doc.nodes().expect("body.ldf has a Nodes section");
    assert_eq!(nodes.master, "CEM");
    assert_eq!(nodes.timer_base_ms, 5.0);
    assert_eq!(nodes.jitter_ms, 0.1);
    assert_eq!(nodes.slaves, ["RSM", "LSM"]);
    Ok(())
}

#[test]
fn body_signals() -> Result<()> {
    let doc = ldf_rs::parse_file(&test_data_path("body.ldf"))?;

    assert_eq!(
        doc.signals().keys().collect::<Vec<_>>(),
        ["CEM_Frm1_Sig", "CEM_Frm2_Sig", "RSM_Sig1", "RSM_Sig2", "LSM_Sig1"]
    );

    let broadcast = doc.signals().get("CEM_Frm1_Sig").unwrap();
    assert_eq!(broadcast.size, 8);
    assert_eq!(broadcast.init.as_scalar(), Some("0"));
    assert_eq!(broadcast.publisher, "CEM");
    assert_eq!(broadcast.subscribers, ["RSM", "LSM"]);

    let array = doc.signals().get("CEM_Frm2_Sig").unwrap();
    assert_eq!(array.init, InitValue::Array(vec!["0".into(), "255".into()]));
    assert_eq!(array.subscribers, ["LSM"]);

    // trailing `//` comment is not part of the subscriber list
    assert_eq!(doc.signals().get("LSM_Sig1").unwrap().subscribers, ["CEM"]);

    assert_eq!(doc.diagnostic_signals().len(), 4);
    assert_eq!(doc.diagnostic_signals().get("SlaveRespB1").unwrap().size, 8);
    Ok(())
}

#[test]
fn body_frames_match_source() -> Result<()> {
    let doc = ldf_rs::parse_file(&test_data_path("body.ldf"))?;

    assert_eq!(
        doc.frames().keys().collect::<Vec<_>>(),
        ["CEM_Frm1", "CEM_Frm2", "RSM_Frm1", "LSM_Frm1"]
    );

    let rsm = doc.frames().get("RSM_Frm1").unwrap();
    assert_eq!(rsm.identifier, 0x21);
    assert_eq!(rsm.publisher, "RSM");
    assert_eq!(rsm.response_length, 1);
    assert_eq!(rsm.signals.keys().collect::<Vec<_>>(), ["RSM_Sig1", "RSM_Sig2"]);
    assert_eq!(rsm.signals.get("RSM_Sig2").map(String::as_str), Some("1"));

    assert_eq!(doc.frames().get("CEM_Frm2").unwrap().identifier, 2);

    let carrying: Vec<_> = doc.frames_carrying("CEM_Frm1_Sig").map(|(n, _)| n).collect();
    assert_eq!(carrying, ["CEM_Frm1"]);

    let req = doc.diagnostic_frames().get("MasterReq").unwrap();
    assert_eq!(req.identifier, 0x3C);
    assert_eq!(req.signals.get("MasterReqB1").map(String::as_str), Some("8"));
    Ok(())
}

#[test]
fn body_node_attributes() -> Result<()> {
    let doc = ldf_rs::parse_file(&test_data_path("body.ldf"))?;

    assert_eq!(doc.node_attributes().keys().collect::<Vec<_>>(), ["RSM", "LSM"]);

    let rsm = doc.node_attributes().get("RSM").unwrap();
    assert_eq!(rsm.lin_protocol, "2.1");
    assert_eq!(rsm.configured_nad, "0x20");
    assert_eq!(rsm.initial_nad.as_deref(), Some("0x20"));
    assert_eq!(rsm.product_id, ["0x4E4E", "0x4553", "1"]);
    assert_eq!(rsm.response_error, "RSM_Sig1");
    assert_eq!(rsm.p2_min_ms, Some(50));
    assert_eq!(rsm.st_min_ms, Some(0));
    assert_eq!(rsm.configurable_frames.get("RSM_Frm1"), Some(&None));

    let lsm = doc.node_attributes().get("LSM").unwrap();
    assert_eq!(lsm.initial_nad, None);
    assert_eq!(lsm.p2_min_ms, Some(100));
    assert_eq!(lsm.st_min_ms, Some(20));
    assert_eq!(
        lsm.configurable_frames.get("LSM_Frm1"),
        Some(&Some("0x22".to_string()))
    );
    Ok(())
}

#[test]
fn body_schedules_and_encodings() -> Result<()> {
    let doc = ldf_rs::parse_file(&test_data_path("body.ldf"))?;

    let normal = doc.schedule_tables().get("Normal").unwrap();
    assert_eq!(normal.slots.len(), 4);
    assert_eq!(normal.cycle_time_ms(), 50.0);

    let configure = doc.schedule_tables().get("Configure").unwrap();
    assert_eq!(configure.slots[0].frame_slot_name, "AssignNAD");
    assert_eq!(configure.slots[0].delay_ms, 20.0);

    let position = doc.signal_encoding_types().get("Position").unwrap();
    assert_eq!(
        position.rows[0],
        ["physical_value", "0", "100", "1", "0", "%"]
    );
    assert_eq!(position.rows_of_kind("logical_value").count(), 1);

    assert_eq!(
        doc.signal_representation().get("Position").unwrap(),
        &["LSM_Sig1".to_string(), "CEM_Frm1_Sig".to_string()]
    );
    Ok(())
}

#[test]
fn body_unknown_section_is_rejected_in_strict_mode() {
    let err = LdfParser::builder()
        .strict_sections(true)
        .from_file(&test_data_path("body.ldf"))
        .and_then(|p| p.parse_all())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownSection);
    assert_eq!(err.text(), Some("Sporadic_frames {"));
}

#[test]
fn body_subset_matches_full_parse() -> Result<()> {
    let path = test_data_path("body.ldf");
    let full = ldf_rs::parse_file(&path)?;
    let subset = LdfParser::builder()
        .only_sections([SectionKind::Frames])
        .from_file(&path)?
        .parse_all()?;

    assert_eq!(subset.frames(), full.frames());
    assert!(subset.signals().is_empty());
    assert!(subset.nodes().is_none());
    Ok(())
}

// ============================================================================
// Empty sections and broken structure
// ============================================================================

#[test]
fn empty_sections_yield_empty_collections() -> Result<()> {
    let doc = ldf_rs::parse_file(&test_data_path("empty.ldf"))?;

    assert_eq!(doc.header().speed_kbps, Some(10.4));
    let nodes = doc.nodes().unwrap();
    assert_eq!(nodes.master, "Gateway");
    assert!(nodes.slaves.is_empty());

    assert!(doc.signals().is_empty());
    assert!(doc.diagnostic_signals().is_empty());
    assert!(doc.frames().is_empty());
    assert!(doc.diagnostic_frames().is_empty());
    assert!(doc.node_attributes().is_empty());
    assert!(doc.schedule_tables().is_empty());
    assert!(doc.signal_encoding_types().is_empty());
    assert!(doc.signal_representation().is_empty());
    Ok(())
}

#[test]
fn unterminated_block_reports_its_opening_line() {
    let err = ldf_rs::parse_file(&test_data_path("unterminated.ldf")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Structural);
    assert_eq!(err.line(), Some(10));
    assert_eq!(err.text(), Some("Frames {"));
}

#[test]
fn unclosed_flat_section_before_next_section() {
    let err = ldf_rs::parse_file(&test_data_path("unclosed_signals.ldf")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Structural);
    assert_eq!(err.line(), Some(4));
    assert_eq!(err.text(), Some("Signals {"));
}

#[test]
fn unclosed_nested_section_does_not_swallow_next_section() {
    let err = ldf_rs::parse_file(&test_data_path("unclosed_encoding.ldf")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Structural);
    assert_eq!(err.line(), Some(4));
    assert_eq!(err.text(), Some("Signal_encoding_types {"));
}

#[test]
fn missing_file_is_io_error() {
    let err = ldf_rs::parse_file(&test_data_path("does_not_exist.ldf")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
}

//! Embedding session tests: both components driven over the sample fixture.

mod common;

use common::{EditorTarget, RecordingEditor, RecordingSink, sample_fixture};
use std::sync::Arc;
use viewmux::a11y::{BridgeError, EmbeddedNodeId, EventKind, Extras, HostNodeId, Rect};
use viewmux::config::{Config, RegionConfig};
use viewmux::input::{EditorAttributes, FocusSignal, InputSession, RestartRequest, TargetHandle};
use viewmux::{EmbeddingSession, TreeFixture, TreeWalker};

type FixtureSession = EmbeddingSession<Arc<TreeFixture>>;

fn session_with(config: Config) -> (FixtureSession, Arc<TreeFixture>) {
    let fixture = sample_fixture();
    let session =
        EmbeddingSession::with_probe(config, Arc::clone(&fixture), Arc::clone(&fixture)).unwrap();
    (session, fixture)
}

fn session() -> (FixtureSession, Arc<TreeFixture>) {
    session_with(Config::default())
}

const ROOT: HostNodeId = HostNodeId(0);

// ---------------------------------------------------------------------------
// Accessibility
// ---------------------------------------------------------------------------

#[test]
fn test_walk_assigns_ids_breadth_first() {
    let (session, _) = session();
    let walked = session.walk(&TreeWalker::new(), ROOT).unwrap();

    let ids: Vec<_> = walked.iter().map(|w| w.node.id).collect();
    assert_eq!(
        ids,
        vec![
            ROOT,
            HostNodeId(5000),
            HostNodeId(5001),
            HostNodeId(5002),
            HostNodeId(5003)
        ]
    );
    let depths: Vec<_> = walked.iter().map(|w| w.depth).collect();
    assert_eq!(depths, vec![0, 1, 1, 1, 2]);
}

#[test]
fn test_relationships_use_host_ids() {
    let (session, _) = session();
    session.walk(&TreeWalker::new(), ROOT).unwrap();

    let label = session.describe_node(HostNodeId(5000)).unwrap();
    let field = session.describe_node(HostNodeId(5001)).unwrap();
    let inner = session.describe_node(HostNodeId(5003)).unwrap();

    assert_eq!(label.label_for, Some(HostNodeId(5001)));
    assert_eq!(label.traversal_before, Some(HostNodeId(5001)));
    assert_eq!(field.labeled_by, Some(HostNodeId(5000)));
    assert_eq!(field.traversal_after, Some(HostNodeId(5000)));
    assert_eq!(field.children, vec![HostNodeId(5003)]);
    assert_eq!(inner.parent, Some(HostNodeId(5001)));
    assert!(session.bridge().lock().relationship_probe_error().is_none());
}

#[test]
fn test_region_offset_applies_to_embedded_nodes_only() {
    let mut config = Config::default();
    config.bridge.region = RegionConfig {
        left: 30,
        top: 500,
        right: 430,
        bottom: 800,
    };
    let (session, _) = session_with(config);

    let root = session.describe_node(ROOT).unwrap();
    let label = session.describe_node(HostNodeId(5000)).unwrap();

    assert_eq!(root.attributes.bounds_in_parent, Rect::new(0, 0, 400, 300));
    assert_eq!(label.attributes.bounds_in_parent, Rect::new(40, 510, 420, 540));
    assert_eq!(label.attributes.text.as_deref(), Some("Email"));
}

#[test]
fn test_actions_reach_the_embedded_node() {
    let (session, fixture) = session();
    session.walk(&TreeWalker::new(), ROOT).unwrap();

    assert_eq!(
        session.perform_action(HostNodeId(5002), 16, &Extras::new()),
        Ok(true)
    );
    let performed = fixture.performed_actions();
    assert_eq!(performed.len(), 1);
    assert_eq!(performed[0].node, EmbeddedNodeId(12));
    assert_eq!(performed[0].action, 16);
}

#[test]
fn test_fixture_events_translate_or_fail_attribution() {
    let (session, fixture) = session();
    session.walk(&TreeWalker::new(), ROOT).unwrap();
    let events = fixture.events().to_vec();

    let focused = session.translate_event(events[0].clone()).unwrap();
    assert_eq!(focused.kind, EventKind::ViewFocused);
    assert_eq!(focused.source, HostNodeId(5001));

    let changed = session.translate_event(events[1].clone()).unwrap();
    assert_eq!(changed.records[0].source, HostNodeId(5003));
    assert_eq!(changed.text, vec!["a".to_string()]);

    assert_eq!(
        session.translate_event(events[2].clone()),
        Err(BridgeError::UnattributedEvent(EmbeddedNodeId(99)))
    );
}

#[test]
fn test_events_before_walk_cannot_be_attributed() {
    let (session, fixture) = session();
    session.describe_node(ROOT).unwrap();
    let sink = RecordingSink::default();

    // The inner view (20) has not been enumerated yet.
    let changed = fixture.events()[1].clone();
    assert_eq!(
        session.delegate_event(changed, &sink),
        Err(BridgeError::UnattributedRecord {
            index: 0,
            embedded: EmbeddedNodeId(20),
        })
    );
    assert_eq!(session.delegate_event(fixture.events()[0].clone(), &sink), Ok(true));
    assert_eq!(sink.events.lock().len(), 1);
}

#[test]
fn test_unavailable_probe_only_disables_relationships() {
    let fixture = Arc::new(
        TreeFixture::from_yaml(&format!("{}\nprobe_unavailable: true\n", common::SAMPLE_FIXTURE))
            .unwrap(),
    );
    let session =
        EmbeddingSession::with_probe(Config::default(), Arc::clone(&fixture), Arc::clone(&fixture))
            .unwrap();
    let walked = session.walk(&TreeWalker::new(), ROOT).unwrap();

    assert_eq!(walked.len(), 5);
    assert!(walked.iter().all(|w| w.node.label_for.is_none()));
    assert!(session.bridge().lock().relationship_probe_error().is_some());
}

#[test]
fn test_invalid_config_is_rejected() {
    let mut config = Config::default();
    config.bridge.first_embedded_id = 1;
    let err = EmbeddingSession::new(config, sample_fixture()).unwrap_err();
    assert!(format!("{err:#}").contains("first_embedded_id"));
}

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

#[test]
fn test_input_session_follows_focus() {
    let (session, _) = session();
    let host_editor = RecordingEditor::new("host");
    let field = EditorTarget::new("field");
    let field_handle = Arc::clone(&field) as Arc<dyn TargetHandle>;
    {
        let mut demuxer = session.demuxer().lock();
        demuxer.set_default_endpoint(Arc::clone(&host_editor) as Arc<dyn InputSession>);
        demuxer.register_target(11, Arc::clone(&field_handle));
    }
    let input = session.input_session();

    assert!(input.commit_text("to host", 1));

    session
        .demuxer()
        .lock()
        .notify_focus_candidate(&field_handle, FocusSignal::ShowInputSurface);
    assert!(input.commit_text("to field", 1));
    assert_eq!(input.text_before_cursor(8, 0), Some("to field".to_string()));

    assert_eq!(host_editor.committed(), vec!["to host"]);
    assert_eq!(field.editor.committed(), vec!["to field"]);
    assert_eq!(
        session.demuxer().lock().take_restart_request(),
        Some(RestartRequest { target: Some(11) })
    );
}

#[test]
fn test_session_creation_attributes_reach_target() {
    let (session, _) = session();
    let field = EditorTarget::new("field");
    let field_handle = Arc::clone(&field) as Arc<dyn TargetHandle>;
    let attributes = EditorAttributes {
        input_type: 33,
        field_name: Some("email".to_string()),
        ..EditorAttributes::default()
    };

    let mut demuxer = session.demuxer().lock();
    demuxer.register_target(11, Arc::clone(&field_handle));
    demuxer.notify_focus_candidate_in_context(&field_handle, ["ime::show_soft_input"]);
    assert!(demuxer.create_session(attributes.clone()).is_some());
    drop(demuxer);

    assert_eq!(field.seen.lock().as_slice(), &[attributes]);
}

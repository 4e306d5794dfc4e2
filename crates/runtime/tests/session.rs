use std::io::Write;

use board_core::{ContainerId, PieceId, PieceType, Point};
use board_runtime::{BoardRuntime, RuntimeConfig, RuntimeError, Session};

const SESSION: &str = r#"{
    "title": "short game",
    "events": [
        {
            "event": "reset",
            "rule": {"name": "RuleBgCasual", "title": "Casual"},
            "seats": {"local": "white"},
            "match": {
                "id": 1,
                "length": 3,
                "score": [0, 0],
                "currentGame": {
                    "hasStarted": true,
                    "turnPlayer": "black",
                    "turnDice": {"values": [6, 1], "movesLeft": [6, 1]},
                    "state": {
                        "points": [
                            [{"id": 1, "type": "white"}], [], [], [], [], [],
                            [], [], [], [], [], [],
                            [], [], [], [], [], [],
                            [], [], [], [], [], [{"id": 2, "type": "black"}, {"id": 3, "type": "black"}]
                        ],
                        "bar": [[], []]
                    }
                }
            }
        },
        {"event": "turn_started"},
        {
            "event": "actions",
            "actions": [
                {"type": "move", "piece": 3, "to": 17},
                {"type": "move", "piece": 2, "to": 22}
            ]
        },
        {"event": "actions", "actions": [{"type": "hit", "piece": 42}]},
        {"event": "pause", "ms": 100},
        {"event": "undo"},
        {"event": "game_ended", "winner": "black"}
    ]
}"#;

fn point(index: u8) -> ContainerId {
    ContainerId::Point(Point::new(index).expect("point index in range"))
}

#[tokio::test(start_paused = true)]
async fn test_session_file_replays_onto_board() {
    let mut file = tempfile::NamedTempFile::new().expect("Temp file should be created");
    file.write_all(SESSION.as_bytes())
        .expect("Session should be written");

    let session = Session::load(file.path()).expect("Session should load");
    assert_eq!(session.title, "short game");
    assert_eq!(session.events.len(), 7);

    let runtime = BoardRuntime::start(RuntimeConfig::default())
        .await
        .expect("Runtime should start successfully");
    let handle = runtime.handle();

    let summary = session
        .replay(&handle)
        .await
        .expect("Replay should finish");
    assert_eq!(summary.events, 7);
    assert_eq!(summary.actions, 2);
    assert_eq!(summary.rejected, 1);

    let view = handle.query_view().await.expect("Query should succeed");
    let registry = view.registry();
    assert_eq!(registry.container_of(PieceId(1)), Some(point(0)));
    assert_eq!(registry.container_of(PieceId(3)), Some(point(17)));
    assert_eq!(registry.container_of(PieceId(2)), Some(point(22)));
    assert_eq!(registry.count_of(PieceType::Black), 2);
    assert_eq!(view.seats().local, PieceType::White);
}

#[test]
fn test_missing_session_file_reports_path() {
    let dir = tempfile::tempdir().expect("Temp dir should be created");
    let path = dir.path().join("absent.json");

    let err = Session::load(&path).expect_err("Missing file should fail");
    match err {
        RuntimeError::SessionIo { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("expected io error, got {other:?}"),
    }
}

#[test]
fn test_malformed_session_file_reports_format_error() {
    let mut file = tempfile::NamedTempFile::new().expect("Temp file should be created");
    file.write_all(b"{\"events\": [{\"event\": \"reset\"}]}")
        .expect("Session should be written");

    let err = Session::load(file.path()).expect_err("Reset without match should fail");
    assert!(matches!(err, RuntimeError::SessionFormat { .. }));
}

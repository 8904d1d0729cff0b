use crate::integration::{init_tracing, test_app};
use crate::utils::TestConn;
use beacon_core::SignalMessage;
use serde_json::json;

/// Joining a second room without leaving the first moves the membership:
/// the old room gets `user-left` and later broadcasts no longer reach the
/// mover.
#[tokio::test]
async fn test_rejoin_moves_membership() {
    init_tracing();
    let app = test_app();

    let mut mover = TestConn::connect(&app);
    let mut stayer = TestConn::connect(&app);

    stayer.join(&app, "r1").await;
    mover.join(&app, "r1").await;
    mover.join(&app, "r2").await;

    assert_eq!(
        stayer.drain(),
        vec![
            SignalMessage::UserJoined {
                room: "r1".into(),
                payload: None,
            },
            SignalMessage::UserLeft {
                room: "r1".into(),
                payload: None,
            },
        ]
    );

    stayer
        .send(
            &app,
            &SignalMessage::Offer {
                room: "r1".into(),
                payload: Some(json!({"sdp": "v=0"})),
            },
        )
        .await;

    assert!(mover.drain().is_empty(), "mover left r1 and must not hear it");
}

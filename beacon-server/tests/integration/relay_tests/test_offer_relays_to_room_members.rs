use crate::integration::{init_tracing, test_app};
use crate::utils::TestConn;
use beacon_core::SignalMessage;
use serde_json::json;

/// Two connections in one room exchange an offer; a third connection in a
/// different room sees nothing, and the sender never hears its own frame.
#[tokio::test]
async fn test_offer_relays_to_room_members() {
    init_tracing();
    let app = test_app();

    let mut alice = TestConn::connect(&app);
    let mut bob = TestConn::connect(&app);
    let mut carol = TestConn::connect(&app);

    alice.join(&app, "r1").await;
    bob.join(&app, "r1").await;
    carol.join(&app, "r2").await;

    // alice was already in r1 when bob arrived
    assert_eq!(
        alice.drain(),
        vec![SignalMessage::UserJoined {
            room: "r1".into(),
            payload: None,
        }]
    );
    bob.drain();

    let offer = SignalMessage::Offer {
        room: "r1".into(),
        payload: Some(json!({"type": "offer", "sdp": "v=0"})),
    };
    alice.send(&app, &offer).await;

    assert_eq!(bob.drain(), vec![offer]);
    assert!(alice.drain().is_empty(), "sender must not hear its own offer");
    assert!(carol.drain().is_empty(), "other rooms must see nothing");
}

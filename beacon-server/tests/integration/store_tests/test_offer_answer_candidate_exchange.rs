use crate::integration::{init_tracing, test_app};
use crate::utils::{get_json, post_json};
use axum::http::StatusCode;
use beacon_server::router;
use serde_json::json;

/// Full polled negotiation: A deposits an offer, B reads it and answers,
/// both exchange two candidates each, and either side's final candidate
/// poll sees all four in send order.
#[tokio::test]
async fn test_offer_answer_candidate_exchange() {
    init_tracing();
    let router = router(test_app());

    let offer = json!({"type": "offer", "sdp": "v=0\r\no=alice"});
    let (status, body) = post_json(
        &router,
        "/offer",
        json!({"roomId": "r1", "offer": offer}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true}));

    let (status, body) = get_json(&router, "/offer?roomId=r1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"offer": offer}));

    let answer = json!({"type": "answer", "sdp": "v=0\r\no=bob"});
    let (status, _) = post_json(
        &router,
        "/answer",
        json!({"roomId": "r1", "answer": answer}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = get_json(&router, "/answer?roomId=r1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"answer": answer}));

    // a rewritten offer clobbers the first
    let offer2 = json!({"type": "offer", "sdp": "v=0\r\no=alice2"});
    post_json(&router, "/offer", json!({"roomId": "r1", "offer": offer2})).await;
    let (_, body) = get_json(&router, "/offer?roomId=r1").await;
    assert_eq!(body, json!({"offer": offer2}));

    let candidates = [
        json!({"candidate": "candidate:a1"}),
        json!({"candidate": "candidate:b1"}),
        json!({"candidate": "candidate:a2"}),
        json!({"candidate": "candidate:b2"}),
    ];
    for candidate in &candidates {
        let (status, _) = post_json(
            &router,
            "/ice-candidate",
            json!({"roomId": "r1", "candidate": candidate}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let expected = json!({"candidates": candidates});
    let (status, body) = get_json(&router, "/ice-candidate?roomId=r1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, expected);

    // polling is non-destructive
    let (_, again) = get_json(&router, "/ice-candidate?roomId=r1").await;
    assert_eq!(again, expected);
}

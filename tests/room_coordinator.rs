//! Integration tests for the room coordinator driven through its public
//! API (no real sockets — the transport is a thin serde/tokio-tungstenite
//! shell around `Coordinator`, per SPEC_FULL.md's Test Tooling section).

use portal_chess::server::{Coordinator, CreateRoomPayload, JoinRoomPayload, ProtocolError};
use tokio::sync::mpsc;

#[tokio::test]
async fn s6_style_room_locks_then_rejects_a_third_joiner() {
    let coordinator = Coordinator::new();
    let (host_tx, _host_rx) = mpsc::unbounded_channel();
    let (guest_tx, _guest_rx) = mpsc::unbounded_channel();
    let (late_tx, _late_rx) = mpsc::unbounded_channel();

    let room_id = coordinator
        .create_room(1, host_tx, CreateRoomPayload { time_minutes: Some(0.1) })
        .await;

    coordinator
        .join_room(2, guest_tx, &JoinRoomPayload::Bare(room_id.clone()))
        .await
        .unwrap();

    let err = coordinator
        .join_room(3, late_tx, &JoinRoomPayload::Bare(room_id))
        .await
        .unwrap_err();
    assert_eq!(err, ProtocolError::RoomLocked);
}

#[tokio::test]
async fn joining_without_a_room_id_is_rejected() {
    let coordinator = Coordinator::new();
    let (tx, _rx) = mpsc::unbounded_channel();
    let err = coordinator
        .join_room(1, tx, &JoinRoomPayload::Bare(String::new()))
        .await
        .unwrap_err();
    assert_eq!(err, ProtocolError::MissingRoomId);
}

#[tokio::test]
async fn disconnecting_both_players_empties_and_drops_the_room() {
    let coordinator = Coordinator::new();
    let (host_tx, _host_rx) = mpsc::unbounded_channel();
    let (guest_tx, _guest_rx) = mpsc::unbounded_channel();

    let room_id = coordinator
        .create_room(1, host_tx, CreateRoomPayload { time_minutes: None })
        .await;
    coordinator
        .join_room(2, guest_tx, &JoinRoomPayload::Bare(room_id.clone()))
        .await
        .unwrap();

    coordinator.disconnect(1).await;
    coordinator.disconnect(2).await;

    // The room is gone; joining it now reports not-found rather than
    // room-locked or success.
    let (late_tx, _late_rx) = mpsc::unbounded_channel();
    let err = coordinator
        .join_room(3, late_tx, &JoinRoomPayload::Bare(room_id))
        .await
        .unwrap_err();
    assert_eq!(err, ProtocolError::NotFound);
}

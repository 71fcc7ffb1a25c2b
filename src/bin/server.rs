//! The Portal Chess match server binary: accepts WebSocket connections,
//! decodes the event protocol (§6), and dispatches into the room
//! coordinator.

use futures_util::{SinkExt, StreamExt};
use portal_chess::server::{
    Ack, Coordinator, CreateRoomPayload, JoinRoomPayload, MakeMovePayload, ProtocolError,
    ServerEvent,
};
use serde::Deserialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;

/// The one incoming envelope shape every client event arrives in:
/// `{event, payload, ackId}`. The simulation/UI clients this core was
/// extracted from are out of scope (§1); this is the minimal shape a
/// conforming client must send.
#[derive(Debug, Deserialize)]
struct ClientEnvelope {
    event: String,
    #[serde(default)]
    payload: serde_json::Value,
    #[serde(rename = "ackId")]
    ack_id: Option<u64>,
}

#[derive(Debug, serde::Serialize)]
struct AckEnvelope {
    #[serde(rename = "ackId")]
    ack_id: u64,
    #[serde(flatten)]
    ack: Ack,
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000);

    let listener = match TcpListener::bind(("0.0.0.0", port)).await {
        Ok(listener) => listener,
        Err(err) => {
            log::error!("failed to bind port {port}: {err}");
            std::process::exit(2);
        }
    };
    log::info!("portal-chess-server listening on port {port}");

    let coordinator = Arc::new(Coordinator::new());
    let next_socket_id = Arc::new(AtomicU64::new(1));

    while let Ok((stream, addr)) = listener.accept().await {
        let coordinator = coordinator.clone();
        let socket_id = next_socket_id.fetch_add(1, Ordering::Relaxed);
        tokio::spawn(async move {
            if let Err(err) = handle_connection(stream, socket_id, coordinator).await {
                log::warn!("connection {addr} (socket {socket_id}) ended: {err}");
            }
        });
    }
}

async fn handle_connection(
    stream: TcpStream,
    socket_id: u64,
    coordinator: Arc<Coordinator>,
) -> Result<(), Box<dyn std::error::Error>> {
    let ws_stream = tokio_tungstenite::accept_async(stream).await?;
    let (mut outgoing, mut incoming) = ws_stream.split();

    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<ServerEvent>();
    let (text_tx, mut text_rx) = mpsc::unbounded_channel::<String>();
    let writer_task = tokio::spawn(async move {
        loop {
            let text = tokio::select! {
                Some(event) = event_rx.recv() => serde_json::to_string(&event).ok(),
                Some(text) = text_rx.recv() => Some(text),
                else => break,
            };
            let Some(text) = text else { continue };
            if outgoing.send(Message::Text(text)).await.is_err() {
                break;
            }
        }
    });

    while let Some(Ok(message)) = incoming.next().await {
        let Message::Text(text) = message else {
            continue;
        };
        let Ok(envelope) = serde_json::from_str::<ClientEnvelope>(&text) else {
            continue;
        };
        let ack = dispatch(&coordinator, socket_id, event_tx.clone(), &envelope).await;
        if let Some(ack_id) = envelope.ack_id {
            let reply = AckEnvelope { ack_id, ack };
            if let Ok(text) = serde_json::to_string(&reply) {
                let _ = text_tx.send(text);
            }
        }
    }

    coordinator.disconnect(socket_id).await;
    writer_task.abort();
    Ok(())
}

async fn dispatch(
    coordinator: &Coordinator,
    socket_id: u64,
    sender: mpsc::UnboundedSender<ServerEvent>,
    envelope: &ClientEnvelope,
) -> Ack {
    match envelope.event.as_str() {
        "createRoom" => {
            let payload: CreateRoomPayload =
                serde_json::from_value(envelope.payload.clone()).unwrap_or(CreateRoomPayload { time_minutes: None });
            let room_id = coordinator.create_room(socket_id, sender, payload).await;
            Ack::CreateRoom(portal_chess::server::protocol::CreateRoomAck { room_id })
        }
        "joinRoom" => {
            let Ok(payload) = serde_json::from_value::<JoinRoomPayload>(envelope.payload.clone()) else {
                return Ack::error(ProtocolError::InvalidPayload);
            };
            match coordinator.join_room(socket_id, sender, &payload).await {
                Ok(()) => Ack::ok(),
                Err(err) => Ack::error(err),
            }
        }
        "makeMove" => {
            let Ok(payload) = serde_json::from_value::<MakeMovePayload>(envelope.payload.clone()) else {
                return Ack::error(ProtocolError::InvalidPayload);
            };
            match coordinator.make_move(payload).await {
                Ok(()) => Ack::ok(),
                Err(err) => Ack::error(err),
            }
        }
        _ => Ack::error(ProtocolError::InvalidPayload),
    }
}

//! The room registry (§4.7, §5): the only process-wide mutable
//! structure. Mutated only on connect/disconnect/create/join; each room's
//! own ticker task owns that room's lock for the span of one tick or one
//! handler call, so there is no cross-room sharing and no locking
//! discipline beyond "one handler at a time" per room.

use super::clock::{TickBaseline, Ticker};
use super::protocol::{
    CreateRoomPayload, EndResult, GameEndEvent, GameStartEvent, JoinRoomPayload, MakeMovePayload,
    MoveMadeEvent, PlayerJoinedEvent, PlayerLeftEvent, ProtocolError, ServerEvent,
};
use super::room::{Room, RoomPhase, SocketId};
use crate::pieces::Color;
use rand::Rng;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};

pub type EventSender = mpsc::UnboundedSender<ServerEvent>;

struct RoomEntry {
    room: Arc<Mutex<Room>>,
    senders: HashMap<SocketId, EventSender>,
    tick_baseline: Arc<TickBaseline>,
}

/// Owns every room on this process. There is no persistence (§6): the
/// registry starts empty and loses all state on restart.
#[derive(Default)]
pub struct Coordinator {
    rooms: Arc<Mutex<HashMap<String, RoomEntry>>>,
}

fn random_room_id() -> String {
    const HEX: &[u8] = b"0123456789abcdef";
    let mut rng = rand::thread_rng();
    (0..5).map(|_| HEX[rng.gen_range(0..16)] as char).collect()
}

impl Coordinator {
    pub fn new() -> Self {
        Coordinator::default()
    }

    /// `createRoom(timeMinutes?)` (§4.7): the host is seated as White
    /// immediately, so the first subsequent joiner takes Black and locks
    /// the room — a create followed by one join is the whole two-player
    /// flow.
    pub async fn create_room(&self, host: SocketId, host_sender: EventSender, payload: CreateRoomPayload) -> String {
        let mut rooms = self.rooms.lock().await;
        let mut id = random_room_id();
        while rooms.contains_key(&id) {
            id = random_room_id();
        }
        let mut room = Room::new(id.clone(), host, payload.time_minutes);
        room.join(host).expect("a freshly created room always seats its first player");
        let mut senders = HashMap::new();
        senders.insert(host, host_sender);
        rooms.insert(
            id.clone(),
            RoomEntry {
                room: Arc::new(Mutex::new(room)),
                senders,
                tick_baseline: Arc::new(TickBaseline::new()),
            },
        );
        id
    }

    /// `joinRoom(id)` (§4.7). On the second participant, emits
    /// `gameStart` to both and spawns that room's clock ticker.
    pub async fn join_room(
        &self,
        socket: SocketId,
        sender: EventSender,
        payload: &JoinRoomPayload,
    ) -> Result<(), ProtocolError> {
        let room_id = payload.room_id().filter(|s| !s.is_empty()).ok_or(ProtocolError::MissingRoomId)?;

        let (room_arc, became_active, baseline) = {
            let mut rooms = self.rooms.lock().await;
            let entry = rooms.get_mut(room_id).ok_or(ProtocolError::NotFound)?;
            let mut room = entry.room.lock().await;
            let color = room.join(socket)?;
            entry.senders.insert(socket, sender);
            let host_sender = entry.senders.get(&room.host).cloned();
            if let Some(host_sender) = &host_sender {
                if color == Color::Black {
                    let _ = host_sender.send(ServerEvent::PlayerJoined(PlayerJoinedEvent {
                        socket_id: socket.to_string(),
                    }));
                }
            }
            let became_active = room.phase == RoomPhase::Active;
            if became_active {
                for (sock, assigned) in [(room.white, Color::White), (room.black, Color::Black)] {
                    if let Some(sock) = sock {
                        if let Some(tx) = entry.senders.get(&sock) {
                            let _ = tx.send(ServerEvent::GameStart(GameStartEvent {
                                room_id: room_id.to_string(),
                                color: assigned,
                                state: room.position.clone(),
                                clocks: room.clocks,
                            }));
                        }
                    }
                }
            }
            let baseline = entry.tick_baseline.clone();
            (entry.room.clone(), became_active, baseline)
        };

        if became_active {
            self.spawn_ticker(room_id.to_string(), room_arc, baseline);
        }
        Ok(())
    }

    /// `makeMove {roomId, resolved}` (§4.7): charges a final pre-apply
    /// tick for the mover's think time since the room's last tick (either
    /// the periodic ticker or a previous move), then resets the baseline
    /// so that time is never charged twice.
    pub async fn make_move(&self, payload: MakeMovePayload) -> Result<(), ProtocolError> {
        let rooms = self.rooms.lock().await;
        let entry = rooms.get(&payload.room_id).ok_or(ProtocolError::NotFound)?;
        let mut room = entry.room.lock().await;
        let delta = entry.tick_baseline.elapsed_and_reset_ms();
        let outcome = room.make_move(payload.resolved, delta)?;

        for tx in entry.senders.values() {
            let _ = tx.send(ServerEvent::MoveMade(MoveMadeEvent {
                resolved: outcome.resolved,
                state: room.position.clone(),
                clocks: outcome.clocks,
            }));
        }
        if let Some((result, winner)) = outcome.end {
            broadcast_game_end(&entry.senders, result, winner);
        }
        Ok(())
    }

    pub async fn disconnect(&self, socket: SocketId) {
        let mut rooms = self.rooms.lock().await;
        let mut to_remove = Vec::new();
        for (id, entry) in rooms.iter_mut() {
            if entry.senders.remove(&socket).is_none() {
                continue;
            }
            let mut room = entry.room.lock().await;
            room.remove_socket(socket);
            for tx in entry.senders.values() {
                let _ = tx.send(ServerEvent::PlayerLeft(PlayerLeftEvent {
                    socket_id: socket.to_string(),
                }));
            }
            if room.is_empty() {
                to_remove.push(id.clone());
            }
        }
        for id in to_remove {
            rooms.remove(&id);
        }
    }

    fn spawn_ticker(&self, room_id: String, room: Arc<Mutex<Room>>, baseline: Arc<TickBaseline>) {
        tokio::spawn(async move {
            let mut ticker = Ticker::new();
            loop {
                ticker.wait().await;
                let delta = baseline.elapsed_and_reset_ms();
                let mut guard = room.lock().await;
                if guard.phase == RoomPhase::Terminal {
                    break;
                }
                let turn = guard.position.side_to_move;
                let end = guard.tick(delta);
                let clocks = guard.clocks;
                drop(guard);

                log::trace!("room {room_id} clock tick: {clocks:?}, turn {turn:?}");

                if let Some((result, winner)) = end {
                    let _ = (result, winner);
                    break;
                }
            }
        });
    }
}

fn broadcast_game_end(senders: &HashMap<SocketId, EventSender>, result: EndResult, winner: Option<Color>) {
    for tx in senders.values() {
        let _ = tx.send(ServerEvent::GameEnd(GameEndEvent { result, winner }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_then_join_assigns_colors_and_emits_game_start() {
        let coordinator = Coordinator::new();
        let (host_tx, mut host_rx) = mpsc::unbounded_channel();
        let (guest_tx, mut guest_rx) = mpsc::unbounded_channel();

        let payload = CreateRoomPayload { time_minutes: None };
        let room_id = coordinator.create_room(1, host_tx, payload).await;

        let join_payload = JoinRoomPayload::Bare(room_id.clone());
        coordinator.join_room(2, guest_tx, &join_payload).await.unwrap();

        // The host is seated at creation, so the guest's join is the
        // "second participant" §4.7 describes: it emits `playerJoined`
        // to the host first, then locks the room and emits `gameStart`
        // to both.
        let host_player_joined = host_rx.recv().await.unwrap();
        let host_game_start = host_rx.recv().await.unwrap();
        let guest_event = guest_rx.recv().await.unwrap();
        assert!(matches!(host_player_joined, ServerEvent::PlayerJoined(_)));
        match (host_game_start, guest_event) {
            (ServerEvent::GameStart(h), ServerEvent::GameStart(g)) => {
                assert_eq!(h.color, Color::White);
                assert_eq!(g.color, Color::Black);
            }
            _ => panic!("expected gameStart for both players"),
        }
    }

    #[tokio::test]
    async fn joining_missing_room_is_not_found() {
        let coordinator = Coordinator::new();
        let (tx, _rx) = mpsc::unbounded_channel();
        let payload = JoinRoomPayload::Bare("zzzzz".into());
        let err = coordinator.join_room(1, tx, &payload).await.unwrap_err();
        assert_eq!(err, ProtocolError::NotFound);
    }
}

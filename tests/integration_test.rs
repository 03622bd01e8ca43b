use buzzer::protocol::{ClientMessage, ServerMessage};
use buzzer::state::AppState;
use buzzer::types::BuzzerState;
use buzzer::ws::handlers::handle_message;
use std::sync::Arc;
use tokio::sync::broadcast::Receiver;

/// Everything currently queued on a receiver
fn drain(rx: &mut Receiver<ServerMessage>) -> Vec<ServerMessage> {
    let mut out = Vec::new();
    while let Ok(msg) = rx.try_recv() {
        out.push(msg);
    }
    out
}

fn register(name: &str) -> ClientMessage {
    ClientMessage::RegisterPlayer {
        name: name.to_string(),
    }
}

fn scores(msg: &ServerMessage) -> Vec<(String, i64)> {
    match msg {
        ServerMessage::UpdatePlayers { players } => players
            .iter()
            .map(|p| (p.name.clone(), p.score))
            .collect(),
        other => panic!("Expected UpdatePlayers, got {:?}", other),
    }
}

/// End-to-end flow: register, race to buzz, moderator credits the winner
#[tokio::test]
async fn test_full_buzzer_round() {
    let state = Arc::new(AppState::new());
    let mut all_rx = state.broadcast.subscribe();
    let mut moderator_rx = state.moderator_broadcast.subscribe();

    handle_message(ClientMessage::RegisterModerator, "mod", &state).await;
    handle_message(register("Alice"), "alice", &state).await;
    handle_message(register("Bob"), "bob", &state).await;
    drain(&mut all_rx);

    // Alice is first, Bob's press is dropped
    handle_message(ClientMessage::BuzzerPressed, "alice", &state).await;
    handle_message(ClientMessage::BuzzerPressed, "bob", &state).await;

    assert_eq!(
        drain(&mut all_rx),
        vec![ServerMessage::BuzzerLocked {
            winner: "Alice".to_string()
        }]
    );
    assert_eq!(
        drain(&mut moderator_rx),
        vec![ServerMessage::BuzzerWinner {
            winner: "Alice".to_string()
        }]
    );

    handle_message(ClientMessage::ModeratorCorrect { points: 10.0 }, "mod", &state).await;

    let messages = drain(&mut all_rx);
    assert_eq!(messages.len(), 3);
    assert_eq!(
        scores(&messages[0]),
        vec![("Alice".to_string(), 10), ("Bob".to_string(), 0)]
    );
    assert_eq!(messages[1], ServerMessage::PlayCorrectSound);
    assert_eq!(messages[2], ServerMessage::BuzzerUnlocked);
    assert_eq!(state.snapshot().await.buzzer, BuzzerState::Unlocked);

    // Next question: Bob buzzes and gets it wrong
    handle_message(ClientMessage::BuzzerPressed, "bob", &state).await;
    handle_message(ClientMessage::ModeratorReleaseBuzzer, "mod", &state).await;

    let messages = drain(&mut all_rx);
    assert_eq!(
        messages[0],
        ServerMessage::BuzzerLocked {
            winner: "Bob".to_string()
        }
    );
    assert_eq!(
        scores(&messages[1]),
        vec![("Alice".to_string(), 11), ("Bob".to_string(), 0)]
    );
    assert_eq!(messages[2], ServerMessage::PlayWrongSound);
    assert_eq!(messages[3], ServerMessage::BuzzerUnlocked);
}

#[tokio::test]
async fn test_only_first_press_wins() {
    let state = Arc::new(AppState::new());
    let mut all_rx = state.broadcast.subscribe();

    let names = ["P1", "P2", "P3", "P4", "P5"];
    for name in names {
        handle_message(register(name), name, &state).await;
    }
    drain(&mut all_rx);

    for name in ["P3", "P1", "P5", "P2"] {
        handle_message(ClientMessage::BuzzerPressed, name, &state).await;
    }

    let locks: Vec<_> = drain(&mut all_rx)
        .into_iter()
        .filter(|m| matches!(m, ServerMessage::BuzzerLocked { .. }))
        .collect();
    assert_eq!(
        locks,
        vec![ServerMessage::BuzzerLocked {
            winner: "P3".to_string()
        }]
    );
}

#[tokio::test]
async fn test_palette_exhaustion_and_reuse() {
    let state = Arc::new(AppState::with_palette(["c1", "c2"], 16));
    let mut all_rx = state.broadcast.subscribe();

    handle_message(register("A"), "a", &state).await;
    handle_message(register("B"), "b", &state).await;
    drain(&mut all_rx);

    // No color left: nothing happens
    handle_message(register("C"), "c", &state).await;
    assert!(drain(&mut all_rx).is_empty());
    assert_eq!(state.snapshot().await.players.len(), 2);

    let color_a = state.snapshot().await.players[0].color.clone();

    state.apply(|s| s.disconnect("a")).await;
    let messages = drain(&mut all_rx);
    assert_eq!(scores(&messages[0]), vec![("B".to_string(), 0)]);

    handle_message(register("C"), "c", &state).await;
    let snapshot = state.snapshot().await;
    assert_eq!(snapshot.players.len(), 2);
    assert_eq!(snapshot.players[1].name, "C");
    assert_eq!(snapshot.players[1].color, color_a);
    assert_eq!(snapshot.colors_available, 0);
}

#[tokio::test]
async fn test_manual_score_adjustments() {
    let state = Arc::new(AppState::new());
    let mut all_rx = state.broadcast.subscribe();

    handle_message(register("Alice"), "alice", &state).await;
    drain(&mut all_rx);

    let add = ClientMessage::AddPointToPlayer {
        name: "Alice".to_string(),
    };
    let subtract = ClientMessage::SubtractPointFromPlayer {
        name: "Alice".to_string(),
    };

    handle_message(add.clone(), "mod", &state).await;
    handle_message(add, "mod", &state).await;
    assert_eq!(drain(&mut all_rx).len(), 2);

    for _ in 0..5 {
        handle_message(subtract.clone(), "mod", &state).await;
    }
    // Only the two subtractions that had something to take were broadcast
    let messages = drain(&mut all_rx);
    assert_eq!(messages.len(), 2);
    assert_eq!(scores(&messages[1]), vec![("Alice".to_string(), 0)]);
}

#[tokio::test]
async fn test_moderator_joining_mid_turn_gets_replay() {
    let state = Arc::new(AppState::new());
    let mut all_rx = state.broadcast.subscribe();

    handle_message(register("Alice"), "alice", &state).await;
    handle_message(ClientMessage::BuzzerPressed, "alice", &state).await;
    drain(&mut all_rx);

    let replies = handle_message(ClientMessage::RegisterModerator, "mod", &state).await;
    assert_eq!(replies.len(), 2);
    assert_eq!(
        replies[0],
        ServerMessage::BuzzerWinner {
            winner: "Alice".to_string()
        }
    );
    assert_eq!(scores(&replies[1]), vec![("Alice".to_string(), 0)]);

    // Registering twice is harmless
    let again = handle_message(ClientMessage::RegisterModerator, "mod", &state).await;
    assert_eq!(again, replies);
    assert_eq!(state.snapshot().await.moderators, 1);

    // Nobody else was told
    assert!(drain(&mut all_rx).is_empty());
}

#[tokio::test]
async fn test_late_joiner_and_typing() {
    let state = Arc::new(AppState::new());
    let mut all_rx = state.broadcast.subscribe();

    handle_message(register("Alice"), "alice", &state).await;
    handle_message(ClientMessage::BuzzerPressed, "alice", &state).await;

    let direct = state.apply(|s| s.connect("late")).await;
    assert_eq!(
        direct,
        vec![ServerMessage::BuzzerLocked {
            winner: "Alice".to_string()
        }]
    );
    drain(&mut all_rx);

    handle_message(
        ClientMessage::PlayerTyping {
            text: "Berlin".to_string(),
        },
        "alice",
        &state,
    )
    .await;
    // Unregistered connections cannot type
    handle_message(
        ClientMessage::PlayerTyping {
            text: "spam".to_string(),
        },
        "late",
        &state,
    )
    .await;

    assert_eq!(
        drain(&mut all_rx),
        vec![ServerMessage::UpdateText {
            name: "Alice".to_string(),
            text: "Berlin".to_string(),
        }]
    );
}

#[tokio::test]
async fn test_reset_buzzer() {
    let state = Arc::new(AppState::new());
    let mut all_rx = state.broadcast.subscribe();

    handle_message(register("Alice"), "alice", &state).await;
    handle_message(ClientMessage::BuzzerPressed, "alice", &state).await;
    drain(&mut all_rx);

    handle_message(ClientMessage::ResetBuzzer, "mod", &state).await;
    assert_eq!(drain(&mut all_rx), vec![ServerMessage::BuzzerUnlocked]);
    assert_eq!(state.snapshot().await.players[0].score, 0);

    // Unlocked again, so a new press wins
    handle_message(ClientMessage::BuzzerPressed, "alice", &state).await;
    assert_eq!(
        drain(&mut all_rx),
        vec![ServerMessage::BuzzerLocked {
            winner: "Alice".to_string()
        }]
    );
}

#[tokio::test]
async fn test_oversized_points_keep_session_consistent() {
    let state = Arc::new(AppState::new());
    let mut all_rx = state.broadcast.subscribe();

    handle_message(register("Alice"), "alice", &state).await;
    handle_message(ClientMessage::BuzzerPressed, "alice", &state).await;
    drain(&mut all_rx);

    let correct: ClientMessage =
        serde_json::from_str(r#"{"t":"moderator-correct","points":9223372036854775807}"#)
            .unwrap();
    handle_message(correct, "mod", &state).await;

    let messages = drain(&mut all_rx);
    assert_eq!(scores(&messages[0]), vec![("Alice".to_string(), i64::MAX)]);
    assert_eq!(messages[1], ServerMessage::PlayCorrectSound);
    assert_eq!(messages[2], ServerMessage::BuzzerUnlocked);

    handle_message(
        ClientMessage::AddPointToPlayer {
            name: "Alice".to_string(),
        },
        "mod",
        &state,
    )
    .await;
    let messages = drain(&mut all_rx);
    assert_eq!(scores(&messages[0]), vec![("Alice".to_string(), i64::MAX)]);
    assert_eq!(state.snapshot().await.buzzer, BuzzerState::Unlocked);
}

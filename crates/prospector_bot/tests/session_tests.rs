//! Full protocol transcripts driven through a session and the planner.

use std::io::Cursor;

use prospector_bot::{ProtocolError, Session};
use prospector_core::prelude::{StrategyConfig, TurnPlanner};
use prospector_test_utils::fixtures::SnapshotBuilder;

/// Handshake for an 8x8 map of 10 halite, with (5, 5) at 100 and (6, 5) at
/// 200. Player 0 sits at (4, 4), player 1 at (0, 0).
fn handshake() -> String {
    let mut text = String::from("{}\n2 0\n0 4 4\n1 0 0\n8 8\n");
    for y in 0..8 {
        let row: Vec<String> = (0..8)
            .map(|x| match (x, y) {
                (5, 5) => "100".to_string(),
                (6, 5) => "200".to_string(),
                _ => "10".to_string(),
            })
            .collect();
        text.push_str(&row.join(" "));
        text.push('\n');
    }
    text
}

/// Run the bot loop over a transcript and return what it wrote.
fn play(transcript: &str) -> Result<String, ProtocolError> {
    let mut session = Session::handshake(Cursor::new(transcript.as_bytes().to_vec()), Vec::new())?;
    session.ready("Prospector")?;
    let mut planner = TurnPlanner::new(StrategyConfig::default());
    while let Some(snapshot) = session.receive_snapshot()? {
        let plan = planner.plan_turn(&snapshot);
        if !session.submit(&plan.commands) {
            break;
        }
    }
    Ok(String::from_utf8(session.into_writer()).unwrap())
}

#[test]
fn test_received_snapshot_matches_fixture() {
    let transcript = format!("{}1\n0 1 0 5000\n0 5 5 50\n1 1 0 0\n1 2 2 0\n0\n", handshake());
    let mut session =
        Session::handshake(Cursor::new(transcript.into_bytes()), Vec::new()).unwrap();
    let snapshot = session.receive_snapshot().unwrap().unwrap();

    let expected = SnapshotBuilder::new()
        .size(8, 8)
        .fill(10)
        .halite(5, 5, 100)
        .halite(6, 5, 200)
        .shipyard(4, 4)
        .bank(5000)
        .turn(1)
        .ship(5, 5, 50)
        .enemy_ship(2, 2)
        .build();
    assert_eq!(snapshot, expected);
}

#[test]
fn test_transcript_round_trip() {
    let transcript = format!(
        "{}\
         1\n0 1 0 5000\n0 5 5 50\n1 0 0 5000\n0\n\
         2\n0 2 0 4000\n0 6 5 40\n2 4 4 0\n1 0 0 5000\n1\n5 5 100\n",
        handshake()
    );
    let output = play(&transcript).unwrap();
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "Prospector");
    // Richer cell to the east, and every spawn condition holds on turn 1.
    assert_eq!(lines[1], "m 0 e g");
    // Turn 2: the new ship (id 2) has one command, plus the mover's.
    let turn2: Vec<&str> = lines[2].split(" m ").collect();
    assert!(lines[2].starts_with('m'));
    assert_eq!(turn2.len(), 2);
}

#[test]
fn test_empty_turn_writes_empty_line() {
    // No ships and no money: nothing to do, but the turn is still answered.
    let transcript = format!("{}1\n0 0 0 0\n1 0 0 0\n0\n", handshake());
    let output = play(&transcript).unwrap();
    assert_eq!(output, "Prospector\n\n");
}

#[test]
fn test_truncated_frame_is_an_error() {
    let transcript = format!("{}1\n0 1 0 5000\n", handshake());
    assert!(matches!(
        play(&transcript),
        Err(ProtocolError::UnexpectedEof { .. })
    ));
}

#[test]
fn test_eof_before_first_turn_ends_cleanly() {
    let output = play(&handshake()).unwrap();
    assert_eq!(output, "Prospector\n");
}

#[test]
fn test_negative_values_are_rejected_before_planning() {
    let transcript = format!("{}1\n0 1 0 0\n0 2 2 -5\n1 0 0 0\n1\n3 2 -7\n", handshake());
    let mut session =
        Session::handshake(Cursor::new(transcript.into_bytes()), Vec::new()).unwrap();
    let err = session.receive_snapshot().unwrap_err();
    assert!(matches!(err, ProtocolError::BadInt { ref token, .. } if token == "-5"));
}

#[test]
fn test_overfull_hold_is_rejected() {
    let transcript = format!("{}1\n0 1 0 0\n0 2 2 1500\n1 0 0 0\n0\n", handshake());
    let mut session =
        Session::handshake(Cursor::new(transcript.into_bytes()), Vec::new()).unwrap();
    assert!(matches!(
        session.receive_snapshot(),
        Err(ProtocolError::Game(_))
    ));
}

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use kingside::engines::engine_trait::{EngineConfig, Options};
use kingside::uci::uci_top::UciSession;

/// Writer whose contents stay readable after the session takes ownership.
#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    fn text(&self) -> String {
        let bytes = self.0.lock().expect("buffer lock").clone();
        String::from_utf8(bytes).expect("utf8 output")
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().expect("buffer lock").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn session() -> (UciSession<SharedBuffer>, SharedBuffer) {
    let buffer = SharedBuffer::default();
    let config = EngineConfig {
        default_options: Options {
            max_depth: Some(2),
            ..Options::default()
        },
        fancy: false,
    };
    (UciSession::new(config, buffer.clone()), buffer)
}

fn send(session: &mut UciSession<SharedBuffer>, lines: &[&str]) {
    for line in lines {
        session.handle_command(line).expect("write to buffer");
    }
}

#[test]
fn handshake_and_readiness() {
    let (mut session, buffer) = session();
    send(&mut session, &["uci", "isready"]);
    let text = buffer.text();
    assert!(text.starts_with("id name Kingside\n"));
    assert!(text.contains("uciok\n"));
    assert!(text.ends_with("readyok\n"));
}

#[test]
fn depth_limited_go_reports_each_depth_then_bestmove() {
    let (mut session, buffer) = session();
    send(&mut session, &["position startpos moves e2e4", "go depth 3"]);
    session.wait_for_search();

    let text = buffer.text();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 4, "{text}");
    for (depth, line) in lines.iter().take(3).enumerate() {
        assert!(line.starts_with(&format!("info depth {} score cp ", depth + 1)), "{line}");
        assert!(line.contains(" pv "), "{line}");
    }
    assert!(lines[3].starts_with("bestmove "));
    assert_ne!(lines[3], "bestmove 0000");
}

#[test]
fn go_without_limits_uses_configured_defaults() {
    let (mut session, buffer) = session();
    send(&mut session, &["go"]);
    session.wait_for_search();
    let text = buffer.text();
    assert!(text.contains("info depth 2 "));
    assert!(!text.contains("info depth 3 "));
}

#[test]
fn mate_is_reported_in_moves() {
    let (mut session, buffer) = session();
    send(&mut session, &["position fen 6k1/5Q2/6K1/8/8/8/8/8 w - - 0 1", "go depth 4"]);
    session.wait_for_search();
    let text = buffer.text();
    assert!(text.contains("score mate 1 "), "{text}");
}

#[test]
fn checkmated_side_answers_null_move() {
    let (mut session, buffer) = session();
    send(
        &mut session,
        &["position startpos moves f2f3 e7e5 g2g4 d8h4", "go depth 2"],
    );
    session.wait_for_search();
    assert_eq!(buffer.text(), "bestmove 0000\n");
}

#[test]
fn stop_ends_an_infinite_search() {
    let (mut session, buffer) = session();
    send(&mut session, &["go infinite", "isready", "stop"]);
    let text = buffer.text();
    assert!(text.contains("readyok\n"));
    assert!(text.trim_end().lines().last().is_some_and(|l| l.starts_with("bestmove ")));
}

#[test]
fn bad_position_is_reported_not_fatal() {
    let (mut session, buffer) = session();
    send(&mut session, &["position startpos moves e2e5", "isready"]);
    let text = buffer.text();
    assert!(text.starts_with("info string position error: e2e5 is not a legal move"));
    assert!(text.ends_with("readyok\n"));
    assert!(session.handle_command("quit").expect("write to buffer"));
}

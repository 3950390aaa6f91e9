use std::env;
use std::sync::Arc;

use anyhow::Result;
use futures_util::stream::{SplitSink, StreamExt};
use futures_util::SinkExt;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio::time::{interval, Duration};
use tokio_tungstenite::tungstenite::protocol::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use typebeat::message::{ClientMessage, ClientMethod};
use typebeat::prompt::random_prompt;
use typebeat::response::ServerEvent;
use typebeat::session::versus::DEFAULT_DURATION_SECS;
use typebeat::session::{SessionEvent, TestMode, VersusPhase, VersusTest};

type SocketWriter = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>;

#[tokio::main]
async fn main() -> Result<()> {
    let room = env::args().nth(1).unwrap_or_else(|| "demo-duel".to_string());
    let token = env::args().nth(2).unwrap_or_else(|| "player".to_string());
    let url = "ws://127.0.0.1:3000";

    println!("Connecting to {}...", url);
    let (ws_stream, _) = connect_async(url).await?;
    println!("Connected! Joining room '{}' as '{}'", room, token);
    println!("Commands:");
    println!("  /quit             - leave the room and exit");
    println!("  <any other line>  - submit it as your full typed text");
    println!();

    let (write, read) = ws_stream.split();
    let writer = Arc::new(Mutex::new(write));

    let session = Arc::new(Mutex::new(VersusTest::new(
        room,
        random_prompt(),
        DEFAULT_DURATION_SECS,
    )));
    {
        let mut session = session.lock().await;
        flush_outbox(&mut session, &writer, &token).await?;
    }

    let reader_session = Arc::clone(&session);
    let reader_handle = tokio::spawn(async move {
        read_events(read, reader_session).await;
    });

    let ticker_session = Arc::clone(&session);
    let ticker_writer = Arc::clone(&writer);
    let ticker_token = token.clone();
    let ticker_handle = tokio::spawn(async move {
        let mut ticker = interval(Duration::from_secs(1));
        loop {
            ticker.tick().await;
            let mut session = ticker_session.lock().await;
            let before = session.phase();
            session.advance(SessionEvent::Tick);
            if flush_outbox(&mut session, &ticker_writer, &ticker_token)
                .await
                .is_err()
            {
                break;
            }
            announce_finish(before, &session);
        }
    });

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim() == "/quit" {
            send_method(&writer, ClientMethod::Leave, &token).await?;
            break;
        }

        let mut session = session.lock().await;
        let before = session.phase();
        session.advance(SessionEvent::Input(line));
        flush_outbox(&mut session, &writer, &token).await?;
        if session.phase() == VersusPhase::Active {
            print_status(&session);
        }
        announce_finish(before, &session);
    }

    reader_handle.abort();
    ticker_handle.abort();
    println!("Goodbye!");
    Ok(())
}

async fn read_events(
    mut read: futures_util::stream::SplitStream<WebSocketStream<MaybeTlsStream<TcpStream>>>,
    session: Arc<Mutex<VersusTest>>,
) {
    while let Some(message) = read.next().await {
        let text = match message {
            Ok(Message::Text(text)) => text,
            Ok(Message::Close(_)) | Err(_) => break,
            Ok(_) => continue,
        };
        let event: ServerEvent = match serde_json::from_str(&text) {
            Ok(event) => event,
            Err(_) => continue,
        };

        let mut session = session.lock().await;
        session.apply(&event);
        match event {
            ServerEvent::Joined { waiting: true, .. } => {
                println!("Waiting for an opponent in '{}'...", session.room());
            }
            ServerEvent::Joined {
                waiting: false,
                opponent_id,
            } => {
                if let Some(id) = opponent_id {
                    println!("Paired with opponent #{}", id);
                }
            }
            ServerEvent::Start => {
                println!("Race started! {}s on the clock.", session.seconds_remaining());
                println!("Prompt: {}", session.state().target());
            }
            ServerEvent::OpponentProgress { .. } => {
                println!(
                    "Opponent: {}/{} chars, {}% accuracy",
                    session.opponent_correct_chars(),
                    session.state().target().chars().count(),
                    session.opponent_accuracy()
                );
            }
            ServerEvent::OpponentFinished => {
                println!("Opponent finished their run.");
            }
            ServerEvent::OpponentLeft => {
                println!("Opponent left. Waiting for a new challenger...");
            }
            ServerEvent::RoomFull { room } => {
                println!("Room '{}' is already full, try another one.", room);
            }
            ServerEvent::Error { message } => {
                eprintln!("Server error: {}", message);
            }
        }
    }
}

/// Serializes one method into the wire envelope and sends it.
async fn send_method(
    writer: &Arc<Mutex<SocketWriter>>,
    method: ClientMethod,
    token: &str,
) -> Result<()> {
    let message = ClientMessage::new(method, token.to_string());
    let json = serde_json::to_string(&message)?;
    writer.lock().await.send(Message::text(json)).await?;
    Ok(())
}

/// Sends everything the session queued since the last drain.
async fn flush_outbox(
    session: &mut VersusTest,
    writer: &Arc<Mutex<SocketWriter>>,
    token: &str,
) -> Result<()> {
    for method in session.take_outbox() {
        send_method(writer, method, token).await?;
    }
    Ok(())
}

fn print_status(session: &VersusTest) {
    let snapshot = session.snapshot();
    println!(
        "You: {}/{} chars, {}% accuracy, {} wpm, combo x{}, {}s left",
        snapshot.correct_chars,
        snapshot.total_chars,
        snapshot.accuracy,
        snapshot.wpm,
        snapshot.combo,
        session.seconds_remaining()
    );
}

fn announce_finish(before: VersusPhase, session: &VersusTest) {
    if before != VersusPhase::Finished && session.phase() == VersusPhase::Finished {
        let snapshot = session.snapshot();
        println!(
            "Race over! Final: {} wpm, {}% accuracy, best combo x{}",
            snapshot.wpm, snapshot.accuracy, snapshot.max_combo
        );
        println!("Waiting for a rematch, or /quit to exit.");
    }
}

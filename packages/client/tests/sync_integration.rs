//! End-to-end tests: client sessions against an in-process relay.

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::{
    net::TcpListener,
    sync::mpsc,
    task::JoinHandle,
};
use tokio_tungstenite::{accept_async, tungstenite::Message};

use rakugaki_client::{
    canvas::RecordingSurface,
    config::ClientConfig,
    error::ClientError,
    board::Whiteboard,
    run_client_with_input,
    session::{SharedBoard, run_client_session},
    shared_board,
};
use rakugaki_server::ui::{Server, ServerConfig};
use rakugaki_shared::{
    protocol::ServerEvent,
    segment::{Point, StrokeSegment},
};

struct TestServer {
    task: JoinHandle<std::io::Result<()>>,
    url: String,
}

impl TestServer {
    async fn start() -> Self {
        let config = ServerConfig {
            port: 0,
            ..ServerConfig::default()
        };
        let listener = TcpListener::bind(config.bind_addr())
            .await
            .expect("Failed to bind test listener");
        let port = listener.local_addr().expect("No local address").port();
        let task = tokio::spawn(Server::in_memory(&config).serve(listener));

        TestServer {
            task,
            url: format!("ws://127.0.0.1:{}/ws", port),
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// A client session driven by commands sent through `input`
struct TestClient {
    board: SharedBoard,
    input: mpsc::UnboundedSender<String>,
    session: JoinHandle<Result<(), ClientError>>,
}

impl TestClient {
    /// Start a session without waiting for it to connect
    fn spawn(server: &TestServer) -> Self {
        let board = shared_board(&ClientConfig::default());
        let (input, mut input_rx) = mpsc::unbounded_channel();
        let url = server.url.clone();
        let session_board = board.clone();
        let session =
            tokio::spawn(async move { run_client_session(&url, session_board, &mut input_rx).await });

        TestClient {
            board,
            input,
            session,
        }
    }

    /// Start a session and wait until the initial replay has been applied
    async fn join(server: &TestServer) -> Self {
        let client = Self::spawn(server);
        client
            .wait_until(|board| board.channel().is_replayed())
            .await;
        client
    }

    fn send(&self, line: &str) {
        self.input.send(line.to_string()).expect("Session stopped");
    }

    async fn wait_until(&self, condition: impl Fn(&Whiteboard<RecordingSurface>) -> bool) {
        wait_for(&self.board, condition).await;
    }

    async fn visible(&self) -> RecordingSurface {
        let board = self.board.lock().await;
        board
            .canvas()
            .expect("Surface attached")
            .surface()
            .clone()
    }

    async fn segment_count(&self) -> usize {
        let board = self.board.lock().await;
        board.canvas().map_or(0, |canvas| canvas.segments().count())
    }
}

async fn wait_for(board: &SharedBoard, condition: impl Fn(&Whiteboard<RecordingSurface>) -> bool) {
    for _ in 0..40 {
        if condition(&*board.lock().await) {
            return;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    panic!("Condition not reached in time");
}

fn line_count(board: &Whiteboard<RecordingSurface>) -> usize {
    board
        .canvas()
        .map_or(0, |canvas| canvas.surface().lines().len())
}

#[tokio::test]
async fn test_peers_converge_on_draw_and_clear() {
    // テスト項目: 一方が描いた線が他方に届き、クリアも双方に反映される
    // given (前提条件):
    let server = TestServer::start().await;
    let alice = TestClient::join(&server).await;
    let bob = TestClient::join(&server).await;

    // when (操作): A が色を変えて 2 セグメントのストロークを描く
    alice.send("color #ff0000");
    alice.send("stroke 10,10 20,20 30,10");

    // then (期待する結果): B の表示が A と一致する
    bob.wait_until(|board| line_count(board) == 2).await;
    assert_eq!(bob.visible().await, alice.visible().await);
    assert_eq!(bob.visible().await.lines()[0].color, "#ff0000");

    // when (操作): B がクリアする
    bob.send("clear");

    // then (期待する結果): 双方とも空になる
    alice.wait_until(|board| line_count(board) == 0).await;
    assert_eq!(bob.segment_count().await, 0);
}

#[tokio::test]
async fn test_late_joiner_sees_same_board() {
    // テスト項目: 途中参加したクライアントは replay で既存の参加者と同じ表示になる
    // given (前提条件):
    let server = TestServer::start().await;
    let alice = TestClient::join(&server).await;
    let bob = TestClient::join(&server).await;
    alice.send("width 6");
    alice.send("line 0,0 100,100");
    bob.send("line 100,0 0,100");
    alice.wait_until(|board| line_count(board) == 2).await;
    bob.wait_until(|board| line_count(board) == 2).await;

    // when (操作):
    let charlie = TestClient::join(&server).await;

    // then (期待する結果): 受信順に関わらず同じ線の集合が見える
    let mut expected = alice.visible().await.lines().to_vec();
    let mut replayed = charlie.visible().await.lines().to_vec();
    let key = |line: &rakugaki_client::canvas::Line| (line.from.x as i64, line.from.y as i64);
    expected.sort_by_key(key);
    replayed.sort_by_key(key);
    assert_eq!(replayed, expected);
}

#[tokio::test]
async fn test_session_ends_when_input_closes() {
    // テスト項目: 入力が閉じるとセッションは正常終了し、チャネルは Closed になる
    // given (前提条件):
    let server = TestServer::start().await;
    let alice = TestClient::join(&server).await;
    let TestClient {
        board,
        input,
        session,
    } = alice;

    // when (操作):
    drop(input);
    let result = tokio::time::timeout(Duration::from_secs(2), session)
        .await
        .expect("Session did not stop")
        .expect("Session panicked");

    // then (期待する結果):
    assert!(result.is_ok());
    assert!(!board.lock().await.channel().is_open());
}

#[tokio::test]
async fn test_unusable_url_exits_without_retry() {
    // テスト項目: URL として解釈できないサーバー URL は再接続せずに即座にエラーになる
    // given (前提条件):
    let config = ClientConfig {
        server_url: "not a websocket url".to_string(),
        ..ClientConfig::default()
    };
    let board = shared_board(&config);
    let (_input, mut input_rx) = mpsc::unbounded_channel();

    // when (操作):
    let result = tokio::time::timeout(
        Duration::from_secs(2),
        run_client_with_input(&config, board, &mut input_rx),
    )
    .await
    .expect("Client retried an unusable URL");

    // then (期待する結果):
    assert!(matches!(result, Err(ClientError::InvalidUrl(_))));
}

#[tokio::test]
async fn test_strokes_typed_before_replay_are_kept() {
    // テスト項目: 接続直後（replay 前）に入力したストロークも replay で消されず、全員の表示に残る
    // given (前提条件): セッション開始前にコマンドを入力キューに積んでおく
    let server = TestServer::start().await;
    let clients: Vec<TestClient> = (0..10)
        .map(|i| {
            let client = TestClient::spawn(&server);
            client.send(&format!("line {i},0 {i},10"));
            client
        })
        .collect();

    // when (操作):
    for client in &clients {
        client.wait_until(|board| board.channel().is_replayed()).await;
    }

    // then (期待する結果): 自分の線を含む 10 本が全員に見え、途中参加者の replay にも全て含まれる
    for client in &clients {
        client
            .wait_until(|board| {
                board
                    .canvas()
                    .is_some_and(|canvas| canvas.segments().count() == 10)
            })
            .await;
    }
    let late = TestClient::join(&server).await;
    assert_eq!(late.segment_count().await, 10);
}

fn round_segment(round: usize) -> StrokeSegment {
    let x = round as f64;
    StrokeSegment::between(Point::new(x, 0.0), Point::new(x, 10.0), "#000000", 2.0)
}

/// A relay that replays one segment per connection and hangs up after the
/// replay `drops` times, then keeps the last connection open.
async fn start_flaky_relay(drops: usize) -> (String, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let port = listener.local_addr().expect("No local address").port();

    let task = tokio::spawn(async move {
        for round in 0..=drops {
            let Ok((stream, _)) = listener.accept().await else {
                return;
            };
            let mut ws = accept_async(stream).await.expect("Handshake failed");
            let replay = ServerEvent::LoadDrawings(vec![round_segment(round)])
                .encode()
                .expect("Failed to encode replay");
            ws.send(Message::Text(replay.into()))
                .await
                .expect("Failed to send replay");

            if round < drops {
                ws.close(None).await.ok();
            } else {
                while let Some(Ok(_)) = ws.next().await {}
            }
        }
    });

    (format!("ws://127.0.0.1:{}/ws", port), task)
}

#[tokio::test]
async fn test_live_sessions_reset_reconnect_budget() {
    // テスト項目: replay まで済んだ接続が切れた場合は失敗として数えず、上限を超えて切断されても再接続を続ける
    // given (前提条件): 再接続上限 2 回に対し、replay 後に 3 回切断するリレー
    let drops = 3;
    let (url, relay) = start_flaky_relay(drops).await;
    let config = ClientConfig {
        server_url: url,
        max_reconnect_attempts: 2,
        reconnect_interval: Duration::from_millis(50),
        ..ClientConfig::default()
    };
    let board = shared_board(&config);
    let (_input, mut input_rx) = mpsc::unbounded_channel::<String>();

    // when (操作):
    let client_board = board.clone();
    let client = tokio::spawn(async move {
        run_client_with_input(&config, client_board, &mut input_rx).await
    });

    // then (期待する結果): 最後の接続の replay が表示され、クライアントは動き続けている
    let expected = round_segment(drops);
    wait_for(&board, |board| {
        board.channel().is_replayed()
            && board
                .canvas()
                .is_some_and(|canvas| canvas.segments().eq([&expected]))
    })
    .await;
    assert!(!client.is_finished());

    client.abort();
    relay.abort();
}

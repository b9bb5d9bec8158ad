//! One shared server per test binary.

use boardwire_engine::definition;
use boardwire_server::ServerConfig;
use boardwire_tictactoe::TicTacToe;
use std::{
    sync::{
        Arc, OnceLock,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

static SERVER_ADDR: OnceLock<String> = OnceLock::new();
static SERVER_READY: OnceLock<()> = OnceLock::new();

/// Starts the server on first use and returns its `host:port`.
pub fn ensure_server() -> &'static str {
    SERVER_READY.get_or_init(|| {
        let published = Arc::new(OnceLock::<String>::new());
        let published_thread = Arc::clone(&published);
        // Own thread and runtime so the server outlives each #[tokio::test] runtime.
        std::thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("test runtime");
            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                    .await
                    .expect("bind ephemeral test port");
                let addr = listener.local_addr().expect("get local addr");
                let _ = published_thread.set(addr.to_string());
                boardwire_server::run(
                    listener,
                    vec![definition(TicTacToe)],
                    ServerConfig::default(),
                )
                .await
                .expect("server failed");
            });
        });
        wait_for_readiness(published);
    });

    SERVER_ADDR.get().expect("server addr should be initialized")
}

fn wait_for_readiness(published: Arc<OnceLock<String>>) {
    let addr = loop {
        if let Some(addr) = published.get() {
            break addr.clone();
        }
        std::thread::sleep(Duration::from_millis(10));
    };
    let _ = SERVER_ADDR.set(addr.clone());

    for _ in 0..100 {
        if std::net::TcpStream::connect(&addr).is_ok() {
            return;
        }
        std::thread::sleep(Duration::from_millis(20));
    }
    panic!("server did not become ready in time");
}

/// Base URL for REST calls.
#[allow(dead_code)]
pub fn http_url(path: &str) -> String {
    format!("http://{}{}", ensure_server(), path)
}

/// WebSocket endpoint URL.
#[allow(dead_code)]
pub fn ws_url() -> String {
    format!("ws://{}/ws", ensure_server())
}

/// Match id unique to the calling test.
#[allow(dead_code)]
pub fn unique_match_id(prefix: &str) -> String {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    format!("{}-{}-{}", prefix, nanos, COUNTER.fetch_add(1, Ordering::Relaxed))
}

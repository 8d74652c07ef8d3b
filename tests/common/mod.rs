//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpListener;

use netwatch::monitor::HealthScore;
use netwatch::{Notifier, Probe};

/// Probe whose outcome is flipped by the test while counting calls.
#[allow(dead_code)]
pub struct ScriptedProbe {
    online: AtomicBool,
    calls: AtomicU32,
}

#[allow(dead_code)]
impl ScriptedProbe {
    pub fn new(online: bool) -> Self {
        Self {
            online: AtomicBool::new(online),
            calls: AtomicU32::new(0),
        }
    }

    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Probe for ScriptedProbe {
    async fn check(&self) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.online.load(Ordering::SeqCst)
    }
}

/// Notifier that counts every callback.
#[derive(Default)]
#[allow(dead_code)]
pub struct RecordingNotifier {
    pub offline: AtomicU32,
    pub reconnected: AtomicU32,
    pub exhausted: AtomicU32,
    pub health_changes: Mutex<Vec<HealthScore>>,
}

impl Notifier for RecordingNotifier {
    fn on_offline_detected(&self) {
        self.offline.fetch_add(1, Ordering::SeqCst);
    }

    fn on_reconnected(&self) {
        self.reconnected.fetch_add(1, Ordering::SeqCst);
    }

    fn on_recovery_exhausted(&self) {
        self.exhausted.fetch_add(1, Ordering::SeqCst);
    }

    fn on_health_changed(&self, score: HealthScore) {
        self.health_changes.lock().unwrap().push(score);
    }
}

/// Let spawned probe tasks and the monitor's event loop run.
#[allow(dead_code)]
pub async fn settle() {
    for _ in 0..20 {
        tokio::task::yield_now().await;
    }
}

/// Start a mock endpoint answering every request with the given status line.
#[allow(dead_code)]
pub async fn start_status_endpoint(addr: SocketAddr, status_line: &'static str) {
    let listener = TcpListener::bind(addr).await.unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    tokio::spawn(async move {
                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Length: 2\r\nConnection: close\r\n\r\nok",
                            status_line
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });
}

/// Start a mock endpoint that accepts connections but never responds.
#[allow(dead_code)]
pub async fn start_silent_endpoint(addr: SocketAddr) {
    let listener = TcpListener::bind(addr).await.unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((socket, _)) => {
                    tokio::spawn(async move {
                        tokio::time::sleep(std::time::Duration::from_secs(30)).await;
                        drop(socket);
                    });
                }
                Err(_) => break,
            }
        }
    });
}

//! Simulated camera device example
//!
//! Run with: cargo run --example simulated_device
//!
//! Everything hardware-shaped is simulated: the camera synthesizes frames,
//! the transport counts deliveries for a scripted pair of clients, the
//! runtime reports a fixed memory budget, and the LED prints level changes.
//! A background task plays the part of the network layer: two clients
//! connect, one of them requests a resolution change in-band, one leaves.
//!
//! Stop with Ctrl+C.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use bytes::Bytes;

use camcast::{
    Camera, CameraError, CameraServer, ClientEvent, ClientId, Delivery, Frame, Resolution,
    Runtime, ServerConfig, StatusLed, Ticks, Transport,
};

/// Camera that synthesizes a payload sized like a JPEG at the requested
/// resolution.
struct SimCamera;

impl Camera for SimCamera {
    fn capture(&mut self, resolution: Resolution) -> Result<Frame, CameraError> {
        // Rough JPEG budget: ~1 bit per pixel.
        let bytes = (resolution.pixels() / 8) as usize;
        let mut data = vec![0x55u8; bytes.max(4)];
        data[0] = 0xFF;
        data[1] = 0xD8;
        Ok(Frame::new(resolution, Bytes::from(data)))
    }

    fn change_resolution(&mut self, _resolution: Resolution) -> bool {
        true
    }
}

/// Transport whose client list is scripted from outside.
struct SimTransport {
    clients: Arc<Mutex<Vec<u64>>>,
    delivered: AtomicU64,
}

impl Transport for SimTransport {
    fn send_to_all(&mut self, _payload: &Bytes) -> Vec<Delivery> {
        let clients = self.clients.lock().unwrap();
        self.delivered
            .fetch_add(clients.len() as u64, Ordering::Relaxed);
        clients
            .iter()
            .map(|id| Delivery {
                client: ClientId::new(*id),
                ok: true,
            })
            .collect()
    }

    fn reclaim_stale(&mut self) -> usize {
        0
    }
}

/// Host runtime: uptime from a monotonic clock, a fixed memory budget.
struct SimRuntime {
    started: Instant,
}

impl Runtime for SimRuntime {
    fn now(&self) -> Ticks {
        Ticks::from_millis(self.started.elapsed().as_millis() as u32)
    }

    fn free_memory(&self) -> u64 {
        256 * 1024
    }
}

/// LED that prints level changes.
struct TermLed;

impl StatusLed for TermLed {
    fn set(&mut self, level: bool) {
        if level {
            println!("[led] on");
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("camcast=debug".parse()?)
                .add_directive("simulated_device=info".parse()?),
        )
        .init();

    let clients = Arc::new(Mutex::new(Vec::new()));

    let config = ServerConfig::default()
        .frame_interval(Duration::from_millis(100))
        .heartbeat_interval(Duration::from_secs(5));

    let mut server = CameraServer::new(
        config,
        SimCamera,
        SimTransport {
            clients: Arc::clone(&clients),
            delivered: AtomicU64::new(0),
        },
        SimRuntime {
            started: Instant::now(),
        },
        TermLed,
    );

    // A one-shot still before streaming starts, like a snapshot endpoint.
    let still = server.capture_still()?;
    println!(
        "still capture: {}x{}, {} bytes",
        still.width(),
        still.height(),
        still.len()
    );

    // Script the network layer: connect two clients, change resolution
    // in-band, drop one client.
    let sender = server.event_sender();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(1)).await;
        clients.lock().unwrap().extend([1, 2]);
        sender.send(ClientEvent::Connected(ClientId::new(1)));
        sender.send(ClientEvent::Connected(ClientId::new(2)));

        tokio::time::sleep(Duration::from_secs(3)).await;
        sender.send(ClientEvent::Text {
            id: ClientId::new(2),
            message: "resolution 320x240".into(),
        });

        tokio::time::sleep(Duration::from_secs(3)).await;
        clients.lock().unwrap().retain(|id| *id != 1);
        sender.send(ClientEvent::Disconnected(ClientId::new(1)));
    });

    println!("simulated device running, Ctrl+C to stop");
    server.run_until(async {
        let _ = tokio::signal::ctrl_c().await;
    })
    .await?;

    let status = server.status();
    println!(
        "done: {} frames captured, {} deliveries ({} per transport), {} clients still connected",
        status.metrics.frames_captured,
        status.metrics.frames_sent,
        server.transport().delivered.load(Ordering::Relaxed),
        status.connected_clients
    );

    Ok(())
}

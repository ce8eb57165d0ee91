// Demo mode: stream mock scanner output into the terminal screen
//
// Emits a heartbeat marker every tick (as a packet sniffer would) and a
// status line every few ticks, so the truncation policy and scrolling can
// be watched live. Any "stop" command from the dispatcher pauses output for
// a few seconds, like the real background tasks shutting down.
//
// Run with: TERMSCREEN_DEMO=1 cargo run --release

use crate::terminal::buffer::HEARTBEAT_MARKER;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::sleep;

/// Time between heartbeat ticks
const TICK: Duration = Duration::from_millis(40);

/// A status line is emitted every this many ticks
const LINE_EVERY: u64 = 12;

/// How long output stays quiet after a stop command
const STOP_PAUSE: Duration = Duration::from_secs(3);

const SCRIPT: &[&str] = &[
    "Starting Wi-Fi scan...",
    "Found AP: HomeNet-5G ch 36 rssi -48",
    "Found AP: CoffeeShop ch 6 rssi -71",
    "Found AP: <hidden> ch 11 rssi -80",
    "Sniffing beacons on channel 6",
    "Captured 128 packets",
    "GPS: no fix (3 satellites)",
    "BLE: 4 devices in range",
];

/// Produce demo output until the line channel closes
pub async fn run_demo(lines: mpsc::Sender<String>, mut commands: mpsc::UnboundedReceiver<String>) {
    // Let the screen come up first
    sleep(Duration::from_millis(500)).await;

    let mut tick: u64 = 0;
    loop {
        tokio::select! {
            command = commands.recv() => {
                let Some(command) = command else {
                    return;
                };
                tracing::debug!("Demo received command {:?}", command);

                if command == "stop" {
                    sleep(STOP_PAUSE).await;
                    // Swallow the rest of the stop sequence
                    while commands.try_recv().is_ok() {}
                    if lines.send("Restarting capture...".to_string()).await.is_err() {
                        return;
                    }
                }
            }

            _ = sleep(TICK) => {
                for chunk in demo_output(tick) {
                    if lines.send(chunk).await.is_err() {
                        return;
                    }
                }
                tick += 1;
            }
        }
    }
}

/// Output for one tick: always a heartbeat, sometimes a status line first
fn demo_output(tick: u64) -> Vec<String> {
    let mut chunks = Vec::with_capacity(2);
    if tick % LINE_EVERY == 0 {
        let line = SCRIPT[((tick / LINE_EVERY) as usize) % SCRIPT.len()];
        chunks.push(line.to_string());
    }
    chunks.push(HEARTBEAT_MARKER.to_string());
    chunks
}

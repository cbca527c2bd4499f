//! Background drift correction for a comparison view.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::playback::{PlaybackSession, PlayerCommand};

/// Default interval between drift checks.
pub const SYNC_INTERVAL: Duration = Duration::from_millis(100);

/// Run [`PlaybackSession::sync_check`] every `period` and forward any
/// correction to the renderer.
///
/// The task stops on its own once the receiving side is dropped, i.e. when
/// the comparison view goes away.
pub fn spawn_sync_loop(
    session: Arc<Mutex<PlaybackSession>>,
    period: Duration,
    commands: mpsc::Sender<PlayerCommand>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            if commands.is_closed() {
                debug!("Sync loop stopped: renderer gone");
                break;
            }

            let correction = session.lock().await.sync_check();
            if let Some(command) = correction {
                if commands.send(command).await.is_err() {
                    break;
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playback::VideoSlot;

    #[tokio::test]
    async fn test_loop_emits_correction_and_stops() {
        let mut session = PlaybackSession::dual(true);
        session.on_duration(VideoSlot::Primary, 5.0);
        session.on_duration(VideoSlot::Secondary, 5.0);
        session.on_play();
        session.on_time_update(VideoSlot::Primary, 2.5);
        session.on_time_update(VideoSlot::Secondary, 1.0);

        let session = Arc::new(Mutex::new(session));
        let (tx, mut rx) = mpsc::channel(8);
        let handle = spawn_sync_loop(session.clone(), SYNC_INTERVAL, tx);

        let command = tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("correction in time")
            .expect("channel open");
        assert_eq!(
            command,
            PlayerCommand::Seek {
                slot: VideoSlot::Secondary,
                time: 2.5,
            }
        );

        drop(rx);
        tokio::time::timeout(Duration::from_secs(2), handle)
            .await
            .expect("loop stops after renderer is dropped")
            .unwrap();
    }
}

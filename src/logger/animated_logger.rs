use std::io::Write;
use std::time::Duration;

use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;

const ANIMATION_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Terminal spinner for long-running CLI steps. The message can be
/// updated while the spinner runs (e.g. per pagination page).
pub struct AnimatedLogger {
    message_tx: watch::Sender<String>,
    stop_tx: Option<oneshot::Sender<()>>,
    task_handle: Option<JoinHandle<()>>,
}

impl AnimatedLogger {
    pub fn start(message: String) -> Self {
        let (message_tx, message_rx) = watch::channel(message);
        let (stop_tx, mut stop_rx) = oneshot::channel();

        let handle = tokio::spawn(async move {
            let mut frame = 0;
            let mut interval = tokio::time::interval(Duration::from_millis(150));

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        eprint!("\r\x1b[K{} {} ", *message_rx.borrow(), ANIMATION_FRAMES[frame]);
                        let _ = std::io::stderr().flush();
                        frame = (frame + 1) % ANIMATION_FRAMES.len();
                    }
                    _ = &mut stop_rx => {
                        break;
                    }
                }
            }
        });

        Self {
            message_tx,
            stop_tx: Some(stop_tx),
            task_handle: Some(handle),
        }
    }

    pub fn set_message(&self, message: String) {
        let _ = self.message_tx.send(message);
    }

    pub async fn stop(&mut self, final_message: &str) {
        self.halt().await;
        eprint!("\r\x1b[K✅  {}\n", final_message);
        let _ = std::io::stderr().flush();
    }

    pub async fn error(&mut self, error_message: &str) {
        self.halt().await;
        eprint!("\r\x1b[K❌ {}\n", error_message);
        let _ = std::io::stderr().flush();
    }

    async fn halt(&mut self) {
        if let Some(sender) = self.stop_tx.take() {
            let _ = sender.send(());
        }

        if let Some(handle) = self.task_handle.take() {
            let _ = handle.await;
        }
    }
}

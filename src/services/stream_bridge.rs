use std::sync::Arc;

use futures::{Stream, StreamExt};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use uuid::Uuid;

use crate::config::constants::BATCH_BOUNDARY;
use crate::errors::RelnotesResult;
use crate::helpers::batcher::batch_records;
use crate::helpers::prompt_generator::generate_release_notes_prompt;
use crate::prompts::release_notes_prompt::RELEASE_NOTES_SYSTEM_PROMPT;
use crate::structs::change_record::ChangeRecord;
use crate::traits::ai_provider::AiProvider;

/// Relays provider token streams into one outbound fragment channel,
/// batch by batch. The channel closes on every exit path (the sender is
/// dropped when the relay task returns), so a consumer never hangs
/// waiting for stream end.
pub struct StreamBridge {
    provider: Arc<dyn AiProvider>,
    batch_size: usize,
}

impl StreamBridge {
    pub fn new(provider: Arc<dyn AiProvider>, batch_size: usize) -> Self {
        Self {
            provider,
            batch_size,
        }
    }

    /// Validates and batches the records up front, then spawns the relay
    /// task. Zero records close the returned channel immediately with no
    /// fragments.
    pub fn open(&self, records: Vec<ChangeRecord>) -> RelnotesResult<UnboundedReceiver<String>> {
        let batches = batch_records(records, self.batch_size)?;
        let (tx, rx) = mpsc::unbounded_channel();

        let provider = Arc::clone(&self.provider);
        let request_id = Uuid::new_v4();
        log::info!("🚀 [{}] streaming notes across {} batches", request_id, batches.len());

        tokio::spawn(async move {
            relay_batches(provider, batches, &tx, request_id).await;
        });

        Ok(rx)
    }
}

/// Processes batches strictly in order: a later batch's provider call
/// does not start until the earlier batch's stream has fully drained,
/// so outbound bytes keep the provider's textual order. No retries;
/// a failed call ends the stream, possibly mid-batch.
async fn relay_batches(
    provider: Arc<dyn AiProvider>,
    batches: Vec<Vec<ChangeRecord>>,
    tx: &UnboundedSender<String>,
    request_id: Uuid,
) {
    for (index, batch) in batches.into_iter().enumerate() {
        let prompt = generate_release_notes_prompt(&batch);

        let mut stream = match provider
            .stream_chat(RELEASE_NOTES_SYSTEM_PROMPT.to_string(), prompt)
            .await
        {
            Ok(stream) => stream,
            Err(e) => {
                log::error!("❌ [{}] provider call failed on batch {}: {}", request_id, index + 1, e);
                return;
            }
        };

        // Batch boundary so the consumer can merge per-batch JSON arrays
        // instead of treating the concatenation as one array.
        if index > 0 && tx.send(BATCH_BOUNDARY.to_string()).is_err() {
            log::debug!("🔌 [{}] consumer disconnected", request_id);
            return;
        }

        while let Some(result) = stream.next().await {
            match result {
                Ok(item) => {
                    let completed = item.is_complete;
                    if !item.content.is_empty() && tx.send(item.content).is_err() {
                        // Consumer went away; dropping the provider stream
                        // aborts the in-flight call.
                        log::debug!("🔌 [{}] consumer disconnected", request_id);
                        return;
                    }
                    if completed {
                        break;
                    }
                }
                Err(e) => {
                    log::error!("❌ [{}] stream failed mid-batch {}: {}", request_id, index + 1, e);
                    return;
                }
            }
        }
    }

    log::info!("✅ [{}] stream complete", request_id);
}

/// Adapts the outbound channel into a `Stream` for an HTTP response body.
pub fn fragment_stream(rx: UnboundedReceiver<String>) -> impl Stream<Item = String> {
    futures::stream::unfold(rx, |mut rx| async move {
        rx.recv().await.map(|fragment| (fragment, rx))
    })
}

/// Reads the channel to completion, concatenating every fragment. This is
/// the consumer-side accumulation step; parsing happens only on the full
/// buffer.
pub async fn drain_to_string(mut rx: UnboundedReceiver<String>) -> String {
    let mut buffer = String::new();
    while let Some(fragment) = rx.recv().await {
        buffer.push_str(&fragment);
    }
    buffer
}

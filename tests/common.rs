use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use futures::StreamExt;

use relnotes::enums::ai_provider_error::AiProviderError;
use relnotes::structs::change_record::ChangeRecord;
use relnotes::structs::stream_item::StreamItem;
use relnotes::traits::ai_provider::{AiProvider, FragmentStream};

/// One scripted provider call: either a fragment sequence or an error
/// before the stream opens.
pub type Script = Result<Vec<Result<StreamItem, AiProviderError>>, AiProviderError>;

/// Scripted provider that records every call and fragment emission in a
/// shared event log, so tests can assert call/drain ordering.
pub struct FakeProvider {
    scripts: Mutex<VecDeque<Script>>,
    pub prompts: Mutex<Vec<String>>,
    pub events: Arc<Mutex<Vec<String>>>,
}

impl FakeProvider {
    pub fn new(scripts: Vec<Script>) -> Self {
        Self {
            scripts: Mutex::new(scripts.into()),
            prompts: Mutex::new(Vec::new()),
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl AiProvider for FakeProvider {
    async fn stream_chat(
        &self,
        _system_prompt: String,
        user_prompt: String,
    ) -> Result<FragmentStream, AiProviderError> {
        let call_index = {
            let mut prompts = self.prompts.lock().unwrap();
            prompts.push(user_prompt);
            prompts.len() - 1
        };
        self.events.lock().unwrap().push(format!("call {}", call_index));

        let script = self
            .scripts
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()));
        let items = script?;

        let events = Arc::clone(&self.events);
        let stream = futures::stream::iter(items).inspect(move |result| {
            if let Ok(item) = result {
                events
                    .lock()
                    .unwrap()
                    .push(format!("frag {} {}", call_index, item.content));
            }
        });

        Ok(Box::pin(stream))
    }
}

pub fn fragments(texts: &[&str]) -> Script {
    Ok(texts
        .iter()
        .map(|text| Ok(StreamItem::new((*text).to_string())))
        .collect())
}

pub fn record(id: usize) -> ChangeRecord {
    ChangeRecord {
        id: id.to_string(),
        description: format!("Change number {}", id),
        diff: format!("--- a/file{}.rs\n+++ b/file{}.rs\n@@ -1 +1 @@\n-old\n+new", id, id),
        url: format!("https://example.com/pull/{}", id),
    }
}

pub fn records(count: usize) -> Vec<ChangeRecord> {
    (1..=count).map(record).collect()
}

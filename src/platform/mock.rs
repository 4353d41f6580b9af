//! Scripted Bot API for tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ApiError, BotApi, Update};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    GetUpdates { offset: Option<i64> },
    Kick { user_id: i64 },
    Delete { message_id: i64 },
}

#[derive(Default)]
struct MockState {
    batches: VecDeque<Result<Vec<Update>, ApiError>>,
    calls: Vec<Call>,
    fail_kick: bool,
    fail_delete: bool,
}

/// Replays queued `getUpdates` results in order. Once the queue is empty,
/// `get_updates` signals the exhaustion channel (if any) and never returns.
#[derive(Clone, Default)]
pub struct MockApi {
    state: Arc<Mutex<MockState>>,
    exhausted: Option<mpsc::UnboundedSender<()>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Receive a notification when the scripted batches run out
    pub fn on_exhausted(&mut self) -> mpsc::UnboundedReceiver<()> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.exhausted = Some(tx);
        rx
    }

    pub fn push_batch(&self, batch: Vec<Update>) {
        self.state.lock().unwrap().batches.push_back(Ok(batch));
    }

    pub fn push_error(&self, error: ApiError) {
        self.state.lock().unwrap().batches.push_back(Err(error));
    }

    pub fn fail_kicks(&self) {
        self.state.lock().unwrap().fail_kick = true;
    }

    pub fn fail_deletes(&self) {
        self.state.lock().unwrap().fail_delete = true;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Offsets of every `getUpdates` request so far
    pub fn offsets(&self) -> Vec<Option<i64>> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::GetUpdates { offset } => Some(offset),
                _ => None,
            })
            .collect()
    }

    /// Kick and delete calls, in issue order
    pub fn actions(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|call| !matches!(call, Call::GetUpdates { .. }))
            .collect()
    }
}

fn rejected(description: &str) -> ApiError {
    ApiError::Rejected {
        description: description.to_string(),
    }
}

#[async_trait]
impl BotApi for MockApi {
    async fn get_updates(&self, offset: Option<i64>) -> Result<Vec<Update>, ApiError> {
        let next = {
            let mut state = self.state.lock().unwrap();
            state.calls.push(Call::GetUpdates { offset });
            state.batches.pop_front()
        };
        match next {
            Some(result) => result,
            None => {
                if let Some(tx) = &self.exhausted {
                    let _ = tx.send(());
                }
                std::future::pending().await
            }
        }
    }

    async fn kick_chat_member(&self, user_id: i64) -> Result<String, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Kick { user_id });
        if state.fail_kick {
            return Err(rejected("kick failed"));
        }
        Ok(r#"{"ok":true,"result":true}"#.to_string())
    }

    async fn delete_message(&self, message_id: i64) -> Result<String, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Delete { message_id });
        if state.fail_delete {
            return Err(rejected("message to delete not found"));
        }
        Ok(r#"{"ok":true,"result":true}"#.to_string())
    }
}

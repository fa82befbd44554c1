//! Scripted gateway shared by the use case tests.

use crate::ports::llm_gateway::{CompletionRequest, GatewayError, LlmGateway};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

type Reply = (Duration, Result<String, GatewayError>);

/// Replays canned replies in order and records every prompt it receives.
pub(crate) struct ScriptedGateway {
    replies: Mutex<VecDeque<Reply>>,
    prompts: Mutex<Vec<CompletionRequest>>,
    calls: AtomicUsize,
    credential: bool,
}

impl ScriptedGateway {
    pub(crate) fn new(replies: Vec<Result<String, GatewayError>>) -> Self {
        Self {
            replies: Mutex::new(
                replies
                    .into_iter()
                    .map(|reply| (Duration::ZERO, reply))
                    .collect(),
            ),
            prompts: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            credential: true,
        }
    }

    /// Gateway whose every call fails the same way.
    pub(crate) fn failing(error: GatewayError, times: usize) -> Self {
        Self::new(vec![Err(error); times])
    }

    /// Apply `delay` to every scripted reply.
    pub(crate) fn with_delay(self, delay: Duration) -> Self {
        for reply in self.replies.lock().unwrap().iter_mut() {
            reply.0 = delay;
        }
        self
    }

    /// Replies with individual delays.
    pub(crate) fn timed(replies: Vec<Reply>) -> Self {
        let gateway = Self::new(Vec::new());
        gateway.replies.lock().unwrap().extend(replies);
        gateway
    }

    pub(crate) fn without_credential(mut self) -> Self {
        self.credential = false;
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn requests(&self) -> Vec<CompletionRequest> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmGateway for ScriptedGateway {
    fn has_credential(&self) -> bool {
        self.credential
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(request.clone());
        let (delay, reply) = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or((Duration::ZERO, Err(GatewayError::Transport("script exhausted".into()))));
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        reply
    }
}

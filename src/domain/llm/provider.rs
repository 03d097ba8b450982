use async_trait::async_trait;
use std::fmt::Debug;

use super::{ChatCompletion, ChatRequest};
use crate::domain::GatewayError;

/// One round-trip to a chat-completion endpoint
#[async_trait]
pub trait ChatTransport: Send + Sync + Debug {
    /// Send a single chat completion request, with no retries
    async fn chat(&self, model: &str, request: &ChatRequest)
    -> Result<ChatCompletion, GatewayError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use tokio::time::Instant;

    /// Transport that replays a script of results, one per attempt.
    /// Once the script runs out the last entry is repeated.
    #[derive(Debug)]
    pub struct MockTransport {
        script: Mutex<VecDeque<Result<ChatCompletion, GatewayError>>>,
        last: Mutex<Option<Result<ChatCompletion, GatewayError>>>,
        calls: Mutex<Vec<(Instant, String)>>,
    }

    impl MockTransport {
        pub fn new(script: Vec<Result<ChatCompletion, GatewayError>>) -> Self {
            Self {
                script: Mutex::new(script.into()),
                last: Mutex::new(None),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn always(result: Result<ChatCompletion, GatewayError>) -> Self {
            Self::new(vec![result])
        }

        pub fn answering(text: &str) -> Self {
            Self::always(Ok(ChatCompletion::text(text)))
        }

        pub fn failing(error: GatewayError) -> Self {
            Self::always(Err(error))
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }

        pub fn call_times(&self) -> Vec<Instant> {
            self.calls.lock().unwrap().iter().map(|(t, _)| *t).collect()
        }

        pub fn models(&self) -> Vec<String> {
            self.calls.lock().unwrap().iter().map(|(_, m)| m.clone()).collect()
        }
    }

    #[async_trait]
    impl ChatTransport for MockTransport {
        async fn chat(
            &self,
            model: &str,
            _request: &ChatRequest,
        ) -> Result<ChatCompletion, GatewayError> {
            self.calls
                .lock()
                .unwrap()
                .push((Instant::now(), model.to_string()));

            let next = self.script.lock().unwrap().pop_front();
            let mut last = self.last.lock().unwrap();

            if let Some(result) = next {
                *last = Some(result);
            }

            (*last)
                .clone()
                .unwrap_or_else(|| Err(GatewayError::unexpected("No mock result configured")))
        }

        fn provider_name(&self) -> &'static str {
            "mock"
        }
    }
}

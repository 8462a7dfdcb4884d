//! Auth request and token handlers.

use keygate_core::api::{AuthClient, LoginRequest, RegisterRequest};
use keygate_core::forms::SubmissionId;
use keygate_core::token::TokenSink;

use crate::events::UiEvent;

pub async fn submit_login(client: AuthClient, id: SubmissionId, request: LoginRequest) -> UiEvent {
    let result = client.login(&request).await;
    UiEvent::LoginSettled { id, result }
}

pub async fn submit_register(
    client: AuthClient,
    id: SubmissionId,
    request: RegisterRequest,
) -> UiEvent {
    let result = client.register(&request).await;
    UiEvent::RegisterSettled { id, result }
}

/// Writes the token synchronously; it is a single small file.
pub fn store_token(tokens: &dyn TokenSink, token: &str) -> UiEvent {
    let result = tokens.put(token).map_err(|e| {
        tracing::error!(error = %format!("{e:#}"), "failed to store auth token");
        format!("{e:#}")
    });
    UiEvent::TokenStored { result }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct MemorySink(Mutex<Option<String>>);

    impl TokenSink for MemorySink {
        fn put(&self, token: &str) -> anyhow::Result<()> {
            *self.0.lock().unwrap() = Some(token.to_string());
            Ok(())
        }
    }

    struct ReadOnlySink;

    impl TokenSink for ReadOnlySink {
        fn put(&self, _token: &str) -> anyhow::Result<()> {
            anyhow::bail!("read-only file system")
        }
    }

    #[test]
    fn test_store_token_success() {
        let sink = MemorySink::default();
        let event = store_token(&sink, "abc");
        assert!(matches!(event, UiEvent::TokenStored { result: Ok(()) }));
        assert_eq!(sink.0.lock().unwrap().as_deref(), Some("abc"));
    }

    #[test]
    fn test_store_token_failure_carries_message() {
        let event = store_token(&ReadOnlySink, "abc");
        let UiEvent::TokenStored { result: Err(error) } = event else {
            panic!("expected failure, got {event:?}");
        };
        assert!(error.contains("read-only"));
    }
}

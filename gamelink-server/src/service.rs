//! Read-path orchestration: fetch the three inputs, then reconcile.

use tracing::warn;
use unread_core::{compute_unread_count, UnreadOutcome};

use crate::state::AppState;

/// Evaluates the user's unread badge from a fresh read of external state.
///
/// Membership and markers are keyed by user only and are fetched together;
/// the last-message fetch needs the membership result and runs after the
/// join. Any fetch failure yields `Unknown`, which the boundary maps to a
/// zero count.
pub async fn unread_outcome(state: &AppState, user_id: &str) -> UnreadOutcome {
    let (memberships, markers) = tokio::join!(
        state.memberships.active_conversations(user_id),
        state.markers.markers_for_user(user_id),
    );

    let conversations = match memberships {
        Ok(conversations) => conversations,
        Err(e) => {
            warn!(user_id = %user_id, error = %e, "Membership lookup failed");
            return UnreadOutcome::Unknown;
        }
    };

    let markers = match markers {
        Ok(markers) => markers,
        Err(e) => {
            warn!(user_id = %user_id, error = %e, "Read-marker lookup failed");
            return UnreadOutcome::Unknown;
        }
    };

    let ids: Vec<String> = conversations.iter().map(|c| c.id.clone()).collect();
    let last_messages = match state.messages.last_messages(&ids).await {
        Ok(messages) => messages,
        Err(e) => {
            warn!(user_id = %user_id, error = %e, "Last-message lookup failed");
            return UnreadOutcome::Unknown;
        }
    };

    UnreadOutcome::Count(compute_unread_count(
        user_id,
        &conversations,
        &last_messages,
        &markers,
    ))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use unread_core::{
        Conversation, LastMessage, LastMessageSource, MembershipResolver, ReadMarker,
        ReadMarkerStore, SourceError, UnreadOutcome,
    };

    use super::unread_outcome;
    use crate::auth::SessionVerifier;
    use crate::state::AppState;

    struct StubMemberships(Vec<Conversation>);

    #[async_trait]
    impl MembershipResolver for StubMemberships {
        async fn active_conversations(
            &self,
            _user_id: &str,
        ) -> Result<Vec<Conversation>, SourceError> {
            Ok(self.0.clone())
        }
    }

    struct FailingMemberships;

    #[async_trait]
    impl MembershipResolver for FailingMemberships {
        async fn active_conversations(
            &self,
            _user_id: &str,
        ) -> Result<Vec<Conversation>, SourceError> {
            Err(SourceError::Backend("connection refused".to_string()))
        }
    }

    struct StubMessages(Vec<LastMessage>);

    #[async_trait]
    impl LastMessageSource for StubMessages {
        async fn last_messages(
            &self,
            _conversation_ids: &[String],
        ) -> Result<Vec<LastMessage>, SourceError> {
            Ok(self.0.clone())
        }
    }

    struct StubMarkers(Vec<ReadMarker>);

    #[async_trait]
    impl ReadMarkerStore for StubMarkers {
        async fn markers_for_user(&self, _user_id: &str) -> Result<Vec<ReadMarker>, SourceError> {
            Ok(self.0.clone())
        }

        async fn mark_read(
            &self,
            _user_id: &str,
            _conversation_id: &str,
        ) -> Result<(), SourceError> {
            Ok(())
        }
    }

    struct NoSessions;

    #[async_trait]
    impl SessionVerifier for NoSessions {
        async fn verify(&self, _token: &str) -> Result<Option<String>, SourceError> {
            Ok(None)
        }
    }

    fn conversation(id: &str) -> Conversation {
        Conversation {
            id: id.to_string(),
            user_a: "u1".to_string(),
            user_b: "u2".to_string(),
            active: true,
            created_at: "2024-05-01T00:00:00Z".to_string(),
        }
    }

    #[tokio::test]
    async fn test_membership_failure_is_unknown() {
        let state = AppState {
            memberships: Arc::new(FailingMemberships),
            messages: Arc::new(StubMessages(Vec::new())),
            markers: Arc::new(StubMarkers(Vec::new())),
            sessions: Arc::new(NoSessions),
        };

        let outcome = unread_outcome(&state, "u1").await;
        assert_eq!(outcome, UnreadOutcome::Unknown);
        assert_eq!(outcome.badge_value(), 0);
    }

    #[tokio::test]
    async fn test_no_conversations_is_known_zero() {
        let state = AppState {
            memberships: Arc::new(StubMemberships(Vec::new())),
            messages: Arc::new(StubMessages(Vec::new())),
            markers: Arc::new(StubMarkers(Vec::new())),
            sessions: Arc::new(NoSessions),
        };

        let outcome = unread_outcome(&state, "u1").await;
        assert_eq!(outcome, UnreadOutcome::Count(0));
        assert!(outcome.is_known());
    }

    #[tokio::test]
    async fn test_foreign_message_without_marker_counts() {
        let state = AppState {
            memberships: Arc::new(StubMemberships(vec![conversation("c1")])),
            messages: Arc::new(StubMessages(vec![LastMessage {
                conversation_id: "c1".to_string(),
                sender_id: "u2".to_string(),
                body: "hey".to_string(),
                created_at: "2024-05-01T10:00:00Z".to_string(),
            }])),
            markers: Arc::new(StubMarkers(Vec::new())),
            sessions: Arc::new(NoSessions),
        };

        let outcome = unread_outcome(&state, "u1").await;
        assert_eq!(outcome, UnreadOutcome::Count(1));
    }
}

//! Client-side chat session.
//!
//! A [`ChatSession`] owns the transcript, the pending input buffer and the
//! `Idle` / `AwaitingReply` state. Each submission performs exactly one
//! request through a [`ChatTransport`]; there is no retry and no timeout.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{ChatResponse, Message};

/// First transcript entry of every session.
pub const GREETING: &str = "Hello! How can I assist you today?";

/// Assistant reply appended when a request fails.
pub const FALLBACK_REPLY: &str = "Sorry, there was an error communicating with the server.";

/// Upper bound on the pending input, in characters.
pub const MAX_INPUT_CHARS: usize = 400;

/// Failures of a single chat round trip.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP error! Status: {0}")]
    Status(u16),

    #[error("invalid response body: {0}")]
    Decode(String),
}

/// Sends a full transcript to the chat endpoint.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send_transcript(&self, messages: &[Message]) -> Result<ChatResponse, TransportError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    AwaitingReply,
}

/// Conversation state for one client.
#[derive(Debug, Clone)]
pub struct ChatSession {
    transcript: Vec<Message>,
    pending_input: String,
    state: SessionState,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    /// Creates a session whose transcript holds only the greeting.
    pub fn new() -> Self {
        Self {
            transcript: vec![Message::assistant(GREETING)],
            pending_input: String::new(),
            state: SessionState::Idle,
        }
    }

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    pub fn pending_input(&self) -> &str {
        &self.pending_input
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_awaiting_reply(&self) -> bool {
        self.state == SessionState::AwaitingReply
    }

    /// Replaces the pending input, truncated to [`MAX_INPUT_CHARS`].
    ///
    /// Returns `false` and leaves the buffer untouched while a reply is
    /// outstanding.
    pub fn set_input(&mut self, text: &str) -> bool {
        if self.is_awaiting_reply() {
            return false;
        }
        self.pending_input = truncate_chars(text, MAX_INPUT_CHARS).to_string();
        true
    }

    /// Appends to the pending input, respecting the same bound as [`set_input`].
    ///
    /// [`set_input`]: ChatSession::set_input
    pub fn push_input(&mut self, text: &str) -> bool {
        if self.is_awaiting_reply() {
            return false;
        }
        let used = self.pending_input.chars().count();
        let room = MAX_INPUT_CHARS.saturating_sub(used);
        self.pending_input.push_str(truncate_chars(text, room));
        true
    }

    /// Moves the pending input into the transcript as a user turn.
    ///
    /// Returns the transcript to send, or `None` when the input is blank or a
    /// reply is already outstanding. On `Some`, the session is awaiting a
    /// reply until [`finish_submit`] is called.
    ///
    /// [`finish_submit`]: ChatSession::finish_submit
    pub fn begin_submit(&mut self) -> Option<Vec<Message>> {
        if self.is_awaiting_reply() || self.pending_input.trim().is_empty() {
            return None;
        }
        let content = std::mem::take(&mut self.pending_input);
        self.transcript.push(Message::user(content));
        self.state = SessionState::AwaitingReply;
        Some(self.transcript.clone())
    }

    /// Records the outcome of the outstanding request and returns to `Idle`.
    ///
    /// A failed request appends [`FALLBACK_REPLY`]. A successful response with
    /// an empty reply appends nothing. Ignored unless a reply is outstanding.
    pub fn finish_submit(&mut self, outcome: Result<ChatResponse, TransportError>) {
        if !self.is_awaiting_reply() {
            log::warn!("ignoring chat outcome with no request outstanding");
            return;
        }
        match outcome {
            Ok(resp) if !resp.reply.is_empty() => {
                self.transcript.push(Message::assistant(resp.reply));
            }
            Ok(_) => log::warn!("chat endpoint returned an empty reply"),
            Err(e) => {
                log::error!("error fetching from API: {e}");
                self.transcript.push(Message::assistant(FALLBACK_REPLY));
            }
        }
        self.state = SessionState::Idle;
    }

    /// Submits the pending input and waits for the reply.
    ///
    /// Returns `false` if nothing was sent.
    pub async fn submit<T>(&mut self, transport: &T) -> bool
    where
        T: ChatTransport + ?Sized,
    {
        let Some(messages) = self.begin_submit() else {
            return false;
        };
        log::debug!("sending {} messages", messages.len());
        let outcome = transport.send_transcript(&messages).await;
        self.finish_submit(outcome);
        true
    }
}

fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::models::Role;

    /// Records every transcript it receives and answers from a script.
    struct ScriptedTransport {
        seen: Mutex<Vec<Vec<Message>>>,
        outcome: fn(&[Message]) -> Result<ChatResponse, TransportError>,
    }

    impl ScriptedTransport {
        fn new(outcome: fn(&[Message]) -> Result<ChatResponse, TransportError>) -> Self {
            Self {
                seen: Mutex::new(Vec::new()),
                outcome,
            }
        }

        fn calls(&self) -> Vec<Vec<Message>> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ChatTransport for ScriptedTransport {
        async fn send_transcript(
            &self,
            messages: &[Message],
        ) -> Result<ChatResponse, TransportError> {
            self.seen.lock().unwrap().push(messages.to_vec());
            (self.outcome)(messages)
        }
    }

    fn echo_count(messages: &[Message]) -> Result<ChatResponse, TransportError> {
        Ok(ChatResponse {
            reply: format!("got {}", messages.len()),
        })
    }

    fn fail_network(_: &[Message]) -> Result<ChatResponse, TransportError> {
        Err(TransportError::Network("connection refused".into()))
    }

    fn fail_status(_: &[Message]) -> Result<ChatResponse, TransportError> {
        Err(TransportError::Status(500))
    }

    fn empty_reply(_: &[Message]) -> Result<ChatResponse, TransportError> {
        Ok(ChatResponse::default())
    }

    #[test]
    fn new_session_starts_with_greeting() {
        let session = ChatSession::new();
        assert_eq!(session.transcript(), &[Message::assistant(GREETING)]);
        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.pending_input(), "");
    }

    #[test]
    fn input_is_truncated_to_limit() {
        let mut session = ChatSession::new();
        let long = "é".repeat(MAX_INPUT_CHARS + 25);
        assert!(session.set_input(&long));
        assert_eq!(session.pending_input().chars().count(), MAX_INPUT_CHARS);

        session.set_input("abc");
        session.push_input(&"x".repeat(MAX_INPUT_CHARS));
        assert_eq!(session.pending_input().chars().count(), MAX_INPUT_CHARS);
        assert!(session.pending_input().starts_with("abc"));
    }

    #[tokio::test]
    async fn submit_appends_user_turn_before_sending() {
        let transport = ScriptedTransport::new(echo_count);
        let mut session = ChatSession::new();
        session.set_input("hello");

        assert!(session.submit(&transport).await);

        let calls = transport.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0],
            vec![Message::assistant(GREETING), Message::user("hello")]
        );
        assert_eq!(
            session.transcript(),
            &[
                Message::assistant(GREETING),
                Message::user("hello"),
                Message::assistant("got 2"),
            ]
        );
        assert_eq!(session.pending_input(), "");
        assert!(!session.is_awaiting_reply());
    }

    #[tokio::test]
    async fn blank_input_is_a_no_op() {
        let transport = ScriptedTransport::new(echo_count);
        for blank in ["", "   ", "\n\t "] {
            let mut session = ChatSession::new();
            session.set_input(blank);

            assert!(!session.submit(&transport).await);
            assert_eq!(session.transcript().len(), 1);
            assert_eq!(session.pending_input(), blank);
            assert_eq!(session.state(), SessionState::Idle);
        }
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn transport_failure_appends_single_fallback() {
        let outcomes: [fn(&[Message]) -> Result<ChatResponse, TransportError>; 2] =
            [fail_network, fail_status];
        for outcome in outcomes {
            let transport = ScriptedTransport::new(outcome);
            let mut session = ChatSession::new();
            session.set_input("anyone there?");

            assert!(session.submit(&transport).await);

            let transcript = session.transcript();
            assert_eq!(transcript.len(), 3);
            assert_eq!(transcript[1], Message::user("anyone there?"));
            assert_eq!(transcript[2], Message::assistant(FALLBACK_REPLY));
            assert!(!session.is_awaiting_reply());
        }
    }

    #[tokio::test]
    async fn empty_reply_appends_nothing() {
        let transport = ScriptedTransport::new(empty_reply);
        let mut session = ChatSession::new();
        session.set_input("hi");

        session.submit(&transport).await;

        assert_eq!(session.transcript().len(), 2);
        assert_eq!(session.transcript()[1].role, Role::User);
        assert!(!session.is_awaiting_reply());
    }

    #[tokio::test]
    async fn whole_transcript_is_sent_each_turn() {
        let transport = ScriptedTransport::new(echo_count);
        let mut session = ChatSession::new();

        for text in ["one", "two", "three"] {
            session.set_input(text);
            session.submit(&transport).await;
        }

        let lens: Vec<usize> = transport.calls().iter().map(Vec::len).collect();
        assert_eq!(lens, vec![2, 4, 6]);
        assert_eq!(session.transcript().len(), 7);
    }

    #[test]
    fn input_is_disabled_while_awaiting_reply() {
        let mut session = ChatSession::new();
        session.set_input("first");
        let sent = session.begin_submit().expect("submitted");
        assert_eq!(sent.len(), 2);
        assert_eq!(session.state(), SessionState::AwaitingReply);

        assert!(!session.set_input("second"));
        assert!(!session.push_input("more"));
        assert_eq!(session.pending_input(), "");
        assert!(session.begin_submit().is_none());

        session.finish_submit(Ok(ChatResponse {
            reply: "done".into(),
        }));
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.set_input("second"));
    }

    #[test]
    fn outcome_without_outstanding_request_is_ignored() {
        let mut session = ChatSession::new();

        session.finish_submit(Ok(ChatResponse {
            reply: "stray".into(),
        }));
        session.finish_submit(Err(TransportError::Status(500)));

        assert_eq!(session.transcript(), &[Message::assistant(GREETING)]);
        assert_eq!(session.state(), SessionState::Idle);
    }
}

use crate::api::ClientResult;
use crate::models::{ChatMessage, ChatReply, ChatRequest, ChatTurn, Sender};

pub const GREETING: &str = "Hello! I can answer questions about submitted complaints. \
Try \"show the latest complaints\" or \"how many high priority complaints are open?\"";

pub const APOLOGY: &str =
    "Sorry, I couldn't reach the complaint assistant right now. Please try again in a moment.";

/// Transcript for one chat panel. At most one request is outstanding at a
/// time; sends while waiting are ignored.
#[derive(Clone, Debug, PartialEq)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    awaiting_reply: bool,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage::new(Sender::Assistant, GREETING)],
            awaiting_reply: false,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_awaiting_reply(&self) -> bool {
        self.awaiting_reply
    }

    /// Appends the user's message and returns the request to send, carrying
    /// every earlier turn as history. Blank input or an outstanding request
    /// yields `None` and leaves the transcript untouched.
    pub fn begin_send(&mut self, text: &str) -> Option<ChatRequest> {
        let message = text.trim();
        if message.is_empty() || self.awaiting_reply {
            return None;
        }

        let chat_history = self.messages.iter().map(ChatTurn::from).collect();
        self.messages.push(ChatMessage::new(Sender::User, message));
        self.awaiting_reply = true;

        Some(ChatRequest {
            message: message.to_string(),
            chat_history,
        })
    }

    pub fn complete(&mut self, outcome: ClientResult<ChatReply>) {
        let text = match outcome {
            Ok(reply) if !reply.response.trim().is_empty() => reply.response,
            Ok(_) => APOLOGY.to_string(),
            Err(err) => {
                tracing::error!("chat request failed: {err}");
                APOLOGY.to_string()
            }
        };
        self.messages.push(ChatMessage::new(Sender::Assistant, text));
        self.awaiting_reply = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ClientError;
    use reqwest::StatusCode;

    #[test]
    fn starts_with_one_assistant_greeting() {
        let session = ChatSession::new();
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.messages()[0].sender, Sender::Assistant);
        assert!(!session.is_awaiting_reply());
    }

    #[test]
    fn blank_messages_are_ignored() {
        let mut session = ChatSession::new();
        assert!(session.begin_send("").is_none());
        assert!(session.begin_send("   \n\t").is_none());
        assert_eq!(session.messages().len(), 1);
        assert!(!session.is_awaiting_reply());
    }

    #[test]
    fn send_appends_user_message_and_carries_prior_history() {
        let mut session = ChatSession::new();
        let request = session.begin_send("  latest complaints ").unwrap();

        assert_eq!(request.message, "latest complaints");
        assert_eq!(request.chat_history.len(), 1);
        assert_eq!(request.chat_history[0].sender, Sender::Assistant);
        assert_eq!(session.messages().len(), 2);
        assert_eq!(session.messages()[1].text, "latest complaints");
        assert!(session.is_awaiting_reply());
    }

    #[test]
    fn second_send_while_waiting_is_a_no_op() {
        let mut session = ChatSession::new();
        session.begin_send("first").unwrap();
        assert!(session.begin_send("second").is_none());
        assert_eq!(session.messages().len(), 2);
    }

    #[test]
    fn reply_is_appended_and_input_reenabled() {
        let mut session = ChatSession::new();
        session.begin_send("count?").unwrap();
        session.complete(Ok(ChatReply {
            response: "There are 4 complaints.".into(),
            status: Some("success".into()),
        }));

        assert!(!session.is_awaiting_reply());
        let last = session.messages().last().unwrap();
        assert_eq!(last.sender, Sender::Assistant);
        assert_eq!(last.text, "There are 4 complaints.");

        let next = session.begin_send("and resolved?").unwrap();
        assert_eq!(next.chat_history.len(), 3);
    }

    #[test]
    fn failure_appends_apology() {
        let mut session = ChatSession::new();
        session.begin_send("hello").unwrap();
        session.complete(Err(ClientError::Rejected {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "Chatbot error".into(),
        }));
        assert_eq!(session.messages().last().unwrap().text, APOLOGY);
        assert!(!session.is_awaiting_reply());
    }
}

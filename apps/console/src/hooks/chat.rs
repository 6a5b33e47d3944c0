use dioxus::prelude::*;

use crate::api::GrievanceClient;
use crate::services::chat::ChatSession;

#[derive(Clone)]
pub struct ChatHandle {
    pub session: Signal<ChatSession>,
    client: GrievanceClient,
}

impl ChatHandle {
    /// Returns `false` when the message was ignored (blank, or a reply is
    /// still pending).
    pub fn send(&self, text: &str) -> bool {
        let mut session = self.session;
        let Some(request) = session.write().begin_send(text) else {
            return false;
        };

        let client = self.client.clone();
        spawn(async move {
            let outcome = client.send_chat_message(&request).await;
            session.write().complete(outcome);
        });
        true
    }
}

pub fn use_chat() -> ChatHandle {
    let client = use_context::<GrievanceClient>();
    let session = use_signal(ChatSession::new);
    ChatHandle { session, client }
}

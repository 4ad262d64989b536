use serde::{Deserialize, Serialize};

/// Inbound webhook body: `{"object": "page", "entry": [{"messaging": [...]}]}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookPayload {
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub entry: Vec<WebhookEntry>,
}

impl WebhookPayload {
    pub fn is_page(&self) -> bool {
        self.object == "page"
    }

    /// All messaging events across every entry, in delivery order
    pub fn events(&self) -> impl Iterator<Item = &MessagingEvent> {
        self.entry.iter().flat_map(|entry| entry.messaging.iter())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookEntry {
    #[serde(default)]
    pub messaging: Vec<MessagingEvent>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessagingEvent {
    #[serde(default)]
    pub sender: Participant,
    #[serde(default)]
    pub message: Option<IncomingMessage>,
    #[serde(default)]
    pub postback: Option<Postback>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    #[serde(default)]
    pub id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IncomingMessage {
    #[serde(default)]
    pub text: Option<String>,
    /// Set on copies of messages the page itself sent
    #[serde(default)]
    pub is_echo: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Postback {
    #[serde(default)]
    pub payload: String,
}

/// Outbound Send API body
#[derive(Debug, Clone, Serialize)]
pub struct SendMessageRequest {
    pub recipient: Participant,
    pub message: OutgoingMessage,
}

#[derive(Debug, Clone, Serialize)]
pub struct OutgoingMessage {
    pub text: String,
}

impl SendMessageRequest {
    pub fn text(recipient_id: &str, text: &str) -> Self {
        Self {
            recipient: Participant {
                id: recipient_id.to_string(),
            },
            message: OutgoingMessage {
                text: text.to_string(),
            },
        }
    }
}

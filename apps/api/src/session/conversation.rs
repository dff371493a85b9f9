use serde::Serialize;

/// One turn of the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "role", content = "content", rename_all = "snake_case")]
pub enum ConversationEntry {
    Human(String),
    Assistant(String),
}

/// Append-only history of completed exchanges. Entries always come in
/// human/assistant pairs; a failed analysis adds nothing.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    entries: Vec<ConversationEntry>,
}

impl Conversation {
    pub fn append_exchange(&mut self, request: String, response: String) {
        self.entries.push(ConversationEntry::Human(request));
        self.entries.push(ConversationEntry::Assistant(response));
    }

    pub fn entries(&self) -> &[ConversationEntry] {
        &self.entries
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

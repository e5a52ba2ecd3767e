//! Per-session conversation context.
//!
//! The dispatch core itself is stateless across turns; the caller owns one
//! `ConversationContext` per session and hands it into every turn. Only a
//! bounded window of recent messages is exposed to the model collaborator.

use crate::types::Message;

/// Default number of recent messages handed to the model.
pub const DEFAULT_HISTORY_WINDOW: usize = 10;

/// Ordered conversation history with a bounded exposure window.
#[derive(Debug, Clone)]
pub struct ConversationContext {
    messages: Vec<Message>,
    window: usize,
}

impl ConversationContext {
    pub fn new() -> Self {
        Self::with_window(DEFAULT_HISTORY_WINDOW)
    }

    pub fn with_window(window: usize) -> Self {
        Self {
            messages: Vec::new(),
            window,
        }
    }

    pub fn push_user(&mut self, content: &str) {
        self.messages.push(Message::user(content));
    }

    pub fn push_assistant(&mut self, content: &str) {
        self.messages.push(Message::assistant(content));
    }

    /// The most recent messages, at most `window` of them, oldest first.
    pub fn recent(&self) -> &[Message] {
        let start = self.messages.len().saturating_sub(self.window);
        &self.messages[start..]
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }
}

impl Default for ConversationContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MessageRole;

    #[test]
    fn records_turns_in_order() {
        let mut context = ConversationContext::new();
        context.push_user("hello");
        context.push_assistant("hi there");

        let recent = context.recent();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].role, MessageRole::User);
        assert_eq!(recent[0].content, "hello");
        assert_eq!(recent[1].role, MessageRole::Assistant);
    }

    #[test]
    fn recent_is_bounded_by_window() {
        let mut context = ConversationContext::with_window(4);
        for i in 0..10 {
            context.push_user(&format!("message {}", i));
        }

        let recent = context.recent();
        assert_eq!(recent.len(), 4);
        assert_eq!(recent[0].content, "message 6");
        assert_eq!(recent[3].content, "message 9");
        assert_eq!(context.len(), 10);
    }

    #[test]
    fn clear_discards_history() {
        let mut context = ConversationContext::new();
        context.push_user("hello");
        context.clear();
        assert!(context.is_empty());
        assert!(context.recent().is_empty());
    }
}

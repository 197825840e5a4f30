//! Display sinks
//!
//! A sink observes every appended message for presentation. Sinks are
//! invoked by the driver after each append and have no way to influence
//! scheduling; dropping a sink's output never changes a conversation.

use std::sync::Mutex;

use tokio::sync::broadcast;

use roundtable_chat::ChatMessage;

/// Observer of appended messages
pub trait DisplaySink: Send + Sync {
    /// Called after every message append
    fn on_message(&self, message: &ChatMessage);

    /// Sink name (for logging/debugging)
    fn name(&self) -> &str;
}

/// Sink that prints each message to stdout
pub struct ConsoleSink;

impl DisplaySink for ConsoleSink {
    fn on_message(&self, message: &ChatMessage) {
        println!("[{}] {}", message.sender, message.content);
    }

    fn name(&self) -> &str {
        "console"
    }
}

/// Sink that broadcasts messages to subscribers
///
/// For UI frontends that render the chat elsewhere. If no subscriber is
/// listening, messages are dropped.
pub struct ChannelSink {
    sender: broadcast::Sender<ChatMessage>,
}

impl ChannelSink {
    /// Create a sink with the given channel capacity
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to future messages
    pub fn subscribe(&self) -> broadcast::Receiver<ChatMessage> {
        self.sender.subscribe()
    }

    /// Number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for ChannelSink {
    fn default() -> Self {
        Self::new(256)
    }
}

impl DisplaySink for ChannelSink {
    fn on_message(&self, message: &ChatMessage) {
        // Ignore if no receivers
        let _ = self.sender.send(message.clone());
    }

    fn name(&self) -> &str {
        "channel"
    }
}

/// Sink that discards everything
pub struct NullSink;

impl DisplaySink for NullSink {
    fn on_message(&self, _message: &ChatMessage) {}

    fn name(&self) -> &str {
        "null"
    }
}

/// Sink that records messages for assertions in tests
pub struct CollectingSink {
    messages: Mutex<Vec<ChatMessage>>,
}

impl CollectingSink {
    /// Create an empty collecting sink
    pub fn new() -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
        }
    }

    /// Messages observed so far, in order
    pub fn collected(&self) -> Vec<ChatMessage> {
        self.messages.lock().expect("sink lock poisoned").clone()
    }

    /// Number of messages observed
    pub fn len(&self) -> usize {
        self.messages.lock().expect("sink lock poisoned").len()
    }

    /// Whether no messages were observed
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for CollectingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplaySink for CollectingSink {
    fn on_message(&self, message: &ChatMessage) {
        self.messages
            .lock()
            .expect("sink lock poisoned")
            .push(message.clone());
    }

    fn name(&self) -> &str {
        "collecting"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collecting_sink_records_in_order() {
        let sink = CollectingSink::new();
        sink.on_message(&ChatMessage::new("Admin", "first", 0));
        sink.on_message(&ChatMessage::new("Planner", "second", 1));

        let collected = sink.collected();
        assert_eq!(collected.len(), 2);
        assert_eq!(collected[0].content, "first");
        assert_eq!(collected[1].sender, "Planner");
    }

    #[tokio::test]
    async fn test_channel_sink_broadcasts() {
        let sink = ChannelSink::new(16);
        let mut rx1 = sink.subscribe();
        let mut rx2 = sink.subscribe();
        assert_eq!(sink.subscriber_count(), 2);

        sink.on_message(&ChatMessage::new("Admin", "hello", 0));

        assert_eq!(rx1.recv().await.unwrap().content, "hello");
        assert_eq!(rx2.recv().await.unwrap().content, "hello");
    }

    #[test]
    fn test_channel_sink_without_subscribers() {
        let sink = ChannelSink::new(16);
        // Must not panic with nobody listening
        sink.on_message(&ChatMessage::new("Admin", "hello", 0));
    }

    #[test]
    fn test_null_sink() {
        let sink = NullSink;
        sink.on_message(&ChatMessage::new("Admin", "hello", 0));
        assert_eq!(sink.name(), "null");
    }
}

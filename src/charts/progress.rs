use std::sync::mpsc::Sender;

/// Transient "in progress" indicator shown while a figure is built.
pub trait ProgressSink {
    fn begin(&mut self, message: &str);
    fn finish(&mut self);
}

/// Ignores progress, for batch callers and tests.
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn begin(&mut self, _message: &str) {}
    fn finish(&mut self) {}
}

// For a UI thread that renders the indicator itself
pub struct ChannelProgress {
    sender: Sender<ProgressMessage>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressMessage {
    Started(String),
    Finished,
}

impl ChannelProgress {
    pub fn new(sender: Sender<ProgressMessage>) -> Self {
        Self { sender }
    }
}

impl ProgressSink for ChannelProgress {
    fn begin(&mut self, message: &str) {
        let _ = self.sender.send(ProgressMessage::Started(message.to_string()));
    }

    fn finish(&mut self) {
        let _ = self.sender.send(ProgressMessage::Finished);
    }
}

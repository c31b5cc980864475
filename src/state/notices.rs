#[cfg(test)]
#[path = "notices_test.rs"]
mod notices_test;

/// Transient notices surfaced after fallible operations (failed sign-in,
/// rejected writes, confirmations). Views push here instead of throwing.
#[derive(Clone, Debug, Default)]
pub struct NoticeState {
    pub items: Vec<Notice>,
    next_id: u64,
}

/// A single notice banner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub id: u64,
    pub kind: NoticeKind,
    pub message: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

impl NoticeState {
    pub fn push_info(&mut self, message: impl Into<String>) -> u64 {
        self.push(NoticeKind::Info, message.into())
    }

    pub fn push_error(&mut self, message: impl Into<String>) -> u64 {
        self.push(NoticeKind::Error, message.into())
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|n| n.id != id);
    }

    fn push(&mut self, kind: NoticeKind, message: String) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push(Notice { id, kind, message });
        id
    }
}

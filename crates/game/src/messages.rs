//! Toast notifications shown over the game view.
//!
//! A toast repeated while an identical one is still showing is folded into
//! it: the timer restarts and a repeat count is shown instead of a second
//! line.

use engine_core::Lifetime;

/// Oldest toasts are dropped past this many.
const MAX_LOG: usize = 50;
const MAX_VISIBLE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
}

impl MessageKind {
    /// Seconds on screen. Warnings linger longest.
    pub fn duration(self) -> f32 {
        match self {
            MessageKind::Info => 2.5,
            MessageKind::Success => 3.0,
            MessageKind::Warning => 4.0,
        }
    }

    pub fn color(self) -> [f32; 4] {
        match self {
            MessageKind::Info => [1.0, 1.0, 1.0, 1.0],
            MessageKind::Success => [0.3, 1.0, 0.3, 1.0],
            MessageKind::Warning => [1.0, 0.9, 0.3, 1.0],
        }
    }
}

#[derive(Debug, Clone)]
pub struct GameMessage {
    pub text: String,
    pub kind: MessageKind,
    pub lifetime: Lifetime,
    /// How many times this toast was raised while showing.
    pub repeats: u32,
}

impl GameMessage {
    pub fn color(&self) -> [f32; 4] {
        self.kind.color()
    }

    /// Display text, with the repeat count once there is one.
    pub fn label(&self) -> String {
        if self.repeats > 1 {
            format!("{} (x{})", self.text, self.repeats)
        } else {
            self.text.clone()
        }
    }
}

#[derive(Debug, Default)]
pub struct GameMessages {
    messages: Vec<GameMessage>,
}

impl GameMessages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: MessageKind, text: impl Into<String>) {
        let text = text.into();
        if let Some(existing) = self
            .messages
            .iter_mut()
            .find(|m| m.kind == kind && m.text == text)
        {
            existing.lifetime = Lifetime::new(kind.duration());
            existing.repeats += 1;
            return;
        }

        self.messages.push(GameMessage {
            text,
            kind,
            lifetime: Lifetime::new(kind.duration()),
            repeats: 1,
        });
        if self.messages.len() > MAX_LOG {
            self.messages.remove(0);
        }
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.push(MessageKind::Info, text);
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.push(MessageKind::Success, text);
    }

    pub fn warning(&mut self, text: impl Into<String>) {
        self.push(MessageKind::Warning, text);
    }

    pub fn update(&mut self, dt: f32) {
        for msg in &mut self.messages {
            msg.lifetime.update(dt);
        }
        self.messages.retain(|m| !m.lifetime.is_expired());
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Newest toasts, oldest first.
    pub fn visible(&self) -> &[GameMessage] {
        let start = self.messages.len().saturating_sub(MAX_VISIBLE);
        &self.messages[start..]
    }
}

use crate::core::counter::AnimationHandle;
use crate::domain::page::ElementRef;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_TYPE_SPEED: Duration = Duration::from_millis(80);
/// Pause on a fully typed phrase before deleting starts.
const HOLD_DELAY: Duration = Duration::from_millis(2000);
/// Pause after a phrase is fully deleted, before the next one begins.
const PHRASE_GAP: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub text: String,
    pub delay: Duration,
}

/// Cyclic type/delete state machine over a list of phrases. `tick` is a pure
/// step: type one character at base speed, delete at double speed, hold a
/// finished phrase, then wrap to the next phrase forever.
#[derive(Debug, Clone)]
pub struct Typewriter {
    phrases: Vec<String>,
    speed: Duration,
    index: usize,
    chars: usize,
    deleting: bool,
}

impl Typewriter {
    pub fn new(phrases: Vec<String>, speed: Duration) -> Self {
        Self {
            phrases,
            speed,
            index: 0,
            chars: 0,
            deleting: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    pub fn tick(&mut self) -> Frame {
        if self.phrases.is_empty() {
            return Frame {
                text: String::new(),
                delay: self.speed,
            };
        }

        let phrase = &self.phrases[self.index];
        let len = phrase.chars().count();

        if self.deleting {
            self.chars = self.chars.saturating_sub(1);
        } else if self.chars < len {
            self.chars += 1;
        }

        let text: String = phrase.chars().take(self.chars).collect();
        let mut delay = if self.deleting {
            self.speed / 2
        } else {
            self.speed
        };

        if !self.deleting && self.chars == len {
            delay = HOLD_DELAY;
            self.deleting = true;
        } else if self.deleting && self.chars == 0 {
            self.deleting = false;
            self.index = (self.index + 1) % self.phrases.len();
            delay = PHRASE_GAP;
        }

        Frame { text, delay }
    }
}

/// Drives a typewriter against an element. The loop has no natural end; it
/// stops when cancelled through the handle or when the element is dropped.
pub fn run(element: &ElementRef, mut typewriter: Typewriter) -> AnimationHandle {
    let weak = Arc::downgrade(element);

    let task = tokio::spawn(async move {
        if typewriter.is_empty() {
            return;
        }
        loop {
            let frame = typewriter.tick();
            {
                let Some(element) = weak.upgrade() else {
                    tracing::debug!("Typewriter target detached, stopping");
                    break;
                };
                if let Ok(mut element) = element.lock() {
                    element.set_text(frame.text);
                };
            }
            tokio::time::sleep(frame.delay).await;
        }
    });

    AnimationHandle::new(task)
}

//! Typing-text state machine.
//!
//! The machine only knows about text and delays; whoever drives it renders
//! [`TypingMachine::text`] after each [`TypingMachine::step`] and schedules
//! the next step after the returned delay.

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TypingTimings {
    pub type_speed_ms: u32,
    pub delete_speed_ms: u32,
    pub pause_ms: u32,
}

impl Default for TypingTimings {
    fn default() -> Self {
        Self {
            type_speed_ms: 100,
            delete_speed_ms: 50,
            pause_ms: 2000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Typing,
    Pausing,
    Deleting,
}

#[derive(Debug, Clone)]
pub struct TypingMachine {
    phrases: Vec<String>,
    timings: TypingTimings,
    index: usize,
    /// Number of characters of the current phrase on screen.
    shown: usize,
    phase: Phase,
}

impl TypingMachine {
    /// Returns `None` when there is nothing to type.
    pub fn new(phrases: Vec<String>, timings: TypingTimings) -> Option<Self> {
        if phrases.is_empty() {
            return None;
        }
        Some(Self {
            phrases,
            timings,
            index: 0,
            shown: 0,
            phase: Phase::Typing,
        })
    }

    /// Delay before the very first step.
    pub fn initial_delay(&self) -> u32 {
        self.timings.type_speed_ms
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    fn current(&self) -> &str {
        &self.phrases[self.index]
    }

    /// The text that should currently be displayed.
    pub fn text(&self) -> &str {
        let phrase = self.current();
        match phrase.char_indices().nth(self.shown) {
            Some((end, _)) => &phrase[..end],
            None => phrase,
        }
    }

    /// Advances one tick and returns the delay until the next one, in ms.
    pub fn step(&mut self) -> u32 {
        match self.phase {
            Phase::Typing => {
                let len = self.current().chars().count();
                if self.shown < len {
                    self.shown += 1;
                }
                if self.shown >= len {
                    self.phase = Phase::Pausing;
                    self.timings.pause_ms
                } else {
                    self.timings.type_speed_ms
                }
            }
            Phase::Pausing => {
                self.phase = Phase::Deleting;
                self.timings.delete_speed_ms
            }
            Phase::Deleting => {
                self.shown = self.shown.saturating_sub(1);
                if self.shown == 0 {
                    self.index = (self.index + 1) % self.phrases.len();
                    self.phase = Phase::Typing;
                    self.timings.type_speed_ms
                } else {
                    self.timings.delete_speed_ms
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_phrase_list_is_rejected() {
        assert!(TypingMachine::new(Vec::new(), TypingTimings::default()).is_none());
    }

    #[test]
    fn cuts_on_char_boundaries() {
        let mut m = TypingMachine::new(vec!["ﾊﾐ".into()], TypingTimings::default()).unwrap();
        m.step();
        assert_eq!(m.text(), "ﾊ");
        m.step();
        assert_eq!(m.text(), "ﾊﾐ");
        assert_eq!(m.phase(), Phase::Pausing);
    }

    #[test]
    fn empty_phrase_pauses_immediately() {
        let mut m =
            TypingMachine::new(vec![String::new(), "x".into()], TypingTimings::default()).unwrap();
        assert_eq!(m.step(), 2000);
        assert_eq!(m.phase(), Phase::Pausing);
        m.step();
        // deleting an empty phrase moves on right away
        assert_eq!(m.phase(), Phase::Typing);
        m.step();
        assert_eq!(m.text(), "x");
    }
}

//! Scripted input for the headless driver
//!
//! One command per line:
//!
//! ```text
//! press return     # key down
//! release return   # key up
//! wait 120         # let 120 ticks pass
//! close            # window close request
//! ```

use std::collections::VecDeque;
use std::fmt;

use crate::sim::InputEvent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptError {
    pub line: usize,
    pub reason: String,
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "script line {}: {}", self.line, self.reason)
    }
}

impl std::error::Error for ScriptError {}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Step {
    Event(InputEvent),
    Wait(u32),
}

/// Parsed script, consumed one tick at a time
#[derive(Debug, Clone, Default)]
pub struct InputScript {
    steps: VecDeque<Step>,
    waiting: u32,
}

impl InputScript {
    pub fn parse(text: &str) -> Result<Self, ScriptError> {
        let mut steps = VecDeque::new();
        for (i, raw) in text.lines().enumerate() {
            let line = raw.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }
            let err = |reason: String| ScriptError { line: i + 1, reason };
            let mut words = line.split_whitespace();
            let command = words.next().unwrap_or("");
            let arg = words.next();
            if words.next().is_some() {
                return Err(err(format!("too many arguments: {line}")));
            }
            let step = match (command, arg) {
                ("press", Some(key)) => Step::Event(InputEvent::Key {
                    key: key.to_string(),
                    pressed: true,
                }),
                ("release", Some(key)) => Step::Event(InputEvent::Key {
                    key: key.to_string(),
                    pressed: false,
                }),
                ("wait", Some(n)) => Step::Wait(
                    n.parse()
                        .map_err(|_| err(format!("bad tick count: {n}")))?,
                ),
                ("close", None) => Step::Event(InputEvent::CloseRequested),
                _ => return Err(err(format!("unknown command: {line}"))),
            };
            steps.push_back(step);
        }
        Ok(Self { steps, waiting: 0 })
    }

    /// Events to deliver before the next tick
    pub fn next_tick(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();
        if self.waiting > 0 {
            self.waiting -= 1;
            return events;
        }
        while let Some(step) = self.steps.pop_front() {
            match step {
                Step::Event(event) => events.push(event),
                Step::Wait(0) => {}
                Step::Wait(n) => {
                    // This tick counts as the first one waited
                    self.waiting = n - 1;
                    break;
                }
            }
        }
        events
    }

    pub fn is_finished(&self) -> bool {
        self.steps.is_empty() && self.waiting == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_grouped_by_waits() {
        let mut script = InputScript::parse(
            "press return\nwait 2\nrelease return # done\n\npress q\n",
        )
        .unwrap();

        assert_eq!(script.next_tick().len(), 1);
        assert!(script.next_tick().is_empty());
        let last = script.next_tick();
        assert_eq!(last.len(), 2);
        assert_eq!(
            last[0],
            InputEvent::Key {
                key: "return".to_string(),
                pressed: false
            }
        );
        assert!(script.is_finished());
    }

    #[test]
    fn test_close_command() {
        let mut script = InputScript::parse("close").unwrap();
        assert_eq!(script.next_tick(), vec![InputEvent::CloseRequested]);
    }

    #[test]
    fn test_errors_report_line() {
        let err = InputScript::parse("press a\njump").unwrap_err();
        assert_eq!(err.line, 2);
        let err = InputScript::parse("wait soon").unwrap_err();
        assert!(err.reason.contains("bad tick count"));
    }
}

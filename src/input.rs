use crate::error::{Error, Result};
use core::str::FromStr;
use std::collections::VecDeque;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Escape,
    Char(char),
    /// A key without a dedicated variant, carrying the backend's name for it.
    Other(String),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Left => write!(f, "left"),
            Key::Right => write!(f, "right"),
            Key::Up => write!(f, "up"),
            Key::Down => write!(f, "down"),
            Key::Escape => write!(f, "escape"),
            Key::Char(c) => write!(f, "{}", c),
            Key::Other(name) => write!(f, "{}", name),
        }
    }
}

impl FromStr for Key {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let key = match s {
            "left" => Key::Left,
            "right" => Key::Right,
            "up" => Key::Up,
            "down" => Key::Down,
            "escape" => Key::Escape,
            _ => {
                let mut chars = s.chars();

                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    _ => return Err(Error::Script(format!("unknown key: {}", s))),
                }
            }
        };

        Ok(key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    Other(u8),
}

impl fmt::Display for MouseButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MouseButton::Left => write!(f, "left"),
            MouseButton::Middle => write!(f, "middle"),
            MouseButton::Right => write!(f, "right"),
            MouseButton::Other(n) => write!(f, "#{}", n),
        }
    }
}

impl FromStr for MouseButton {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "left" => Ok(MouseButton::Left),
            "middle" => Ok(MouseButton::Middle),
            "right" => Ok(MouseButton::Right),
            _ => Err(Error::Script(format!("unknown mouse button: {}", s))),
        }
    }
}

/// Platform input, reduced to what the game reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// The window was closed.
    Quit,
    KeyDown(Key),
    KeyUp(Key),
    MouseButtonDown { button: MouseButton, x: i32, y: i32 },
}

impl fmt::Display for InputEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputEvent::Quit => write!(f, "quit"),
            InputEvent::KeyDown(key) => write!(f, "key down: {}", key),
            InputEvent::KeyUp(key) => write!(f, "key up: {}", key),
            InputEvent::MouseButtonDown { button, x, y } => {
                write!(f, "mouse button down: {} button at {},{}", button, x, y)
            }
        }
    }
}

/// Parses a single script token, see [`ScriptedEvents`].
impl FromStr for InputEvent {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.trim().split(':').collect();

        match parts.as_slice() {
            ["quit"] => Ok(InputEvent::Quit),
            ["up", key] => Ok(InputEvent::KeyUp(key.parse()?)),
            ["click", button, x, y] => {
                let coordinate = |raw: &str| {
                    raw.parse::<i32>()
                        .map_err(|_| Error::Script(format!("invalid coordinate: {}", raw)))
                };

                Ok(InputEvent::MouseButtonDown {
                    button: button.parse()?,
                    x: coordinate(*x)?,
                    y: coordinate(*y)?,
                })
            }
            [key] => Ok(InputEvent::KeyDown(key.parse()?)),
            _ => Err(Error::Script(format!("invalid event: {}", s))),
        }
    }
}

/// Anything that can hand over the input events queued since the last call.
pub trait EventSource {
    /// Drains every pending event without blocking.
    fn poll_events(&mut self) -> Vec<InputEvent>;
}

/// Replays a fixed list of events, one per poll, then reports [`InputEvent::Quit`]
/// forever so a headless run always terminates.
#[derive(Debug, Default)]
pub struct ScriptedEvents {
    queue: VecDeque<InputEvent>,
}

impl ScriptedEvents {
    pub fn new(events: impl IntoIterator<Item = InputEvent>) -> Self {
        Self {
            queue: events.into_iter().collect(),
        }
    }

    /// Reads a comma separated script such as `right,right,down,click:left:120:80,q`.
    pub fn parse(script: &str) -> Result<Self> {
        let events = script
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::parse::<InputEvent>)
            .collect::<Result<Vec<InputEvent>>>()?;

        Ok(Self::new(events))
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl EventSource for ScriptedEvents {
    fn poll_events(&mut self) -> Vec<InputEvent> {
        vec![self.queue.pop_front().unwrap_or(InputEvent::Quit)]
    }
}

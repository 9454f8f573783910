//! Keyboard shortcuts for answering and advancing.

/// A key press as seen by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
}

impl Key {
    /// Interpret one line of terminal input: empty means Enter, a single
    /// character is that key, anything longer is not a key press.
    #[must_use]
    pub fn from_line(line: &str) -> Option<Self> {
        let trimmed = line.trim();
        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (None, _) => Some(Key::Enter),
            (Some(ch), None) => Some(Key::Char(ch)),
            _ => None,
        }
    }
}

/// What a key press asks the quiz to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCommand {
    Select(usize),
    Next,
}

impl InputCommand {
    /// `1`-`4` / `a`-`d` (any case) select while a question is open;
    /// Enter advances once it has been answered.
    #[must_use]
    pub fn from_key(key: Key, answered: bool) -> Option<Self> {
        match (key, answered) {
            (Key::Char(ch), false) => answer_index(ch).map(InputCommand::Select),
            (Key::Enter, true) => Some(InputCommand::Next),
            _ => None,
        }
    }
}

fn answer_index(ch: char) -> Option<usize> {
    match ch.to_ascii_lowercase() {
        '1' | 'a' => Some(0),
        '2' | 'b' => Some(1),
        '3' | 'c' => Some(2),
        '4' | 'd' => Some(3),
        _ => None,
    }
}

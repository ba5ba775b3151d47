//! Key events delivered by the host.

use std::fmt;

/// Key identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Printable key: a physical Latin key ('a'..='z', ';', ...) or a jamo
    /// sent directly by a soft keyboard
    Char(char),
    /// Shift modifier key
    Shift,
    /// AltGr (right Alt) modifier key
    AltGraph,
    /// Space key (commits the pending syllable)
    Space,
    /// Enter/Return key (commits the pending syllable)
    Enter,
    /// Backspace key (erases the last pending letter)
    Backspace,
    /// Archaic input on/off
    ModeToggle,
    /// Any other key (arrows, Tab, Escape, ...)
    Other,
}

impl Key {
    pub fn is_modifier(&self) -> bool {
        matches!(self, Key::Shift | Key::AltGraph)
    }
}

/// Key transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyState {
    Down,
    Up,
}

/// Held modifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModifierSet {
    pub shift: bool,
    pub altgr: bool,
}

impl ModifierSet {
    pub const NONE: Self = Self {
        shift: false,
        altgr: false,
    };
    pub const SHIFT: Self = Self {
        shift: true,
        altgr: false,
    };
    pub const ALTGR: Self = Self {
        shift: false,
        altgr: true,
    };
    pub const ALTGR_SHIFT: Self = Self {
        shift: true,
        altgr: true,
    };

    pub fn is_empty(&self) -> bool {
        !self.shift && !self.altgr
    }

    pub fn union(self, other: Self) -> Self {
        Self {
            shift: self.shift || other.shift,
            altgr: self.altgr || other.altgr,
        }
    }
}

impl fmt::Display for ModifierSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.altgr, self.shift) {
            (true, true) => write!(f, "altgr+shift"),
            (true, false) => write!(f, "altgr"),
            (false, true) => write!(f, "shift"),
            (false, false) => Ok(()),
        }
    }
}

/// One physical key transition, stamped with the host's clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub state: KeyState,
    /// Modifier bitmask reported by the host with this event
    pub modifiers: ModifierSet,
    /// Milliseconds on a monotonic clock
    pub time_ms: u64,
}

impl KeyEvent {
    pub fn new(key: Key, state: KeyState, time_ms: u64) -> Self {
        Self {
            key,
            state,
            modifiers: ModifierSet::NONE,
            time_ms,
        }
    }

    pub fn down(key: Key, time_ms: u64) -> Self {
        Self::new(key, KeyState::Down, time_ms)
    }

    pub fn up(key: Key, time_ms: u64) -> Self {
        Self::new(key, KeyState::Up, time_ms)
    }

    /// Key-down for a printable key.
    pub fn char(ch: char, time_ms: u64) -> Self {
        Self::down(Key::Char(ch), time_ms)
    }

    pub fn with_modifiers(mut self, modifiers: ModifierSet) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn is_down(&self) -> bool {
        self.state == KeyState::Down
    }
}

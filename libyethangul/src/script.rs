//! Key scripts: a compact text form of key event streams for the CLI and
//! tests.
//!
//! Tokens are separated by whitespace:
//!
//! - a single character presses that key (`r`, `;`, `ㅿ`)
//! - `shift+q`, `altgr+s`, `altgr+shift+m` hold modifiers around a key
//! - `space`, `enter`, `bs`, `toggle`, `tab` press the named key
//! - `wait` pauses longer than the timing window
//!
//! Keys are 40 ms apart unless separated by `wait`.

use crate::combination::TriggerPattern;
use crate::engine::{CompositionEngine, KeyResult};
use crate::key_event::{Key, KeyEvent};

/// Gap between consecutive scripted keys.
pub const KEY_INTERVAL_MS: u64 = 40;

fn named_key(token: &str) -> Option<Key> {
    match token.to_ascii_lowercase().as_str() {
        "space" => Some(Key::Space),
        "enter" | "return" => Some(Key::Enter),
        "bs" | "backspace" => Some(Key::Backspace),
        "toggle" => Some(Key::ModeToggle),
        "tab" | "esc" | "escape" | "left" | "right" => Some(Key::Other),
        _ => None,
    }
}

/// Parse a key script into events. `window_ms` sizes the `wait` pause.
pub fn parse(script: &str, window_ms: u64) -> Result<Vec<KeyEvent>, String> {
    let mut events = Vec::new();
    let mut now = 0u64;

    for token in script.split_whitespace() {
        if token.eq_ignore_ascii_case("wait") {
            now += window_ms + 1;
            continue;
        }

        if let Some(key) = named_key(token) {
            events.push(KeyEvent::down(key, now));
            events.push(KeyEvent::up(key, now + 1));
        } else {
            match token.parse::<TriggerPattern>()? {
                TriggerPattern::SingleKey(ch) => {
                    events.push(KeyEvent::char(ch, now));
                    events.push(KeyEvent::up(Key::Char(ch), now + 1));
                }
                TriggerPattern::ModifiedKey(modifiers, ch) => {
                    let mut held = Vec::new();
                    if modifiers.altgr {
                        held.push(Key::AltGraph);
                    }
                    if modifiers.shift {
                        held.push(Key::Shift);
                    }
                    for key in &held {
                        events.push(KeyEvent::down(*key, now));
                    }
                    events.push(KeyEvent::char(ch, now));
                    events.push(KeyEvent::up(Key::Char(ch), now + 1));
                    for key in held.iter().rev() {
                        events.push(KeyEvent::up(*key, now + 1));
                    }
                }
                other => return Err(format!("'{}' is not a single key press ({})", token, other)),
            }
        }
        now += KEY_INTERVAL_MS;
    }
    Ok(events)
}

/// Feed events to the engine and return the text a host would end up with:
/// committed text plus the keys the engine passed through. The pending
/// syllable is left in the engine.
pub fn replay(engine: &mut CompositionEngine, events: &[KeyEvent]) -> String {
    let mut out = String::new();
    for event in events {
        let result = engine.process_key(*event);
        if engine.context().has_commit() {
            out.push_str(&engine.context_mut().take_commit());
        }
        if result == KeyResult::Handled || !event.is_down() {
            continue;
        }
        match event.key {
            Key::Char(ch) => out.push(ch),
            Key::Space => out.push(' '),
            Key::Enter => out.push('\n'),
            Key::Backspace => {
                out.pop();
            }
            _ => {}
        }
    }
    out
}

/// Parse, replay and commit whatever is still pending. Each run starts with
/// an empty key history.
pub fn run(engine: &mut CompositionEngine, script: &str) -> Result<String, String> {
    let window_ms = engine.interpreter().history().window_ms();
    let events = parse(script, window_ms)?;
    let mut out = replay(engine, &events);
    out.push_str(&engine.flush());
    Ok(out)
}

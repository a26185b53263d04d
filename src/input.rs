use crate::sim::Action;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use std::time::Duration;

#[derive(Clone, Debug)]
pub(crate) struct InputEvent {
    pub(crate) key: KeyCode,
    pub(crate) mods: KeyModifiers,
}

/// Drains every pending key event without blocking past `timeout`.
pub(crate) fn collect_input_nonblocking(timeout: Duration) -> anyhow::Result<Vec<InputEvent>> {
    let mut out = Vec::new();

    let timeout = std::cmp::min(Duration::from_millis(1), timeout);
    while event::poll(timeout)? {
        if let Event::Key(k) = event::read()? {
            if k.kind == KeyEventKind::Press || k.kind == KeyEventKind::Repeat {
                out.push(InputEvent {
                    key: k.code,
                    mods: k.modifiers,
                });
                if out.len() >= 64 {
                    break;
                }
            }
        }
    }
    Ok(out)
}

pub(crate) fn map_event_to_action(ev: &InputEvent) -> Option<Action> {
    if ev.mods.contains(KeyModifiers::CONTROL) {
        return match ev.key {
            KeyCode::Char('c') => Some(Action::Quit),
            _ => None,
        };
    }

    match ev.key {
        KeyCode::Char('p') => Some(Action::TogglePlay),
        KeyCode::Char('c') => Some(Action::ToggleCell),
        KeyCode::Char('C') => Some(Action::Clear),
        KeyCode::Char('i') => Some(Action::SpeedUp),
        KeyCode::Char('d') => Some(Action::SlowDown),
        KeyCode::Char('s') => Some(Action::SingleStep),
        KeyCode::Char('h') | KeyCode::Left => Some(Action::Move(0, -1)),
        KeyCode::Char('j') | KeyCode::Down => Some(Action::Move(1, 0)),
        KeyCode::Char('k') | KeyCode::Up => Some(Action::Move(-1, 0)),
        KeyCode::Char('l') | KeyCode::Right => Some(Action::Move(0, 1)),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}

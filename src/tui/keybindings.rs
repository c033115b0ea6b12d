//! Keybinding definitions
//!
//! The keyboard shortcuts for each context, as listed in the help dialog

use crossterm::event::KeyCode;

/// A keybinding definition
#[derive(Debug, Clone)]
pub struct Keybinding {
    /// Keys that trigger the action
    pub keys: &'static [KeyCode],
    /// Description of what the key does
    pub description: &'static str,
    /// Context where this keybinding is active
    pub context: KeyContext,
}

/// Context in which a keybinding is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyContext {
    /// Active everywhere outside dialogs
    Global,
    /// Active on the transaction list
    List,
    /// Active while the selected row is swiped open
    OpenRow,
    /// Active in the transaction form
    Form,
}

impl KeyContext {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Global => "Global Keys",
            Self::List => "Transactions",
            Self::OpenRow => "Open Row",
            Self::Form => "Transaction Form",
        }
    }

    pub fn all() -> [Self; 4] {
        [Self::Global, Self::List, Self::OpenRow, Self::Form]
    }
}

/// All keybindings
pub static KEYBINDINGS: &[Keybinding] = &[
    // Global
    Keybinding {
        keys: &[KeyCode::Char('q')],
        description: "Quit",
        context: KeyContext::Global,
    },
    Keybinding {
        keys: &[KeyCode::Char('?')],
        description: "Show/hide help",
        context: KeyContext::Global,
    },
    Keybinding {
        keys: &[KeyCode::Char('p')],
        description: "Cycle period (day/week/month/year)",
        context: KeyContext::Global,
    },
    Keybinding {
        keys: &[KeyCode::Char('['), KeyCode::Char(']')],
        description: "Previous/next period",
        context: KeyContext::Global,
    },
    Keybinding {
        keys: &[KeyCode::Char('s')],
        description: "Balance over all time or the period",
        context: KeyContext::Global,
    },
    // List
    Keybinding {
        keys: &[KeyCode::Char('j'), KeyCode::Char('k')],
        description: "Move selection down/up",
        context: KeyContext::List,
    },
    Keybinding {
        keys: &[KeyCode::Char('g'), KeyCode::Char('G')],
        description: "First/last transaction",
        context: KeyContext::List,
    },
    Keybinding {
        keys: &[KeyCode::Char('a')],
        description: "Add transaction",
        context: KeyContext::List,
    },
    Keybinding {
        keys: &[KeyCode::Char('h'), KeyCode::Left],
        description: "Swipe row open",
        context: KeyContext::List,
    },
    Keybinding {
        keys: &[KeyCode::Char('r')],
        description: "Reload from disk",
        context: KeyContext::List,
    },
    // Open row
    Keybinding {
        keys: &[KeyCode::Char('e')],
        description: "Edit",
        context: KeyContext::OpenRow,
    },
    Keybinding {
        keys: &[KeyCode::Char('d')],
        description: "Delete",
        context: KeyContext::OpenRow,
    },
    Keybinding {
        keys: &[KeyCode::Char('l'), KeyCode::Right, KeyCode::Esc, KeyCode::Enter],
        description: "Close row",
        context: KeyContext::OpenRow,
    },
    // Form
    Keybinding {
        keys: &[KeyCode::Tab, KeyCode::BackTab],
        description: "Next/previous field",
        context: KeyContext::Form,
    },
    Keybinding {
        keys: &[KeyCode::Left, KeyCode::Right],
        description: "Change type or status",
        context: KeyContext::Form,
    },
    Keybinding {
        keys: &[KeyCode::Enter],
        description: "Save",
        context: KeyContext::Form,
    },
    Keybinding {
        keys: &[KeyCode::Esc],
        description: "Cancel",
        context: KeyContext::Form,
    },
];

/// Get keybindings for a specific context
pub fn get_keybindings(context: KeyContext) -> Vec<&'static Keybinding> {
    KEYBINDINGS
        .iter()
        .filter(|kb| kb.context == context)
        .collect()
}

fn format_key(key: &KeyCode) -> String {
    match key {
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::BackTab => "Shift+Tab".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Up => "↑".to_string(),
        KeyCode::Down => "↓".to_string(),
        KeyCode::Left => "←".to_string(),
        KeyCode::Right => "→".to_string(),
        other => format!("{:?}", other),
    }
}

/// Format a keybinding for display
pub fn format_keybinding(kb: &Keybinding) -> String {
    kb.keys.iter().map(format_key).collect::<Vec<_>>().join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_context_has_bindings() {
        for context in KeyContext::all() {
            assert!(!get_keybindings(context).is_empty(), "{:?}", context);
        }
    }

    #[test]
    fn test_no_key_bound_twice_in_a_context() {
        for context in KeyContext::all() {
            let mut seen = HashSet::new();
            for kb in get_keybindings(context) {
                for key in kb.keys {
                    assert!(seen.insert(*key), "{:?} bound twice in {:?}", key, context);
                }
            }
        }
    }

    #[test]
    fn test_format_keybinding() {
        let close = get_keybindings(KeyContext::OpenRow)
            .into_iter()
            .find(|kb| kb.description == "Close row")
            .unwrap();
        assert_eq!(format_keybinding(close), "l/→/Esc/Enter");
    }
}

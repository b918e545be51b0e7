//! Keybinding system for context-aware keyboard shortcuts
//!
//! Provides a registry of keybindings that change based on the current application mode.
//! The same registry drives key dispatch, the navigation bar and the help overlay.

use crate::app::AppMode;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Actions that can be triggered by keybindings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    NavigateUp,
    NavigateDown,
    /// Previous option, or one percent less
    Decrease,
    /// Next option, or one percent more
    Increase,
    StepDown,
    StepUp,
    Toggle,
    Submit,
    Save,
    SwitchField,
    Confirm,
    Cancel,
    Dismiss,
    Help,
    Quit,
}

/// A keybinding definition
#[derive(Debug, Clone)]
pub struct Keybinding {
    pub key: KeyCode,
    pub modifiers: KeyModifiers,
    pub action: KeyAction,
    pub display: String,
    pub description: String,
}

impl Keybinding {
    /// Create a new keybinding with no modifiers
    pub fn new(key: KeyCode, action: KeyAction, display: &str, description: &str) -> Self {
        Self {
            key,
            modifiers: KeyModifiers::NONE,
            action,
            display: display.to_string(),
            description: description.to_string(),
        }
    }

    /// Create a keybinding with modifiers
    pub fn with_modifiers(
        key: KeyCode,
        modifiers: KeyModifiers,
        action: KeyAction,
        display: &str,
        description: &str,
    ) -> Self {
        Self {
            key,
            modifiers,
            action,
            display: display.to_string(),
            description: description.to_string(),
        }
    }

    /// Whether a key event triggers this binding.
    ///
    /// Unmodified bindings ignore Shift (BackTab arrives with it) but never
    /// fire while Control or Alt is held.
    pub fn matches(&self, event: &KeyEvent) -> bool {
        if event.code != self.key {
            return false;
        }
        if self.modifiers.is_empty() {
            !event
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        } else {
            event.modifiers.contains(self.modifiers)
        }
    }
}

/// Context-aware keybinding registry
pub struct KeybindingContext {
    /// Mode-specific keybindings
    mode_bindings: HashMap<AppMode, Vec<Keybinding>>,
    /// Global keybindings (available in all modes)
    global_bindings: Vec<Keybinding>,
}

impl Default for KeybindingContext {
    fn default() -> Self {
        Self::new()
    }
}

impl KeybindingContext {
    /// Create a new keybinding context with default bindings
    pub fn new() -> Self {
        let mut ctx = Self {
            mode_bindings: HashMap::new(),
            global_bindings: Vec::new(),
        };
        ctx.register_defaults();
        ctx
    }

    /// Register default keybindings for all modes
    fn register_defaults(&mut self) {
        // Letters are text input on the form, so globals use function and control keys
        self.global_bindings = vec![
            Keybinding::new(KeyCode::F(1), KeyAction::Help, "F1", "Help"),
            Keybinding::with_modifiers(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL,
                KeyAction::Quit,
                "Ctrl+C",
                "Quit without writing",
            ),
            Keybinding::with_modifiers(
                KeyCode::Char('q'),
                KeyModifiers::CONTROL,
                KeyAction::Quit,
                "Ctrl+Q",
                "Quit without writing",
            ),
        ];

        // Profile form; no Esc, a stray press would discard the form
        self.mode_bindings.insert(
            AppMode::Form,
            vec![
                Keybinding::new(KeyCode::Up, KeyAction::NavigateUp, "Up", "Previous field"),
                Keybinding::new(KeyCode::BackTab, KeyAction::NavigateUp, "S-Tab", "Previous field"),
                Keybinding::new(KeyCode::Down, KeyAction::NavigateDown, "Down", "Next field"),
                Keybinding::new(KeyCode::Tab, KeyAction::NavigateDown, "Tab", "Next field"),
                Keybinding::new(KeyCode::Left, KeyAction::Decrease, "Left", "Previous option / -1%"),
                Keybinding::new(KeyCode::Right, KeyAction::Increase, "Right", "Next option / +1%"),
                Keybinding::new(KeyCode::PageDown, KeyAction::StepDown, "PgDn", "-5%"),
                Keybinding::new(KeyCode::PageUp, KeyAction::StepUp, "PgUp", "+5%"),
                Keybinding::new(KeyCode::Char(' '), KeyAction::Toggle, "Space", "Toggle"),
                Keybinding::new(KeyCode::Enter, KeyAction::Toggle, "Enter", "Toggle / press button"),
                Keybinding::new(KeyCode::F(12), KeyAction::Submit, "F12", "Generate kickstart"),
                Keybinding::with_modifiers(
                    KeyCode::Char('s'),
                    KeyModifiers::CONTROL,
                    KeyAction::Save,
                    "Ctrl+S",
                    "Save answer file",
                ),
            ],
        );

        // Password dialog
        self.mode_bindings.insert(
            AppMode::Password,
            vec![
                Keybinding::new(KeyCode::Tab, KeyAction::SwitchField, "Tab", "Switch entry"),
                Keybinding::new(KeyCode::BackTab, KeyAction::SwitchField, "S-Tab", "Switch entry"),
                Keybinding::new(KeyCode::Up, KeyAction::SwitchField, "Up", "Switch entry"),
                Keybinding::new(KeyCode::Down, KeyAction::SwitchField, "Down", "Switch entry"),
                Keybinding::new(KeyCode::Enter, KeyAction::Confirm, "Enter", "Confirm"),
                Keybinding::new(KeyCode::Esc, KeyAction::Cancel, "Esc", "Cancel"),
            ],
        );

        // Notices
        self.mode_bindings.insert(
            AppMode::Notice,
            vec![
                Keybinding::new(KeyCode::Enter, KeyAction::Dismiss, "Enter", "OK"),
                Keybinding::new(KeyCode::Esc, KeyAction::Dismiss, "Esc", "OK"),
                Keybinding::new(KeyCode::Char(' '), KeyAction::Dismiss, "Space", "OK"),
            ],
        );

        // Complete
        self.mode_bindings.insert(
            AppMode::Complete,
            vec![
                Keybinding::new(KeyCode::Enter, KeyAction::Dismiss, "Enter", "Exit"),
                Keybinding::new(KeyCode::Esc, KeyAction::Quit, "Esc", "Exit"),
            ],
        );
    }

    /// Get keybindings for a specific mode (includes global bindings)
    pub fn get_bindings(&self, mode: &AppMode) -> Vec<&Keybinding> {
        let mut bindings: Vec<&Keybinding> = Vec::new();

        if let Some(mode_bindings) = self.mode_bindings.get(mode) {
            bindings.extend(mode_bindings.iter());
        }
        bindings.extend(self.global_bindings.iter());

        bindings
    }

    /// Resolve a key event to an action in the given mode.
    pub fn action_for(&self, mode: &AppMode, event: &KeyEvent) -> Option<KeyAction> {
        self.get_bindings(mode)
            .into_iter()
            .find(|b| b.matches(event))
            .map(|b| b.action)
    }

    /// Short hints for the bottom bar
    pub fn get_nav_items(&self, mode: &AppMode) -> Vec<NavBarItem> {
        let shown: &[KeyAction] = match mode {
            AppMode::Form => &[
                KeyAction::Toggle,
                KeyAction::Submit,
                KeyAction::Save,
                KeyAction::Help,
                KeyAction::Quit,
            ],
            AppMode::Password => &[KeyAction::SwitchField, KeyAction::Confirm, KeyAction::Cancel],
            AppMode::Notice | AppMode::Complete => &[KeyAction::Dismiss],
        };

        // Arrow pairs read better as one entry each
        let mut items = match mode {
            AppMode::Form => vec![
                NavBarItem::new("Up/Dn", "Navigate"),
                NavBarItem::new("Left/Right", "Change"),
            ],
            _ => Vec::new(),
        };

        let bindings = self.get_bindings(mode);
        items.extend(shown.iter().filter_map(|action| {
            bindings
                .iter()
                .find(|b| b.action == *action)
                .map(|b| NavBarItem::new(&b.display, &b.description))
        }));
        items
    }

    /// Get full help content for a mode (for help overlay)
    pub fn get_help_content(&self, mode: &AppMode) -> Vec<HelpSection> {
        let groups: [(&str, &[KeyAction]); 3] = [
            (
                "Navigation",
                &[
                    KeyAction::NavigateUp,
                    KeyAction::NavigateDown,
                    KeyAction::SwitchField,
                ],
            ),
            (
                "Editing",
                &[
                    KeyAction::Decrease,
                    KeyAction::Increase,
                    KeyAction::StepDown,
                    KeyAction::StepUp,
                    KeyAction::Toggle,
                ],
            ),
            (
                "Actions",
                &[
                    KeyAction::Submit,
                    KeyAction::Save,
                    KeyAction::Confirm,
                    KeyAction::Cancel,
                    KeyAction::Dismiss,
                    KeyAction::Help,
                    KeyAction::Quit,
                ],
            ),
        ];

        let bindings = self.get_bindings(mode);
        groups
            .into_iter()
            .filter_map(|(title, actions)| {
                let items: Vec<(String, String)> = bindings
                    .iter()
                    .filter(|b| actions.contains(&b.action))
                    .map(|b| (b.display.clone(), b.description.clone()))
                    .collect();
                (!items.is_empty()).then(|| HelpSection {
                    title: title.to_string(),
                    items,
                })
            })
            .collect()
    }
}

/// Navigation bar item for display
#[derive(Debug, Clone)]
pub struct NavBarItem {
    pub key_display: String,
    pub action_label: String,
}

impl NavBarItem {
    fn new(key: &str, label: &str) -> Self {
        Self {
            key_display: key.to_string(),
            action_label: label.to_string(),
        }
    }
}

/// Help section for the help overlay
#[derive(Debug, Clone)]
pub struct HelpSection {
    pub title: String,
    pub items: Vec<(String, String)>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_form_bindings() {
        let ctx = KeybindingContext::new();
        let form = AppMode::Form;
        assert_eq!(ctx.action_for(&form, &key(KeyCode::Tab)), Some(KeyAction::NavigateDown));
        assert_eq!(ctx.action_for(&form, &key(KeyCode::Right)), Some(KeyAction::Increase));
        assert_eq!(ctx.action_for(&form, &key(KeyCode::F(12))), Some(KeyAction::Submit));
        assert_eq!(ctx.action_for(&form, &ctrl('s')), Some(KeyAction::Save));
        assert_eq!(ctx.action_for(&form, &key(KeyCode::Char('s'))), None);
        assert_eq!(ctx.action_for(&form, &key(KeyCode::Esc)), None);
        assert_eq!(ctx.action_for(&form, &ctrl('q')), Some(KeyAction::Quit));
    }

    #[test]
    fn test_backtab_with_shift_matches() {
        let ctx = KeybindingContext::new();
        let event = KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT);
        assert_eq!(ctx.action_for(&AppMode::Form, &event), Some(KeyAction::NavigateUp));
    }

    #[test]
    fn test_globals_in_every_mode() {
        let ctx = KeybindingContext::new();
        for mode in [AppMode::Form, AppMode::Password, AppMode::Notice, AppMode::Complete] {
            assert_eq!(ctx.action_for(&mode, &ctrl('c')), Some(KeyAction::Quit));
            assert_eq!(ctx.action_for(&mode, &key(KeyCode::F(1))), Some(KeyAction::Help));
        }
    }

    #[test]
    fn test_control_blocks_plain_binding() {
        let ctx = KeybindingContext::new();
        let event = KeyEvent::new(KeyCode::Enter, KeyModifiers::CONTROL);
        assert_eq!(ctx.action_for(&AppMode::Notice, &event), None);
    }

    #[test]
    fn test_nav_items_combine_navigation() {
        let ctx = KeybindingContext::new();
        let items = ctx.get_nav_items(&AppMode::Form);
        assert_eq!(items[0].key_display, "Up/Dn");
        assert_eq!(items.iter().filter(|i| i.action_label == "Navigate").count(), 1);
        assert!(items.iter().any(|i| i.key_display == "F12"));
    }

    #[test]
    fn test_help_sections_skip_empty_groups() {
        let ctx = KeybindingContext::new();
        let sections = ctx.get_help_content(&AppMode::Notice);
        let titles: Vec<_> = sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Actions"]);

        let sections = ctx.get_help_content(&AppMode::Form);
        assert_eq!(sections.len(), 3);
    }
}

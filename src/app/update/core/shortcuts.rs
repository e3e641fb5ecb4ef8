use super::super::super::messages::Message;
use super::super::super::state::App;
use iced::keyboard::{Key, Modifiers, key};

impl App {
    pub(super) fn shortcut_message_for_key(
        &self,
        key: Key,
        modifiers: Modifiers,
    ) -> Option<Message> {
        let pressed = match key.as_ref() {
            Key::Named(key::Named::Space) => "space".to_string(),
            Key::Named(key::Named::ArrowRight) => "right".to_string(),
            Key::Named(key::Named::ArrowLeft) => "left".to_string(),
            Key::Named(key::Named::Escape) => "escape".to_string(),
            Key::Character(ch) => ch.to_ascii_lowercase(),
            _ => return None,
        };

        if Self::shortcut_matches(&self.config.key_safe_quit, "ctrl+q", &pressed, modifiers) {
            return Some(Message::SafeQuit);
        }
        let screen = self.viewer.as_ref()?;
        if Self::shortcut_matches(&self.config.key_close_viewer, "escape", &pressed, modifiers) {
            if screen.panel.is_open() {
                Some(Message::CloseComments)
            } else {
                Some(Message::CloseViewer)
            }
        } else if Self::shortcut_matches(
            &self.config.key_toggle_comments,
            "c",
            &pressed,
            modifiers,
        ) {
            Some(Message::ToggleComments)
        } else if screen.panel.is_open() {
            None
        } else if Self::shortcut_matches(&self.config.key_next_slide, "right", &pressed, modifiers)
        {
            Some(Message::NextSlide)
        } else if Self::shortcut_matches(&self.config.key_prev_slide, "left", &pressed, modifiers)
        {
            Some(Message::PreviousSlide)
        } else if Self::shortcut_matches(&self.config.key_toggle_hold, "space", &pressed, modifiers)
        {
            Some(Message::ToggleHold)
        } else if Self::shortcut_matches(&self.config.key_toggle_like, "l", &pressed, modifiers) {
            Some(Message::ToggleLike)
        } else {
            None
        }
    }

    pub(super) fn shortcut_matches(
        raw: &str,
        fallback: &str,
        pressed: &str,
        modifiers: Modifiers,
    ) -> bool {
        let normalized = Self::normalize_shortcut_token(raw, fallback);

        let mut required_ctrl = false;
        let mut required_alt = false;
        let mut required_logo = false;
        let mut required_shift = false;
        let mut required_key: Option<&str> = None;

        for token in normalized
            .split('+')
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            match token {
                "ctrl" | "control" => required_ctrl = true,
                "alt" => required_alt = true,
                "logo" | "meta" | "super" | "cmd" | "command" => required_logo = true,
                "shift" => required_shift = true,
                "esc" => required_key = Some("escape"),
                key => required_key = Some(key),
            }
        }

        let required_key = required_key.unwrap_or(fallback);
        if pressed != required_key {
            return false;
        }

        modifiers.control() == required_ctrl
            && modifiers.alt() == required_alt
            && modifiers.logo() == required_logo
            && modifiers.shift() == required_shift
    }

    /// Lowercases and maps common aliases onto the names produced for
    /// pressed keys.
    pub(super) fn normalize_shortcut_token(raw: &str, fallback: &str) -> String {
        let normalized = raw.trim().to_ascii_lowercase();
        if normalized.is_empty() {
            fallback.to_string()
        } else {
            normalized
                .replace("spacebar", "space")
                .replace("arrowright", "right")
                .replace("arrowleft", "left")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::provider::fixture::sample_provider;
    use iced::keyboard::Modifiers;
    use std::sync::Arc;

    #[test]
    fn normalizes_key_aliases() {
        assert_eq!(App::normalize_shortcut_token(" SpaceBar ", "x"), "space");
        assert_eq!(App::normalize_shortcut_token("ArrowRight", "x"), "right");
        assert_eq!(App::normalize_shortcut_token("", "escape"), "escape");
    }

    #[test]
    fn matches_ctrl_q_shortcut() {
        assert!(App::shortcut_matches("ctrl+q", "x", "q", Modifiers::CTRL));
        assert!(!App::shortcut_matches("ctrl+q", "x", "q", Modifiers::empty()));
    }

    #[test]
    fn rejects_unexpected_extra_modifier() {
        assert!(!App::shortcut_matches(
            "l",
            "x",
            "l",
            Modifiers::CTRL | Modifiers::SHIFT,
        ));
    }

    #[test]
    fn escape_closes_panel_before_viewer() {
        let mut app = App::new(AppConfig::default(), Arc::new(sample_provider()));
        let escape = || Key::Named(key::Named::Escape);
        assert!(
            app.shortcut_message_for_key(escape(), Modifiers::empty())
                .is_none()
        );
        app.reduce(Message::OpenPlan("kyoto".to_string()));
        assert!(matches!(
            app.shortcut_message_for_key(escape(), Modifiers::empty()),
            Some(Message::CloseViewer)
        ));
        if let Some(screen) = app.viewer.as_mut() {
            screen.panel.open();
        }
        assert!(matches!(
            app.shortcut_message_for_key(escape(), Modifiers::empty()),
            Some(Message::CloseComments)
        ));
        assert!(
            app.shortcut_message_for_key(Key::Character("l".into()), Modifiers::empty())
                .is_none()
        );
    }
}

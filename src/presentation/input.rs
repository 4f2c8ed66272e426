use crate::application::{App, AppMode};
use crate::domain::Step;
use crate::presentation::help_line_count;
use crossterm::event::{KeyCode, KeyModifiers};

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        match app.mode {
            AppMode::Browsing if app.form.step() == Step::Start => {
                Self::handle_landing(app, key)
            }
            AppMode::Browsing => Self::handle_browsing_mode(app, key, modifiers),
            AppMode::Editing => Self::handle_editing_mode(app, key, modifiers),
            AppMode::Notice => Self::handle_notice_mode(app, key),
            AppMode::Help => Self::handle_help_mode(app, key),
        }
    }

    fn handle_landing(app: &mut App, key: KeyCode) {
        app.status_message = None;
        match key {
            KeyCode::Enter => app.begin(),
            KeyCode::Char('d') => app.request_document(),
            KeyCode::F(1) | KeyCode::Char('?') => app.show_help(),
            _ => {}
        }
    }

    fn handle_browsing_mode(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            match key {
                KeyCode::Char('n') => app.submit_form(),
                KeyCode::Char('b') => app.previous_step(),
                KeyCode::Char('d') => app.request_document(),
                _ => {}
            }
            return;
        }

        app.status_message = None;

        match key {
            KeyCode::Down | KeyCode::Tab => app.focus_next(),
            KeyCode::Up | KeyCode::BackTab => app.focus_prev(),
            KeyCode::Enter => app.activate(),
            KeyCode::Char(' ') => {
                if app.form.step() == Step::Submission {
                    app.toggle_agreement();
                }
            }
            KeyCode::PageDown => app.submit_form(),
            KeyCode::PageUp => app.previous_step(),
            KeyCode::F(1) | KeyCode::Char('?') => app.show_help(),
            _ => {}
        }
    }

    fn handle_editing_mode(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            // Step shortcuts save the edit first; other chords are not text.
            if matches!(key, KeyCode::Char('n' | 'b' | 'd')) {
                app.finish_editing();
                Self::handle_browsing_mode(app, key, modifiers);
            }
            return;
        }

        match key {
            KeyCode::Enter => app.finish_editing(),
            KeyCode::Esc => app.cancel_editing(),
            KeyCode::Backspace => app.delete_before_cursor(),
            KeyCode::Delete => app.delete_at_cursor(),
            KeyCode::Left => app.move_cursor_left(),
            KeyCode::Right => app.move_cursor_right(),
            KeyCode::Home => app.move_cursor_home(),
            KeyCode::End => app.move_cursor_end(),
            KeyCode::Char(c) => app.insert_char(c),
            _ => {}
        }
    }

    fn handle_notice_mode(app: &mut App, key: KeyCode) {
        if matches!(key, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
            app.dismiss_notice();
        }
    }

    fn handle_help_mode(app: &mut App, key: KeyCode) {
        let max_scroll = help_line_count().saturating_sub(1);
        match key {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') | KeyCode::Char('q') => {
                app.close_help();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                app.help_scroll = app.help_scroll.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.help_scroll = (app.help_scroll + 1).min(max_scroll);
            }
            KeyCode::PageUp => {
                app.help_scroll = app.help_scroll.saturating_sub(5);
            }
            KeyCode::PageDown => {
                app.help_scroll = (app.help_scroll + 5).min(max_scroll);
            }
            KeyCode::Home => {
                app.help_scroll = 0;
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{Effect, FocusTarget};
    use crate::domain::TextField;

    fn press(app: &mut App, key: KeyCode) {
        InputHandler::handle_key_event(app, key, KeyModifiers::NONE);
    }

    fn ctrl(app: &mut App, c: char) {
        InputHandler::handle_key_event(app, KeyCode::Char(c), KeyModifiers::CONTROL);
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_enter_starts_from_landing() {
        let mut app = App::default();
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.form.step(), Step::ChurchInfo);
    }

    #[test]
    fn test_landing_download_key() {
        let mut app = App::default();
        press(&mut app, KeyCode::Char('d'));
        assert!(matches!(app.take_effects().as_slice(), [Effect::OpenDocument(_)]));
        assert_eq!(app.form.step(), Step::Start);
    }

    #[test]
    fn test_shared_trigger_walks_all_steps() {
        let mut app = App::default();
        press(&mut app, KeyCode::Enter);
        for expected in [Step::LoanStatus, Step::Collateral, Step::Attachment, Step::Submission] {
            ctrl(&mut app, 'n');
            assert_eq!(app.form.step(), expected);
        }

        ctrl(&mut app, 'n');
        assert_eq!(app.form.step(), Step::Submission);
        assert_eq!(app.mode, AppMode::Notice);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, AppMode::Browsing);
    }

    #[test]
    fn test_page_keys_navigate() {
        let mut app = App::default();
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::PageDown);
        assert_eq!(app.form.step(), Step::LoanStatus);
        press(&mut app, KeyCode::PageUp);
        press(&mut app, KeyCode::PageUp);
        assert_eq!(app.form.step(), Step::Start);
    }

    #[test]
    fn test_back_from_first_step_returns_to_landing() {
        let mut app = App::default();
        press(&mut app, KeyCode::Enter);
        ctrl(&mut app, 'b');
        assert_eq!(app.form.step(), Step::Start);
    }

    #[test]
    fn test_edit_field_via_keys() {
        let mut app = App::default();
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.focused(), Some(FocusTarget::Field(TextField::Denomination)));

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, AppMode::Editing);
        type_text(&mut app, "감리교");
        press(&mut app, KeyCode::Backspace);
        type_text(&mut app, "회");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.form.record().denomination, "감리회");
        assert_eq!(app.mode, AppMode::Browsing);
    }

    #[test]
    fn test_typing_q_while_editing_is_text() {
        let mut app = App::default();
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "q?");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.form.record().church_name, "q?");
    }

    #[test]
    fn test_step_shortcut_while_editing_saves_edit() {
        let mut app = App::default();
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "Grace");
        ctrl(&mut app, 'n');

        assert_eq!(app.mode, AppMode::Browsing);
        assert_eq!(app.form.step(), Step::LoanStatus);
        assert_eq!(app.form.record().church_name, "Grace");

        ctrl(&mut app, 'b');
        assert_eq!(app.form.step(), Step::ChurchInfo);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.input, "Grace");
    }

    #[test]
    fn test_other_control_chords_are_not_typed() {
        let mut app = App::default();
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "Grace");
        ctrl(&mut app, 'x');

        assert_eq!(app.mode, AppMode::Editing);
        assert_eq!(app.input, "Grace");
    }

    #[test]
    fn test_escape_discards_edit() {
        let mut app = App::default();
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "temp");
        press(&mut app, KeyCode::Esc);
        assert!(app.form.record().church_name.is_empty());
    }

    #[test]
    fn test_full_submission_via_keys() {
        let mut app = App::default();
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "Grace Church");
        press(&mut app, KeyCode::Enter);
        for _ in 0..4 {
            ctrl(&mut app, 'n');
        }
        assert_eq!(app.form.step(), Step::Submission);

        press(&mut app, KeyCode::Char(' '));
        assert!(app.form.record().agreement);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "Kim");
        press(&mut app, KeyCode::Enter);
        ctrl(&mut app, 'n');

        assert_eq!(app.form.step(), Step::Start);
        assert_eq!(app.mode, AppMode::Notice);
        match app.take_effects().as_slice() {
            [Effect::ComposeMail(draft)] => {
                assert_eq!(draft.subject, "[교회대출 특판신청] Grace Church / Kim");
                assert!(draft.body.contains("교회명: Grace Church"));
            }
            other => panic!("unexpected effects {other:?}"),
        }
        assert!(app.form.record().church_name.is_empty());
    }

    #[test]
    fn test_space_ignored_outside_submission() {
        let mut app = App::default();
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char(' '));
        assert!(!app.form.record().agreement);
        assert_eq!(app.mode, AppMode::Browsing);
    }

    #[test]
    fn test_add_collateral_via_keys() {
        let mut app = App::default();
        press(&mut app, KeyCode::Enter);
        ctrl(&mut app, 'n');
        ctrl(&mut app, 'n');
        assert_eq!(app.form.step(), Step::Collateral);

        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.focused(), Some(FocusTarget::AddCollateral));
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.form.record().collaterals.len(), 7);
    }

    #[test]
    fn test_help_scroll_bounds() {
        let mut app = App::default();
        press(&mut app, KeyCode::F(1));
        assert_eq!(app.mode, AppMode::Help);

        press(&mut app, KeyCode::Up);
        assert_eq!(app.help_scroll, 0);
        for _ in 0..200 {
            press(&mut app, KeyCode::PageDown);
        }
        assert_eq!(app.help_scroll, help_line_count() - 1);

        press(&mut app, KeyCode::Char('q'));
        assert_eq!(app.mode, AppMode::Browsing);
    }
}

//! Application state for the terminal intake form.
//!
//! [`App`] wraps the [`FormController`] with everything the terminal view
//! needs: the interaction mode, which control has focus, the text being
//! edited and any pending notice.

use super::controller::{Dispatch, FormController};
use crate::domain::{InputKind, MailDraft, RecordPatch, Step, TextField, campaign};
use uuid::Uuid;

/// Represents the current mode of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Moving between controls of the current step
    Browsing,
    /// Typing into a text field or collateral row
    Editing,
    /// A blocking notice is displayed until dismissed
    Notice,
    /// Key reference popup
    Help,
}

/// A control on the current step that can receive focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    Field(TextField),
    Collateral(Uuid),
    AddCollateral,
    Agreement,
}

/// Side effect requested by the form, carried out by the event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Hand the composed message to the mail client
    ComposeMail(MailDraft),
    /// Open an external document in the browser
    OpenDocument(String),
}

/// Main application state.
///
/// # Examples
///
/// ```
/// use loan_intake::application::{App, AppMode};
/// use loan_intake::domain::Step;
///
/// let app = App::default();
/// assert_eq!(app.form.step(), Step::Start);
/// assert_eq!(app.mode, AppMode::Browsing);
/// ```
#[derive(Debug)]
pub struct App {
    /// Step and record
    pub form: FormController,
    /// Current application mode
    pub mode: AppMode,
    /// Index into [`App::focus_targets`]
    pub focus: usize,
    /// First focus target visible in the form area
    pub scroll: usize,
    /// Number of focus targets the form area can show at once
    pub viewport_rows: usize,
    /// Edit buffer
    pub input: String,
    /// Cursor position within the edit buffer, in characters
    pub cursor_position: usize,
    /// Blocking message shown in Notice mode
    pub notice: Option<String>,
    /// Non-blocking message for the status bar
    pub status_message: Option<String>,
    /// Scroll position in help text
    pub help_scroll: usize,
    /// Where the printable form lives
    pub document_url: String,
    editing: Option<FocusTarget>,
    effects: Vec<Effect>,
}

impl Default for App {
    fn default() -> Self {
        Self::new(campaign::RECIPIENT, campaign::FORM_DOWNLOAD_URL)
    }
}

impl App {
    pub fn new(recipient: impl Into<String>, document_url: impl Into<String>) -> Self {
        Self {
            form: FormController::new(recipient),
            mode: AppMode::Browsing,
            focus: 0,
            scroll: 0,
            viewport_rows: 8,
            input: String::new(),
            cursor_position: 0,
            notice: None,
            status_message: None,
            help_scroll: 0,
            document_url: document_url.into(),
            editing: None,
            effects: Vec::new(),
        }
    }

    /// Focusable controls of the current step, top to bottom.
    pub fn focus_targets(&self) -> Vec<FocusTarget> {
        let step = self.form.step();
        match step {
            Step::Start => Vec::new(),
            Step::Collateral => self
                .form
                .record()
                .collaterals
                .iter()
                .map(|entry| FocusTarget::Collateral(entry.id))
                .chain(std::iter::once(FocusTarget::AddCollateral))
                .collect(),
            Step::Submission => std::iter::once(FocusTarget::Agreement)
                .chain(step.text_fields().iter().map(|f| FocusTarget::Field(*f)))
                .collect(),
            _ => step
                .text_fields()
                .iter()
                .map(|f| FocusTarget::Field(*f))
                .collect(),
        }
    }

    pub fn focused(&self) -> Option<FocusTarget> {
        self.focus_targets().get(self.focus).copied()
    }

    /// The control currently being edited, if any.
    pub fn editing_target(&self) -> Option<FocusTarget> {
        self.editing
    }

    pub fn focus_next(&mut self) {
        let len = self.focus_targets().len();
        if len > 0 {
            self.focus = (self.focus + 1) % len;
            self.ensure_focus_visible();
        }
    }

    pub fn focus_prev(&mut self) {
        let len = self.focus_targets().len();
        if len > 0 {
            self.focus = (self.focus + len - 1) % len;
            self.ensure_focus_visible();
        }
    }

    /// Adjusts `scroll` so the focused control lies within the viewport.
    pub fn ensure_focus_visible(&mut self) {
        let rows = self.viewport_rows.max(1);
        if self.focus < self.scroll {
            self.scroll = self.focus;
        } else if self.focus >= self.scroll + rows {
            self.scroll = self.focus + 1 - rows;
        }
    }

    fn reset_view(&mut self) {
        self.focus = 0;
        self.scroll = 0;
    }

    /// Enter on the focused control: edit it, add a row, or toggle consent.
    pub fn activate(&mut self) {
        match self.focused() {
            Some(FocusTarget::AddCollateral) => self.add_collateral(),
            Some(FocusTarget::Agreement) => self.toggle_agreement(),
            Some(_) => self.start_editing(),
            None => {}
        }
    }

    pub fn add_collateral(&mut self) {
        self.form.add_collateral_entry();
        // Keep focus on the add button, which moved down by one.
        self.focus = self.focus_targets().len().saturating_sub(1);
        self.ensure_focus_visible();
    }

    pub fn toggle_agreement(&mut self) {
        let agreed = !self.form.record().agreement;
        self.form.update_fields(&RecordPatch::new().agreement(agreed));
    }

    /// Loads the focused value into the edit buffer.
    pub fn start_editing(&mut self) {
        let target = match self.focused() {
            Some(target @ (FocusTarget::Field(_) | FocusTarget::Collateral(_))) => target,
            _ => return,
        };
        self.input = self.current_value(target);
        self.cursor_position = self.input.chars().count();
        self.editing = Some(target);
        self.mode = AppMode::Editing;
    }

    fn current_value(&self, target: FocusTarget) -> String {
        let record = self.form.record();
        match target {
            FocusTarget::Field(field) => record.text(field).to_string(),
            FocusTarget::Collateral(id) => record
                .collateral(id)
                .map(|entry| entry.description.clone())
                .unwrap_or_default(),
            FocusTarget::AddCollateral | FocusTarget::Agreement => String::new(),
        }
    }

    /// Commits the edit buffer to the record.
    pub fn finish_editing(&mut self) {
        let value = std::mem::take(&mut self.input);
        match self.editing.take() {
            Some(FocusTarget::Field(field)) => {
                self.form
                    .update_fields(&RecordPatch::new().text(field, value));
            }
            Some(FocusTarget::Collateral(id)) => {
                self.form.update_collateral_entry(id, value);
            }
            _ => {}
        }
        self.cursor_position = 0;
        self.mode = AppMode::Browsing;
    }

    pub fn cancel_editing(&mut self) {
        self.editing = None;
        self.input.clear();
        self.cursor_position = 0;
        self.mode = AppMode::Browsing;
    }

    fn editing_kind(&self) -> InputKind {
        match self.editing {
            Some(FocusTarget::Field(field)) => field.kind(),
            _ => InputKind::Text,
        }
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.input
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.input.len())
    }

    /// Inserts `c` at the cursor. Numeric fields only take digits, `.` and `-`.
    pub fn insert_char(&mut self, c: char) {
        if self.editing_kind() == InputKind::Number && !(c.is_ascii_digit() || c == '.' || c == '-')
        {
            return;
        }
        let at = self.byte_index(self.cursor_position);
        self.input.insert(at, c);
        self.cursor_position += 1;
    }

    pub fn delete_before_cursor(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            let at = self.byte_index(self.cursor_position);
            self.input.remove(at);
        }
    }

    pub fn delete_at_cursor(&mut self) {
        if self.cursor_position < self.input.chars().count() {
            let at = self.byte_index(self.cursor_position);
            self.input.remove(at);
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.input.chars().count() {
            self.cursor_position += 1;
        }
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor_position = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor_position = self.input.chars().count();
    }

    /// Landing-page "start" button.
    pub fn begin(&mut self) {
        if self.form.step().is_first() {
            self.next_step();
        }
    }

    pub fn next_step(&mut self) {
        if self.form.advance_step() {
            self.reset_view();
        }
    }

    pub fn previous_step(&mut self) {
        if self.form.retreat_step() {
            self.reset_view();
        }
    }

    /// The shared submit trigger: next step, or final submission on the last step.
    pub fn submit_form(&mut self) {
        match self.form.dispatch_submit() {
            Ok(Dispatch::Advanced { changed }) => {
                if changed {
                    self.reset_view();
                }
            }
            Ok(Dispatch::Submitted(draft)) => {
                self.reset_view();
                self.show_notice(draft.confirmation_notice());
                self.effects.push(Effect::ComposeMail(draft));
            }
            Err(err) => {
                tracing::warn!(error = %err, "submission refused");
                self.show_notice(err.to_string());
            }
        }
    }

    pub fn request_document(&mut self) {
        self.effects
            .push(Effect::OpenDocument(self.document_url.clone()));
    }

    pub fn show_notice(&mut self, message: impl Into<String>) {
        self.notice = Some(message.into());
        self.mode = AppMode::Notice;
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
        self.mode = AppMode::Browsing;
    }

    pub fn show_help(&mut self) {
        self.help_scroll = 0;
        self.mode = AppMode::Help;
    }

    pub fn close_help(&mut self) {
        self.mode = AppMode::Browsing;
    }

    /// Removes and returns the effects queued since the last call.
    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;

    fn app_at(step: Step) -> App {
        let mut app = App::default();
        while app.form.step() < step {
            app.next_step();
        }
        app
    }

    fn edit_focused(app: &mut App, text: &str) {
        app.start_editing();
        app.input.clear();
        app.cursor_position = 0;
        for c in text.chars() {
            app.insert_char(c);
        }
        app.finish_editing();
    }

    #[test]
    fn test_app_default() {
        let app = App::default();
        assert_eq!(app.mode, AppMode::Browsing);
        assert_eq!(app.focus, 0);
        assert_eq!(app.scroll, 0);
        assert!(app.input.is_empty());
        assert!(app.notice.is_none());
        assert!(app.focus_targets().is_empty());
        assert_eq!(app.document_url, campaign::FORM_DOWNLOAD_URL);
    }

    #[test]
    fn test_focus_targets_per_step() {
        let app = app_at(Step::ChurchInfo);
        assert_eq!(
            app.focus_targets(),
            vec![
                FocusTarget::Field(TextField::ChurchName),
                FocusTarget::Field(TextField::Denomination),
                FocusTarget::Field(TextField::Location),
                FocusTarget::Field(TextField::MemberCount),
            ]
        );

        let app = app_at(Step::Collateral);
        let targets = app.focus_targets();
        assert_eq!(targets.len(), 6);
        assert_eq!(targets.last(), Some(&FocusTarget::AddCollateral));

        let app = app_at(Step::Submission);
        assert_eq!(
            app.focus_targets(),
            vec![
                FocusTarget::Agreement,
                FocusTarget::Field(TextField::ApplicantName)
            ]
        );
    }

    #[test]
    fn test_focus_wraps() {
        let mut app = app_at(Step::LoanStatus);
        app.focus_prev();
        assert_eq!(app.focused(), Some(FocusTarget::Field(TextField::CurrentInterestRate)));
        app.focus_next();
        assert_eq!(app.focused(), Some(FocusTarget::Field(TextField::CurrentLoanAmount)));
    }

    #[test]
    fn test_step_change_resets_view() {
        let mut app = app_at(Step::Collateral);
        app.viewport_rows = 2;
        for _ in 0..4 {
            app.focus_next();
        }
        assert_eq!(app.focus, 4);
        assert_eq!(app.scroll, 3);

        app.next_step();
        assert_eq!(app.form.step(), Step::Attachment);
        assert_eq!(app.focus, 0);
        assert_eq!(app.scroll, 0);
    }

    #[test]
    fn test_edit_text_field() {
        let mut app = app_at(Step::ChurchInfo);
        edit_focused(&mut app, "은혜교회");
        assert_eq!(app.form.record().church_name, "은혜교회");
        assert_eq!(app.mode, AppMode::Browsing);
        assert!(app.editing_target().is_none());
    }

    #[test]
    fn test_start_editing_loads_value() {
        let mut app = app_at(Step::ChurchInfo);
        edit_focused(&mut app, "Grace");
        app.start_editing();
        assert_eq!(app.mode, AppMode::Editing);
        assert_eq!(app.input, "Grace");
        assert_eq!(app.cursor_position, 5);
    }

    #[test]
    fn test_cancel_editing_keeps_record() {
        let mut app = app_at(Step::ChurchInfo);
        app.start_editing();
        app.insert_char('x');
        app.cancel_editing();
        assert!(app.form.record().church_name.is_empty());
        assert_eq!(app.mode, AppMode::Browsing);
    }

    #[test]
    fn test_multibyte_cursor_editing() {
        let mut app = app_at(Step::ChurchInfo);
        app.start_editing();
        for c in "교회".chars() {
            app.insert_char(c);
        }
        app.move_cursor_left();
        app.insert_char('X');
        assert_eq!(app.input, "교X회");
        app.delete_before_cursor();
        assert_eq!(app.input, "교회");
        app.move_cursor_home();
        app.delete_at_cursor();
        assert_eq!(app.input, "회");
        app.move_cursor_end();
        assert_eq!(app.cursor_position, 1);
        app.move_cursor_right();
        assert_eq!(app.cursor_position, 1);
    }

    #[test]
    fn test_number_field_filters_keystrokes() {
        let mut app = app_at(Step::ChurchInfo);
        app.focus = 3;
        assert_eq!(app.focused(), Some(FocusTarget::Field(TextField::MemberCount)));
        edit_focused(&mut app, "1a2명0");
        assert_eq!(app.form.record().member_count, "120");
    }

    #[test]
    fn test_text_field_takes_any_char() {
        let mut app = app_at(Step::LoanStatus);
        app.focus = 2;
        edit_focused(&mut app, "약 6.5");
        assert_eq!(app.form.record().current_interest_rate, "약 6.5");
    }

    #[test]
    fn test_edit_collateral_row() {
        let mut app = app_at(Step::Collateral);
        app.focus = 2;
        edit_focused(&mut app, "상계동 100-1");
        assert_eq!(app.form.record().collaterals[2].description, "상계동 100-1");
    }

    #[test]
    fn test_activate_add_collateral() {
        let mut app = app_at(Step::Collateral);
        app.focus = 5;
        app.activate();
        assert_eq!(app.form.record().collaterals.len(), 6);
        assert_eq!(app.focused(), Some(FocusTarget::AddCollateral));
    }

    #[test]
    fn test_activate_toggles_agreement() {
        let mut app = app_at(Step::Submission);
        app.activate();
        assert!(app.form.record().agreement);
        app.activate();
        assert!(!app.form.record().agreement);
    }

    #[test]
    fn test_begin_only_from_landing() {
        let mut app = App::default();
        app.begin();
        assert_eq!(app.form.step(), Step::ChurchInfo);
        app.begin();
        assert_eq!(app.form.step(), Step::ChurchInfo);
    }

    #[test]
    fn test_previous_step_returns_to_landing() {
        let mut app = app_at(Step::ChurchInfo);
        app.previous_step();
        assert_eq!(app.form.step(), Step::Start);
        app.previous_step();
        assert_eq!(app.form.step(), Step::Start);
    }

    #[test]
    fn test_submit_form_advances() {
        let mut app = app_at(Step::ChurchInfo);
        app.focus = 2;
        app.submit_form();
        assert_eq!(app.form.step(), Step::LoanStatus);
        assert_eq!(app.focus, 0);
        assert!(app.take_effects().is_empty());
    }

    #[test]
    fn test_submit_form_requires_agreement() {
        let mut app = app_at(Step::Submission);
        app.submit_form();
        assert_eq!(app.mode, AppMode::Notice);
        assert_eq!(
            app.notice.as_deref(),
            Some(DomainError::AgreementRequired.to_string().as_str())
        );
        assert_eq!(app.form.step(), Step::Submission);
        assert!(app.take_effects().is_empty());

        app.dismiss_notice();
        assert_eq!(app.mode, AppMode::Browsing);
        assert!(app.notice.is_none());
    }

    #[test]
    fn test_submit_form_queues_mail() {
        let mut app = app_at(Step::Submission);
        app.toggle_agreement();
        app.focus = 1;
        edit_focused(&mut app, "Kim");
        app.submit_form();

        assert_eq!(app.form.step(), Step::Start);
        assert_eq!(app.mode, AppMode::Notice);
        assert!(app.notice.as_deref().is_some_and(|n| n.contains(campaign::RECIPIENT)));

        let effects = app.take_effects();
        assert_eq!(effects.len(), 1);
        match &effects[0] {
            Effect::ComposeMail(draft) => assert!(draft.subject.ends_with("/ Kim")),
            other => panic!("unexpected effect {other:?}"),
        }
        assert!(app.take_effects().is_empty());
    }

    #[test]
    fn test_request_document() {
        let mut app = App::new("desk@example.com", "https://example.com/form.pdf");
        app.request_document();
        assert_eq!(
            app.take_effects(),
            vec![Effect::OpenDocument("https://example.com/form.pdf".to_string())]
        );
    }
}

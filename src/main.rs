//! Church loan campaign intake form.
//!
//! Runs the five-step application wizard in the terminal and hands each
//! finished application to the system mail client.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor::Show,
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
    layout::Rect,
};

use loan_intake::application::{App, AppMode, Effect};
use loan_intake::domain::Step;
use loan_intake::infrastructure::{AppConfig, MailHandoff, init_tracing};
use loan_intake::presentation::{InputHandler, form_viewport_rows, render_ui};

#[derive(Parser, Debug)]
#[command(name = "loan-intake", version, about = "교회대출 특판 신청서 작성기")]
struct Cli {
    /// JSON config file (default: <config dir>/loan-intake/config.json)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Do not start the mail client; the mailto URI is shown in the status
    /// line and written to the log
    #[arg(long)]
    no_launch: bool,

    /// Also copy the message body to the clipboard
    #[arg(long)]
    copy: bool,
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or the terminal
/// cannot be put into raw mode, or if the event loop fails. The terminal
/// is restored on every path.
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = AppConfig::load(cli.config.as_deref()).context("loading configuration")?;
    let handoff = MailHandoff::new(
        config.launch_mail_client && !cli.no_launch,
        config.copy_to_clipboard || cli.copy,
    );
    tracing::info!(recipient = %config.recipient, "starting intake form");

    let _restore = enter_terminal()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))
        .context("creating terminal")?;

    let mut app = App::new(config.recipient, config.form_download_url);
    let res = run_app(&mut terminal, &mut app, &handoff);
    finish(res)
}

/// Runs its closure once when dropped, on every exit path.
struct OnDrop<F: FnOnce()>(Option<F>);

impl<F: FnOnce()> Drop for OnDrop<F> {
    fn drop(&mut self) {
        if let Some(f) = self.0.take() {
            f();
        }
    }
}

/// Raw mode plus alternate screen, undone when the returned guard drops.
fn enter_terminal() -> Result<OnDrop<impl FnOnce()>> {
    enable_raw_mode().context("enabling raw mode")?;
    let guard = OnDrop(Some(|| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture, Show);
    }));
    execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)
        .context("entering alternate screen")?;
    Ok(guard)
}

fn finish(res: io::Result<()>) -> Result<()> {
    if let Err(err) = &res {
        tracing::error!(error = %err, "event loop failed");
    }
    res.context("event loop")
}

/// Main event loop: draw, read one key, run queued side effects.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App, handoff: &MailHandoff) -> io::Result<()> {
    loop {
        let size = terminal.size()?;
        app.viewport_rows =
            form_viewport_rows(Rect::new(0, 0, size.width, size.height), app.form.step());
        app.ensure_focus_visible();
        terminal.draw(|f| render_ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                return Ok(());
            }
            match key.code {
                KeyCode::Char('q')
                    if app.mode == AppMode::Browsing && app.form.step() == Step::Start =>
                {
                    return Ok(());
                }
                _ => InputHandler::handle_key_event(app, key.code, key.modifiers),
            }
        }

        run_effects(app, handoff);
    }
}

fn run_effects(app: &mut App, handoff: &MailHandoff) {
    for effect in app.take_effects() {
        match effect {
            Effect::ComposeMail(draft) => match handoff.deliver(&draft) {
                Ok(outcome) => app.status_message = Some(outcome.status_line(&draft)),
                Err(err) => {
                    tracing::error!(error = %err, "mail hand-off failed");
                    app.status_message = Some(format!("메일 앱을 실행하지 못했습니다: {err}"));
                }
            },
            Effect::OpenDocument(url) => {
                if let Err(err) = handoff.open_document(&url) {
                    tracing::error!(error = %err, "document open failed");
                    app.status_message = Some(format!("양식을 열지 못했습니다: {url}"));
                }
            }
        }
    }
}

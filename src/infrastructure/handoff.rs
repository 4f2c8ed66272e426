//! Delegation of the composed message to programs outside the form:
//! the system URI opener (mail client, browser) and the clipboard.

use crate::domain::MailDraft;
use std::process::{Command, Stdio};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HandoffError {
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: &'static str,
        source: std::io::Error,
    },
    #[error("{program} exited with {status}")]
    Status {
        program: &'static str,
        status: std::process::ExitStatus,
    },
    #[error("clipboard unavailable: {0}")]
    Clipboard(#[from] arboard::Error),
}

/// Something that can open a URI in the user's default application.
pub trait UriOpener {
    fn open(&self, uri: &str) -> Result<(), HandoffError>;
}

/// Opens URIs with the platform's launcher command.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemOpener;

impl SystemOpener {
    #[cfg(target_os = "macos")]
    fn command(uri: &str) -> (&'static str, Command) {
        let mut cmd = Command::new("open");
        cmd.arg(uri);
        ("open", cmd)
    }

    #[cfg(target_os = "windows")]
    fn command(uri: &str) -> (&'static str, Command) {
        let mut cmd = Command::new("rundll32");
        cmd.args(["url.dll,FileProtocolHandler", uri]);
        ("rundll32", cmd)
    }

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    fn command(uri: &str) -> (&'static str, Command) {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(uri);
        ("xdg-open", cmd)
    }
}

impl UriOpener for SystemOpener {
    fn open(&self, uri: &str) -> Result<(), HandoffError> {
        let (program, mut cmd) = Self::command(uri);
        let status = cmd
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|source| HandoffError::Spawn { program, source })?;
        if status.success() {
            Ok(())
        } else {
            Err(HandoffError::Status { program, status })
        }
    }
}

/// What a hand-off actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HandoffOutcome {
    pub launched: bool,
    pub copied: bool,
}

/// Longest mailto URI excerpt shown in the status line, in characters.
const STATUS_URI_CHARS: usize = 120;

impl HandoffOutcome {
    /// Status line after handing `draft` off. Without a launched mail
    /// client the (shortened) mailto URI is shown instead.
    pub fn status_line(&self, draft: &MailDraft) -> String {
        match (self.launched, self.copied) {
            (true, true) => "메일 앱을 실행하고 본문을 클립보드에 복사했습니다.".to_string(),
            (true, false) => "메일 앱을 실행했습니다.".to_string(),
            (false, copied) => {
                let uri = draft.mailto_uri();
                let mut shown: String = uri.chars().take(STATUS_URI_CHARS).collect();
                if shown.len() < uri.len() {
                    shown.push('…');
                }
                let prefix = if copied { "본문을 클립보드에 복사했습니다. " } else { "" };
                format!("{prefix}{shown}")
            }
        }
    }
}

/// Delivers drafts to the mail client and, optionally, the clipboard.
#[derive(Debug, Clone)]
pub struct MailHandoff<O: UriOpener = SystemOpener> {
    opener: O,
    launch: bool,
    copy_to_clipboard: bool,
}

impl MailHandoff<SystemOpener> {
    pub fn new(launch: bool, copy_to_clipboard: bool) -> Self {
        Self::with_opener(SystemOpener, launch, copy_to_clipboard)
    }
}

impl<O: UriOpener> MailHandoff<O> {
    pub fn with_opener(opener: O, launch: bool, copy_to_clipboard: bool) -> Self {
        Self {
            opener,
            launch,
            copy_to_clipboard,
        }
    }

    pub fn opener(&self) -> &O {
        &self.opener
    }

    /// Hands `draft` off. Sending is still up to the user in the mail client.
    pub fn deliver(&self, draft: &MailDraft) -> Result<HandoffOutcome, HandoffError> {
        let uri = draft.mailto_uri();
        let mut outcome = HandoffOutcome::default();

        if self.launch {
            self.opener.open(&uri)?;
            outcome.launched = true;
            tracing::info!(recipient = %draft.recipient, "mail client launched");
        } else {
            tracing::info!(%uri, "mail client launch disabled");
        }

        if self.copy_to_clipboard {
            let mut clipboard = arboard::Clipboard::new()?;
            clipboard.set_text(draft.body.clone())?;
            outcome.copied = true;
            tracing::info!("message body copied to clipboard");
        }

        Ok(outcome)
    }

    /// Opens an external document such as the printable form.
    pub fn open_document(&self, url: &str) -> Result<(), HandoffError> {
        tracing::info!(%url, "opening document");
        self.opener.open(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingOpener {
        opened: RefCell<Vec<String>>,
        fail: bool,
    }

    impl UriOpener for RecordingOpener {
        fn open(&self, uri: &str) -> Result<(), HandoffError> {
            if self.fail {
                return Err(HandoffError::Spawn {
                    program: "test-opener",
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
                });
            }
            self.opened.borrow_mut().push(uri.to_string());
            Ok(())
        }
    }

    fn draft() -> MailDraft {
        MailDraft {
            recipient: "desk@example.com".to_string(),
            subject: "subject".to_string(),
            body: "body".to_string(),
        }
    }

    #[test]
    fn test_deliver_opens_mailto_uri() {
        let handoff = MailHandoff::with_opener(RecordingOpener::default(), true, false);
        let outcome = handoff.deliver(&draft()).unwrap();

        assert_eq!(
            outcome,
            HandoffOutcome {
                launched: true,
                copied: false
            }
        );
        assert_eq!(
            handoff.opener().opened.borrow().as_slice(),
            ["mailto:desk@example.com?subject=subject&body=body"]
        );
    }

    #[test]
    fn test_deliver_without_launch() {
        let handoff = MailHandoff::with_opener(RecordingOpener::default(), false, false);
        let outcome = handoff.deliver(&draft()).unwrap();

        assert_eq!(outcome, HandoffOutcome::default());
        assert!(handoff.opener().opened.borrow().is_empty());
    }

    #[test]
    fn test_deliver_reports_opener_failure() {
        let opener = RecordingOpener {
            fail: true,
            ..RecordingOpener::default()
        };
        let handoff = MailHandoff::with_opener(opener, true, false);
        let err = handoff.deliver(&draft()).unwrap_err();
        assert!(err.to_string().contains("test-opener"));
    }

    #[test]
    fn test_open_document() {
        let handoff = MailHandoff::with_opener(RecordingOpener::default(), true, false);
        handoff.open_document("https://example.com/form.pdf").unwrap();
        assert_eq!(
            handoff.opener().opened.borrow().as_slice(),
            ["https://example.com/form.pdf"]
        );
    }

    #[test]
    fn test_status_line_after_launch() {
        let outcome = HandoffOutcome { launched: true, copied: false };
        assert_eq!(outcome.status_line(&draft()), "메일 앱을 실행했습니다.");
    }

    #[test]
    fn test_status_line_shows_uri_without_launch() {
        let line = HandoffOutcome::default().status_line(&draft());
        assert_eq!(line, "mailto:desk@example.com?subject=subject&body=body");

        let copied = HandoffOutcome { launched: false, copied: true }.status_line(&draft());
        assert!(copied.starts_with("본문을 클립보드에 복사했습니다. mailto:desk@example.com"));
    }

    #[test]
    fn test_status_line_shortens_long_uri() {
        let long = MailDraft {
            body: "x".repeat(500),
            ..draft()
        };
        let line = HandoffOutcome::default().status_line(&long);
        assert!(line.starts_with("mailto:desk@example.com?subject=subject&body=xxx"));
        assert!(line.ends_with('…'));
        assert_eq!(line.chars().count(), STATUS_URI_CHARS + 1);
    }
}

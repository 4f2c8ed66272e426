use crate::application::{App, AppMode, FocusTarget};
use crate::domain::{Step, campaign};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap},
};

const BRAND: Color = Color::Green;

pub fn render_ui(f: &mut Frame, app: &App) {
    if app.form.step() == Step::Start {
        render_landing(f, app);
    } else {
        render_wizard(f, app);
    }

    match app.mode {
        AppMode::Notice => render_notice_popup(f, app.notice.as_deref().unwrap_or_default()),
        AppMode::Help => render_help_popup(f, app.help_scroll),
        AppMode::Browsing | AppMode::Editing => {}
    }
}

fn render_landing(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Length(6),
            Constraint::Min(3),
            Constraint::Length(6),
            Constraint::Length(3),
        ])
        .split(f.area());

    let banner = Paragraph::new(vec![
        Line::from(Span::styled(
            campaign::BADGE,
            Style::default().fg(Color::Black).bg(Color::Yellow),
        )),
        Line::from(Span::styled(
            campaign::HEADLINE,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(campaign::TAGLINE, Style::default().fg(Color::Yellow))),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).style(Style::default().fg(BRAND)));
    f.render_widget(banner, chunks[0]);

    let benefits = Paragraph::new(vec![
        Line::from(vec![
            Span::raw("특별 우대 금리  "),
            Span::styled(campaign::PREFERRED_RATE, Style::default().fg(Color::Red)),
            Span::raw("    특판 총 한도  "),
            Span::styled(campaign::TOTAL_LIMIT, Style::default().fg(BRAND)),
        ]),
        Line::from(campaign::AUDIENCE),
        Line::from(Span::styled(campaign::EXCLUSION, Style::default().fg(Color::Red))),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).title("특별 우대 혜택"));
    f.render_widget(benefits, chunks[1]);

    let intro = Paragraph::new(
        campaign::INTRODUCTION
            .iter()
            .map(|line| Line::from(*line))
            .collect::<Vec<_>>(),
    )
    .wrap(Wrap { trim: true })
    .block(Block::default().borders(Borders::ALL).title("대한민국 최대 규모, 서울축산농협"));
    f.render_widget(intro, chunks[2]);

    render_contacts(f, chunks[3]);

    let hint = app.status_message.clone().unwrap_or_else(|| {
        "Enter: 온라인 상담 신청하기 | d: 양식 다운로드 | F1/?: help | q: quit".to_string()
    });
    let status = Paragraph::new(hint)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(Style::default().fg(Color::Cyan));
    f.render_widget(status, chunks[4]);
}

fn render_contacts(f: &mut Frame, area: Rect) {
    let mut rows: Vec<Row> = campaign::CONTACTS
        .iter()
        .map(|contact| {
            Row::new(vec![
                Cell::from(contact.title),
                Cell::from(contact.name),
                Cell::from(contact.phone).style(Style::default().fg(Color::Cyan)),
                Cell::from(contact.tel_uri()).style(Style::default().fg(Color::DarkGray)),
            ])
        })
        .collect();
    rows.push(Row::new(vec![
        Cell::from("팩스"),
        Cell::from(""),
        Cell::from(campaign::FAX_NUMBER).style(Style::default().fg(Color::Cyan)),
        Cell::from(""),
    ]));

    let table = Table::new(
        rows,
        [
            Constraint::Length(10),
            Constraint::Length(8),
            Constraint::Length(14),
            Constraint::Min(18),
        ],
    )
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("대환 대출 전담 상담 창구 ({})", campaign::BRANCH_NAME)),
    )
    .column_spacing(2);
    f.render_widget(table, area);
}

fn wizard_chunks(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(4),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(area)
}

/// How many focus targets fit in the form area of a terminal of size `area`.
pub fn form_viewport_rows(area: Rect, step: Step) -> usize {
    let form = wizard_chunks(area)[2];
    let reserved = if step == Step::Submission { 4 } else { 0 };
    (form.height.saturating_sub(2 + reserved) as usize).max(1)
}

fn render_wizard(f: &mut Frame, app: &App) {
    let chunks = wizard_chunks(f.area());

    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            "✝ 2026 교회대출 특판 신청 시스템",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("{} 대환 대출 전용", campaign::BRANCH_NAME)),
    ])
    .alignment(Alignment::Center)
    .style(Style::default().fg(Color::White).bg(BRAND));
    f.render_widget(header, chunks[0]);

    render_progress(f, app.form.step(), chunks[1]);
    render_form(f, app, chunks[2]);
    render_buttons(f, app.form.step(), chunks[3]);
    render_status_bar(f, app, chunks[4]);
}

fn render_progress(f: &mut Frame, step: Step, area: Rect) {
    let mut spans = Vec::new();
    for s in &Step::ALL[1..] {
        let style = if step >= *s {
            Style::default().fg(Color::White).bg(BRAND)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!(" Step {} ", s.ordinal()), style));
        spans.push(Span::raw("  "));
    }
    f.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}

fn render_form(f: &mut Frame, app: &App, area: Rect) {
    let step = app.form.step();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("Step {}: {}", step.ordinal(), step.title()))
        .border_style(Style::default().fg(BRAND));

    let mut lines = Vec::new();
    if step == Step::Submission {
        lines.push(Line::from(Span::styled(
            campaign::CONSENT_TITLE,
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(campaign::CONSENT_TEXT));
        lines.push(Line::from(""));
        lines.push(Line::from(""));
    }

    let targets = app.focus_targets();
    let visible = app.viewport_rows.max(1);
    for (index, target) in targets.iter().enumerate().skip(app.scroll).take(visible) {
        lines.push(target_line(app, index, *target));
    }

    let form = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(form, area);
}

fn target_line<'a>(app: &'a App, index: usize, target: FocusTarget) -> Line<'a> {
    let focused = index == app.focus;
    let editing = focused && app.editing_target() == Some(target);
    let marker = if focused { "▶ " } else { "  " };
    let record = app.form.record();

    let (label, value, placeholder) = match target {
        FocusTarget::Field(field) => (
            field.label().to_string(),
            record.text(field).to_string(),
            field.placeholder(),
        ),
        FocusTarget::Collateral(id) => (
            format!("{}번", index + 1),
            record
                .collateral(id)
                .map(|entry| entry.description.clone())
                .unwrap_or_default(),
            "담보물 소재지(지번) 및 상세 주소",
        ),
        FocusTarget::AddCollateral => {
            return Line::from(Span::styled(
                format!("{marker}+ 담보물 추가 입력창 생성"),
                focus_style(focused).fg(BRAND),
            ));
        }
        FocusTarget::Agreement => {
            let check = if record.agreement { "[x]" } else { "[ ]" };
            return Line::from(Span::styled(
                format!("{marker}{check} {}", campaign::CONSENT_CHECKBOX),
                focus_style(focused),
            ));
        }
    };

    let value_span = if editing {
        Span::styled(with_cursor(&app.input, app.cursor_position), Style::default().fg(Color::Green))
    } else if value.is_empty() {
        Span::styled(placeholder.to_string(), Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(value)
    };

    Line::from(vec![
        Span::styled(format!("{marker}{label}: "), focus_style(focused)),
        value_span,
    ])
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().add_modifier(Modifier::BOLD).fg(Color::Yellow)
    } else {
        Style::default()
    }
}

fn with_cursor(input: &str, cursor: usize) -> String {
    let mut shown: String = input.chars().take(cursor).collect();
    shown.push('▏');
    shown.extend(input.chars().skip(cursor));
    shown
}

fn render_buttons(f: &mut Frame, step: Step, area: Rect) {
    let back = if step == Step::ChurchInfo { "처음으로" } else { "이전 단계" };
    let next = if step == Step::Submission {
        "특판 신청 완료 (메일발송)"
    } else {
        "다음 단계로"
    };
    let buttons = Paragraph::new(Line::from(vec![
        Span::styled(format!(" Ctrl+B {back} "), Style::default().bg(Color::Gray).fg(Color::Black)),
        Span::raw("     "),
        Span::styled(format!(" Ctrl+N {next} "), Style::default().bg(BRAND).fg(Color::White)),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::TOP));
    f.render_widget(buttons, area);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let text = match app.mode {
        AppMode::Editing => format!(
            "Editing: {} (Enter to save, Esc to cancel)",
            with_cursor(&app.input, app.cursor_position)
        ),
        _ => app.status_message.clone().unwrap_or_else(|| {
            "↑↓/Tab: move | Enter: edit | Space: toggle | Ctrl+N/PgDn: next | Ctrl+B/PgUp: back | F1/?: help"
                .to_string()
        }),
    };
    let style = match app.mode {
        AppMode::Editing => Style::default().fg(Color::Green),
        _ => Style::default(),
    };
    let status = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(style);
    f.render_widget(status, area);
}

fn centered_rect(area: Rect, width_pct: u16, height_pct: u16) -> Rect {
    let width = area.width * width_pct / 100;
    let height = area.height * height_pct / 100;
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn render_notice_popup(f: &mut Frame, message: &str) {
    let popup_area = centered_rect(f.area(), 70, 50);
    f.render_widget(Clear, popup_area);

    let mut lines: Vec<Line> = message.lines().map(Line::from).collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Enter: OK",
        Style::default().fg(Color::Yellow),
    )));

    let notice = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Notice")
                .style(Style::default().fg(Color::White)),
        );
    f.render_widget(notice, popup_area);
}

fn render_help_popup(f: &mut Frame, scroll: usize) {
    let popup_area = centered_rect(f.area(), 80, 80);
    f.render_widget(Clear, popup_area);

    let help_lines: Vec<&str> = HELP_TEXT.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;
    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let help_widget = Paragraph::new(help_lines[start_line..end_line].join("\n"))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Help (Line {}/{})", start_line + 1, help_lines.len()))
                .style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::White));
    f.render_widget(help_widget, popup_area);
}

/// Number of lines in the help popup.
pub fn help_line_count() -> usize {
    HELP_TEXT.lines().count()
}

const HELP_TEXT: &str = r#"교회대출 특판 신청 - KEY REFERENCE

=== LANDING PAGE ===
Enter           온라인 상담 신청하기 (start the application)
d               양식 다운로드 (open the printable form)
q               Quit

=== FORM STEPS ===
Up/Down, Tab    Move between fields
Enter           Edit field / add collateral row / toggle consent
Space           Toggle the consent checkbox
Ctrl+N, PgDn    다음 단계로 - on step 5: 특판 신청 완료 (메일발송)
Ctrl+B, PgUp    이전 단계 - on step 1: 처음으로
Ctrl+D          Open the printable form

=== EDITING ===
Enter           Save the value
Esc             Discard changes
Left/Right      Move the cursor
Home/End        Jump to start/end
Backspace/Del   Delete characters
                Numeric fields accept digits, '.' and '-' only

=== SUBMISSION ===
The finished application is opened in your mail client as a new
message. It is only received once you press 'send' there.
Ctrl+C          Quit from anywhere

=== HELP NAVIGATION ===
Up/Down, j/k    Scroll one line
PgUp/PgDn       Scroll five lines
Home            Jump to top
Esc/F1/?/q      Close this window"#;

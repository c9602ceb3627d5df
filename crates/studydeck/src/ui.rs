//! UI rendering

use pomodoro::Phase;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, Paragraph},
    Frame,
};
use studydeck_core::format;

use crate::app::App;
use crate::dialog::{DialogRow, SettingsDialog};
use crate::session::SessionView;

const ACCENT: Color = Color::Rgb(249, 115, 22);
const BREAK: Color = Color::Rgb(16, 185, 129);

/// Width of one day in the date strip
const CELL_WIDTH: u16 = 7;
/// Lines used by one subject in the list
const SUBJECT_ROWS: usize = 4;

/// Main draw function
pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(6), // Date strip
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Footer
        ])
        .split(f.area());

    draw_header(f, app, chunks[0]);
    draw_timeline(f, app, chunks[1]);
    match &app.session {
        Some(session) => draw_session(f, app, session, chunks[2]),
        None => draw_subjects(f, app, chunks[2]),
    }
    draw_footer(f, app, chunks[3]);

    if let Some(dialog) = app.session.as_ref().and_then(|s| s.dialog.as_ref()) {
        draw_settings_dialog(f, app, dialog);
    }

    if app.show_help {
        draw_help_overlay(f);
    }
}

fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![
        Span::styled(
            format!(" {} ", app.label),
            Style::default().fg(Color::White).bg(Color::Blue).bold(),
        ),
        Span::raw("  "),
        Span::styled("studydeck", Style::default().fg(Color::DarkGray)),
    ];
    if let Some(session) = &app.session {
        spans.push(Span::raw(" - "));
        spans.push(Span::styled(
            session.subject().title.clone(),
            Style::default().fg(Color::White).bold(),
        ));
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(header, area);
}

fn draw_timeline(f: &mut Frame, app: &App, area: Rect) {
    let title = app.timeline.selected_date().format(" %A, %-d %B %Y ").to_string();
    let block = Block::default()
        .title(title)
        .title_style(Style::default().fg(Color::Gray))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let cells = app.timeline.cells();
    let selected = app.timeline.selected_index();
    let visible = usize::from(inner.width / CELL_WIDTH).clamp(1, cells.len());
    let first = window_start(selected, visible, cells.len());

    let slots = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Length(CELL_WIDTH); visible])
        .split(inner);

    for (slot, (index, cell)) in slots.iter().zip(cells.iter().enumerate().skip(first)) {
        let style = if index == selected {
            Style::default().fg(Color::White).bg(ACCENT).bold()
        } else if cell.is_today {
            Style::default().fg(ACCENT).bg(Color::DarkGray)
        } else {
            Style::default().fg(Color::Gray)
        };

        let lines = vec![
            Line::from(cell.month.clone()),
            Line::from(cell.day.to_string()).bold(),
            Line::from(cell.weekday.clone()),
            Line::from(format::timeline_cell(app.ledger.seconds_on(cell.date))),
        ];

        f.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center).style(style),
            *slot,
        );
    }
}

/// First visible index that keeps `selected` on screen, roughly centred
fn window_start(selected: usize, visible: usize, total: usize) -> usize {
    selected
        .saturating_sub(visible / 2)
        .min(total.saturating_sub(visible))
}

fn progress_bar(percent: u32, width: usize) -> String {
    let filled = (width * percent.min(100) as usize) / 100;
    format!(
        "{}{}",
        "\u{2588}".repeat(filled),
        "\u{2591}".repeat(width - filled)
    )
}

fn draw_subjects(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(format!(" Subjects ({}) ", app.catalog.len()))
        .title_style(Style::default().fg(ACCENT).bold())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if app.catalog.is_empty() {
        let empty = Paragraph::new("No subjects").style(Style::default().fg(Color::DarkGray));
        f.render_widget(empty, inner);
        return;
    }

    let visible = (usize::from(inner.height) / SUBJECT_ROWS).max(1);
    let first = app.selected.saturating_sub(visible - 1);
    let text_width = usize::from(inner.width).saturating_sub(4);
    let bar_width = text_width.min(60);

    let mut lines = Vec::new();
    for (index, subject) in app.catalog.subjects().iter().enumerate().skip(first).take(visible) {
        let is_selected = index == app.selected;
        let marker = if is_selected { "\u{25b6} " } else { "  " };
        let title_style = if is_selected {
            Style::default().fg(ACCENT).bold()
        } else {
            Style::default().fg(Color::White).bold()
        };

        lines.push(Line::from(vec![
            Span::styled(marker, Style::default().fg(ACCENT)),
            Span::styled(format::truncate(&subject.title, text_width), title_style),
        ]));
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(
                format!("{}/{} parts", subject.completed_parts, subject.total_parts),
                Style::default().fg(Color::Gray),
            ),
            Span::raw("   "),
            Span::styled(format::total(subject.time_spent), Style::default().fg(Color::Gray)),
            Span::raw("   "),
            Span::styled(format!("{}%", subject.progress), Style::default().fg(ACCENT)),
        ]));
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(
                progress_bar(u32::from(subject.progress), bar_width),
                Style::default().fg(ACCENT),
            ),
        ]));
        lines.push(Line::from(""));
    }

    f.render_widget(Paragraph::new(lines), inner);
}

fn draw_session(f: &mut Frame, app: &App, session: &SessionView, area: Rect) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    draw_timer_card(f, app, session, cols[0]);
    draw_stats_card(f, app, session, cols[1]);
}

fn draw_timer_card(f: &mut Frame, app: &App, session: &SessionView, area: Rect) {
    let engine = session.engine();
    let color = match engine.phase() {
        Phase::Focus => ACCENT,
        Phase::Break => BREAK,
    };
    let music = if session.soundtrack().is_playing() {
        Span::styled(" \u{266b} on ", Style::default().fg(ACCENT))
    } else {
        Span::styled(" \u{266b} off ", Style::default().fg(Color::DarkGray))
    };

    let block = Block::default()
        .title(Line::from(Span::styled(
            format!(" {} ", engine.state().session_count),
            Style::default().fg(Color::White).bg(Color::Red).bold(),
        )))
        .title(Line::from(music).right_aligned())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(1), // Status
            Constraint::Length(1), // Countdown
            Constraint::Length(1), // Total time
            Constraint::Length(1),
            Constraint::Length(1), // Progress
            Constraint::Min(0),
            Constraint::Length(1), // Controls
        ])
        .split(inner);

    let centered = |text: Span<'static>| Paragraph::new(Line::from(text)).alignment(Alignment::Center);

    f.render_widget(
        centered(Span::styled(session.status_label(), Style::default().fg(Color::Gray))),
        rows[1],
    );
    f.render_widget(
        centered(Span::styled(
            format::clock(u64::from(engine.remaining_seconds())),
            Style::default().fg(Color::White).bold(),
        )),
        rows[2],
    );
    f.render_widget(
        centered(Span::styled(
            format::clock(session.total_seconds()),
            Style::default().fg(Color::DarkGray),
        )),
        rows[3],
    );

    let progress = session.progress_percent(app.settings.settings());
    let gauge_area = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(10),
            Constraint::Percentage(80),
            Constraint::Percentage(10),
        ])
        .split(rows[5])[1];
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(color).bg(Color::Black))
        .ratio((progress / 100.0).clamp(0.0, 1.0))
        .label(format!("{:.0}%", progress))
        .use_unicode(true);
    f.render_widget(gauge, gauge_area);

    let play = if session.is_running() { "pause" } else { "start" };
    let controls = Line::from(vec![
        Span::styled("r", Style::default().fg(Color::Cyan).bold()),
        Span::raw(" reset   "),
        Span::styled("space", Style::default().fg(Color::Cyan).bold()),
        Span::raw(format!(" {}   ", play)),
        Span::styled("s", Style::default().fg(Color::Cyan).bold()),
        Span::raw(" skip"),
    ]);
    f.render_widget(Paragraph::new(controls).alignment(Alignment::Center), rows[7]);
}

fn draw_stats_card(f: &mut Frame, app: &App, session: &SessionView, area: Rect) {
    let subject = session.subject();

    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", format::truncate(&subject.title, usize::from(area.width).saturating_sub(10))),
            Style::default().fg(Color::White).bold(),
        ))
        .title(
            Line::from(Span::styled(
                format!(" {}% ", subject.progress),
                Style::default().fg(ACCENT).bold(),
            ))
            .right_aligned(),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Subject progress
            Constraint::Length(1),
            Constraint::Length(3), // Spent today
            Constraint::Length(3), // Spent total
            Constraint::Length(3), // Parts done
            Constraint::Min(0),
            Constraint::Length(1), // Streak
        ])
        .split(inner);

    let bar = progress_bar(u32::from(subject.progress), usize::from(inner.width));
    f.render_widget(
        Paragraph::new(Span::styled(bar, Style::default().fg(ACCENT))),
        rows[0],
    );

    let stat = |label: &'static str, value: String| {
        Paragraph::new(Line::from(value).bold()).block(
            Block::default()
                .title(Span::styled(label, Style::default().fg(ACCENT)))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
    };

    f.render_widget(stat("Spent Today", format::short(session.today_seconds())), rows[2]);
    f.render_widget(stat("Spent Total", format::total(session.total_seconds())), rows[3]);
    f.render_widget(
        stat(
            "Parts Done",
            format!("{}/{}", subject.completed_parts, subject.total_parts),
        ),
        rows[4],
    );

    let streak = app.ledger.streak(app.today());
    let streak_line = Line::from(vec![
        Span::styled("Study Streak  ", Style::default().fg(Color::Gray)),
        Span::styled(
            format!("{} {}", streak, if streak == 1 { "day" } else { "days" }),
            Style::default().fg(ACCENT).bold(),
        ),
    ]);
    f.render_widget(Paragraph::new(streak_line), rows[6]);
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let keys: &[(&str, &str)] = if app.dialog_open() {
        &[("j/k", "select"), ("+/-", "adjust"), ("Enter", "toggle"), ("Esc", "close")]
    } else if app.session.is_some() {
        &[
            ("space", "start/pause"),
            ("r", "reset"),
            ("s", "skip"),
            ("o", "settings"),
            ("m", "music"),
            ("Esc", "back"),
            ("?", "help"),
        ]
    } else {
        &[
            ("q", "quit"),
            ("j/k", "select"),
            ("Enter", "study"),
            ("h/l", "date"),
            ("?", "help"),
        ]
    };

    let mut spans = vec![Span::raw(" ")];
    for (key, action) in keys {
        spans.push(Span::styled(*key, Style::default().fg(Color::Cyan).bold()));
        spans.push(Span::raw(format!(" {}  ", action)));
    }

    let footer = Paragraph::new(Line::from(spans)).style(Style::default().fg(Color::DarkGray));
    f.render_widget(footer, area);
}

fn popup_area(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}

fn draw_settings_dialog(f: &mut Frame, app: &App, dialog: &SettingsDialog) {
    let settings = app.settings.settings();
    let rows = SettingsDialog::rows(settings);
    let cursor = dialog.cursor().min(rows.len() - 1);

    let popup = popup_area(f.area(), 46, rows.len() as u16 + 4);
    f.render_widget(Clear, popup);

    let mut lines = vec![Line::from("")];
    for (index, row) in rows.iter().enumerate() {
        let style = if index == cursor {
            Style::default().fg(Color::Black).bg(ACCENT)
        } else {
            Style::default().fg(Color::White)
        };
        let (label, value) = match row {
            DialogRow::Mode => (
                "Use Pomodoro",
                if settings.use_pomodoro_mode { "[ on ]".to_string() } else { "[ off ]".to_string() },
            ),
            DialogRow::Duration(field) => (
                field.label(),
                format!("-  {:>7}  +", format::minutes_setting(settings.minutes(*field))),
            ),
        };
        lines.push(Line::from(Span::styled(format!(" {:<22}{:>18} ", label, value), style)));
    }
    lines.push(
        Line::from(Span::styled(
            "+/- adjust  Esc close",
            Style::default().fg(Color::DarkGray),
        ))
        .centered(),
    );

    let dialog_popup = Paragraph::new(lines).block(
        Block::default()
            .title(" Pomodoro Settings ")
            .title_style(Style::default().fg(Color::Yellow).bold())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );

    f.render_widget(dialog_popup, popup);
}

fn draw_help_overlay(f: &mut Frame) {
    let bindings = [
        ("  q        ", "Quit"),
        ("  ?        ", "Toggle this help"),
        ("  h/l      ", "Previous/next day"),
        ("  t        ", "Jump to today"),
        ("  j/k      ", "Select subject"),
        ("  Enter    ", "Open subject"),
        ("  Space    ", "Start/pause timer"),
        ("  r        ", "Reset (twice clears sessions)"),
        ("  s        ", "Skip to next phase"),
        ("  o        ", "Pomodoro settings"),
        ("  m        ", "Music on/off"),
        ("  Esc      ", "Back to subjects"),
    ];

    let mut help_text = vec![Line::from("")];
    for (key, action) in bindings {
        help_text.push(Line::from(vec![
            Span::styled(key, Style::default().fg(Color::Cyan)),
            Span::raw(action),
        ]));
    }
    help_text.push(Line::from(""));
    help_text.push(
        Line::from(Span::styled(
            "Press ? to close",
            Style::default().fg(Color::DarkGray),
        ))
        .centered(),
    );

    let popup = popup_area(f.area(), 50, help_text.len() as u16 + 2);

    // Clear the area behind the popup
    f.render_widget(Clear, popup);

    let help_popup = Paragraph::new(help_text).block(
        Block::default()
            .title(" Keyboard Shortcuts ")
            .title_style(Style::default().fg(Color::Yellow).bold())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );

    f.render_widget(help_popup, popup);
}

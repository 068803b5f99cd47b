//! TUI views and rendering
//!
//! All rendering logic is contained here. The views module draws the UI from
//! the App, but never modifies state beyond scroll clamping.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use tracing::trace;

use crate::domain::{BudgetTier, TravelStyle};

use super::app::App;
use super::state::{BusyKind, FormField, Notice};

/// Palette for the planner panes
mod colors {
    use ratatui::style::Color;

    pub const HEADER: Color = Color::Rgb(0, 255, 255); // Cyan
    pub const KEYBIND: Color = Color::Rgb(0, 255, 255); // Cyan
    pub const FOCUSED: Color = Color::Rgb(255, 215, 0); // Gold
    pub const SELECTED: Color = Color::Rgb(0, 255, 127); // Spring green
    pub const WARNING: Color = Color::Rgb(255, 215, 0); // Gold
    pub const ERROR: Color = Color::Rgb(220, 20, 60); // Crimson
    pub const DIM: Color = Color::DarkGray;
}

/// Width of the parameters form column
const FORM_WIDTH: u16 = 42;

/// Main render function
pub fn render(app: &mut App, frame: &mut Frame) {
    trace!("render: called");
    // Main layout: header, content, footer
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Main content
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

    render_header(app, frame, chunks[0]);

    // Content: form on the left, plan (and follow-up) on the right
    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(FORM_WIDTH), Constraint::Min(0)])
        .split(chunks[1]);

    render_form(app, frame, content[0]);

    if app.session.has_plan() {
        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(8)])
            .split(content[1]);
        render_plan(app, frame, right[0]);
        render_followup(app, frame, right[1]);
    } else {
        render_plan(app, frame, content[1]);
    }

    render_footer(app, frame, chunks[2]);
}

/// Render the header with the app title and a one-line trip summary
fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    trace!("render_header: called");
    let destination = if app.params.destination.is_empty() {
        "N/A".to_string()
    } else {
        app.params.destination.clone()
    };

    let spans = vec![
        Span::raw(" "),
        Span::styled(
            "TripPlan",
            Style::default().fg(colors::HEADER).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" │ ", Style::default().fg(colors::DIM)),
        Span::raw(destination),
        Span::styled(" │ ", Style::default().fg(colors::DIM)),
        Span::raw(format!("{} days", app.params.duration_days())),
        Span::styled(" │ ", Style::default().fg(colors::DIM)),
        Span::raw(app.params.budget.label()),
        Span::styled(" │ ", Style::default().fg(colors::DIM)),
        Span::raw(app.params.styles_label()),
    ];

    let header = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

/// Render the trip parameters form
fn render_form(app: &App, frame: &mut Frame, area: Rect) {
    trace!("render_form: called");
    let mut lines = Vec::new();

    // Destination
    lines.push(field_label(app, FormField::Destination));
    let destination = if app.params.destination.is_empty() && app.focus != FormField::Destination {
        Span::styled("(type a city or country)", Style::default().fg(colors::DIM))
    } else {
        Span::raw(app.params.destination.clone())
    };
    let mut destination_spans = vec![Span::raw("  "), destination];
    if app.focus == FormField::Destination {
        destination_spans.push(cursor_span());
    }
    lines.push(Line::from(destination_spans));
    lines.push(Line::from(""));

    // Duration spinner
    lines.push(field_label(app, FormField::Duration));
    lines.push(Line::from(vec![
        Span::raw("  "),
        Span::styled("− ", Style::default().fg(colors::DIM)),
        Span::raw(format!("{} days", app.params.duration_days())),
        Span::styled(" +", Style::default().fg(colors::DIM)),
    ]));
    lines.push(Line::from(""));

    // Budget selector
    lines.push(field_label(app, FormField::Budget));
    let mut budget_spans = vec![Span::raw("  ")];
    for (i, tier) in BudgetTier::ALL.iter().enumerate() {
        if i > 0 {
            budget_spans.push(Span::styled(" · ", Style::default().fg(colors::DIM)));
        }
        if *tier == app.params.budget {
            budget_spans.push(Span::styled(
                tier.label(),
                Style::default().fg(colors::SELECTED).add_modifier(Modifier::BOLD),
            ));
        } else {
            budget_spans.push(Span::styled(tier.label(), Style::default().fg(colors::DIM)));
        }
    }
    lines.push(Line::from(budget_spans));
    lines.push(Line::from(""));

    // Styles multi-select
    lines.push(field_label(app, FormField::Styles));
    for (i, style) in TravelStyle::ALL.iter().enumerate() {
        let mark = if app.params.has_style(*style) { "[x]" } else { "[ ]" };
        let cursor = if app.focus == FormField::Styles && i == app.style_cursor {
            "▸ "
        } else {
            "  "
        };
        let line_style = if app.params.has_style(*style) {
            Style::default().fg(colors::SELECTED)
        } else {
            Style::default()
        };
        lines.push(Line::from(vec![
            Span::raw(cursor),
            Span::styled(format!("{} {}", mark, style.label()), line_style),
        ]));
    }

    let form = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Trip Parameters "),
    );
    frame.render_widget(form, area);
}

/// Render the plan pane (markdown, scrollable)
fn render_plan(app: &mut App, frame: &mut Frame, area: Rect) {
    trace!("render_plan: called");
    // Owned copy so the rendered lines never borrow from the session
    let plan_text = app.session.last_plan().map(str::to_string);
    let mut lines: Vec<Line> = Vec::new();

    if let Some(busy) = &app.busy {
        let elapsed = busy.started.elapsed().as_secs();
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(busy.frame(), Style::default().fg(colors::HEADER)),
            Span::raw(format!(" {}... ({}s)", busy.word, elapsed)),
        ]));
        if busy.kind == BusyKind::Answering {
            // Keep the previous plan visible underneath while answering
            if let Some(plan) = &plan_text {
                lines.push(Line::from(""));
                for line in tui_markdown::from_str(plan).lines {
                    lines.push(line.clone());
                }
            }
        }
    } else if let Some(plan) = &plan_text {
        for line in tui_markdown::from_str(plan).lines {
            lines.push(line.clone());
        }
    } else {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![Span::styled(
            "  Fill in the form and press Enter to generate a plan.",
            Style::default().fg(colors::DIM),
        )]));
    }

    // Clamp scroll so the pane never scrolls past the content
    let viewport_height = area.height.saturating_sub(2) as usize;
    let max_scroll = lines.len().saturating_sub(viewport_height) as u16;
    app.plan_scroll = app.plan_scroll.min(max_scroll);

    let plan = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Travel Plan "))
        .wrap(Wrap { trim: false })
        .scroll((app.plan_scroll, 0));
    frame.render_widget(plan, area);
}

/// Render the follow-up question panel (only shown once a plan exists)
fn render_followup(app: &App, frame: &mut Frame, area: Rect) {
    trace!("render_followup: called");
    let mut lines = Vec::new();

    let mut question_spans = vec![Span::raw(" "), Span::raw(app.question.clone())];
    if app.focus == FormField::Question {
        question_spans.push(cursor_span());
    }
    lines.push(Line::from(question_spans));

    if let Some(answer) = &app.answer {
        lines.push(Line::from(""));
        for line in answer.lines() {
            lines.push(Line::from(format!(" {line}")));
        }
    }

    let panel = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Ask about your plan "),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(panel, area);
}

/// Render the footer with keybinds and the current notice
fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    trace!("render_footer: called");
    let line = if let Some(notice) = &app.notice {
        match notice {
            Notice::Warning(msg) => Line::from(vec![
                Span::raw(" "),
                Span::styled("⚠ ", Style::default().fg(colors::WARNING)),
                Span::styled(msg.clone(), Style::default().fg(colors::WARNING)),
            ]),
            Notice::Error(msg) => Line::from(vec![
                Span::raw(" "),
                Span::styled("✗ ", Style::default().fg(colors::ERROR)),
                Span::styled(msg.clone(), Style::default().fg(colors::ERROR)),
            ]),
        }
    } else {
        let binds = [
            ("Tab", "next field"),
            ("Enter", "generate/ask"),
            ("Space", "toggle style"),
            ("PgUp/PgDn", "scroll"),
            ("Esc", "quit"),
        ];
        let mut spans = vec![Span::raw(" ")];
        for (i, (key, action)) in binds.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" │ ", Style::default().fg(colors::DIM)));
            }
            spans.push(Span::styled(*key, Style::default().fg(colors::KEYBIND)));
            spans.push(Span::raw(format!(" {action}")));
        }
        Line::from(spans)
    };

    let footer = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

/// Form field label, highlighted when focused
fn field_label(app: &App, field: FormField) -> Line<'static> {
    let style = if app.focus == field {
        Style::default().fg(colors::FOCUSED).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    Line::from(Span::styled(field.label(), style))
}

fn cursor_span() -> Span<'static> {
    Span::styled("█", Style::default().fg(colors::FOCUSED))
}

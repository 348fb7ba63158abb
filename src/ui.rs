// SPDX-License-Identifier: GPL-3.0-or-later
// hotkeys - Playground rendering

use crate::app::{App, Focus, LogKind};
use hotkeys::{Lifecycle, Scope};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, List, ListItem, Paragraph, Wrap};
use ratatui::Frame;

fn border_type(style: &str) -> BorderType {
    match style {
        "double" => BorderType::Double,
        "thick" => BorderType::Thick,
        "plain" => BorderType::Plain,
        _ => BorderType::Rounded,
    }
}

fn pane<'a>(app: &App, title: &'a str, active: bool) -> Block<'a> {
    let color = if active { Color::Cyan } else { Color::DarkGray };
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(border_type(&app.config.ui.border_style))
        .border_style(Style::default().fg(color))
}

pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Percentage(40),
            Constraint::Length(1),
        ])
        .split(frame.area());

    draw_header(frame, app, chunks[0]);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(50),
            Constraint::Percentage(30),
            Constraint::Percentage(20),
        ])
        .split(chunks[1]);

    draw_hotkey_table(frame, app, main_chunks[0]);
    draw_view_pane(frame, app, main_chunks[1]);
    draw_outside_pane(frame, app, main_chunks[2]);
    draw_log(frame, app, chunks[2]);
    draw_footer(frame, app, chunks[3]);
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let scope = match app.hotkeys.scope() {
        Scope::ViewScoped => "view scoped",
        Scope::DocumentScoped => "document scoped",
    };
    let state = match app.hotkeys.state() {
        Lifecycle::Constructed => "constructed",
        Lifecycle::Attached => "attached",
        Lifecycle::Destroyed => "destroyed",
    };
    let line = Line::from(vec![
        Span::styled("hotkeys ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        Span::raw(format!("│ {} │ {} │ ", scope, state)),
        Span::styled(
            app.config_path.display().to_string(),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(Paragraph::new(line).block(pane(app, " Playground ", false)), area);
}

fn draw_hotkey_table(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .hotkeys
        .records()
        .iter()
        .map(|hk| {
            let style = if hk.is_resolved() {
                Style::default().fg(Color::White)
            } else {
                Style::default().fg(Color::Red)
            };
            let mut spans = vec![
                Span::styled(format!("{:<18}", hk.to_string()), style.add_modifier(Modifier::BOLD)),
                Span::styled(format!("{:<16}", hk.action_name), Style::default().fg(Color::Green)),
                Span::styled(hk.event_name(), Style::default().fg(Color::DarkGray)),
            ];
            if !hk.is_resolved() {
                spans.push(Span::styled("  (unknown key, never fires)", style));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let title = format!(" Hotkeys ({}) ", items.len());
    frame.render_widget(List::new(items).block(pane(app, &title, false)), area);
}

fn draw_view_pane(frame: &mut Frame, app: &App, area: Rect) {
    let view = app.view.borrow();
    let el = view.element();
    let tab_index = el
        .tab_index()
        .map(|i| format!(" tabindex=\"{}\"", i))
        .unwrap_or_default();
    let outline = el
        .style("outline")
        .map(|o| format!(" style=\"outline: {}\"", o))
        .unwrap_or_default();

    let lines = vec![
        Line::from(Span::styled(
            format!("<{}{}{}>", el.tag_name(), tab_index, outline),
            Style::default().fg(Color::Magenta),
        )),
        Line::from(""),
        Line::from(if app.focus == Focus::View {
            "Focused: key presses reach the view."
        } else {
            "Not focused."
        }),
    ];
    let active = app.focus == Focus::View;
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(pane(app, " View ", active)),
        area,
    );
}

fn draw_outside_pane(frame: &mut Frame, app: &App, area: Rect) {
    let active = app.focus == Focus::Outside;
    let text = if active {
        "Focused: only document listeners see key presses."
    } else {
        "Rest of the document."
    };
    frame.render_widget(
        Paragraph::new(text)
            .wrap(Wrap { trim: true })
            .block(pane(app, " Outside ", active)),
        area,
    );
}

fn draw_log(frame: &mut Frame, app: &App, area: Rect) {
    let view = app.view.borrow();
    let visible = area.height.saturating_sub(2) as usize;
    let log = view.log();
    let items: Vec<ListItem> = log
        .iter()
        .skip(log.len().saturating_sub(visible))
        .map(|entry| {
            let color = match entry.kind {
                LogKind::Key => Color::DarkGray,
                LogKind::Notification => Color::Cyan,
                LogKind::Action => Color::Green,
                LogKind::System => Color::Yellow,
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{} ", entry.time), Style::default().fg(Color::DarkGray)),
                Span::styled(entry.text.clone(), Style::default().fg(color)),
            ]))
        })
        .collect();
    frame.render_widget(List::new(items).block(pane(app, " Log ", false)), area);
}

fn draw_footer(frame: &mut Frame, app: &App, area: Rect) {
    let help = format!(
        " Ctrl+C quit │ {} switch focus │ actions: quit, clear, teardown",
        app.focus_key
    );
    frame.render_widget(
        Paragraph::new(help).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

//! Screen layout
//!
//! Three labelled time fields on the left, the title and controls on the right.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Padding, Paragraph},
    Frame,
};

use crate::countdown::{ClockFace, CountdownSnapshot, RunState};

const BACKGROUND: Color = Color::Black;
const LIGHT_GRAY: Color = Color::Gray;
const DARK_GRAY: Color = Color::DarkGray;

/// Label of the primary control: "Pause" while running, "Play" otherwise
pub fn primary_control_label(run_state: RunState) -> &'static str {
    if run_state.is_running() { "Pause" } else { "Play" }
}

/// Draw the whole screen for one snapshot
pub fn render(frame: &mut Frame, snapshot: &CountdownSnapshot) {
    let area = frame.area();
    frame.render_widget(Block::default().style(Style::default().bg(BACKGROUND)), area);

    let [clock_area, side_area] =
        Layout::horizontal([Constraint::Min(16), Constraint::Length(22)]).areas(area);

    render_clock(frame, clock_area, &ClockFace::from_millis(snapshot.remaining_ms));
    render_side(frame, side_area, snapshot.run_state);
}

fn render_clock(frame: &mut Frame, area: Rect, face: &ClockFace) {
    let [_, hours, _, minutes, _, seconds, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(3),
        Constraint::Fill(1),
    ])
    .areas(area);

    render_time_field(frame, hours, &face.hours, "Hours");
    render_time_field(frame, minutes, &face.minutes, "Minutes");
    render_time_field(frame, seconds, &face.seconds, "Seconds");
}

fn render_time_field(frame: &mut Frame, area: Rect, value: &str, label: &str) {
    let lines = vec![
        Line::from(Span::styled(
            value.to_string(),
            Style::default().fg(LIGHT_GRAY).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled("──────────", Style::default().fg(DARK_GRAY))),
        Line::from(Span::styled(label.to_string(), Style::default().fg(DARK_GRAY))),
    ];

    let field = Paragraph::new(lines)
        .alignment(Alignment::Left)
        .block(Block::default().padding(Padding::left(4)));
    frame.render_widget(field, area);
}

fn render_side(frame: &mut Frame, area: Rect, run_state: RunState) {
    let [_, title_area, _, controls_area, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(2),
        Constraint::Fill(1),
        Constraint::Length(3),
        Constraint::Fill(1),
    ])
    .areas(area);

    let title = Paragraph::new(vec![
        Line::from(Span::styled(
            "COUNTDOWN",
            Style::default().fg(LIGHT_GRAY).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled("TIMER", Style::default().fg(DARK_GRAY))),
    ])
    .alignment(Alignment::Right);
    frame.render_widget(title, title_area);

    let key_style = Style::default().fg(DARK_GRAY);
    let control_style = Style::default().fg(LIGHT_GRAY).add_modifier(Modifier::BOLD);
    let controls = Paragraph::new(vec![
        Line::from(vec![
            Span::styled(primary_control_label(run_state), control_style),
            Span::styled(" [space]", key_style),
        ]),
        Line::from(vec![
            Span::styled("Stop", control_style),
            Span::styled(" [s]", key_style),
        ]),
        Line::from(vec![
            Span::styled("Quit", control_style),
            Span::styled(" [q]", key_style),
        ]),
    ])
    .alignment(Alignment::Right);
    frame.render_widget(controls, controls_area);
}

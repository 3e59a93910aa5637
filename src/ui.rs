pub mod clock;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, LineGauge, Paragraph, Widget, Wrap},
};
use sevenmin::{action::ActionType, workout::WorkoutStatus};

use crate::{
    ui::clock::{format_clock, progress_ratio},
    App, SessionStatus,
};

const TITLE: &str = " 7 Minute Workout ";
const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;

fn kind_color(kind: ActionType) -> Color {
    match kind {
        ActionType::Start => Color::Cyan,
        ActionType::Active => Color::Green,
        ActionType::Break => Color::Yellow,
        ActionType::Finish => Color::Magenta,
    }
}

fn status_label(status: WorkoutStatus, kind: ActionType) -> &'static str {
    match (status, kind) {
        (WorkoutStatus::Ready, _) => "READY",
        (WorkoutStatus::Complete, _) => "DONE",
        (WorkoutStatus::Paused, _) => "PAUSED",
        (WorkoutStatus::Running, ActionType::Break) => "REST",
        (WorkoutStatus::Running, _) => "EXERCISE",
    }
}

fn key_hints(status: WorkoutStatus) -> &'static str {
    match status {
        WorkoutStatus::Ready => "(space) start / (q)uit",
        WorkoutStatus::Running => "(space) pause / (n)ext / (r)eset / (q)uit",
        WorkoutStatus::Paused => "(space) resume / (n)ext / (r)eset / (q)uit",
        WorkoutStatus::Complete => "(space) again / (r)eset / (q)uit",
    }
}

fn session_line(app: &App) -> Line<'_> {
    let dim = Style::default().add_modifier(Modifier::DIM);
    let plan = app.workout.plan();
    let summary = format!(
        "{} exercises, {} total",
        plan.exercise_count(),
        format_clock(app.workout.total_duration())
    );

    match &app.session {
        SessionStatus::None => Line::from(Span::styled(summary, dim)),
        SessionStatus::Loading(name) => {
            Line::from(Span::styled(format!("{summary} / loading {name}..."), dim))
        }
        SessionStatus::Loaded { name, session } => Line::from(vec![
            Span::styled(format!("{summary} / "), dim),
            Span::styled(format!("{name}: "), dim.add_modifier(Modifier::BOLD)),
            Span::styled(session.workout.join(", "), dim),
        ]),
        SessionStatus::Failed { name, reason } => Line::from(vec![
            Span::styled(format!("{summary} / "), dim),
            Span::styled(
                format!("{name} unavailable: {reason}"),
                Style::default().fg(Color::Red),
            ),
        ]),
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let workout = &self.workout;
        let action = workout.current_action();
        let status = workout.status();

        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let dim_style = Style::default().add_modifier(Modifier::DIM);
        let accent = kind_color(action.kind());

        let block = Block::default()
            .borders(Borders::ALL)
            .title(TITLE)
            .title_alignment(Alignment::Center);
        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(1), // session summary
                Constraint::Min(0),
                Constraint::Length(1), // status badge
                Constraint::Length(2), // action name
                Constraint::Length(2), // countdown
                Constraint::Length(1), // up next
                Constraint::Min(0),
                Constraint::Length(1), // progress
                Constraint::Length(1), // key hints
            ])
            .split(inner);

        Paragraph::new(session_line(self))
            .wrap(Wrap { trim: true })
            .render(chunks[0], buf);

        let badge_style = if status == WorkoutStatus::Paused {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::SLOW_BLINK)
        } else {
            Style::default().patch(bold_style).fg(accent)
        };
        Paragraph::new(Span::styled(status_label(status, action.kind()), badge_style))
            .alignment(Alignment::Center)
            .render(chunks[2], buf);

        Paragraph::new(Span::styled(
            action.name(),
            Style::default().patch(bold_style).fg(accent),
        ))
        .alignment(Alignment::Center)
        .render(chunks[3], buf);

        if !workout.awaiting_input() {
            let countdown_style = if workout.is_paused() {
                dim_style.patch(bold_style)
            } else {
                bold_style
            };
            Paragraph::new(Span::styled(
                format_clock(workout.display_remaining()),
                countdown_style,
            ))
            .alignment(Alignment::Center)
            .render(chunks[4], buf);
        }

        // Only worth previewing while resting or before the first exercise
        if matches!(action.kind(), ActionType::Break | ActionType::Start) {
            if let Ok(next) = workout.next_display_action() {
                Paragraph::new(Line::from(vec![
                    Span::styled("up next: ", dim_style),
                    Span::styled(next.name(), Style::default().add_modifier(Modifier::ITALIC)),
                ]))
                .alignment(Alignment::Center)
                .render(chunks[5], buf);
            }
        }

        let (done, total) = workout.progress();
        LineGauge::default()
            .filled_style(Style::default().fg(Color::Green))
            .unfilled_style(dim_style)
            .label(format!("{done}/{total}"))
            .ratio(progress_ratio(done, total))
            .render(chunks[7], buf);

        Paragraph::new(Span::styled(key_hints(status), dim_style))
            .alignment(Alignment::Center)
            .render(chunks[8], buf);
    }
}

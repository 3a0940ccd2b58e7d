pub mod screen;

use itertools::Itertools;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;
use wordfall::{
    config::FloorPolicy,
    typing::{Slot, SlotState},
    util::{format_elapsed, format_throughput, position_to_row},
};

use crate::App;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;

pub fn draw(app: &App, f: &mut Frame) {
    screen::current_screen(&app.state).render(app, f);
}

fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn italic() -> Style {
    Style::default().add_modifier(Modifier::ITALIC)
}

pub fn render_menu(app: &App, area: Rect, buf: &mut Buffer) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(35),
            Constraint::Length(2), // title
            Constraint::Length(2), // best score
            Constraint::Length(1), // legend
            Constraint::Min(0),
        ])
        .split(area);

    Paragraph::new(Span::styled(
        "W O R D F A L L",
        bold().fg(Color::Cyan),
    ))
    .alignment(Alignment::Center)
    .render(chunks[1], buf);

    Paragraph::new(Span::styled(
        format!("best score {}", app.view.best),
        bold().fg(Color::Yellow),
    ))
    .alignment(Alignment::Center)
    .render(chunks[2], buf);

    Paragraph::new(Span::styled(
        "(enter) start / (g)uidelines / (q)uit",
        italic(),
    ))
    .alignment(Alignment::Center)
    .render(chunks[3], buf);
}

pub fn render_guidelines(area: Rect, buf: &mut Buffer) {
    let text = vec![
        Line::from(Span::styled("how to play", bold().fg(Color::Cyan))),
        Line::from(""),
        Line::from("A word falls from the top of the play area."),
        Line::from("Type its letters before it reaches the floor."),
        Line::from("Each finished word scores a point and makes the next one fall faster."),
        Line::from("Wrong letters turn red; use backspace to fix them."),
        Line::from("bps shows correctly typed letters per second."),
        Line::from(""),
        Line::from(Span::styled("(any key) back", italic())),
    ];

    let block = Block::default().borders(Borders::ALL).title("guidelines");
    Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(centered(area, 76, 13), buf);
}

fn slot_spans(slots: &[Slot]) -> Vec<Span<'static>> {
    let dim = bold().add_modifier(Modifier::DIM);

    slots
        .iter()
        .enumerate()
        .flat_map(|(idx, slot)| {
            let (text, style) = match (slot.letter, slot.state) {
                (Some(c), SlotState::Correct) => (c.to_ascii_uppercase(), bold().fg(Color::Green)),
                (Some(c), SlotState::Incorrect) => (c.to_ascii_uppercase(), bold().fg(Color::Red)),
                _ => ('_', dim),
            };
            let gap = if idx == 0 { "" } else { " " };
            [
                Span::raw(gap),
                Span::styled(format!("[{text}]"), style),
            ]
        })
        .collect()
}

pub fn render_play(app: &App, area: Rect, buf: &mut Buffer) {
    let view = &app.view;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Min(3),    // play area
            Constraint::Length(2), // letter boxes
            Constraint::Length(1), // legend
        ])
        .split(area);

    let mut header = vec![
        format!("score {}", view.current),
        format!("best {}", view.best),
        format!("time {}", format_elapsed(view.elapsed)),
        format!("bps {}", format_throughput(view.throughput)),
    ];
    if matches!(app.session.settings().floor_policy, FloorPolicy::Lenient { .. }) {
        header.push(format!("missed {}", view.words_missed));
    }
    let header = header.iter().join("   ");
    Paragraph::new(Span::styled(header, bold()))
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

    let play_block = Block::default().borders(Borders::ALL).title("wordfall");
    let inner = play_block.inner(chunks[1]);
    play_block.render(chunks[1], buf);

    if let Some(word) = view.word.as_ref().filter(|_| !inner.is_empty()) {
        let text = word.as_str().to_uppercase();
        let width = (text.width() as u16).min(inner.width);
        let row = position_to_row(
            view.y,
            app.session.settings().fall.floor_threshold,
            inner.height,
        );
        let rect = Rect::new(
            inner.x + (inner.width - width) / 2,
            inner.y + row,
            width,
            1,
        );
        Paragraph::new(Span::styled(text, bold().fg(Color::Magenta))).render(rect, buf);
    }

    Paragraph::new(Line::from(slot_spans(&view.slots)))
        .alignment(Alignment::Center)
        .render(chunks[2], buf);

    Paragraph::new(Span::styled("(esc) menu", italic())).render(chunks[3], buf);

    if let Some(final_score) = view.final_score {
        let overlay = centered(area, 36, 7);
        Clear.render(overlay, buf);

        let text = vec![
            Line::from(Span::styled(
                format!("score {}", final_score.score),
                bold(),
            )),
            Line::from(Span::styled(
                format!("best {}", final_score.best),
                bold().fg(Color::Yellow),
            )),
            Line::from(""),
            Line::from(Span::styled("(r)etry / (m)enu / (q)uit", italic())),
        ];
        Paragraph::new(text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("game over")
                    .border_style(Style::default().fg(Color::Red)),
            )
            .alignment(Alignment::Center)
            .render(overlay, buf);
    }
}

/// Rect of at most `width` x `height` in the middle of `area`
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

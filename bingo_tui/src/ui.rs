use bingo::{Phase, FREE_CELL_INDEX, GRID_SIDE, REQUIRED_LABELS};
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::{App, Overlay};

const CELL_WIDTH: u16 = 15;
const CELL_HEIGHT: u16 = 3;
const GRID_WIDTH: u16 = CELL_WIDTH * GRID_SIDE as u16;
const GRID_HEIGHT: u16 = CELL_HEIGHT * GRID_SIDE as u16;

pub fn draw(frame: &mut Frame, app: &App) {
    let main_layout = Layout::new(
        Direction::Vertical,
        [
            Constraint::Length(4),
            Constraint::Length(GRID_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(1),
        ],
    )
    .split(frame.size());

    draw_header(frame, app, main_layout[0]);
    draw_grid(frame, app, main_layout[1]);
    draw_footer(frame, app, main_layout[3]);

    match &app.overlay {
        Overlay::None => {}
        Overlay::ConfirmReset => draw_confirm(frame),
        Overlay::Share(url) => draw_share(frame, url),
    }
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = Vec::new();
    if let Some(notice) = &app.notice {
        lines.push(Line::styled(
            notice.clone(),
            Style::new().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
    }
    match app.phase {
        Phase::Setup if app.grid.is_ready() => {
            lines.push(Line::from("The game is ready, press start when ready"));
        }
        Phase::Setup => {
            lines.push(Line::from("Start by adding some text to all cards"));
            lines.push(Line::from(format!(
                "{} / {} cards are ready",
                app.grid.labeled_count(),
                REQUIRED_LABELS
            )));
        }
        Phase::Playing if app.grid.has_bingo(app.phase) => {
            lines.push(Line::styled(
                "BINGO!",
                Style::new().fg(Color::Green).add_modifier(Modifier::BOLD),
            ));
            lines.push(Line::from("[r] new game · [e] play again"));
        }
        Phase::Playing => {
            lines.push(Line::from("Check off your squares as they happen"));
        }
    }
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn draw_grid(frame: &mut Frame, app: &App, area: Rect) {
    let area = Layout::new(
        Direction::Horizontal,
        [
            Constraint::Min(0),
            Constraint::Length(GRID_WIDTH),
            Constraint::Min(0),
        ],
    )
    .split(area)[1];

    for (index, cell) in app.grid.cells().iter().enumerate() {
        let row = (index / GRID_SIDE) as u16;
        let col = (index % GRID_SIDE) as u16;
        let cell_area = Rect {
            x: area.x + col * CELL_WIDTH,
            y: area.y + row * CELL_HEIGHT,
            width: CELL_WIDTH,
            height: CELL_HEIGHT,
        };

        let mut block = Block::new()
            .border_type(BorderType::Rounded)
            .borders(Borders::ALL);
        if index == app.cursor {
            block =
                block.border_style(Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD));
        }

        let paragraph = if index == FREE_CELL_INDEX {
            Paragraph::new(Line::styled("★", Style::new().fg(Color::Yellow)))
                .alignment(Alignment::Center)
        } else {
            let mut text = cell.value.clone();
            if index == app.cursor && app.phase == Phase::Setup {
                text.push('▏');
            }
            let style = if app.phase == Phase::Playing && cell.checked {
                Style::new().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else {
                Style::new()
            };
            Paragraph::new(text).style(style).wrap(Wrap { trim: false })
        };
        // The card does not fit on very small terminals; clip rather than
        // letting a cell rect escape the buffer.
        frame.render_widget(paragraph.block(block), cell_area.intersection(frame.size()));
    }
}

fn draw_footer(frame: &mut Frame, app: &App, area: Rect) {
    let hints = match app.phase {
        Phase::Setup => {
            "type to edit · arrows/tab move · ^S start · ^F shuffle · ^R reset · ^O share · esc quit"
        }
        Phase::Playing => "space toggle · arrows move · e edit cards · r reset · s share · q quit",
    };
    frame.render_widget(
        Paragraph::new(hints)
            .style(Style::new().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        area,
    );
}

fn popup_area(frame: &Frame, width: u16, height: u16) -> Rect {
    let vertical = Layout::new(
        Direction::Vertical,
        [
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ],
    )
    .split(frame.size());
    Layout::new(
        Direction::Horizontal,
        [
            Constraint::Min(0),
            Constraint::Length(width),
            Constraint::Min(0),
        ],
    )
    .split(vertical[1])[1]
}

fn draw_confirm(frame: &mut Frame) {
    let area = popup_area(frame, 54, 3);
    frame.render_widget(Clear, area);
    let block = Block::new()
        .border_type(BorderType::Rounded)
        .borders(Borders::ALL)
        .title("Clear cards");
    frame.render_widget(
        Paragraph::new("This will clear all your bingo cards. Proceed? [y/n]")
            .wrap(Wrap { trim: false })
            .block(block),
        area,
    );
}

fn draw_share(frame: &mut Frame, url: &str) {
    let area = popup_area(frame, 72, 8);
    frame.render_widget(Clear, area);
    let block = Block::new()
        .border_type(BorderType::Rounded)
        .borders(Borders::ALL)
        .title("Share");
    let lines = vec![
        Line::from("Copy this link to share your bingo card with others"),
        Line::from(""),
        Line::from(url.to_string()),
    ];
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(block),
        area,
    );
}

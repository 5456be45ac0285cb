use ratatui::{
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::game::{Direction, GameEngine, GameState, GridObject, Rgb};
use crate::metrics::GameMetrics;

const LIGHT_CELL: Color = Color::Rgb(0xB0, 0xE0, 0xE6);
const DARK_CELL: Color = Color::Rgb(0x46, 0x82, 0xB4);

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        engine: &GameEngine,
        metrics: &GameMetrics,
        status: Option<&str>,
    ) {
        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(engine, metrics), chunks[0]);

        let grid = self.render_grid(engine);
        frame.render_widget(grid, chunks[1]);

        match engine.state() {
            GameState::Playing => {}
            GameState::Paused => {
                let area = centered(chunks[1], 30, 5);
                frame.render_widget(Clear, area);
                frame.render_widget(self.render_paused(), area);
            }
            GameState::GameOver => {
                let area = centered(chunks[1], 50, 9);
                frame.render_widget(Clear, area);
                frame.render_widget(self.render_game_over(engine), area);
            }
        }

        frame.render_widget(self.render_controls(status), chunks[2]);
    }

    fn render_grid(&self, engine: &GameEngine) -> Paragraph<'_> {
        let grid = engine.config().grid_size;
        let columns = engine.field_width() / grid;
        let rows = engine.field_height() / grid;

        let snake = engine.snake();
        let body = snake.body();
        let apple = engine.apple().body();

        let lines: Vec<Line> = (0..rows)
            .map(|row| {
                let spans: Vec<Span> = (0..columns)
                    .map(|col| {
                        let cell = GridObject::cell(col * grid, row * grid, grid, Rgb::WHITE);
                        let background = if (row + col) % 2 == 0 {
                            LIGHT_CELL
                        } else {
                            DARK_CELL
                        };

                        if snake.head().overlaps(&cell) {
                            Span::styled(
                                head_glyph(snake.direction()),
                                Style::default()
                                    .fg(Color::Black)
                                    .bg(to_color(snake.head().color))
                                    .add_modifier(Modifier::BOLD),
                            )
                        } else if let Some(segment) = body.iter().find(|s| s.overlaps(&cell)) {
                            Span::styled("  ", Style::default().bg(to_color(segment.color)))
                        } else if apple.overlaps(&cell) {
                            Span::styled(
                                "()",
                                Style::default()
                                    .fg(to_color(apple.color))
                                    .bg(background)
                                    .add_modifier(Modifier::BOLD),
                            )
                        } else {
                            Span::styled("  ", Style::default().bg(background))
                        }
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(format!(" Snake - {} ", engine.config().player_name)),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, engine: &GameEngine, metrics: &GameMetrics) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(engine.score().to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(
                engine.high_score().to_string(),
                Style::default().fg(Color::Rgb(255, 200, 50)),
            ),
            Span::raw("    "),
            Span::styled("Length: ", label),
            Span::styled(engine.snake().len().to_string(), value),
            Span::raw("    "),
            Span::styled("Speed: ", label),
            Span::styled(engine.config().moves_per_second.to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
            Span::raw("    "),
            Span::styled("Games: ", label),
            Span::styled(metrics.games_played.to_string(), value),
            Span::raw("    "),
            Span::styled("Longest: ", label),
            Span::styled(metrics.longest_snake.to_string(), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_paused(&self) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "PAUSED",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled("Space to resume", Style::default().fg(Color::Gray))),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        )
    }

    fn render_game_over(&self, engine: &GameEngine) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    engine.score().to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled("   Length: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    engine.snake().len().to_string(),
                    Style::default().fg(Color::White),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Space",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, status: Option<&str>) -> Paragraph<'_> {
        let mut text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("Space", Style::default().fg(Color::Cyan)),
            Span::raw(" pause | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        if let Some(status) = status {
            text.push(Line::from(Span::styled(
                status.to_string(),
                Style::default().fg(Color::Red),
            )));
        }

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn head_glyph(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => "▲▲",
        Direction::Down => "▼▼",
        Direction::Left => "◀◀",
        Direction::Right => "▶▶",
    }
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_fits_inside() {
        let area = Rect::new(0, 0, 80, 24);
        let popup = centered(area, 30, 5);
        assert_eq!(popup, Rect::new(25, 9, 30, 5));
    }

    #[test]
    fn test_centered_clamps_to_area() {
        let area = Rect::new(2, 3, 10, 4);
        let popup = centered(area, 30, 5);
        assert_eq!(popup, area);
    }

    #[test]
    fn test_stats_show_longest_snake() {
        use crate::game::GameConfig;
        use crate::results::NoopResultsSink;
        use ratatui::{backend::TestBackend, Terminal};

        let config = GameConfig {
            field_width: 200,
            field_height: 200,
            grid_size: 20,
            seed: Some(1),
            ..Default::default()
        };
        let engine = GameEngine::new(config, NoopResultsSink).unwrap();
        let mut metrics = GameMetrics::new();
        metrics.longest_snake = 7;

        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal
            .draw(|frame| Renderer::new().render(frame, &engine, &metrics, None))
            .unwrap();

        let screen: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(screen.contains("Longest: 7"));
    }

    #[test]
    fn test_to_color() {
        assert_eq!(to_color(Rgb(1, 2, 3)), Color::Rgb(1, 2, 3));
    }
}

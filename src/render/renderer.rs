use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{GameState, Position};
use crate::gesture::Gesture;
use crate::metrics::GameMetrics;
use crate::recognition::Identity;

/// Side panel contents for gesture play.
#[derive(Debug, Clone, Default)]
pub struct GestureHud {
    /// Most recent classification, if any hand has been seen
    pub gesture: Option<Gesture>,
    /// True while frames are still arriving from the tracker
    pub tracking: bool,
    /// Latest flavor line for the held gesture
    pub flavor: Option<String>,
    /// Recognized owner of the tracked hand, when profiles are loaded
    pub player: Option<Identity>,
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        state: &GameState,
        metrics: &GameMetrics,
        hud: Option<&GestureHud>,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        // Render header with basic stats
        let stats = self.render_stats(chunks[0], state, metrics);
        frame.render_widget(stats, chunks[0]);

        let game_area = if let Some(hud) = hud {
            // Game grid on the left, hand panel on the right
            let split = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Min(0), Constraint::Length(36)])
                .split(chunks[1]);

            let panel = self.render_hand_panel(split[1], hud);
            frame.render_widget(panel, split[1]);

            split[0]
        } else {
            // Center the game grid horizontally
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints([
                    Constraint::Percentage(10),
                    Constraint::Percentage(80),
                    Constraint::Percentage(10),
                ])
                .split(chunks[1])[1]
        };

        // Render game grid or game over screen
        if state.is_over() {
            let game_over = self.render_game_over(game_area, state, metrics);
            frame.render_widget(game_over, game_area);
        } else {
            let grid = self.render_grid(game_area, state);
            frame.render_widget(grid, game_area);
        }

        // Render footer with controls
        let controls = self.render_controls(chunks[2], hud.is_some());
        frame.render_widget(controls, chunks[2]);
    }

    fn render_grid(&self, _area: Rect, state: &GameState) -> Paragraph<'_> {
        let mut lines = Vec::new();

        for y in 0..state.grid_height {
            let mut spans = Vec::new();

            for x in 0..state.grid_width {
                let pos = Position::new(x as i32, y as i32);

                let cell = if pos == state.snake.head() {
                    // Snake head - distinct color
                    Span::styled(
                        "■ ",
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if state.snake.body.contains(&pos) {
                    // Snake body
                    Span::styled("□ ", Style::default().fg(Color::Green))
                } else if pos == state.food {
                    // Food
                    Span::styled(
                        "O ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else {
                    // Empty cell
                    Span::styled(". ", Style::default().fg(Color::DarkGray))
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        let (title, border_color) = if state.is_paused() {
            (" PAUSED ", Color::Yellow)
        } else {
            (" Snake ", Color::White)
        };

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(border_color))
                    .title(title),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, _area: Rect, state: &GameState, metrics: &GameMetrics) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                state.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                metrics.high_score.to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Ticks: ", Style::default().fg(Color::Yellow)),
            Span::styled(state.ticks.to_string(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_hand_panel(&self, _area: Rect, hud: &GestureHud) -> Paragraph<'_> {
        let mut text = vec![Line::from("")];

        match (&hud.gesture, hud.tracking) {
            (Some(gesture), true) => {
                text.push(Line::from(vec![
                    Span::raw(format!("{}  ", gesture.glyph)),
                    Span::styled(
                        gesture.name.clone(),
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ),
                ]));
                text.push(Line::from(""));
                text.push(Line::from(vec![
                    Span::styled("Fingers up: ", Style::default().fg(Color::Yellow)),
                    Span::styled(
                        gesture.extended_fingers.to_string(),
                        Style::default().fg(Color::White),
                    ),
                ]));
                text.push(Line::from(vec![
                    Span::styled("Confidence: ", Style::default().fg(Color::Yellow)),
                    Span::styled(
                        format!("{:.0}%", gesture.confidence * 100.0),
                        Style::default().fg(Color::White),
                    ),
                ]));
            }
            _ => {
                text.push(Line::from(Span::styled(
                    "No hand in view",
                    Style::default().fg(Color::DarkGray),
                )));
            }
        }

        if let Some(identity) = &hud.player {
            // Known players in green, strangers in red
            let color = match identity {
                Identity::Player(_) => Color::Green,
                Identity::Unknown => Color::Red,
            };
            text.push(Line::from(""));
            text.push(Line::from(vec![
                Span::styled("Player: ", Style::default().fg(Color::Yellow)),
                Span::styled(identity.label().to_string(), Style::default().fg(color)),
            ]));
        }

        if let Some(flavor) = &hud.flavor {
            text.push(Line::from(""));
            text.push(Line::from(Span::styled(
                flavor.clone(),
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::ITALIC),
            )));
        }

        let border_color = if hud.tracking {
            Color::Green
        } else {
            Color::DarkGray
        };

        Paragraph::new(text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(border_color))
                    .title(" Hand "),
            )
            .alignment(Alignment::Center)
            .wrap(ratatui::widgets::Wrap { trim: true })
    }

    fn render_game_over(
        &self,
        _area: Rect,
        state: &GameState,
        metrics: &GameMetrics,
    ) -> Paragraph<'_> {
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
                    state.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("Session Best: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    metrics.high_score.to_string(),
                    Style::default().fg(Color::White),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
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

    fn render_controls(&self, _area: Rect, gesture_mode: bool) -> Paragraph<'_> {
        let text = if gesture_mode {
            vec![Line::from(vec![
                Span::styled("1", Style::default().fg(Color::Cyan)),
                Span::raw(" up | "),
                Span::styled("2", Style::default().fg(Color::Cyan)),
                Span::raw(" down | "),
                Span::styled("3", Style::default().fg(Color::Cyan)),
                Span::raw(" right | "),
                Span::styled("4", Style::default().fg(Color::Cyan)),
                Span::raw(" left fingers | "),
                Span::styled("✊", Style::default().fg(Color::Yellow)),
                Span::raw(" pause | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ])]
        } else {
            vec![Line::from(vec![
                Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
                Span::raw(" or "),
                Span::styled("WASD", Style::default().fg(Color::Cyan)),
                Span::raw(" to move | "),
                Span::styled("P", Style::default().fg(Color::Yellow)),
                Span::raw(" to pause | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ])]
        };

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

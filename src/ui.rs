use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io::{self, Stdout};
use textwrap::fill;

use crate::cleaner::UNKNOWN;
use crate::painting::PaintingRecord;

pub struct UI {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

#[derive(Debug, Clone)]
pub enum UIState {
    Empty,
    Painting {
        record: PaintingRecord,
        position: usize,
        total: usize,
        back_disabled: bool,
        status: Option<String>,
    },
    Error {
        message: String,
    },
}

#[derive(Debug, PartialEq, Eq)]
pub enum UserAction {
    PreviousPainting,
    NewPainting,
    SaveImage,
    Quit,
    DismissError,
}

impl UI {
    pub fn new() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self { terminal })
    }

    pub fn cleanup(&mut self) -> Result<()> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    pub fn render(&mut self, state: &UIState) -> Result<()> {
        match state {
            UIState::Empty => {
                self.terminal.draw(Self::render_empty)?;
            }
            UIState::Painting {
                record,
                position,
                total,
                back_disabled,
                status,
            } => {
                self.terminal.draw(|f| {
                    Self::render_painting(
                        f,
                        record,
                        *position,
                        *total,
                        *back_disabled,
                        status.as_deref(),
                    )
                })?;
            }
            UIState::Error { message } => {
                self.terminal.draw(|f| Self::render_error(f, message))?;
            }
        }
        Ok(())
    }

    /// Draw the fetch progress screen. Input is not read while a fetch runs,
    /// so this is not a `UIState`.
    pub fn render_progress(
        &mut self,
        attempt: u32,
        max_attempts: u32,
        source: &str,
    ) -> Result<()> {
        self.terminal
            .draw(|f| Self::render_loading(f, attempt, max_attempts, source))?;
        Ok(())
    }

    fn render_empty(f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(2)
            .constraints([Constraint::Min(3), Constraint::Length(3)])
            .split(f.size());

        f.render_widget(
            Paragraph::new("No painting yet. Press n to fetch one.")
                .style(Style::default().fg(Color::Yellow))
                .block(Block::default().borders(Borders::ALL).title("Inspiro")),
            chunks[0],
        );
        Self::render_help(f, chunks[1], true);
    }

    fn render_loading(f: &mut Frame, attempt: u32, max_attempts: u32, source: &str) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(2)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
            ])
            .split(f.size());

        f.render_widget(
            Paragraph::new("🎨 Finding a painting...")
                .style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )
                .block(Block::default().borders(Borders::ALL).title("Inspiro")),
            chunks[0],
        );

        f.render_widget(
            Paragraph::new(format!("Category:{}", source))
                .style(Style::default().fg(Color::Blue))
                .block(Block::default().borders(Borders::ALL).title("Source")),
            chunks[1],
        );

        let percent = (attempt.saturating_mul(100) / max_attempts.max(1)).min(100) as u16;
        f.render_widget(
            Gauge::default()
                .block(Block::default().borders(Borders::ALL).title("Attempts"))
                .gauge_style(Style::default().fg(Color::Cyan).bg(Color::Black))
                .percent(percent)
                .label(format!("{}/{}", attempt, max_attempts))
                .use_unicode(true),
            chunks[2],
        );
    }

    fn render_painting(
        f: &mut Frame,
        record: &PaintingRecord,
        position: usize,
        total: usize,
        back_disabled: bool,
        status: Option<&str>,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(4),
                Constraint::Length(6),
                Constraint::Length(3),
            ])
            .split(f.size());

        f.render_widget(
            Paragraph::new(format!("🖼  {}", display_or_unknown(record.title())))
                .style(
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                )
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(format!("Painting {}/{}", position + 1, total)),
                ),
            chunks[0],
        );

        Self::render_image(f, chunks[1], record.url(), status);
        Self::render_details(f, chunks[2], record);
        Self::render_help(f, chunks[3], back_disabled);
    }

    fn render_image(f: &mut Frame, area: Rect, url: &str, status: Option<&str>) {
        let width = area.width.saturating_sub(4) as usize;
        let mut lines: Vec<Line> = fill(url, width.max(1))
            .lines()
            .map(|line| {
                Line::from(Span::styled(
                    line.to_string(),
                    Style::default().fg(Color::Blue),
                ))
            })
            .collect();
        if let Some(status) = status {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                status.to_string(),
                Style::default().fg(Color::Yellow),
            )));
        }

        f.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .block(Block::default().borders(Borders::ALL).title("Image")),
            area,
        );
    }

    fn render_details(f: &mut Frame, area: Rect, record: &PaintingRecord) {
        let label = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);

        let mut lines = vec![
            Line::from(vec![
                Span::styled("Artist: ", label),
                Span::raw(display_or_unknown(record.artist()).to_string()),
            ]),
            Line::from(vec![
                Span::styled("Title: ", label),
                Span::raw(display_or_unknown(record.title()).to_string()),
            ]),
            Line::from(vec![
                Span::styled("Date: ", label),
                Span::raw(display_or_unknown(record.date()).to_string()),
            ]),
        ];
        if let Some(link) = record.artist_url() {
            lines.push(Line::from(vec![
                Span::styled("About: ", label),
                Span::styled(link.to_string(), Style::default().fg(Color::Blue)),
            ]));
        }

        f.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: true })
                .block(Block::default().borders(Borders::ALL).title("Details")),
            area,
        );
    }

    fn render_help(f: &mut Frame, area: Rect, back_disabled: bool) {
        let key = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let previous = if back_disabled {
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::DIM)
        } else {
            key
        };

        let help_text = Line::from(vec![
            Span::styled("p/←", previous),
            Span::styled(" Previous  ", if back_disabled { previous } else { Style::default() }),
            Span::styled("n/→", key),
            Span::raw(" New  "),
            Span::styled("s", key),
            Span::raw(" Save  "),
            Span::styled("q", key),
            Span::raw(" Quit"),
        ]);

        f.render_widget(
            Paragraph::new(help_text)
                .block(Block::default().borders(Borders::ALL).title("⌨️ Controls")),
            area,
        );
    }

    fn render_error(f: &mut Frame, message: &str) {
        let area = f.size();
        let popup_area = Rect {
            x: area.width / 8,
            y: (area.height / 2).saturating_sub(3),
            width: area.width * 3 / 4,
            height: area.height.min(6),
        };

        f.render_widget(Clear, popup_area);
        f.render_widget(
            Paragraph::new(format!("{}\n\nPress any key to dismiss", message))
                .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
                .wrap(Wrap { trim: true })
                .block(Block::default().borders(Borders::ALL).title("❌ Error")),
            popup_area,
        );
    }

    pub fn get_user_input(&mut self, state: &UIState) -> Result<UserAction> {
        loop {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(action) = map_key(state, key.code) {
                    return Ok(action);
                }
            }
        }
    }
}

/// Key bindings per state; `None` means the key is ignored.
pub fn map_key(state: &UIState, code: KeyCode) -> Option<UserAction> {
    match state {
        UIState::Error { .. } => match code {
            KeyCode::Char('q') | KeyCode::Esc => Some(UserAction::Quit),
            _ => Some(UserAction::DismissError),
        },
        UIState::Empty | UIState::Painting { .. } => match code {
            KeyCode::Char('q') | KeyCode::Esc => Some(UserAction::Quit),
            KeyCode::Char('p') | KeyCode::Left => Some(UserAction::PreviousPainting),
            KeyCode::Char('n') | KeyCode::Char(' ') | KeyCode::Right => {
                Some(UserAction::NewPainting)
            }
            KeyCode::Char('s') => Some(UserAction::SaveImage),
            _ => None,
        },
    }
}

fn display_or_unknown(text: &str) -> &str {
    if text.is_empty() {
        UNKNOWN
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn painting() -> UIState {
        UIState::Painting {
            record: PaintingRecord::new(
                "https://x/a.jpg".into(),
                "A".into(),
                "T".into(),
                "1600".into(),
                None,
            ),
            position: 0,
            total: 1,
            back_disabled: true,
            status: None,
        }
    }

    #[test]
    fn painting_keys() {
        let state = painting();
        assert_eq!(map_key(&state, KeyCode::Left), Some(UserAction::PreviousPainting));
        assert_eq!(map_key(&state, KeyCode::Char('p')), Some(UserAction::PreviousPainting));
        assert_eq!(map_key(&state, KeyCode::Char('n')), Some(UserAction::NewPainting));
        assert_eq!(map_key(&state, KeyCode::Right), Some(UserAction::NewPainting));
        assert_eq!(map_key(&state, KeyCode::Char('s')), Some(UserAction::SaveImage));
        assert_eq!(map_key(&state, KeyCode::Char('q')), Some(UserAction::Quit));
        assert_eq!(map_key(&state, KeyCode::Char('x')), None);
    }

    #[test]
    fn any_key_dismisses_error() {
        let state = UIState::Error {
            message: "boom".into(),
        };
        assert_eq!(map_key(&state, KeyCode::Char('x')), Some(UserAction::DismissError));
        assert_eq!(map_key(&state, KeyCode::Enter), Some(UserAction::DismissError));
    }

    #[test]
    fn quit_from_error_popup() {
        let state = UIState::Error {
            message: "boom".into(),
        };
        assert_eq!(map_key(&state, KeyCode::Char('q')), Some(UserAction::Quit));
        assert_eq!(map_key(&state, KeyCode::Esc), Some(UserAction::Quit));
    }
}

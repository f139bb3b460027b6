pub mod balance;
pub mod minter;
pub mod token_info;

use color_eyre::eyre::Result;
use crossterm::event::KeyEvent;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::tui::Frame;

/// A component is a reusable UI element that can handle events and render itself.
pub trait Component {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<()>;
    fn draw(&mut self, f: &mut Frame, area: Rect);

    /// Whether keystrokes currently go into a text field.
    fn is_editing(&self) -> bool {
        false
    }

    fn paste(&mut self, _text: &str) {}
}

/// Bordered single-line text input.
pub(crate) fn input_widget<'a>(
    title: &'a str,
    value: &'a str,
    placeholder: &'a str,
    focused: bool,
    editing: bool,
) -> Paragraph<'a> {
    let text = if editing {
        Span::styled(format!("{}│", value), Style::default().fg(Color::Yellow))
    } else if value.is_empty() {
        Span::styled(placeholder, Style::default().fg(Color::DarkGray))
    } else if focused {
        Span::styled(value, Style::default().fg(Color::Cyan))
    } else {
        Span::styled(value, Style::default().fg(Color::White))
    };

    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let title = if focused {
        format!("> {}", title)
    } else {
        format!("  {}", title)
    };

    Paragraph::new(vec![Line::from(""), Line::from(text)]).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style),
    )
}

/// Render the outcome line of a query: a spinner text, a result or an error.
pub(crate) fn outcome_line(text: String, color: Color) -> Line<'static> {
    Line::from(vec![Span::styled(text, Style::default().fg(color))])
}

pub(crate) fn help_line(text: &'static str) -> Line<'static> {
    Line::from(vec![Span::styled(text, Style::default().fg(Color::DarkGray))])
}

pub(crate) fn panel(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
}

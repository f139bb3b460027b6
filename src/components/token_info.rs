use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use tokio::sync::mpsc::UnboundedSender;

use crate::{
    action::Action,
    domain::{
        error::QueryError,
        query::{QueryState, TokenInfo, TokenInfoQuery},
    },
    tui::Frame,
};

use super::{Component, help_line, outcome_line, panel};

const NOT_FETCHED: &str = "Not fetched";

/// Token name and total supply, refreshed on demand.
pub struct TokenInfoComponent {
    action_tx: UnboundedSender<Action>,
    pub query: TokenInfoQuery,
}

impl TokenInfoComponent {
    pub fn new(action_tx: UnboundedSender<Action>) -> Self {
        Self {
            action_tx,
            query: TokenInfoQuery::new(),
        }
    }

    pub fn refresh(&mut self) -> Result<()> {
        if self.query.state.is_loading() {
            return Ok(());
        }
        self.query.begin();
        self.action_tx.send(Action::RefreshTokenInfo)?;
        Ok(())
    }

    pub fn on_token_info(&mut self, outcome: Result<TokenInfo, QueryError>) {
        self.query.finish(outcome);
    }
}

impl Component for TokenInfoComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        if let KeyCode::Enter | KeyCode::Char('r') = key.code {
            self.refresh()?;
        }
        Ok(())
    }

    fn draw(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::vertical([Constraint::Length(8), Constraint::Min(0)]).split(area);

        let label = Style::default().fg(Color::DarkGray);
        let value = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);

        let mut lines = vec![Line::from("")];
        match &self.query.state {
            QueryState::Loading => {
                lines.push(outcome_line(
                    "Loading token information...".to_string(),
                    Color::Yellow,
                ));
            }
            state => {
                let (name, supply) = match state.success() {
                    Some(info) => (info.name.as_str(), info.total_supply.as_str()),
                    None => (NOT_FETCHED, NOT_FETCHED),
                };
                lines.push(Line::from(vec![
                    Span::styled("Name: ", label),
                    Span::styled(name, value),
                ]));
                lines.push(Line::from(vec![
                    Span::styled("Total Supply: ", label),
                    Span::styled(supply, value),
                ]));
                if let Some(err) = state.error() {
                    lines.push(Line::from(""));
                    lines.push(outcome_line(format!("Error: {}", err), Color::Red));
                }
            }
        }

        f.render_widget(
            Paragraph::new(lines).block(panel("Token Information")),
            chunks[0],
        );
        f.render_widget(
            Paragraph::new(vec![
                Line::from(""),
                help_line("[r/Enter] Refresh token info"),
            ])
            .block(panel("Help")),
            chunks[1],
        );
    }
}

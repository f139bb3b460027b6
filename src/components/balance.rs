//! Balance panel: look up the token balance of an address.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Color,
    text::Line,
    widgets::Paragraph,
};
use tokio::sync::mpsc::UnboundedSender;

use crate::{
    action::Action,
    domain::{
        address::Address,
        error::QueryError,
        query::{BalanceQuery, QueryState},
    },
    tui::Frame,
};

use super::{Component, help_line, input_widget, outcome_line, panel};

pub struct BalanceComponent {
    action_tx: UnboundedSender<Action>,
    wallet: Option<Address>,
    decimals: Option<u8>,
    pub query: BalanceQuery,
    pub is_editing: bool,
}

impl BalanceComponent {
    pub fn new(action_tx: UnboundedSender<Action>) -> Self {
        Self {
            action_tx,
            wallet: None,
            decimals: None,
            query: BalanceQuery::new(),
            is_editing: false,
        }
    }

    pub fn set_wallet_address(&mut self, wallet: Option<Address>) {
        self.wallet = wallet;
    }

    pub fn set_decimals(&mut self, decimals: Option<u8>) {
        self.decimals = decimals;
    }

    /// Start a lookup. Ignored while a lookup is already running.
    pub fn check_balance(&mut self, explicit: Option<&str>) -> Result<()> {
        if self.query.state.is_loading() {
            return Ok(());
        }
        if let Ok(address) = self.query.begin(explicit) {
            self.action_tx.send(Action::FetchBalance(address))?;
        }
        Ok(())
    }

    /// Apply a balance response from the backend.
    pub fn on_balance(&mut self, outcome: Result<String, QueryError>) {
        self.query.finish(outcome, self.decimals);
    }
}

impl Component for BalanceComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        if self.is_editing {
            match key.code {
                KeyCode::Esc => self.is_editing = false,
                KeyCode::Enter => {
                    self.is_editing = false;
                    self.check_balance(None)?;
                }
                KeyCode::Backspace => {
                    self.query.input.pop();
                }
                KeyCode::Char(c) => self.query.input.push(c),
                _ => {}
            }
            return Ok(());
        }

        match key.code {
            KeyCode::Enter => self.check_balance(None)?,
            KeyCode::Char('e') => self.is_editing = true,
            KeyCode::Char('x') => self.query.input.clear(),
            KeyCode::Char('w') => {
                let wallet = self.wallet.as_ref().map(Address::to_string);
                self.check_balance(wallet.as_deref())?;
            }
            _ => {}
        }
        Ok(())
    }

    fn draw(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::vertical([
            Constraint::Length(4), // Address input
            Constraint::Length(5), // Result
            Constraint::Min(0),    // Help
        ])
        .split(area);

        let input = input_widget(
            "Check Balance",
            &self.query.input,
            "Enter address to check balance",
            true,
            self.is_editing,
        );
        f.render_widget(input, chunks[0]);

        let outcome = match &self.query.state {
            QueryState::Idle => help_line("No balance checked yet"),
            QueryState::Loading => outcome_line("Checking...".to_string(), Color::Yellow),
            QueryState::Success(balance) => {
                outcome_line(format!("Balance: {} tokens", balance), Color::Green)
            }
            QueryState::Error(msg) => outcome_line(format!("Error: {}", msg), Color::Red),
        };
        let decimals = match self.decimals {
            Some(d) => outcome_line(format!("Decimals: {}", d), Color::DarkGray),
            None => help_line("Decimals: unknown (showing raw amount)"),
        };
        let result = Paragraph::new(vec![Line::from(""), outcome, decimals]).block(panel("Token Balance"));
        f.render_widget(result, chunks[1]);

        let help = Paragraph::new(vec![
            Line::from(""),
            help_line(if self.is_editing {
                "[Enter] Check balance  [Esc] Stop editing"
            } else {
                "[e] Edit address  [Enter] Check balance  [w] Check connected wallet  [x] Clear"
            }),
        ])
        .block(panel("Help"));
        f.render_widget(help, chunks[2]);
    }

    fn is_editing(&self) -> bool {
        self.is_editing
    }

    fn paste(&mut self, text: &str) {
        if self.is_editing {
            self.query.input.push_str(text.trim());
        }
    }
}

//! Minter actions panel: check the minter role of an address and mint tokens.

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
        query::{MintCommand, MinterRoleQuery, QueryState},
    },
    tui::Frame,
};

use super::{Component, help_line, input_widget, outcome_line, panel};

const ADDRESS_PLACEHOLDER: &str = "Enter address or leave empty for connected wallet";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MinterField {
    Role,
    Mint,
}

pub struct MinterComponent {
    action_tx: UnboundedSender<Action>,
    wallet: Option<Address>,
    pub role: MinterRoleQuery,
    pub mint: MintCommand,
    pub focused_field: MinterField,
    pub is_editing: bool,
}

impl MinterComponent {
    pub fn new(action_tx: UnboundedSender<Action>) -> Self {
        Self {
            action_tx,
            wallet: None,
            role: MinterRoleQuery::new(),
            mint: MintCommand::new(),
            focused_field: MinterField::Role,
            is_editing: false,
        }
    }

    pub fn set_wallet_address(&mut self, wallet: Option<Address>) {
        self.wallet = wallet;
    }

    fn focused_input(&mut self) -> &mut String {
        match self.focused_field {
            MinterField::Role => &mut self.role.input,
            MinterField::Mint => &mut self.mint.input,
        }
    }

    fn toggle_field(&mut self) {
        self.focused_field = match self.focused_field {
            MinterField::Role => MinterField::Mint,
            MinterField::Mint => MinterField::Role,
        };
    }

    /// Start a role check. Ignored while a check is already running.
    pub fn check_role(&mut self, explicit: Option<&str>) -> Result<()> {
        if self.role.state.is_loading() {
            return Ok(());
        }
        if let Ok(address) = self.role.begin(explicit, self.wallet.as_ref()) {
            self.action_tx.send(Action::CheckMinterRole(address))?;
        }
        Ok(())
    }

    /// Start a mint. Ignored while a mint is already running.
    pub fn mint_tokens(&mut self) -> Result<()> {
        if self.mint.state.is_loading() {
            return Ok(());
        }
        if let Ok(address) = self.mint.begin(self.wallet.as_ref()) {
            self.action_tx.send(Action::MintTokens(address))?;
        }
        Ok(())
    }

    fn submit(&mut self) -> Result<()> {
        match self.focused_field {
            MinterField::Role => self.check_role(None),
            MinterField::Mint => self.mint_tokens(),
        }
    }

    pub fn on_role_checked(&mut self, address: Address, outcome: Result<bool, QueryError>) {
        self.role.finish(address, outcome);
    }

    pub fn on_mint_finished(&mut self, outcome: Result<bool, QueryError>) {
        self.mint.finish(outcome);
    }

    fn role_line(&self) -> Line<'static> {
        match &self.role.state {
            QueryState::Idle => help_line("Role not checked"),
            QueryState::Loading => outcome_line("Checking...".to_string(), Color::Yellow),
            QueryState::Success(role) => {
                let color = if role.is_minter { Color::Green } else { Color::Yellow };
                outcome_line(role.describe(), color)
            }
            QueryState::Error(msg) => outcome_line(format!("Error: {}", msg), Color::Red),
        }
    }

    fn mint_line(&self) -> Line<'static> {
        match &self.mint.state {
            QueryState::Idle => help_line("Nothing minted yet"),
            QueryState::Loading => outcome_line("Minting...".to_string(), Color::Yellow),
            QueryState::Success(minted) => {
                let color = if *minted { Color::Green } else { Color::Red };
                outcome_line(MintCommand::describe(*minted).to_string(), color)
            }
            QueryState::Error(msg) => outcome_line(format!("Error: {}", msg), Color::Red),
        }
    }
}

impl Component for MinterComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        if self.is_editing {
            match key.code {
                KeyCode::Esc => self.is_editing = false,
                KeyCode::Enter => {
                    self.is_editing = false;
                    self.submit()?;
                }
                KeyCode::Backspace => {
                    self.focused_input().pop();
                }
                KeyCode::Char(c) => self.focused_input().push(c),
                _ => {}
            }
            return Ok(());
        }

        match key.code {
            KeyCode::Up | KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('k') => {
                self.toggle_field();
            }
            KeyCode::Enter => self.submit()?,
            KeyCode::Char('e') => self.is_editing = true,
            KeyCode::Char('x') => self.focused_input().clear(),
            KeyCode::Char('w') if self.focused_field == MinterField::Role => {
                let wallet = self.wallet.as_ref().map(Address::to_string);
                self.check_role(wallet.as_deref())?;
            }
            _ => {}
        }
        Ok(())
    }

    fn draw(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::vertical([
            Constraint::Length(4), // Role input
            Constraint::Length(3), // Role result
            Constraint::Length(4), // Mint input
            Constraint::Length(3), // Mint result
            Constraint::Min(0),    // Help
        ])
        .split(area);

        let role_focused = self.focused_field == MinterField::Role;
        f.render_widget(
            input_widget(
                "Check Minter Role",
                &self.role.input,
                ADDRESS_PLACEHOLDER,
                role_focused,
                self.is_editing && role_focused,
            ),
            chunks[0],
        );
        f.render_widget(
            Paragraph::new(self.role_line()).block(panel("Role")),
            chunks[1],
        );

        let mint_focused = self.focused_field == MinterField::Mint;
        f.render_widget(
            input_widget(
                "Mint Tokens",
                &self.mint.input,
                ADDRESS_PLACEHOLDER,
                mint_focused,
                self.is_editing && mint_focused,
            ),
            chunks[2],
        );
        f.render_widget(
            Paragraph::new(self.mint_line()).block(panel("Mint")),
            chunks[3],
        );

        let help = if self.is_editing {
            "[Enter] Submit  [Esc] Stop editing"
        } else if role_focused {
            "[j/k] Switch field  [e] Edit  [Enter] Check role  [w] Check connected wallet  [x] Clear"
        } else {
            "[j/k] Switch field  [e] Edit  [Enter] Mint  [x] Clear"
        };
        f.render_widget(
            Paragraph::new(vec![Line::from(""), help_line(help)]).block(panel("Help")),
            chunks[4],
        );
    }

    fn is_editing(&self) -> bool {
        self.is_editing
    }

    fn paste(&mut self, text: &str) {
        if self.is_editing {
            self.focused_input().push_str(text.trim());
        }
    }
}

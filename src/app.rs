use std::future::Future;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

use crate::{
    action::Action,
    cli::Args,
    components::{
        Component, balance::BalanceComponent, minter::MinterComponent,
        token_info::TokenInfoComponent,
    },
    config::Config,
    domain::{
        address::Address,
        wallet::{WalletSession, WalletStatus},
    },
    infra::{api::TokenApi, chain::ChainReader},
    tui::{Event, Frame, Tui},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Minter,
    Balance,
    TokenInfo,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Minter, Tab::Balance, Tab::TokenInfo];

    pub fn title(&self) -> Line<'static> {
        let hotkey = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
        match self {
            Tab::Minter => Line::from(vec![Span::styled("M", hotkey), Span::raw("inter")]),
            Tab::Balance => Line::from(vec![Span::styled("B", hotkey), Span::raw("alance")]),
            Tab::TokenInfo => Line::from(vec![
                Span::raw("Token "),
                Span::styled("I", hotkey),
                Span::raw("nfo"),
            ]),
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Tab::Minter => 0,
            Tab::Balance => 1,
            Tab::TokenInfo => 2,
        }
    }

    pub fn from_index(index: usize) -> Tab {
        Tab::ALL[index % Tab::ALL.len()]
    }

    pub fn next(&self) -> Tab {
        Tab::from_index(self.index() + 1)
    }

    pub fn prev(&self) -> Tab {
        Tab::from_index(self.index() + Tab::ALL.len() - 1)
    }
}

pub struct App {
    pub should_quit: bool,
    pub should_suspend: bool,
    pub config: Config,
    pub active_tab: Tab,
    pub action_tx: UnboundedSender<Action>,
    pub action_rx: UnboundedReceiver<Action>,
    pub tui: Tui,
    pub api: TokenApi,
    pub chain: ChainReader,
    pub token: Address,
    pub wallet: WalletSession,
    pub decimals: Option<u8>,
    pub minter_component: MinterComponent,
    pub balance_component: BalanceComponent,
    pub token_info_component: TokenInfoComponent,
    pub status_message: String,
    pub show_help: bool,
}

impl App {
    pub fn new(config: Config, args: &Args) -> Result<Self> {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let token = config.token_address()?;
        let wallet = WalletSession::new(config.wallet_address()?);
        let api = TokenApi::new(&config.api.base_url);
        let chain = ChainReader::new(&config.chain.rpc_url);

        let tui = Tui::new()?
            .tick_rate(args.tick_rate)
            .frame_rate(args.frame_rate)
            .paste(true);

        Ok(Self {
            should_quit: false,
            should_suspend: false,
            config,
            active_tab: Tab::Minter,
            minter_component: MinterComponent::new(action_tx.clone()),
            balance_component: BalanceComponent::new(action_tx.clone()),
            token_info_component: TokenInfoComponent::new(action_tx.clone()),
            action_tx,
            action_rx,
            tui,
            api,
            chain,
            token,
            wallet,
            decimals: None,
            status_message: "Ready".to_string(),
            show_help: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        self.tui.enter()?;

        info!(
            "Backend {}, RPC {}, token {}",
            self.api.base_url(),
            self.chain.rpc_url(),
            self.token
        );

        // One-shot decimals read; balances show raw amounts until it lands.
        let chain = self.chain.clone();
        let token = self.token.clone();
        self.spawn_request(async move {
            match chain.decimals(&token).await {
                Ok(decimals) => Action::DecimalsLoaded(Some(decimals)),
                Err(e) => {
                    warn!("Failed to read decimals: {}", e);
                    Action::DecimalsLoaded(None)
                }
            }
        });
        self.action_tx.send(Action::ConnectWallet)?;

        loop {
            if let Some(event) = self.tui.next().await {
                self.handle_event(event)?;
            }

            while let Ok(action) = self.action_rx.try_recv() {
                self.handle_action(action)?;
            }

            if self.should_suspend {
                self.tui.suspend()?;
                self.should_suspend = false;
                self.tui.resume()?;
            }

            if self.should_quit {
                break;
            }
        }

        self.tui.exit()?;
        Ok(())
    }

    /// Run a request in the background and feed its result back as an action.
    ///
    /// Requests are never cancelled; whichever finishes last wins.
    fn spawn_request<F>(&self, request: F)
    where
        F: Future<Output = Action> + Send + 'static,
    {
        let action_tx = self.action_tx.clone();
        tokio::spawn(async move {
            let action = request.await;
            if action_tx.send(action).is_err() {
                debug!("App closed before request completed");
            }
        });
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        match event {
            Event::Init => info!("Application initialized"),
            Event::Tick => {}
            Event::Render => self.draw_ui()?,
            Event::Key(key) => self.handle_key_event(key)?,
            Event::Paste(text) => self.active_component().paste(&text),
            Event::Resize(w, h) => self.action_tx.send(Action::Resize(w, h))?,
            Event::Error => {
                self.action_tx
                    .send(Action::Error("Terminal event error".to_string()))?;
            }
        }
        Ok(())
    }

    fn active_component(&mut self) -> &mut dyn Component {
        match self.active_tab {
            Tab::Minter => &mut self.minter_component,
            Tab::Balance => &mut self.balance_component,
            Tab::TokenInfo => &mut self.token_info_component,
        }
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.action_tx.send(Action::Quit)?;
            return Ok(());
        }

        if self.active_component().is_editing() {
            return self.active_component().handle_key_event(key);
        }

        match key.code {
            KeyCode::Char('q') if key.modifiers.is_empty() => {
                self.action_tx.send(Action::Quit)?;
            }
            KeyCode::Char('z') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.action_tx.send(Action::Suspend)?;
            }
            KeyCode::Char('?') => {
                self.action_tx.send(Action::Help)?;
            }
            KeyCode::Char('m') if key.modifiers.is_empty() => {
                self.action_tx.send(Action::TabMinter)?;
            }
            KeyCode::Char('b') if key.modifiers.is_empty() => {
                self.action_tx.send(Action::TabBalance)?;
            }
            KeyCode::Char('i') if key.modifiers.is_empty() => {
                self.action_tx.send(Action::TabTokenInfo)?;
            }
            KeyCode::Char('c') if key.modifiers.is_empty() => {
                self.action_tx.send(Action::ConnectWallet)?;
            }
            KeyCode::Char('d') if key.modifiers.is_empty() => {
                self.action_tx.send(Action::DisconnectWallet)?;
            }
            KeyCode::Tab => self.active_tab = self.active_tab.next(),
            KeyCode::BackTab => self.active_tab = self.active_tab.prev(),
            _ => self.active_component().handle_key_event(key)?,
        }
        Ok(())
    }

    fn handle_action(&mut self, action: Action) -> Result<()> {
        debug!("Handling action: {}", action);
        match action {
            Action::Quit => self.should_quit = true,
            Action::Suspend => self.should_suspend = true,
            Action::Resize(w, h) => {
                self.tui.resize(Rect::new(0, 0, w, h))?;
                self.draw_ui()?;
            }
            Action::Error(msg) => {
                warn!("{}", msg);
                self.status_message = msg;
            }
            Action::Help => self.show_help = !self.show_help,
            Action::TabMinter => self.active_tab = Tab::Minter,
            Action::TabBalance => self.active_tab = Tab::Balance,
            Action::TabTokenInfo => self.active_tab = Tab::TokenInfo,

            Action::ConnectWallet => {
                if self.wallet.is_connecting() {
                    return Ok(());
                }
                self.wallet.begin_connect();
                self.set_wallet_address();
                let chain = self.chain.clone();
                self.spawn_request(async move {
                    Action::WalletConnected(chain.chain_id().await.map_err(|e| e.to_string()))
                });
            }
            Action::DisconnectWallet => {
                self.wallet.disconnect();
                self.set_wallet_address();
                self.status_message = "Wallet disconnected".to_string();
            }
            Action::WalletConnected(result) => {
                let message = match &result {
                    Ok(chain_id) => format!("Connected to chain {}", chain_id),
                    Err(e) => format!("Wallet connection failed: {}", e),
                };
                if !self.wallet.finish_connect(result) {
                    debug!("Dropping stale connection result: {}", message);
                    return Ok(());
                }
                info!("{}", message);
                self.status_message = message;
                self.set_wallet_address();
            }

            Action::FetchBalance(address) => {
                let api = self.api.clone();
                self.spawn_request(async move {
                    Action::BalanceFetched(api.token_balance(&address).await)
                });
            }
            Action::CheckMinterRole(address) => {
                let api = self.api.clone();
                self.spawn_request(async move {
                    let outcome = api.check_minter_role(&address).await;
                    Action::MinterRoleChecked(address, outcome)
                });
            }
            Action::MintTokens(address) => {
                info!("Minting tokens to {}", address);
                let api = self.api.clone();
                self.spawn_request(async move {
                    Action::MintFinished(api.mint_tokens(&address).await)
                });
            }
            Action::RefreshTokenInfo => {
                let api = self.api.clone();
                self.spawn_request(async move { Action::TokenInfoFetched(api.token_info().await) });
            }

            Action::DecimalsLoaded(decimals) => {
                if let Some(d) = decimals {
                    info!("Token decimals: {}", d);
                }
                self.decimals = decimals;
                self.balance_component.set_decimals(decimals);
            }
            Action::BalanceFetched(outcome) => {
                if let Err(ref e) = outcome {
                    debug!("Balance request failed: {}", e);
                }
                self.balance_component.on_balance(outcome);
            }
            Action::MinterRoleChecked(address, outcome) => {
                self.minter_component.on_role_checked(address, outcome);
            }
            Action::MintFinished(outcome) => {
                match &outcome {
                    Ok(minted) => info!("Mint finished, backend reported success={}", minted),
                    Err(e) => info!("Mint failed: {}", e),
                }
                self.minter_component.on_mint_finished(outcome);
            }
            Action::TokenInfoFetched(outcome) => {
                self.token_info_component.on_token_info(outcome);
            }
        }
        Ok(())
    }

    /// Hand the wallet's current address to every panel.
    fn set_wallet_address(&mut self) {
        let address = self.wallet.address().cloned();
        self.minter_component.set_wallet_address(address.clone());
        self.balance_component.set_wallet_address(address);
    }

    fn draw_ui(&mut self) -> Result<()> {
        let header = header_line(&self.config, self.wallet.status(), self.wallet.chain_id());
        let status = status_line(&self.status_message, self.decimals, self.show_help);
        let active_tab = self.active_tab;

        let Self {
            tui,
            minter_component,
            balance_component,
            token_info_component,
            ..
        } = self;

        tui.draw(|f| {
            let chunks = Layout::vertical([
                Constraint::Length(3), // Header
                Constraint::Length(3), // Tabs
                Constraint::Min(0),    // Content
                Constraint::Length(3), // Status
            ])
            .split(f.area());

            f.render_widget(Paragraph::new(header).block(bordered()), chunks[0]);
            draw_tabs(f, chunks[1], active_tab);
            match active_tab {
                Tab::Minter => minter_component.draw(f, chunks[2]),
                Tab::Balance => balance_component.draw(f, chunks[2]),
                Tab::TokenInfo => token_info_component.draw(f, chunks[2]),
            }
            f.render_widget(Paragraph::new(status).block(bordered()), chunks[3]);
        })?;
        Ok(())
    }
}

fn bordered() -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
}

fn header_line(config: &Config, wallet: &WalletStatus, chain_id: Option<u64>) -> Line<'static> {
    let wallet_color = match wallet {
        WalletStatus::Connected(_) => Color::Green,
        WalletStatus::Connecting => Color::Yellow,
        WalletStatus::Disconnected | WalletStatus::NoAddress => Color::Red,
    };
    let mut spans = vec![
        Span::styled(
            "Token Interface",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            format!("[{}]", config.api.base_url),
            Style::default().fg(Color::Yellow),
        ),
        Span::raw("  "),
        Span::styled(wallet.describe(), Style::default().fg(wallet_color)),
    ];
    if let Some(id) = chain_id {
        spans.push(Span::styled(
            format!("  (chain {})", id),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

fn status_line(message: &str, decimals: Option<u8>, show_help: bool) -> Line<'static> {
    let decimals = decimals
        .map(|d| format!("Decimals: {}", d))
        .unwrap_or_else(|| "Decimals: -".to_string());
    let keys = if show_help {
        "[m]inter [b]alance [i]nfo [Tab]Switch [c]onnect [d]isconnect [Ctrl+z]Suspend [q]Quit"
    } else {
        "[c]onnect [d]isconnect [q]Quit [?]Help"
    };
    Line::from(vec![
        Span::styled("Status: ", Style::default().fg(Color::DarkGray)),
        Span::styled(message.to_string(), Style::default().fg(Color::Green)),
        Span::raw("  |  "),
        Span::styled(decimals, Style::default().fg(Color::Yellow)),
        Span::raw("  |  "),
        Span::styled(keys, Style::default().fg(Color::DarkGray)),
    ])
}

fn draw_tabs(f: &mut Frame, area: Rect, active_tab: Tab) {
    let titles: Vec<Line> = Tab::ALL.iter().map(|t| t.title()).collect();
    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL))
        .select(active_tab.index())
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(tabs, area);
}

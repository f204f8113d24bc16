use std::cell::RefCell;

use chrono::{DateTime, Utc};
use devkit::captcha::{CaptchaConfig, TurnstileClient};
use devkit::input::{RealTerminal, TerminalIO};
use devkit::SignalDispatcher;

use crate::user::User;

/// Signal emitted after `users create` stored a user.
pub const USER_CREATED: &str = "user-created";

/// State shared by every demo action.
pub struct DemoContext {
    users: RefCell<Vec<User>>,
    signals: SignalDispatcher<User>,
    terminal: Box<dyn TerminalIO>,
    captcha: CaptchaConfig,
    turnstile: TurnstileClient,
    clock: fn() -> DateTime<Utc>,
}

impl Default for DemoContext {
    fn default() -> Self {
        Self::new(CaptchaConfig::default())
    }
}

impl DemoContext {
    /// A context with two seeded users, prompting on the real terminal.
    pub fn new(captcha: CaptchaConfig) -> Self {
        Self {
            users: RefCell::new(vec![
                User::new(1, "Ada", "ada@example.com", 36),
                User::new(2, "Max", "max@example.com", 29),
            ]),
            signals: SignalDispatcher::new(),
            terminal: Box::new(RealTerminal),
            captcha,
            turnstile: TurnstileClient::new(),
            clock: Utc::now,
        }
    }

    pub fn with_terminal(mut self, terminal: impl TerminalIO + 'static) -> Self {
        self.terminal = Box::new(terminal);
        self
    }

    pub fn with_turnstile(mut self, client: TurnstileClient) -> Self {
        self.turnstile = client;
        self
    }

    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    pub fn signals(&self) -> &SignalDispatcher<User> {
        &self.signals
    }

    pub fn users(&self) -> Vec<User> {
        self.users.borrow().clone()
    }

    pub(crate) fn terminal(&self) -> &dyn TerminalIO {
        self.terminal.as_ref()
    }

    pub(crate) fn captcha(&self) -> &CaptchaConfig {
        &self.captcha
    }

    pub(crate) fn turnstile(&self) -> &TurnstileClient {
        &self.turnstile
    }

    pub(crate) fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    /// Stores `user` under the next free id and returns the stored copy.
    pub(crate) fn insert_user(&self, mut user: User) -> User {
        let mut users = self.users.borrow_mut();
        user.id = users.iter().map(|u| u.id).max().unwrap_or(0) + 1;
        users.push(user.clone());
        user
    }
}

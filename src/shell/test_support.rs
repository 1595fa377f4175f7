//! Shared fixture for command tests.

use serde_json::Value;
use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use crate::api::ApiClient;
use crate::api::transport::mock::MockTransport;
use crate::credentials::PasswordRecord;
use crate::generator::GeneratorPanel;
use crate::session::{Session, User};
use crate::shell::command::{Command, CommandRegistry, CommandResult, SecretPrompt, ShellContext, ShellState};
use crate::shell::commands::register_all;
use crate::trie::Trie;

/// Answers prompts from a fixed list and remembers what was asked.
#[derive(Default)]
pub struct ScriptedPrompt {
    pub answers: RefCell<Vec<String>>,
    pub asked: RefCell<Vec<String>>,
}

impl SecretPrompt for ScriptedPrompt {
    fn read_secret(&self, label: &str) -> io::Result<String> {
        self.asked.borrow_mut().push(label.to_string());
        let mut answers = self.answers.borrow_mut();
        if answers.is_empty() {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "no scripted answer"));
        }
        Ok(answers.remove(0))
    }
}

pub struct Fixture {
    pub transport: Rc<MockTransport>,
    pub client: ApiClient,
    pub state: ShellState,
    pub index: Trie,
    pub registry: CommandRegistry,
    pub prompt: ScriptedPrompt,
    /// Whether the last run changed the session.
    pub session_changed: bool,
}

pub fn user() -> User {
    User {
        id: 5,
        email: "ada@example.com".to_string(),
        name: "Ada".to_string(),
    }
}

pub fn record(id: u64, platform: &str, email: &str, password: &str) -> PasswordRecord {
    PasswordRecord {
        id,
        platform: platform.to_string(),
        email: email.to_string(),
        password: password.to_string(),
        created_at: None,
    }
}

impl Fixture {
    pub fn new(responses: Vec<Value>) -> Self {
        let transport = Rc::new(MockTransport::with_responses(responses));
        let client = ApiClient::new(Box::new(Rc::clone(&transport)), "lock123");
        let mut registry = CommandRegistry::new();
        register_all(&mut registry);
        Self {
            transport,
            client,
            state: ShellState::new(Session::in_memory(), GeneratorPanel::default()),
            index: Trie::new(),
            registry,
            prompt: ScriptedPrompt::default(),
            session_changed: false,
        }
    }

    pub fn signed_in(responses: Vec<Value>) -> Self {
        let mut fx = Self::new(responses);
        fx.state.session.establish(user());
        fx
    }

    pub fn with_records(mut self, records: Vec<PasswordRecord>) -> Self {
        self.state.vault.replace_all(records);
        self.index.rebuild(self.state.vault.platforms());
        self
    }

    pub fn answer(&self, secret: &str) {
        self.prompt.answers.borrow_mut().push(secret.to_string());
    }

    pub fn run(&mut self, cmd: &dyn Command, args: &[&str]) -> CommandResult {
        let mut ctx = ShellContext::new(&self.client, &mut self.state, &mut self.index)
            .with_registry(&self.registry)
            .with_prompt(&self.prompt);
        let result = cmd.execute(args, &mut ctx);
        self.session_changed = ctx.session_changed;
        result
    }

    /// Runs through the registry, argument checks included.
    pub fn dispatch(&mut self, name: &str, args: &[&str]) -> CommandResult {
        let mut ctx = ShellContext::new(&self.client, &mut self.state, &mut self.index)
            .with_registry(&self.registry)
            .with_prompt(&self.prompt);
        let result = self.registry.dispatch(name, args, &mut ctx);
        self.session_changed = ctx.session_changed;
        result
    }

    pub fn requests(&self) -> Vec<Value> {
        self.transport.requests.borrow().clone()
    }
}

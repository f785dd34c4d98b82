//! Scripted collaborators for driving the request pipeline without a browser.
#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use async_trait::async_trait;
use futures::channel::oneshot;
use futures::executor::LocalPool;
use scheduler_console::config::ClientConfig;
use scheduler_console::net::client::{ApiClient, UiHooks};
use scheduler_console::net::error::TransportError;
use scheduler_console::net::transport::{HttpRequest, HttpResponse, Transport};
use scheduler_console::state::session::SessionStore;
use scheduler_console::util::feedback::{ConfirmPrompt, NoticeLevel, Notifier, Prompter};
use scheduler_console::util::navigation::Navigator;
use scheduler_console::util::token_storage::{MemoryTokenStorage, TokenStorage};
use serde_json::Value;

pub enum Reply {
    Now(Result<HttpResponse, TransportError>),
    /// Resolves when the paired sender fires.
    Deferred(oneshot::Receiver<Result<HttpResponse, TransportError>>),
    /// Never resolves.
    Hang,
}

pub fn envelope(status: u16, body: Value) -> Reply {
    Reply::Now(Ok(HttpResponse { status, body: body.to_string() }))
}

pub fn failure(err: TransportError) -> Reply {
    Reply::Now(Err(err))
}

#[derive(Default)]
pub struct ScriptedTransport {
    replies: RefCell<VecDeque<Reply>>,
    pub sent: RefCell<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn push(&self, reply: Reply) {
        self.replies.borrow_mut().push_back(reply);
    }

    pub fn sent_urls(&self) -> Vec<String> {
        self.sent.borrow().iter().map(|r| r.url.clone()).collect()
    }
}

#[async_trait(?Send)]
impl Transport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.sent.borrow_mut().push(request);
        let reply = self.replies.borrow_mut().pop_front();
        match reply {
            Some(Reply::Now(result)) => result,
            Some(Reply::Deferred(rx)) => rx.await.unwrap_or(Err(TransportError::Other("sender dropped".to_owned()))),
            Some(Reply::Hang) => futures::future::pending().await,
            None => Err(TransportError::Other("unscripted request".to_owned())),
        }
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub notices: RefCell<Vec<(NoticeLevel, String)>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.notices.borrow().iter().map(|(_, m)| m.clone()).collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, level: NoticeLevel, message: &str) {
        self.notices.borrow_mut().push((level, message.to_owned()));
    }
}

pub struct ScriptedPrompter {
    pub answer: Cell<bool>,
    pub asked: Cell<usize>,
}

#[async_trait(?Send)]
impl Prompter for ScriptedPrompter {
    async fn confirm(&self, prompt: &ConfirmPrompt) -> bool {
        assert_eq!(*prompt, ConfirmPrompt::session_expired());
        self.asked.set(self.asked.get() + 1);
        self.answer.get()
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    pub paths: RefCell<Vec<String>>,
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str) {
        self.paths.borrow_mut().push(path.to_owned());
    }
}

pub struct Harness {
    pub pool: LocalPool,
    pub client: ApiClient,
    pub session: SessionStore,
    pub storage: Rc<MemoryTokenStorage>,
    pub transport: Rc<ScriptedTransport>,
    pub notifier: Rc<RecordingNotifier>,
    pub prompter: Rc<ScriptedPrompter>,
    pub navigator: Rc<RecordingNavigator>,
}

impl Harness {
    /// A harness whose storage already holds `token`, if any.
    pub fn new(token: Option<&str>) -> Self {
        let pool = LocalPool::new();
        let storage = Rc::new(token.map(MemoryTokenStorage::with_token).unwrap_or_default());
        let dyn_storage: Rc<dyn TokenStorage> = storage.clone();
        let session = SessionStore::restore(dyn_storage);
        let transport = Rc::new(ScriptedTransport::default());
        let notifier = Rc::new(RecordingNotifier::default());
        let prompter = Rc::new(ScriptedPrompter { answer: Cell::new(false), asked: Cell::new(0) });
        let navigator = Rc::new(RecordingNavigator::default());
        let hooks = UiHooks {
            notifier: notifier.clone(),
            prompter: prompter.clone(),
            navigator: navigator.clone(),
            spawner: Rc::new(pool.spawner()),
        };
        let client = ApiClient::new(ClientConfig::default(), session.clone(), transport.clone(), hooks);
        Self { pool, client, session, storage, transport, notifier, prompter, navigator }
    }

    pub fn answer_prompt(&self, answer: bool) {
        self.prompter.answer.set(answer);
    }

    pub fn token(&self) -> Option<String> {
        self.session.snapshot().token().map(str::to_owned)
    }
}

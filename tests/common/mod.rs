#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use futures::channel::oneshot;
use futures::executor::{LocalPool, LocalSpawner};
use futures::future::LocalBoxFuture;
use futures::task::LocalSpawnExt;
use serde_json::{Value, json};

use marquee::pages::MountedPage;
use marquee::{
    AlertSurface, AppConfig, DataService, Executor, MarqueeError, MarqueeResult, MovieApi,
    NavigationHost, PageAction, PageKind, PageView, RouteTable, Router, Services, Session,
};

// =========================================================
// MockHost: 内存中的地址栏与历史栈
// =========================================================

pub struct MockHost {
    history: RefCell<Vec<String>>,
    index: Cell<usize>,
    popstate: RefCell<Option<Rc<dyn Fn()>>>,
    links: RefCell<Option<Rc<dyn Fn(String)>>>,
    pub view_transitions: Cell<bool>,
    pub transitions_run: Cell<usize>,
    pub mounted: RefCell<Vec<MountedPage>>,
}

impl MockHost {
    pub fn new(location: &str) -> Self {
        Self {
            history: RefCell::new(vec![location.to_string()]),
            index: Cell::new(0),
            popstate: RefCell::new(None),
            links: RefCell::new(None),
            view_transitions: Cell::new(false),
            transitions_run: Cell::new(0),
            mounted: RefCell::new(Vec::new()),
        }
    }

    pub fn history_len(&self) -> usize {
        self.history.borrow().len()
    }

    pub fn history(&self) -> Vec<String> {
        self.history.borrow().clone()
    }

    /// 模拟浏览器后退按钮
    pub fn back(&self) {
        let index = self.index.get();
        assert!(index > 0, "no history entry to go back to");
        self.index.set(index - 1);
        self.fire_popstate();
    }

    pub fn forward(&self) {
        let index = self.index.get();
        assert!(index + 1 < self.history_len(), "no forward entry");
        self.index.set(index + 1);
        self.fire_popstate();
    }

    fn fire_popstate(&self) {
        let handler = self.popstate.borrow().clone();
        if let Some(handler) = handler {
            handler();
        }
    }

    /// 模拟点击被接管的站内链接
    pub fn click_link(&self, href: &str) {
        let handler = self.links.borrow().clone();
        let handler = handler.expect("links were not intercepted");
        handler(href.to_string());
    }

    pub fn has_popstate_listener(&self) -> bool {
        self.popstate.borrow().is_some()
    }
}

impl NavigationHost for MockHost {
    fn location(&self) -> String {
        self.history.borrow()[self.index.get()].clone()
    }

    fn push_history(&self, path: &str) {
        let mut history = self.history.borrow_mut();
        let next = self.index.get() + 1;
        history.truncate(next);
        history.push(path.to_string());
        self.index.set(next);
    }

    fn replace_history(&self, path: &str) {
        self.history.borrow_mut()[self.index.get()] = path.to_string();
    }

    fn on_popstate(&self, handler: Rc<dyn Fn()>) {
        self.popstate.replace(Some(handler));
    }

    fn intercept_links(&self, handler: Rc<dyn Fn(String)>) {
        self.links.replace(Some(handler));
    }

    fn supports_view_transition(&self) -> bool {
        self.view_transitions.get()
    }

    fn run_view_transition(&self, update: Box<dyn FnOnce()>) {
        self.transitions_run.set(self.transitions_run.get() + 1);
        update();
    }

    fn replace_content(&self, page: MountedPage) {
        self.mounted.borrow_mut().push(page);
    }
}

// =========================================================
// MockData: 记录调用，可延迟响应
// =========================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub resource: String,
    pub query: Vec<(String, String)>,
    pub payload: Option<Value>,
}

#[derive(Default)]
pub struct MockData {
    responses: RefCell<HashMap<String, Value>>,
    failures: RefCell<HashMap<String, u16>>,
    deferred: RefCell<HashMap<String, oneshot::Receiver<Value>>>,
    pub calls: RefCell<Vec<Call>>,
}

impl MockData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, resource: &str, body: Value) {
        self.responses
            .borrow_mut()
            .insert(resource.to_string(), body);
    }

    pub fn fail(&self, resource: &str, status: u16) {
        self.failures
            .borrow_mut()
            .insert(resource.to_string(), status);
    }

    /// 下一次请求挂起，直到发送端给出响应
    pub fn defer(&self, resource: &str) -> oneshot::Sender<Value> {
        let (tx, rx) = oneshot::channel();
        self.deferred.borrow_mut().insert(resource.to_string(), rx);
        tx
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    pub fn calls_to(&self, resource: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.resource == resource)
            .count()
    }

    async fn answer(&self, resource: &str) -> MarqueeResult<Value> {
        let deferred = self.deferred.borrow_mut().remove(resource);
        if let Some(rx) = deferred {
            return rx
                .await
                .map_err(|_| MarqueeError::network("response dropped"));
        }
        if let Some(status) = self.failures.borrow().get(resource) {
            return Err(MarqueeError::http_status(
                *status,
                format!("request failed with status {}", status),
            ));
        }
        self.responses
            .borrow()
            .get(resource)
            .cloned()
            .ok_or_else(|| MarqueeError::http_status(404, "Not Found"))
    }
}

#[async_trait(?Send)]
impl DataService for MockData {
    async fn fetch(&self, resource: &str, query: &[(String, String)]) -> MarqueeResult<Value> {
        self.calls.borrow_mut().push(Call {
            resource: resource.to_string(),
            query: query.to_vec(),
            payload: None,
        });
        self.answer(resource).await
    }

    async fn send(&self, resource: &str, payload: Value) -> MarqueeResult<Value> {
        self.calls.borrow_mut().push(Call {
            resource: resource.to_string(),
            query: Vec::new(),
            payload: Some(payload),
        });
        self.answer(resource).await
    }
}

// =========================================================
// MockAlerts / PoolExecutor
// =========================================================

#[derive(Default)]
pub struct MockAlerts {
    pub shown: RefCell<Vec<String>>,
    pub open: Cell<bool>,
}

impl AlertSurface for MockAlerts {
    fn show(&self, message: &str) {
        self.shown.borrow_mut().push(message.to_string());
        self.open.set(true);
    }

    fn close(&self) {
        self.open.set(false);
    }
}

pub struct PoolExecutor {
    spawner: LocalSpawner,
    pub sleeps: RefCell<Vec<Duration>>,
    held: RefCell<Option<oneshot::Receiver<()>>>,
}

impl PoolExecutor {
    /// 下一次计时挂起，直到发送端放行
    pub fn hold_next_sleep(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.held.replace(Some(rx));
        tx
    }
}

impl Executor for PoolExecutor {
    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>) {
        self.spawner
            .spawn_local(task)
            .expect("local pool shut down");
    }

    // 计时立即结束，只记录时长
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        self.sleeps.borrow_mut().push(duration);
        match self.held.borrow_mut().take() {
            Some(rx) => Box::pin(async move {
                let _ = rx.await;
            }),
            None => Box::pin(async {}),
        }
    }
}

// =========================================================
// Harness
// =========================================================

pub struct Harness {
    pool: LocalPool,
    pub router: Router,
    pub host: Rc<MockHost>,
    pub data: Rc<MockData>,
    pub alerts: Rc<MockAlerts>,
    pub executor: Rc<PoolExecutor>,
    pub session: Session,
}

impl Harness {
    pub fn new(location: &str) -> Self {
        Self::with_session(location, Session::in_memory())
    }

    pub fn logged_in(location: &str) -> Self {
        let session = Session::in_memory();
        session.set_token("test-jwt");
        Self::with_session(location, session)
    }

    pub fn with_session(location: &str, session: Session) -> Self {
        Self::build(location, session, AppConfig::default())
    }

    pub fn with_config(location: &str, config: AppConfig) -> Self {
        Self::build(location, Session::in_memory(), config)
    }

    fn build(location: &str, session: Session, config: AppConfig) -> Self {
        let pool = LocalPool::new();
        let host = Rc::new(MockHost::new(location));
        let data = Rc::new(MockData::new());
        let alerts = Rc::new(MockAlerts::default());
        let executor = Rc::new(PoolExecutor {
            spawner: pool.spawner(),
            sleeps: RefCell::new(Vec::new()),
            held: RefCell::new(None),
        });

        let services = Services {
            api: MovieApi::new(data.clone()),
            session: session.clone(),
            config: Rc::new(config),
            executor: executor.clone(),
            alerts: alerts.clone(),
        };
        let router = Router::new(RouteTable::movies().unwrap(), host.clone(), services).unwrap();

        Self {
            pool,
            router,
            host,
            data,
            alerts,
            executor,
            session,
        }
    }

    /// 运行所有就绪任务
    pub fn settle(&mut self) {
        self.pool.run_until_stalled();
    }

    pub fn kind(&self) -> PageKind {
        self.router.current_route().unwrap().target
    }

    pub fn view(&self) -> PageView {
        self.router.current_page().unwrap().surface.snapshot()
    }

    pub fn dispatch(&self, action: PageAction) {
        self.router.current_page().unwrap().dispatch(action);
    }
}

pub fn movie(id: i64, title: &str) -> Value {
    json!({
        "id": id,
        "tmdb_id": id * 100,
        "title": title,
        "release_year": 1999,
        "genres": [{"id": 1, "name": "Drama"}],
        "overview": "An overview.",
    })
}

pub fn movies(count: i64) -> Value {
    Value::Array((1..=count).map(|i| movie(i, &format!("Movie {}", i))).collect())
}

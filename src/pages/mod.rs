//! 页面单元模块
//!
//! 每次导航都创建一个新的页面单元，生命周期为：
//! 挂载 -> 拉取远端数据 -> 渲染 -> 绑定交互 -> 被下一次导航替换。
//!
//! 页面只通过 `PageContext` 与外界交互：数据服务、会话、导航句柄和错误弹窗。
//! 所有异步回调在写入前都要检查挂载令牌，过期的结果直接丢弃。

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::rc::Rc;

use marquee_shared::{Collection, Movie};

use crate::error::{MarqueeError, MarqueeResult};
use crate::forms::{LoginForm, RegisterForm};
use crate::query::MovieQuery;
use crate::route::{PageKind, ResolvedRoute};
use crate::router::{Navigator, Services};

mod account;
mod catalog;

pub use account::{AccountPage, CollectionPage, LoginPage, RegisterPage};
pub use catalog::{HomePage, MovieDetailsPage, MovieListPage, PAGE_SIZE};

// =========================================================
// 视图模型
// =========================================================

/// 电影列表页的渲染数据
#[derive(Debug, Clone, PartialEq)]
pub struct MovieListView {
    pub query: MovieQuery,
    /// 当前页的条目
    pub movies: Vec<Movie>,
    pub total: usize,
    pub page_count: u32,
}

/// 页面渲染出的内容
#[derive(Debug, Clone, PartialEq)]
pub enum PageView {
    /// 数据加载中的过渡状态
    Loading,
    Home { movies: Vec<Movie> },
    MovieList(MovieListView),
    MovieDetails(Movie),
    Register { submitting: bool },
    Login { submitting: bool },
    Account,
    Collection {
        collection: Collection,
        movies: Vec<Movie>,
    },
    NotFound,
    /// 加载失败后的兜底视图
    Failed { message: String },
}

/// 页面上的交互
#[derive(Debug, Clone, PartialEq)]
pub enum PageAction {
    ChangeOrder(String),
    ChangeGenre(String),
    GoToPage(u32),
    SaveToCollection(Collection),
    SubmitLogin(LoginForm),
    SubmitRegister(RegisterForm),
}

// =========================================================
// 页面内容区
// =========================================================

type Observer = Rc<dyn Fn(&PageView)>;

/// 页面独占的内容子树
///
/// 由路由在挂载时创建并交给页面；页面被替换后即分离，之后的渲染被忽略。
pub struct PageSurface {
    view: RefCell<PageView>,
    detached: Cell<bool>,
    renders: Cell<usize>,
    observer: RefCell<Option<Observer>>,
}

impl PageSurface {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            view: RefCell::new(PageView::Loading),
            detached: Cell::new(false),
            renders: Cell::new(0),
            observer: RefCell::new(None),
        })
    }

    pub fn render(&self, view: PageView) {
        if self.detached.get() {
            crate::log_warn!("[Page] render on detached surface ignored");
            return;
        }
        self.view.replace(view);
        self.renders.set(self.renders.get() + 1);

        let observer = self.observer.borrow().clone();
        if let Some(observer) = observer {
            observer(&self.view.borrow());
        }
    }

    /// 当前内容的拷贝
    pub fn snapshot(&self) -> PageView {
        self.view.borrow().clone()
    }

    /// 渲染次数（含加载态）
    pub fn render_count(&self) -> usize {
        self.renders.get()
    }

    /// 宿主订阅内容变化，立即以当前内容回调一次
    pub fn observe(&self, observer: impl Fn(&PageView) + 'static) {
        let observer: Observer = Rc::new(observer);
        observer(&self.view.borrow());
        self.observer.replace(Some(observer));
    }

    pub fn is_detached(&self) -> bool {
        self.detached.get()
    }

    pub(crate) fn detach(&self) {
        self.detached.set(true);
        self.observer.replace(None);
    }
}

// =========================================================
// 挂载令牌
// =========================================================

/// 挂载时捕获的代次
///
/// 路由每挂载一次页面代次加一，只有最新挂载的页面令牌有效。
#[derive(Clone)]
pub struct MountToken {
    generation: u64,
    current: Rc<Cell<u64>>,
}

impl MountToken {
    pub(crate) fn new(generation: u64, current: Rc<Cell<u64>>) -> Self {
        Self {
            generation,
            current,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_current(&self) -> bool {
        self.current.get() == self.generation
    }
}

// =========================================================
// 页面上下文
// =========================================================

/// 页面能接触到的全部外部能力
#[derive(Clone)]
pub struct PageContext {
    pub services: Services,
    pub navigator: Navigator,
    pub surface: Rc<PageSurface>,
    pub token: MountToken,
    /// 挂载时的完整地址（路径 + 查询串）
    pub location: String,
}

impl PageContext {
    /// 令牌仍有效时渲染，返回是否写入
    pub fn render(&self, view: PageView) -> bool {
        if !self.token.is_current() {
            crate::log_debug!(
                "[Page] stale render dropped (generation {})",
                self.token.generation()
            );
            return false;
        }
        self.surface.render(view);
        true
    }

    pub fn is_current(&self) -> bool {
        self.token.is_current()
    }

    pub fn spawn(&self, task: impl Future<Output = ()> + 'static) {
        self.services.executor.spawn_local(Box::pin(task));
    }

    pub fn navigate(&self, path: &str) {
        self.navigator.navigate(path);
    }

    /// 在共享弹窗中显示消息，`go_home` 时随后回到首页
    pub fn show_error(&self, message: &str, go_home: bool) {
        self.services.alerts.show(message);
        if go_home {
            self.navigator.navigate(&self.services.config.home_path);
        }
    }

    pub fn close_alert(&self) {
        self.services.alerts.close();
    }

    /// 拉取一次远端数据并处理结果
    ///
    /// 结果到达时若页面已被替换则直接丢弃；失败默认弹窗并渲染兜底视图。
    pub fn load<T, F, R>(&self, op: &'static str, fetch: F, on_ready: R)
    where
        T: 'static,
        F: Future<Output = MarqueeResult<T>> + 'static,
        R: FnOnce(&PageContext, T) + 'static,
    {
        self.load_or_else(op, fetch, on_ready, |ctx, err| ctx.fail(err));
    }

    pub fn load_or_else<T, F, R, E>(&self, op: &'static str, fetch: F, on_ready: R, on_error: E)
    where
        T: 'static,
        F: Future<Output = MarqueeResult<T>> + 'static,
        R: FnOnce(&PageContext, T) + 'static,
        E: FnOnce(&PageContext, MarqueeError) + 'static,
    {
        self.render(PageView::Loading);
        let ctx = self.clone();
        self.spawn(async move {
            let result = fetch.await;
            if !ctx.is_current() {
                crate::log_debug!("[Page] {} finished after navigation, result discarded", op);
                return;
            }
            match result {
                Ok(data) => on_ready(&ctx, data),
                Err(e) => on_error(&ctx, e.in_op(op)),
            }
        });
    }

    /// 标准失败处理：记录、弹窗、渲染兜底视图
    pub fn fail(&self, err: MarqueeError) {
        crate::log_error!("[Page] {}", err);
        let message = format!("Something went wrong: {}", err.message());
        self.show_error(&message, false);
        self.render(PageView::Failed { message });
    }
}

// =========================================================
// 页面单元接口
// =========================================================

/// 页面单元的能力集合
pub trait PageUnit {
    fn kind(&self) -> PageKind;

    /// 接收路由捕获参数，只有需要参数的页面关心
    fn attach_params(&mut self, _params: Vec<String>) {}

    /// 插入文档后调用一次，异步加载不得阻塞路由
    fn on_mount(self: Rc<Self>);

    /// 交互入口，页面未就绪时忽略
    fn dispatch(self: Rc<Self>, action: PageAction) {
        crate::log_debug!("[Page] {} ignores {:?}", self.kind(), action);
    }

    /// 被替换时调用
    fn dispose(&self) {}
}

/// 已挂载的页面（页面单元 + 内容区）
#[derive(Clone)]
pub struct MountedPage {
    pub route: ResolvedRoute,
    pub unit: Rc<dyn PageUnit>,
    pub surface: Rc<PageSurface>,
}

impl MountedPage {
    pub fn kind(&self) -> PageKind {
        self.route.target
    }

    pub fn dispatch(&self, action: PageAction) {
        self.unit.clone().dispatch(action);
    }
}

/// 未匹配任何路由时的占位页面
pub struct NotFoundPage {
    ctx: PageContext,
}

impl PageUnit for NotFoundPage {
    fn kind(&self) -> PageKind {
        PageKind::NotFound
    }

    fn on_mount(self: Rc<Self>) {
        self.ctx.render(PageView::NotFound);
    }
}

/// 根据路由目标创建页面单元
pub fn build_page(route: &ResolvedRoute, ctx: PageContext) -> Rc<dyn PageUnit> {
    let mut unit: Box<dyn PageUnit> = match route.target {
        PageKind::Home => Box::new(HomePage::new(ctx)),
        PageKind::MovieList => Box::new(MovieListPage::new(ctx)),
        PageKind::MovieDetails => Box::new(MovieDetailsPage::new(ctx)),
        PageKind::Register => Box::new(RegisterPage::new(ctx)),
        PageKind::Login => Box::new(LoginPage::new(ctx)),
        PageKind::Account => Box::new(AccountPage::new(ctx)),
        PageKind::Favorites => Box::new(CollectionPage::new(ctx, Collection::Favorite)),
        PageKind::Watchlist => Box::new(CollectionPage::new(ctx, Collection::Watchlist)),
        PageKind::NotFound => Box::new(NotFoundPage { ctx }),
    };
    if !route.params.is_empty() {
        unit.attach_params(route.params.clone());
    }
    Rc::from(unit)
}

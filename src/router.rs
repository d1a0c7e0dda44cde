//! 路由服务模块 - 核心引擎
//!
//! 实现"请求 -> 解析 -> 守卫 -> 挂载"的导航流程：
//! 所有对历史栈和内容区的操作都经由 `NavigationHost` 集中在此模块。

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::api::MovieApi;
use crate::config::AppConfig;
use crate::error::{MarqueeError, MarqueeResult};
use crate::host::{AlertSurface, Executor, NavigationHost};
use crate::pages::{MountToken, MountedPage, PageContext, PageSurface, build_page};
use crate::query::MovieQuery;
use crate::route::{ResolvedRoute, RouteTable};
use crate::session::Session;

/// 页面共享的协作者
///
/// 启动时构建一次，显式传给路由与每个页面。
#[derive(Clone)]
pub struct Services {
    pub api: MovieApi,
    pub session: Session,
    pub config: Rc<AppConfig>,
    pub executor: Rc<dyn Executor>,
    pub alerts: Rc<dyn AlertSurface>,
}

/// 一次导航的终态
#[derive(Debug, Clone, PartialEq)]
pub enum NavigationOutcome {
    Mounted(ResolvedRoute),
    /// 认证守卫拦截后重新进入导航
    Redirected {
        from: ResolvedRoute,
        to: String,
        outcome: Box<NavigationOutcome>,
    },
}

impl NavigationOutcome {
    /// 最终挂载的路由
    pub fn mounted_route(&self) -> &ResolvedRoute {
        match self {
            Self::Mounted(route) => route,
            Self::Redirected { outcome, .. } => outcome.mounted_route(),
        }
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self, Self::Redirected { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HistoryMode {
    Push,
    Replace,
    /// 后退 / 前进重放与初始解析：历史中已有该条目
    Keep,
}

struct RouterInner {
    table: RouteTable,
    host: Rc<dyn NavigationHost>,
    services: Services,
    /// 挂载代次，页面的 `MountToken` 与之比较
    generation: Rc<Cell<u64>>,
    current: RefCell<Option<MountedPage>>,
}

impl RouterInner {
    fn run(self: &Rc<Self>, path: &str, mode: HistoryMode) -> NavigationOutcome {
        // --- Step 1: 解析 ---
        let route = self.table.resolve(path);
        crate::log_debug!(
            "[Router] Resolved {} -> {} {:?}",
            path,
            route.target,
            route.params
        );

        // --- Step 2: 认证守卫 ---
        if route.requires_auth && !self.services.session.is_authenticated() {
            let login_path = self.services.config.login_path.clone();
            crate::log_info!(
                "[Router] Access denied to {}. Redirecting to {}",
                path,
                login_path
            );
            // 被拦截的地址不入栈；重放时替换当前条目
            let redirect_mode = match mode {
                HistoryMode::Push => HistoryMode::Push,
                HistoryMode::Replace | HistoryMode::Keep => HistoryMode::Replace,
            };
            let outcome = self.run(&login_path, redirect_mode);
            return NavigationOutcome::Redirected {
                from: route,
                to: login_path,
                outcome: Box::new(outcome),
            };
        }

        // --- Step 3: 更新历史（挂载之前，NotFound 同样入栈）---
        match mode {
            HistoryMode::Push => self.host.push_history(path),
            HistoryMode::Replace => self.host.replace_history(path),
            HistoryMode::Keep => {}
        }

        // --- Step 4: 挂载 ---
        self.mount(route.clone(), path);
        NavigationOutcome::Mounted(route)
    }

    fn mount(self: &Rc<Self>, route: ResolvedRoute, location: &str) {
        let generation = self.generation.get() + 1;
        self.generation.set(generation);

        let surface = PageSurface::new();
        let ctx = PageContext {
            services: self.services.clone(),
            navigator: Navigator {
                router: Rc::downgrade(self),
            },
            surface: surface.clone(),
            token: MountToken::new(generation, self.generation.clone()),
            location: location.to_string(),
        };
        let unit = build_page(&route, ctx);
        crate::log_info!("[Router] Mounting {} (generation {})", route.target, generation);

        let page = MountedPage {
            route,
            unit: unit.clone(),
            surface,
        };
        let previous = self.current.replace(Some(page.clone()));

        // 先移除旧页面再挂上新页面，作为一次视觉更新
        let host = self.host.clone();
        let swap = move || {
            if let Some(previous) = previous {
                previous.unit.dispose();
                previous.surface.detach();
            }
            host.replace_content(page);
        };
        if self.host.supports_view_transition() {
            self.host.run_view_transition(Box::new(swap));
        } else {
            swap();
        }

        // 加载由页面自行异步进行，路由不等待
        unit.on_mount();
    }
}

/// 路由器
///
/// 克隆后共享同一份状态。
#[derive(Clone)]
pub struct Router {
    inner: Rc<RouterInner>,
}

impl Router {
    /// 创建路由器并校验登录重定向配置
    pub fn new(
        table: RouteTable,
        host: Rc<dyn NavigationHost>,
        services: Services,
    ) -> MarqueeResult<Self> {
        let login_path = &services.config.login_path;
        let login = table.resolve(login_path);
        if login.is_not_found() {
            return Err(MarqueeError::config(format!(
                "login path {} does not match any route",
                login_path
            ))
            .in_op("router.new"));
        }
        if login.requires_auth {
            return Err(MarqueeError::config(format!(
                "login path {} requires authentication",
                login_path
            ))
            .in_op("router.new"));
        }

        Ok(Self {
            inner: Rc::new(RouterInner {
                table,
                host,
                services,
                generation: Rc::new(Cell::new(0)),
                current: RefCell::new(None),
            }),
        })
    }

    /// 绑定后退 / 前进监听与站内链接，然后解析一次当前地址
    pub fn initialize(&self) -> NavigationOutcome {
        let weak = Rc::downgrade(&self.inner);
        self.inner.host.on_popstate(Rc::new(move || {
            if let Some(inner) = weak.upgrade() {
                let location = inner.host.location();
                crate::log_debug!("[Router] popstate {}", location);
                inner.run(&location, HistoryMode::Keep);
            }
        }));

        let navigator = self.navigator();
        self.inner
            .host
            .intercept_links(Rc::new(move |href: String| navigator.navigate(&href)));

        let location = self.inner.host.location();
        crate::log_info!("[Router] Initial location {}", location);
        self.navigate_with(&location, false)
    }

    /// **核心方法：导航与守卫**
    pub fn navigate(&self, path: &str) -> NavigationOutcome {
        self.navigate_with(path, true)
    }

    /// `add_to_history = false` 用于重放，不改变历史长度
    pub fn navigate_with(&self, path: &str, add_to_history: bool) -> NavigationOutcome {
        let mode = if add_to_history {
            HistoryMode::Push
        } else {
            HistoryMode::Keep
        };
        self.inner.run(path, mode)
    }

    pub fn navigator(&self) -> Navigator {
        Navigator {
            router: Rc::downgrade(&self.inner),
        }
    }

    pub fn current_page(&self) -> Option<MountedPage> {
        self.inner.current.borrow().clone()
    }

    pub fn current_route(&self) -> Option<ResolvedRoute> {
        self.inner
            .current
            .borrow()
            .as_ref()
            .map(|page| page.route.clone())
    }

    pub fn services(&self) -> &Services {
        &self.inner.services
    }

    pub fn table(&self) -> &RouteTable {
        &self.inner.table
    }
}

/// 页面与界面持有的导航句柄
///
/// 只弱引用路由器，路由器释放后调用无效。
#[derive(Clone)]
pub struct Navigator {
    router: Weak<RouterInner>,
}

impl Navigator {
    pub fn navigate(&self, path: &str) {
        match self.router.upgrade() {
            Some(inner) => {
                inner.run(path, HistoryMode::Push);
            }
            None => crate::log_warn!("[Router] navigator used after router dropped: {}", path),
        }
    }

    /// 顶部搜索框
    pub fn search(&self, q: &str) {
        self.navigate(&MovieQuery::search(q.trim()).to_path());
    }

    /// 清除会话并回到首页
    pub fn logout(&self) {
        if let Some(inner) = self.router.upgrade() {
            inner.services.session.clear();
            crate::log_info!("[Router] Logged out");
            let home = inner.services.config.home_path.clone();
            inner.run(&home, HistoryMode::Push);
        }
    }
}

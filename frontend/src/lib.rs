//! Marquee 前端应用
//!
//! 导航、会话与数据服务都来自核心库 `marquee`，本 crate 只负责：
//! - `web`: 浏览器宿主实现（History、fetch、LocalStorage、定时器）
//! - `components`: 按 `PageView` 渲染的 UI 组件

mod components {
    pub mod account;
    pub mod alert;
    pub mod catalog;
    pub mod header;
}
pub(crate) mod web;

use std::rc::Rc;

use leptos::prelude::*;
use leptos::reactive::owner::LocalStorage;
use marquee::{
    AlertSurface, AppConfig, HttpDataService, MarqueeResult, MovieApi, PageAction, PageView,
    RouteTable, Router, Services, Session,
};

use crate::components::account::{AccountView, CollectionView, LoginView, RegisterView};
use crate::components::alert::{AlertModal, AlertState};
use crate::components::catalog::{
    FailedView, HomeView, LoadingView, MovieDetailsView, MovieListPanel, NotFoundView,
};
use crate::components::header::SiteHeader;
use crate::web::{BrowserHost, ContentSignals, FetchClient, LocalTokenStore, WebExecutor};

/// 页面中可覆盖 API 地址的 meta 标签
const API_BASE_META: &str = "meta[name=marquee-api-base]";

// =========================================================
// 应用外壳
// =========================================================

/// 组件访问路由与内容区的入口
///
/// 路由器只存放在本地存储中，句柄本身可自由复制。
#[derive(Clone, Copy)]
pub struct Shell {
    router: StoredValue<Router, LocalStorage>,
    pub content: ContentSignals,
    pub authenticated: RwSignal<bool>,
}

impl Shell {
    fn router(&self) -> Router {
        self.router.get_value()
    }

    pub fn navigate(&self, path: &str) {
        self.router().navigate(path);
    }

    /// 交给当前页面处理
    pub fn dispatch(&self, action: PageAction) {
        if let Some(page) = self.router().current_page() {
            page.dispatch(action);
        }
    }

    pub fn search(&self, q: &str) {
        self.router().navigator().search(q);
    }

    pub fn logout(&self) {
        self.router().navigator().logout();
    }
}

pub fn use_shell() -> Shell {
    expect_context::<Shell>()
}

/// 读取配置，缺省时使用内置常量
fn read_config() -> AppConfig {
    let api_base = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.query_selector(API_BASE_META).ok().flatten())
        .and_then(|meta| meta.get_attribute("content"));

    match api_base {
        Some(base) => AppConfig::default().with_api_base(base),
        None => AppConfig::default(),
    }
}

fn build_router(
    content: ContentSignals,
    alerts: Rc<dyn AlertSurface>,
    authenticated: RwSignal<bool>,
) -> MarqueeResult<Router> {
    let config = Rc::new(read_config());
    marquee::log_info!("[App] API base {}", config.api_base);

    let session = Session::new(Rc::new(LocalTokenStore::new(
        config.token_storage_key.clone(),
    )));
    authenticated.set(session.is_authenticated());
    session.subscribe(move |is_auth| authenticated.set(is_auth));

    let data = HttpDataService::new(FetchClient, session.clone(), config.clone());
    let services = Services {
        api: MovieApi::new(Rc::new(data)),
        session,
        config,
        executor: Rc::new(WebExecutor),
        alerts,
    };

    Router::new(
        RouteTable::movies()?,
        Rc::new(BrowserHost::new(content)),
        services,
    )
}

// =========================================================
// 组件
// =========================================================

/// 站内链接：点击时走内部导航
#[component]
pub fn NavLink(
    #[prop(into)] to: String,
    #[prop(into, optional)] class: String,
    children: Children,
) -> impl IntoView {
    let shell = use_shell();
    let target = to.clone();
    let on_click = move |ev: leptos::web_sys::MouseEvent| {
        ev.prevent_default();
        shell.navigate(&target);
    };

    view! {
        <a href=to class=class on:click=on_click>
            {children()}
        </a>
    }
}

/// 内容区出口
///
/// 表单页面的提交状态变化不重建组件，避免清空输入。
#[component]
fn PageOutlet() -> impl IntoView {
    let shell = use_shell();
    let slot = Memo::new(move |_| match shell.content.view.get() {
        PageView::Login { .. } => PageView::Login { submitting: false },
        PageView::Register { .. } => PageView::Register { submitting: false },
        other => other,
    });

    move || match slot.get() {
        PageView::Loading => view! { <LoadingView /> }.into_any(),
        PageView::Home { movies } => view! { <HomeView movies /> }.into_any(),
        PageView::MovieList(list) => view! { <MovieListPanel list /> }.into_any(),
        PageView::MovieDetails(movie) => view! { <MovieDetailsView movie /> }.into_any(),
        PageView::Register { .. } => view! { <RegisterView /> }.into_any(),
        PageView::Login { .. } => view! { <LoginView /> }.into_any(),
        PageView::Account => view! { <AccountView /> }.into_any(),
        PageView::Collection { collection, movies } => {
            view! { <CollectionView collection movies /> }.into_any()
        }
        PageView::NotFound => view! { <NotFoundView /> }.into_any(),
        PageView::Failed { message } => view! { <FailedView message /> }.into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    let content = ContentSignals::new();
    let alerts = AlertState::new();
    let authenticated = RwSignal::new(false);
    provide_context(alerts);

    let router = match build_router(content, Rc::new(alerts), authenticated) {
        Ok(router) => router,
        Err(e) => {
            marquee::log_error!("[App] startup failed: {}", e);
            return view! { <FailedView message=e.to_string() /> }.into_any();
        }
    };

    provide_context(Shell {
        router: StoredValue::new_local(router.clone()),
        content,
        authenticated,
    });
    router.initialize();

    view! {
        <SiteHeader />
        <main class="container mx-auto px-4 py-6">
            <PageOutlet />
        </main>
        <AlertModal />
    }
    .into_any()
}

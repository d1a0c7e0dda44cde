//! Marquee 导航核心
//!
//! 与宿主无关的单页应用内核：
//! - `route`: 路由表（有序匹配，先到先得）
//! - `router`: 路由服务（解析 -> 守卫 -> 挂载）
//! - `session`: 认证令牌
//! - `api` / `request`: 数据服务与 HTTP 抽象
//! - `pages`: 页面单元生命周期与各页面实现
//! - `host`: 浏览器集成的抽象接口（由前端实现）

// =========================================================
// 跨平台日志宏
// =========================================================

#[cfg(target_arch = "wasm32")]
#[macro_export]
macro_rules! log_debug {
    ($($t:tt)*) => (::web_sys::console::debug_1(&format!($($t)*).into()))
}

#[cfg(not(target_arch = "wasm32"))]
#[macro_export]
macro_rules! log_debug {
    ($($t:tt)*) => (if cfg!(debug_assertions) { println!($($t)*) })
}

#[cfg(target_arch = "wasm32")]
#[macro_export]
macro_rules! log_info {
    ($($t:tt)*) => (::web_sys::console::log_1(&format!($($t)*).into()))
}

#[cfg(not(target_arch = "wasm32"))]
#[macro_export]
macro_rules! log_info {
    ($($t:tt)*) => (println!($($t)*))
}

#[cfg(target_arch = "wasm32")]
#[macro_export]
macro_rules! log_warn {
    ($($t:tt)*) => (::web_sys::console::warn_1(&format!($($t)*).into()))
}

#[cfg(not(target_arch = "wasm32"))]
#[macro_export]
macro_rules! log_warn {
    ($($t:tt)*) => (eprintln!($($t)*))
}

#[cfg(target_arch = "wasm32")]
#[macro_export]
macro_rules! log_error {
    ($($t:tt)*) => (::web_sys::console::error_1(&format!($($t)*).into()))
}

#[cfg(not(target_arch = "wasm32"))]
#[macro_export]
macro_rules! log_error {
    ($($t:tt)*) => (eprintln!($($t)*))
}

pub mod api;
pub mod config;
pub mod error;
pub mod forms;
pub mod host;
pub mod pages;
pub mod query;
pub mod request;
pub mod route;
pub mod router;
pub mod session;

pub use api::{DataService, HttpDataService, MovieApi};
pub use config::AppConfig;
pub use error::{ErrorStatus, MarqueeError, MarqueeResult};
pub use host::{AlertSurface, Executor, NavigationHost};
pub use pages::{MountedPage, PageAction, PageContext, PageSurface, PageUnit, PageView};
pub use route::{PageKind, ResolvedRoute, RouteTable};
pub use router::{NavigationOutcome, Navigator, Router, Services};
pub use session::{MemoryTokenStore, Session, TokenStore};

pub use marquee_shared as shared;

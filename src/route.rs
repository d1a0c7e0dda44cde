//! 路由定义模块 - 领域模型
//!
//! 纯粹的匹配逻辑，不依赖 DOM。
//! 路由表按声明顺序匹配，第一个结构匹配即为结果，
//! 因此更具体的模式必须声明在更宽泛的模式之前。

use std::fmt::Display;

use regex::Regex;

use crate::error::{MarqueeError, MarqueeResult};
use crate::query::strip_query;

/// 页面单元标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageKind {
    Home,
    MovieList,
    MovieDetails,
    Register,
    Login,
    /// 账户主页 (需要认证)
    Account,
    /// 收藏列表 (需要认证)
    Favorites,
    /// 待看列表 (需要认证)
    Watchlist,
    /// 页面未找到
    NotFound,
}

impl PageKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::MovieList => "movie-list",
            Self::MovieDetails => "movie-details",
            Self::Register => "register",
            Self::Login => "login",
            Self::Account => "account",
            Self::Favorites => "favorites",
            Self::Watchlist => "watchlist",
            Self::NotFound => "not-found",
        }
    }
}

impl Display for PageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 路由模式
#[derive(Debug, Clone)]
pub enum RoutePattern {
    /// 与去掉查询串后的路径完全相等
    Literal(String),
    /// 对完整地址（含查询串）做正则匹配，捕获组作为参数
    Capture(Regex),
}

impl RoutePattern {
    /// 尝试匹配，成功时返回按从左到右顺序的捕获参数
    fn matches(&self, location: &str, routing_key: &str) -> Option<Vec<String>> {
        match self {
            RoutePattern::Literal(path) => (path == routing_key).then(Vec::new),
            RoutePattern::Capture(regex) => regex.captures(location).map(|caps| {
                caps.iter()
                    .skip(1)
                    .map(|m| m.map(|m| m.as_str().to_string()).unwrap_or_default())
                    .collect()
            }),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            RoutePattern::Literal(path) => path,
            RoutePattern::Capture(regex) => regex.as_str(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RouteEntry {
    pub pattern: RoutePattern,
    pub target: PageKind,
    pub requires_auth: bool,
}

/// 解析结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoute {
    pub target: PageKind,
    /// 字面量匹配时为空
    pub params: Vec<String>,
    pub requires_auth: bool,
}

impl ResolvedRoute {
    pub fn not_found() -> Self {
        Self {
            target: PageKind::NotFound,
            params: Vec::new(),
            requires_auth: false,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.target == PageKind::NotFound
    }
}

/// 静态、只读的有序路由表
#[derive(Debug, Clone)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    pub fn builder() -> RouteTableBuilder {
        RouteTableBuilder::default()
    }

    /// 电影站点的默认路由表
    pub fn movies() -> MarqueeResult<Self> {
        Self::builder()
            .route("/", PageKind::Home)
            .route("/movies", PageKind::MovieList)
            .capture(r"^/movies/(\d+)", PageKind::MovieDetails)
            .route("/account/register", PageKind::Register)
            .route("/account/login", PageKind::Login)
            .protected_route("/account/", PageKind::Account)
            .protected_route("/account/favorites", PageKind::Favorites)
            .protected_route("/account/watchlist", PageKind::Watchlist)
            .build()
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    /// **核心方法：按顺序解析地址**
    ///
    /// 认证标记只属于命中的那一条；全部未命中时返回 NotFound。
    pub fn resolve(&self, location: &str) -> ResolvedRoute {
        let routing_key = strip_query(location);

        self.entries
            .iter()
            .find_map(|entry| {
                entry
                    .pattern
                    .matches(location, routing_key)
                    .map(|params| ResolvedRoute {
                        target: entry.target,
                        params,
                        requires_auth: entry.requires_auth,
                    })
            })
            .unwrap_or_else(ResolvedRoute::not_found)
    }
}

enum PendingPattern {
    Literal(String),
    Capture(String),
}

struct PendingEntry {
    pattern: PendingPattern,
    target: PageKind,
    requires_auth: bool,
}

/// 路由表构建器
///
/// 所有模式在 `build()` 时统一校验，配置错误在启动阶段暴露。
#[derive(Default)]
pub struct RouteTableBuilder {
    entries: Vec<PendingEntry>,
}

impl RouteTableBuilder {
    fn push(mut self, pattern: PendingPattern, target: PageKind, requires_auth: bool) -> Self {
        self.entries.push(PendingEntry {
            pattern,
            target,
            requires_auth,
        });
        self
    }

    pub fn route(self, path: impl Into<String>, target: PageKind) -> Self {
        self.push(PendingPattern::Literal(path.into()), target, false)
    }

    pub fn protected_route(self, path: impl Into<String>, target: PageKind) -> Self {
        self.push(PendingPattern::Literal(path.into()), target, true)
    }

    pub fn capture(self, pattern: impl Into<String>, target: PageKind) -> Self {
        self.push(PendingPattern::Capture(pattern.into()), target, false)
    }

    pub fn protected_capture(self, pattern: impl Into<String>, target: PageKind) -> Self {
        self.push(PendingPattern::Capture(pattern.into()), target, true)
    }

    pub fn build(self) -> MarqueeResult<RouteTable> {
        let mut entries: Vec<RouteEntry> = Vec::with_capacity(self.entries.len());

        for pending in self.entries {
            let pattern = match pending.pattern {
                PendingPattern::Literal(path) => {
                    if !path.starts_with('/') {
                        return Err(MarqueeError::config(format!(
                            "literal route must start with '/': {:?}",
                            path
                        ))
                        .in_op_with("route.build", pending.target.name()));
                    }
                    let duplicate = entries.iter().any(|e| {
                        matches!(&e.pattern, RoutePattern::Literal(existing) if *existing == path)
                    });
                    if duplicate {
                        return Err(MarqueeError::config(format!(
                            "duplicate literal route: {}",
                            path
                        ))
                        .in_op_with("route.build", pending.target.name()));
                    }
                    RoutePattern::Literal(path)
                }
                PendingPattern::Capture(source) => {
                    let regex = Regex::new(&source).map_err(|e| {
                        MarqueeError::from(e).in_op_with("route.build", source.clone())
                    })?;
                    RoutePattern::Capture(regex)
                }
            };

            entries.push(RouteEntry {
                pattern,
                target: pending.target,
                requires_auth: pending.requires_auth,
            });
        }

        Ok(RouteTable { entries })
    }
}

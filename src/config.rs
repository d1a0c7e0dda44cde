use std::time::Duration;

// =========================================================
// 运行时配置 (Runtime Configuration)
// =========================================================

/// 默认值，宿主没有提供覆盖时使用
pub const DEFAULT_API_BASE: &str = "/api/";
pub const DEFAULT_LOGIN_PATH: &str = "/account/login";
pub const DEFAULT_ACCOUNT_PATH: &str = "/account/";
pub const DEFAULT_HOME_PATH: &str = "/";
pub const DEFAULT_TOKEN_STORAGE_KEY: &str = "jwt";
pub const DEFAULT_REGISTER_CONFIRM_DELAY_MS: u64 = 2000;

/// 应用配置
///
/// 启动时构造一次，随 `Services` 传给路由与页面。
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// 数据服务的资源前缀
    pub api_base: String,
    /// 认证失败时的重定向目标
    pub login_path: String,
    /// 登录成功 / 未登录收藏时的账户入口
    pub account_path: String,
    pub home_path: String,
    /// 持久化 token 的存储键
    pub token_storage_key: String,
    /// 注册成功提示停留时间
    pub register_confirm_delay: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            account_path: DEFAULT_ACCOUNT_PATH.to_string(),
            home_path: DEFAULT_HOME_PATH.to_string(),
            token_storage_key: DEFAULT_TOKEN_STORAGE_KEY.to_string(),
            register_confirm_delay: Duration::from_millis(DEFAULT_REGISTER_CONFIRM_DELAY_MS),
        }
    }
}

impl AppConfig {
    /// 设置 API 前缀，空值保留默认
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        let api_base = api_base.into();
        if !api_base.trim().is_empty() {
            self.api_base = api_base;
        }
        self
    }

    pub fn with_login_path(mut self, path: impl Into<String>) -> Self {
        self.login_path = path.into();
        self
    }

    pub fn with_register_confirm_delay(mut self, delay: Duration) -> Self {
        self.register_confirm_delay = delay;
        self
    }

    /// 拼接资源 URL，保证前缀与资源之间恰有一个 `/`
    pub fn resource_url(&self, resource: &str) -> String {
        format!(
            "{}/{}",
            self.api_base.trim_end_matches('/'),
            resource.trim_start_matches('/')
        )
    }
}

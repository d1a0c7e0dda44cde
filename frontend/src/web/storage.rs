//! LocalStorage 封装模块
//!
//! 认证 token 持久化在 LocalStorage 中，刷新页面后会话仍然有效。

use marquee::TokenStore;

/// 本地存储操作封装
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }

    /// 键不存在或存储不可用时返回 `None`
    pub fn get(key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    pub fn set(key: &str, value: &str) -> bool {
        Self::storage()
            .and_then(|s| s.set_item(key, value).ok())
            .is_some()
    }

    pub fn delete(key: &str) -> bool {
        Self::storage()
            .and_then(|s| s.remove_item(key).ok())
            .is_some()
    }
}

/// 以固定键保存 token
pub struct LocalTokenStore {
    key: String,
}

impl LocalTokenStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl TokenStore for LocalTokenStore {
    fn load(&self) -> Option<String> {
        LocalStorage::get(&self.key)
    }

    fn save(&self, token: &str) {
        if !LocalStorage::set(&self.key, token) {
            marquee::log_warn!("[Storage] failed to persist token");
        }
    }

    fn remove(&self) {
        LocalStorage::delete(&self.key);
    }
}

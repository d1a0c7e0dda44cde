//! 会话模块
//!
//! 持有认证 token，并派生"是否已认证"。
//! 写入一律整体替换；持久化交给 `TokenStore` 协作者。

use std::cell::RefCell;
use std::rc::Rc;

/// token 的持久化接口（浏览器中为 LocalStorage）
pub trait TokenStore {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str);
    fn remove(&self);
}

/// 进程内存储，不跨刷新保留
#[derive(Default)]
pub struct MemoryTokenStore {
    token: RefCell<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    fn save(&self, token: &str) {
        *self.token.borrow_mut() = Some(token.to_string());
    }

    fn remove(&self) {
        *self.token.borrow_mut() = None;
    }
}

type Listener = Rc<dyn Fn(bool)>;

struct SessionInner {
    token: RefCell<Option<String>>,
    store: Rc<dyn TokenStore>,
    listeners: RefCell<Vec<Listener>>,
}

/// 会话句柄
///
/// 克隆开销很小，所有克隆共享同一份状态。
#[derive(Clone)]
pub struct Session {
    inner: Rc<SessionInner>,
}

impl Session {
    /// 创建会话，并从存储中恢复 token
    pub fn new(store: Rc<dyn TokenStore>) -> Self {
        let token = store.load().filter(|t| !t.is_empty());
        Self {
            inner: Rc::new(SessionInner {
                token: RefCell::new(token),
                store,
                listeners: RefCell::new(Vec::new()),
            }),
        }
    }

    /// 纯内存会话
    pub fn in_memory() -> Self {
        Self::new(Rc::new(MemoryTokenStore::new()))
    }

    pub fn token(&self) -> Option<String> {
        self.inner.token.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner
            .token
            .borrow()
            .as_deref()
            .is_some_and(|t| !t.is_empty())
    }

    /// 设置 token（登录 / 注册成功）
    ///
    /// 空字符串等同于清除。
    pub fn set_token(&self, token: impl Into<String>) {
        let token = token.into();
        if token.is_empty() {
            self.clear();
            return;
        }
        self.inner.store.save(&token);
        self.inner.token.replace(Some(token));
        self.notify();
    }

    /// 清除 token（登出）
    pub fn clear(&self) {
        self.inner.store.remove();
        self.inner.token.replace(None);
        self.notify();
    }

    /// 订阅认证状态变化
    pub fn subscribe(&self, listener: impl Fn(bool) + 'static) {
        self.inner.listeners.borrow_mut().push(Rc::new(listener));
    }

    fn notify(&self) {
        let is_auth = self.is_authenticated();
        // 先复制出来，监听器内部可能再次订阅
        let listeners: Vec<Listener> = self.inner.listeners.borrow().clone();
        for listener in listeners {
            listener(is_auth);
        }
    }
}

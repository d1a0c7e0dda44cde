//! 宿主集成接口
//!
//! 路由与页面对浏览器的全部依赖都收敛在这里，
//! 前端以 `web_sys` 实现，测试以内存版本实现。

use std::rc::Rc;
use std::time::Duration;

use futures::future::LocalBoxFuture;

use crate::pages::MountedPage;

/// 地址栏、历史栈与内容区
pub trait NavigationHost {
    /// 当前地址（路径 + 查询串）
    fn location(&self) -> String;

    fn push_history(&self, path: &str);

    fn replace_history(&self, path: &str);

    /// 注册后退 / 前进监听
    fn on_popstate(&self, handler: Rc<dyn Fn()>);

    /// 将文档中已有的站内链接改为内部导航，回调参数为链接地址
    fn intercept_links(&self, handler: Rc<dyn Fn(String)>);

    /// 宿主是否提供成组视觉过渡
    fn supports_view_transition(&self) -> bool {
        false
    }

    /// 在视觉过渡中执行一次内容替换
    fn run_view_transition(&self, update: Box<dyn FnOnce()>) {
        update();
    }

    /// 用新页面替换内容区（先移除旧页面，再挂上新页面）
    fn replace_content(&self, page: MountedPage);
}

/// 共享的错误弹窗
pub trait AlertSurface {
    fn show(&self, message: &str);
    fn close(&self);
}

/// 宿主事件循环
pub trait Executor {
    /// 提交一个本地任务，不等待其完成
    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>);

    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()>;
}

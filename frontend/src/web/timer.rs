//! 定时器与任务调度
//!
//! 使用 `setTimeout` 实现一次性等待，任务交给浏览器微任务队列。

use std::time::Duration;

use futures::future::LocalBoxFuture;
use marquee::Executor;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

/// 等待指定时长后完成
///
/// 无法获取 window 时立即完成。
pub fn timeout(duration: Duration) -> impl Future<Output = ()> {
    let millis = duration.as_millis().min(i32::MAX as u128) as i32;
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        let scheduled = web_sys::window().and_then(|window| {
            window
                .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, millis)
                .ok()
        });
        if scheduled.is_none() {
            let _ = resolve.call0(&JsValue::UNDEFINED);
        }
    });

    async move {
        let _ = JsFuture::from(promise).await;
    }
}

/// 浏览器事件循环
#[derive(Clone, Copy, Default)]
pub struct WebExecutor;

impl Executor for WebExecutor {
    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>) {
        wasm_bindgen_futures::spawn_local(task);
    }

    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        Box::pin(timeout(duration))
    }
}

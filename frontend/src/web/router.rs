//! 浏览器导航宿主
//!
//! 封装了 web_sys 的 History API：
//! 所有对 window.history 与内容区的操作都集中在此模块。

use std::rc::Rc;

use leptos::prelude::*;
use marquee::pages::MountedPage;
use marquee::{NavigationHost, PageView};
use wasm_bindgen::prelude::*;

const VIEW_TRANSITION_FN: &str = "startViewTransition";
const NAVLINK_SELECTOR: &str = "a.navlink";

/// 获取当前浏览器地址（路径 + 查询串）
fn current_location() -> String {
    web_sys::window()
        .map(|w| {
            let location = w.location();
            let path = location.pathname().unwrap_or_else(|_| "/".to_string());
            let search = location.search().unwrap_or_default();
            format!("{}{}", path, search)
        })
        .unwrap_or_else(|| "/".to_string())
}

fn with_history(f: impl FnOnce(&web_sys::History)) {
    if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
        f(&history);
    }
}

/// 内容区在响应式层面的投影
///
/// 页面渲染通过 `PageSurface` 的观察者写入这里，组件只读取信号。
#[derive(Clone, Copy)]
pub struct ContentSignals {
    pub view: RwSignal<PageView>,
}

impl ContentSignals {
    pub fn new() -> Self {
        Self {
            view: RwSignal::new(PageView::Loading),
        }
    }
}

/// `NavigationHost` 的浏览器实现
pub struct BrowserHost {
    content: ContentSignals,
}

impl BrowserHost {
    pub fn new(content: ContentSignals) -> Self {
        Self { content }
    }

    fn document() -> Option<web_sys::Document> {
        web_sys::window()?.document()
    }
}

impl NavigationHost for BrowserHost {
    fn location(&self) -> String {
        current_location()
    }

    fn push_history(&self, path: &str) {
        with_history(|history| {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        });
    }

    fn replace_history(&self, path: &str) {
        with_history(|history| {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        });
    }

    fn on_popstate(&self, handler: Rc<dyn Fn()>) {
        let closure = Closure::<dyn Fn()>::new(move || handler());
        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }
        // 监听器与页面同寿命
        closure.forget();
    }

    fn intercept_links(&self, handler: Rc<dyn Fn(String)>) {
        let Some(links) = Self::document().and_then(|d| d.query_selector_all(NAVLINK_SELECTOR).ok())
        else {
            return;
        };

        for i in 0..links.length() {
            let Some(link) = links.get(i).and_then(|n| n.dyn_into::<web_sys::Element>().ok()) else {
                continue;
            };
            let Some(href) = link.get_attribute("href") else {
                continue;
            };

            let handler = handler.clone();
            let closure = Closure::<dyn Fn(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
                ev.prevent_default();
                handler(href.clone());
            });
            let _ = link.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        marquee::log_debug!("[Router] intercepted {} links", links.length());
    }

    fn supports_view_transition(&self) -> bool {
        Self::document()
            .map(|d| js_sys::Reflect::has(&d, &JsValue::from_str(VIEW_TRANSITION_FN)).unwrap_or(false))
            .unwrap_or(false)
    }

    fn run_view_transition(&self, update: Box<dyn FnOnce()>) {
        let start = Self::document().and_then(|d| {
            js_sys::Reflect::get(&d, &JsValue::from_str(VIEW_TRANSITION_FN))
                .ok()
                .and_then(|f| f.dyn_into::<js_sys::Function>().ok())
                .map(|f| (d, f))
        });

        match start {
            Some((document, start)) => {
                let callback = Closure::once_into_js(move || update());
                if let Err(e) = start.call1(&document, &callback) {
                    marquee::log_warn!("[Router] view transition failed: {:?}", e);
                }
            }
            None => update(),
        }
    }

    fn replace_content(&self, page: MountedPage) {
        let view = self.content.view;
        page.surface.observe(move |current| view.set(current.clone()));
    }
}

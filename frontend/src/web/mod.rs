//! 浏览器集成模块
//!
//! 核心库的宿主接口在此以 `web_sys` 实现：
//! 历史栈与内容区、fetch、LocalStorage、定时器。

mod http;
mod router;
mod storage;
mod timer;

pub use http::FetchClient;
pub use router::{BrowserHost, ContentSignals};
pub use storage::LocalTokenStore;
pub use timer::WebExecutor;

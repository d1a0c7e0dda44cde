//! HTTP 传输模块
//!
//! 以 `window.fetch` 实现核心库的 `HttpClient` 接口。

use std::collections::HashMap;

use marquee::MarqueeError;
use marquee::request::{HttpClient, HttpRequest, HttpResponse};
use marquee::shared::protocol::HttpMethod;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, Response};

fn method_name(method: HttpMethod) -> &'static str {
    match method {
        HttpMethod::Get => "GET",
        HttpMethod::Post => "POST",
    }
}

fn js_error(context: &str, err: JsValue) -> MarqueeError {
    MarqueeError::network(format!("{}: {:?}", context, err))
}

fn build_headers(headers: &HashMap<String, String>) -> Result<Headers, MarqueeError> {
    let js_headers = Headers::new().map_err(|e| js_error("create headers", e))?;
    for (key, value) in headers {
        js_headers
            .set(key, value)
            .map_err(|e| js_error("set header", e))?;
    }
    Ok(js_headers)
}

/// 浏览器 fetch 客户端
#[derive(Clone, Copy, Default)]
pub struct FetchClient;

#[async_trait::async_trait(?Send)]
impl HttpClient for FetchClient {
    async fn send(&self, req: HttpRequest) -> marquee::MarqueeResult<HttpResponse> {
        let opts = RequestInit::new();
        opts.set_method(method_name(req.method));
        opts.set_headers(&build_headers(&req.headers)?.into());
        if let Some(body) = &req.body {
            opts.set_body(&JsValue::from_str(body));
        }

        let request = Request::new_with_str_and_init(&req.url, &opts)
            .map_err(|e| js_error("build request", e))?;
        let window =
            web_sys::window().ok_or_else(|| MarqueeError::network("window is unavailable"))?;

        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| js_error("fetch", e))?;
        let response: Response = resp_value
            .dyn_into()
            .map_err(|e| js_error("response cast", e))?;

        let text_promise = response.text().map_err(|e| js_error("read body", e))?;
        let text = JsFuture::from(text_promise)
            .await
            .map_err(|e| js_error("read body", e))?;

        Ok(HttpResponse {
            status: response.status(),
            body: text.as_string().unwrap_or_default(),
        })
    }
}

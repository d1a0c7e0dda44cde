//! 查询字符串模块
//!
//! 电影列表页的状态完全由 URL 查询参数决定：
//! 排序、筛选、翻页都通过生成新的 URL 重新导航实现。

use marquee_shared::protocol::SearchMoviesRequest;

pub const MOVIES_PATH: &str = "/movies";

/// 取出 URL 中 `?` 之后、`#` 之前的部分
pub fn query_part(location: &str) -> &str {
    let Some((_, rest)) = location.split_once('?') else {
        return "";
    };
    rest.split('#').next().unwrap_or_default()
}

/// 去掉查询串得到路由键
pub fn strip_query(location: &str) -> &str {
    location.split(['?', '#']).next().unwrap_or(location)
}

/// 解析 `a=1&b=2` 形式的查询串
pub fn parse_query(query: &str) -> Vec<(String, String)> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((k, v)) => (decode(k), decode(v)),
            None => (decode(pair), String::new()),
        })
        .collect()
}

/// 构造查询串（不含 `?`）
pub fn build_query(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", encode(k), encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// `application/x-www-form-urlencoded` 编码
pub fn encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'*' => {
                out.push(byte as char)
            }
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

/// 解码，非法的 `%` 序列原样保留
pub fn decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => out.push(b' '),
            b'%' if i + 2 < bytes.len() => {
                match (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                    (Some(hi), Some(lo)) => {
                        out.push(hi << 4 | lo);
                        i += 2;
                    }
                    _ => out.push(b'%'),
                }
            }
            b => out.push(b),
        }
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

// =========================================================
// 电影列表查询
// =========================================================

/// `/movies?q=&order=&genre=&page=` 的结构化表示
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieQuery {
    pub q: String,
    pub order: Option<String>,
    pub genre: Option<String>,
    /// 从 1 开始
    pub page: u32,
}

impl Default for MovieQuery {
    fn default() -> Self {
        Self {
            q: String::new(),
            order: None,
            genre: None,
            page: 1,
        }
    }
}

impl MovieQuery {
    pub fn search(q: impl Into<String>) -> Self {
        Self {
            q: q.into(),
            ..Self::default()
        }
    }

    /// 从完整地址（路径 + 查询串）中解析
    pub fn from_location(location: &str) -> Self {
        let mut query = Self::default();
        for (key, value) in parse_query(query_part(location)) {
            let value = value.trim().to_string();
            match key.as_str() {
                "q" => query.q = value,
                "order" if !value.is_empty() => query.order = Some(value),
                "genre" if !value.is_empty() => query.genre = Some(value),
                "page" => query.page = value.parse().ok().filter(|p| *p > 0).unwrap_or(1),
                _ => {}
            }
        }
        query
    }

    /// 生成可导航的地址
    pub fn to_path(&self) -> String {
        let mut pairs = vec![("q".to_string(), self.q.clone())];
        if let Some(order) = &self.order {
            pairs.push(("order".to_string(), order.clone()));
        }
        if let Some(genre) = &self.genre {
            pairs.push(("genre".to_string(), genre.clone()));
        }
        if self.page > 1 {
            pairs.push(("page".to_string(), self.page.to_string()));
        }
        format!("{}?{}", MOVIES_PATH, build_query(&pairs))
    }

    /// 排序变化回到第一页
    pub fn with_order(&self, order: impl Into<String>) -> Self {
        let order = order.into();
        Self {
            order: (!order.is_empty()).then_some(order),
            page: 1,
            ..self.clone()
        }
    }

    /// 筛选变化回到第一页
    pub fn with_genre(&self, genre: impl Into<String>) -> Self {
        let genre = genre.into();
        Self {
            genre: (!genre.is_empty()).then_some(genre),
            page: 1,
            ..self.clone()
        }
    }

    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page: page.max(1),
            ..self.clone()
        }
    }

    pub fn to_request(&self) -> SearchMoviesRequest {
        SearchMoviesRequest {
            q: self.q.clone(),
            order: self.order.clone(),
            genre: self.genre.clone(),
        }
    }
}

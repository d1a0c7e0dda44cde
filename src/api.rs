//! 数据服务模块
//!
//! `DataService` 是页面访问远端的唯一通道：
//! 读操作带查询参数，写操作一律 POST JSON，返回至少包含 success / message 的结构。
//! 会话中有 token 时附带 Bearer 凭据。

use std::rc::Rc;

use async_trait::async_trait;
use marquee_shared::protocol::{
    ApiRequest, AuthRequest, FavoritesRequest, GenresRequest, HttpMethod, MovieByIdRequest,
    RandomMoviesRequest, RegisterRequest, SaveToCollectionRequest, TopMoviesRequest,
    WatchlistRequest,
};
use marquee_shared::{
    AuthResponse, CONTENT_TYPE_JSON, Collection, Genre, HEADER_AUTHORIZATION,
    HEADER_CONTENT_TYPE, Movie,
};
use serde_json::Value;

use crate::config::AppConfig;
use crate::error::{MarqueeError, MarqueeResult};
use crate::query::{MovieQuery, build_query};
use crate::request::{HttpClient, HttpRequest};
use crate::session::Session;

/// 抽象数据服务接口
#[async_trait(?Send)]
pub trait DataService {
    /// 读取资源，非 2xx 或解析失败均视为失败
    async fn fetch(&self, resource: &str, query: &[(String, String)]) -> MarqueeResult<Value>;

    /// 写入资源（POST JSON）
    async fn send(&self, resource: &str, payload: Value) -> MarqueeResult<Value>;
}

// =========================================================
// 实现层: HTTP 数据服务
// =========================================================

pub struct HttpDataService<C: HttpClient> {
    client: C,
    session: Session,
    config: Rc<AppConfig>,
}

impl<C: HttpClient> HttpDataService<C> {
    pub fn new(client: C, session: Session, config: Rc<AppConfig>) -> Self {
        Self {
            client,
            session,
            config,
        }
    }

    fn url(&self, resource: &str, query: &[(String, String)]) -> String {
        let url = self.config.resource_url(resource);
        if query.is_empty() {
            url
        } else {
            format!("{}?{}", url, build_query(query))
        }
    }

    // 认证头：每次请求时读取当前 token
    fn authorize(&self, req: HttpRequest) -> HttpRequest {
        match self.session.token() {
            Some(token) if !token.is_empty() => {
                req.with_header(HEADER_AUTHORIZATION, &format!("Bearer {}", token))
            }
            _ => req,
        }
    }
}

#[async_trait(?Send)]
impl<C: HttpClient> DataService for HttpDataService<C> {
    async fn fetch(&self, resource: &str, query: &[(String, String)]) -> MarqueeResult<Value> {
        let req = self.authorize(HttpRequest::new(&self.url(resource, query), HttpMethod::Get));
        let res = self
            .client
            .send(req)
            .await
            .map_err(|e| e.in_op_with("api.fetch", resource))?;

        if !res.ok() {
            return Err(MarqueeError::http_status(
                res.status,
                format!("request failed with status {}", res.status),
            )
            .in_op_with("api.fetch", resource));
        }

        res.json::<Value>()
            .map_err(|e| e.in_op_with("api.fetch", resource))
    }

    async fn send(&self, resource: &str, payload: Value) -> MarqueeResult<Value> {
        let req = HttpRequest::new(&self.url(resource, &[]), HttpMethod::Post)
            .with_header(HEADER_CONTENT_TYPE, CONTENT_TYPE_JSON)
            .with_body(&payload);
        let res = self
            .client
            .send(self.authorize(req))
            .await
            .map_err(|e| e.in_op_with("api.send", resource))?;

        // 写接口在 4xx 时也返回 {success: false, message}，优先按结构解析
        match res.json::<Value>() {
            Ok(value) => Ok(value),
            Err(_) if !res.ok() => Err(MarqueeError::http_status(
                res.status,
                format!("request failed with status {}", res.status),
            )
            .in_op_with("api.send", resource)),
            Err(e) => Err(e.in_op_with("api.send", resource)),
        }
    }
}

// =========================================================
// 业务门面: MovieApi
// =========================================================

/// 类型化的 API 客户端
#[derive(Clone)]
pub struct MovieApi {
    data: Rc<dyn DataService>,
}

impl MovieApi {
    pub fn new(data: Rc<dyn DataService>) -> Self {
        Self { data }
    }

    /// 按协议描述发起请求并解析响应
    pub async fn call<R: ApiRequest>(&self, req: &R) -> MarqueeResult<R::Response> {
        let value = match R::METHOD {
            HttpMethod::Get => self.data.fetch(&req.path(), &req.query()).await?,
            HttpMethod::Post => self.data.send(&req.path(), serde_json::to_value(req)?).await?,
        };
        serde_json::from_value(value)
            .map_err(|e| MarqueeError::from(e).in_op_with("api.decode", req.path()))
    }

    pub async fn top_movies(&self) -> MarqueeResult<Vec<Movie>> {
        self.call(&TopMoviesRequest).await
    }

    pub async fn random_movies(&self) -> MarqueeResult<Vec<Movie>> {
        self.call(&RandomMoviesRequest).await
    }

    pub async fn movie_by_id(&self, id: i64) -> MarqueeResult<Movie> {
        self.call(&MovieByIdRequest { id }).await
    }

    pub async fn search_movies(&self, query: &MovieQuery) -> MarqueeResult<Vec<Movie>> {
        self.call(&query.to_request()).await
    }

    pub async fn genres(&self) -> MarqueeResult<Vec<Genre>> {
        self.call(&GenresRequest).await
    }

    pub async fn register(
        &self,
        name: String,
        email: String,
        password: String,
    ) -> MarqueeResult<AuthResponse> {
        self.call(&RegisterRequest {
            name,
            email,
            password,
        })
        .await
    }

    pub async fn authenticate(&self, email: String, password: String) -> MarqueeResult<AuthResponse> {
        self.call(&AuthRequest { email, password }).await
    }

    pub async fn favorites(&self) -> MarqueeResult<Vec<Movie>> {
        self.call(&FavoritesRequest).await
    }

    pub async fn watchlist(&self) -> MarqueeResult<Vec<Movie>> {
        self.call(&WatchlistRequest).await
    }

    pub async fn collection(&self, collection: Collection) -> MarqueeResult<Vec<Movie>> {
        match collection {
            Collection::Favorite => self.favorites().await,
            Collection::Watchlist => self.watchlist().await,
        }
    }

    pub async fn save_to_collection(
        &self,
        movie_id: i64,
        collection: Collection,
    ) -> MarqueeResult<AuthResponse> {
        self.call(&SaveToCollectionRequest {
            movie_id,
            collection,
        })
        .await
    }
}

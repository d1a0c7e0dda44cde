use serde::{Deserialize, Deserializer, Serialize};

pub mod protocol;

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
pub const CONTENT_TYPE_JSON: &str = "application/json";

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 后端对空列表返回 `null`，统一读作空 Vec
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    // 后端没有图片时字段缺省
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Actor {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: i64,
    #[serde(default)]
    pub tmdb_id: i64,
    pub title: String,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub release_year: i32,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub score: Option<f32>,
    #[serde(default)]
    pub popularity: Option<f32>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub poster_url: Option<String>,
    #[serde(default)]
    pub trailer_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub casting: Vec<Actor>,
}

impl Movie {
    /// 详情页路径，与 `/movies/(\d+)` 路由对应
    pub fn details_path(&self) -> String {
        format!("/movies/{}", self.id)
    }

    /// 从 YouTube 链接中取出视频 ID（`...?v=<id>`）
    pub fn trailer_video_id(&self) -> Option<&str> {
        let url = self.trailer_url.as_deref()?;
        let start = url.find("v=")? + 2;
        let id = &url[start..];
        let id = id.split('&').next().unwrap_or(id);
        if id.is_empty() { None } else { Some(id) }
    }
}

/// 用户收藏集合
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Favorite,
    Watchlist,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Favorite => "favorite",
            Collection::Watchlist => "watchlist",
        }
    }

    /// 保存成功后跳转的账户页面
    pub fn account_path(&self) -> &'static str {
        match self {
            Collection::Favorite => "/account/favorites",
            Collection::Watchlist => "/account/watchlist",
        }
    }
}

/// 写操作的统一返回结构
///
/// 至少包含 `success` 与 `message`，认证类接口额外携带 `jwt`。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub jwt: Option<String>,
}

impl AuthResponse {
    /// 返回非空的 token
    pub fn token(&self) -> Option<&str> {
        self.jwt.as_deref().filter(|t| !t.is_empty())
    }
}

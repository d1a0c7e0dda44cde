use crate::{AuthResponse, Collection, Genre, Movie};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// HTTP Methods for API Requests
///
/// Reads are always GET, writes are always POST.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
///
/// `path()` is relative to the API base (e.g. `movies/top`).
pub trait ApiRequest: Serialize {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The HTTP method.
    const METHOD: HttpMethod;

    /// The resource path (no leading slash, relative to the API base).
    fn path(&self) -> String;

    /// Query parameters for GET requests.
    fn query(&self) -> Vec<(String, String)> {
        Vec::new()
    }
}

// =========================================================
// Catalog Requests
// =========================================================

/// Top rated movies
#[derive(Debug, Serialize, Deserialize)]
pub struct TopMoviesRequest;

impl ApiRequest for TopMoviesRequest {
    type Response = Vec<Movie>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "movies/top".to_string()
    }
}

/// Random selection of movies
#[derive(Debug, Serialize, Deserialize)]
pub struct RandomMoviesRequest;

impl ApiRequest for RandomMoviesRequest {
    type Response = Vec<Movie>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "movies/random".to_string()
    }
}

/// A single movie by id
#[derive(Debug, Serialize, Deserialize)]
pub struct MovieByIdRequest {
    pub id: i64,
}

impl ApiRequest for MovieByIdRequest {
    type Response = Movie;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("movies/{}", self.id)
    }
}

/// Full-text search with optional ordering and genre filter
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SearchMoviesRequest {
    pub q: String,
    pub order: Option<String>,
    pub genre: Option<String>,
}

impl ApiRequest for SearchMoviesRequest {
    type Response = Vec<Movie>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "movies/search".to_string()
    }

    fn query(&self) -> Vec<(String, String)> {
        vec![
            ("q".to_string(), self.q.clone()),
            ("order".to_string(), self.order.clone().unwrap_or_default()),
            ("genre".to_string(), self.genre.clone().unwrap_or_default()),
        ]
    }
}

/// All genres
#[derive(Debug, Serialize, Deserialize)]
pub struct GenresRequest;

impl ApiRequest for GenresRequest {
    type Response = Vec<Genre>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "genres/".to_string()
    }
}

// =========================================================
// Account Requests
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl ApiRequest for RegisterRequest {
    type Response = AuthResponse;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "account/register/".to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthRequest {
    pub email: String,
    pub password: String,
}

impl ApiRequest for AuthRequest {
    type Response = AuthResponse;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "account/authenticate/".to_string()
    }
}

/// Movies saved in the user's favorites
#[derive(Debug, Serialize, Deserialize)]
pub struct FavoritesRequest;

impl ApiRequest for FavoritesRequest {
    type Response = Vec<Movie>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "account/favorites/".to_string()
    }
}

/// Movies saved in the user's watchlist
#[derive(Debug, Serialize, Deserialize)]
pub struct WatchlistRequest;

impl ApiRequest for WatchlistRequest {
    type Response = Vec<Movie>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "account/watchlist/".to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveToCollectionRequest {
    pub movie_id: i64,
    pub collection: Collection,
}

impl ApiRequest for SaveToCollectionRequest {
    type Response = AuthResponse;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "account/save-to-collection/".to_string()
    }
}

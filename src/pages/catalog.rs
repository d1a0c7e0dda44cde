//! 目录类页面：首页、电影列表、电影详情

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use marquee_shared::{Collection, Movie};

use super::{MovieListView, PageAction, PageContext, PageUnit, PageView};
use crate::query::MovieQuery;
use crate::route::PageKind;

/// 列表每页条数
pub const PAGE_SIZE: usize = 12;

const SAVE_FAILED_MESSAGE: &str = "We couldn't save the movie.";

// =========================================================
// 首页
// =========================================================

pub struct HomePage {
    ctx: PageContext,
}

impl HomePage {
    pub fn new(ctx: PageContext) -> Self {
        Self { ctx }
    }
}

impl PageUnit for HomePage {
    fn kind(&self) -> PageKind {
        PageKind::Home
    }

    fn on_mount(self: Rc<Self>) {
        let api = self.ctx.services.api.clone();
        self.ctx.load(
            "home.top_movies",
            async move { api.top_movies().await },
            |ctx, movies| {
                ctx.render(PageView::Home { movies });
            },
        );
    }
}

// =========================================================
// 电影列表
// =========================================================

pub struct MovieListPage {
    ctx: PageContext,
    query: MovieQuery,
    ready: Cell<bool>,
}

impl MovieListPage {
    pub fn new(ctx: PageContext) -> Self {
        let query = MovieQuery::from_location(&ctx.location);
        Self {
            ctx,
            query,
            ready: Cell::new(false),
        }
    }

    /// 客户端分页，页码越界时落到最后一页
    fn paginate(query: &MovieQuery, movies: Vec<Movie>) -> MovieListView {
        let total = movies.len();
        let page_count = total.div_ceil(PAGE_SIZE).max(1) as u32;
        let page = query.page.min(page_count);
        let start = (page as usize - 1) * PAGE_SIZE;

        MovieListView {
            query: query.with_page(page),
            movies: movies.into_iter().skip(start).take(PAGE_SIZE).collect(),
            total,
            page_count,
        }
    }
}

impl PageUnit for MovieListPage {
    fn kind(&self) -> PageKind {
        PageKind::MovieList
    }

    fn on_mount(self: Rc<Self>) {
        let api = self.ctx.services.api.clone();
        let query = self.query.clone();
        let this = self.clone();
        self.ctx.load(
            "movie_list.search",
            async move { api.search_movies(&query).await },
            move |ctx, movies| {
                let view = Self::paginate(&this.query, movies);
                if ctx.render(PageView::MovieList(view)) {
                    this.ready.set(true);
                }
            },
        );
    }

    fn dispatch(self: Rc<Self>, action: PageAction) {
        if !self.ready.get() {
            crate::log_debug!("[Page] MovieList not ready, {:?} ignored", action);
            return;
        }
        let next = match action {
            PageAction::ChangeOrder(order) => self.query.with_order(order),
            PageAction::ChangeGenre(genre) => self.query.with_genre(genre),
            PageAction::GoToPage(page) => self.query.with_page(page),
            other => {
                crate::log_debug!("[Page] MovieList ignores {:?}", other);
                return;
            }
        };
        self.ctx.navigate(&next.to_path());
    }
}

// =========================================================
// 电影详情
// =========================================================

pub struct MovieDetailsPage {
    ctx: PageContext,
    id: Option<i64>,
    movie: RefCell<Option<Movie>>,
    saving: Cell<bool>,
}

impl MovieDetailsPage {
    pub fn new(ctx: PageContext) -> Self {
        Self {
            ctx,
            id: None,
            movie: RefCell::new(None),
            saving: Cell::new(false),
        }
    }

    fn save(self: Rc<Self>, collection: Collection) {
        let Some(movie_id) = self.movie.borrow().as_ref().map(|m| m.id) else {
            return;
        };

        // 未登录时交给路由守卫处理
        if !self.ctx.services.session.is_authenticated() {
            self.ctx.navigate(&self.ctx.services.config.account_path);
            return;
        }
        if self.saving.replace(true) {
            return;
        }

        let api = self.ctx.services.api.clone();
        let this = self.clone();
        self.ctx.spawn(async move {
            let result = api.save_to_collection(movie_id, collection).await;
            this.saving.set(false);
            if !this.ctx.is_current() {
                return;
            }
            match result {
                Ok(resp) if resp.success => this.ctx.navigate(collection.account_path()),
                Ok(resp) => {
                    crate::log_warn!("[Page] save to {} rejected: {}", collection.as_str(), resp.message);
                    this.ctx.show_error(SAVE_FAILED_MESSAGE, false);
                }
                Err(e) => {
                    crate::log_error!("[Page] {}", e.in_op("movie_details.save"));
                    this.ctx.show_error(SAVE_FAILED_MESSAGE, false);
                }
            }
        });
    }
}

impl PageUnit for MovieDetailsPage {
    fn kind(&self) -> PageKind {
        PageKind::MovieDetails
    }

    fn attach_params(&mut self, params: Vec<String>) {
        self.id = params.first().and_then(|id| id.parse().ok());
    }

    fn on_mount(self: Rc<Self>) {
        let Some(id) = self.id else {
            self.ctx.render(PageView::NotFound);
            return;
        };

        let api = self.ctx.services.api.clone();
        let this = self.clone();
        self.ctx.load_or_else(
            "movie_details.load",
            async move { api.movie_by_id(id).await },
            move |ctx, movie: Movie| {
                this.movie.replace(Some(movie.clone()));
                ctx.render(PageView::MovieDetails(movie));
            },
            |ctx, err| {
                if err.is_not_found() {
                    ctx.render(PageView::NotFound);
                } else {
                    ctx.fail(err);
                }
            },
        );
    }

    fn dispatch(self: Rc<Self>, action: PageAction) {
        match action {
            PageAction::SaveToCollection(collection) => self.save(collection),
            other => crate::log_debug!("[Page] MovieDetails ignores {:?}", other),
        }
    }
}

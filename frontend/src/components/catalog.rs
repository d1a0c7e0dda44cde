use leptos::prelude::*;
use marquee::pages::MovieListView;
use marquee::PageAction;
use marquee_shared::{Collection, Genre, Movie};

use crate::{NavLink, use_shell};

const ORDERS: [(&str, &str); 5] = [
    ("", "Relevance"),
    ("popularity", "Popularity"),
    ("score", "Score"),
    ("name", "Name"),
    ("date", "Release date"),
];

#[component]
fn MovieCard(movie: Movie) -> impl IntoView {
    let title = movie.title.clone();
    let poster = movie.poster_url.clone().map(|src| {
        let alt = title.clone();
        view! { <img src=src alt=alt class="w-full aspect-[2/3] object-cover" /> }
    });

    view! {
        <NavLink to=movie.details_path() class="card card-compact bg-base-100 shadow hover:shadow-lg">
            <figure>{poster}</figure>
            <div class="card-body">
                <h3 class="card-title text-sm">{title}</h3>
                <p class="text-xs text-base-content/70">{movie.release_year}</p>
            </div>
        </NavLink>
    }
}

#[component]
pub fn MovieGrid(movies: Vec<Movie>) -> impl IntoView {
    if movies.is_empty() {
        return view! { <p class="text-base-content/70">"No movies found."</p> }.into_any();
    }
    view! {
        <div class="grid grid-cols-2 sm:grid-cols-3 lg:grid-cols-6 gap-4">
            {movies.into_iter().map(|movie| view! { <MovieCard movie /> }).collect_view()}
        </div>
    }
    .into_any()
}

#[component]
pub fn HomeView(movies: Vec<Movie>) -> impl IntoView {
    view! {
        <section class="space-y-4">
            <h2 class="text-2xl font-bold">"Top movies"</h2>
            <MovieGrid movies />
        </section>
    }
}

/// 当前结果中出现过的类型，用作筛选项
fn genres_of(movies: &[Movie]) -> Vec<Genre> {
    let mut genres: Vec<Genre> = Vec::new();
    for genre in movies.iter().flat_map(|m| m.genres.iter()) {
        if !genres.iter().any(|g| g.id == genre.id) {
            genres.push(genre.clone());
        }
    }
    genres.sort_by(|a, b| a.name.cmp(&b.name));
    genres
}

#[component]
pub fn MovieListPanel(list: MovieListView) -> impl IntoView {
    let shell = use_shell();
    let MovieListView {
        query,
        movies,
        total,
        page_count,
    } = list;

    let current_order = query.order.clone().unwrap_or_default();
    let current_genre = query.genre.clone().unwrap_or_default();
    let genres = genres_of(&movies);
    let page = query.page;

    let order_options = ORDERS
        .iter()
        .map(|(value, label)| {
            let selected = *value == current_order;
            view! { <option value=*value selected=selected>{*label}</option> }
        })
        .collect_view();
    let genre_options = genres
        .into_iter()
        .map(|genre| {
            let value = genre.id.to_string();
            let selected = value == current_genre;
            view! { <option value=value selected=selected>{genre.name}</option> }
        })
        .collect_view();

    view! {
        <section class="space-y-4">
            <div class="flex flex-wrap items-end gap-4">
                <h2 class="text-2xl font-bold flex-1">
                    {format!("Results for \"{}\" ({})", query.q, total)}
                </h2>
                <select
                    class="select select-bordered select-sm"
                    on:change=move |ev| shell.dispatch(PageAction::ChangeOrder(event_target_value(&ev)))
                >
                    {order_options}
                </select>
                <select
                    class="select select-bordered select-sm"
                    on:change=move |ev| shell.dispatch(PageAction::ChangeGenre(event_target_value(&ev)))
                >
                    <option value="">"All genres"</option>
                    {genre_options}
                </select>
            </div>
            <MovieGrid movies />
            <Show when=move || { page_count > 1 }>
                <div class="join flex justify-center">
                    <button
                        class="join-item btn btn-sm"
                        disabled=move || page <= 1
                        on:click=move |_| shell.dispatch(PageAction::GoToPage(page.saturating_sub(1)))
                    >
                        "«"
                    </button>
                    <span class="join-item btn btn-sm btn-disabled">
                        {format!("Page {} of {}", page, page_count)}
                    </span>
                    <button
                        class="join-item btn btn-sm"
                        disabled=move || page >= page_count
                        on:click=move |_| shell.dispatch(PageAction::GoToPage(page + 1))
                    >
                        "»"
                    </button>
                </div>
            </Show>
        </section>
    }
}

#[component]
pub fn MovieDetailsView(movie: Movie) -> impl IntoView {
    let shell = use_shell();
    let trailer = movie.trailer_video_id().map(|id| {
        let src = format!("https://www.youtube.com/embed/{}", id);
        view! {
            <iframe class="w-full aspect-video rounded-box" src=src title="Trailer" allowfullscreen></iframe>
        }
    });
    let genres = movie
        .genres
        .iter()
        .map(|g| view! { <span class="badge badge-outline">{g.name.clone()}</span> })
        .collect_view();
    let cast = movie
        .casting
        .iter()
        .map(|actor| view! { <li>{actor.full_name()}</li> })
        .collect_view();
    let facts = format!(
        "{} · score {} · popularity {}",
        movie.release_year,
        movie.score.map(|s| s.to_string()).unwrap_or_else(|| "-".to_string()),
        movie.popularity.map(|p| p.to_string()).unwrap_or_else(|| "-".to_string()),
    );

    view! {
        <article class="grid md:grid-cols-[16rem_1fr] gap-6">
            <img src=movie.poster_url.clone().unwrap_or_default() alt=movie.title.clone() class="rounded-box w-64" />
            <div class="space-y-3">
                <h2 class="text-3xl font-bold">{movie.title.clone()}</h2>
                <h3 class="text-lg italic">{movie.tagline.clone().unwrap_or_default()}</h3>
                <p class="text-sm text-base-content/70">{facts}</p>
                <div class="flex flex-wrap gap-2">{genres}</div>
                <p>{movie.overview.clone().unwrap_or_default()}</p>
                <div class="flex gap-2">
                    <button
                        class="btn btn-primary btn-sm"
                        on:click=move |_| shell.dispatch(PageAction::SaveToCollection(Collection::Favorite))
                    >
                        "Add to favorites"
                    </button>
                    <button
                        class="btn btn-secondary btn-sm"
                        on:click=move |_| shell.dispatch(PageAction::SaveToCollection(Collection::Watchlist))
                    >
                        "Add to watchlist"
                    </button>
                </div>
                {trailer}
                <h4 class="font-semibold">"Cast"</h4>
                <ul class="list-disc list-inside">{cast}</ul>
            </div>
        </article>
    }
}

#[component]
pub fn LoadingView() -> impl IntoView {
    view! {
        <div class="flex justify-center py-16">
            <span class="loading loading-spinner loading-lg text-primary"></span>
        </div>
    }
}

#[component]
pub fn NotFoundView() -> impl IntoView {
    view! {
        <div class="text-center py-16">
            <h1 class="text-6xl font-bold text-error">"404"</h1>
            <p class="text-xl mt-4">"Page not found"</p>
        </div>
    }
}

#[component]
pub fn FailedView(message: String) -> impl IntoView {
    view! {
        <div role="alert" class="alert alert-error">
            <span>{message}</span>
        </div>
    }
}

mod common;

use std::time::Duration;

use common::{Harness, movie, movies};
use marquee::forms::{LoginForm, RegisterForm};
use marquee::pages::PAGE_SIZE;
use marquee::shared::Collection;
use marquee::{AppConfig, PageAction, PageKind, PageView, RouteTable};
use serde_json::json;

fn q(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

// =========================================================
// 路由解析
// =========================================================

#[test]
fn test_literal_entries_mount_their_variant_with_empty_params() {
    let h = Harness::new("/");
    for (path, kind) in [
        ("/", PageKind::Home),
        ("/movies", PageKind::MovieList),
        ("/account/register", PageKind::Register),
        ("/account/login", PageKind::Login),
    ] {
        let outcome = h.router.navigate(path);
        let route = outcome.mounted_route();
        assert_eq!(route.target, kind, "path {}", path);
        assert!(route.params.is_empty());
        assert_eq!(h.router.current_page().unwrap().kind(), kind);
    }
}

#[test]
fn test_literal_matches_ignore_query_string() {
    let h = Harness::new("/");
    let outcome = h.router.navigate("/movies?q=alien&order=rating");
    assert_eq!(outcome.mounted_route().target, PageKind::MovieList);
    assert_eq!(h.host.history().last().unwrap(), "/movies?q=alien&order=rating");
}

#[test]
fn test_capture_passes_id_to_details() {
    let mut h = Harness::new("/");
    h.data.respond("movies/42", movie(42, "Heat"));

    let outcome = h.router.navigate("/movies/42");
    assert_eq!(outcome.mounted_route().target, PageKind::MovieDetails);
    assert_eq!(outcome.mounted_route().params, vec!["42".to_string()]);

    h.settle();
    match h.view() {
        PageView::MovieDetails(m) => assert_eq!(m.title, "Heat"),
        other => panic!("unexpected view {:?}", other),
    }
    assert_eq!(h.data.calls_to("movies/42"), 1);
}

#[test]
fn test_three_entry_table_resolves_details_capture() {
    let table = RouteTable::builder()
        .route("/", PageKind::Home)
        .route("/movies", PageKind::MovieList)
        .capture(r"/movies/(\d+)", PageKind::MovieDetails)
        .build()
        .unwrap();
    let resolved = table.resolve("/movies/42");
    assert_eq!(resolved.target, PageKind::MovieDetails);
    assert_eq!(resolved.params, vec!["42".to_string()]);
}

#[test]
fn test_unmatched_paths_mount_not_found() {
    let mut h = Harness::new("/");
    for path in ["/nope", "/movies/abc", "/account/settings", "/Movies"] {
        let outcome = h.router.navigate(path);
        assert!(outcome.mounted_route().is_not_found(), "path {}", path);
        assert!(outcome.mounted_route().params.is_empty());
        h.settle();
        assert_eq!(h.view(), PageView::NotFound);
    }
    assert_eq!(h.data.call_count(), 0);
}

#[test]
fn test_resolution_is_idempotent() {
    let h = Harness::new("/");
    let first = h.router.navigate("/movies/7");
    let second = h.router.navigate("/movies/7");
    assert_eq!(first, second);
    assert_eq!(
        h.router.table().resolve("/account/"),
        h.router.table().resolve("/account/")
    );
}

// =========================================================
// 认证守卫与历史
// =========================================================

#[test]
fn test_gated_route_redirects_to_login_with_one_history_entry() {
    let h = Harness::new("/");
    let before = h.host.history_len();

    let outcome = h.router.navigate("/account/");

    assert!(outcome.is_redirect());
    assert_eq!(outcome.mounted_route().target, PageKind::Login);
    assert_eq!(h.host.history_len(), before + 1);
    assert_eq!(h.host.history().last().unwrap(), "/account/login");
    assert_eq!(h.kind(), PageKind::Login);
}

#[test]
fn test_back_forward_replay_keeps_history_length() {
    let mut h = Harness::new("/");
    h.data.respond("movies/top", movies(3));
    h.data.respond("movies/search", movies(3));
    h.data.respond("movies/3", movie(3, "Three"));
    h.router.initialize();

    h.router.navigate("/movies?q=three");
    h.router.navigate("/movies/3");
    h.settle();
    let len = h.host.history_len();

    h.host.back();
    assert_eq!(h.host.history_len(), len);
    assert_eq!(h.kind(), PageKind::MovieList);

    h.host.back();
    assert_eq!(h.host.history_len(), len);
    assert_eq!(h.kind(), PageKind::Home);

    h.host.forward();
    assert_eq!(h.host.history_len(), len);
    assert_eq!(h.kind(), PageKind::MovieList);
}

#[test]
fn test_popstate_replay_uses_query_string() {
    let mut h = Harness::new("/");
    h.data.respond("movies/search", movies(2));
    h.router.initialize();

    h.router.navigate("/movies?q=heat&genre=Crime");
    h.router.navigate("/");
    h.host.back();
    h.settle();

    let calls = h.data.calls.borrow();
    let last = calls.iter().rev().find(|c| c.resource == "movies/search").unwrap();
    assert_eq!(last.query, q(&[("q", "heat"), ("order", ""), ("genre", "Crime")]));
}

#[test]
fn test_replay_into_gated_entry_replaces_with_login() {
    let h = Harness::logged_in("/");
    h.router.initialize();
    h.router.navigate("/account/");
    h.router.navigator().logout();
    let len = h.host.history_len();

    h.host.back();

    assert_eq!(h.kind(), PageKind::Login);
    assert_eq!(h.host.history_len(), len);
    assert_eq!(h.host.history()[1], "/account/login");
}

#[test]
fn test_initialize_resolves_without_push() {
    let mut h = Harness::new("/movies/5");
    h.data.respond("movies/5", movie(5, "Five"));

    let outcome = h.router.initialize();

    assert_eq!(outcome.mounted_route().target, PageKind::MovieDetails);
    assert_eq!(h.host.history_len(), 1);
    assert!(h.host.has_popstate_listener());
    h.settle();
    assert!(matches!(h.view(), PageView::MovieDetails(_)));
}

#[test]
fn test_initial_gated_location_replaces_entry() {
    let h = Harness::new("/account/favorites");
    h.router.initialize();
    assert_eq!(h.kind(), PageKind::Login);
    assert_eq!(h.host.history(), vec!["/account/login".to_string()]);
}

#[test]
fn test_intercepted_link_pushes_entry() {
    let h = Harness::new("/");
    h.router.initialize();
    h.host.click_link("/account/register");
    assert_eq!(h.kind(), PageKind::Register);
    assert_eq!(h.host.history_len(), 2);
}

#[test]
fn test_view_transition_wraps_content_swap() {
    let h = Harness::new("/");
    h.host.view_transitions.set(true);
    h.router.navigate("/account/login");
    h.router.navigate("/account/register");
    assert_eq!(h.host.transitions_run.get(), 2);

    let mounted = h.host.mounted.borrow();
    assert_eq!(mounted.len(), 2);
    assert!(mounted[0].surface.is_detached());
    assert!(!mounted[1].surface.is_detached());
}

#[test]
fn test_swap_without_view_transition() {
    let h = Harness::new("/");
    h.router.navigate("/account/login");
    assert_eq!(h.host.transitions_run.get(), 0);
    assert_eq!(h.host.mounted.borrow().len(), 1);
}

// =========================================================
// 登录 / 注册
// =========================================================

#[test]
fn test_login_validation_aggregates_without_data_calls() {
    let mut h = Harness::new("/");
    h.router.navigate("/account/login");

    h.dispatch(PageAction::SubmitLogin(LoginForm {
        email: "a@b.c".to_string(),
        password: "pw".to_string(),
    }));
    h.settle();

    assert_eq!(h.data.call_count(), 0);
    let shown = h.alerts.shown.borrow();
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0], "Enter a valid email. Enter a valid password.");
}

#[test]
fn test_login_success_stores_token_and_unlocks_gated_routes() {
    let mut h = Harness::new("/");
    h.data.respond(
        "account/authenticate/",
        json!({"success": true, "message": "Welcome", "jwt": "jwt-123"}),
    );
    h.data.respond("account/favorites/", movies(2));
    h.router.navigate("/account/login");

    h.dispatch(PageAction::SubmitLogin(LoginForm {
        email: "someone@example.com".to_string(),
        password: "secret".to_string(),
    }));
    h.settle();

    assert_eq!(h.session.token().as_deref(), Some("jwt-123"));
    assert_eq!(h.kind(), PageKind::Account);

    let outcome = h.router.navigate("/account/favorites");
    assert!(!outcome.is_redirect());
    h.settle();
    match h.view() {
        PageView::Collection { collection, movies } => {
            assert_eq!(collection, Collection::Favorite);
            assert_eq!(movies.len(), 2);
        }
        other => panic!("unexpected view {:?}", other),
    }
}

#[test]
fn test_favorites_accept_null_movie_lists() {
    let mut h = Harness::logged_in("/");
    h.data.respond(
        "account/favorites/",
        json!([{
            "id": 8, "tmdb_id": 800, "title": "Stalker", "tagline": "",
            "release_year": 1979, "genres": null, "overview": "The Zone.",
            "score": 8.1, "popularity": 12.5, "keywords": null,
            "language": "ru", "poster_url": "", "trailer_url": "", "casting": null
        }]),
    );

    h.router.navigate("/account/favorites");
    h.settle();

    match h.view() {
        PageView::Collection { collection, movies } => {
            assert_eq!(collection, Collection::Favorite);
            assert_eq!(movies[0].title, "Stalker");
            assert!(movies[0].genres.is_empty());
        }
        other => panic!("unexpected view {:?}", other),
    }
    assert!(h.alerts.shown.borrow().is_empty());
}

#[test]
fn test_login_transport_failure_restores_form() {
    let mut h = Harness::new("/");
    h.data.fail("account/authenticate/", 500);
    h.router.navigate("/account/login");

    let form = LoginForm {
        email: "someone@example.com".to_string(),
        password: "secret".to_string(),
    };
    h.dispatch(PageAction::SubmitLogin(form.clone()));
    h.settle();

    assert!(!h.session.is_authenticated());
    assert_eq!(h.kind(), PageKind::Login);
    assert_eq!(h.view(), PageView::Login { submitting: false });
    assert_eq!(
        h.alerts.shown.borrow().as_slice(),
        ["request failed with status 500"]
    );

    // 表单可以再次提交
    h.dispatch(PageAction::SubmitLogin(form));
    h.settle();
    assert_eq!(h.data.calls_to("account/authenticate/"), 2);
}

#[test]
fn test_login_rejection_shows_server_message() {
    let mut h = Harness::new("/");
    h.data.respond(
        "account/authenticate/",
        json!({"success": false, "message": "Invalid credentials"}),
    );
    h.router.navigate("/account/login");

    h.dispatch(PageAction::SubmitLogin(LoginForm {
        email: "someone@example.com".to_string(),
        password: "wrong-pass".to_string(),
    }));
    h.settle();

    assert!(!h.session.is_authenticated());
    assert_eq!(h.kind(), PageKind::Login);
    assert_eq!(h.alerts.shown.borrow().as_slice(), ["Invalid credentials"]);
    assert_eq!(h.view(), PageView::Login { submitting: false });
}

#[test]
fn test_register_validation_blocks_request() {
    let mut h = Harness::new("/account/register");
    h.router.initialize();
    h.dispatch(PageAction::SubmitRegister(RegisterForm {
        name: "Al".to_string(),
        email: "al@example.com".to_string(),
        password: "secret".to_string(),
        password_confirm: "secreT".to_string(),
    }));
    h.settle();

    assert_eq!(h.data.call_count(), 0);
    assert_eq!(
        h.alerts.shown.borrow()[0],
        "Enter your complete name. Passwords do not match."
    );
}

#[test]
fn test_register_success_confirms_then_goes_to_login() {
    let mut h = Harness::new("/account/register");
    h.data.respond(
        "account/register/",
        json!({"success": true, "message": "Account created", "jwt": "fresh"}),
    );
    h.router.initialize();

    h.dispatch(PageAction::SubmitRegister(RegisterForm {
        name: "Alice Liddell".to_string(),
        email: "alice@example.com".to_string(),
        password: "wonderland".to_string(),
        password_confirm: "wonderland".to_string(),
    }));
    h.settle();

    assert_eq!(h.alerts.shown.borrow().as_slice(), ["Account created"]);
    assert!(!h.alerts.open.get());
    assert_eq!(
        h.executor.sleeps.borrow().as_slice(),
        [Duration::from_millis(2000)]
    );
    assert_eq!(h.session.token().as_deref(), Some("fresh"));
    assert_eq!(h.kind(), PageKind::Login);
    assert_eq!(h.host.history().last().unwrap(), "/account/login");

    let call = h.data.calls.borrow()[0].clone();
    assert_eq!(call.resource, "account/register/");
    assert_eq!(call.payload.unwrap()["email"], "alice@example.com");
}

#[test]
fn test_register_transport_failure_alerts() {
    let mut h = Harness::new("/account/register");
    h.data.fail("account/register/", 502);
    h.router.initialize();

    h.dispatch(PageAction::SubmitRegister(RegisterForm {
        name: "Alice Liddell".to_string(),
        email: "alice@example.com".to_string(),
        password: "wonderland".to_string(),
        password_confirm: "wonderland".to_string(),
    }));
    h.settle();

    assert_eq!(
        h.alerts.shown.borrow().as_slice(),
        ["request failed with status 502"]
    );
    assert_eq!(h.kind(), PageKind::Register);
    assert_eq!(h.view(), PageView::Register { submitting: false });
    assert!(h.executor.sleeps.borrow().is_empty());
    assert!(h.session.token().is_none());
}

#[test]
fn test_leaving_register_during_confirmation_closes_alert() {
    let config = AppConfig::default().with_register_confirm_delay(Duration::from_millis(500));
    let mut h = Harness::with_config("/account/register", config);
    h.data.respond(
        "account/register/",
        json!({"success": true, "message": "Account created"}),
    );
    h.data.respond("movies/top", movies(3));
    h.router.initialize();
    let release = h.executor.hold_next_sleep();

    h.dispatch(PageAction::SubmitRegister(RegisterForm {
        name: "Alice Liddell".to_string(),
        email: "alice@example.com".to_string(),
        password: "wonderland".to_string(),
        password_confirm: "wonderland".to_string(),
    }));
    h.settle();
    assert!(h.alerts.open.get());

    h.router.navigate("/");
    h.settle();
    release.send(()).unwrap();
    h.settle();

    assert!(!h.alerts.open.get());
    assert_eq!(h.kind(), PageKind::Home);
    assert_eq!(h.host.history().last().unwrap(), "/");
    assert_eq!(
        h.executor.sleeps.borrow().as_slice(),
        [Duration::from_millis(500)]
    );
}

// =========================================================
// 页面加载
// =========================================================

#[test]
fn test_home_issues_single_top_movies_request() {
    let mut h = Harness::new("/");
    h.data.respond("movies/top", movies(4));
    h.router.initialize();
    assert_eq!(h.view(), PageView::Loading);

    h.settle();

    assert_eq!(h.data.call_count(), 1);
    assert_eq!(h.data.calls_to("movies/top"), 1);
    match h.view() {
        PageView::Home { movies } => assert_eq!(movies.len(), 4),
        other => panic!("unexpected view {:?}", other),
    }
}

#[test]
fn test_home_failure_alerts_and_renders_fallback() {
    let mut h = Harness::new("/");
    h.data.fail("movies/top", 500);
    h.router.initialize();
    h.settle();

    assert_eq!(h.alerts.shown.borrow().len(), 1);
    assert!(matches!(h.view(), PageView::Failed { .. }));
}

#[test]
fn test_stale_details_completion_is_discarded() {
    let mut h = Harness::new("/");
    let first = h.data.defer("movies/1");
    let second = h.data.defer("movies/2");

    h.router.navigate("/movies/1");
    let stale_surface = h.router.current_page().unwrap().surface;
    h.settle();
    h.router.navigate("/movies/2");
    h.settle();

    second.send(movie(2, "Two")).unwrap();
    h.settle();
    first.send(movie(1, "One")).unwrap();
    h.settle();

    match h.view() {
        PageView::MovieDetails(m) => assert_eq!(m.id, 2),
        other => panic!("unexpected view {:?}", other),
    }
    assert!(stale_surface.is_detached());
    assert_eq!(stale_surface.snapshot(), PageView::Loading);
}

#[test]
fn test_stale_completion_before_current_leaves_loading() {
    let mut h = Harness::new("/");
    let first = h.data.defer("movies/1");
    let _second = h.data.defer("movies/2");

    h.router.navigate("/movies/1");
    h.settle();
    h.router.navigate("/movies/2");
    h.settle();

    first.send(movie(1, "One")).unwrap();
    h.settle();
    assert_eq!(h.view(), PageView::Loading);
}

#[test]
fn test_missing_movie_renders_not_found_without_alert() {
    let mut h = Harness::new("/");
    h.router.navigate("/movies/999");
    h.settle();

    assert_eq!(h.kind(), PageKind::MovieDetails);
    assert_eq!(h.view(), PageView::NotFound);
    assert!(h.alerts.shown.borrow().is_empty());
}

#[test]
fn test_details_server_error_alerts() {
    let mut h = Harness::new("/");
    h.data.fail("movies/8", 502);
    h.router.navigate("/movies/8");
    h.settle();

    assert!(matches!(h.view(), PageView::Failed { .. }));
    assert_eq!(h.alerts.shown.borrow().len(), 1);
}

#[test]
fn test_movie_list_reads_query_and_paginates() {
    let mut h = Harness::new("/");
    h.data.respond("movies/search", movies(30));
    h.router.navigate("/movies?q=star&order=rating&page=3");
    h.settle();

    let calls = h.data.calls.borrow().clone();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].query, q(&[("q", "star"), ("order", "rating"), ("genre", "")]));

    match h.view() {
        PageView::MovieList(view) => {
            assert_eq!(view.total, 30);
            assert_eq!(view.page_count, 3);
            assert_eq!(view.query.page, 3);
            assert_eq!(view.movies.len(), 30 - 2 * PAGE_SIZE);
            assert_eq!(view.movies[0].id, 25);
        }
        other => panic!("unexpected view {:?}", other),
    }
}

#[test]
fn test_movie_list_bindings_renavigate() {
    let mut h = Harness::new("/");
    h.data.respond("movies/search", movies(30));
    h.router.navigate("/movies?q=star&order=rating");
    h.settle();
    let first_page = h.router.current_page().unwrap();

    h.dispatch(PageAction::ChangeGenre("Drama".to_string()));
    assert_eq!(
        h.host.history().last().unwrap(),
        "/movies?q=star&order=rating&genre=Drama"
    );
    assert!(first_page.surface.is_detached());
    h.settle();

    h.dispatch(PageAction::GoToPage(2));
    assert_eq!(
        h.host.history().last().unwrap(),
        "/movies?q=star&order=rating&genre=Drama&page=2"
    );
    h.settle();

    h.dispatch(PageAction::ChangeOrder("title".to_string()));
    assert_eq!(
        h.host.history().last().unwrap(),
        "/movies?q=star&order=title&genre=Drama"
    );
    h.settle();
    assert_eq!(h.data.calls_to("movies/search"), 4);
}

#[test]
fn test_movie_list_ignores_bindings_until_ready() {
    let mut h = Harness::new("/");
    let _pending = h.data.defer("movies/search");
    h.router.navigate("/movies?q=star");
    h.settle();
    let len = h.host.history_len();

    h.dispatch(PageAction::ChangeOrder("rating".to_string()));

    assert_eq!(h.host.history_len(), len);
    assert_eq!(h.kind(), PageKind::MovieList);
}

#[test]
fn test_header_search_navigates_to_movie_list() {
    let h = Harness::new("/");
    h.router.navigator().search("the thing");
    assert_eq!(h.kind(), PageKind::MovieList);
    assert_eq!(h.host.history().last().unwrap(), "/movies?q=the+thing");
}

// =========================================================
// 收藏
// =========================================================

#[test]
fn test_save_when_logged_out_goes_through_login() {
    let mut h = Harness::new("/");
    h.data.respond("movies/3", movie(3, "Three"));
    h.router.navigate("/movies/3");
    h.settle();

    h.dispatch(PageAction::SaveToCollection(Collection::Favorite));

    assert_eq!(h.kind(), PageKind::Login);
    assert_eq!(h.data.calls_to("account/save-to-collection/"), 0);
}

#[test]
fn test_save_to_watchlist_then_shows_watchlist() {
    let mut h = Harness::logged_in("/");
    h.data.respond("movies/3", movie(3, "Three"));
    h.data.respond(
        "account/save-to-collection/",
        json!({"success": true, "message": "Saved"}),
    );
    h.data.respond("account/watchlist/", movies(1));
    h.router.navigate("/movies/3");
    h.settle();

    h.dispatch(PageAction::SaveToCollection(Collection::Watchlist));
    h.settle();

    let payload = h.data.calls.borrow()[1].payload.clone().unwrap();
    assert_eq!(payload, json!({"movie_id": 3, "collection": "watchlist"}));
    assert_eq!(h.kind(), PageKind::Watchlist);
    assert_eq!(h.host.history().last().unwrap(), "/account/watchlist");
    assert!(matches!(h.view(), PageView::Collection { .. }));
}

#[test]
fn test_save_failure_alerts() {
    let mut h = Harness::logged_in("/");
    h.data.respond("movies/3", movie(3, "Three"));
    h.data.respond(
        "account/save-to-collection/",
        json!({"success": false, "message": "nope"}),
    );
    h.router.navigate("/movies/3");
    h.settle();

    h.dispatch(PageAction::SaveToCollection(Collection::Favorite));
    h.settle();

    assert_eq!(h.kind(), PageKind::MovieDetails);
    assert_eq!(
        h.alerts.shown.borrow().as_slice(),
        ["We couldn't save the movie."]
    );
}

use leptos::prelude::*;
use marquee::forms::{LoginForm, RegisterForm};
use marquee::{PageAction, PageView};
use marquee_shared::{Collection, Movie};

use super::catalog::MovieGrid;
use crate::{NavLink, use_shell};

/// 表单提交中：直接读取页面的最新视图
fn submitting() -> Signal<bool> {
    let shell = use_shell();
    Signal::derive(move || {
        shell.content.view.with(|view| {
            matches!(
                view,
                PageView::Login { submitting: true } | PageView::Register { submitting: true }
            )
        })
    })
}

#[component]
fn TextField(
    #[prop(into)] id: String,
    #[prop(into)] label: String,
    #[prop(into)] kind: String,
    value: RwSignal<String>,
) -> impl IntoView {
    view! {
        <div class="form-control">
            <label class="label" for=id.clone()>
                <span class="label-text">{label}</span>
            </label>
            <input
                id=id
                type=kind
                class="input input-bordered"
                on:input=move |ev| value.set(event_target_value(&ev))
                prop:value=value
            />
        </div>
    }
}

#[component]
pub fn LoginView() -> impl IntoView {
    let shell = use_shell();
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let submitting = submitting();

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        shell.dispatch(PageAction::SubmitLogin(LoginForm {
            email: email.get_untracked(),
            password: password.get_untracked(),
        }));
    };

    view! {
        <div class="card w-full max-w-md mx-auto shadow-xl bg-base-100">
            <form class="card-body" on:submit=on_submit>
                <h2 class="card-title">"Log in"</h2>
                <TextField id="login-email" label="Email" kind="email" value=email />
                <TextField id="login-password" label="Password" kind="password" value=password />
                <button class="btn btn-primary mt-4" disabled=move || submitting.get()>
                    {move || if submitting.get() { "Logging in..." } else { "Log in" }}
                </button>
                <p class="text-sm">
                    "No account yet? "
                    <NavLink to="/account/register" class="link">"Register"</NavLink>
                </p>
            </form>
        </div>
    }
}

#[component]
pub fn RegisterView() -> impl IntoView {
    let shell = use_shell();
    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let password_confirm = RwSignal::new(String::new());
    let submitting = submitting();

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        shell.dispatch(PageAction::SubmitRegister(RegisterForm {
            name: name.get_untracked(),
            email: email.get_untracked(),
            password: password.get_untracked(),
            password_confirm: password_confirm.get_untracked(),
        }));
    };

    view! {
        <div class="card w-full max-w-md mx-auto shadow-xl bg-base-100">
            <form class="card-body" on:submit=on_submit>
                <h2 class="card-title">"Create an account"</h2>
                <TextField id="register-name" label="Full name" kind="text" value=name />
                <TextField id="register-email" label="Email" kind="email" value=email />
                <TextField id="register-password" label="Password" kind="password" value=password />
                <TextField
                    id="register-password-confirm"
                    label="Confirm password"
                    kind="password"
                    value=password_confirm
                />
                <button class="btn btn-primary mt-4" disabled=move || submitting.get()>
                    "Register"
                </button>
            </form>
        </div>
    }
}

#[component]
pub fn AccountView() -> impl IntoView {
    let shell = use_shell();
    view! {
        <section class="space-y-4">
            <h2 class="text-2xl font-bold">"My account"</h2>
            <ul class="menu bg-base-100 rounded-box w-64 shadow">
                <li><NavLink to=Collection::Favorite.account_path()>"Favorites"</NavLink></li>
                <li><NavLink to=Collection::Watchlist.account_path()>"Watchlist"</NavLink></li>
                <li><a on:click=move |_| shell.logout()>"Log out"</a></li>
            </ul>
        </section>
    }
}

#[component]
pub fn CollectionView(collection: Collection, movies: Vec<Movie>) -> impl IntoView {
    let title = match collection {
        Collection::Favorite => "Favorites",
        Collection::Watchlist => "Watchlist",
    };
    view! {
        <section class="space-y-4">
            <h2 class="text-2xl font-bold">{title}</h2>
            <MovieGrid movies />
        </section>
    }
}

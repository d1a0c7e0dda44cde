use leptos::prelude::*;

use crate::{NavLink, use_shell};

#[component]
pub fn SiteHeader() -> impl IntoView {
    let shell = use_shell();
    let (query, set_query) = signal(String::new());

    let on_search = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        shell.search(&query.get_untracked());
    };

    view! {
        <header class="navbar bg-base-100 shadow-sm gap-4">
            <div class="flex-1 gap-2">
                <NavLink to="/" class="btn btn-ghost text-xl">"Marquee"</NavLink>
                <NavLink to="/movies?q=" class="btn btn-ghost btn-sm">"Movies"</NavLink>
                <NavLink to="/account/" class="btn btn-ghost btn-sm">"My Account"</NavLink>
            </div>
            <form class="flex-none" on:submit=on_search>
                <input
                    type="search"
                    placeholder="Search movies"
                    class="input input-bordered input-sm w-48 md:w-64"
                    on:input=move |ev| set_query.set(event_target_value(&ev))
                    prop:value=query
                />
            </form>
            <Show when=move || shell.authenticated.get()>
                <button class="btn btn-outline btn-sm" on:click=move |_| shell.logout()>
                    "Log out"
                </button>
            </Show>
        </header>
    }
}

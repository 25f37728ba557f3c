//! Login, sign-up and the OAuth callback.

use leptos::*;
use leptos_router::*;

use skincart_auth::{CallbackOutcome, SignUp};

use crate::frontend::context::AppContext;
use crate::nav::login_notice;

#[component]
pub fn LoginPage(ctx: AppContext) -> impl IntoView {
    let query = use_query_map();
    let notice = move || login_notice(query.get().get("error").map(String::as_str));

    let username = create_rw_signal(String::new());
    let password = create_rw_signal(String::new());
    let error = create_rw_signal(None::<String>);
    let pending = create_rw_signal(false);

    let login_ctx = ctx.clone();
    let submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if pending.get() {
            return;
        }
        pending.set(true);
        let ctx = login_ctx.clone();
        let (user, pass) = (username.get(), password.get());
        spawn_local(async move {
            match ctx.session.login(&user, &pass).await {
                Ok(_) => ctx.sync(),
                Err(e) => error.set(Some(e.to_string())),
            }
            pending.set(false);
        });
    };

    let google_ctx = ctx.clone();
    view! {
        <div class="auth">
            <h2>"Sign in"</h2>
            {move || notice().map(|n| view! { <p class="notice">{n}</p> })}
            {move || error.get().map(|e| view! { <p class="error">{e}</p> })}
            <form on:submit=submit>
                <label for="username">"Username or email"</label>
                <input id="username" type="text"
                    prop:value=move || username.get()
                    on:input=move |ev| username.set(event_target_value(&ev))/>
                <label for="password">"Password"</label>
                <input id="password" type="password"
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))/>
                <button type="submit" disabled=move || pending.get()>
                    {move || if pending.get() { "Signing in..." } else { "Sign in" }}
                </button>
            </form>
            <button class="google" on:click=move |_| google_ctx.session.login_with_google()>
                "Continue with Google"
            </button>
            <p>"New here? " <A href="/signup">"Create an account"</A></p>
        </div>
    }
}

#[component]
pub fn SignUpPage(ctx: AppContext) -> impl IntoView {
    let full_name = create_rw_signal(String::new());
    let username = create_rw_signal(String::new());
    let password = create_rw_signal(String::new());
    let confirmation = create_rw_signal(String::new());
    let error = create_rw_signal(None::<String>);
    let pending = create_rw_signal(false);

    let submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if pending.get() {
            return;
        }
        let request = match SignUp::new(&username.get(), &password.get(), &confirmation.get()) {
            Ok(r) => r.with_full_name(full_name.get()),
            Err(e) => {
                error.set(Some(e.to_string()));
                return;
            }
        };
        pending.set(true);
        let ctx = ctx.clone();
        spawn_local(async move {
            match ctx.session.sign_up_with(request).await {
                Ok(_) => ctx.sync(),
                Err(e) => error.set(Some(e.to_string())),
            }
            pending.set(false);
        });
    };

    view! {
        <div class="auth">
            <h2>"Create an account"</h2>
            {move || error.get().map(|e| view! { <p class="error">{e}</p> })}
            <form on:submit=submit>
                <label for="full-name">"Full name"</label>
                <input id="full-name" type="text"
                    prop:value=move || full_name.get()
                    on:input=move |ev| full_name.set(event_target_value(&ev))/>
                <label for="username">"Email"</label>
                <input id="username" type="email"
                    prop:value=move || username.get()
                    on:input=move |ev| username.set(event_target_value(&ev))/>
                <label for="password">"Password"</label>
                <input id="password" type="password"
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))/>
                <label for="confirmation">"Confirm password"</label>
                <input id="confirmation" type="password"
                    prop:value=move || confirmation.get()
                    on:input=move |ev| confirmation.set(event_target_value(&ev))/>
                <button type="submit" disabled=move || pending.get()>"Sign up"</button>
            </form>
            <p>"Already registered? " <A href="/login">"Sign in"</A></p>
        </div>
    }
}

/// Landing page of the backend's OAuth redirect.
#[component]
pub fn CallbackPage(ctx: AppContext) -> impl IntoView {
    let location = use_location();

    create_effect(move |_| {
        let search = location.search.get_untracked();
        match ctx.session.complete_oauth_callback(&search) {
            Ok(CallbackOutcome::SignedIn { route, .. }) => {
                tracing::info!(%route, "signed in via google");
                ctx.sync();
            }
            Ok(CallbackOutcome::Rejected { missing }) => {
                tracing::warn!(?missing, "incomplete oauth callback");
            }
            Err(e) => tracing::error!("oauth callback failed: {e}"),
        }
    });

    view! { <p class="loading">"Signing you in..."</p> }
}

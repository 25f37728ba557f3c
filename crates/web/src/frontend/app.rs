//! Router, layout and the route gate.

use leptos::*;
use leptos_router::*;

use skincart_auth::{GateDecision, RouteGate};
use skincart_client::ClientConfig;

use crate::frontend::browser::BrowserNavigator;
use crate::frontend::context::AppContext;
use crate::frontend::pages::*;
use crate::nav::links_for;

#[component]
pub fn App() -> impl IntoView {
    view! {
        <Router>
            <Shell/>
        </Router>
    }
}

/// Builds the session once (it needs the router's navigate) and hands it to
/// every page explicitly.
#[component]
fn Shell() -> impl IntoView {
    let navigate = use_navigate();
    let navigator = BrowserNavigator::new(move |path| navigate(path, Default::default()));
    let ctx = AppContext::new(ClientConfig::from_env(), navigator);

    // Public pages.
    let (home, product, quiz, login, signup, callback, cart) = (
        ctx.clone(),
        ctx.clone(),
        ctx.clone(),
        ctx.clone(),
        ctx.clone(),
        ctx.clone(),
        ctx.clone(),
    );
    // Gated pages.
    let (checkout, orders, account, staff, manager) =
        (ctx.clone(), ctx.clone(), ctx.clone(), ctx.clone(), ctx.clone());

    view! {
        <div class="app">
            <Header ctx=ctx/>
            <main>
                <Routes>
                    <Route path="/" view=move || view! { <CatalogPage ctx=home.clone()/> }/>
                    <Route path="/products/:id" view=move || view! { <ProductPage ctx=product.clone()/> }/>
                    <Route path="/quiz" view=move || view! { <QuizPage ctx=quiz.clone()/> }/>
                    <Route path="/login" view=move || view! { <LoginPage ctx=login.clone()/> }/>
                    <Route path="/signup" view=move || view! { <SignUpPage ctx=signup.clone()/> }/>
                    <Route path="/callback" view=move || view! { <CallbackPage ctx=callback.clone()/> }/>
                    <Route path="/cart" view=move || view! { <CartPage ctx=cart.clone()/> }/>
                    <Route path="/payment/success" view=PaymentSuccessPage/>
                    <Route path="/payment/cancel" view=PaymentCancelPage/>
                    <Route path="/checkout" view=move || {
                        let page = checkout.clone();
                        view! { <Guarded ctx=checkout.clone()><CheckoutPage ctx=page.clone()/></Guarded> }
                    }/>
                    <Route path="/orders" view=move || {
                        let page = orders.clone();
                        view! { <Guarded ctx=orders.clone()><OrdersPage ctx=page.clone()/></Guarded> }
                    }/>
                    <Route path="/account" view=move || {
                        let page = account.clone();
                        view! { <Guarded ctx=account.clone()><AccountPage ctx=page.clone()/></Guarded> }
                    }/>
                    <Route path="/staff" view=move || {
                        let page = staff.clone();
                        view! { <Guarded ctx=staff.clone()><StaffPage ctx=page.clone()/></Guarded> }
                    }/>
                    <Route path="/manager" view=move || {
                        let page = manager.clone();
                        view! { <Guarded ctx=manager.clone()><ManagerPage ctx=page.clone()/></Guarded> }
                    }/>
                    <Route path="/*any" view=NotFoundPage/>
                </Routes>
            </main>
        </div>
    }
}

/// Renders its children only if the gate admits the current role at the
/// current path; otherwise redirects. Re-evaluated on login/logout.
#[component]
fn Guarded(ctx: AppContext, children: ChildrenFn) -> impl IntoView {
    let location = use_location();

    move || {
        ctx.identity.track();
        let path = location.pathname.get();
        match ctx.session.check_route(&path) {
            GateDecision::Allow => children().into_view(),
            GateDecision::Redirect(to) => {
                tracing::debug!(%path, %to, "route gate redirect");
                view! { <Redirect path=to/> }.into_view()
            }
        }
    }
}

#[component]
fn Header(ctx: AppContext) -> impl IntoView {
    let gate = RouteGate::default();
    let user = ctx.clone();

    let links = move || {
        let role = ctx.identity.get().map(|i| i.role);
        links_for(&gate, role)
            .into_iter()
            .map(|l| view! { <A href=l.href>{l.label}</A> })
            .collect_view()
    };

    let greeting = move || {
        user.identity.get().map(|i| {
            let logout = user.clone();
            view! {
                <span class="greeting">{format!("Hi, {}", i.display_name)}</span>
                <button on:click=move |_| logout.logout()>"Log out"</button>
            }
        })
    };

    view! {
        <header>
            <h1><A href="/">"SkinCart"</A></h1>
            <nav>{links}</nav>
            <div class="user">{greeting}</div>
        </header>
    }
}

#[component]
fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="not-found">
            <h2>"Page not found"</h2>
            <A href="/">"Back to the shop"</A>
        </div>
    }
}

//! Cart, checkout and the pages the payment provider returns to.

use leptos::*;
use leptos_router::*;

use skincart_client::Checkout;
use skincart_client::dto::{Cart, CartItem, Promotion};
use skincart_core::cart::format_minor_units;
use skincart_core::{CartTotals, ProductId};

use crate::frontend::context::AppContext;

fn load_cart(ctx: AppContext, reload: RwSignal<u32>) -> Resource<u32, Result<Cart, String>> {
    create_local_resource(
        move || reload.get(),
        move |_| {
            let ctx = ctx.clone();
            async move { ctx.api().get_cart().await.map_err(|e| ctx.report(&e)) }
        },
    )
}

#[component]
fn Totals(totals: CartTotals) -> impl IntoView {
    view! {
        <dl class="totals">
            <dt>"Items"</dt><dd>{totals.item_count}</dd>
            <dt>"Subtotal"</dt><dd>{format_minor_units(totals.subtotal)}</dd>
            {(totals.discount > 0).then(|| view! {
                <dt>"Discount"</dt><dd>{format!("-{}", format_minor_units(totals.discount))}</dd>
            })}
            <dt>"Total"</dt><dd class="total">{format_minor_units(totals.total)}</dd>
        </dl>
    }
}

#[component]
pub fn CartPage(ctx: AppContext) -> impl IntoView {
    let signed_in = {
        let ctx = ctx.clone();
        move || ctx.identity.get().is_some()
    };

    view! {
        <div class="cart">
            <h2>"Your cart"</h2>
            <Show when=signed_in fallback=|| view! {
                <p>"Please " <A href="/login">"sign in"</A> " to see your cart."</p>
            }>
                <CartContents ctx=ctx.clone()/>
            </Show>
        </div>
    }
}

#[component]
fn CartContents(ctx: AppContext) -> impl IntoView {
    let reload = create_rw_signal(0u32);
    let cart = load_cart(ctx.clone(), reload);
    let error = create_rw_signal(None::<String>);

    let change = move |id: ProductId, quantity: u32| {
        let ctx = ctx.clone();
        spawn_local(async move {
            let api = ctx.api();
            let result = if quantity == 0 {
                api.remove_from_cart(&id).await
            } else {
                api.set_cart_quantity(&id, quantity).await.map(|_| ())
            };
            match result {
                Ok(()) => reload.update(|n| *n += 1),
                Err(e) => error.set(Some(ctx.report(&e))),
            }
        });
    };

    view! {
        {move || error.get().map(|e| view! { <p class="error">{e}</p> })}
        <Suspense fallback=|| view! { <p class="loading">"Loading cart..."</p> }>
            {
                let change = change.clone();
                move || cart.get().map(|result| match result {
                    Ok(cart) if cart.is_empty() => view! {
                        <p>"Your cart is empty. " <A href="/">"Keep shopping"</A></p>
                    }.into_view(),
                    Ok(cart) => {
                        let totals = cart.totals(None);
                        view! {
                            <table>
                                <tbody>
                                    {cart.items.into_iter().map(|item| {
                                        view! { <CartRow item=item change=change.clone()/> }
                                    }).collect_view()}
                                </tbody>
                            </table>
                            <Totals totals=totals/>
                            <A href="/checkout">"Checkout"</A>
                        }.into_view()
                    }
                    Err(e) => view! { <p class="error">{e}</p> }.into_view(),
                })
            }
        </Suspense>
    }
}

#[component]
fn CartRow<F>(item: CartItem, change: F) -> impl IntoView
where
    F: Fn(ProductId, u32) + Clone + 'static,
{
    let line_total = item.line_total();
    let (dec, inc, remove) = (change.clone(), change.clone(), change);
    let (id_dec, id_inc, id_remove) = (item.product_id.clone(), item.product_id.clone(), item.product_id);
    let quantity = item.quantity;
    view! {
        <tr>
            <td>{item.name}</td>
            <td>{format_minor_units(item.unit_price)}</td>
            <td>
                <button on:click=move |_| dec(id_dec.clone(), quantity.saturating_sub(1))>"-"</button>
                <span>{quantity}</span>
                <button on:click=move |_| inc(id_inc.clone(), quantity.saturating_add(1))>"+"</button>
            </td>
            <td>{format_minor_units(line_total)}</td>
            <td><button on:click=move |_| remove(id_remove.clone(), 0)>"Remove"</button></td>
        </tr>
    }
}

/// The running promotion whose code matches `code`, ignoring case.
fn find_promotion(promotions: &[Promotion], code: &str) -> Option<Promotion> {
    let code = code.trim();
    if code.is_empty() {
        return None;
    }
    let now = chrono::Utc::now();
    promotions
        .iter()
        .find(|p| p.code.eq_ignore_ascii_case(code) && p.is_running(now))
        .cloned()
}

#[component]
pub fn CheckoutPage(ctx: AppContext) -> impl IntoView {
    let cart = load_cart(ctx.clone(), create_rw_signal(0));

    let promo_ctx = ctx.clone();
    let promotions = create_local_resource(
        || (),
        move |_| {
            let ctx = promo_ctx.clone();
            async move { ctx.api().active_promotions().await.unwrap_or_default() }
        },
    );

    let address = create_rw_signal(String::new());
    let code = create_rw_signal(String::new());
    let error = create_rw_signal(None::<String>);
    let pending = create_rw_signal(false);

    let promotion = create_memo(move |_| {
        promotions
            .get()
            .and_then(|list| find_promotion(&list, &code.get()))
    });
    let totals = move || {
        let discount = promotion.get().and_then(|p| p.discount().ok());
        cart.get().and_then(Result::ok).map(|c| c.totals(discount))
    };

    let pay = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if pending.get() {
            return;
        }
        let Some(Ok(current)) = cart.get() else {
            return;
        };
        pending.set(true);
        let ctx = ctx.clone();
        let (shipping, promo) = (address.get(), promotion.get());
        spawn_local(async move {
            let api = ctx.api();
            let checkout = Checkout::new(&api, &ctx.payment);
            let result = checkout
                .begin_and_redirect(&current, &shipping, promo.as_ref(), ctx.session.navigator())
                .await;
            if let Err(e) = result {
                error.set(Some(ctx.report(&e)));
            }
            pending.set(false);
        });
    };

    view! {
        <div class="checkout">
            <h2>"Checkout"</h2>
            {move || error.get().map(|e| view! { <p class="error">{e}</p> })}
            <Suspense fallback=|| view! { <p class="loading">"Loading..."</p> }>
                {move || totals().map(|t| view! { <Totals totals=t/> })}
            </Suspense>
            <form on:submit=pay>
                <label for="promo">"Promotion code"</label>
                <input id="promo" type="text"
                    prop:value=move || code.get()
                    on:input=move |ev| code.set(event_target_value(&ev))/>
                {move || {
                    let typed = !code.get().trim().is_empty();
                    match promotion.get() {
                        Some(p) => Some(view! { <p class="promo-ok">{format!("{}: {}% off", p.title, p.discount_percent)}</p> }.into_view()),
                        None if typed => Some(view! { <p class="promo-bad">"Code not valid"</p> }.into_view()),
                        None => None,
                    }
                }}
                <label for="address">"Shipping address"</label>
                <textarea id="address"
                    prop:value=move || address.get()
                    on:input=move |ev| address.set(event_target_value(&ev))/>
                <button type="submit" disabled=move || pending.get()>
                    {move || if pending.get() { "Redirecting to payment..." } else { "Pay now" }}
                </button>
            </form>
        </div>
    }
}

#[component]
pub fn PaymentSuccessPage() -> impl IntoView {
    view! {
        <div class="payment-result">
            <h2>"Thank you!"</h2>
            <p>"Your payment went through. We'll email you when your order ships."</p>
            <A href="/orders">"View my orders"</A>
        </div>
    }
}

#[component]
pub fn PaymentCancelPage() -> impl IntoView {
    view! {
        <div class="payment-result">
            <h2>"Payment cancelled"</h2>
            <p>"No charge was made. Your order is waiting in your order list."</p>
            <A href="/orders">"View my orders"</A>
        </div>
    }
}

//! Storefront catalog, product detail and reviews.

use leptos::*;
use leptos_router::*;

use skincart_client::dto::{NewFeedback, Product, ProductQuery};
use skincart_core::cart::format_minor_units;
use skincart_core::{ProductId, SkinType};

use crate::frontend::context::AppContext;

#[component]
pub fn CatalogPage(ctx: AppContext) -> impl IntoView {
    let search = create_rw_signal(String::new());
    let skin_type = create_rw_signal(None::<SkinType>);

    let products_ctx = ctx.clone();
    let products = create_local_resource(
        move || (search.get(), skin_type.get()),
        move |(q, skin_type)| {
            let ctx = products_ctx.clone();
            async move {
                let query = ProductQuery {
                    q: Some(q.trim().to_string()).filter(|q| !q.is_empty()),
                    skin_type,
                    ..ProductQuery::default()
                };
                ctx.api().list_products(&query).await.map_err(|e| ctx.report(&e))
            }
        },
    );

    let promo_ctx = ctx.clone();
    let promotions = create_local_resource(
        || (),
        move |_| {
            let ctx = promo_ctx.clone();
            async move { ctx.api().active_promotions().await.unwrap_or_default() }
        },
    );

    view! {
        <div class="catalog">
            <div class="promotions">
                {move || promotions.get().map(|promos| promos.into_iter().map(|p| view! {
                    <div class="promotion">
                        <strong>{p.title}</strong>
                        <span>{format!(" {}% off with code {}", p.discount_percent, p.code)}</span>
                    </div>
                }).collect_view())}
            </div>

            <div class="filters">
                <input type="search" placeholder="Search products"
                    prop:value=move || search.get()
                    on:change=move |ev| search.set(event_target_value(&ev))/>
                <select on:change=move |ev| skin_type.set(event_target_value(&ev).parse().ok())>
                    <option value="">"All skin types"</option>
                    {SkinType::ALL.iter().map(|s| view! {
                        <option value=s.as_str()>{s.label()}</option>
                    }).collect_view()}
                </select>
            </div>

            <Suspense fallback=|| view! { <p class="loading">"Loading products..."</p> }>
                {move || products.get().map(|result| match result {
                    Ok(items) if items.is_empty() => view! { <p>"No products match."</p> }.into_view(),
                    Ok(items) => view! {
                        <div class="product-grid">
                            {items.into_iter().map(|p| view! { <ProductCard product=p/> }).collect_view()}
                        </div>
                    }.into_view(),
                    Err(e) => view! { <p class="error">{e}</p> }.into_view(),
                })}
            </Suspense>
        </div>
    }
}

#[component]
fn ProductCard(product: Product) -> impl IntoView {
    let href = format!("/products/{}", product.id);
    view! {
        <A href=href class="product-card">
            {product.image_url.map(|src| view! { <img src=src alt=""/> })}
            <h3>{product.name}</h3>
            {product.brand.map(|b| view! { <p class="brand">{b}</p> })}
            <p class="price">{format_minor_units(product.price)}</p>
        </A>
    }
}

#[component]
pub fn ProductPage(ctx: AppContext) -> impl IntoView {
    let params = use_params_map();
    let product_id = move || {
        params
            .get()
            .get("id")
            .and_then(|id| id.parse::<ProductId>().ok())
    };

    let product_ctx = ctx.clone();
    let product = create_local_resource(product_id, move |id| {
        let ctx = product_ctx.clone();
        async move {
            let id = id.ok_or_else(|| "Unknown product".to_string())?;
            ctx.api().get_product(&id).await.map_err(|e| ctx.report(&e))
        }
    });

    let quantity = create_rw_signal(1u32);
    let message = create_rw_signal(None::<String>);

    let cart_ctx = ctx.clone();
    let add_to_cart = move |_| {
        if !cart_ctx.session.is_authenticated() {
            cart_ctx.session.navigate_guarded("/login");
            return;
        }
        let Some(id) = product_id() else { return };
        let ctx = cart_ctx.clone();
        let qty = quantity.get();
        spawn_local(async move {
            match ctx.api().add_to_cart(&id, qty).await {
                Ok(cart) => message.set(Some(format!("Added. {} item(s) in your cart.", cart.totals(None).item_count))),
                Err(e) => message.set(Some(ctx.report(&e))),
            }
        });
    };

    view! {
        <div class="product-detail">
            <Suspense fallback=|| view! { <p class="loading">"Loading..."</p> }>
                {move || product.get().map(|result| match result {
                    Ok(p) => {
                        let in_stock = p.in_stock();
                        let suits = p
                            .skin_types
                            .iter()
                            .map(|s| s.label())
                            .collect::<Vec<_>>()
                            .join(", ");
                        view! {
                            <h2>{p.name}</h2>
                            {p.image_url.map(|src| view! { <img src=src alt=""/> })}
                            <p class="price">{format_minor_units(p.price)}</p>
                            <p>{p.description}</p>
                            {(!suits.is_empty()).then(|| view! { <p class="suits">"Suits: " {suits}</p> })}
                            {p.average_rating.map(|r| view! { <p class="rating">{format!("Rated {r:.1} / 5")}</p> })}
                            <Show when=move || in_stock fallback=|| view! { <p class="out-of-stock">"Out of stock"</p> }>
                                <input type="number" min="1"
                                    prop:value=move || quantity.get().to_string()
                                    on:input=move |ev| {
                                        if let Ok(q) = event_target_value(&ev).parse::<u32>() {
                                            quantity.set(q.max(1));
                                        }
                                    }/>
                            </Show>
                        }.into_view()
                    }
                    Err(e) => view! { <p class="error">{e}</p> }.into_view(),
                })}
            </Suspense>
            <button on:click=add_to_cart>"Add to cart"</button>
            {move || message.get().map(|m| view! { <p class="message">{m}</p> })}
            {move || product_id().map(|id| view! { <Reviews ctx=ctx.clone() product_id=id/> })}
        </div>
    }
}

#[component]
fn Reviews(ctx: AppContext, product_id: ProductId) -> impl IntoView {
    let reload = create_rw_signal(0u32);

    let list_ctx = ctx.clone();
    let list_id = product_id.clone();
    let reviews = create_local_resource(
        move || reload.get(),
        move |_| {
            let ctx = list_ctx.clone();
            let id = list_id.clone();
            async move { ctx.api().product_feedback(&id).await.map_err(|e| ctx.report(&e)) }
        },
    );

    let rating = create_rw_signal(5u8);
    let comment = create_rw_signal(String::new());
    let error = create_rw_signal(None::<String>);

    let submit_ctx = ctx.clone();
    let submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let feedback = match NewFeedback::new(product_id.clone(), rating.get(), &comment.get()) {
            Ok(f) => f,
            Err(e) => {
                error.set(Some(e.to_string()));
                return;
            }
        };
        let ctx = submit_ctx.clone();
        spawn_local(async move {
            match ctx.api().submit_feedback(&feedback).await {
                Ok(_) => {
                    comment.set(String::new());
                    error.set(None);
                    reload.update(|n| *n += 1);
                }
                Err(e) => error.set(Some(ctx.report(&e))),
            }
        });
    };

    let signed_in = move || ctx.identity.get().is_some();

    view! {
        <section class="reviews">
            <h3>"Reviews"</h3>
            {move || reviews.get().map(|result| match result {
                Ok(list) if list.is_empty() => view! { <p>"No reviews yet."</p> }.into_view(),
                Ok(list) => list.into_iter().map(|f| view! {
                    <div class="review">
                        <strong>{f.author_name}</strong>
                        <span class="stars">{"★".repeat(f.rating as usize)}</span>
                        <p>{f.comment}</p>
                    </div>
                }).collect_view(),
                Err(e) => view! { <p class="error">{e}</p> }.into_view(),
            })}
            <Show when=signed_in>
                <form on:submit=submit.clone()>
                    <select on:change=move |ev| {
                        if let Ok(r) = event_target_value(&ev).parse::<u8>() {
                            rating.set(r);
                        }
                    }>
                        {(1..=5u8).rev().map(|r| view! {
                            <option value=r.to_string() selected=move || rating.get() == r>{format!("{r} stars")}</option>
                        }).collect_view()}
                    </select>
                    <textarea
                        prop:value=move || comment.get()
                        on:input=move |ev| comment.set(event_target_value(&ev))/>
                    <button type="submit">"Post review"</button>
                </form>
            </Show>
            {move || error.get().map(|e| view! { <p class="error">{e}</p> })}
        </section>
    }
}

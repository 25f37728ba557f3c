//! Staff back office: order fulfilment and catalog entry.

use leptos::*;

use skincart_client::dto::{NewProduct, Order};
use skincart_core::{OrderStatus, SkinType};

use crate::forms::parse_price;
use crate::frontend::context::AppContext;
use crate::frontend::pages::orders::order_cells;

#[component]
pub fn StaffPage(ctx: AppContext) -> impl IntoView {
    view! {
        <div class="staff">
            <h2>"Staff"</h2>
            <OrderBoard ctx=ctx.clone()/>
            <NewProductForm ctx=ctx/>
        </div>
    }
}

#[component]
fn OrderBoard(ctx: AppContext) -> impl IntoView {
    let reload = create_rw_signal(0u32);
    let error = create_rw_signal(None::<String>);

    let list_ctx = ctx.clone();
    let orders = create_local_resource(
        move || reload.get(),
        move |_| {
            let ctx = list_ctx.clone();
            async move { ctx.api().all_orders().await.map_err(|e| ctx.report(&e)) }
        },
    );

    let advance = move |order: Order, to: OrderStatus| {
        let ctx = ctx.clone();
        spawn_local(async move {
            match ctx.api().update_order_status(&order, to).await {
                Ok(_) => reload.update(|n| *n += 1),
                Err(e) => error.set(Some(ctx.report(&e))),
            }
        });
    };

    view! {
        <section class="order-board">
            <h3>"All orders"</h3>
            {move || error.get().map(|e| view! { <p class="error">{e}</p> })}
            <Suspense fallback=|| view! { <p class="loading">"Loading orders..."</p> }>
                {
                    let advance = advance.clone();
                    move || orders.get().map(|loaded| match loaded {
                        Ok(list) => view! {
                            <table>
                                <tbody>
                                    {list.into_iter().map(|order| {
                                        let cells = order_cells(&order);
                                        let buttons = order.status.next_statuses().iter().map(|to| {
                                            let (advance, order, to) = (advance.clone(), order.clone(), *to);
                                            view! {
                                                <button on:click=move |_| advance(order.clone(), to)>
                                                    {format!("Mark {}", to.as_str().to_lowercase())}
                                                </button>
                                            }
                                        }).collect_view();
                                        view! { <tr>{cells}<td>{buttons}</td></tr> }
                                    }).collect_view()}
                                </tbody>
                            </table>
                        }.into_view(),
                        Err(e) => view! { <p class="error">{e}</p> }.into_view(),
                    })
                }
            </Suspense>
        </section>
    }
}

#[component]
fn NewProductForm(ctx: AppContext) -> impl IntoView {
    let name = create_rw_signal(String::new());
    let brand = create_rw_signal(String::new());
    let description = create_rw_signal(String::new());
    let price = create_rw_signal(String::new());
    let stock = create_rw_signal(String::new());
    let skin_types = create_rw_signal(Vec::<SkinType>::new());
    let message = create_rw_signal(None::<String>);

    let submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let Some(price_minor) = parse_price(&price.get()) else {
            message.set(Some("Enter a price like 12.99".to_string()));
            return;
        };
        let product = NewProduct {
            name: name.get().trim().to_string(),
            brand: Some(brand.get().trim().to_string()).filter(|b| !b.is_empty()),
            description: description.get(),
            price: price_minor,
            category: None,
            skin_types: skin_types.get(),
            image_url: None,
            stock: stock.get().trim().parse().unwrap_or(0),
        };
        if let Err(e) = product.validate() {
            message.set(Some(e.to_string()));
            return;
        }
        let ctx = ctx.clone();
        spawn_local(async move {
            match ctx.api().create_product(&product).await {
                Ok(p) => {
                    message.set(Some(format!("Created {}", p.name)));
                    name.set(String::new());
                    price.set(String::new());
                }
                Err(e) => message.set(Some(ctx.report(&e))),
            }
        });
    };

    view! {
        <section class="new-product">
            <h3>"Add a product"</h3>
            <form on:submit=submit>
                <input placeholder="Name" prop:value=move || name.get()
                    on:input=move |ev| name.set(event_target_value(&ev))/>
                <input placeholder="Brand" prop:value=move || brand.get()
                    on:input=move |ev| brand.set(event_target_value(&ev))/>
                <textarea placeholder="Description" prop:value=move || description.get()
                    on:input=move |ev| description.set(event_target_value(&ev))/>
                <input placeholder="Price" prop:value=move || price.get()
                    on:input=move |ev| price.set(event_target_value(&ev))/>
                <input placeholder="Stock" type="number" prop:value=move || stock.get()
                    on:input=move |ev| stock.set(event_target_value(&ev))/>
                <fieldset>
                    {SkinType::ALL.iter().copied().map(|s| view! {
                        <label>
                            <input type="checkbox"
                                prop:checked=move || skin_types.with(|v| v.contains(&s))
                                on:change=move |ev| {
                                    let on = event_target_checked(&ev);
                                    skin_types.update(|v| {
                                        v.retain(|t| *t != s);
                                        if on {
                                            v.push(s);
                                        }
                                    });
                                }/>
                            {s.label()}
                        </label>
                    }).collect_view()}
                </fieldset>
                <button type="submit">"Create"</button>
            </form>
            {move || message.get().map(|m| view! { <p class="message">{m}</p> })}
        </section>
    }
}

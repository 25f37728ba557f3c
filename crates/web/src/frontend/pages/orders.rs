//! The signed-in customer's orders.

use leptos::*;

use skincart_client::dto::Order;
use skincart_core::cart::format_minor_units;

use crate::frontend::context::AppContext;

/// Summary cells shared with the staff order board.
pub(super) fn order_cells(order: &Order) -> impl IntoView {
    let items = order
        .items
        .iter()
        .map(|l| format!("{} x{}", l.name, l.quantity))
        .collect::<Vec<_>>()
        .join(", ");
    view! {
        <td>{order.id.to_string()}</td>
        <td>{order.created_at.format("%Y-%m-%d").to_string()}</td>
        <td>{items}</td>
        <td>{format_minor_units(order.total_amount)}</td>
        <td class="status">{order.status.as_str()}</td>
    }
}

#[component]
pub fn OrdersPage(ctx: AppContext) -> impl IntoView {
    let reload = create_rw_signal(0u32);
    let error = create_rw_signal(None::<String>);

    let list_ctx = ctx.clone();
    let orders = create_local_resource(
        move || reload.get(),
        move |_| {
            let ctx = list_ctx.clone();
            async move { ctx.api().my_orders().await.map_err(|e| ctx.report(&e)) }
        },
    );

    let cancel = move |order: Order| {
        let ctx = ctx.clone();
        spawn_local(async move {
            match ctx.api().cancel_order(&order).await {
                Ok(_) => reload.update(|n| *n += 1),
                Err(e) => error.set(Some(ctx.report(&e))),
            }
        });
    };

    view! {
        <div class="orders">
            <h2>"My orders"</h2>
            {move || error.get().map(|e| view! { <p class="error">{e}</p> })}
            <Suspense fallback=|| view! { <p class="loading">"Loading orders..."</p> }>
                {
                    let cancel = cancel.clone();
                    move || orders.get().map(|loaded| match loaded {
                        Ok(list) if list.is_empty() => view! { <p>"You have no orders yet."</p> }.into_view(),
                        Ok(list) => view! {
                            <table>
                                <tbody>
                                    {list.into_iter().map(|order| {
                                        let cells = order_cells(&order);
                                        let cancellable = order.status.customer_can_cancel();
                                        let cancel = cancel.clone();
                                        view! {
                                            <tr>
                                                {cells}
                                                <td>
                                                    {cancellable.then(|| view! {
                                                        <button on:click=move |_| cancel(order.clone())>"Cancel"</button>
                                                    })}
                                                </td>
                                            </tr>
                                        }
                                    }).collect_view()}
                                </tbody>
                            </table>
                        }.into_view(),
                        Err(e) => view! { <p class="error">{e}</p> }.into_view(),
                    })
                }
            </Suspense>
        </div>
    }
}

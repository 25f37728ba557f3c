//! Manager back office: users and promotions.

use chrono::{Duration, Utc};
use leptos::*;

use skincart_client::dto::NewPromotion;
use skincart_core::{PromotionId, Role, UserId};

use crate::forms::parse_percent;
use crate::frontend::context::AppContext;

#[component]
pub fn ManagerPage(ctx: AppContext) -> impl IntoView {
    view! {
        <div class="manager">
            <h2>"Manager"</h2>
            <Users ctx=ctx.clone()/>
            <Promotions ctx=ctx/>
        </div>
    }
}

#[component]
fn Users(ctx: AppContext) -> impl IntoView {
    let reload = create_rw_signal(0u32);
    let error = create_rw_signal(None::<String>);

    let list_ctx = ctx.clone();
    let users = create_local_resource(
        move || reload.get(),
        move |_| {
            let ctx = list_ctx.clone();
            async move { ctx.api().list_users().await.map_err(|e| ctx.report(&e)) }
        },
    );

    let role_ctx = ctx.clone();
    let set_role = move |id: UserId, role: Role| {
        let ctx = role_ctx.clone();
        spawn_local(async move {
            match ctx.api().change_role(&id, role).await {
                Ok(_) => reload.update(|n| *n += 1),
                Err(e) => error.set(Some(ctx.report(&e))),
            }
        });
    };
    let remove = move |id: UserId| {
        let ctx = ctx.clone();
        spawn_local(async move {
            match ctx.api().delete_user(&id).await {
                Ok(()) => reload.update(|n| *n += 1),
                Err(e) => error.set(Some(ctx.report(&e))),
            }
        });
    };

    view! {
        <section class="users">
            <h3>"Users"</h3>
            {move || error.get().map(|e| view! { <p class="error">{e}</p> })}
            <Suspense fallback=|| view! { <p class="loading">"Loading users..."</p> }>
                {
                    let (set_role, remove) = (set_role.clone(), remove.clone());
                    move || users.get().map(|loaded| match loaded {
                        Ok(list) => view! {
                            <table>
                                <tbody>
                                    {list.into_iter().map(|u| {
                                        let (set_role, remove) = (set_role.clone(), remove.clone());
                                        let (id_role, id_remove) = (u.id.clone(), u.id.clone());
                                        let current = u.role;
                                        view! {
                                            <tr>
                                                <td>{u.full_name}</td>
                                                <td>{u.email}</td>
                                                <td>
                                                    <select on:change=move |ev| {
                                                        if let Ok(role) = event_target_value(&ev).parse::<Role>() {
                                                            set_role(id_role.clone(), role);
                                                        }
                                                    }>
                                                        {Role::ALL.iter().copied().map(|r| view! {
                                                            <option value=r.as_str() selected={r == current}>{r.as_str()}</option>
                                                        }).collect_view()}
                                                    </select>
                                                </td>
                                                <td><button on:click=move |_| remove(id_remove.clone())>"Delete"</button></td>
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
        </section>
    }
}

#[component]
fn Promotions(ctx: AppContext) -> impl IntoView {
    let reload = create_rw_signal(0u32);
    let message = create_rw_signal(None::<String>);

    let list_ctx = ctx.clone();
    let promotions = create_local_resource(
        move || reload.get(),
        move |_| {
            let ctx = list_ctx.clone();
            async move { ctx.api().list_promotions().await.map_err(|e| ctx.report(&e)) }
        },
    );

    let remove_ctx = ctx.clone();
    let remove = move |id: PromotionId| {
        let ctx = remove_ctx.clone();
        spawn_local(async move {
            match ctx.api().delete_promotion(&id).await {
                Ok(()) => reload.update(|n| *n += 1),
                Err(e) => message.set(Some(ctx.report(&e))),
            }
        });
    };

    let code = create_rw_signal(String::new());
    let title = create_rw_signal(String::new());
    let percent = create_rw_signal(String::new());
    let days = create_rw_signal(7i64);

    let create = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let Some(discount_percent) = parse_percent(&percent.get()) else {
            message.set(Some("Discount must be a whole percent between 1 and 100".to_string()));
            return;
        };
        let starts_at = Utc::now();
        let promotion = NewPromotion {
            code: code.get().trim().to_uppercase(),
            title: title.get().trim().to_string(),
            description: String::new(),
            discount_percent,
            starts_at,
            ends_at: starts_at + Duration::days(days.get().max(1)),
            banner_url: None,
        };
        if let Err(e) = promotion.validate() {
            message.set(Some(e.to_string()));
            return;
        }
        let ctx = ctx.clone();
        spawn_local(async move {
            match ctx.api().create_promotion(&promotion).await {
                Ok(p) => {
                    message.set(Some(format!("Promotion {} created", p.code)));
                    reload.update(|n| *n += 1);
                }
                Err(e) => message.set(Some(ctx.report(&e))),
            }
        });
    };

    view! {
        <section class="promotions-admin">
            <h3>"Promotions"</h3>
            <Suspense fallback=|| view! { <p class="loading">"Loading promotions..."</p> }>
                {
                    let remove = remove.clone();
                    move || promotions.get().map(|loaded| match loaded {
                        Ok(list) => list.into_iter().map(|p| {
                            let remove = remove.clone();
                            let id = p.id.clone();
                            let running = p.is_running(Utc::now());
                            view! {
                                <div class="promotion" class:running=running>
                                    <strong>{p.code}</strong>
                                    {format!(" {} ({}% off, until {})", p.title, p.discount_percent, p.ends_at.format("%Y-%m-%d"))}
                                    <button on:click=move |_| remove(id.clone())>"Delete"</button>
                                </div>
                            }
                        }).collect_view(),
                        Err(e) => view! { <p class="error">{e}</p> }.into_view(),
                    })
                }
            </Suspense>
            <form on:submit=create>
                <input placeholder="Code" prop:value=move || code.get()
                    on:input=move |ev| code.set(event_target_value(&ev))/>
                <input placeholder="Title" prop:value=move || title.get()
                    on:input=move |ev| title.set(event_target_value(&ev))/>
                <input placeholder="% off" prop:value=move || percent.get()
                    on:input=move |ev| percent.set(event_target_value(&ev))/>
                <input type="number" min="1" prop:value=move || days.get().to_string()
                    on:input=move |ev| {
                        if let Ok(d) = event_target_value(&ev).parse::<i64>() {
                            days.set(d);
                        }
                    }/>
                <button type="submit">"Create promotion"</button>
            </form>
            {move || message.get().map(|m| view! { <p class="message">{m}</p> })}
        </section>
    }
}

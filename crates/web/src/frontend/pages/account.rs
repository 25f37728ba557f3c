//! Profile of the signed-in user.

use leptos::*;

use skincart_client::dto::ProfileUpdate;
use skincart_core::{Identity, SkinType};

use crate::frontend::context::AppContext;

#[component]
pub fn AccountPage(ctx: AppContext) -> impl IntoView {
    let initial = ctx.identity.get_untracked();
    let full_name = create_rw_signal(initial.as_ref().map(|i| i.display_name.clone()).unwrap_or_default());
    let skin_type = create_rw_signal(initial.as_ref().and_then(|i| i.skin_type));
    let message = create_rw_signal(None::<String>);

    let save_ctx = ctx.clone();
    let save = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let update = ProfileUpdate {
            full_name: Some(full_name.get().trim().to_string()).filter(|n| !n.is_empty()),
            skin_type: skin_type.get(),
            avatar_url: None,
        };
        let ctx = save_ctx.clone();
        spawn_local(async move {
            let profile = match ctx.api().update_profile(&update).await {
                Ok(p) => p,
                Err(e) => {
                    message.set(Some(ctx.report(&e)));
                    return;
                }
            };
            // Keep the stored session in step with the backend profile.
            if let Some(token) = ctx.session.token() {
                if let Err(e) = ctx.session.store().save(&Identity::from(profile), &token) {
                    tracing::warn!("could not persist profile: {e}");
                }
                ctx.session.reload();
                ctx.sync();
            }
            message.set(Some("Saved.".to_string()));
        });
    };

    let view_ctx = ctx.clone();
    view! {
        <div class="account">
            <h2>"My account"</h2>
            {move || view_ctx.identity.get().map(|i| view! {
                <p>{i.email}</p>
                <p>{format!("Role: {}", i.role)}</p>
                <p>{format!("Loyalty points: {}", i.loyalty_points)}</p>
            })}
            <form on:submit=save>
                <label for="full-name">"Name"</label>
                <input id="full-name" type="text"
                    prop:value=move || full_name.get()
                    on:input=move |ev| full_name.set(event_target_value(&ev))/>
                <label for="skin-type">"Skin type"</label>
                <select id="skin-type" on:change=move |ev| skin_type.set(event_target_value(&ev).parse().ok())>
                    <option value="" selected=move || skin_type.get().is_none()>"Not sure"</option>
                    {SkinType::ALL.iter().copied().map(|s| view! {
                        <option value=s.as_str() selected=move || skin_type.get() == Some(s)>{s.label()}</option>
                    }).collect_view()}
                </select>
                <button type="submit">"Save"</button>
            </form>
            {move || message.get().map(|m| view! { <p class="message">{m}</p> })}
            <button on:click=move |_| ctx.logout()>"Log out"</button>
        </div>
    }
}

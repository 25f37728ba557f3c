//! Skin-type quiz and the routines it recommends.

use leptos::*;

use skincart_client::dto::Quiz;
use skincart_core::{QuizWizard, SkinType, WizardStep};

use crate::frontend::context::AppContext;

#[component]
pub fn QuizPage(ctx: AppContext) -> impl IntoView {
    let quiz_ctx = ctx.clone();
    let quiz = create_local_resource(
        || (),
        move |_| {
            let ctx = quiz_ctx.clone();
            async move { ctx.api().active_quiz().await.map_err(|e| ctx.report(&e)) }
        },
    );
    let result = create_rw_signal(None::<SkinType>);
    let (wizard_ctx, routines_ctx) = (ctx.clone(), ctx);

    view! {
        <div class="quiz">
            <Suspense fallback=|| view! { <p class="loading">"Loading quiz..."</p> }>
                {
                    let ctx = wizard_ctx.clone();
                    move || quiz.get().map(|loaded| match loaded {
                        Ok(_) if result.get().is_some() => ().into_view(),
                        Ok(q) => match q.wizard() {
                            Ok(wizard) => view! { <Wizard ctx=ctx.clone() quiz=q wizard=wizard result=result/> }.into_view(),
                            Err(e) => view! { <p class="error">{e.to_string()}</p> }.into_view(),
                        },
                        Err(e) => view! { <p class="error">{e}</p> }.into_view(),
                    })
                }
            </Suspense>
            {move || result.get().map(|skin| view! {
                <h2>{format!("Your skin type: {}", skin.label())}</h2>
                <button on:click=move |_| result.set(None)>"Retake the quiz"</button>
                <Routines ctx=routines_ctx.clone() skin_type=skin/>
            })}
        </div>
    }
}

#[component]
fn Wizard(ctx: AppContext, quiz: Quiz, wizard: QuizWizard, result: RwSignal<Option<SkinType>>) -> impl IntoView {
    let wizard = create_rw_signal(wizard);
    let error = create_rw_signal(None::<String>);
    let pending = create_rw_signal(false);
    let quiz = store_value(quiz);

    let choose = move |option_id: String| {
        let outcome = wizard.try_update(|w| w.answer(&option_id));
        if let Some(Err(e)) = outcome {
            error.set(Some(e.to_string()));
        } else {
            error.set(None);
        }
    };
    let next = move |_| {
        if let Some(Err(e)) = wizard.try_update(|w| w.next()) {
            error.set(Some(e.to_string()));
        }
    };
    let back = move |_| {
        error.set(None);
        wizard.update(|w| {
            w.back();
        });
    };

    let submit = move |_| {
        if pending.get() {
            return;
        }
        let current = wizard.get();
        if !current.is_complete() {
            error.set(Some("Please answer every question.".to_string()));
            return;
        }
        // Anonymous visitors get the locally computed result.
        if !ctx.session.is_authenticated() {
            match current.dominant_skin_type() {
                Some(skin) => result.set(Some(skin)),
                None => error.set(Some("Your answers did not point to a skin type.".to_string())),
            }
            return;
        }
        pending.set(true);
        let ctx = ctx.clone();
        let quiz_id = quiz.with_value(|q| q.id.clone());
        spawn_local(async move {
            match ctx.api().submit_quiz(&quiz_id, &current).await {
                Ok(r) => result.set(Some(r.skin_type)),
                Err(e) => error.set(Some(ctx.report(&e))),
            }
            pending.set(false);
        });
    };

    let body = move || match wizard.with(QuizWizard::step) {
        WizardStep::Question(index) => {
            let (question, selected, total) = wizard.with(|w| {
                (
                    w.current().map(|q| q.id.clone()),
                    w.current_answer().map(str::to_string),
                    w.len(),
                )
            });
            let Some(question) = question.and_then(|id| quiz.with_value(|q| q.question(&id).cloned())) else {
                return ().into_view();
            };
            let choose = choose.clone();
            view! {
                <p class="progress">{format!("Question {} of {}", index + 1, total)}</p>
                <h3>{question.text}</h3>
                <ul class="options">
                    {question.options.into_iter().map(|o| {
                        let is_selected = selected.as_deref() == Some(o.id.as_str());
                        let choose = choose.clone();
                        let id = o.id.clone();
                        view! {
                            <li>
                                <button class:selected=is_selected on:click=move |_| choose(id.clone())>
                                    {o.text}
                                </button>
                            </li>
                        }
                    }).collect_view()}
                </ul>
                <div class="wizard-nav">
                    <button on:click=back disabled={index == 0}>"Back"</button>
                    <button on:click=next>"Next"</button>
                </div>
            }
            .into_view()
        }
        WizardStep::Review => {
            let answers = wizard.with(|w| w.submission()).unwrap_or_default();
            let submit = submit.clone();
            view! {
                <h3>"Review your answers"</h3>
                <ol>
                    {answers.into_iter().map(|a| {
                        let (q_text, o_text) = quiz.with_value(|q| {
                            let question = q.question(&a.question_id);
                            (
                                question.map(|x| x.text.clone()).unwrap_or_default(),
                                question
                                    .and_then(|x| x.options.iter().find(|o| o.id == a.option_id))
                                    .map(|o| o.text.clone())
                                    .unwrap_or_default(),
                            )
                        });
                        view! { <li><span>{q_text}</span>": " <strong>{o_text}</strong></li> }
                    }).collect_view()}
                </ol>
                <div class="wizard-nav">
                    <button on:click=back>"Back"</button>
                    <button on:click=submit disabled=move || pending.get()>"See my routine"</button>
                </div>
            }
            .into_view()
        }
    };

    view! {
        <h2>{quiz.with_value(|q| q.title.clone())}</h2>
        {body}
        {move || error.get().map(|e| view! { <p class="error">{e}</p> })}
    }
}

#[component]
fn Routines(ctx: AppContext, skin_type: SkinType) -> impl IntoView {
    let routines = create_local_resource(
        move || skin_type,
        move |skin| {
            let ctx = ctx.clone();
            async move { ctx.api().routines_for(skin).await.map_err(|e| ctx.report(&e)) }
        },
    );

    view! {
        <section class="routines">
            <Suspense fallback=|| view! { <p class="loading">"Finding routines..."</p> }>
                {move || routines.get().map(|loaded| match loaded {
                    Ok(list) if list.is_empty() => view! { <p>"No routines for this skin type yet."</p> }.into_view(),
                    Ok(list) => list.into_iter().map(|r| {
                        let steps = r
                            .ordered_steps()
                            .into_iter()
                            .map(|s| view! { <li><strong>{s.title.clone()}</strong>" " {s.instructions.clone()}</li> })
                            .collect_view();
                        view! {
                            <article class="routine">
                                <h3>{r.name.clone()}</h3>
                                <p>{r.description.clone()}</p>
                                <ol>{steps}</ol>
                            </article>
                        }
                    }).collect_view(),
                    Err(e) => view! { <p class="error">{e}</p> }.into_view(),
                })}
            </Suspense>
        </section>
    }
}

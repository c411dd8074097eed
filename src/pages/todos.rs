//! To-Do Page
//!
//! Remote CRUD against `/api/todos/`: list, add, toggle, delete, plus
//! per-todo subtasks and comments. Requires a login.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use serde_json::json;

use crate::api::{self, ApiError, TodoForm};
use crate::components::{EmptyState, ErrorBanner, Spinner};
use crate::context::use_app_context;
use crate::models::Todo;
use crate::session;

/// Priority options for the add form
const PRIORITIES: &[(&str, &str)] = &[
    ("low", "Low"),
    ("medium", "Medium"),
    ("high", "High"),
];

fn replace_todo(todos: &mut Vec<Todo>, updated: Todo) {
    if let Some(slot) = todos.iter_mut().find(|todo| todo.id == updated.id) {
        *slot = updated;
    }
}

#[component]
pub fn TodosPage() -> impl IntoView {
    if session::access_token().is_none() {
        return view! {
            <section class="page todos-page">
                <EmptyState message="Log in to manage your to-do list." />
                <A href="/login" attr:class="login-link">"Go to login"</A>
            </section>
        }
        .into_any();
    }

    let ctx = use_app_context();
    let (todos, set_todos) = signal(Vec::<Todo>::new());
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal::<Option<ApiError>>(None);
    let (retry, set_retry) = signal(0u32);

    let (new_title, set_new_title) = signal(String::new());
    let (new_category, set_new_category) = signal(String::new());
    let (priority, set_priority) = signal(String::from("medium"));

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        let _ = retry.get();
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api::list_todos().await {
                Ok(found) => set_todos.set(found),
                Err(err) => set_error.set(Some(err)),
            }
            set_loading.set(false);
        });
    });

    let create = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let title = new_title.get();
        if title.trim().is_empty() {
            return;
        }
        let form = TodoForm {
            title: title.trim().to_string(),
            description: String::new(),
            priority: priority.get(),
            category: new_category.get().trim().to_string(),
        };
        spawn_local(async move {
            match api::create_todo(&form).await {
                Ok(created) => {
                    set_todos.update(|todos| todos.insert(0, created));
                    set_new_title.set(String::new());
                    set_new_category.set(String::new());
                }
                Err(err) => ctx.toast_error(err.to_string()),
            }
        });
    };

    let toggle = move |todo: Todo| {
        spawn_local(async move {
            let body = json!({
                "title": todo.title,
                "description": todo.description,
                "priority": todo.priority,
                "dueDate": todo.due_date,
                "category": todo.category,
                "isCompleted": !todo.is_completed,
            });
            match api::update_todo(todo.id, &body).await {
                Ok(updated) => set_todos.update(|todos| replace_todo(todos, updated)),
                Err(err) => ctx.toast_error(err.to_string()),
            }
        });
    };

    let remove = move |id: u32| {
        spawn_local(async move {
            match api::delete_todo(id).await {
                Ok(()) => set_todos.update(|todos| todos.retain(|todo| todo.id != id)),
                Err(err) => ctx.toast_error(err.to_string()),
            }
        });
    };

    view! {
        <section class="page todos-page">
            <h1>"To-Do List"</h1>

            <form class="todo-add-form" on:submit=create>
                <input
                    type="text"
                    placeholder="What needs doing?"
                    prop:value=move || new_title.get()
                    on:input=move |ev| set_new_title.set(event_target_value(&ev))
                />
                <input
                    type="text"
                    class="todo-category-input"
                    placeholder="Category"
                    prop:value=move || new_category.get()
                    on:input=move |ev| set_new_category.set(event_target_value(&ev))
                />
                <div class="priority-selector">
                    {PRIORITIES.iter().map(|(value, label)| {
                        let val = value.to_string();
                        let val_clone = val.clone();
                        let is_selected = move || priority.get() == val;
                        view! {
                            <button
                                type="button"
                                class=move || if is_selected() { "priority-btn active" } else { "priority-btn" }
                                on:click=move |_| set_priority.set(val_clone.clone())
                            >
                                {*label}
                            </button>
                        }
                    }).collect_view()}
                </div>
                <button type="submit">"Add"</button>
            </form>

            <Show when=move || loading.get()>
                <Spinner />
            </Show>

            {move || error.get().map(|err| view! {
                <ErrorBanner
                    message=err.to_string()
                    on_retry=move |_| set_retry.update(|v| *v += 1)
                />
            })}

            <Show when=move || !loading.get() && error.get().is_none()>
                <Show
                    when=move || !todos.get().is_empty()
                    fallback=|| view! { <EmptyState message="Nothing on your list yet." /> }
                >
                    <ul class="todo-list">
                        <For
                            each=move || todos.get()
                            key=|todo| todo.id
                            children=move |todo| view! {
                                <TodoItem todo=todo on_toggle=toggle on_remove=remove
                                    on_replace=move |updated| {
                                        set_todos.update(|todos| replace_todo(todos, updated));
                                    }
                                />
                            }
                        />
                    </ul>
                </Show>
            </Show>
        </section>
    }
    .into_any()
}

/// One todo row with expandable subtasks and comments
#[component]
fn TodoItem(
    todo: Todo,
    #[prop(into)] on_toggle: Callback<Todo>,
    #[prop(into)] on_remove: Callback<u32>,
    #[prop(into)] on_replace: Callback<Todo>,
) -> impl IntoView {
    let ctx = use_app_context();
    let id = todo.id;
    let (expanded, set_expanded) = signal(false);
    let (new_subtask, set_new_subtask) = signal(String::new());
    let (new_comment, set_new_comment) = signal(String::new());

    let toggle_todo = todo.clone();
    let subtask_total = todo.subtasks.len();
    let subtask_done = todo.subtasks.iter().filter(|s| s.is_completed).count();

    let add_subtask = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let title = new_subtask.get();
        if title.trim().is_empty() {
            return;
        }
        spawn_local(async move {
            match api::add_subtask(id, title.trim()).await {
                Ok(updated) => {
                    on_replace.run(updated);
                    set_new_subtask.set(String::new());
                }
                Err(err) => ctx.toast_error(err.to_string()),
            }
        });
    };

    let toggle_subtask = move |subtask_id: u32| {
        spawn_local(async move {
            match api::toggle_subtask(id, subtask_id).await {
                Ok(updated) => on_replace.run(updated),
                Err(err) => ctx.toast_error(err.to_string()),
            }
        });
    };

    let remove_comment = move |comment_id: u32| {
        spawn_local(async move {
            let refreshed = match api::delete_comment(id, comment_id).await {
                Ok(()) => api::todo_detail(id).await,
                Err(err) => Err(err),
            };
            match refreshed {
                Ok(updated) => on_replace.run(updated),
                Err(err) => ctx.toast_error(err.to_string()),
            }
        });
    };

    let add_comment = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let content = new_comment.get();
        if content.trim().is_empty() {
            return;
        }
        spawn_local(async move {
            match api::add_comment(id, content.trim()).await {
                Ok(updated) => {
                    on_replace.run(updated);
                    set_new_comment.set(String::new());
                }
                Err(err) => ctx.toast_error(err.to_string()),
            }
        });
    };

    view! {
        <li class="todo-item" class:completed=todo.is_completed>
            <div class="todo-row">
                <input
                    type="checkbox"
                    prop:checked=todo.is_completed
                    on:change=move |_| on_toggle.run(toggle_todo.clone())
                />
                <div class="todo-body" on:click=move |_| set_expanded.update(|v| *v = !*v)>
                    <span class="todo-title">{todo.title.clone()}</span>
                    <span class=format!("priority-tag {}", todo.priority)>
                        {todo.priority.clone()}
                    </span>
                    <Show when={let has = !todo.category.is_empty(); move || has}>
                        <span class="todo-category">{todo.category.clone()}</span>
                    </Show>
                    <Show when={let has = subtask_total > 0; move || has}>
                        <span class="subtask-progress">
                            {format!("{subtask_done}/{subtask_total}")}
                        </span>
                    </Show>
                </div>
                <button class="todo-delete-btn" on:click=move |_| on_remove.run(id)>
                    "×"
                </button>
            </div>

            <Show when=move || expanded.get()>
                <div class="todo-detail">
                    <ul class="subtask-list">
                        {todo.subtasks.iter().map(|subtask| {
                            let subtask_id = subtask.id;
                            view! {
                                <li class="subtask-row" class:completed=subtask.is_completed>
                                    <input
                                        type="checkbox"
                                        prop:checked=subtask.is_completed
                                        on:change=move |_| toggle_subtask(subtask_id)
                                    />
                                    <span>{subtask.title.clone()}</span>
                                </li>
                            }
                        }).collect_view()}
                    </ul>
                    <form class="subtask-add-form" on:submit=add_subtask>
                        <input
                            type="text"
                            placeholder="Add subtask..."
                            prop:value=move || new_subtask.get()
                            on:input=move |ev| set_new_subtask.set(event_target_value(&ev))
                        />
                        <button type="submit">"+"</button>
                    </form>

                    <ul class="comment-list">
                        {todo.comments.iter().map(|comment| {
                            let comment_id = comment.id;
                            view! {
                                <li class="comment-row">
                                    <span class="comment-author">{comment.user_name.clone()}</span>
                                    <span class="comment-content">{comment.content.clone()}</span>
                                    <button
                                        class="comment-delete-btn"
                                        on:click=move |_| remove_comment(comment_id)
                                    >
                                        "×"
                                    </button>
                                </li>
                            }
                        }).collect_view()}
                    </ul>
                    <form class="comment-add-form" on:submit=add_comment>
                        <input
                            type="text"
                            placeholder="Add comment..."
                            prop:value=move || new_comment.get()
                            on:input=move |ev| set_new_comment.set(event_target_value(&ev))
                        />
                        <button type="submit">"Post"</button>
                    </form>
                </div>
            </Show>
        </li>
    }
}

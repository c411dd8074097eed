//! StudyHall Frontend App
//!
//! Router shell: navbar, routed pages, footer and the toast stack.
//! Provides the store and `AppContext`, and restores the login session
//! from a stored token on startup.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;
use reactive_stores::Store;

use crate::api;
use crate::components::{EmptyState, Footer, Navbar, ToastStack};
use crate::context::AppContext;
use crate::pages::{
    CareersPage, CollegeDetailPage, CollegesPage, GpaPage, HomePage, LoginPage, NotesPage,
    ProfilePage, QuestionPapersPage, RegisterPage, SyllabusPage, TodosPage,
};
use crate::session;
use crate::store::{store_set_user, AppState};

#[component]
pub fn App() -> impl IntoView {
    let store = Store::new(AppState::default());
    let (reload_trigger, set_reload_trigger) = signal(0u32);

    provide_context(store);
    provide_context(AppContext::new(store, (reload_trigger, set_reload_trigger)));

    // A stored token means a returning user; the profile fetch fills
    // the navbar. An expired access token is re-minted from the refresh
    // token when one is stored; a stale pair 401s, which clears it.
    Effect::new(move |_| {
        if session::access_token().is_none() && session::refresh_token().is_none() {
            return;
        }
        spawn_local(async move {
            if session::access_token().is_none() {
                match api::refresh_session().await {
                    Ok(pair) => session::store_tokens(&pair.access, &pair.refresh),
                    Err(_) => return,
                }
            }
            if let Ok(user) = api::profile().await {
                store_set_user(&store, user);
            }
        });
    });

    view! {
        <Router>
            <Navbar />
            <main class="content">
                <Routes fallback=|| view! { <EmptyState message="Page not found." /> }>
                    <Route path=path!("/") view=HomePage />
                    <Route path=path!("/notes") view=NotesPage />
                    <Route path=path!("/syllabus") view=SyllabusPage />
                    <Route path=path!("/question-papers") view=QuestionPapersPage />
                    <Route path=path!("/colleges") view=CollegesPage />
                    <Route path=path!("/colleges/:id") view=CollegeDetailPage />
                    <Route path=path!("/careers") view=CareersPage />
                    <Route path=path!("/gpa") view=GpaPage />
                    <Route path=path!("/todos") view=TodosPage />
                    <Route path=path!("/login") view=LoginPage />
                    <Route path=path!("/register") view=RegisterPage />
                    <Route path=path!("/profile") view=ProfilePage />
                </Routes>
            </main>
            <Footer />
            <ToastStack />
        </Router>
    }
}

//! Section Browser Component
//!
//! One Program → Semester → Subject controller shared by the notes,
//! syllabus and question-paper pages. The selection lives in a single
//! `BrowseState`; every change is pushed into the URL query string and
//! mirrored into session storage, and a bare section URL restores the
//! stored selection. Browser back/forward flows back in through the
//! query-map effect.

use leptos::prelude::*;
use leptos_router::hooks::{use_navigate, use_query_map};

use crate::browse::{BrowseLevel, BrowseState};
use crate::components::{
    NotesList, PapersList, ProgramGrid, SemesterGrid, SubjectList, SyllabusList,
};
use crate::session;

/// Content areas with three-level browse navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Notes,
    Syllabus,
    Papers,
}

impl Section {
    pub fn path(&self) -> &'static str {
        match self {
            Section::Notes => "/notes",
            Section::Syllabus => "/syllabus",
            Section::Papers => "/question-papers",
        }
    }

    /// Session-storage key suffix
    pub fn key(&self) -> &'static str {
        match self {
            Section::Notes => "notes",
            Section::Syllabus => "syllabus",
            Section::Papers => "papers",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Section::Notes => "Notes",
            Section::Syllabus => "Syllabus",
            Section::Papers => "Question Papers",
        }
    }
}

/// Keep names already resolved when the ids did not change
fn merge(current: &BrowseState, mut parsed: BrowseState) -> BrowseState {
    if let (Some((id, name)), Some((parsed_id, _))) = (&current.program, &parsed.program) {
        if id == parsed_id {
            parsed.program = Some((*id, name.clone()));
        }
    }
    if let (Some((id, name)), Some((parsed_id, _))) = (&current.subject, &parsed.subject) {
        if id == parsed_id {
            parsed.subject = Some((*id, name.clone()));
        }
    }
    parsed
}

fn same_selection(a: &BrowseState, b: &BrowseState) -> bool {
    a.program.as_ref().map(|(id, _)| *id) == b.program.as_ref().map(|(id, _)| *id)
        && a.semester == b.semester
        && a.subject.as_ref().map(|(id, _)| *id) == b.subject.as_ref().map(|(id, _)| *id)
}

#[component]
pub fn SectionBrowser(section: Section) -> impl IntoView {
    let query = use_query_map();
    let navigate = use_navigate();

    // A bare section URL restores the stored selection; a URL with
    // parameters wins over storage.
    let initial = {
        let params = query.get_untracked();
        let from_url = BrowseState::from_params(
            params.get("program").as_deref(),
            params.get("semester").as_deref(),
            params.get("subject").as_deref(),
        );
        if from_url.is_top() {
            session::load_browse(section.key()).unwrap_or(from_url)
        } else {
            from_url
        }
    };
    let state = RwSignal::new(initial.clone());

    // Push the restored selection into the URL so the address bar and
    // the view agree from the first frame.
    {
        let navigate = navigate.clone();
        let restored_query = initial.to_query();
        if !restored_query.is_empty() {
            let target = format!("{}?{}", section.path(), restored_query);
            Effect::new(move |ran: Option<()>| {
                if ran.is_none() {
                    navigate(&target, Default::default());
                }
            });
        }
    }

    // Apply a selection change: state, session storage, URL.
    let apply = {
        let navigate = navigate.clone();
        move |next: BrowseState| {
            session::save_browse(section.key(), &next);
            state.set(next);
            let q = state.get_untracked().to_query();
            let target = if q.is_empty() {
                section.path().to_string()
            } else {
                format!("{}?{}", section.path(), q)
            };
            navigate(&target, Default::default());
        }
    };

    // Browser back/forward: adopt the URL's selection when it differs.
    Effect::new(move |_| {
        let params = query.get();
        let parsed = BrowseState::from_params(
            params.get("program").as_deref(),
            params.get("semester").as_deref(),
            params.get("subject").as_deref(),
        );
        let current = state.get_untracked();
        if !same_selection(&current, &parsed) {
            let merged = merge(&current, parsed);
            session::save_browse(section.key(), &merged);
            state.set(merged);
        }
    });

    let select_program = {
        let apply = apply.clone();
        move |(id, name): (u32, String)| {
            let mut next = state.get_untracked();
            next.select_program(id, name);
            apply(next);
        }
    };
    let select_semester = {
        let apply = apply.clone();
        move |semester: u8| {
            let mut next = state.get_untracked();
            next.select_semester(semester);
            apply(next);
        }
    };
    let select_subject = {
        let apply = apply.clone();
        move |(id, name): (u32, String)| {
            let mut next = state.get_untracked();
            next.select_subject(id, name);
            apply(next);
        }
    };
    // Callback so the back button's view closure stays Fn
    let go_back = Callback::new({
        let apply = apply.clone();
        move |_: ()| {
            let mut next = state.get_untracked();
            next.back();
            apply(next);
        }
    });

    // SemesterGrid resolves the program name for URLs restored bare
    let set_program_name = move |name: String| {
        state.update(|s| {
            if let Some((_, slot)) = &mut s.program {
                if slot.is_empty() {
                    *slot = name;
                }
            }
        });
    };

    let breadcrumb = move || {
        let current = state.get();
        let mut parts = vec![section.title().to_string()];
        if let Some((id, name)) = &current.program {
            parts.push(if name.is_empty() { format!("Program #{id}") } else { name.clone() });
        }
        if let Some(semester) = current.semester {
            parts.push(format!("Semester {semester}"));
        }
        if let Some((id, name)) = &current.subject {
            parts.push(if name.is_empty() { format!("Subject #{id}") } else { name.clone() });
        }
        parts.join(" › ")
    };

    view! {
        <div class="section-browser">
            <div class="browse-header">
                <p class="breadcrumb">{breadcrumb}</p>
                <Show when=move || !state.get().is_top()>
                    <button class="back-btn" on:click=move |_| go_back.run(())>
                        "← Back"
                    </button>
                </Show>
            </div>

            {move || {
                let current = state.get();
                match current.level() {
                    BrowseLevel::Programs => view! {
                        <ProgramGrid on_select=select_program.clone() />
                    }.into_any(),
                    BrowseLevel::Semesters => {
                        let (program_id, _) = current.program.clone().unwrap_or_default();
                        view! {
                            <SemesterGrid
                                program_id=program_id
                                on_select=select_semester.clone()
                                on_program_name=set_program_name
                            />
                        }.into_any()
                    }
                    BrowseLevel::Subjects => {
                        let (program_id, _) = current.program.clone().unwrap_or_default();
                        let semester = current.semester.unwrap_or(1);
                        view! {
                            <SubjectList
                                program_id=program_id
                                semester=semester
                                on_select=select_subject.clone()
                            />
                        }.into_any()
                    }
                    BrowseLevel::Content => {
                        let (subject_id, _) = current.subject.clone().unwrap_or_default();
                        let semester = current.semester.unwrap_or(1);
                        match section {
                            Section::Notes => view! {
                                <NotesList subject_id=subject_id semester=semester />
                            }.into_any(),
                            Section::Syllabus => view! {
                                <SyllabusList subject_id=subject_id />
                            }.into_any(),
                            Section::Papers => view! {
                                <PapersList subject_id=subject_id />
                            }.into_any(),
                        }
                    }
                }
            }}
        </div>
    }
}

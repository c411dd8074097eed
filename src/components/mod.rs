//! UI Components

mod browse_section;
mod college_card;
mod empty_state;
mod error_banner;
mod event_card;
mod footer;
mod hero;
mod navbar;
mod notes_list;
mod papers_list;
mod program_grid;
mod search_bar;
mod semester_grid;
mod spinner;
mod subject_list;
mod syllabus_list;
mod toast_stack;

pub use browse_section::{Section, SectionBrowser};
pub use college_card::CollegeCard;
pub use empty_state::EmptyState;
pub use error_banner::ErrorBanner;
pub use event_card::EventCard;
pub use footer::Footer;
pub use hero::Hero;
pub use navbar::Navbar;
pub use notes_list::NotesList;
pub use papers_list::PapersList;
pub use program_grid::ProgramGrid;
pub use search_bar::SearchBar;
pub use semester_grid::SemesterGrid;
pub use spinner::Spinner;
pub use subject_list::SubjectList;
pub use syllabus_list::SyllabusList;
pub use toast_stack::ToastStack;

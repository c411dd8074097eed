//! Routed Pages

mod careers;
mod college_detail;
mod colleges;
mod gpa;
mod home;
mod login;
mod notes;
mod profile;
mod question_papers;
mod register;
mod syllabus;
mod todos;

pub use careers::CareersPage;
pub use college_detail::CollegeDetailPage;
pub use colleges::CollegesPage;
pub use gpa::GpaPage;
pub use home::HomePage;
pub use login::LoginPage;
pub use notes::NotesPage;
pub use profile::ProfilePage;
pub use question_papers::QuestionPapersPage;
pub use register::RegisterPage;
pub use syllabus::SyllabusPage;
pub use todos::TodosPage;

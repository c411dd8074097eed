//! Shared Application State
//!
//! One repository per aggregate, all over the same SQLite connection.
//! Cloning the state clones Arc handles only.

use std::sync::Arc;

use crate::config::Config;
use crate::repository::{
    CollegeRepository, EventRepository, NoteRepository, ProgramRepository,
    QuestionPaperRepository, SharedConn, SubjectRepository, SyllabusRepository, TodoRepository,
    TokenRepository, UserRepository,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub programs: Arc<ProgramRepository>,
    pub subjects: Arc<SubjectRepository>,
    pub notes: Arc<NoteRepository>,
    pub syllabus: Arc<SyllabusRepository>,
    pub papers: Arc<QuestionPaperRepository>,
    pub colleges: Arc<CollegeRepository>,
    pub events: Arc<EventRepository>,
    pub todos: Arc<TodoRepository>,
    pub users: Arc<UserRepository>,
    pub tokens: Arc<TokenRepository>,
}

impl AppState {
    pub fn new(config: Config, conn: SharedConn) -> Self {
        Self {
            config: Arc::new(config),
            programs: Arc::new(ProgramRepository::new(conn.clone())),
            subjects: Arc::new(SubjectRepository::new(conn.clone())),
            notes: Arc::new(NoteRepository::new(conn.clone())),
            syllabus: Arc::new(SyllabusRepository::new(conn.clone())),
            papers: Arc::new(QuestionPaperRepository::new(conn.clone())),
            colleges: Arc::new(CollegeRepository::new(conn.clone())),
            events: Arc::new(EventRepository::new(conn.clone())),
            todos: Arc::new(TodoRepository::new(conn.clone())),
            users: Arc::new(UserRepository::new(conn.clone())),
            tokens: Arc::new(TokenRepository::new(conn)),
        }
    }
}

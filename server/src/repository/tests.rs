//! Repository Tests
//!
//! Each test runs against its own in-memory SQLite database.

use std::path::Path;

use chrono::{Duration, Utc};

use crate::auth::hash_token;
use crate::domain::{
    College, Event, EventType, InstitutionType, NewUser, Note, PaperStatus, Priority, Program,
    ProfilePatch, QuestionPaper, Subject, Syllabus, Todo,
};
use crate::repository::{
    open_db, CollegeRepository, EventRepository, NoteFilter, NoteRepository, ProgramRepository,
    QuestionPaperRepository, Repository, SearchableRepository, SharedConn, SubjectRepository,
    SyllabusRepository, TodoRepository, TokenKind, TokenRepository, UserRepository,
};

fn mem_db() -> SharedConn {
    open_db(Path::new(":memory:")).expect("Failed to init test DB")
}

fn make_program(name: &str, slug: &str) -> Program {
    Program::new(0, name.to_string(), slug.to_string())
}

fn make_subject(program: u32, semester: u8, code: &str) -> Subject {
    Subject {
        id: 0,
        code: code.to_string(),
        name: format!("Subject {code}"),
        program,
        program_name: String::new(),
        semester,
        credit_hours: 3,
        is_active: true,
    }
}

fn make_note(subject: u32, semester: u8, title: &str) -> Note {
    Note {
        id: 0,
        title: title.to_string(),
        subject,
        subject_name: String::new(),
        semester,
        description: String::new(),
        file_url: None,
        upload_date: Utc::now(),
        uploaded_by: None,
        uploaded_by_name: None,
        is_verified: false,
    }
}

fn make_syllabus(subject: u32, version: &str, is_current: bool) -> Syllabus {
    Syllabus {
        id: 0,
        subject,
        subject_name: String::new(),
        file_url: None,
        version: version.to_string(),
        is_current,
        is_active: true,
        description: String::new(),
        uploaded_by: None,
        upload_date: Utc::now(),
        last_updated: Utc::now(),
        view_count: 0,
        download_count: 0,
    }
}

fn make_paper(subject: u32, year: u16, semester: u8) -> QuestionPaper {
    QuestionPaper {
        id: uuid::Uuid::new_v4().to_string(),
        subject,
        subject_name: String::new(),
        year,
        semester,
        file_url: None,
        status: PaperStatus::Pending,
        uploaded_by: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
        verified_date: None,
        view_count: 0,
        download_count: 0,
    }
}

fn make_college(name: &str, rating: f64) -> College {
    College {
        id: 0,
        name: name.to_string(),
        slug: name.to_lowercase().replace(' ', "-"),
        established_year: Some(1990),
        location: "Kathmandu".to_string(),
        address: "Main Street".to_string(),
        contact: String::new(),
        email: String::new(),
        website: String::new(),
        affiliation: "TU".to_string(),
        accreditation: String::new(),
        institution_type: InstitutionType::Private,
        rating,
        total_students: None,
        facilities: vec!["Library".to_string()],
        courses_offered: vec!["BCA".to_string()],
        logo: None,
        image: None,
        description: String::new(),
        achievements: String::new(),
        scholarships_available: false,
        is_active: true,
        is_featured: false,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn make_event(title: &str, days_from_now: i64) -> Event {
    Event {
        id: 0,
        title: title.to_string(),
        date: (Utc::now() + Duration::days(days_from_now)).date_naive(),
        time: "10:00 AM".to_string(),
        location: "Auditorium".to_string(),
        event_type: EventType::Seminar,
        description: String::new(),
        speaker: None,
        registration_required: false,
        created_at: Utc::now(),
    }
}

fn make_todo(title: &str) -> Todo {
    let now = Utc::now();
    Todo {
        id: 0,
        title: title.to_string(),
        description: String::new(),
        priority: Priority::Medium,
        due_date: None,
        category: String::new(),
        is_completed: false,
        created_at: now,
        last_modified: now,
        owner: None,
        subtasks: Vec::new(),
        comments: Vec::new(),
    }
}

fn make_user(email: &str, username: &str) -> NewUser {
    NewUser {
        username: username.to_string(),
        email: email.to_string(),
        password_hash: "sha256$1$salt$hash".to_string(),
        first_name: String::new(),
        last_name: String::new(),
        is_verified: true,
    }
}

// ========================
// Programs and subjects
// ========================

#[tokio::test]
async fn test_program_create_and_find_by_slug() {
    let repo = ProgramRepository::new(mem_db());

    let created = repo.create(&make_program("BCA", "bca")).await.unwrap();
    assert!(created.id > 0);

    let found = repo.find_by_slug("bca").await.unwrap();
    assert_eq!(found.map(|p| p.id), Some(created.id));
    assert!(repo.find_by_slug("missing").await.unwrap().is_none());
}

#[tokio::test]
async fn test_program_slug_unique() {
    let repo = ProgramRepository::new(mem_db());

    repo.create(&make_program("BCA", "bca")).await.unwrap();
    let dup = repo.create(&make_program("BCA again", "bca")).await;
    assert!(dup.is_err());
}

#[tokio::test]
async fn test_subject_unique_per_program_semester() {
    let conn = mem_db();
    let programs = ProgramRepository::new(conn.clone());
    let subjects = SubjectRepository::new(conn);
    let program = programs.create(&make_program("BCA", "bca")).await.unwrap();

    subjects.create(&make_subject(program.id, 1, "CSC101")).await.unwrap();
    let dup = subjects.create(&make_subject(program.id, 1, "CSC101")).await;
    assert!(dup.is_err());

    // Same code in another semester is fine
    subjects.create(&make_subject(program.id, 2, "CSC101")).await.unwrap();
}

#[tokio::test]
async fn test_subject_rejects_bad_semester() {
    let conn = mem_db();
    let programs = ProgramRepository::new(conn.clone());
    let subjects = SubjectRepository::new(conn);
    let program = programs.create(&make_program("BCA", "bca")).await.unwrap();

    assert!(subjects.create(&make_subject(program.id, 0, "CSC100")).await.is_err());
    assert!(subjects.create(&make_subject(program.id, 9, "CSC109")).await.is_err());
}

#[tokio::test]
async fn test_subjects_grouped_by_semester() {
    let conn = mem_db();
    let programs = ProgramRepository::new(conn.clone());
    let subjects = SubjectRepository::new(conn);
    let program = programs.create(&make_program("BCA", "bca")).await.unwrap();

    subjects.create(&make_subject(program.id, 2, "CSC201")).await.unwrap();
    subjects.create(&make_subject(program.id, 1, "CSC101")).await.unwrap();
    subjects.create(&make_subject(program.id, 1, "CSC102")).await.unwrap();

    let grouped = subjects.grouped_by_semester(program.id).await.unwrap();
    assert_eq!(grouped.len(), 2);
    assert_eq!(grouped[0].0, 1);
    assert_eq!(grouped[0].1.len(), 2);
    assert_eq!(grouped[1].0, 2);

    // Joined program name is denormalized onto every row
    assert_eq!(grouped[0].1[0].program_name, "BCA");
}

#[tokio::test]
async fn test_subject_search() {
    let conn = mem_db();
    let programs = ProgramRepository::new(conn.clone());
    let subjects = SubjectRepository::new(conn);
    let program = programs.create(&make_program("BCA", "bca")).await.unwrap();

    let mut subject = make_subject(program.id, 1, "CSC101");
    subject.name = "Data Structures".to_string();
    subjects.create(&subject).await.unwrap();

    let hits = subjects.search("structures").await.unwrap();
    assert_eq!(hits.len(), 1);
    assert!(subjects.search("nothing").await.unwrap().is_empty());
}

// ========================
// Notes
// ========================

#[tokio::test]
async fn test_note_filtering() {
    let conn = mem_db();
    let programs = ProgramRepository::new(conn.clone());
    let subjects = SubjectRepository::new(conn.clone());
    let notes = NoteRepository::new(conn);
    let program = programs.create(&make_program("BCA", "bca")).await.unwrap();
    let s1 = subjects.create(&make_subject(program.id, 1, "CSC101")).await.unwrap();
    let s2 = subjects.create(&make_subject(program.id, 2, "CSC201")).await.unwrap();

    notes.create(&make_note(s1.id, 1, "Unit 1")).await.unwrap();
    notes.create(&make_note(s1.id, 1, "Unit 2")).await.unwrap();
    notes.create(&make_note(s2.id, 2, "Other")).await.unwrap();

    let filter = NoteFilter { subject: Some(s1.id), ..Default::default() };
    assert_eq!(notes.list_filtered(&filter).await.unwrap().len(), 2);

    let filter = NoteFilter { semester: Some(2), ..Default::default() };
    let found = notes.list_filtered(&filter).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].title, "Other");

    let filter = NoteFilter { search: Some("unit".to_string()), ..Default::default() };
    assert_eq!(notes.list_filtered(&filter).await.unwrap().len(), 2);
}

// ========================
// Syllabus
// ========================

#[tokio::test]
async fn test_syllabus_single_current_per_subject() {
    let conn = mem_db();
    let programs = ProgramRepository::new(conn.clone());
    let subjects = SubjectRepository::new(conn.clone());
    let syllabus = SyllabusRepository::new(conn);
    let program = programs.create(&make_program("BCA", "bca")).await.unwrap();
    let subject = subjects.create(&make_subject(program.id, 1, "CSC101")).await.unwrap();

    let first = syllabus.create(&make_syllabus(subject.id, "2021", true)).await.unwrap();
    let second = syllabus.create(&make_syllabus(subject.id, "2023", true)).await.unwrap();

    let first = syllabus.find_by_id(first.id).await.unwrap().unwrap();
    assert!(!first.is_current, "older syllabus should be unmarked");
    assert!(second.is_current);

    let listed = syllabus.list(Some(subject.id)).await.unwrap();
    assert_eq!(listed.iter().filter(|s| s.is_current).count(), 1);
}

#[tokio::test]
async fn test_syllabus_counters() {
    let conn = mem_db();
    let programs = ProgramRepository::new(conn.clone());
    let subjects = SubjectRepository::new(conn.clone());
    let syllabus = SyllabusRepository::new(conn);
    let program = programs.create(&make_program("BCA", "bca")).await.unwrap();
    let subject = subjects.create(&make_subject(program.id, 1, "CSC101")).await.unwrap();
    let created = syllabus.create(&make_syllabus(subject.id, "2021", true)).await.unwrap();

    syllabus.increment_view(created.id).await.unwrap();
    syllabus.increment_view(created.id).await.unwrap();
    syllabus.increment_download(created.id).await.unwrap();

    let found = syllabus.find_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(found.view_count, 2);
    assert_eq!(found.download_count, 1);
}

// ========================
// Question papers
// ========================

#[tokio::test]
async fn test_paper_unique_and_ordering() {
    let conn = mem_db();
    let programs = ProgramRepository::new(conn.clone());
    let subjects = SubjectRepository::new(conn.clone());
    let papers = QuestionPaperRepository::new(conn);
    let program = programs.create(&make_program("BCA", "bca")).await.unwrap();
    let subject = subjects.create(&make_subject(program.id, 1, "CSC101")).await.unwrap();

    papers.create(&make_paper(subject.id, 2022, 1)).await.unwrap();
    papers.create(&make_paper(subject.id, 2024, 1)).await.unwrap();
    papers.create(&make_paper(subject.id, 2024, 2)).await.unwrap();

    let dup = papers.create(&make_paper(subject.id, 2022, 1)).await;
    assert!(dup.is_err());

    // Newest year first, then semester ascending
    let listed = papers.list(Some(subject.id), None).await.unwrap();
    let order: Vec<(u16, u8)> = listed.iter().map(|p| (p.year, p.semester)).collect();
    assert_eq!(order, vec![(2024, 1), (2024, 2), (2022, 1)]);

    let only_2024 = papers.list(Some(subject.id), Some(2024)).await.unwrap();
    assert_eq!(only_2024.len(), 2);
}

// ========================
// Colleges and events
// ========================

#[tokio::test]
async fn test_college_ordering_and_search() {
    let repo = CollegeRepository::new(mem_db());

    repo.create(&make_college("Alpha College", 3.0)).await.unwrap();
    repo.create(&make_college("Beta Institute", 4.5)).await.unwrap();

    let listed = repo.list().await.unwrap();
    assert_eq!(listed[0].name, "Beta Institute");

    let hits = repo.search("alpha").await.unwrap();
    assert_eq!(hits.len(), 1);

    let featured = repo.list_filtered(None, true).await.unwrap();
    assert!(featured.is_empty());
}

#[tokio::test]
async fn test_events_upcoming_excludes_past() {
    let repo = EventRepository::new(mem_db());

    repo.create(&make_event("Past seminar", -7)).await.unwrap();
    repo.create(&make_event("Future seminar", 7)).await.unwrap();

    let upcoming = repo.list_upcoming(None).await.unwrap();
    assert_eq!(upcoming.len(), 1);
    assert_eq!(upcoming[0].title, "Future seminar");

    let seminars = repo.list_by_type(EventType::Seminar).await.unwrap();
    assert_eq!(seminars.len(), 2);
    assert!(repo.list_by_type(EventType::Webinar).await.unwrap().is_empty());
}

// ========================
// Todos
// ========================

#[tokio::test]
async fn test_todo_owner_scoping() {
    let conn = mem_db();
    let users = UserRepository::new(conn.clone());
    let todos = TodoRepository::new(conn);
    let alice = users.create(&make_user("alice@example.com", "alice")).await.unwrap();
    let bob = users.create(&make_user("bob@example.com", "bob")).await.unwrap();

    todos.create(&make_todo("Alice's task"), alice.id).await.unwrap();
    todos.create(&make_todo("Bob's task"), bob.id).await.unwrap();

    let mine = todos.list_for_owner(alice.id).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].title, "Alice's task");
    assert_eq!(mine[0].owner, Some(alice.id));
}

#[tokio::test]
async fn test_todo_subtasks_and_comments() {
    let conn = mem_db();
    let users = UserRepository::new(conn.clone());
    let todos = TodoRepository::new(conn);
    let user = users.create(&make_user("alice@example.com", "alice")).await.unwrap();
    let todo = todos.create(&make_todo("Task"), user.id).await.unwrap();

    let subtask = todos.add_subtask(todo.id, "Step one").await.unwrap();
    assert!(!subtask.is_completed);

    let toggled = todos.toggle_subtask(todo.id, subtask.id).await.unwrap().unwrap();
    assert!(toggled.is_completed);
    assert!(todos.toggle_subtask(todo.id, 9999).await.unwrap().is_none());

    todos.add_comment(todo.id, user.id, "alice", "Looks good").await.unwrap();

    let loaded = todos.find_by_id(todo.id).await.unwrap().unwrap();
    assert_eq!(loaded.subtasks.len(), 1);
    assert_eq!(loaded.comments.len(), 1);
    assert_eq!(loaded.comments[0].content, "Looks good");

    // Cascade on delete
    todos.delete(todo.id).await.unwrap();
    assert!(todos.find_by_id(todo.id).await.unwrap().is_none());
}

// ========================
// Handler compatibility
// ========================

// Axum handlers need Send futures; spawning exercises that bound for
// the lookups the auth extractor runs and for the transactional
// syllabus insert.
#[tokio::test]
async fn test_repository_futures_are_send() {
    let conn = mem_db();
    let users = UserRepository::new(conn.clone());
    let user = users.create(&make_user("alice@example.com", "alice")).await.unwrap();

    let found = tokio::spawn(async move { users.find_by_id(user.id).await })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.map(|u| u.id), Some(user.id));

    let programs = ProgramRepository::new(conn.clone());
    let subjects = SubjectRepository::new(conn.clone());
    let program = programs.create(&make_program("BCA", "bca")).await.unwrap();
    let subject = subjects.create(&make_subject(program.id, 1, "CSC101")).await.unwrap();

    let syllabus = SyllabusRepository::new(conn);
    let created = tokio::spawn(async move {
        syllabus.create(&make_syllabus(subject.id, "2024", true)).await
    })
    .await
    .unwrap()
    .unwrap();
    assert!(created.is_current);
}

// ========================
// Users and tokens
// ========================

#[tokio::test]
async fn test_user_uniqueness_and_profile_update() {
    let repo = UserRepository::new(mem_db());

    let user = repo.create(&make_user("alice@example.com", "alice")).await.unwrap();
    assert!(repo.email_taken("alice@example.com").await.unwrap());
    assert!(repo.username_taken("alice").await.unwrap());
    assert!(!repo.email_taken("new@example.com").await.unwrap());

    let patch = ProfilePatch {
        first_name: Some("Alice".to_string()),
        bio: Some("Hi there".to_string()),
        semester: Some(3),
        ..Default::default()
    };
    let updated = repo.update_profile(user.id, &patch).await.unwrap();
    assert_eq!(updated.first_name, "Alice");
    assert_eq!(updated.bio, "Hi there");
    assert_eq!(updated.semester, Some(3));
    // Untouched fields survive a partial patch
    assert_eq!(updated.email, "alice@example.com");
}

#[tokio::test]
async fn test_token_lifecycle() {
    let conn = mem_db();
    let users = UserRepository::new(conn.clone());
    let tokens = TokenRepository::new(conn);
    let user = users.create(&make_user("alice@example.com", "alice")).await.unwrap();

    let hash = hash_token("secret-token");
    tokens
        .insert(user.id, &hash, TokenKind::Access, Utc::now() + Duration::hours(24))
        .await
        .unwrap();

    assert_eq!(tokens.find_valid(&hash, TokenKind::Access).await.unwrap(), Some(user.id));
    // Wrong kind does not match
    assert_eq!(tokens.find_valid(&hash, TokenKind::Refresh).await.unwrap(), None);

    tokens.revoke(&hash).await.unwrap();
    assert_eq!(tokens.find_valid(&hash, TokenKind::Access).await.unwrap(), None);
}

#[tokio::test]
async fn test_expired_token_rejected_and_purged() {
    let conn = mem_db();
    let users = UserRepository::new(conn.clone());
    let tokens = TokenRepository::new(conn);
    let user = users.create(&make_user("alice@example.com", "alice")).await.unwrap();

    let hash = hash_token("stale");
    tokens
        .insert(user.id, &hash, TokenKind::Access, Utc::now() - Duration::hours(1))
        .await
        .unwrap();

    assert_eq!(tokens.find_valid(&hash, TokenKind::Access).await.unwrap(), None);
    assert_eq!(tokens.purge_expired().await.unwrap(), 1);
}

//! Section Browse State
//!
//! The three-level Program → Semester → Subject navigation shared by
//! the notes, syllabus and question-paper pages. Selecting a parent
//! level clears everything under it; the state round-trips through the
//! URL query string and is mirrored into session storage per section so
//! a bare section URL restores where the user left off.

use serde::{Deserialize, Serialize};

use crate::models::MAX_SEMESTER;

/// Which view a section page shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowseLevel {
    Programs,
    Semesters,
    Subjects,
    Content,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrowseState {
    /// Selected program id and display name
    pub program: Option<(u32, String)>,
    pub semester: Option<u8>,
    /// Selected subject id and display name
    pub subject: Option<(u32, String)>,
}

impl BrowseState {
    pub fn level(&self) -> BrowseLevel {
        match (&self.program, self.semester, &self.subject) {
            (None, ..) => BrowseLevel::Programs,
            (Some(_), None, _) => BrowseLevel::Semesters,
            (Some(_), Some(_), None) => BrowseLevel::Subjects,
            (Some(_), Some(_), Some(_)) => BrowseLevel::Content,
        }
    }

    pub fn select_program(&mut self, id: u32, name: String) {
        self.program = Some((id, name));
        self.semester = None;
        self.subject = None;
    }

    pub fn select_semester(&mut self, semester: u8) {
        if self.program.is_some() && (1..=MAX_SEMESTER).contains(&semester) {
            self.semester = Some(semester);
            self.subject = None;
        }
    }

    pub fn select_subject(&mut self, id: u32, name: String) {
        if self.program.is_some() && self.semester.is_some() {
            self.subject = Some((id, name));
        }
    }

    /// Pop one level
    pub fn back(&mut self) {
        if self.subject.take().is_some() {
            return;
        }
        if self.semester.take().is_some() {
            return;
        }
        self.program = None;
    }

    /// Query string for the current state ("program=3&semester=2"),
    /// empty at the top level. Ids only; names live in session storage.
    pub fn to_query(&self) -> String {
        let mut pairs = Vec::new();
        if let Some((id, _)) = &self.program {
            pairs.push(format!("program={id}"));
        }
        if let Some(semester) = self.semester {
            pairs.push(format!("semester={semester}"));
        }
        if let Some((id, _)) = &self.subject {
            pairs.push(format!("subject={id}"));
        }
        pairs.join("&")
    }

    /// Rebuild state from query parameters. Junk or out-of-order
    /// parameters fall back to the deepest valid prefix, so any URL
    /// still maps to exactly one view level. Names start empty and are
    /// filled in once the lists load.
    pub fn from_params(
        program: Option<&str>,
        semester: Option<&str>,
        subject: Option<&str>,
    ) -> Self {
        let mut state = Self::default();
        if let Some(id) = program.and_then(|raw| raw.parse::<u32>().ok()) {
            state.select_program(id, String::new());
        }
        if let Some(sem) = semester.and_then(|raw| raw.parse::<u8>().ok()) {
            state.select_semester(sem);
        }
        if let Some(id) = subject.and_then(|raw| raw.parse::<u32>().ok()) {
            state.select_subject(id, String::new());
        }
        state
    }

    pub fn is_top(&self) -> bool {
        self.program.is_none()
    }
}

/// Session-storage key for a section ("notes", "syllabus", "papers")
pub fn storage_key(section: &str) -> String {
    format!("studyhall.browse.{section}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_program_selection_clears_children() {
        let mut state = BrowseState::default();
        state.select_program(1, "BCA".to_string());
        state.select_semester(3);
        state.select_subject(7, "Data Structures".to_string());
        assert_eq!(state.level(), BrowseLevel::Content);

        state.select_program(2, "BBA".to_string());
        assert_eq!(state.semester, None);
        assert_eq!(state.subject, None);
        assert_eq!(state.level(), BrowseLevel::Semesters);
    }

    #[test]
    fn test_semester_selection_clears_subject() {
        let mut state = BrowseState::default();
        state.select_program(1, "BCA".to_string());
        state.select_semester(3);
        state.select_subject(7, "Data Structures".to_string());

        state.select_semester(4);
        assert_eq!(state.subject, None);
        assert_eq!(state.level(), BrowseLevel::Subjects);
    }

    #[test]
    fn test_selection_requires_parent() {
        let mut state = BrowseState::default();
        state.select_semester(3);
        assert_eq!(state.semester, None);
        state.select_subject(7, "Data Structures".to_string());
        assert_eq!(state.subject, None);
        assert_eq!(state.level(), BrowseLevel::Programs);
    }

    #[test]
    fn test_semester_range_enforced() {
        let mut state = BrowseState::default();
        state.select_program(1, "BCA".to_string());
        state.select_semester(0);
        assert_eq!(state.semester, None);
        state.select_semester(9);
        assert_eq!(state.semester, None);
        state.select_semester(8);
        assert_eq!(state.semester, Some(8));
    }

    #[test]
    fn test_back_pops_one_level() {
        let mut state = BrowseState::default();
        state.select_program(1, "BCA".to_string());
        state.select_semester(3);
        state.select_subject(7, "Data Structures".to_string());

        state.back();
        assert_eq!(state.level(), BrowseLevel::Subjects);
        state.back();
        assert_eq!(state.level(), BrowseLevel::Semesters);
        state.back();
        assert_eq!(state.level(), BrowseLevel::Programs);
        state.back();
        assert_eq!(state.level(), BrowseLevel::Programs);
    }

    #[test]
    fn test_query_round_trip() {
        let mut state = BrowseState::default();
        assert_eq!(state.to_query(), "");

        state.select_program(3, "BCA".to_string());
        state.select_semester(2);
        state.select_subject(9, "Databases".to_string());
        assert_eq!(state.to_query(), "program=3&semester=2&subject=9");

        let restored = BrowseState::from_params(Some("3"), Some("2"), Some("9"));
        assert_eq!(restored.program, Some((3, String::new())));
        assert_eq!(restored.semester, Some(2));
        assert_eq!(restored.subject, Some((9, String::new())));
        assert_eq!(restored.level(), BrowseLevel::Content);
    }

    #[test]
    fn test_from_params_ignores_orphans_and_junk() {
        // Subject without a semester stays at the semester level
        let state = BrowseState::from_params(Some("3"), None, Some("9"));
        assert_eq!(state.level(), BrowseLevel::Semesters);

        let state = BrowseState::from_params(Some("abc"), Some("2"), None);
        assert_eq!(state.level(), BrowseLevel::Programs);

        let state = BrowseState::from_params(Some("3"), Some("12"), Some("9"));
        assert_eq!(state.level(), BrowseLevel::Semesters);
    }
}

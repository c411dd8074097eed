//! User Entity
//!
//! Accounts log in by email. The password hash never leaves the
//! repository layer; the entity carries only public profile fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::Entity;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: u32,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_verified: bool,
    pub phone_number: Option<String>,
    pub college: Option<String>,
    pub semester: Option<u8>,
    pub bio: String,
    pub interests: Vec<String>,
    pub skills: Vec<String>,
    pub facebook_url: Option<String>,
    pub twitter_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
    pub date_joined: DateTime<Utc>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }

    /// Name to show next to uploads and comments
    pub fn display_name(&self) -> String {
        let full = self.full_name();
        if full.is_empty() {
            self.username.clone()
        } else {
            full
        }
    }
}

/// Fields needed to insert an account row
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub is_verified: bool,
}

/// Optional profile fields accepted by profile/update/
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfilePatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub college: Option<String>,
    pub semester: Option<u8>,
    pub bio: Option<String>,
    pub interests: Option<Vec<String>>,
    pub skills: Option<Vec<String>>,
    pub facebook_url: Option<String>,
    pub twitter_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
}

impl Entity for User {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_user() -> User {
        User {
            id: 1,
            username: "ashish".to_string(),
            email: "ashish@example.com".to_string(),
            first_name: String::new(),
            last_name: String::new(),
            is_verified: true,
            phone_number: None,
            college: None,
            semester: None,
            bio: String::new(),
            interests: Vec::new(),
            skills: Vec::new(),
            facebook_url: None,
            twitter_url: None,
            linkedin_url: None,
            github_url: None,
            date_joined: Utc::now(),
        }
    }

    #[test]
    fn test_display_name_falls_back_to_username() {
        let mut user = make_user();
        assert_eq!(user.display_name(), "ashish");
        user.first_name = "Ashish".to_string();
        user.last_name = "Karki".to_string();
        assert_eq!(user.display_name(), "Ashish Karki");
    }
}

//! College Entity
//!
//! An affiliated institution listed in the directory. Listings sort by
//! rating descending, then name.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::Entity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InstitutionType {
    Public,
    #[default]
    Private,
    Community,
}

impl InstitutionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InstitutionType::Public => "public",
            InstitutionType::Private => "private",
            InstitutionType::Community => "community",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "public" => InstitutionType::Public,
            "community" => InstitutionType::Community,
            _ => InstitutionType::Private,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct College {
    pub id: u32,
    pub name: String,
    pub slug: String,
    pub established_year: Option<u16>,
    /// City / locality shown on cards
    pub location: String,
    pub address: String,
    pub contact: String,
    pub email: String,
    pub website: String,
    pub affiliation: String,
    pub accreditation: String,
    pub institution_type: InstitutionType,
    /// 0.0 to 5.0
    pub rating: f64,
    pub total_students: Option<u32>,
    pub facilities: Vec<String>,
    pub courses_offered: Vec<String>,
    pub logo: Option<String>,
    pub image: Option<String>,
    pub description: String,
    pub achievements: String,
    pub scholarships_available: bool,
    pub is_active: bool,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl College {
    /// Location plus street address, for the detail header
    pub fn full_address(&self) -> String {
        if self.address.is_empty() {
            self.location.clone()
        } else {
            format!("{}, {}", self.address, self.location)
        }
    }
}

impl Entity for College {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_institution_type_roundtrip() {
        assert_eq!(InstitutionType::from_str("public"), InstitutionType::Public);
        assert_eq!(InstitutionType::from_str("unknown"), InstitutionType::Private);
        assert_eq!(InstitutionType::Community.as_str(), "community");
    }
}

//! Role-shaped profile drafts collected in the profile step.

use serde::{Deserialize, Serialize};

use super::Role;

/// Personal details submitted to complete a freshly verified account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDraft {
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(flatten)]
    pub details: RoleProfile,
}

/// Fields that only make sense for one role.
///
/// Serialized with a `role` tag so the body of the profile-completion call
/// carries the role next to its fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role")]
pub enum RoleProfile {
    Student(StudentProfile),
    Teacher(TeacherProfile),
    Admin(AdminProfile),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub school: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guardian_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guardian_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guardian_email: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_years: Option<u8>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub qualifications: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subjects: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
}

impl RoleProfile {
    /// Empty field set for `role`.
    pub fn empty(role: Role) -> Self {
        match role {
            Role::Student => RoleProfile::Student(StudentProfile::default()),
            Role::Teacher => RoleProfile::Teacher(TeacherProfile::default()),
            Role::Admin => RoleProfile::Admin(AdminProfile::default()),
        }
    }

    pub fn role(&self) -> Role {
        match self {
            RoleProfile::Student(_) => Role::Student,
            RoleProfile::Teacher(_) => Role::Teacher,
            RoleProfile::Admin(_) => Role::Admin,
        }
    }
}

impl ProfileDraft {
    pub fn empty(role: Role) -> Self {
        Self {
            full_name: String::new(),
            phone: None,
            details: RoleProfile::empty(role),
        }
    }

    pub fn role(&self) -> Role {
        self.details.role()
    }

    /// Re-shape the draft for `role`, keeping the role-independent fields.
    ///
    /// Role-specific fields are dropped when the role changes.
    pub fn reshape_for(self, role: Role) -> Self {
        if self.role() == role {
            return self;
        }
        Self {
            full_name: self.full_name,
            phone: self.phone,
            details: RoleProfile::empty(role),
        }
    }
}

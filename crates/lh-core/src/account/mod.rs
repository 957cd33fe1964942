//! Account domain: roles, role-shaped profile drafts and the replies of the
//! account backend.

pub mod profile;
pub mod role;
pub mod wire;

pub use profile::{AdminProfile, ProfileDraft, RoleProfile, StudentProfile, TeacherProfile};
pub use role::{Role, RoleParseError};
pub use wire::{
    AuthenticatedUser, LoginResponse, ProfileCompletion, RegisterResponse, ResendCodeResponse,
    VerifyEmailResponse,
};

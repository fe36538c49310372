pub mod student;
pub mod user;

pub use student::{Student, StudentData, StudentPayload};
pub use user::User;

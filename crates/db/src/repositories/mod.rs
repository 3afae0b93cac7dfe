//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod activity_file_repo;
pub mod activity_repo;
pub mod admin_repo;
pub mod student_repo;
pub mod teacher_repo;

pub use activity_file_repo::ActivityFileRepo;
pub use activity_repo::ActivityRepo;
pub use admin_repo::AdminRepo;
pub use student_repo::StudentRepo;
pub use teacher_repo::TeacherRepo;

//! Stateless repository structs, one per table.
//!
//! Repositories hold no state; every method takes the pool (or a
//! transaction) explicitly. Multi-step writes that must be atomic --
//! module reorder, final-ordering reads -- run inside a transaction.

mod course_module_repo;
mod course_repo;
mod course_session_repo;
mod faq_repo;
mod material_repo;
mod post_repo;
mod session_repo;
mod user_repo;

pub use course_module_repo::CourseModuleRepo;
pub use course_repo::CourseRepo;
pub use course_session_repo::CourseSessionRepo;
pub use faq_repo::FaqRepo;
pub use material_repo::MaterialRepo;
pub use post_repo::PostRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;

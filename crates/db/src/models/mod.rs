//! Entity models and DTOs.
//!
//! Each submodule defines the row struct (`FromRow` + `Serialize`) for one
//! table plus the `Create*`/`Update*` DTOs its repository accepts. Update
//! DTOs use `Option` fields merged with SQL `COALESCE` so omitted fields
//! are left untouched.

pub mod course;
pub mod course_module;
pub mod course_session;
pub mod faq;
pub mod material;
pub mod post;
pub mod session;
pub mod user;

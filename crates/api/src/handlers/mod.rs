//! HTTP request handlers, one module per resource.

pub mod admin;
pub mod auth;
pub mod courses;
pub mod faqs;
pub mod materials;
pub mod modules;
pub mod posts;
pub mod sessions;

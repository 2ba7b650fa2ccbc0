//! The fixed usul al-fiqh curriculum
//!
//! A read-only two-level tree (category → lesson) compiled into the binary.

mod data;
pub mod model;

pub use data::builtin;
pub use model::{Category, Curriculum, CurriculumError, Topic};

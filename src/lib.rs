//! Usul - a terminal tutor for usul al-fiqh
//!
//! Usul walks a learner through a fixed curriculum of Islamic legal theory.
//! Each lesson is generated on demand, a tutor answers questions bound to the
//! open lesson, and short quizzes check understanding, all powered by Gemini.

pub mod app;
pub mod config;
pub mod content;
pub mod curriculum;
pub mod gateway;
pub mod gemini;
pub mod session;
pub mod theme;
pub mod ui;

pub use app::App;
pub use config::Config;
pub use theme::Theme;

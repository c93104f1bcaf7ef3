//! EduBridge Core
//!
//! The tutoring session runner: lesson generation, per-step comprehension
//! checks with optional hints, micro-break scheduling for learners who need
//! them, and the end-of-session analytics that adjust a learner's modality
//! preferences.

pub mod analytics;
pub mod break_scheduler;
pub mod content;
pub mod feedback;
pub mod profile;
pub mod report;
pub mod session_log;
pub mod storage;
pub mod tts;
pub mod tutor;
pub mod visual_aid;

//! Document model types for resume content.
//!
//! The grouped model produced by the parser is the single intermediate
//! representation shared by every renderer (screen HTML, PDF fragment,
//! markdown, JSON).

mod document;
mod learning;
mod line;

pub use document::{Entry, ResumeDocument, Section, SectionLayout};
pub use learning::{LearningModule, LearningPath, LearningResource, ModuleUpdate, ResourceUpdate};
pub use line::{split_pipe_tokens, ClassifiedLine, LineKind};

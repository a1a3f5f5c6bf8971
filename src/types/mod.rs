pub mod resume_record;

pub use resume_record::{RecordEntry, ResumeRecord};

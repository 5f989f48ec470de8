pub mod contact;
pub mod counter;
pub mod fetch;
pub mod page;
pub mod render;
pub mod reveal;
pub mod theme;
pub mod typewriter;

pub use crate::domain::model::{ContactMessage, SubmitState};
pub use crate::domain::ports::{ContentSource, FragmentSink, Notifier, SiteSettings};
pub use crate::utils::error::Result;

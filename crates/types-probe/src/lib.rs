pub mod config;
pub mod error;
pub mod navigation;
pub mod outcome;
pub mod presentation;
pub mod resolver;
mod test_utils;

// Re-export commonly used types
pub use config::ProbeConfig;
pub use error::{PresentationError, ProbeError, Result};
pub use navigation::{NavigationEvent, NavigationHandle, NavigationWatcher, RenderReport};
pub use outcome::{ResolutionFailure, ResolutionOutcome, TypeSupport};
pub use presentation::{Annotation, HostPage, InMemoryPage, PageElement, Presenter, Segment};
pub use resolver::TypeSupportResolver;

//! Interactive resolution engine
//!
//! Layered bottom-up: candidate lists and validators, the remote name check,
//! prompt orchestration, and finally the flows that compose them.

pub mod candidates;
pub mod descriptor;
pub mod flows;
pub mod prompt;
pub mod remote;
pub mod resolve;
pub mod validators;

pub use descriptor::{ComponentSource, ResolvedComponentDescriptor, ResolvedDevfileComponent, ResourceLimits};
pub use flows::Flows;
pub use prompt::Prompter;
pub use remote::ResolutionContext;
pub use resolve::{ComponentPreset, DevfilePreset};

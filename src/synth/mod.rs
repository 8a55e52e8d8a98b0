//! Template synthesis
//!
//! Converts generated alarms into CloudFormation templates and writes
//! them out as an assembly directory.

pub mod assembly;
pub mod stack;
pub mod template;

pub use assembly::{Assembly, Manifest, ManifestEntry, MANIFEST_FILE};
pub use stack::{Stack, ENVIRONMENT_TAG};
pub use template::{ActionTarget, Resource, Template};

//! Manager registry
//!
//! Manager-specific knowledge lives only in descriptor rows; one generic
//! executor drives them all.

mod builtins;
mod store;
mod types;

pub use builtins::{BUILTIN_COUNT, builtin_descriptors};
pub use store::ManagerRegistry;
pub use types::ManagerDescriptor;

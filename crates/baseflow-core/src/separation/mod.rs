//! Multi-method baseflow separation.
pub mod config;
pub mod method;
pub mod result;
pub mod run;

pub use config::SeparationConfig;
pub use method::Method;
pub use result::{MethodOutput, ResolvedParams, SeparationResult};
pub use run::separate;

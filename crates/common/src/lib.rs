pub mod environment;
mod environment_variables;
pub mod instance;

pub use instance::{discover_instances, discover_instances_with, ArrFamily, Instance};

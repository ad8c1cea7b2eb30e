// LLM abstraction layer

pub mod provider;
pub mod google;

pub use provider::*;
pub use google::GoogleAdapter;
pub use crate::types::*;

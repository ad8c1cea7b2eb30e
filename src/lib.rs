// DX Interpreter - turns uploaded lab reports into a plain-language interpretation

pub mod config;
pub mod models;
pub mod types;
pub mod agents;
pub mod extract;   // CSV / Excel / PDF text extraction
pub mod llm;
pub mod routes;
pub mod middleware;
pub mod utils;

// Re-exports for convenience
pub use config::Config;
pub use models::AppState;
pub use routes::create_router;

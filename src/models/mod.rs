pub mod plugin;

// Re-export commonly used types
pub use plugin::{Matrix, PluginRecord};

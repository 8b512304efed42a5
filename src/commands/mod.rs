mod generate;
mod list;

pub use generate::{build_matrix, generate_command};
pub use list::list_command;

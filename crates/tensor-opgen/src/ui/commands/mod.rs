pub mod generate;
pub mod list;
mod source;

pub use generate::{GenerateConfig, generate_code};
pub use list::{list_ops, list_schemas};

pub mod codegen;
pub mod metrics;
pub mod orchestrator;

#[cfg(test)]
mod tests;

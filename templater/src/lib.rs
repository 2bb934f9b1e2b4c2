pub use options::ProcessorOptions;
pub use processor::TemplateProcessor;
pub use resolver::{BoxError, PropsResolver, VarResolver};

mod options;
mod processor;
mod resolver;

pub mod mock;
pub mod runner;
pub mod template;

pub use mock::{Invocation, MockRunner};
pub use runner::{CommandRunner, ProcessRunner};
pub use template::{TemplateEngine, TemplateRenderer, TemplateValue, TemplateVars};

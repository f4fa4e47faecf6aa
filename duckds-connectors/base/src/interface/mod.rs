mod health_checker;
pub use health_checker::*;
mod query_runner;
pub use query_runner::*;
mod template;
pub use template::*;

pub mod checks;
pub mod engine;
pub mod envfile;
pub mod model;

pub use checks::Check;
pub use engine::{default_checks, run_audit};
pub use envfile::EnvFile;
pub use model::{Finding, Report, Severity};

pub mod driver;
pub mod error;
pub mod exec;

pub use driver::run_scenario;
pub use error::ScenarioError;

pub mod error;
pub mod pick;
pub mod step;

pub use error::{Error, Result};
pub use pick::{pick, PickField, PickTemplate};
pub use step::{
    is_truthy, Environment, LayeredEnvironment, MapEnvironment, ProcessEnvironment, StepInputs,
};

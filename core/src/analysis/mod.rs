pub use simulation::*;
pub use validator::*;

mod simulation;
mod validator;

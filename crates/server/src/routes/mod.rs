mod diagnoses;
mod guides;
mod health;
mod predictions;
mod rainfall;
mod recommendations;
mod reference;
mod trends;

pub use diagnoses::*;
pub use guides::*;
pub use health::*;
pub use predictions::*;
pub use rainfall::*;
pub use recommendations::*;
pub use reference::*;
pub use trends::*;

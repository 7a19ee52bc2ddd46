mod alert;
mod policy;

pub use alert::*;
pub use policy::*;

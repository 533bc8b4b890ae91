//! Data models mirroring the record store's tables, plus identity types.

mod attendance;
mod employee;
mod identity;
mod payslip;
mod performance;
mod task;

pub use attendance::*;
pub use employee::*;
pub use identity::*;
pub use payslip::*;
pub use performance::*;
pub use task::*;

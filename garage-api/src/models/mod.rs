mod command;
mod door;
mod snooze;
mod topic;

pub use command::*;
pub use door::*;
pub use snooze::*;
pub use topic::*;

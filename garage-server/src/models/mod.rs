pub mod event_record;
pub mod remote_command;
pub mod snooze;

pub use event_record::EventRecord;
pub use remote_command::CommandRecord;
pub use snooze::SnoozeRecord;

pub trait Table {
    /// The name of the table
    fn name(&self) -> &'static str;

    /// The SQL statement to create the table
    fn create(&self) -> String;

    /// The SQL statement to dispose the table
    fn dispose(&self) -> String;

    /// The dependencies of the table
    fn dependencies(&self) -> Vec<&'static str>;
}

mod event_record;
mod remote_command;
mod snooze;

pub use event_record::EventRecordRepository;
pub use remote_command::RemoteCommandRepository;
pub use snooze::SnoozeRepository;

mod schema;
mod settings;
mod storage;

pub use schema::SchemaManager;
pub use settings::{Auth, Database, Door, Messaging, Remote, Settings, Snooze};
pub use storage::Storage;

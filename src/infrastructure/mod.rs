pub mod console;
pub mod datapump;
pub mod local_storage;
pub mod oracle;

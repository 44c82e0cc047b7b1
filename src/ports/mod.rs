pub mod details_port;
pub mod export_port;
pub mod metadata_port;

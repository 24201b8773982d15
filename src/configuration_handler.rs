use crate::configuration::Configuration;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(about = "Publish open time slots and share a link so others can book one")]
pub struct ConfigurationHandler {
    /// Port the server listens on
    #[arg(long, default_value = "3000")]
    port: String,

    /// Origin used when constructing share links
    #[arg(long, default_value = "http://localhost:3000")]
    share_origin: String,

    /// Path to the JSON storage file. Slots and bookings are kept in memory
    /// (and lost on restart) when unset.
    #[arg(long)]
    storage_file: Option<PathBuf>,
}

impl ConfigurationHandler {
    pub fn parse_arguments() -> Self {
        Self::parse()
    }
}

impl Configuration for ConfigurationHandler {
    fn port(&self) -> String {
        self.port.clone()
    }

    fn share_origin(&self) -> String {
        self.share_origin.clone()
    }

    fn storage_path(&self) -> Option<PathBuf> {
        self.storage_file.clone()
    }
}

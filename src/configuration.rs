use std::path::PathBuf;

pub trait Configuration: Clone + Send + Sync + 'static {
    fn port(&self) -> String;
    fn share_origin(&self) -> String;
    fn storage_path(&self) -> Option<PathBuf>;
}

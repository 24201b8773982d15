/// The flat key-value medium backing both stores. Injected so that tests can
/// substitute an in-memory fake and the binary can pick file persistence at
/// startup. All operations are synchronous and total; a broken medium logs and
/// degrades instead of failing the caller.
///
/// `update` runs a read-modify-write for one key under a single lock scope:
/// the closure sees the current value and returns the new one, or `None` to
/// leave the key untouched. Concurrent requests on the multithreaded runtime
/// must go through it for any check-then-write on shared keys.
pub trait StorageBackend: Clone + Send + Sync + 'static {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&self, key: &str, value: String);
    fn update(&self, key: &str, update: impl FnOnce(Option<&str>) -> Option<String>);
    fn remove(&self, key: &str);
}

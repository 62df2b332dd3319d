/// One source of service settings (command line, environment, config file).
///
/// Every accessor returns `None` when the source does not set the value, so
/// layers can be stacked and the first one that answers wins.
pub trait ConfigProvider: Send + Sync {
    fn app_version(&self) -> Option<&str>;
    fn host(&self) -> Option<&str>;
    fn port(&self) -> Option<u16>;
    fn worker_threads(&self) -> Option<usize>;
    fn json_logs(&self) -> Option<bool>;
    fn monitor(&self) -> Option<bool>;
}

/// Application configuration constants
pub struct AppConfig;

impl AppConfig {
    // Thresholds (percent used)
    pub const DEFAULT_WARN_PERCENT: u32 = 80;
    pub const DEFAULT_CRIT_PERCENT: u32 = 90;

    // govc invocation
    pub const DEFAULT_GOVC_BINARY: &'static str = "govc";
    pub const GOVC_DATASTORE_ARGS: [&'static str; 2] = ["datastore.info", "-json"];
    pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

    // Output
    pub const OUTPUT_PREFIX: &'static str = "VSPHERE_DATASTORE";

    // Logging
    pub const DEFAULT_LOG_FILTER: &'static str = "vsphere_ds_check=warn";
}

/// Names of the connection settings, shared by the config file and the
/// environment. They are also what govc itself reads.
pub struct EnvKeys;

impl EnvKeys {
    pub const URL: &'static str = "GOVC_URL";
    pub const USERNAME: &'static str = "GOVC_USERNAME";
    pub const PASSWORD: &'static str = "GOVC_PASSWORD";
    pub const INSECURE: &'static str = "GOVC_INSECURE";

    pub const ALL: [&'static str; 4] = [Self::URL, Self::USERNAME, Self::PASSWORD, Self::INSECURE];
}

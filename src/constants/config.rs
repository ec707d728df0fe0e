/// Directory searched for the ledger config file when `CONFIG_DIR` is unset
pub const DEFAULT_CONFIG_DIR: &str = "./config";

/// Ledger config file name when `CONFIG_FILE_NAME` is unset
pub const DEFAULT_CONFIG_FILE_NAME: &str = "ledger.json";

/// Gas made available to a relayed call when `DEFAULT_CALL_GAS` is unset
pub const DEFAULT_CALL_GAS: u64 = 2_000_000;

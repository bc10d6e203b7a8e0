use serde::{Deserialize, Serialize};

/// Dataset summary for the data control and training pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataStatistics {
    pub total_records: u64,
    pub total_tickers: u32,
    pub days_of_data: u32,
    pub models_count: u32,
    /// Average model accuracy in percent.
    pub avg_accuracy: u8,
}

/// Connection state of the market data store and the last sync stamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncStatus {
    pub database: String,
    pub last_sync: String,
}

impl SyncStatus {
    pub fn is_connected(&self) -> bool {
        self.database == "connected"
    }
}

//! Company letterhead details printed on every invoice

use serde::{Deserialize, Serialize};

/// The seller's letterhead block
///
/// Defaults to the shop's registered details; deployments override via
/// configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyProfile {
    pub name: String,
    pub tagline: String,
    pub address_line1: String,
    pub address_line2: String,
    pub state_line: String,
    pub phone: String,
    pub gstin: String,
    /// Path to a PNG logo; skipped when unset or unreadable
    pub logo_path: Option<String>,
}

impl Default for CompanyProfile {
    fn default() -> Self {
        Self {
            name: "SATYA SAI BABA AUTO ELECTRICAL WORKS".to_string(),
            tagline: "Authorised MICO BOSCH Service".to_string(),
            address_line1: "Venkateswara Theatre Rd, Near IMA Hall, Ganga Enclave".to_string(),
            address_line2: "Satyanarayana Puram, GUDIVADA - 521 301".to_string(),
            state_line: "Andhra Pradesh, State Code : 37".to_string(),
            phone: "Cell : 9958592564   8074546541".to_string(),
            gstin: "GSTIN : 37CYCP5977H1ZM".to_string(),
            logo_path: None,
        }
    }
}

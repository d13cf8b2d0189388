// File: hostvoucher-common/src/models/ledger.rs

use serde::{Deserialize, Serialize};

/// Payload accepted by the admin-side points ledger (`/api/action`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub email: String,
    /// Signed: purchases are reported as debits.
    pub points: i64,
    pub reason: String,
}

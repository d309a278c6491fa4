//! API Response types
//!
//! Every successful inventory/sales response wraps its payload in a
//! `data` field:
//! ```json
//! { "data": [ { "id": "p-1", "name": "Jaqueta jeans" } ] }
//! ```

use serde::{Deserialize, Serialize};

/// Success envelope `{ "data": ... }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataResponse<T> {
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }

    /// Unwrap the payload
    pub fn into_inner(self) -> T {
        self.data
    }
}

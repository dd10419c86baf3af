//! Known API collections

/// A searchable collection and the key its search results are listed under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collection {
    /// Path segment, e.g. `policies` for `policies/search` and `policies/<id>`
    pub endpoint: &'static str,
    /// Key holding the result array in search responses
    pub result_key: &'static str,
}

impl Collection {
    /// Path of a single item
    pub fn item_path(&self, id: u64) -> String {
        format!("{}/{}", self.endpoint, id)
    }
}

pub const POLICIES: Collection = Collection {
    endpoint: "policies",
    result_key: "policies",
};

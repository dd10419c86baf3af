//! Search request bodies for `<collection>/search`

use serde_json::{json, Value};

/// Largest page requested while listing a collection
pub const PAGE_SIZE: u32 = 100;

/// Name lookups ask for two items so that duplicates are detectable
pub const NAME_PROBE_LIMIT: u32 = 2;

/// One condition of a search; all conditions of a request must hold
#[derive(Debug, Clone, PartialEq)]
pub enum SearchCriterion {
    /// `field == value` for a numeric field
    NumericEqual { field: String, value: u64 },
    /// `field == value` for a string field
    StringEqual { field: String, value: String },
    /// Object ID strictly greater than the value
    IdGreaterThan(u64),
}

impl SearchCriterion {
    pub fn numeric_equal(field: impl Into<String>, value: u64) -> Self {
        SearchCriterion::NumericEqual {
            field: field.into(),
            value,
        }
    }

    pub fn string_equal(field: impl Into<String>, value: impl Into<String>) -> Self {
        SearchCriterion::StringEqual {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            SearchCriterion::NumericEqual { field, value } => json!({
                "fieldName": field,
                "numericTest": "equal",
                "numericValue": value,
            }),
            SearchCriterion::StringEqual { field, value } => json!({
                "fieldName": field,
                "stringTest": "equal",
                "stringValue": value,
            }),
            SearchCriterion::IdGreaterThan(id) => json!({
                "idValue": id,
                "idTest": "greater-than",
            }),
        }
    }
}

/// Body of a search request, results sorted by ascending object ID
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    max_items: u32,
    criteria: Vec<SearchCriterion>,
}

impl SearchRequest {
    pub fn new(max_items: u32) -> Self {
        Self {
            max_items,
            criteria: Vec::new(),
        }
    }

    /// One page of a listing: items with ID greater than `cursor`
    pub fn page_after(cursor: u64) -> Self {
        Self::new(PAGE_SIZE).with_criterion(SearchCriterion::IdGreaterThan(cursor))
    }

    /// Exact name match, optionally restricted to one parent
    pub fn by_name(name: &str, parent_id: Option<u64>) -> Self {
        let request =
            Self::new(NAME_PROBE_LIMIT).with_criterion(SearchCriterion::string_equal("name", name));
        match parent_id {
            Some(parent) => {
                request.with_criterion(SearchCriterion::numeric_equal("parentID", parent))
            }
            None => request,
        }
    }

    pub fn with_criterion(mut self, criterion: SearchCriterion) -> Self {
        self.criteria.push(criterion);
        self
    }

    pub fn to_value(&self) -> Value {
        let criteria: Vec<Value> = self.criteria.iter().map(SearchCriterion::to_value).collect();
        json!({
            "maxItems": self.max_items,
            "searchCriteria": criteria,
            "sortByObjectID": true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_wire_format() {
        assert_eq!(
            SearchRequest::page_after(250).to_value(),
            json!({
                "maxItems": 100,
                "searchCriteria": [{"idValue": 250, "idTest": "greater-than"}],
                "sortByObjectID": true
            })
        );
    }

    #[test]
    fn test_name_request_without_parent() {
        assert_eq!(
            SearchRequest::by_name("Base Policy", None).to_value(),
            json!({
                "maxItems": 2,
                "searchCriteria": [
                    {"fieldName": "name", "stringTest": "equal", "stringValue": "Base Policy"}
                ],
                "sortByObjectID": true
            })
        );
    }

    #[test]
    fn test_name_request_with_parent_adds_numeric_criterion() {
        let request = SearchRequest::by_name("Linux", Some(12));
        let criteria = &request.to_value()["searchCriteria"];
        assert_eq!(criteria.as_array().map(Vec::len), Some(2));
        assert_eq!(
            criteria[1],
            json!({"fieldName": "parentID", "numericTest": "equal", "numericValue": 12})
        );
    }
}

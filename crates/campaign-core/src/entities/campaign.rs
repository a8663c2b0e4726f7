//! Campaign entity - the record reactions attach to

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::test_data::{classify, TestDataView};
use crate::value_objects::CampaignId;

/// Campaign entity
///
/// Only the fields the reaction subsystem and the test-data renderer read are
/// modelled; the rest of the record belongs to the campaign editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: CampaignId,
    pub name: String,
    pub flight_start: Option<NaiveDate>,
    pub flight_end: Option<NaiveDate>,
    /// Free-form pre-test data, any JSON shape
    #[serde(default)]
    pub pre_test: Option<Value>,
    /// Free-form post-test data, any JSON shape
    #[serde(default)]
    pub post_test: Option<Value>,
    pub created_at: DateTime<Utc>,
}

impl Campaign {
    /// Create a new Campaign with no flight dates or test data
    pub fn new(name: String) -> Self {
        Self {
            id: CampaignId::random(),
            name,
            flight_start: None,
            flight_end: None,
            pre_test: None,
            post_test: None,
            created_at: Utc::now(),
        }
    }

    /// Whether `day` falls inside the flight window (open ends are unbounded)
    pub fn is_in_flight(&self, day: NaiveDate) -> bool {
        self.flight_start.map_or(true, |start| day >= start)
            && self.flight_end.map_or(true, |end| day <= end)
    }

    pub fn pre_test_view(&self) -> TestDataView {
        self.pre_test.as_ref().map_or(TestDataView::Empty, classify)
    }

    pub fn post_test_view(&self) -> TestDataView {
        self.post_test.as_ref().map_or(TestDataView::Empty, classify)
    }
}

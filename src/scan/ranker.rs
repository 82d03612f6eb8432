//! Result ranking
//!
//! Orders records ascending by spread ratio. Consumers read the report
//! top-to-bottom with the lowest ratio first, so the direction is fixed.

use super::ScanRecord;
use serde::Serialize;

/// Ranked scan records, ascending by ratio
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ScanResult {
    records: Vec<ScanRecord>,
}

impl ScanResult {
    pub fn records(&self) -> &[ScanRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScanRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<ScanRecord> {
        self.records
    }
}

impl<'a> IntoIterator for &'a ScanResult {
    type Item = &'a ScanRecord;
    type IntoIter = std::slice::Iter<'a, ScanRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Drop records without a ratio and sort the rest ascending.
///
/// The sort is stable: equal ratios keep their encounter order.
pub fn rank(records: Vec<ScanRecord>) -> ScanResult {
    let mut records: Vec<ScanRecord> = records.into_iter().filter(|r| r.ratio.is_some()).collect();
    records.sort_by(|a, b| a.ratio.cmp(&b.ratio));
    ScanResult { records }
}

use std::collections::HashMap;

use heatcal_types::{DayRecord, SummaryEntry};

/// Accumulate a day's detail values per name, largest first.
///
/// Ties keep the order in which each name first appeared.
#[must_use]
pub fn summarize(record: &DayRecord) -> Vec<SummaryEntry> {
    let mut index: HashMap<&str, usize> = HashMap::with_capacity(record.details.len());
    let mut out: Vec<SummaryEntry> = Vec::new();
    for d in &record.details {
        if let Some(&i) = index.get(d.name.as_str()) {
            out[i].value = out[i].value.saturating_add(d.value);
        } else {
            index.insert(d.name.as_str(), out.len());
            out.push(SummaryEntry {
                name: d.name.clone(),
                value: d.value,
            });
        }
    }
    // stable: equal values stay in first-seen order
    out.sort_by(|a, b| b.value.cmp(&a.value));
    out
}

/// Normalize an incoming batch: order by date and fill in summaries.
///
/// Whether summaries are computed is decided by the first record alone. If
/// it carries no summary, every record's summary is (re)computed; if it does,
/// the batch is trusted as-is and a record without a summary is drawn as if
/// its summary were empty.
#[must_use]
pub fn prepare_batch(mut records: Vec<DayRecord>) -> Vec<DayRecord> {
    records.sort_by_key(|r| r.date);
    let recompute = records.first().is_some_and(|r| r.summary.is_none());
    if recompute {
        for r in &mut records {
            r.summary = Some(summarize(r));
        }
    }
    #[cfg(feature = "tracing")]
    tracing::debug!(
        records = records.len(),
        recomputed = recompute,
        "prepared record batch"
    );
    records
}

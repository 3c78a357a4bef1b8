use super::record::Record;
use super::schema::SchemaModel;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info};

#[derive(Debug, thiserror::Error)]
pub enum SweepError {
    #[error("'{tag}' is not a top-level request item")]
    UnknownItem { tag: String },
    #[error("request item '{tag}' declares no delivered tag")]
    NoDeliveredTag { tag: String },
    #[error("request item '{tag}' declares no timeout tag")]
    NoTimeoutTag { tag: String },
}

/// Status change to apply to one stored record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeoutUpdate {
    pub record_id: String,
    pub household_reference: String,
    pub status_field: String,
    pub statuses: Vec<String>,
    pub added_tag: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SweepStats {
    pub households: usize,
    pub single_request_households: usize,
    pub incomplete_records: usize,
    pub timed_out_requests: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SweepPlan {
    pub request_tag: String,
    pub updates: Vec<TimeoutUpdate>,
    pub stats: SweepStats,
}

/// Plans timeouts for one request item. For each household that asked for
/// the item more than once and later received it, every earlier request that
/// was neither delivered nor timed out gets the item's timeout tag.
pub fn plan_timeouts(
    records: &[Record],
    schema: &SchemaModel,
    request_tag: &str,
) -> Result<SweepPlan, SweepError> {
    let request_tag = schema.canonical_tag(request_tag);
    let (category, rule) = schema
        .top_level_item(request_tag)
        .ok_or_else(|| SweepError::UnknownItem {
            tag: request_tag.to_string(),
        })?;
    let delivered_tag = rule.delivered.first().ok_or_else(|| SweepError::NoDeliveredTag {
        tag: request_tag.to_string(),
    })?;
    let timeout_tag = rule.timeout.first().ok_or_else(|| SweepError::NoTimeoutTag {
        tag: request_tag.to_string(),
    })?;

    let mut plan = SweepPlan {
        request_tag: request_tag.to_string(),
        ..SweepPlan::default()
    };

    let mut by_household: BTreeMap<&str, Vec<Candidate<'_>>> = BTreeMap::new();
    for record in records {
        if !record
            .tags(&category.request_field)
            .iter()
            .any(|tag| tag == request_tag)
        {
            continue;
        }
        let (Some(id), Some(created_at)) = (record.id.as_deref(), record.created_at) else {
            debug!(household = %record.household, "skipping record without id or creation time");
            plan.stats.incomplete_records += 1;
            continue;
        };
        by_household
            .entry(record.household.as_str())
            .or_default()
            .push(Candidate {
                id,
                created_at,
                statuses: record.tags(&category.status_field),
            });
    }

    for (household, candidates) in by_household {
        plan.stats.households += 1;
        if candidates.len() == 1 {
            plan.stats.single_request_households += 1;
            continue;
        }

        let Some(latest_delivery) = candidates
            .iter()
            .filter(|candidate| candidate.has(delivered_tag))
            .map(|candidate| candidate.created_at)
            .max()
        else {
            continue;
        };

        for candidate in &candidates {
            if candidate.has(delivered_tag)
                || candidate.has(timeout_tag)
                || candidate.created_at >= latest_delivery
            {
                continue;
            }

            info!(
                household = %household,
                created_at = %candidate.created_at,
                tag = %timeout_tag,
                "timing out superseded request"
            );
            let mut statuses = candidate.statuses.to_vec();
            statuses.push(timeout_tag.clone());
            plan.updates.push(TimeoutUpdate {
                record_id: candidate.id.to_string(),
                household_reference: household.to_string(),
                status_field: category.status_field.clone(),
                statuses,
                added_tag: timeout_tag.clone(),
            });
            plan.stats.timed_out_requests += 1;
        }
    }

    Ok(plan)
}

struct Candidate<'a> {
    id: &'a str,
    created_at: NaiveDateTime,
    statuses: &'a [String],
}

impl Candidate<'_> {
    fn has(&self, tag: &str) -> bool {
        self.statuses.iter().any(|status| status == tag)
    }
}

//! QueryParams → LogFilter, and the audit description of a query.

use serde_json::json;

use logvault_core::models::timestamp::start_of_day;
use logvault_core::models::{LogFilter, QueryParams};
use logvault_privacy::PrivacyEngine;

/// Resolve day bounds to instants and hash the user id.
/// `start_date` is inclusive from 00:00; `end_date` includes the whole day,
/// so the bound is the next day's 00:00, exclusive.
pub fn build_filter(params: &QueryParams, privacy: &PrivacyEngine) -> LogFilter {
    LogFilter {
        start: params.start_date.map(start_of_day),
        end_exclusive: params
            .end_date
            .and_then(|d| d.succ_opt())
            .map(start_of_day),
        level: params.level,
        component: params.component.clone(),
        user_id_hash: privacy.hash_optional(params.user_id.as_deref()),
        limit: params.limit,
    }
}

/// Audit details for a query. The user id is deliberately absent.
pub fn audit_details(params: &QueryParams) -> serde_json::Value {
    json!({
        "start": params.start_date.map(|d| d.to_string()),
        "end": params.end_date.map(|d| d.to_string()),
        "level": params.level.map(|l| l.as_str()),
        "component": params.component,
        "limit": params.limit,
    })
}

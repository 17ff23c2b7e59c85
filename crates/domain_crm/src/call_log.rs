//! Call logs written by the phone agent integration
//!
//! Append-only: rows are created and listed, never updated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{CallLogId, CustomerId, LeadId};

use crate::error::CrmError;

string_enum! {
    /// Direction of the call
    pub enum CallDirection {
        Inbound => "inbound",
        Outbound => "outbound",
    }
}

string_enum! {
    /// Caller sentiment reported by the call provider
    pub enum Sentiment {
        Positive => "positive",
        Neutral => "neutral",
        Negative => "negative",
    }
}

/// A call log row as stored remotely
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallLog {
    pub id: CallLogId,
    pub lead_id: Option<LeadId>,
    pub customer_id: Option<CustomerId>,
    pub caller_name: Option<String>,
    pub caller_phone: Option<String>,
    pub duration_seconds: Option<u32>,
    pub call_type: Option<CallDirection>,
    pub sentiment: Option<Sentiment>,
    pub summary: Option<String>,
    pub transcript: Option<serde_json::Value>,
    #[serde(rename = "retell_call_id")]
    pub provider_call_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Request to append a call log
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewCallLog {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lead_id: Option<LeadId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<CustomerId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caller_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caller_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_type: Option<CallDirection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<Sentiment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript: Option<serde_json::Value>,
    #[serde(
        rename = "retell_call_id",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub provider_call_id: Option<String>,
}

impl NewCallLog {
    /// A transcript must be structured, not a bare scalar
    pub fn prepare(self) -> Result<NewCallLog, CrmError> {
        if let Some(transcript) = &self.transcript {
            if !(transcript.is_object() || transcript.is_array() || transcript.is_null()) {
                return Err(CrmError::invalid(
                    "transcript: transcript must be a JSON object or array",
                ));
            }
        }

        Ok(self)
    }
}

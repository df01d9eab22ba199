use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{validate::FieldErrors, ServiceError, ServiceResult};

/// Instruction template sent alongside the notes. `{notes}` is
/// replaced with the submitted text.
pub const SUMMARY_PROMPT: &str = "\
You are an AI assistant that summarizes key decisions from meeting notes into a concise announcement.

Meeting Notes: {notes}

Please provide a clear and concise announcement summarizing the key decisions made during the meeting.
The announcement should be easily digestible for all members of the organization.";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryRequest {
    #[serde(rename = "meetingNotes")]
    pub meeting_notes: String,
    pub prompt: String,
}

impl SummaryRequest {
    pub fn for_notes(meeting_notes: &str) -> Self {
        Self {
            meeting_notes: meeting_notes.to_string(),
            prompt: SUMMARY_PROMPT.replace("{notes}", meeting_notes),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryResponse {
    #[serde(rename = "announcementSummary")]
    pub announcement_summary: String,
}

/// External text generation service. The announcement form calls it
/// with meeting notes and shows the returned summary for editing.
#[async_trait]
pub trait Summarize {
    async fn summarize(&self, request: &SummaryRequest) -> Result<SummaryResponse>;
}

/// Turn meeting notes into a draft announcement through the
/// summarization service.
pub async fn summarize_decision<S>(service: &S, meeting_notes: &str) -> ServiceResult<String>
where
    S: Summarize + Sync,
{
    if meeting_notes.trim().is_empty() {
        let mut errors = FieldErrors::new();
        errors.push("meeting_notes", "Please enter some meeting notes to summarize.");
        return Err(ServiceError::Invalid(errors));
    }

    let request = SummaryRequest::for_notes(meeting_notes);
    match service.summarize(&request).await {
        Ok(response) => Ok(response.announcement_summary),
        Err(err) => {
            log::error!("summarization failed: {:?}", err);
            Err(ServiceError::Summarization(err))
        }
    }
}

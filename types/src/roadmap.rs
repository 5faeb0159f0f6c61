//! Roadmap items shown on the planning board.

use serde::{Deserialize, Serialize};

use crate::{FeedbackId, RoadmapId, RoadmapStatus, Timeline};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapItem {
    pub id: RoadmapId,
    pub title: String,
    pub description: String,
    pub status: RoadmapStatus,
    pub timeline: Option<Timeline>,
    /// Feedback items this work addresses.
    pub linked_feedback_ids: Vec<FeedbackId>,
    /// Free-form target such as "Q3 2025".
    pub estimated_date: Option<String>,
    pub votes: Option<u32>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRoadmapItem {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: RoadmapStatus,
    #[serde(default)]
    pub timeline: Option<Timeline>,
    #[serde(default)]
    pub linked_feedback_ids: Vec<FeedbackId>,
    #[serde(default)]
    pub estimated_date: Option<String>,
    #[serde(default)]
    pub votes: Option<u32>,
}

impl RoadmapItem {
    pub fn new(id: RoadmapId, item: NewRoadmapItem) -> Self {
        Self {
            id,
            title: item.title,
            description: item.description,
            status: item.status,
            timeline: item.timeline,
            linked_feedback_ids: item.linked_feedback_ids,
            estimated_date: item.estimated_date,
            votes: item.votes,
        }
    }
}

/// Partial update; absent fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<RoadmapStatus>,
    pub timeline: Option<Timeline>,
    pub linked_feedback_ids: Option<Vec<FeedbackId>>,
    pub estimated_date: Option<String>,
    pub votes: Option<u32>,
}

impl RoadmapPatch {
    pub fn apply(self, item: &mut RoadmapItem) {
        if let Some(title) = self.title {
            item.title = title;
        }
        if let Some(description) = self.description {
            item.description = description;
        }
        if let Some(status) = self.status {
            item.status = status;
        }
        if let Some(timeline) = self.timeline {
            item.timeline = Some(timeline);
        }
        if let Some(ids) = self.linked_feedback_ids {
            item.linked_feedback_ids = ids;
        }
        if let Some(date) = self.estimated_date {
            item.estimated_date = Some(date);
        }
        if let Some(votes) = self.votes {
            item.votes = Some(votes);
        }
    }
}

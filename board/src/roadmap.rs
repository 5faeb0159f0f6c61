//! Roadmap items and the planning board.

use std::sync::Arc;

use feedback_store::BoardStore;
use feedback_types::{NewRoadmapItem, RoadmapId, RoadmapItem, RoadmapPatch, RoadmapStatus, Timeline};
use serde::Serialize;
use tracing::info;

use crate::{required, BoardError};

/// Roadmap items grouped into their status columns, each in id order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapBoard {
    pub planned: Vec<RoadmapItem>,
    pub in_progress: Vec<RoadmapItem>,
    pub completed: Vec<RoadmapItem>,
}

impl RoadmapBoard {
    pub fn column(&self, status: RoadmapStatus) -> &[RoadmapItem] {
        match status {
            RoadmapStatus::Planned => &self.planned,
            RoadmapStatus::InProgress => &self.in_progress,
            RoadmapStatus::Completed => &self.completed,
        }
    }
}

pub struct RoadmapService {
    store: Arc<dyn BoardStore>,
}

impl RoadmapService {
    pub fn new(store: Arc<dyn BoardStore>) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Result<Vec<RoadmapItem>, BoardError> {
        Ok(self.store.list_roadmap_items()?)
    }

    pub fn get(&self, id: RoadmapId) -> Result<RoadmapItem, BoardError> {
        Ok(self.store.get_roadmap_item(id)?)
    }

    pub fn create(&self, item: NewRoadmapItem) -> Result<RoadmapItem, BoardError> {
        let item = NewRoadmapItem {
            title: required("title", item.title)?,
            ..item
        };
        let created = self.store.insert_roadmap_item(item)?;
        info!(roadmap_id = %created.id, status = %created.status, "roadmap item created");
        Ok(created)
    }

    /// Apply a partial update. A patched title must not be blank.
    pub fn update(&self, id: RoadmapId, patch: RoadmapPatch) -> Result<RoadmapItem, BoardError> {
        let patch = RoadmapPatch {
            title: patch.title.map(|t| required("title", t)).transpose()?,
            ..patch
        };
        let mut item = self.store.get_roadmap_item(id)?;
        patch.apply(&mut item);
        Ok(self.store.save_roadmap_item(&item)?)
    }

    pub fn delete(&self, id: RoadmapId) -> Result<(), BoardError> {
        self.store.delete_roadmap_item(id)?;
        info!(roadmap_id = %id, "roadmap item deleted");
        Ok(())
    }

    pub fn by_timeline(&self, timeline: Timeline) -> Result<Vec<RoadmapItem>, BoardError> {
        let mut items = self.store.list_roadmap_items()?;
        items.retain(|item| item.timeline == Some(timeline));
        Ok(items)
    }

    pub fn board(&self) -> Result<RoadmapBoard, BoardError> {
        let mut board = RoadmapBoard::default();
        for item in self.store.list_roadmap_items()? {
            match item.status {
                RoadmapStatus::Planned => board.planned.push(item),
                RoadmapStatus::InProgress => board.in_progress.push(item),
                RoadmapStatus::Completed => board.completed.push(item),
            }
        }
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feedback_nullables::MemoryStore;
    use feedback_types::FeedbackId;

    fn service() -> RoadmapService {
        RoadmapService::new(Arc::new(MemoryStore::new()))
    }

    fn planned(title: &str, timeline: Timeline) -> NewRoadmapItem {
        NewRoadmapItem {
            title: title.to_string(),
            timeline: Some(timeline),
            ..Default::default()
        }
    }

    #[test]
    fn create_applies_defaults() {
        let service = service();
        let item = service.create(planned(" Audit log ", Timeline::Later)).unwrap();
        assert_eq!(item.title, "Audit log");
        assert_eq!(item.status, RoadmapStatus::Planned);
        assert!(item.linked_feedback_ids.is_empty());
    }

    #[test]
    fn blank_title_is_rejected() {
        let service = service();
        assert!(matches!(
            service.create(planned("", Timeline::Now)),
            Err(BoardError::Validation(_))
        ));
        let item = service.create(planned("ok", Timeline::Now)).unwrap();
        let patch = RoadmapPatch {
            title: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(matches!(service.update(item.id, patch), Err(BoardError::Validation(_))));
    }

    #[test]
    fn update_moves_item_between_columns() {
        let service = service();
        let a = service.create(planned("A", Timeline::Now)).unwrap();
        service.create(planned("B", Timeline::Next)).unwrap();
        service
            .update(
                a.id,
                RoadmapPatch {
                    status: Some(RoadmapStatus::InProgress),
                    linked_feedback_ids: Some(vec![FeedbackId::new(4)]),
                    ..Default::default()
                },
            )
            .unwrap();

        let board = service.board().unwrap();
        assert_eq!(board.column(RoadmapStatus::InProgress).len(), 1);
        assert_eq!(board.planned.len(), 1);
        assert!(board.completed.is_empty());
        assert_eq!(board.in_progress[0].linked_feedback_ids, vec![FeedbackId::new(4)]);
    }

    #[test]
    fn by_timeline_filters() {
        let service = service();
        service.create(planned("A", Timeline::Now)).unwrap();
        service.create(planned("B", Timeline::Later)).unwrap();
        service.create(planned("C", Timeline::Now)).unwrap();
        let titles: Vec<String> = service
            .by_timeline(Timeline::Now)
            .unwrap()
            .into_iter()
            .map(|i| i.title)
            .collect();
        assert_eq!(titles, ["A", "C"]);
    }

    #[test]
    fn update_missing_is_not_found() {
        let service = service();
        assert!(matches!(
            service.update(RoadmapId::new(9), RoadmapPatch::default()),
            Err(BoardError::NotFound(_))
        ));
        assert!(matches!(service.delete(RoadmapId::new(9)), Err(BoardError::NotFound(_))));
    }
}

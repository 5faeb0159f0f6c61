//! LMDB implementation of RoadmapStore.

use feedback_store::{RoadmapStore, StoreError};
use feedback_types::{NewRoadmapItem, RoadmapId, RoadmapItem};

use crate::environment::{LmdbEnvironment, LAST_ROADMAP_ID};

impl RoadmapStore for LmdbEnvironment {
    fn get_roadmap_item(&self, id: RoadmapId) -> Result<RoadmapItem, StoreError> {
        self.get_record(&self.roadmap_db, &id.to_be_bytes())?
            .ok_or_else(|| StoreError::NotFound(format!("roadmap item {id}")))
    }

    fn insert_roadmap_item(&self, item: NewRoadmapItem) -> Result<RoadmapItem, StoreError> {
        Ok(self.insert_record(&self.roadmap_db, LAST_ROADMAP_ID, |id| {
            RoadmapItem::new(RoadmapId::new(id), item)
        })?)
    }

    fn save_roadmap_item(&self, item: &RoadmapItem) -> Result<RoadmapItem, StoreError> {
        if self.replace_record(&self.roadmap_db, &item.id.to_be_bytes(), item)? {
            Ok(item.clone())
        } else {
            Err(StoreError::NotFound(format!("roadmap item {}", item.id)))
        }
    }

    fn delete_roadmap_item(&self, id: RoadmapId) -> Result<(), StoreError> {
        if self.delete_record(&self.roadmap_db, &id.to_be_bytes())? {
            Ok(())
        } else {
            Err(StoreError::NotFound(format!("roadmap item {id}")))
        }
    }

    fn list_roadmap_items(&self) -> Result<Vec<RoadmapItem>, StoreError> {
        Ok(self.list_records(&self.roadmap_db)?)
    }
}

//! Roadmap storage trait.

use crate::StoreError;
use feedback_types::{NewRoadmapItem, RoadmapId, RoadmapItem};

pub trait RoadmapStore {
    fn get_roadmap_item(&self, id: RoadmapId) -> Result<RoadmapItem, StoreError>;
    fn insert_roadmap_item(&self, item: NewRoadmapItem) -> Result<RoadmapItem, StoreError>;
    /// Full replace by id; `NotFound` if the id is unknown.
    fn save_roadmap_item(&self, item: &RoadmapItem) -> Result<RoadmapItem, StoreError>;
    fn delete_roadmap_item(&self, id: RoadmapId) -> Result<(), StoreError>;
    fn list_roadmap_items(&self) -> Result<Vec<RoadmapItem>, StoreError>;
}

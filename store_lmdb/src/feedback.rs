//! LMDB implementation of FeedbackStore.

use feedback_store::{FeedbackStore, StoreError};
use feedback_types::{FeedbackId, FeedbackItem, NewFeedback, Timestamp};

use crate::environment::{LmdbEnvironment, LAST_FEEDBACK_ID};
use crate::LmdbError;

impl FeedbackStore for LmdbEnvironment {
    fn fetch_item(&self, id: FeedbackId) -> Result<FeedbackItem, StoreError> {
        self.get_record(&self.feedback_db, &id.to_be_bytes())?
            .ok_or_else(|| StoreError::NotFound(format!("feedback {id}")))
    }

    fn save_item(&self, item: &FeedbackItem) -> Result<FeedbackItem, StoreError> {
        item.check_invariants()?;
        if self.replace_record(&self.feedback_db, &item.id.to_be_bytes(), item)? {
            Ok(item.clone())
        } else {
            Err(StoreError::NotFound(format!("feedback {}", item.id)))
        }
    }

    fn insert_item(
        &self,
        submission: NewFeedback,
        now: Timestamp,
    ) -> Result<FeedbackItem, StoreError> {
        let item = self.insert_record(&self.feedback_db, LAST_FEEDBACK_ID, |id| {
            FeedbackItem::new(FeedbackId::new(id), submission, now)
        })?;
        Ok(item)
    }

    fn delete_item(&self, id: FeedbackId) -> Result<(), StoreError> {
        if self.delete_record(&self.feedback_db, &id.to_be_bytes())? {
            Ok(())
        } else {
            Err(StoreError::NotFound(format!("feedback {id}")))
        }
    }

    fn list_items(&self) -> Result<Vec<FeedbackItem>, StoreError> {
        Ok(self.list_records(&self.feedback_db)?)
    }
}

#[cfg(test)]
mod tests {
    use crate::environment::open_test_env;
    use feedback_store::{FeedbackStore, StoreError};
    use feedback_types::{Category, FeedbackId, FeedbackStatus, NewFeedback, Timestamp, VoterId};

    fn submission(title: &str) -> NewFeedback {
        NewFeedback {
            title: title.to_string(),
            description: "from lmdb".to_string(),
            category: Category::Bug,
        }
    }

    #[test]
    fn insert_then_fetch() {
        let (_dir, env) = open_test_env();
        let item = env.insert_item(submission("crash"), Timestamp::new(7)).unwrap();
        assert_eq!(item.id, FeedbackId::new(1));
        assert_eq!(item.status, FeedbackStatus::New);
        assert_eq!(env.fetch_item(item.id).unwrap(), item);
    }

    #[test]
    fn save_replaces_record() {
        let (_dir, env) = open_test_env();
        let mut item = env.insert_item(submission("slow"), Timestamp::new(1)).unwrap();
        item.upvoted_by.insert(VoterId::parse("alice").unwrap());
        item.upvotes = 1;
        env.save_item(&item).unwrap();
        assert_eq!(env.fetch_item(item.id).unwrap().upvotes, 1);
    }

    #[test]
    fn save_unknown_is_not_found() {
        let (_dir, env) = open_test_env();
        let mut item = env.insert_item(submission("x"), Timestamp::new(1)).unwrap();
        item.id = FeedbackId::new(50);
        assert!(matches!(env.save_item(&item), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn save_rejects_broken_invariant() {
        let (_dir, env) = open_test_env();
        let mut item = env.insert_item(submission("x"), Timestamp::new(1)).unwrap();
        item.downvotes = 1;
        assert!(matches!(env.save_item(&item), Err(StoreError::Corruption(_))));
    }

    #[test]
    fn delete_and_list_in_id_order() {
        let (_dir, env) = open_test_env();
        for n in 0..300 {
            env.insert_item(submission(&format!("item {n}")), Timestamp::new(n)).unwrap();
        }
        env.delete_item(FeedbackId::new(2)).unwrap();
        assert!(matches!(
            env.delete_item(FeedbackId::new(2)),
            Err(StoreError::NotFound(_))
        ));
        let ids: Vec<u64> = env.list_items().unwrap().iter().map(|i| i.id.get()).collect();
        assert_eq!(ids.len(), 299);
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
        assert!(!ids.contains(&2));
    }
}

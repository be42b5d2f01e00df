//! # Repository
//!
//! An entity-bound facade over a [`Dao`]. Services depend on repositories,
//! never on SQL, and the DAO behind a repository can be swapped (tests use
//! this to simulate races).

use super::dao::{Dao, SqliteDao};
use super::entity::{Entity, Filter};
use super::store::models::{Account, ActivityLog};
use super::store::DbPool;
use std::sync::Arc;
use uuid::Uuid;

pub type AccountRepository = Repository<Account>;
pub type ActivityLogRepository = Repository<ActivityLog>;

/// Delegates the six DAO operations for one entity type.
pub struct Repository<E: Entity> {
    dao: Arc<dyn Dao<E>>,
}

impl<E: Entity> Clone for Repository<E> {
    fn clone(&self) -> Self {
        Self {
            dao: Arc::clone(&self.dao),
        }
    }
}

impl<E: Entity> Repository<E> {
    pub fn new(dao: Arc<dyn Dao<E>>) -> Self {
        Self { dao }
    }

    /// Repository backed by [`SqliteDao`] on `pool`.
    pub fn sqlite(pool: DbPool) -> Self {
        Self::new(Arc::new(SqliteDao::<E>::new(pool)))
    }

    pub async fn find_by_id(&self, id: Uuid) -> Option<E> {
        self.dao.find_by_id(id).await
    }

    pub async fn find_one_or_none(&self, filter: Filter) -> Option<E> {
        self.dao.find_one_or_none(filter).await
    }

    pub async fn find_all(&self, filter: Filter) -> Vec<E> {
        self.dao.find_all(filter).await
    }

    pub async fn insert_one(&self, data: E::ForCreate) -> Option<E> {
        self.dao.insert_one(data).await
    }

    pub async fn update_one(&self, id: Uuid, patch: E::ForUpdate) -> Option<E> {
        self.dao.update_one(id, patch).await
    }

    pub async fn delete_one(&self, id: Uuid) -> bool {
        self.dao.delete_one(id).await
    }
}

impl Repository<Account> {
    /// Exact, case-sensitive lookup by email.
    pub async fn find_by_email(&self, email: &str) -> Option<Account> {
        self.find_one_or_none(Filter::by("email", email)).await
    }
}

impl Repository<ActivityLog> {
    /// Every activity entry recorded for `account_id`.
    pub async fn find_by_account(&self, account_id: Uuid) -> Vec<ActivityLog> {
        self.find_all(Filter::by("account_id", account_id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::_dev_utils::init_test_db;
    use crate::model::{AccountForCreate, ActivityLogForCreate};
    use async_trait::async_trait;
    use std::sync::Mutex;

    fn new_account(email: &str) -> AccountForCreate {
        AccountForCreate::new("ann".to_string(), email.to_string(), "hash".to_string())
    }

    #[tokio::test]
    async fn test_find_by_email() {
        let pool = init_test_db().await;
        let repo = AccountRepository::sqlite(pool);
        let ann = repo.insert_one(new_account("ann@x.com")).await.unwrap();

        assert_eq!(repo.find_by_email("ann@x.com").await.unwrap().id, ann.id);
        assert!(repo.find_by_email("ANN@x.com").await.is_none());
        assert!(repo.find_by_email("bob@x.com").await.is_none());
    }

    #[tokio::test]
    async fn test_delegates_full_lifecycle() {
        let pool = init_test_db().await;
        let repo = AccountRepository::sqlite(pool);

        let ann = repo.insert_one(new_account("ann@x.com")).await.unwrap();
        assert_eq!(repo.find_all(Filter::new()).await.len(), 1);
        assert!(repo.find_by_id(ann.id).await.is_some());

        let patch = crate::model::AccountForUpdate::new().email("ann@y.com".to_string());
        assert_eq!(repo.update_one(ann.id, patch).await.unwrap().email, "ann@y.com");

        assert!(repo.delete_one(ann.id).await);
        assert!(repo.find_all(Filter::new()).await.is_empty());
    }

    #[tokio::test]
    async fn test_find_by_account() {
        let pool = init_test_db().await;
        let accounts = AccountRepository::sqlite(pool.clone());
        let activity = ActivityLogRepository::sqlite(pool);

        let ann = accounts.insert_one(new_account("ann@x.com")).await.unwrap();
        let bob = accounts.insert_one(new_account("bob@x.com")).await.unwrap();
        activity.insert_one(ActivityLogForCreate::new(ann.id, "signup", "a")).await.unwrap();
        activity.insert_one(ActivityLogForCreate::new(ann.id, "login", "b")).await.unwrap();
        activity.insert_one(ActivityLogForCreate::new(bob.id, "signup", "c")).await.unwrap();

        assert_eq!(activity.find_by_account(ann.id).await.len(), 2);
        assert_eq!(activity.find_by_account(bob.id).await.len(), 1);
    }

    /// Records the filters it receives and answers from nothing.
    #[derive(Default)]
    struct RecordingDao {
        filters: Mutex<Vec<Filter>>,
    }

    #[async_trait]
    impl Dao<Account> for RecordingDao {
        async fn find_by_id(&self, _id: Uuid) -> Option<Account> {
            None
        }
        async fn find_one_or_none(&self, filter: Filter) -> Option<Account> {
            self.filters.lock().unwrap().push(filter);
            None
        }
        async fn find_all(&self, filter: Filter) -> Vec<Account> {
            self.filters.lock().unwrap().push(filter);
            Vec::new()
        }
        async fn insert_one(&self, _data: AccountForCreate) -> Option<Account> {
            None
        }
        async fn update_one(&self, _id: Uuid, _patch: crate::model::AccountForUpdate) -> Option<Account> {
            None
        }
        async fn delete_one(&self, _id: Uuid) -> bool {
            false
        }
    }

    #[tokio::test]
    async fn test_any_dao_can_back_a_repository() {
        let dao = Arc::new(RecordingDao::default());
        let repo = AccountRepository::new(dao.clone());

        assert!(repo.find_by_email("ann@x.com").await.is_none());

        let filters = dao.filters.lock().unwrap();
        assert_eq!(filters.as_slice(), &[Filter::by("email", "ann@x.com")]);
    }
}

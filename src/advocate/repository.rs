use async_trait::async_trait;
use std::sync::Mutex;
use tracing::{debug, instrument};

use super::models::Advocate;
use crate::shared::AppError;

/// Trait for advocate directory lookups
#[async_trait]
pub trait AdvocateRepository {
    async fn get_advocate(&self, advocate_id: &str) -> Result<Option<Advocate>, AppError>;
    async fn list_advocates(&self) -> Result<Vec<Advocate>, AppError>;
}

/// In-memory advocate directory, seeded at startup
pub struct InMemoryAdvocateRepository {
    advocates: Mutex<Vec<Advocate>>,
}

impl InMemoryAdvocateRepository {
    /// Creates a directory with the demo advocates
    pub fn with_demo_directory() -> Self {
        Self {
            advocates: Mutex::new(vec![
                Advocate {
                    id: "adv1".to_string(),
                    name: "Advocate A".to_string(),
                    specialty: "Family Law".to_string(),
                    rating: 4.7,
                    bio: "10 years experience in family disputes".to_string(),
                },
                Advocate {
                    id: "adv2".to_string(),
                    name: "Advocate B".to_string(),
                    specialty: "Criminal Law".to_string(),
                    rating: 4.5,
                    bio: "Expert in criminal defense".to_string(),
                },
                Advocate {
                    id: "adv3".to_string(),
                    name: "Advocate C".to_string(),
                    specialty: "Corporate Law".to_string(),
                    rating: 4.8,
                    bio: "Corporate contracts & compliance".to_string(),
                },
            ]),
        }
    }

    /// Creates an empty directory, mainly for tests
    pub fn empty() -> Self {
        Self {
            advocates: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl AdvocateRepository for InMemoryAdvocateRepository {
    #[instrument(skip(self))]
    async fn get_advocate(&self, advocate_id: &str) -> Result<Option<Advocate>, AppError> {
        let advocates = self.advocates.lock().unwrap();
        let advocate = advocates.iter().find(|a| a.id == advocate_id).cloned();

        match &advocate {
            Some(a) => debug!(advocate_id = %advocate_id, name = %a.name, "Advocate found"),
            None => debug!(advocate_id = %advocate_id, "Advocate not found"),
        }

        Ok(advocate)
    }

    #[instrument(skip(self))]
    async fn list_advocates(&self) -> Result<Vec<Advocate>, AppError> {
        let advocates = self.advocates.lock().unwrap();
        Ok(advocates.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_demo_directory_lists_all_advocates() {
        let repo = InMemoryAdvocateRepository::with_demo_directory();

        let advocates = repo.list_advocates().await.unwrap();

        assert_eq!(advocates.len(), 3);
        assert_eq!(advocates[0].id, "adv1");
        assert_eq!(advocates[1].specialty, "Criminal Law");
        assert_eq!(advocates[2].rating, 4.8);
    }

    #[tokio::test]
    async fn test_get_advocate_by_id() {
        let repo = InMemoryAdvocateRepository::with_demo_directory();

        let advocate = repo.get_advocate("adv2").await.unwrap();
        assert!(advocate.is_some());
        assert_eq!(advocate.unwrap().name, "Advocate B");
    }

    #[tokio::test]
    async fn test_get_unknown_advocate() {
        let repo = InMemoryAdvocateRepository::with_demo_directory();

        let advocate = repo.get_advocate("adv99").await.unwrap();
        assert!(advocate.is_none());
    }

    #[tokio::test]
    async fn test_empty_directory() {
        let repo = InMemoryAdvocateRepository::empty();

        assert!(repo.list_advocates().await.unwrap().is_empty());
        assert!(repo.get_advocate("adv1").await.unwrap().is_none());
    }
}

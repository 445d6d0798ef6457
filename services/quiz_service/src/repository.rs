//! services/quiz_service/src/repository.rs
//!
//! A caller-owned question repository that caches each assignment for a fixed TTL
//! in front of any `QuestionSource`.

use chrono::{DateTime, Duration, Utc};
use quiz_engine_core::domain::Question;
use quiz_engine_core::ports::{Clock, PortResult, QuestionSource};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

struct CacheEntry {
    questions: Arc<Vec<Question>>,
    fetched_at: DateTime<Utc>,
}

/// Caches assignments fetched from a `QuestionSource`.
///
/// Entries expire `ttl` after they were fetched; a zero TTL disables caching.
/// Failed fetches are never cached.
pub struct CachedQuestionRepository {
    source: Arc<dyn QuestionSource>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
    cache: RwLock<HashMap<String, CacheEntry>>,
}

impl CachedQuestionRepository {
    pub fn new(source: Arc<dyn QuestionSource>, clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self {
            source,
            clock,
            ttl,
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the questions of an assignment, from the cache while it is fresh.
    pub async fn questions(&self, assignment_id: &str) -> PortResult<Arc<Vec<Question>>> {
        let now = self.clock.now();
        {
            let cache = self.cache.read().await;
            if let Some(entry) = cache.get(assignment_id) {
                if now - entry.fetched_at < self.ttl {
                    debug!(assignment_id, "Question cache hit.");
                    return Ok(entry.questions.clone());
                }
            }
        }

        let questions = Arc::new(self.source.fetch_questions(assignment_id).await?);
        info!(assignment_id, count = questions.len(), "Questions loaded from source.");

        if self.ttl > Duration::zero() {
            self.cache.write().await.insert(
                assignment_id.to_string(),
                CacheEntry {
                    questions: questions.clone(),
                    fetched_at: now,
                },
            );
        }
        Ok(questions)
    }

    /// Lists assignment ids straight from the source.
    pub async fn assignments(&self) -> PortResult<Vec<String>> {
        self.source.list_assignments().await
    }

    pub async fn invalidate(&self, assignment_id: &str) {
        if self.cache.write().await.remove(assignment_id).is_some() {
            debug!(assignment_id, "Question cache entry invalidated.");
        }
    }

    pub async fn clear(&self) {
        self.cache.write().await.clear();
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{questions, ManualClock, MockSource};
    use super::*;
    use quiz_engine_core::ports::PortError;

    fn repository(source: MockSource, clock: Arc<ManualClock>, ttl_secs: i64) -> CachedQuestionRepository {
        CachedQuestionRepository::new(Arc::new(source), clock, Duration::seconds(ttl_secs))
    }

    #[tokio::test]
    async fn fresh_entries_are_served_from_cache() {
        let mut source = MockSource::new();
        source
            .expect_fetch_questions()
            .times(1)
            .returning(|id| Ok(questions(id, 3)));
        let clock = ManualClock::new();
        let repo = repository(source, clock.clone(), 60);

        let first = repo.questions("week-1").await.unwrap();
        clock.tick(59);
        let second = repo.questions("week-1").await.unwrap();

        assert_eq!(first.len(), 3);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn expired_entries_are_refetched() {
        let mut source = MockSource::new();
        source
            .expect_fetch_questions()
            .times(2)
            .returning(|id| Ok(questions(id, 2)));
        let clock = ManualClock::new();
        let repo = repository(source, clock.clone(), 60);

        repo.questions("week-1").await.unwrap();
        clock.tick(60);
        repo.questions("week-1").await.unwrap();
    }

    #[tokio::test]
    async fn zero_ttl_disables_caching() {
        let mut source = MockSource::new();
        source
            .expect_fetch_questions()
            .times(3)
            .returning(|id| Ok(questions(id, 1)));
        let repo = repository(source, ManualClock::new(), 0);

        for _ in 0..3 {
            repo.questions("week-1").await.unwrap();
        }
    }

    #[tokio::test]
    async fn errors_are_not_cached() {
        let mut source = MockSource::new();
        let mut calls = 0;
        source.expect_fetch_questions().times(2).returning(move |id| {
            calls += 1;
            if calls == 1 {
                Err(PortError::Unexpected("disk on fire".to_string()))
            } else {
                Ok(questions(id, 1))
            }
        });
        let repo = repository(source, ManualClock::new(), 300);

        assert!(repo.questions("week-1").await.is_err());
        assert_eq!(repo.questions("week-1").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn invalidate_and_clear_force_a_reload() {
        let mut source = MockSource::new();
        source
            .expect_fetch_questions()
            .times(3)
            .returning(|id| Ok(questions(id, 1)));
        let repo = repository(source, ManualClock::new(), 300);

        repo.questions("week-1").await.unwrap();
        repo.invalidate("week-1").await;
        repo.questions("week-1").await.unwrap();
        repo.clear().await;
        repo.questions("week-1").await.unwrap();
    }

    #[tokio::test]
    async fn assignments_pass_through() {
        let mut source = MockSource::new();
        source
            .expect_list_assignments()
            .times(1)
            .returning(|| Ok(vec!["week-1".to_string(), "week-2".to_string()]));
        let repo = repository(source, ManualClock::new(), 300);

        assert_eq!(repo.assignments().await.unwrap(), vec!["week-1", "week-2"]);
    }
}

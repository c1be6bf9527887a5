use super::types::{QueryContext, QueryHook, QueryResult, QueryType};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Hook that counts statements by type.
#[derive(Debug, Default)]
pub struct StatsHook {
    total_queries: AtomicU64,
    failed_queries: AtomicU64,
    total_duration_nanos: AtomicU64,
    select_count: AtomicU64,
    insert_count: AtomicU64,
    update_count: AtomicU64,
    delete_count: AtomicU64,
}

/// Collected statement statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryStats {
    pub total_queries: u64,
    pub failed_queries: u64,
    pub total_duration: Duration,
    pub select_count: u64,
    pub insert_count: u64,
    pub update_count: u64,
    pub delete_count: u64,
}

impl StatsHook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a snapshot of current statistics.
    pub fn stats(&self) -> QueryStats {
        QueryStats {
            total_queries: self.total_queries.load(Ordering::Relaxed),
            failed_queries: self.failed_queries.load(Ordering::Relaxed),
            total_duration: Duration::from_nanos(self.total_duration_nanos.load(Ordering::Relaxed)),
            select_count: self.select_count.load(Ordering::Relaxed),
            insert_count: self.insert_count.load(Ordering::Relaxed),
            update_count: self.update_count.load(Ordering::Relaxed),
            delete_count: self.delete_count.load(Ordering::Relaxed),
        }
    }

    /// Reset all counters.
    pub fn reset(&self) {
        for counter in [
            &self.total_queries,
            &self.failed_queries,
            &self.total_duration_nanos,
            &self.select_count,
            &self.insert_count,
            &self.update_count,
            &self.delete_count,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
    }
}

impl QueryHook for StatsHook {
    fn after_query(&self, ctx: &QueryContext, duration: Duration, result: &QueryResult) {
        self.total_queries.fetch_add(1, Ordering::Relaxed);
        let nanos = u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX);
        self.total_duration_nanos.fetch_add(nanos, Ordering::Relaxed);

        if result.is_error() {
            self.failed_queries.fetch_add(1, Ordering::Relaxed);
        }

        let counter = match ctx.query_type {
            QueryType::Select => &self.select_count,
            QueryType::Insert => &self.insert_count,
            QueryType::Update => &self.update_count,
            QueryType::Delete => &self.delete_count,
            QueryType::Other => return,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

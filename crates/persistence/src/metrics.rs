//! Query latency and connection pool gauges.

use metrics::{gauge, histogram};
use sqlx::PgPool;
use std::time::{Duration, Instant};

const QUERY_DURATION: &str = "database_query_duration_seconds";

fn outcome<T>(result: &Result<T, sqlx::Error>) -> &'static str {
    match result {
        Ok(_) => "ok",
        Err(sqlx::Error::PoolTimedOut) => "pool_timeout",
        Err(_) => "error",
    }
}

/// Times one repository query.
///
/// ```ignore
/// let timer = QueryTimer::new("find_note_by_id");
/// let result = sqlx::query_as::<_, NoteEntity>(SQL).fetch_optional(&pool).await;
/// timer.finish(result)
/// ```
pub struct QueryTimer {
    query: &'static str,
    start: Instant,
}

impl QueryTimer {
    pub fn new(query: &'static str) -> Self {
        Self {
            query,
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Records the latency labelled by query and outcome, then hands the result back.
    pub fn finish<T>(self, result: Result<T, sqlx::Error>) -> Result<T, sqlx::Error> {
        histogram!(
            QUERY_DURATION,
            "query" => self.query,
            "outcome" => outcome(&result)
        )
        .record(self.elapsed().as_secs_f64());
        result
    }
}

/// Publishes pool occupancy; refreshed on each `/metrics` scrape.
pub fn record_pool_metrics(pool: &PgPool) {
    let size = pool.size() as usize;
    let idle = pool.num_idle();

    gauge!("database_connections_total").set(size as f64);
    gauge!("database_connections_idle").set(idle as f64);
    gauge!("database_connections_active").set(size.saturating_sub(idle) as f64);
}

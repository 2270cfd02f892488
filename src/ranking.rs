use std::str::FromStr;

use tracing::{debug, info};

use crate::store::{Movie, MovieStore, StoreResult};

/// When the stored `ranking` column gets rebuilt from ratings.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum RankingMode {
    /// Rebuilt whenever the list page is rendered. Ranks may be stale between
    /// an edit and the next list view.
    #[default]
    OnRead,
    /// Rebuilt after every create, rating edit and delete.
    OnWrite,
}

impl FromStr for RankingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "read" | "on_read" => Ok(RankingMode::OnRead),
            "write" | "on_write" => Ok(RankingMode::OnWrite),
            other => Err(format!("unknown ranking mode {other:?}, expected \"read\" or \"write\"")),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RankingReport {
    pub total: usize,
    pub changed: usize,
}

/// Dense 1-based ranks for movies already sorted by rating, highest first.
pub fn assign_ranks(by_rating_desc: &[Movie]) -> Vec<(i32, i32)> {
    by_rating_desc.iter().zip(1..).map(|(movie, rank)| (movie.id, rank)).collect()
}

/// Rewrites every stale `ranking` so ranks are 1..=N in rating order.
pub async fn recompute(store: &MovieStore) -> StoreResult<RankingReport> {
    let movies = store.list_by_rating_desc().await?;
    let ranks = assign_ranks(&movies);

    let mut changed = 0;
    for (movie, (id, rank)) in movies.iter().zip(ranks) {
        if movie.ranking == rank {
            continue;
        }
        debug!(id, from = movie.ranking, to = rank, "ranking changed");
        store.set_ranking(id, rank).await?;
        changed += 1;
    }

    let report = RankingReport { total: movies.len(), changed };
    if changed > 0 {
        info!(total = report.total, changed = report.changed, "rankings recomputed");
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: i32, rating: f64) -> Movie {
        Movie {
            id,
            title: format!("Movie {id}"),
            year: None,
            description: String::new(),
            rating,
            ranking: 0,
            review: String::new(),
            img_url: String::new(),
        }
    }

    #[test]
    fn ranks_follow_input_order() {
        let movies = vec![movie(3, 9.1), movie(1, 7.5), movie(2, 2.0)];
        assert_eq!(assign_ranks(&movies), vec![(3, 1), (1, 2), (2, 3)]);
    }

    #[test]
    fn ties_still_get_distinct_ranks() {
        let movies = vec![movie(4, 8.0), movie(5, 8.0), movie(6, 8.0)];
        let ranks: Vec<i32> = assign_ranks(&movies).into_iter().map(|(_, r)| r).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
    }

    #[test]
    fn empty_list_has_no_ranks() {
        assert!(assign_ranks(&[]).is_empty());
    }

    #[test]
    fn parses_ranking_mode() {
        assert_eq!("read".parse::<RankingMode>(), Ok(RankingMode::OnRead));
        assert_eq!(" Write ".parse::<RankingMode>(), Ok(RankingMode::OnWrite));
        assert!("sometimes".parse::<RankingMode>().is_err());
        assert_eq!(RankingMode::default(), RankingMode::OnRead);
    }
}

//! Table sampler with four sampling algorithms.

use crate::error::SamplingError;
use crate::strata::{allocate_proportionally, group_rows, Group};
use factory_core::{Row, Table};
use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Draws samples from a borrowed table.
///
/// Every sample is a new [`Table`] with the source's columns and shared
/// references to the selected rows. The seeded random source advances with
/// each draw, so the same seed and call sequence always produce the same
/// samples.
pub struct TableSampler<'a> {
    table: &'a Table,
    rng: StdRng,
}

impl<'a> TableSampler<'a> {
    /// Create a sampler over `table` seeded with `seed`.
    pub fn new(table: &'a Table, seed: u64) -> Self {
        Self {
            table,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Source table.
    pub fn table(&self) -> &'a Table {
        self.table
    }

    fn project<I>(&self, rows: I) -> Table
    where
        I: IntoIterator<Item = Arc<Row>>,
    {
        Table::new(self.table.columns().to_vec(), rows.into_iter().collect())
    }

    fn check_sample_size(&self, n: usize) -> Result<(), SamplingError> {
        if n == 0 {
            return Err(SamplingError::InvalidSampleSize(n));
        }
        Ok(())
    }

    fn check_population(&self, n: usize) -> Result<(), SamplingError> {
        if n > self.table.len() {
            return Err(SamplingError::SampleSizeExceedsPopulation {
                requested: n,
                available: self.table.len(),
            });
        }
        Ok(())
    }

    fn check_column(&self, column: &str) -> Result<(), SamplingError> {
        if !self.table.has_column(column) {
            return Err(SamplingError::UnknownColumn(column.to_string()));
        }
        Ok(())
    }

    // ===== Simple random =====

    /// Draw `n` rows uniformly, in draw order.
    pub fn random_sampling(
        &mut self,
        n: usize,
        with_replacement: bool,
    ) -> Result<Table, SamplingError> {
        self.check_sample_size(n)?;
        let rows = self.table.rows();

        let picked: Vec<Arc<Row>> = if with_replacement {
            if rows.is_empty() {
                return Err(SamplingError::EmptyTable);
            }
            (0..n)
                .map(|_| Arc::clone(&rows[self.rng.gen_range(0..rows.len())]))
                .collect()
        } else {
            self.check_population(n)?;
            index::sample(&mut self.rng, rows.len(), n)
                .into_iter()
                .map(|i| Arc::clone(&rows[i]))
                .collect()
        };

        info!(
            "Random sample of {} rows (with_replacement={})",
            picked.len(),
            with_replacement
        );
        Ok(self.project(picked))
    }

    // ===== Stratified =====

    /// Draw `n` rows split proportionally across the values of `column`.
    ///
    /// Each stratum contributes at most its own size; a stratum allocated
    /// more rows than it holds is silently truncated, so the result can be
    /// smaller than `n`. Strata are emitted in order of first appearance.
    pub fn stratified_sampling(&mut self, n: usize, column: &str) -> Result<Table, SamplingError> {
        self.check_sample_size(n)?;
        self.check_column(column)?;
        self.check_population(n)?;

        let strata = group_rows(self.table.rows(), column);
        if n < strata.len() {
            warn!(
                "Sample size {} is too small to follow the proportions of column '{}' ({} strata)",
                n,
                column,
                strata.len()
            );
        }

        let sizes: Vec<usize> = strata.iter().map(|g| g.rows.len()).collect();
        let shares = allocate_proportionally(&sizes, n);

        let mut picked = Vec::with_capacity(n);
        for (stratum, share) in strata.iter().zip(shares) {
            let take = share.min(stratum.rows.len());
            debug!("Stratum {:?}: taking {} of {}", stratum.key, take, stratum.rows.len());
            picked.extend(
                index::sample(&mut self.rng, stratum.rows.len(), take)
                    .into_iter()
                    .map(|i| Arc::clone(stratum.rows[i])),
            );
        }

        info!(
            "Stratified sample of {} rows over {} strata of '{}'",
            picked.len(),
            strata.len(),
            column
        );
        Ok(self.project(picked))
    }

    // ===== Systematic =====

    /// Take every `interval`-th row starting at index 0, wrapping around.
    ///
    /// A position whose row was already taken is skipped one index at a time
    /// before the next interval step. "Already taken" compares row identity,
    /// not content: two distinct rows with equal values are both eligible.
    pub fn systematic_sampling(&mut self, interval: usize, n: usize) -> Result<Table, SamplingError> {
        if interval == 0 {
            return Err(SamplingError::InvalidInterval(interval));
        }
        self.check_sample_size(n)?;
        self.check_population(n)?;

        let rows = self.table.rows();
        if interval >= rows.len() {
            return Err(SamplingError::IntervalExceedsPopulation {
                interval,
                rows: rows.len(),
            });
        }

        let distinct: HashSet<*const Row> = rows.iter().map(Arc::as_ptr).collect();
        if distinct.len() < n {
            return Err(SamplingError::SampleSizeExceedsPopulation {
                requested: n,
                available: distinct.len(),
            });
        }

        let mut taken: HashSet<*const Row> = HashSet::with_capacity(n);
        let mut picked = Vec::with_capacity(n);
        let mut idx = 0usize;
        while picked.len() < n {
            while taken.contains(&Arc::as_ptr(&rows[idx % rows.len()])) {
                idx += 1;
            }
            let row = &rows[idx % rows.len()];
            taken.insert(Arc::as_ptr(row));
            picked.push(Arc::clone(row));
            idx += interval;
        }

        info!("Systematic sample of {} rows every {} rows", n, interval);
        Ok(self.project(picked))
    }

    // ===== Cluster =====

    /// Pick `n` distinct groups of `group_column` and return all their rows.
    ///
    /// Rows come out group by group, in the order the groups were drawn.
    pub fn cluster_sampling(&mut self, group_column: &str, n: usize) -> Result<Table, SamplingError> {
        self.check_sample_size(n)?;
        self.check_column(group_column)?;

        let clusters: Vec<Group<'_>> = group_rows(self.table.rows(), group_column);
        if n > clusters.len() {
            return Err(SamplingError::ClusterCountExceedsAvailable {
                requested: n,
                available: clusters.len(),
            });
        }

        let chosen = index::sample(&mut self.rng, clusters.len(), n);
        let picked: Vec<Arc<Row>> = chosen
            .iter()
            .flat_map(|i| clusters[i].rows.iter().map(|row| Arc::clone(row)))
            .collect();

        info!(
            "Cluster sample of {} clusters ({} rows) by '{}'",
            n,
            picked.len(),
            group_column
        );
        Ok(self.project(picked))
    }
}

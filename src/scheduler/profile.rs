//! Time-indexed remaining-capacity table.

use crate::models::{JobId, ProblemInstance, Time};

/// Remaining capacity per resource and period, `[r][periods]`.
///
/// Every period starts at the resource's full capacity (renewable
/// resources). Jobs occupy the half-open interval `[start, start + duration)`.
#[derive(Debug, Clone)]
pub struct ResourceProfile<'a> {
    instance: &'a ProblemInstance,
    remaining: Vec<Vec<u32>>,
    periods: Time,
}

/// A period in which a resource would be overloaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overload {
    pub resource: usize,
    pub period: Time,
}

impl<'a> ResourceProfile<'a> {
    /// Creates a profile covering periods `0..periods`.
    pub fn new(instance: &'a ProblemInstance, periods: Time) -> Self {
        let remaining = instance
            .capacities()
            .iter()
            .map(|&cap| vec![cap; periods as usize])
            .collect();
        Self {
            instance,
            remaining,
            periods,
        }
    }

    /// Number of periods covered.
    pub fn periods(&self) -> Time {
        self.periods
    }

    /// Remaining units of `resource` in `period`.
    #[inline]
    pub fn remaining(&self, resource: usize, period: Time) -> u32 {
        self.remaining[resource][period as usize]
    }

    /// Whether `job` fits if started at `start`.
    ///
    /// The caller guarantees `start + duration <= periods`.
    pub fn fits(&self, job: JobId, start: Time) -> bool {
        let range = self.interval(job, start);
        self.instance
            .demands(job)
            .iter()
            .zip(&self.remaining)
            .all(|(&demand, row)| demand == 0 || row[range.clone()].iter().all(|&r| r >= demand))
    }

    /// Subtracts the demand of `job` over its interval.
    ///
    /// The caller guarantees the job [`fits`](Self::fits).
    pub fn reserve(&mut self, job: JobId, start: Time) {
        let range = self.interval(job, start);
        for (&demand, row) in self.instance.demands(job).iter().zip(&mut self.remaining) {
            if demand == 0 {
                continue;
            }
            for slot in &mut row[range.clone()] {
                *slot -= demand;
            }
        }
    }

    /// Subtracts the demand of `job` period by period, stopping at the first
    /// period where a resource would go below zero.
    ///
    /// Periods are visited in time order and resources in index order within
    /// a period; on failure the profile is left partially updated.
    pub fn try_reserve(&mut self, job: JobId, start: Time) -> Result<(), Overload> {
        let demands = self.instance.demands(job);
        for period in self.interval(job, start) {
            for (resource, &demand) in demands.iter().enumerate() {
                let slot = &mut self.remaining[resource][period];
                match slot.checked_sub(demand) {
                    Some(left) => *slot = left,
                    None => {
                        return Err(Overload {
                            resource,
                            period: period as Time,
                        })
                    }
                }
            }
        }
        Ok(())
    }

    fn interval(&self, job: JobId, start: Time) -> std::ops::Range<usize> {
        let begin = start as usize;
        begin..begin + self.instance.duration(job) as usize
    }
}

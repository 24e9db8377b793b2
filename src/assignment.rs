//! Column-to-role assignment over a cost matrix.
//!
//! The resolver is approximate by construction: a greedy pass over the
//! candidates sorted by confidence, a bounded pairwise swap search, then
//! eviction of anything that ended up below the acceptance threshold. It
//! does not search for the optimal assignment, so ties are broken the same
//! way on every run.

use std::cmp::Ordering;

use itertools::Itertools;
use log::debug;

use crate::{config::AssignmentConfig, model::Role};

/// `cost[column][role.slot()]`, each entry `100 - ensemble score`.
pub type CostMatrix = Vec<[f64; 4]>;

/// Builds a cost row from the ensemble score of each role.
pub fn cost_row(ensemble: impl Fn(Role) -> f64) -> [f64; 4] {
    Role::ALL.map(|role| 100.0 - ensemble(role))
}

/// One accepted (column, role) pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Assignment {
    pub column: usize,
    pub role: Role,
    pub confidence: f64,
}

#[derive(Debug, Clone)]
struct Candidate {
    column: usize,
    role: Role,
    confidence: f64,
}

#[derive(Debug, Clone, Default)]
pub struct AssignmentResolver {
    config: AssignmentConfig,
}

impl AssignmentResolver {
    pub fn new(config: AssignmentConfig) -> Self {
        Self { config }
    }

    /// Resolves the matrix into an injective set of assignments ordered by
    /// column index.
    pub fn resolve(&self, cost: &[[f64; 4]]) -> Vec<Assignment> {
        let mut assigned = self.greedy(cost);
        self.local_search(cost, &mut assigned);
        self.evict(cost, assigned)
    }

    fn greedy(&self, cost: &[[f64; 4]]) -> Vec<(usize, Role)> {
        let mut candidates = cost
            .iter()
            .enumerate()
            .flat_map(|(column, row)| {
                Role::ALL.into_iter().map(move |role| Candidate {
                    column,
                    role,
                    confidence: 100.0 - row[role.slot()],
                })
            })
            .collect::<Vec<_>>();
        candidates.sort_by(compare_candidates);

        let mut column_taken = vec![false; cost.len()];
        let mut role_taken = [false; 4];
        let mut assigned = Vec::new();
        for candidate in candidates {
            if candidate.confidence < self.config.greedy_threshold {
                break;
            }
            if column_taken[candidate.column] || role_taken[candidate.role.slot()] {
                continue;
            }
            debug!(
                "Greedy pick: column {} as {} ({:.2})",
                candidate.column, candidate.role, candidate.confidence
            );
            column_taken[candidate.column] = true;
            role_taken[candidate.role.slot()] = true;
            assigned.push((candidate.column, candidate.role));
        }
        assigned.sort_by_key(|(column, _)| *column);
        assigned
    }

    fn local_search(&self, cost: &[[f64; 4]], assigned: &mut [(usize, Role)]) {
        for iteration in 0..self.config.max_iterations {
            let mut improved = false;
            for (a, b) in (0..assigned.len()).tuple_combinations() {
                let (column_a, role_a) = assigned[a];
                let (column_b, role_b) = assigned[b];
                let current = cost[column_a][role_a.slot()] + cost[column_b][role_b.slot()];
                let swapped = cost[column_a][role_b.slot()] + cost[column_b][role_a.slot()];
                if current - swapped > self.config.swap_margin {
                    debug!(
                        "Swap in iteration {iteration}: column {column_a} {role_a} -> {role_b}, \
                         column {column_b} {role_b} -> {role_a} (cost {current:.2} -> {swapped:.2})"
                    );
                    assigned[a].1 = role_b;
                    assigned[b].1 = role_a;
                    improved = true;
                }
            }
            if !improved {
                break;
            }
        }
    }

    fn evict(&self, cost: &[[f64; 4]], assigned: Vec<(usize, Role)>) -> Vec<Assignment> {
        assigned
            .into_iter()
            .filter_map(|(column, role)| {
                let confidence = 100.0 - cost[column][role.slot()];
                if confidence < self.config.acceptance_threshold {
                    debug!("Evicting column {column} as {role} ({confidence:.2})");
                    None
                } else {
                    Some(Assignment {
                        column,
                        role,
                        confidence,
                    })
                }
            })
            .collect()
    }
}

/// Highest confidence first, then lowest column, then role order.
fn compare_candidates(a: &Candidate, b: &Candidate) -> Ordering {
    b.confidence
        .total_cmp(&a.confidence)
        .then(a.column.cmp(&b.column))
        .then(a.role.slot().cmp(&b.role.slot()))
}

//! Score explanation: which constraints matched, and on which shifts.

use rosterforge_core::{ConstraintRef, HardSoftScore, ImpactType};

use crate::constraint::Constraint;

/// One match of a constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintMatch {
    /// Ids of the shifts involved (one, or two for pair rules).
    pub shift_ids: Vec<i64>,
    /// Name of the employee the match concerns, if any.
    pub employee: Option<String>,
    /// Signed score impact of this match.
    pub score: HardSoftScore,
}

impl ConstraintMatch {
    pub fn new(shift_ids: Vec<i64>, employee: Option<String>, score: HardSoftScore) -> Self {
        Self {
            shift_ids,
            employee,
            score,
        }
    }
}

/// Per-constraint breakdown in a score explanation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintAnalysis {
    pub constraint: Constraint,
    pub constraint_ref: ConstraintRef,
    pub impact: ImpactType,
    pub is_hard: bool,
    /// Total score from this constraint.
    pub score: HardSoftScore,
    pub matches: Vec<ConstraintMatch>,
}

impl ConstraintAnalysis {
    pub fn new(constraint: Constraint, matches: Vec<ConstraintMatch>) -> Self {
        let score = matches.iter().map(|m| m.score).sum();
        Self {
            constraint,
            constraint_ref: constraint.constraint_ref(),
            impact: constraint.impact(),
            is_hard: constraint.is_hard(),
            score,
            matches,
        }
    }

    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    pub fn name(&self) -> &str {
        &self.constraint_ref.name
    }
}

/// Complete score explanation with per-constraint breakdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreAnalysis {
    pub score: HardSoftScore,
    pub constraints: Vec<ConstraintAnalysis>,
}

impl ScoreAnalysis {
    pub fn new(constraints: Vec<ConstraintAnalysis>) -> Self {
        let score = constraints.iter().map(|c| c.score).sum();
        Self { score, constraints }
    }

    /// Returns the total match count across all constraints.
    pub fn total_match_count(&self) -> usize {
        self.constraints.iter().map(|c| c.match_count()).sum()
    }

    /// Returns constraints with non-zero scores.
    pub fn non_zero_constraints(&self) -> Vec<&ConstraintAnalysis> {
        self.constraints
            .iter()
            .filter(|c| c.score != HardSoftScore::ZERO)
            .collect()
    }

    /// Looks up the breakdown of one constraint.
    pub fn get(&self, constraint: Constraint) -> Option<&ConstraintAnalysis> {
        self.constraints.iter().find(|c| c.constraint == constraint)
    }

    /// Every match that involves the shift with the given id.
    pub fn matches_for_shift(&self, shift_id: i64) -> Vec<(&ConstraintAnalysis, &ConstraintMatch)> {
        self.constraints
            .iter()
            .flat_map(|c| c.matches.iter().map(move |m| (c, m)))
            .filter(|(_, m)| m.shift_ids.contains(&shift_id))
            .collect()
    }
}

impl std::fmt::Display for ScoreAnalysis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Score: {}", self.score)?;
        for c in self.non_zero_constraints() {
            writeln!(f, "  {}: {} ({} matches)", c.name(), c.score, c.match_count())?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "analysis_tests.rs"]
mod tests;

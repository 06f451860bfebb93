use log::{debug, trace};

use crate::game::constraint_compiler::{ConstraintProgram, OccupancyConstraint};
use crate::model::{Coordinate, CountConstraint, PersonId};

const DEFAULT_STEP_LIMIT: u64 = 50_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverStatus {
    Feasible,
    Infeasible,
    Unknown,
}

/// One satisfying assignment: person index (id - 1) to cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    cells: Vec<Coordinate>,
}

impl Assignment {
    pub fn position_of(&self, person_id: PersonId) -> Coordinate {
        self.cells[person_id as usize - 1]
    }

    pub fn positions(&self) -> &[Coordinate] {
        &self.cells
    }
}

#[derive(Debug, Clone)]
pub struct SolveSummary {
    pub status: SolverStatus,
    pub solution_count: usize,
    pub last_solution: Option<Assignment>,
}

/// Complete enumeration of a compiled program. The search walks persons
/// in id order and places each on a cell with a free row, a free column
/// and no blocking furniture, so the permutation-matrix shape holds by
/// construction; the clue constraints are counted incrementally with
/// upper and lower cardinality bounds pruning the descent.
pub struct Solver<'a> {
    program: &'a ConstraintProgram,
    step_limit: u64,
}

impl<'a> Solver<'a> {
    pub fn new(program: &'a ConstraintProgram) -> Self {
        Self {
            program,
            step_limit: DEFAULT_STEP_LIMIT,
        }
    }

    /// Bounds the search; exceeding the limit reports `Unknown` with
    /// the count found so far. In-scope puzzles never get close.
    pub fn with_step_limit(mut self, step_limit: u64) -> Self {
        self.step_limit = step_limit;
        self
    }

    /// Enumerates every satisfying assignment. The count is the
    /// puzzle-quality signal: 0 contradictory, 1 well posed, more than
    /// 1 under-constrained.
    pub fn solve(&self) -> SolveSummary {
        let mut search = Search::new(self.program, self.step_limit);
        search.descend(0);

        let status = if search.aborted {
            SolverStatus::Unknown
        } else if search.solution_count > 0 {
            SolverStatus::Feasible
        } else {
            SolverStatus::Infeasible
        };
        debug!(
            target: "solver",
            "search finished: {:?}, {} solution(s), {} steps",
            status,
            search.solution_count,
            search.steps
        );
        SolveSummary {
            status,
            solution_count: search.solution_count,
            last_solution: search.last_solution.map(|cells| Assignment { cells }),
        }
    }
}

struct Search<'a> {
    n: usize,
    constraints: &'a [OccupancyConstraint],
    // constraint -> person index -> membership
    subject_member: Vec<Vec<bool>>,
    // constraint -> flat cell index -> membership
    cell_member: Vec<Vec<bool>>,
    // constraint -> depth -> subjects still unassigned at that depth;
    // an upper bound on what the remaining search can add
    suffix_subjects: Vec<Vec<usize>>,
    counts: Vec<usize>,
    used_rows: Vec<bool>,
    used_columns: Vec<bool>,
    blocked: Vec<bool>,
    assignment: Vec<Coordinate>,
    solution_count: usize,
    last_solution: Option<Vec<Coordinate>>,
    steps: u64,
    step_limit: u64,
    aborted: bool,
}

impl<'a> Search<'a> {
    fn new(program: &'a ConstraintProgram, step_limit: u64) -> Self {
        let n = program.n;
        let constraints = program.constraints.as_slice();

        let mut subject_member = Vec::with_capacity(constraints.len());
        let mut cell_member = Vec::with_capacity(constraints.len());
        let mut suffix_subjects = Vec::with_capacity(constraints.len());
        for constraint in constraints {
            let mut members = vec![false; n];
            for person_id in &constraint.persons {
                let index = *person_id as usize - 1;
                if index < n {
                    members[index] = true;
                }
            }
            // suffix[d] = members with index >= d
            let mut suffix = vec![0; n + 1];
            for depth in (0..n).rev() {
                suffix[depth] = suffix[depth + 1] + usize::from(members[depth]);
            }
            let mut cells = vec![false; n * n];
            for cell in &constraint.cells {
                cells[cell.row * n + cell.column] = true;
            }
            subject_member.push(members);
            cell_member.push(cells);
            suffix_subjects.push(suffix);
        }

        let mut blocked = vec![false; n * n];
        for cell in &program.blocked {
            blocked[cell.row * n + cell.column] = true;
        }

        Self {
            n,
            constraints,
            subject_member,
            cell_member,
            suffix_subjects,
            counts: vec![0; constraints.len()],
            used_rows: vec![false; n],
            used_columns: vec![false; n],
            blocked,
            assignment: vec![Coordinate::new(0, 0); n],
            solution_count: 0,
            last_solution: None,
            steps: 0,
            step_limit,
            aborted: false,
        }
    }

    fn descend(&mut self, depth: usize) {
        if self.aborted {
            return;
        }
        if depth == self.n {
            self.solution_count += 1;
            self.last_solution = Some(self.assignment.clone());
            trace!(
                target: "solver",
                "solution {}: {:?}",
                self.solution_count,
                self.assignment
            );
            return;
        }

        for row in 0..self.n {
            if self.used_rows[row] {
                continue;
            }
            for column in 0..self.n {
                if self.used_columns[column] {
                    continue;
                }
                let cell = row * self.n + column;
                if self.blocked[cell] {
                    continue;
                }
                self.steps += 1;
                if self.steps > self.step_limit {
                    self.aborted = true;
                    return;
                }

                for index in 0..self.constraints.len() {
                    if self.subject_member[index][depth] && self.cell_member[index][cell] {
                        self.counts[index] += 1;
                    }
                }
                if self.bounds_hold(depth + 1) {
                    self.assignment[depth] = Coordinate::new(row, column);
                    self.used_rows[row] = true;
                    self.used_columns[column] = true;
                    self.descend(depth + 1);
                    self.used_rows[row] = false;
                    self.used_columns[column] = false;
                }
                for index in 0..self.constraints.len() {
                    if self.subject_member[index][depth] && self.cell_member[index][cell] {
                        self.counts[index] -= 1;
                    }
                }
                if self.aborted {
                    return;
                }
            }
        }
    }

    /// With `depth` persons placed: an exact count may not be exceeded,
    /// and must still be reachable by the subjects yet to place; at the
    /// leaf both bounds pinch to equality.
    fn bounds_hold(&self, depth: usize) -> bool {
        for (index, constraint) in self.constraints.iter().enumerate() {
            let count = self.counts[index];
            let pending = self.suffix_subjects[index][depth];
            match constraint.count {
                CountConstraint::Exactly(required) => {
                    if count > required || count + pending < required {
                        return false;
                    }
                }
                CountConstraint::AtLeast(required) => {
                    if count + pending < required {
                        return false;
                    }
                }
            }
        }
        true
    }
}

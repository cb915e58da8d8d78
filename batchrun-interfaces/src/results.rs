//! Result artifacts produced by algorithm runs

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// The front of candidate solutions produced by one run
///
/// Both writers overwrite the target file and emit one row per solution.
pub trait ResultArtifact {
    /// Number of solutions in the front
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Write objective vectors to `path`
    fn write_objectives(&self, path: &Path) -> io::Result<()>;

    /// Write decision-variable vectors to `path`
    fn write_variables(&self, path: &Path) -> io::Result<()>;
}

/// One candidate solution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    pub variables: Vec<f64>,
    pub objectives: Vec<f64>,
}

impl Solution {
    pub fn new(variables: Vec<f64>, objectives: Vec<f64>) -> Self {
        Self {
            variables,
            objectives,
        }
    }
}

/// In-memory front of real-coded solutions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SolutionFront {
    solutions: Vec<Solution>,
}

impl SolutionFront {
    pub fn new(solutions: Vec<Solution>) -> Self {
        Self { solutions }
    }

    pub fn push(&mut self, solution: Solution) {
        self.solutions.push(solution);
    }

    pub fn solutions(&self) -> &[Solution] {
        &self.solutions
    }

    fn write_rows<'a>(
        path: &Path,
        rows: impl Iterator<Item = &'a [f64]>,
    ) -> io::Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        for row in rows {
            let line = row
                .iter()
                .map(|value| value.to_string())
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(writer, "{}", line)?;
        }
        writer.flush()
    }
}

impl FromIterator<Solution> for SolutionFront {
    fn from_iter<I: IntoIterator<Item = Solution>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl ResultArtifact for SolutionFront {
    fn len(&self) -> usize {
        self.solutions.len()
    }

    fn write_objectives(&self, path: &Path) -> io::Result<()> {
        Self::write_rows(path, self.solutions.iter().map(|s| s.objectives.as_slice()))
    }

    fn write_variables(&self, path: &Path) -> io::Result<()> {
        Self::write_rows(path, self.solutions.iter().map(|s| s.variables.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_front() -> SolutionFront {
        vec![
            Solution::new(vec![0.1, 0.2], vec![1.0, 2.5]),
            Solution::new(vec![0.3, 0.4], vec![0.5, 3.0]),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_writes_one_row_per_solution() {
        let dir = TempDir::new().unwrap();
        let front = sample_front();

        let fun = dir.path().join("FUN.1");
        let var = dir.path().join("VAR.1");
        front.write_objectives(&fun).unwrap();
        front.write_variables(&var).unwrap();

        assert_eq!(std::fs::read_to_string(&fun).unwrap(), "1 2.5\n0.5 3\n");
        assert_eq!(std::fs::read_to_string(&var).unwrap(), "0.1 0.2\n0.3 0.4\n");
    }

    #[test]
    fn test_write_overwrites_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("FUN.1");
        std::fs::write(&path, "stale\nstale\nstale\n").unwrap();

        SolutionFront::new(vec![Solution::new(vec![], vec![7.0])])
            .write_objectives(&path)
            .unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "7\n");
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("FUN.1");
        assert!(sample_front().write_objectives(&path).is_err());
    }

    #[test]
    fn test_empty_front() {
        let front = SolutionFront::default();
        assert!(front.is_empty());
        assert_eq!(front.len(), 0);
    }
}

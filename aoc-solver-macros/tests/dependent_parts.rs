use aoc_solver::{AocParser, AocSolver, ParseError, PartSolver, SolveError, Solver};

/// Shared data where part 1 leaves a result behind for part 2
#[derive(Debug)]
struct SharedData<'a> {
    words: Vec<&'a str>,
    longest: Option<&'a str>,
}

#[derive(AocSolver)]
#[aoc_solver(max_parts = 2)]
struct WordSolver;

impl AocParser for WordSolver {
    type SharedData<'a> = SharedData<'a>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let words: Vec<&str> = input.split_whitespace().collect();
        if words.is_empty() {
            return Err(ParseError::MissingData("no words".into()));
        }
        Ok(SharedData {
            words,
            longest: None,
        })
    }
}

impl PartSolver<1> for WordSolver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let longest = shared
            .words
            .iter()
            .copied()
            .max_by_key(|w| w.len())
            .ok_or_else(|| SolveError::SolveFailed("no words".into()))?;
        shared.longest = Some(longest);
        Ok(longest.to_string())
    }
}

impl PartSolver<2> for WordSolver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let longest = shared
            .longest
            .ok_or_else(|| SolveError::SolveFailed("part 1 has not run".into()))?;
        Ok(longest.len().to_string())
    }
}

#[test]
fn test_borrowed_shared_data_flows_between_parts() {
    let input = String::from("tree ornament star");
    let mut shared = WordSolver::parse(&input).unwrap();

    assert_eq!(WordSolver::solve_part(&mut shared, 1).unwrap(), "ornament");
    assert_eq!(shared.longest, Some("ornament"));
    assert_eq!(WordSolver::solve_part(&mut shared, 2).unwrap(), "8");
}

#[test]
fn test_part_two_reports_missing_dependency() {
    let mut shared = WordSolver::parse("a bb").unwrap();

    let result = WordSolver::solve_part(&mut shared, 2);
    assert!(matches!(result, Err(SolveError::SolveFailed(_))));
}

#[test]
fn test_parse_error_surfaces() {
    assert!(matches!(
        WordSolver::parse("   "),
        Err(ParseError::MissingData(_))
    ));
}

use aoc_solver::{
    AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError,
    SolverRegistryBuilder,
};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2016, day = 3, tags = ["macro-test", "sum"])]
struct SumSolver;

impl AocParser for SumSolver {
    type SharedData<'a> = Vec<u32>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        input
            .split(',')
            .map(|s| {
                s.trim()
                    .parse()
                    .map_err(|_| ParseError::InvalidFormat(s.to_string()))
            })
            .collect()
    }
}

impl PartSolver<1> for SumSolver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().sum::<u32>().to_string())
    }
}

impl PartSolver<2> for SumSolver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().max().copied().unwrap_or_default().to_string())
    }
}

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 1)]
#[aoc(year = 2016, day = 4, tags = ["macro-test"])]
struct LenSolver;

impl AocParser for LenSolver {
    type SharedData<'a> = &'a str;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        Ok(input)
    }
}

impl PartSolver<1> for LenSolver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.len().to_string())
    }
}

#[test]
fn test_plugins_are_discovered() {
    let registry = SolverRegistryBuilder::new()
        .register_solver_plugins(|plugin| plugin.tags.contains(&"macro-test"))
        .unwrap()
        .build();

    assert_eq!(registry.storage().len(), 2);
    assert_eq!(registry.storage().get_info(2016, 3).unwrap().parts, 2);
    assert_eq!(registry.storage().get_info(2016, 4).unwrap().parts, 1);

    let mut solver = registry.create_solver(2016, 3, "4, 9, 2").unwrap();
    assert_eq!(solver.solve(1).unwrap().answer, "15");
    assert_eq!(solver.solve(2).unwrap().answer, "9");
}

#[test]
fn test_tag_filter_requires_matching_tag() {
    let registry = SolverRegistryBuilder::new()
        .register_solver_plugins(|plugin| plugin.tags.contains(&"sum"))
        .unwrap()
        .build();

    assert!(registry.storage().contains(2016, 3));
    assert!(!registry.storage().contains(2016, 4));
}

#[test]
fn test_registered_parse_error_is_reported() {
    let registry = SolverRegistryBuilder::new()
        .register_solver_plugins(|plugin| plugin.tags.contains(&"macro-test"))
        .unwrap()
        .build();

    let result = registry.create_solver(2016, 3, "4, x");
    assert!(matches!(result, Err(aoc_solver::SolverError::ParseError(_))));
}

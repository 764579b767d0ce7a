//! Year/day registry of solver factories

use crate::error::{ParseError, RegistrationError, SolverError};
use crate::instance::{DynSolver, SolverInstance};
use crate::solver::Solver;
use tracing::debug;

/// First Advent of Code calendar
pub const BASE_YEAR: u16 = 2015;
/// Calendars the registry has room for (2015-2034)
pub const MAX_YEARS: usize = 20;
/// Puzzle days per calendar
pub const DAYS_PER_YEAR: usize = 25;
/// Slots in the registry, one per supported year/day
pub const CAPACITY: usize = MAX_YEARS * DAYS_PER_YEAR;

/// Position of a year/day in the registry's slot vector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Slot(usize);

impl Slot {
    /// `None` when the year/day falls outside the supported calendars
    fn of(year: u16, day: u8) -> Option<Self> {
        let year_offset = year.checked_sub(BASE_YEAR).map(usize::from)?;
        let day_offset = day.checked_sub(1).map(usize::from)?;
        (year_offset < MAX_YEARS && day_offset < DAYS_PER_YEAR)
            .then_some(Slot(year_offset * DAYS_PER_YEAR + day_offset))
    }

    fn year_day(self) -> (u16, u8) {
        let year = BASE_YEAR + (self.0 / DAYS_PER_YEAR) as u16;
        let day = (self.0 % DAYS_PER_YEAR) as u8 + 1;
        (year, day)
    }
}

/// Parses an input into a ready-to-solve instance
pub type SolverFactory =
    Box<dyn for<'a> Fn(&'a str) -> Result<Box<dyn DynSolver + 'a>, ParseError> + Send + Sync>;

/// What the registry knows about one registered puzzle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactoryInfo {
    pub year: u16,
    pub day: u8,
    /// Number of parts the solver answers
    pub parts: u8,
}

struct Registered {
    factory: SolverFactory,
    parts: u8,
}

/// A solver that can add its own factory to a builder
///
/// Object safe, so `inventory` plugins can point at solvers of any type.
/// Every `Solver + Sync + 'static` implements it.
///
/// ```
/// use aoc_solver::{
///     AocParser, ParseError, RegisterableSolver, SolveError, Solver, SolverRegistryBuilder,
/// };
///
/// struct CharCount;
///
/// impl AocParser for CharCount {
///     type SharedData<'a> = &'a str;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         Ok(input)
///     }
/// }
///
/// impl Solver for CharCount {
///     const PARTS: u8 = 1;
///
///     fn solve_part(shared: &mut Self::SharedData<'_>, _part: u8) -> Result<String, SolveError> {
///         Ok(shared.len().to_string())
///     }
/// }
///
/// let registry = CharCount
///     .register_with(SolverRegistryBuilder::new(), 2025, 1)
///     .unwrap()
///     .build();
/// let mut solver = registry.create_solver(2025, 1, "abc").unwrap();
/// assert_eq!(solver.solve(1).unwrap().answer, "3");
/// ```
pub trait RegisterableSolver: Sync {
    fn register_with(
        &self,
        builder: SolverRegistryBuilder,
        year: u16,
        day: u8,
    ) -> Result<SolverRegistryBuilder, RegistrationError>;

    fn parts(&self) -> u8;
}

impl<S> RegisterableSolver for S
where
    S: Solver + Sync + 'static,
{
    fn register_with(
        &self,
        builder: SolverRegistryBuilder,
        year: u16,
        day: u8,
    ) -> Result<SolverRegistryBuilder, RegistrationError> {
        builder.register(year, day, S::PARTS, move |input: &str| {
            Ok(Box::new(SolverInstance::<S>::new(year, day, input)?))
        })
    }

    fn parts(&self) -> u8 {
        S::PARTS
    }
}

/// Link-time registration record, submitted by `#[derive(AutoRegisterSolver)]`
pub struct SolverPlugin {
    pub year: u16,
    pub day: u8,
    pub solver: &'static dyn RegisterableSolver,
    /// Labels such as `"2025"` or `"grid"` that the runner filters on
    pub tags: &'static [&'static str],
}

inventory::collect!(SolverPlugin);

/// Collects solver factories before freezing them into a [`SolverRegistry`]
pub struct SolverRegistryBuilder {
    slots: Vec<Option<Registered>>,
}

impl SolverRegistryBuilder {
    pub fn new() -> Self {
        Self {
            slots: (0..CAPACITY).map(|_| None).collect(),
        }
    }

    /// Add a factory for `year`/`day` answering `parts` parts
    ///
    /// Fails when the date is outside 2015-2034 / 1-25 or already taken.
    pub fn register<F>(
        mut self,
        year: u16,
        day: u8,
        parts: u8,
        factory: F,
    ) -> Result<Self, RegistrationError>
    where
        F: for<'a> Fn(&'a str) -> Result<Box<dyn DynSolver + 'a>, ParseError>
            + Send
            + Sync
            + 'static,
    {
        let Slot(index) = Slot::of(year, day).ok_or(RegistrationError::InvalidYearDay(year, day))?;
        let slot = &mut self.slots[index];
        if slot.is_some() {
            return Err(RegistrationError::DuplicateSolver(year, day));
        }
        *slot = Some(Registered {
            factory: Box::new(factory),
            parts,
        });
        Ok(self)
    }

    /// Add every linked-in [`SolverPlugin`]
    ///
    /// ```no_run
    /// # use aoc_solver::SolverRegistryBuilder;
    /// let registry = SolverRegistryBuilder::new()
    ///     .register_all_plugins()
    ///     .unwrap()
    ///     .build();
    /// ```
    pub fn register_all_plugins(self) -> Result<Self, RegistrationError> {
        self.register_solver_plugins(|_| true)
    }

    /// Add the linked-in plugins accepted by `filter`
    ///
    /// ```no_run
    /// # use aoc_solver::SolverRegistryBuilder;
    /// let grids_only = SolverRegistryBuilder::new()
    ///     .register_solver_plugins(|plugin| plugin.tags.contains(&"grid"))
    ///     .unwrap()
    ///     .build();
    /// ```
    pub fn register_solver_plugins<F>(self, filter: F) -> Result<Self, RegistrationError>
    where
        F: Fn(&SolverPlugin) -> bool,
    {
        inventory::iter::<SolverPlugin>()
            .filter(|plugin| filter(*plugin))
            .try_fold(self, |builder, plugin| {
                debug!(year = plugin.year, day = plugin.day, tags = ?plugin.tags, "registering plugin");
                plugin.solver.register_with(builder, plugin.year, plugin.day)
            })
    }

    pub fn build(self) -> SolverRegistry {
        SolverRegistry {
            storage: SolverFactoryStorage { slots: self.slots },
        }
    }
}

impl Default for SolverRegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Frozen factories, queried by year/day
pub struct SolverFactoryStorage {
    slots: Vec<Option<Registered>>,
}

impl SolverFactoryStorage {
    fn registered(&self, year: u16, day: u8) -> Option<&Registered> {
        let Slot(index) = Slot::of(year, day)?;
        self.slots.get(index)?.as_ref()
    }

    /// Registered puzzles in calendar order
    pub fn iter_info(&self) -> impl Iterator<Item = FactoryInfo> + '_ {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            let registered = slot.as_ref()?;
            let (year, day) = Slot(index).year_day();
            Some(FactoryInfo {
                year,
                day,
                parts: registered.parts,
            })
        })
    }

    pub fn get_info(&self, year: u16, day: u8) -> Option<FactoryInfo> {
        self.registered(year, day).map(|registered| FactoryInfo {
            year,
            day,
            parts: registered.parts,
        })
    }

    pub fn contains(&self, year: u16, day: u8) -> bool {
        self.registered(year, day).is_some()
    }

    pub fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Immutable registry handing out parsed solver instances
pub struct SolverRegistry {
    storage: SolverFactoryStorage,
}

impl SolverRegistry {
    pub fn storage(&self) -> &SolverFactoryStorage {
        &self.storage
    }

    /// Parse `input` with the solver registered for `year`/`day`
    pub fn create_solver<'a>(
        &self,
        year: u16,
        day: u8,
        input: &'a str,
    ) -> Result<Box<dyn DynSolver + 'a>, SolverError> {
        if Slot::of(year, day).is_none() {
            return Err(SolverError::InvalidYearDay(year, day));
        }
        let registered = self
            .storage
            .registered(year, day)
            .ok_or(SolverError::NotFound(year, day))?;
        (registered.factory)(input).map_err(SolverError::ParseError)
    }
}

use crate::{Render, Universe};
use std::io;

/// How many more generations a [`Simulation`] may evolve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Budget {
    Unbounded,
    Remaining(u64),
}
impl Budget {
    /// Builds a budget from a generation count, any negative count is unbounded
    pub fn from_count(count: i64) -> Self {
        match u64::try_from(count) {
            Ok(n) => Self::Remaining(n),
            Err(_) => Self::Unbounded,
        }
    }

    #[inline]
    fn is_exhausted(&self) -> bool {
        matches!(self, Self::Remaining(0))
    }

    fn consume(&mut self) {
        if let Self::Remaining(n) = self {
            *n = n.saturating_sub(1);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    Stopped,
}

/// Drives a [`Universe`] generation by generation until it dies out or
/// runs out of budget
#[derive(Debug)]
pub struct Simulation {
    universe: Universe,
    budget: Budget,
    state: RunState,
    generation: u64,
}

impl Simulation {
    /// Renders generation 0 and starts running
    pub fn start<R: Render + ?Sized>(
        universe: Universe,
        budget: Budget,
        out: &mut R,
    ) -> io::Result<Self> {
        out.render(&universe)?;
        Ok(Self {
            universe,
            budget,
            state: RunState::Running,
            generation: 0,
        })
    }

    /// Advances one generation and renders it, unless a stop condition holds
    ///
    /// Once stopped, further ticks neither evolve nor render.
    pub fn tick<R: Render + ?Sized>(&mut self, out: &mut R) -> io::Result<RunState> {
        if self.state == RunState::Stopped {
            return Ok(RunState::Stopped);
        }
        if !self.can_advance() {
            log::debug!(
                "stopping at generation {} (extinct: {})",
                self.generation,
                self.universe.is_extinct()
            );
            self.state = RunState::Stopped;
            return Ok(self.state);
        }

        self.universe.evolve();
        self.generation += 1;
        out.render(&self.universe)?;
        self.budget.consume();
        Ok(self.state)
    }

    /// Whether the next tick would evolve rather than stop
    #[inline]
    pub fn can_advance(&self) -> bool {
        self.state == RunState::Running
            && !self.budget.is_exhausted()
            && !self.universe.is_extinct()
    }

    #[inline]
    pub fn state(&self) -> RunState {
        self.state
    }
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }
    #[inline]
    pub fn budget(&self) -> Budget {
        self.budget
    }
    #[inline]
    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    /// Stops the simulation and hands back its universe
    #[inline]
    pub fn into_universe(self) -> Universe {
        self.universe
    }
}

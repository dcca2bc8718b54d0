//! The simulator: registration and the main event loop.
//!
//! A [`Simulator`] owns every registered component and drives the loop
//! described in the crate overview: a startup pass, a tick loop that
//! advances simulated time to the next pending event and runs exactly the
//! components with an event due then, and a shutdown pass.

use std::cell::Cell;
use std::rc::Rc;

use crate::component::{Component, ComponentId, ComponentRef, Context, Phase};
use crate::error::SimulationError;
use crate::time::{earliest, SimulationTime};

#[cfg(feature = "tracing")]
use tracing::{debug, trace};

/// Owns every registered component and drives the discrete-event loop.
///
/// Components are registered with [`Simulator::register`] in the order they
/// should run within a tick; [`Simulator::run`] then executes the full
/// startup/tick/shutdown lifecycle described in the
/// [crate-level documentation](crate).
pub struct Simulator {
    clock: Rc<Cell<u64>>,
    quit_requested: Rc<Cell<bool>>,
    quit_time: Option<SimulationTime>,
    components: Vec<Box<dyn Component>>,
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulator {
    /// Creates a new simulator with no quit time: it runs until every
    /// component reports no further pending events.
    pub fn new() -> Self {
        Simulator {
            clock: Rc::new(Cell::new(0)),
            quit_requested: Rc::new(Cell::new(false)),
            quit_time: None,
            components: Vec::new(),
        }
    }

    /// Creates a new simulator that stops once simulated time would advance
    /// past `quit_time`. `quit_time` itself is inclusive: a component with
    /// an event due exactly at `quit_time` still runs.
    pub fn with_quit_time(quit_time: SimulationTime) -> Self {
        Simulator {
            quit_time: Some(quit_time),
            ..Self::new()
        }
    }

    /// The simulator's current simulated time.
    pub fn current_time(&self) -> SimulationTime {
        SimulationTime::new(self.clock.get())
    }

    /// Registers `component`, binding every edge it owns (via
    /// [`Component::bind`]) to a fresh [`ComponentRef`] identifying it
    /// within this simulator.
    ///
    /// Components run, within a tick, in the order they were registered.
    pub fn register<C: Component + 'static>(&mut self, mut component: C) -> Result<(), SimulationError> {
        let id = ComponentId(self.components.len());
        let handle = ComponentRef {
            id,
            clock: Rc::clone(&self.clock),
        };
        component.bind(handle)?;
        self.components.push(Box::new(component));
        Ok(())
    }

    /// Requests that the simulator stop after the component currently
    /// running (if any) returns. Every component still receives its
    /// shutdown invocation.
    pub fn quit(&self) {
        self.quit_requested.set(true);
    }

    fn context(&self, phase: Phase) -> Context {
        Context {
            clock: Rc::clone(&self.clock),
            quit_requested: Rc::clone(&self.quit_requested),
            phase,
        }
    }

    fn keep_going(&self, next: Option<SimulationTime>) -> bool {
        if self.quit_requested.get() {
            return false;
        }
        match (next, self.quit_time) {
            (None, _) => false,
            (Some(next), Some(quit_time)) => next <= quit_time,
            (Some(_), None) => true,
        }
    }

    /// Runs the simulation to completion.
    ///
    /// This performs, in order:
    ///
    /// 1. a startup pass, invoking every registered component once with
    ///    [`Phase::Startup`],
    /// 2. the tick loop: while some component reports a pending event
    ///    at or before this simulator's quit time (if any), simulated time
    ///    advances to the earliest such event and every component whose
    ///    [`Component::next_event`] equals that time is run with
    ///    [`Phase::Tick`], in registration order,
    /// 3. a shutdown pass, invoking every registered component once with
    ///    [`Phase::Shutdown`].
    ///
    /// The loop also stops early, before step 3, if any component called
    /// [`Context::quit`] during an invocation.
    pub fn run(&mut self) {
        #[cfg(feature = "tracing")]
        debug!("simulation startup");

        let startup_ctx = self.context(Phase::Startup);
        for component in self.components.iter_mut() {
            component.run(&startup_ctx);
        }

        loop {
            let next = earliest(self.components.iter().map(|c| c.next_event()));

            if !self.keep_going(next) {
                #[cfg(feature = "tracing")]
                debug!(reason = if self.quit_requested.get() { "quit" } else { "quiescent" }, "simulation stopping");
                break;
            }

            // `keep_going` only returns true when `next` is `Some`.
            let next = next.expect("keep_going guarantees a pending event here");
            self.clock.set(next.ticks());

            #[cfg(feature = "tracing")]
            debug!(time = next.ticks(), "tick");

            let tick_ctx = self.context(Phase::Tick);
            for component in self.components.iter_mut() {
                if component.next_event() == Some(next) {
                    #[cfg(feature = "tracing")]
                    trace!(component = component.name(), time = next.ticks(), "dispatch");
                    component.run(&tick_ctx);
                }
                if self.quit_requested.get() {
                    break;
                }
            }

            if self.quit_requested.get() {
                break;
            }
        }

        #[cfg(feature = "tracing")]
        debug!("simulation shutdown");

        let shutdown_ctx = self.context(Phase::Shutdown);
        for component in self.components.iter_mut() {
            component.run(&shutdown_ctx);
        }
    }
}

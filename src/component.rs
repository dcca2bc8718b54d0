//! Components: the user-defined units of simulation behavior.
//!
//! A component is any type implementing [`Component`]. Concretely this
//! means providing three capabilities to the engine:
//!
//! * [`Component::bind`] — wire every owned edge's back-reference to this
//!   component, once, when it is [`register`](crate::simulation::Simulator::register)ed,
//! * [`Component::next_event`] — report the earliest tick at which this
//!   component has a pending event, by folding the head times of its owned
//!   [`Port`](crate::ports::Port)s and [`Timer`](crate::ports::Timer)s,
//! * [`Component::run`] — the behavior callback itself, invoked once at
//!   startup, zero or more times at the tick(s) reported by `next_event`,
//!   and once at shutdown.
//!
//! Most components will not implement these by hand: the [`component!`]
//! macro generates `bind` and `next_event` from a list of field names and
//! delegates `run` to a plain `behavior(&mut self, ctx: &Context)` method.
//! Hand-writing the trait remains fully supported, and is required for
//! components whose edges are nested inside a `Vec`-of-non-edge wrapper, a
//! tuple, or any other indirection the macro cannot see through.

use crate::error::SimulationError;
use crate::time::{SimClock, SimulationTime};

/// The lifecycle phase a [`Component::run`] invocation occurs in.
///
/// An enum rather than a pair of `is_startup`/`is_shutdown` flags: the two
/// are never simultaneously true, and an enum makes that invalid combination
/// unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// The one-time invocation before the tick loop begins. Sending and
    /// arming timers is allowed; [`Port::messages`](crate::ports::Port::messages)
    /// yields nothing during this phase.
    Startup,
    /// A regular tick invocation, made only for components whose
    /// [`Component::next_event`] equals the simulator's current time.
    Tick,
    /// The one-time invocation after the tick loop ends. As in `Startup`,
    /// [`Port::messages`](crate::ports::Port::messages) yields nothing;
    /// [`Port::remaining_messages`](crate::ports::Port::remaining_messages)
    /// is the only way to observe events still queued.
    Shutdown,
}

/// A cheap, `Clone`-able handle to the component currently running, passed
/// to [`Component::run`].
///
/// `Context` is how a component reads the simulator's current time, learns
/// which [`Phase`] it is being run in, and requests early termination via
/// [`Context::quit`].
#[derive(Clone)]
pub struct Context {
    pub(crate) clock: SimClock,
    pub(crate) quit_requested: std::rc::Rc<std::cell::Cell<bool>>,
    pub(crate) phase: Phase,
}

impl Context {
    /// Returns the simulator's current simulated time.
    pub fn current_time(&self) -> SimulationTime {
        SimulationTime::new(self.clock.get())
    }

    /// Returns the lifecycle phase this invocation is running in.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Requests that the simulator stop after the current component
    /// invocation returns. Every component still receives its shutdown
    /// invocation; this is cooperative, not immediate.
    pub fn quit(&self) {
        self.quit_requested.set(true);
    }
}

/// Opaque identifier of a component within the [`Simulator`](crate::simulation::Simulator)
/// that registered it; assigned in registration order starting at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentId(pub(crate) usize);

/// The back-reference an edge ([`Port`](crate::ports::Port),
/// [`Timer`](crate::ports::Timer), [`Link`](crate::ports::Link),
/// [`BcastLink`](crate::ports::BcastLink), [`BatchLink`](crate::ports::BatchLink))
/// holds to its owning component.
///
/// Rather than a raw or weak pointer to the
/// component itself, it carries the component's [`ComponentId`] (used to
/// detect [`SimulationError::BackRefConflict`]) and a clone of the
/// simulator's shared clock cell (used both to read the current time during
/// `send`/`set`, and to detect [`SimulationError::CrossSimulator`] via
/// `Rc::ptr_eq` against another edge's clock handle).
#[derive(Clone)]
pub struct ComponentRef {
    pub(crate) id: ComponentId,
    pub(crate) clock: SimClock,
}

impl ComponentRef {
    /// Returns the simulated time of the simulator this component is
    /// registered with.
    pub fn current_time(&self) -> SimulationTime {
        SimulationTime::new(self.clock.get())
    }

    pub(crate) fn same_simulator_as(&self, other: &ComponentRef) -> bool {
        std::rc::Rc::ptr_eq(&self.clock, &other.clock)
    }
}

/// The trait every simulated component implements.
///
/// See the [module documentation](self) for the three capabilities this
/// trait exposes to the engine, and [`component!`] for the common case of
/// generating `bind`/`next_event` from a field list.
pub trait Component {
    /// Binds every edge this component owns to `handle`, failing with
    /// [`SimulationError::BackRefConflict`] if any of them is already bound
    /// to a *different* component.
    ///
    /// Called exactly once, by [`Simulator::register`](crate::simulation::Simulator::register).
    fn bind(&mut self, handle: ComponentRef) -> Result<(), SimulationError>;

    /// Returns the earliest time at which this component has a pending
    /// event, or `None` if none of its ports or timers currently hold one.
    fn next_event(&self) -> Option<SimulationTime>;

    /// Runs this component's behavior for one lifecycle invocation.
    fn run(&mut self, ctx: &Context);

    /// A human-readable name for diagnostics. Components are not required
    /// to override this; the default is adequate for simulations that don't
    /// need to distinguish components in trace output.
    fn name(&self) -> &str {
        "component"
    }
}

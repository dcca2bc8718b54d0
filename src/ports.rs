//! Ports, timers and links: the typed edges components are built from.
//!
//! # Inbound edges
//!
//! [`Port<M>`] is the inbound endpoint: it owns a min-heap of pending
//! `Event<M>` (a `(message, delivery_time)` pair, though `Event` itself is
//! not a public type — it only ever surfaces as the tuple
//! [`Port::remaining_messages`] yields). Any number of outbound edges may
//! target the same port.
//!
//! [`Timer<M>`] is a port fused with a self-directed link: in addition to
//! every [`Port`] operation, it exposes [`Timer::set`] so a component can
//! schedule a future event for itself without a separate link or a round
//! trip through `connect`.
//!
//! # Outbound edges
//!
//! [`Link<M>`] sends to exactly one target port, chosen at
//! [`Connect::connect`] time, after a fixed positive latency (plus an
//! optional per-message `extra_delay`). [`BcastLink<M>`] is the same but
//! fans out to any number of target ports (zero is a no-op, not an error).
//! [`BatchLink<M>`] is a [`Link<M>`] whose latency is fixed by the engine at
//! 1 tick, intended for framework-internal traffic — such as a user-level
//! logging component — where timing is not part of the simulated semantics.
//!
//! # Connecting
//!
//! [`Connect::connect`] binds an outbound edge to a target port. It is a
//! statically-typed operation: the message type `M` of the link and the
//! port must match, which Rust's generics enforce at compile time.
//! Calling `connect` again on an already-connected [`Link`] overwrites its
//! previous target (see `DESIGN.md` for why this, rather than failing, was
//! chosen).

use std::cell::RefCell;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::rc::Rc;

use crate::component::ComponentRef;
use crate::component::Context;
use crate::error::{ensure_positive, SimulationError};
use crate::time::SimulationTime;

/// The capability every edge type (inbound or outbound) provides to the
/// engine: binding to an owning component, and — for edges that own a
/// queue — reporting the earliest pending event.
///
/// [`Link`], [`BcastLink`] and [`BatchLink`] do not own a queue, so their
/// `head_time` is always `None`; this lets the [`component!`](crate::component)
/// macro call `head_time` uniformly across every listed field without
/// needing to know which ones are inbound.
pub trait Edge {
    /// Binds this edge's owning-component back-reference to `handle`.
    fn bind(&self, handle: ComponentRef) -> Result<(), SimulationError>;

    /// The earliest pending event's delivery time, if any.
    fn head_time(&self) -> Option<SimulationTime> {
        None
    }
}

impl<T: Edge> Edge for Vec<T> {
    fn bind(&self, handle: ComponentRef) -> Result<(), SimulationError> {
        for edge in self {
            edge.bind(handle.clone())?;
        }
        Ok(())
    }

    fn head_time(&self) -> Option<SimulationTime> {
        crate::time::earliest(self.iter().map(Edge::head_time))
    }
}

// ---------------------------------------------------------------------
// Heap plumbing shared by Port and Timer.
// ---------------------------------------------------------------------

struct HeapEntry<M> {
    time: SimulationTime,
    seq: u64,
    message: M,
}

impl<M> PartialEq for HeapEntry<M> {
    fn eq(&self, other: &Self) -> bool {
        self.time == other.time && self.seq == other.seq
    }
}
impl<M> Eq for HeapEntry<M> {}

impl<M> PartialOrd for HeapEntry<M> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<M> Ord for HeapEntry<M> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Ties are broken by insertion order (`seq`), never by the message
        // itself: `M` need not implement `Ord`.
        self.time.cmp(&other.time).then(self.seq.cmp(&other.seq))
    }
}

struct Queue<M> {
    owner: Option<ComponentRef>,
    heap: BinaryHeap<Reverse<HeapEntry<M>>>,
    next_seq: u64,
}

impl<M> Queue<M> {
    fn new() -> Self {
        Queue {
            owner: None,
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }
}

/// A cheap, clonable handle onto a port's underlying event queue.
///
/// This is the mechanism that lets a [`Link`] deliver into a [`Port`]
/// without the engine routing the message through the owning component's
/// `Box<dyn Component>` — the link simply holds a clone of the same
/// `Rc<RefCell<Queue<M>>>` the port reads from, acquired at
/// [`Connect::connect`] time.
struct PortHandle<M>(Rc<RefCell<Queue<M>>>);

impl<M> Clone for PortHandle<M> {
    fn clone(&self) -> Self {
        PortHandle(Rc::clone(&self.0))
    }
}

impl<M> PortHandle<M> {
    fn owner(&self) -> Option<ComponentRef> {
        self.0.borrow().owner.clone()
    }

    fn push(&self, message: M, time: SimulationTime) {
        let mut queue = self.0.borrow_mut();
        let seq = queue.next_seq;
        queue.next_seq += 1;
        queue.heap.push(Reverse(HeapEntry { time, seq, message }));
    }
}

// ---------------------------------------------------------------------
// Port
// ---------------------------------------------------------------------

/// An inbound endpoint owning a min-heap of pending events for message type
/// `M`, keyed by delivery time.
///
/// Any number of [`Link`]s or [`BcastLink`]s may be [`Connect::connect`]ed
/// to the same port.
pub struct Port<M> {
    handle: PortHandle<M>,
}

impl<M> Default for Port<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> Port<M> {
    /// Creates a new, unconnected, empty port.
    pub fn new() -> Self {
        Port {
            handle: PortHandle(Rc::new(RefCell::new(Queue::new()))),
        }
    }

    /// The delivery time of the earliest pending event, or `None` if the
    /// port is empty.
    pub fn head_time(&self) -> Option<SimulationTime> {
        self.handle
            .0
            .borrow()
            .heap
            .peek()
            .map(|Reverse(entry)| entry.time)
    }

    /// Drains and returns the messages of every event due at the current
    /// simulated time, in heap (insertion-tie-broken) order.
    ///
    /// Outside of [`Phase::Tick`](crate::component::Phase::Tick) this always
    /// yields nothing: it is suppressed during both startup and shutdown, so
    /// that the one well-defined way to observe events pending at shutdown is
    /// [`Port::remaining_messages`].
    pub fn messages(&self, ctx: &Context) -> std::vec::IntoIter<M> {
        if ctx.phase() != crate::component::Phase::Tick {
            return Vec::new().into_iter();
        }
        let now = ctx.current_time();
        let mut queue = self.handle.0.borrow_mut();
        let mut due = Vec::new();
        while matches!(queue.heap.peek(), Some(Reverse(entry)) if entry.time == now) {
            due.push(queue.heap.pop().unwrap().0.message);
        }
        due.into_iter()
    }

    /// Pushes an event directly onto this port's queue, bypassing any link.
    ///
    /// Exposed crate-wide for use by tests elsewhere in the crate that need
    /// to seed a port without constructing and connecting a [`Link`].
    pub(crate) fn push(&self, message: M, time: SimulationTime) {
        self.handle.push(message, time);
    }

    /// Drains every event still queued, regardless of delivery time,
    /// yielding `(message, delivery_time)` pairs in time order.
    ///
    /// Intended for use during [`Phase::Shutdown`](crate::component::Phase::Shutdown),
    /// to observe (and then discard) events that were never delivered.
    pub fn remaining_messages(&self) -> std::vec::IntoIter<(M, SimulationTime)> {
        let mut queue = self.handle.0.borrow_mut();
        let mut remaining = Vec::new();
        while let Some(Reverse(entry)) = queue.heap.pop() {
            remaining.push((entry.message, entry.time));
        }
        remaining.into_iter()
    }
}

impl<M> Edge for Port<M> {
    fn bind(&self, handle: ComponentRef) -> Result<(), SimulationError> {
        bind_owner(&self.handle.0, handle)
    }

    fn head_time(&self) -> Option<SimulationTime> {
        Port::head_time(self)
    }
}

fn bind_owner<M>(queue: &RefCell<Queue<M>>, handle: ComponentRef) -> Result<(), SimulationError> {
    let mut queue = queue.borrow_mut();
    match &queue.owner {
        Some(existing) if existing.id != handle.id => Err(SimulationError::BackRefConflict),
        _ => {
            queue.owner = Some(handle);
            Ok(())
        }
    }
}

// ---------------------------------------------------------------------
// Timer
// ---------------------------------------------------------------------

/// A [`Port`] fused with a self-directed link, for events a component
/// schedules for itself.
///
/// `Timer<M>` exposes the same [`Port::head_time`], [`Port::messages`]-like
/// and [`Port::remaining_messages`]-like operations as a port, plus
/// [`Timer::set`] to arm a future self-event.
pub struct Timer<M> {
    port: Port<M>,
}

impl<M> Default for Timer<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> Timer<M> {
    /// Creates a new, unarmed timer.
    pub fn new() -> Self {
        Timer { port: Port::new() }
    }

    /// The delivery time of the earliest armed event, or `None` if the
    /// timer is unarmed.
    pub fn head_time(&self) -> Option<SimulationTime> {
        self.port.head_time()
    }

    /// Drains and returns the messages of every event due at the current
    /// simulated time. See [`Port::messages`] for the phase-suppression
    /// rule.
    pub fn messages(&self, ctx: &Context) -> std::vec::IntoIter<M> {
        self.port.messages(ctx)
    }

    /// Drains every event still armed, yielding `(message, delivery_time)`
    /// pairs. See [`Port::remaining_messages`].
    pub fn remaining_messages(&self) -> std::vec::IntoIter<(M, SimulationTime)> {
        self.port.remaining_messages()
    }

    /// Arms the timer to deliver `message` to itself after `delay` ticks.
    ///
    /// Fails with [`SimulationError::InvalidDelay`] if `delay` is zero.
    pub fn set(&self, message: M, delay: SimulationTime) -> Result<(), SimulationError> {
        ensure_positive(delay, SimulationError::InvalidDelay)?;
        let owner = self
            .port
            .handle
            .owner()
            .expect("timer is not yet bound to a component");
        let delivery = owner.current_time() + delay;
        self.port.handle.push(message, delivery);
        Ok(())
    }
}

impl<M> Edge for Timer<M> {
    fn bind(&self, handle: ComponentRef) -> Result<(), SimulationError> {
        self.port.bind(handle)
    }

    fn head_time(&self) -> Option<SimulationTime> {
        Timer::head_time(self)
    }
}

// ---------------------------------------------------------------------
// Link
// ---------------------------------------------------------------------

/// An outbound edge with a fixed positive latency, bound to exactly one
/// target [`Port`].
pub struct Link<M> {
    owner: RefCell<Option<ComponentRef>>,
    latency: SimulationTime,
    target: RefCell<Option<PortHandle<M>>>,
}

impl<M> Link<M> {
    /// Creates a new, unconnected link with the given latency.
    ///
    /// Fails with [`SimulationError::InvalidLatency`] if `latency` is zero.
    pub fn new(latency: SimulationTime) -> Result<Self, SimulationError> {
        ensure_positive(latency, SimulationError::InvalidLatency)?;
        Ok(Link {
            owner: RefCell::new(None),
            latency,
            target: RefCell::new(None),
        })
    }

    /// Sends `message` to the target port with no extra delay beyond the
    /// link's own latency. Equivalent to `send_delayed(message, SimulationTime::ZERO)`.
    pub fn send(&self, message: M) -> Result<(), SimulationError> {
        self.send_delayed(message, SimulationTime::ZERO)
    }

    /// Sends `message` to the target port, delivered `latency + extra_delay`
    /// ticks from now.
    ///
    /// Because `extra_delay` may vary per call, messages sent in order may
    /// arrive out of order — this is by design, not a bug: it lets a single
    /// link model, for instance, a channel with variable per-message
    /// jitter.
    ///
    /// Fails with [`SimulationError::Unconnected`] if the link has not been
    /// [`Connect::connect`]ed to a port.
    pub fn send_delayed(&self, message: M, extra_delay: SimulationTime) -> Result<(), SimulationError> {
        let target = self.target.borrow();
        let target = target.as_ref().ok_or(SimulationError::Unconnected)?;
        let owner = self.owner.borrow();
        let owner = owner
            .as_ref()
            .expect("link is not yet bound to a component");
        let delivery = owner.current_time() + self.latency + extra_delay;
        target.push(message, delivery);
        Ok(())
    }

    fn connect_target(&self, port_handle: PortHandle<M>, port_owner: Option<ComponentRef>) -> Result<(), SimulationError> {
        check_same_simulator(self.owner.borrow().as_ref(), port_owner.as_ref())?;
        *self.target.borrow_mut() = Some(port_handle);
        Ok(())
    }
}

impl<M> Edge for Link<M> {
    fn bind(&self, handle: ComponentRef) -> Result<(), SimulationError> {
        let mut owner = self.owner.borrow_mut();
        match &*owner {
            Some(existing) if existing.id != handle.id => Err(SimulationError::BackRefConflict),
            _ => {
                *owner = Some(handle);
                Ok(())
            }
        }
    }
}

fn check_same_simulator(
    a: Option<&ComponentRef>,
    b: Option<&ComponentRef>,
) -> Result<(), SimulationError> {
    if let (Some(a), Some(b)) = (a, b) {
        if !a.same_simulator_as(b) {
            return Err(SimulationError::CrossSimulator);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------
// BcastLink
// ---------------------------------------------------------------------

/// An outbound edge with a fixed positive latency, bound to any number of
/// target [`Port`]s.
///
/// Sending with zero connected targets is a no-op, not an error. Each
/// connected target receives a semantic copy of the message (`M: Clone`) at
/// the same computed delivery time.
pub struct BcastLink<M> {
    owner: RefCell<Option<ComponentRef>>,
    latency: SimulationTime,
    targets: RefCell<Vec<PortHandle<M>>>,
}

impl<M> BcastLink<M> {
    /// Creates a new broadcast link with the given latency and no targets.
    ///
    /// Fails with [`SimulationError::InvalidLatency`] if `latency` is zero.
    pub fn new(latency: SimulationTime) -> Result<Self, SimulationError> {
        ensure_positive(latency, SimulationError::InvalidLatency)?;
        Ok(BcastLink {
            owner: RefCell::new(None),
            latency,
            targets: RefCell::new(Vec::new()),
        })
    }

    /// Sends a copy of `message` to every connected target, with no extra
    /// delay.
    pub fn send(&self, message: M) -> Result<(), SimulationError>
    where
        M: Clone,
    {
        self.send_delayed(message, SimulationTime::ZERO)
    }

    /// Sends a copy of `message` to every connected target, delivered
    /// `latency + extra_delay` ticks from now. A link with no connected
    /// targets silently does nothing.
    pub fn send_delayed(&self, message: M, extra_delay: SimulationTime) -> Result<(), SimulationError>
    where
        M: Clone,
    {
        let targets = self.targets.borrow();
        if targets.is_empty() {
            return Ok(());
        }
        let owner = self.owner.borrow();
        let owner = owner
            .as_ref()
            .expect("link is not yet bound to a component");
        let delivery = owner.current_time() + self.latency + extra_delay;
        for target in targets.iter() {
            target.push(message.clone(), delivery);
        }
        Ok(())
    }

    fn connect_target(&self, port_handle: PortHandle<M>, port_owner: Option<ComponentRef>) -> Result<(), SimulationError> {
        check_same_simulator(self.owner.borrow().as_ref(), port_owner.as_ref())?;
        self.targets.borrow_mut().push(port_handle);
        Ok(())
    }
}

impl<M> Edge for BcastLink<M> {
    fn bind(&self, handle: ComponentRef) -> Result<(), SimulationError> {
        let mut owner = self.owner.borrow_mut();
        match &*owner {
            Some(existing) if existing.id != handle.id => Err(SimulationError::BackRefConflict),
            _ => {
                *owner = Some(handle);
                Ok(())
            }
        }
    }
}

// ---------------------------------------------------------------------
// BatchLink
// ---------------------------------------------------------------------

/// A [`Link`] whose latency is fixed by the engine at one tick, reserved
/// for framework-internal traffic where timing is not part of the
/// simulated semantics — the canonical example being a user-level logging
/// component fed over a `BatchLink` so its traffic never perturbs simulated
/// time.
///
/// Fixing the latency at the type level (rather than letting
/// `BatchLink::new` take a latency argument like [`Link::new`] does) keeps
/// the door open for a future engine to batch or reorder this traffic
/// without changing any user code: callers never observe the latency
/// value, so it's free to change.
pub struct BatchLink<M> {
    inner: Link<M>,
}

impl<M> Default for BatchLink<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> BatchLink<M> {
    /// The latency every `BatchLink` uses, currently fixed at 1 tick.
    const LATENCY: SimulationTime = SimulationTime::new(1);

    /// Creates a new, unconnected batch link.
    pub fn new() -> Self {
        BatchLink {
            inner: Link::new(Self::LATENCY).expect("BatchLink::LATENCY is always positive"),
        }
    }

    /// Sends `message` to the target port, one tick from now.
    ///
    /// Fails with [`SimulationError::Unconnected`] if not yet connected.
    pub fn send(&self, message: M) -> Result<(), SimulationError> {
        self.inner.send(message)
    }

    /// Sends `message` to the target port, delivered `1 + extra_delay` ticks
    /// from now. Same contract as [`Link::send_delayed`], with the latency
    /// fixed at one tick rather than caller-chosen.
    ///
    /// Fails with [`SimulationError::Unconnected`] if not yet connected.
    pub fn send_delayed(&self, message: M, extra_delay: SimulationTime) -> Result<(), SimulationError> {
        self.inner.send_delayed(message, extra_delay)
    }
}

impl<M> Edge for BatchLink<M> {
    fn bind(&self, handle: ComponentRef) -> Result<(), SimulationError> {
        self.inner.bind(handle)
    }
}

// ---------------------------------------------------------------------
// Connect
// ---------------------------------------------------------------------

/// Binds an outbound edge ([`Link`], [`BcastLink`] or [`BatchLink`]) to a
/// target [`Port`] of the same message type.
///
/// If both the edge and the port already have an owning component, they
/// must belong to components registered with the same
/// [`Simulator`](crate::simulation::Simulator); otherwise `connect` fails
/// with [`SimulationError::CrossSimulator`]. If either side is not yet
/// bound (registration hasn't happened yet), no such check is possible and
/// none is performed.
///
/// Connecting a [`Link`] again after it was already connected overwrites
/// its previous target rather than failing — see `DESIGN.md`.
pub trait Connect<M> {
    /// Binds this edge to `port` as a delivery target.
    fn connect(&self, port: &Port<M>) -> Result<(), SimulationError>;
}

impl<M> Connect<M> for Link<M> {
    fn connect(&self, port: &Port<M>) -> Result<(), SimulationError> {
        self.connect_target(port.handle.clone(), port.handle.owner())
    }
}

impl<M> Connect<M> for BcastLink<M> {
    fn connect(&self, port: &Port<M>) -> Result<(), SimulationError> {
        self.connect_target(port.handle.clone(), port.handle.owner())
    }
}

impl<M> Connect<M> for BatchLink<M> {
    fn connect(&self, port: &Port<M>) -> Result<(), SimulationError> {
        self.inner.connect(port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{ComponentId, Phase};
    use std::cell::Cell;

    fn ctx_at(ticks: u64, phase: Phase) -> Context {
        Context {
            clock: Rc::new(Cell::new(ticks)),
            quit_requested: Rc::new(Cell::new(false)),
            phase,
        }
    }

    fn owner_at(clock: &Rc<Cell<u64>>, id: usize) -> ComponentRef {
        ComponentRef {
            id: ComponentId(id),
            clock: Rc::clone(clock),
        }
    }

    #[test]
    fn port_head_time_reflects_the_earliest_event() {
        let port: Port<&'static str> = Port::new();
        let clock = Rc::new(Cell::new(0));
        Edge::bind(&port, owner_at(&clock, 0)).unwrap();

        port.handle.push("late", SimulationTime::new(5));
        port.handle.push("early", SimulationTime::new(2));

        assert_eq!(port.head_time(), Some(SimulationTime::new(2)));
    }

    #[test]
    fn messages_only_drains_events_due_now_and_only_during_tick() {
        let port: Port<i32> = Port::new();
        port.handle.push(1, SimulationTime::new(3));
        port.handle.push(2, SimulationTime::new(3));
        port.handle.push(3, SimulationTime::new(4));

        let startup_ctx = ctx_at(3, Phase::Startup);
        assert_eq!(port.messages(&startup_ctx).collect::<Vec<_>>(), Vec::<i32>::new());

        let tick_ctx = ctx_at(3, Phase::Tick);
        assert_eq!(port.messages(&tick_ctx).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(port.head_time(), Some(SimulationTime::new(4)));
    }

    #[test]
    fn remaining_messages_drains_everything_regardless_of_time() {
        let port: Port<i32> = Port::new();
        port.handle.push(1, SimulationTime::new(3));
        port.handle.push(2, SimulationTime::new(9));

        let remaining: Vec<_> = port.remaining_messages().collect();
        assert_eq!(
            remaining,
            vec![(1, SimulationTime::new(3)), (2, SimulationTime::new(9))]
        );
        assert_eq!(port.head_time(), None);
    }

    #[test]
    fn link_requires_positive_latency() {
        let err = Link::<()>::new(SimulationTime::ZERO).unwrap_err();
        assert_eq!(err, SimulationError::InvalidLatency);
    }

    #[test]
    fn link_send_before_connect_is_unconnected() {
        let clock = Rc::new(Cell::new(0));
        let link: Link<i32> = Link::new(SimulationTime::new(1)).unwrap();
        Edge::bind(&link, owner_at(&clock, 0)).unwrap();

        assert_eq!(link.send(42).unwrap_err(), SimulationError::Unconnected);
    }

    #[test]
    fn link_send_computes_latency_plus_extra_delay() {
        let clock = Rc::new(Cell::new(10));
        let link: Link<i32> = Link::new(SimulationTime::new(3)).unwrap();
        let port: Port<i32> = Port::new();
        Edge::bind(&link, owner_at(&clock, 0)).unwrap();
        Edge::bind(&port, owner_at(&clock, 1)).unwrap();
        link.connect(&port).unwrap();

        link.send_delayed(7, SimulationTime::new(5)).unwrap();

        assert_eq!(port.head_time(), Some(SimulationTime::new(18)));
    }

    #[test]
    fn connect_across_simulators_fails() {
        let clock_a = Rc::new(Cell::new(0));
        let clock_b = Rc::new(Cell::new(0));
        let link: Link<i32> = Link::new(SimulationTime::new(1)).unwrap();
        let port: Port<i32> = Port::new();
        Edge::bind(&link, owner_at(&clock_a, 0)).unwrap();
        Edge::bind(&port, owner_at(&clock_b, 0)).unwrap();

        assert_eq!(
            link.connect(&port).unwrap_err(),
            SimulationError::CrossSimulator
        );
    }

    #[test]
    fn binding_to_a_different_component_conflicts() {
        let clock = Rc::new(Cell::new(0));
        let port: Port<i32> = Port::new();
        Edge::bind(&port, owner_at(&clock, 0)).unwrap();

        assert_eq!(
            Edge::bind(&port, owner_at(&clock, 1)).unwrap_err(),
            SimulationError::BackRefConflict
        );
    }

    #[test]
    fn rebinding_to_the_same_component_is_fine() {
        let clock = Rc::new(Cell::new(0));
        let port: Port<i32> = Port::new();
        Edge::bind(&port, owner_at(&clock, 0)).unwrap();
        assert!(Edge::bind(&port, owner_at(&clock, 0)).is_ok());
    }

    #[test]
    fn bcast_link_with_no_targets_is_a_no_op() {
        let clock = Rc::new(Cell::new(0));
        let link: BcastLink<i32> = BcastLink::new(SimulationTime::new(1)).unwrap();
        Edge::bind(&link, owner_at(&clock, 0)).unwrap();
        assert!(link.send(1).is_ok());
    }

    #[test]
    fn bcast_link_fans_out_to_every_target_with_identical_time() {
        let clock = Rc::new(Cell::new(0));
        let link: BcastLink<i32> = BcastLink::new(SimulationTime::new(1)).unwrap();
        let a: Port<i32> = Port::new();
        let b: Port<i32> = Port::new();
        Edge::bind(&link, owner_at(&clock, 0)).unwrap();
        Edge::bind(&a, owner_at(&clock, 1)).unwrap();
        Edge::bind(&b, owner_at(&clock, 2)).unwrap();
        link.connect(&a).unwrap();
        link.connect(&b).unwrap();

        link.send(99).unwrap();

        assert_eq!(a.head_time(), Some(SimulationTime::new(1)));
        assert_eq!(b.head_time(), Some(SimulationTime::new(1)));
    }

    #[test]
    fn timer_set_requires_positive_delay() {
        let clock = Rc::new(Cell::new(0));
        let timer: Timer<bool> = Timer::new();
        Edge::bind(&timer, owner_at(&clock, 0)).unwrap();

        assert_eq!(
            timer.set(true, SimulationTime::ZERO).unwrap_err(),
            SimulationError::InvalidDelay
        );
    }

    #[test]
    fn timer_set_schedules_relative_to_current_time() {
        let clock = Rc::new(Cell::new(7));
        let timer: Timer<bool> = Timer::new();
        Edge::bind(&timer, owner_at(&clock, 0)).unwrap();

        timer.set(true, SimulationTime::new(3)).unwrap();

        assert_eq!(timer.head_time(), Some(SimulationTime::new(10)));
    }

    #[test]
    fn batch_link_always_uses_latency_one() {
        let clock = Rc::new(Cell::new(5));
        let link: BatchLink<&'static str> = BatchLink::new();
        let port: Port<&'static str> = Port::new();
        Edge::bind(&link, owner_at(&clock, 0)).unwrap();
        Edge::bind(&port, owner_at(&clock, 1)).unwrap();
        link.connect(&port).unwrap();

        link.send("log line").unwrap();

        assert_eq!(port.head_time(), Some(SimulationTime::new(6)));
    }

    #[test]
    fn batch_link_send_delayed_adds_extra_delay_on_top_of_its_fixed_latency() {
        let clock = Rc::new(Cell::new(5));
        let link: BatchLink<&'static str> = BatchLink::new();
        let port: Port<&'static str> = Port::new();
        Edge::bind(&link, owner_at(&clock, 0)).unwrap();
        Edge::bind(&port, owner_at(&clock, 1)).unwrap();
        link.connect(&port).unwrap();

        link.send_delayed("log line", SimulationTime::new(4)).unwrap();

        assert_eq!(port.head_time(), Some(SimulationTime::new(10)));
    }

    #[test]
    fn vec_of_ports_binds_all_and_reports_the_minimum_head_time() {
        let clock = Rc::new(Cell::new(0));
        let ports: Vec<Port<i32>> = vec![Port::new(), Port::new()];
        Edge::bind(&ports, owner_at(&clock, 0)).unwrap();

        ports[0].handle.push(1, SimulationTime::new(9));
        ports[1].handle.push(2, SimulationTime::new(4));

        assert_eq!(Edge::head_time(&ports), Some(SimulationTime::new(4)));
    }
}

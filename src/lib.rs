//! A discrete-event simulation engine organized around message-passing
//! components.
//!
//! `nodesim` promotes a component-oriented architecture that closely
//! resembles flow-based programming: a component is an isolated entity with
//! a fixed set of typed outbound [`ports::Link`]s (and [`ports::BcastLink`]s)
//! and typed inbound [`ports::Port`]s, communicating with other components
//! through message passing via connections established before the
//! simulation runs.
//!
//! Unlike `nexosim`, the sibling from which this crate borrows its
//! vocabulary and module shape, `nodesim` is deliberately **single-threaded
//! and synchronous**: there is no executor, no `async`, and no
//! auto-parallelization. Simulated time advances in discrete integer ticks,
//! and every component behavior runs to completion before the engine moves
//! on. This matches the needs of logical-time simulations where wall-clock
//! throughput is secondary to deterministic, easily-reasoned-about ordering.
//!
//! # A practical overview
//!
//! Building and running a simulation involves three activities:
//!
//! 1. **Authoring components.** A component is a plain Rust struct holding
//!    state plus any number of [`ports::Port`], [`ports::Timer`],
//!    [`ports::Link`], [`ports::BcastLink`] and [`ports::BatchLink`] fields.
//!    It implements [`component::Component`] (by hand, or via the
//!    [`component!`] macro) to describe how those fields are wired to their
//!    owner and how the component reacts to events.
//! 2. **Assembling the bench.** Components are registered with a
//!    [`simulation::Simulator`], which wires every edge's back-reference to
//!    its owner. Output edges are then [`ports::Connect::connect`]ed to the
//!    ports they should deliver to.
//! 3. **Running the simulation.** [`simulation::Simulator::run`] drives the
//!    main loop: a startup pass, a tick loop that advances time to the next
//!    pending event and runs exactly the components with an event due, and a
//!    shutdown pass that exposes any events still queued.
//!
//! ## A simple component
//!
//! ```
//! use nodesim::component::Context;
//! use nodesim::ports::{Connect, Link, Port};
//! use nodesim::SimulationTime;
//!
//! pub struct Doubler {
//!     pub input: Port<u32>,
//!     pub output: Link<u32>,
//! }
//!
//! impl Doubler {
//!     pub fn new() -> Result<Self, nodesim::SimulationError> {
//!         Ok(Doubler {
//!             input: Port::new(),
//!             output: Link::new(SimulationTime::new(1))?,
//!         })
//!     }
//!
//!     fn behavior(&mut self, ctx: &Context) {
//!         for value in self.input.messages(ctx) {
//!             let _ = self.output.send(value * 2);
//!         }
//!     }
//! }
//!
//! nodesim::component!(Doubler { input, output });
//! ```
//!
//! `Link` has no `Default` impl (a latency must be chosen), so a component
//! that owns one provides its own constructor, as `Doubler::new` does above,
//! rather than deriving `Default`; see [`ports`] for the full set of
//! constructors.
//!
//! # Message ordering guarantees
//!
//! Because `nodesim` is single-threaded, there is no ambiguity from
//! parallel execution to reason about. The guarantees are simply:
//!
//! 1. simulated time is monotonically non-decreasing,
//! 2. within one tick, components run in registration order,
//! 3. a message sent this tick is never delivered this tick (latency ≥ 1),
//! 4. per port, messages are consumed in delivery-time order, with ties
//!    broken by send order.
//!
//! # Cargo feature flags
//!
//! ## Tracing
//!
//! The `tracing` feature instruments the [`simulation::Simulator`] main loop
//! with [`tracing`](https://docs.rs/tracing) spans and events (tick
//! boundaries, component dispatch, termination reason). It is off by
//! default so the dependency costs nothing unless opted into:
//!
//! ```toml
//! [dependencies]
//! nodesim = { version = "0.1", features = ["tracing"] }
//! ```

pub mod component;
pub mod error;
pub mod ports;
pub mod simulation;
pub mod time;

mod macros;

pub use component::{Component, ComponentRef, Context, Phase};
pub use error::SimulationError;
pub use ports::{BatchLink, BcastLink, Connect, Link, Port, Timer};
pub use simulation::Simulator;
pub use time::SimulationTime;

//! The [`component!`] declarative macro.

/// Generates a [`Component`](crate::component::Component) implementation for
/// a struct from a list of its edge-typed fields.
///
/// Given
///
/// ```ignore
/// nodesim::component!(Doubler { input, output });
/// ```
///
/// this expands to an `impl Component for Doubler` whose `bind` calls
/// [`Edge::bind`](crate::ports::Edge::bind) on `self.input` and
/// `self.output`, whose `next_event` folds
/// [`Edge::head_time`](crate::ports::Edge::head_time) over the same two
/// fields via [`earliest`](crate::time::earliest), and whose `run` delegates
/// to a `behavior(&mut self, ctx: &Context)` method the caller writes by
/// hand.
///
/// Every field named must implement
/// [`Edge`](crate::ports::Edge) — this covers [`Port`](crate::ports::Port),
/// [`Timer`](crate::ports::Timer), [`Link`](crate::ports::Link),
/// [`BcastLink`](crate::ports::BcastLink), [`BatchLink`](crate::ports::BatchLink),
/// and `Vec<T>` of any of those. Fields that hold an edge only indirectly —
/// nested inside a tuple, a `HashMap`, or a user-defined wrapper the macro
/// cannot see through — are not supported here; implement `Component` by
/// hand for those instead, calling `Edge::bind` and `Edge::head_time`
/// explicitly on whatever nested structure holds them.
#[macro_export]
macro_rules! component {
    ($ty:ty { $($field:ident),+ $(,)? }) => {
        impl $crate::component::Component for $ty {
            fn bind(
                &mut self,
                handle: $crate::component::ComponentRef,
            ) -> ::std::result::Result<(), $crate::error::SimulationError> {
                $(
                    $crate::ports::Edge::bind(&self.$field, handle.clone())?;
                )+
                Ok(())
            }

            fn next_event(&self) -> ::std::option::Option<$crate::time::SimulationTime> {
                $crate::time::earliest([
                    $(
                        $crate::ports::Edge::head_time(&self.$field),
                    )+
                ])
            }

            fn run(&mut self, ctx: &$crate::component::Context) {
                self.behavior(ctx);
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::component::{Component, ComponentId, ComponentRef, Context, Phase};
    use crate::ports::Port;
    use crate::time::SimulationTime;
    use std::cell::Cell;
    use std::rc::Rc;

    struct Counter {
        input: Port<i32>,
        total: i32,
    }

    impl Counter {
        fn behavior(&mut self, ctx: &Context) {
            for value in self.input.messages(ctx) {
                self.total += value;
            }
        }
    }

    crate::component!(Counter { input });

    #[test]
    fn generated_bind_wires_every_listed_field() {
        let clock = Rc::new(Cell::new(0));
        let mut counter = Counter {
            input: Port::new(),
            total: 0,
        };
        let handle = ComponentRef {
            id: ComponentId(0),
            clock: Rc::clone(&clock),
        };

        counter.bind(handle).unwrap();
        counter.input.push(5, SimulationTime::new(1));

        assert_eq!(counter.next_event(), Some(SimulationTime::new(1)));
    }

    #[test]
    fn generated_run_delegates_to_behavior() {
        let clock = Rc::new(Cell::new(1));
        let mut counter = Counter {
            input: Port::new(),
            total: 0,
        };
        let handle = ComponentRef {
            id: ComponentId(0),
            clock: Rc::clone(&clock),
        };
        counter.bind(handle).unwrap();
        counter.input.push(5, SimulationTime::new(1));
        counter.input.push(7, SimulationTime::new(1));

        let ctx = Context {
            clock,
            quit_requested: Rc::new(Cell::new(false)),
            phase: Phase::Tick,
        };
        counter.run(&ctx);

        assert_eq!(counter.total, 12);
    }
}

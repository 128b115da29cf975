//! # System — Logic That Runs Every Tick
//!
//! A system is anything that takes the game's context and the fixed time step
//! and does something with it: query entities, modify components, queue
//! messages. That's it.
//!
//! ## Design Philosophy
//!
//! - A system is `FnMut(&mut C, Duration)` or a struct implementing [`System`].
//! - `C` is the game's own context type, passed explicitly. It usually holds
//!   the [`World`](super::World), the input state, and shared game state.
//! - Systems run in the order they're added, strictly one after another.
//!
//! ## Schedule
//!
//! A [`Schedule`] is just a `Vec` of systems. The
//! [`Simulation`](crate::simulation::Simulation) calls
//! [`run_with`](Schedule::run_with) once per fixed tick, passing a hook that
//! dispatches queued messages after each system.

use std::time::Duration;

/// A system that can be executed against a context `C`.
///
/// Any `FnMut(&mut C, Duration)` implements this trait, so you can use closures
/// or function pointers directly.
pub trait System<C> {
    fn run(&mut self, ctx: &mut C, step: Duration);
}

/// Blanket impl: any `FnMut(&mut C, Duration)` is a `System<C>`.
impl<C, F: FnMut(&mut C, Duration)> System<C> for F {
    fn run(&mut self, ctx: &mut C, step: Duration) {
        (self)(ctx, step);
    }
}

/// A boxed [`System`] with a short name for diagnostics.
struct NamedSystem<C> {
    #[cfg(any(feature = "diagnostics", test))]
    name: String,
    system: Box<dyn System<C>>,
}

/// Per-system timing recorded during the most recent tick.
#[cfg(feature = "diagnostics")]
#[derive(Clone, Debug)]
pub struct SystemTiming {
    pub name: String,
    pub duration_us: f64,
}

/// An ordered list of systems to run.
pub struct Schedule<C> {
    systems: Vec<NamedSystem<C>>,
    /// Per-system timings from the most recent `run_with()` call.
    #[cfg(feature = "diagnostics")]
    timings: Vec<SystemTiming>,
}

impl<C> Schedule<C> {
    pub fn new() -> Self {
        Self {
            systems: Vec::new(),
            #[cfg(feature = "diagnostics")]
            timings: Vec::new(),
        }
    }

    /// Add a system to the end of the schedule.
    pub fn add_system<S: System<C> + 'static>(&mut self, system: S) {
        self.systems.push(NamedSystem {
            #[cfg(any(feature = "diagnostics", test))]
            name: short_system_name(std::any::type_name::<S>()),
            system: Box::new(system),
        });
    }

    /// Run all systems in order.
    pub fn run(&mut self, ctx: &mut C, step: Duration) {
        self.run_with(ctx, step, |_| {});
    }

    /// Run all systems in order, calling `after_each` once after every system.
    pub fn run_with(&mut self, ctx: &mut C, step: Duration, mut after_each: impl FnMut(&mut C)) {
        #[cfg(feature = "diagnostics")]
        {
            self.timings.clear();
            for ns in &mut self.systems {
                let start = std::time::Instant::now();
                ns.system.run(ctx, step);
                let elapsed = start.elapsed();
                self.timings.push(SystemTiming {
                    name: ns.name.clone(),
                    duration_us: elapsed.as_secs_f64() * 1_000_000.0,
                });
                log::trace!("{} took {:.1}µs", ns.name, elapsed.as_secs_f64() * 1_000_000.0);
                after_each(ctx);
            }
        }
        #[cfg(not(feature = "diagnostics"))]
        {
            for ns in &mut self.systems {
                ns.system.run(ctx, step);
                after_each(ctx);
            }
        }
    }

    /// Per-system timings from the most recent run.
    #[cfg(feature = "diagnostics")]
    pub fn timings(&self) -> &[SystemTiming] {
        &self.timings
    }

    /// Returns the number of systems in this schedule.
    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }
}

impl<C> Default for Schedule<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Strip the module path from a fully-qualified type name, keeping only the
/// last meaningful segment (e.g. `kiln_breakout::systems::PaddleSystem` →
/// `PaddleSystem`, `{{closure}}` → `<closure>`).
#[cfg(any(feature = "diagnostics", test))]
fn short_system_name(full: &str) -> String {
    let name = full.rsplit("::").next().unwrap_or(full);
    if name.contains("closure") {
        "<closure>".to_string()
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn push_one(log: &mut Vec<u32>, _step: Duration) {
        log.push(1);
    }

    struct PushTwo;

    impl System<Vec<u32>> for PushTwo {
        fn run(&mut self, log: &mut Vec<u32>, _step: Duration) {
            log.push(2);
        }
    }

    #[test]
    fn schedule_captures_system_name() {
        let mut schedule: Schedule<Vec<u32>> = Schedule::new();
        schedule.add_system(push_one);
        schedule.add_system(PushTwo);
        assert_eq!(schedule.systems[0].name, "push_one");
        assert_eq!(schedule.systems[1].name, "PushTwo");
    }

    #[test]
    fn closure_system_name() {
        let mut schedule: Schedule<Vec<u32>> = Schedule::new();
        schedule.add_system(|_log: &mut Vec<u32>, _step: Duration| {});
        assert_eq!(schedule.systems[0].name, "<closure>");
    }

    #[test]
    fn systems_run_in_order_with_hook_between() {
        let mut schedule: Schedule<Vec<u32>> = Schedule::new();
        schedule.add_system(push_one);
        schedule.add_system(PushTwo);
        schedule.add_system(|log: &mut Vec<u32>, step: Duration| log.push(step.as_millis() as u32));

        let mut log = Vec::new();
        schedule.run_with(&mut log, Duration::from_millis(16), |log| log.push(0));
        assert_eq!(log, vec![1, 0, 2, 0, 16, 0]);
        assert_eq!(schedule.len(), 3);
    }

    #[cfg(feature = "diagnostics")]
    #[test]
    fn timings_recorded_per_system() {
        let mut schedule: Schedule<Vec<u32>> = Schedule::new();
        schedule.add_system(push_one);
        schedule.add_system(PushTwo);
        schedule.run(&mut Vec::new(), Duration::ZERO);
        let names: Vec<_> = schedule.timings().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["push_one", "PushTwo"]);
    }
}

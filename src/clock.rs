//! Year counter with synchronous tick listeners.

type TickListener = Box<dyn FnMut(u64)>;

/// Advances the simulation's year and notifies listeners. Listeners run to
/// completion, in registration order, before `tick()` returns.
#[derive(Default)]
pub struct SimulationClock {
    current_year: u64,
    listeners: Vec<TickListener>,
}

impl SimulationClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_year(&self) -> u64 {
        self.current_year
    }

    pub fn on_tick(&mut self, listener: impl FnMut(u64) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Increments the year and notifies every listener with the new value.
    pub fn tick(&mut self) -> u64 {
        self.current_year += 1;
        let year = self.current_year;
        for listener in &mut self.listeners {
            listener(year);
        }
        year
    }

    /// Rewinds to year 0 and notifies listeners with 0.
    pub fn reset(&mut self) {
        self.current_year = 0;
        for listener in &mut self.listeners {
            listener(0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn tick_increments_and_notifies_synchronously() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut clock = SimulationClock::new();
        clock.on_tick(move |year| sink.borrow_mut().push(year));

        assert_eq!(clock.tick(), 1);
        assert_eq!(clock.tick(), 2);
        // Listener already ran by the time tick() returned.
        assert_eq!(*seen.borrow(), vec![1, 2]);
        assert_eq!(clock.current_year(), 2);
    }

    #[test]
    fn reset_rewinds_and_notifies_with_zero() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut clock = SimulationClock::new();
        clock.on_tick(move |year| sink.borrow_mut().push(year));

        clock.tick();
        clock.reset();
        assert_eq!(clock.current_year(), 0);
        assert_eq!(*seen.borrow(), vec![1, 0]);
    }
}

//! The host loop: decides when to step the CPU, tick the timers and redraw.

use crate::{
    io::{Chip8Io, InputEvent, TIME_BETWEEN_TICKS_NS},
    Chip8, Config, Step,
};
use anyhow::Result;
use log::{debug, info};
use std::{
    thread,
    time::{Duration, Instant},
};

/// Elapsed time beyond this is dropped rather than caught up on, e.g. after
/// the process was suspended.
const MAX_BACKLOG: Duration = Duration::from_millis(250);

/// Three independent clocks (instructions, 60 Hz timers, display refresh)
/// driven by one source of elapsed time.
#[derive(Debug, Clone)]
pub struct Scheduler {
    step: Clock,
    tick: Clock,
    refresh: Clock,
}

/// What a `Scheduler::advance` says is due now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Due {
    pub steps: u32,
    pub ticks: u32,
    pub refresh: bool,
}

#[derive(Debug, Clone)]
struct Clock {
    period: Duration,
    elapsed: Duration,
}

impl Clock {
    /// `hz` of zero is treated as one.
    fn from_hz(hz: u32) -> Self {
        Self::from_period(Duration::from_nanos(10_u64.pow(9) / u64::from(hz.max(1))))
    }

    fn from_period(period: Duration) -> Self {
        Self {
            period,
            elapsed: Duration::ZERO,
        }
    }

    /// Add `dt`; return how many whole periods have now passed.
    fn advance(&mut self, dt: Duration) -> u32 {
        self.elapsed += dt;
        let mut n = 0;
        while self.elapsed >= self.period {
            self.elapsed -= self.period;
            n += 1;
        }
        n
    }

    fn remaining(&self) -> Duration {
        self.period.saturating_sub(self.elapsed)
    }
}

impl Scheduler {
    pub fn new(config: &Config) -> Self {
        Self {
            step: Clock::from_hz(config.clock_speed),
            tick: Clock::from_period(Duration::from_nanos(TIME_BETWEEN_TICKS_NS)),
            refresh: Clock::from_hz(config.refresh_rate),
        }
    }

    pub fn advance(&mut self, dt: Duration) -> Due {
        let dt = dt.min(MAX_BACKLOG);
        Due {
            steps: self.step.advance(dt),
            ticks: self.tick.advance(dt),
            refresh: self.refresh.advance(dt) > 0,
        }
    }

    /// How long until at least one clock has something due.
    pub fn until_next(&self) -> Duration {
        [&self.step, &self.tick, &self.refresh]
            .into_iter()
            .map(Clock::remaining)
            .min()
            .unwrap_or(Duration::ZERO)
    }
}

/// Counts from one `run`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    pub steps: u64,
    /// Calls and returns that were refused by the stack.
    pub faults: u64,
}

/// Run `chip8` against `io` in real time until the user quits.
pub fn run(chip8: &mut Chip8, io: &mut dyn Chip8Io) -> Result<Summary> {
    let mut scheduler = Scheduler::new(chip8.config());
    let mut previous = Instant::now();
    let mut summary = Summary::default();

    io.render(chip8.screen())?;

    loop {
        for event in io.poll_events()? {
            match event {
                InputEvent::Press(k) => chip8.press_key(k),
                InputEvent::Release(k) => chip8.release_key(k),
                InputEvent::Quit => {
                    info!("quit requested at pc=0x{:04x}", chip8.cpu().pc());
                    return Ok(summary);
                }
            }
        }

        let now = Instant::now();
        let due = scheduler.advance(now - previous);
        previous = now;

        for _ in 0..due.ticks {
            chip8.tick_timers();
        }
        for _ in 0..due.steps {
            if let Step::Fault(_) = chip8.step() {
                summary.faults += 1;
            }
        }
        summary.steps += u64::from(due.steps);
        if due.refresh {
            io.render(chip8.screen())?;
        }
        if due.steps > 1 {
            debug!("caught up {} instructions", due.steps);
        }

        thread::sleep(scheduler.until_next());
    }
}

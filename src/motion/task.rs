//! Periodic runner pairing a generator with a servo channel.

use embedded_hal::delay::DelayNs;
use log::debug;

use super::MotionGenerator;
use crate::app::ports::ServoPort;
use crate::phase::PhaseReader;

pub struct ServoTask<'a, G, S, D> {
    name: &'static str,
    generator: G,
    servo: S,
    phase: PhaseReader<'a>,
    delay: D,
    period_ms: u32,
    /// Emit a debug line for every duty written.
    log_ticks: bool,
}

impl<'a, G, S, D> ServoTask<'a, G, S, D>
where
    G: MotionGenerator,
    S: ServoPort,
    D: DelayNs,
{
    pub fn new(
        name: &'static str,
        generator: G,
        servo: S,
        phase: PhaseReader<'a>,
        delay: D,
        period_ms: u32,
    ) -> Self {
        Self {
            name,
            generator,
            servo,
            phase,
            delay,
            period_ms,
            log_ticks: false,
        }
    }

    pub fn with_tick_logging(mut self, enabled: bool) -> Self {
        self.log_ticks = enabled;
        self
    }

    /// One period: read the phase, maybe write a duty, sleep.
    pub fn tick(&mut self) -> Option<u16> {
        let phase = self.phase.get();
        let out = self.generator.tick(phase);
        if let Some(duty) = out {
            self.servo.set_duty_us(duty);
            if self.log_ticks {
                debug!("{}: {} duty={}", self.name, phase, duty);
            }
        }
        self.delay.delay_ms(self.period_ms);
        out
    }

    pub fn run(&mut self) -> ! {
        debug!("{}: running every {} ms", self.name, self.period_ms);
        loop {
            self.tick();
        }
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    pub fn servo(&self) -> &S {
        &self.servo
    }
}

use anyhow::{anyhow, Result};

use crate::world::World;

/// Progress shared by every pass in one generation run.
#[derive(Clone, Debug, Default)]
pub struct GenerationProgress {
    pub message: String,
    completed_weight: f32,
    total_weight: f32,
}

impl GenerationProgress {
    pub fn fraction(&self) -> f32 {
        if self.total_weight <= 0.0 { 0.0 } else { (self.completed_weight / self.total_weight).min(1.0) }
    }
}

/// One named, weighted world generation step.
pub trait GenPass {
    fn name(&self) -> &str;
    fn weight(&self) -> f32;
    fn apply(&mut self, world: &mut World, progress: &mut GenerationProgress) -> Result<()>;
}

/// Re-runs the inner pass from the start until it succeeds or attempts run out.
pub struct RetryingPass<P> {
    inner: P,
    max_attempts: u32,
    pub attempts_used: u32,
}

impl<P: GenPass> RetryingPass<P> {
    pub fn new(inner: P, max_attempts: u32) -> Self {
        Self { inner, max_attempts: max_attempts.max(1), attempts_used: 0 }
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }
}

impl<P: GenPass> GenPass for RetryingPass<P> {
    fn name(&self) -> &str { self.inner.name() }
    fn weight(&self) -> f32 { self.inner.weight() }

    fn apply(&mut self, world: &mut World, progress: &mut GenerationProgress) -> Result<()> {
        let mut last_err = None;
        for attempt in 1..=self.max_attempts {
            self.attempts_used = attempt;
            match self.inner.apply(world, progress) {
                Ok(()) => return Ok(()),
                Err(e) => {
                    log::warn!(
                        "[scheduler] pass '{}' failed on attempt {}/{}: {:#}",
                        self.inner.name(), attempt, self.max_attempts, e
                    );
                    last_err = Some(e);
                }
            }
        }
        Err(last_err
            .unwrap_or_else(|| anyhow!("pass '{}' never ran", self.inner.name()))
            .context(format!("pass '{}' failed after {} attempts", self.inner.name(), self.max_attempts)))
    }
}

#[derive(Clone, Debug, Default)]
pub struct ScheduleStats {
    pub passes_run: usize,
    pub completed: Vec<String>,
}

#[derive(Default)]
pub struct PassScheduler {
    passes: Vec<Box<dyn GenPass>>,
}

impl PassScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push<P: GenPass + 'static>(&mut self, pass: P) -> &mut Self {
        self.passes.push(Box::new(pass));
        self
    }

    pub fn names(&self) -> Vec<&str> {
        self.passes.iter().map(|p| p.name()).collect()
    }

    /// Runs passes in order; the first error aborts the whole run.
    pub fn run(&mut self, world: &mut World) -> Result<ScheduleStats> {
        let total_weight: f32 = self.passes.iter().map(|p| p.weight().max(0.0)).sum();
        let mut progress = GenerationProgress { total_weight, ..Default::default() };
        let mut stats = ScheduleStats::default();

        for pass in self.passes.iter_mut() {
            let name = pass.name().to_string();
            log::info!("[scheduler] Starting pass {}", name);
            progress.message = name.clone();
            pass.apply(world, &mut progress)
                .map_err(|e| e.context(format!("world generation aborted in pass '{}'", name)))?;
            progress.completed_weight += pass.weight().max(0.0);
            log::info!("[scheduler] Finishing pass {} ({:.0}%)", name, progress.fraction() * 100.0);
            stats.passes_run += 1;
            stats.completed.push(name);
        }
        Ok(stats)
    }
}

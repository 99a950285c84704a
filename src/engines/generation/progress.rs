use super::evolution_engine::ProgressCallback;

/// Reports progress through the `log` facade
pub struct ConsoleProgressCallback {
    /// Log every n-th generation at info level, the rest at debug
    pub every: usize,
}

impl Default for ConsoleProgressCallback {
    fn default() -> Self {
        Self { every: 10 }
    }
}

impl ProgressCallback for ConsoleProgressCallback {
    fn on_generation_start(&mut self, generation: usize) {
        log::trace!("Generation {} starting...", generation + 1);
    }

    fn on_generation_complete(&mut self, generation: usize, best_fitness: f64, population_size: usize) {
        if self.every > 0 && (generation + 1) % self.every == 0 {
            log::info!(
                "Generation {} complete. Best fitness: {:.6}, population: {}",
                generation + 1,
                best_fitness,
                population_size
            );
        } else {
            log::debug!(
                "Generation {} complete. Best fitness: {:.6}, population: {}",
                generation + 1,
                best_fitness,
                population_size
            );
        }
    }
}

/// Ignores all progress events
pub struct SilentProgressCallback;

impl ProgressCallback for SilentProgressCallback {
    fn on_generation_start(&mut self, _generation: usize) {}

    fn on_generation_complete(&mut self, _generation: usize, _best_fitness: f64, _population_size: usize) {}
}

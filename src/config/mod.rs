pub mod traits;
pub mod evolution;
pub mod genome;
pub mod lifetime;
pub mod fitness;
pub mod run;
pub mod manager;

pub use manager::{ConfigManager, AppConfig};
pub use evolution::{
    CrossoverMethod, CrossoverSchedule, EvolutionConfig, MutationSchedule, SurvivorSelection,
};
pub use genome::GenomeConfig;
pub use lifetime::{LifetimeConfig, PruneMode};
pub use fitness::FitnessConfig;
pub use run::RunConfig;
pub use traits::ConfigSection;

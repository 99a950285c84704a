use anyhow::Context;
use clap::{Parser, Subcommand};
use gramevo::config::{AppConfig, ConfigManager};
use gramevo::data::BnfConnector;
use gramevo::engines::evaluation::{resolve_objectives, Benchmark, DerivativeFitness, Objective};
use gramevo::engines::generation::{
    ArithmeticRepair, ConsoleProgressCallback, EngineConfig, EvolutionEngine, GrammarMapper,
};
use gramevo::engines::metrics::{BenchmarkSummary, ExperimentReport, RunRecord};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "gramevo")]
#[command(about = "Grammatical evolution of derivative approximations")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Evolve solutions for benchmarks or a custom target
    Run {
        /// TOML or JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        grammar: Option<PathBuf>,
        /// Benchmark name; repeatable. Defaults to all
        #[arg(long = "benchmark")]
        benchmarks: Vec<String>,
        /// Custom target function of X, e.g. "X * sin(X)"
        #[arg(long, requires_all = ["lower", "upper"])]
        target: Option<String>,
        /// Lower end of the custom target's interval
        #[arg(long, requires = "target", allow_negative_numbers = true)]
        lower: Option<f64>,
        /// Upper end of the custom target's interval
        #[arg(long, requires = "target", allow_negative_numbers = true)]
        upper: Option<f64>,
        #[arg(long)]
        runs: Option<usize>,
        #[arg(long)]
        seed: Option<u64>,
        /// Where to write the JSON report
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Map a genome through a grammar and print the derivation
    Decode {
        #[arg(long)]
        grammar: PathBuf,
        #[arg(long, default_value_t = 2)]
        max_wraps: usize,
        #[arg(long)]
        no_repair: bool,
        #[arg(required = true)]
        codons: Vec<u32>,
    },
    /// List the built-in benchmarks
    Benchmarks,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    match Cli::parse().command {
        Command::Run {
            config,
            grammar,
            benchmarks,
            target,
            lower,
            upper,
            runs,
            seed,
            report,
        } => {
            let mut manager = ConfigManager::new();
            match config {
                Some(path) => manager
                    .load_from_file(&path)
                    .with_context(|| format!("Failed to load config {}", path.display()))?,
                None => manager.load_from_env()?,
            }
            manager.update(|c| {
                if let Some(path) = grammar {
                    c.run.grammar_path = path;
                }
                if !benchmarks.is_empty() {
                    c.run.benchmarks = benchmarks;
                }
                if let (Some(target), Some(lower), Some(upper)) = (target, lower, upper) {
                    c.run.objectives.push(Objective::new("custom", target, lower, upper));
                }
                if let Some(runs) = runs {
                    c.run.runs = runs;
                }
                if seed.is_some() {
                    c.evolution.seed = seed;
                }
                if report.is_some() {
                    c.run.report_path = report;
                }
            })?;
            run_experiment(manager.into_inner())
        }
        Command::Decode {
            grammar,
            max_wraps,
            no_repair,
            codons,
        } => {
            let grammar = BnfConnector::load(&grammar)
                .with_context(|| format!("Failed to load grammar {}", grammar.display()))?;
            let mut mapper = GrammarMapper::new(Arc::new(grammar), max_wraps);
            if !no_repair {
                mapper = mapper.with_fallback(Box::new(ArithmeticRepair));
            }

            let derivation = mapper.derive(&codons);
            match &derivation.phenotype {
                Some(phenotype) => println!("Phenotype:    {}", phenotype),
                None => println!("Phenotype:    <invalid>"),
            }
            println!("Codons used:  {}", derivation.used_codons);
            println!("Wraps:        {}", derivation.wraps);
            println!("Repaired:     {}", derivation.repaired);
            Ok(())
        }
        Command::Benchmarks => {
            for benchmark in Benchmark::ALL {
                let objective = benchmark.objective();
                println!(
                    "{:<12} f(X) = {:<30} on [{}, {}]",
                    benchmark.name(),
                    objective.target,
                    objective.lower,
                    objective.upper
                );
            }
            Ok(())
        }
    }
}

fn run_experiment(config: AppConfig) -> anyhow::Result<()> {
    let grammar = BnfConnector::load(&config.run.grammar_path).with_context(|| {
        format!("Failed to load grammar {}", config.run.grammar_path.display())
    })?;
    let grammar = Arc::new(grammar);

    let objectives = resolve_objectives(&config.run.benchmarks, &config.run.objectives)?;

    let mut report = ExperimentReport::new(config.clone());

    for objective in objectives {
        log::info!("Objective {} ({} runs)", objective.name, config.run.runs);
        let mut records = Vec::with_capacity(config.run.runs);

        for run in 0..config.run.runs {
            let mut engine_config = EngineConfig::from(&config);
            // Distinct but reproducible seeds per run
            engine_config.evolution.seed = config.evolution.seed.map(|s| s.wrapping_add(run as u64));

            let evaluator = DerivativeFitness::new(objective.clone(), config.fitness.clone())?;
            let mapper = GrammarMapper::from_config(Arc::clone(&grammar), &config.genome);
            let mut engine = EvolutionEngine::new(engine_config, mapper, evaluator);

            let started = Instant::now();
            let population = engine.initialize_population();
            let outcome = engine.run(population, ConsoleProgressCallback::default())?;
            let record = RunRecord::from_outcome(&outcome, started.elapsed());

            log::info!(
                "Run {}/{}: best fitness {:.6}{}",
                run + 1,
                config.run.runs,
                record.best_fitness,
                match record.solution_generation {
                    Some(g) => format!(", solved in generation {}", g),
                    None => String::new(),
                }
            );
            records.push(record);
        }

        let summary = BenchmarkSummary::from_records(objective.name.as_str(), &records, &config.evolution);
        println!(
            "{:<12} SR {:.2}  MBF {:.6}  AES {}",
            summary.benchmark,
            summary.success_rate,
            summary.mean_best_fitness,
            summary
                .average_evaluations_to_solution
                .map(|a| format!("{:.1}", a))
                .unwrap_or_else(|| "-".to_string())
        );
        if let Some(solution) = &summary.solution {
            println!("{:<12} solution: {}", "", solution);
        }
        report.push(summary);
    }

    report.finish();
    if let Some(path) = &config.run.report_path {
        report.save(path)?;
    }
    Ok(())
}

use clap::{Parser, Subcommand};
use reflex_gamer::core::Policy;
use reflex_gamer::game::{Match, MatchClock, MatchScript, ScriptedMachine};
use reflex_gamer::player::ai::config::GamerConfig;
use reflex_gamer::player::{DecisionLog, ReflexGamer, TracingObserver};
use reflex_gamer::selfplay::{run_matches, MatchesConfig};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "reflex-gamer", about = "Reflex gamers: first legal move or uniform random")]
struct Args {
    /// Gamer config (JSON); falls back to gamer_config.json, then defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play one match against a recorded legal-move script
    Play {
        /// Match script (JSON: role + rounds of legal moves)
        #[arg(long)]
        script: PathBuf,

        /// Policy: legal | random
        #[arg(long)]
        policy: Option<Policy>,

        /// RNG seed (optional)
        #[arg(long)]
        seed: Option<u64>,

        /// Do not publish decision events
        #[arg(long)]
        silent: bool,
    },
    /// Run many independent matches in parallel and print selection statistics
    Selfplay {
        #[arg(long)]
        script: PathBuf,

        #[arg(long, default_value_t = 100)]
        matches: usize,

        /// Policy: legal | random (defaults to the config's policy)
        #[arg(long)]
        policy: Option<Policy>,

        /// Base seed; each match derives its own
        #[arg(long, default_value_t = 12345)]
        seed: u64,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => GamerConfig::load_from(path)?,
        None => GamerConfig::load_or_default(),
    };

    match args.command {
        Command::Play {
            script,
            policy,
            seed,
            silent,
        } => {
            config.gamer.policy = config.policy_or(policy);
            if seed.is_some() {
                config.gamer.seed = seed;
            }
            if silent {
                config.gamer.notify_observers = false;
            }
            play(&config, MatchScript::from_path(script)?)
        }
        Command::Selfplay {
            script,
            matches,
            policy,
            seed,
        } => {
            let stats = run_matches(&MatchesConfig {
                num_matches: matches,
                policy: config.policy_or(policy),
                base_seed: seed,
                clock: MatchClock::from(&config.clock),
                script: MatchScript::from_path(script)?,
            })?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
            Ok(())
        }
    }
}

fn play(config: &GamerConfig, script: MatchScript) -> anyhow::Result<()> {
    let log = Arc::new(DecisionLog::new());
    let mut gamer = ReflexGamer::from_config(config);
    gamer.register_observer(Arc::new(TracingObserver::new(config.display_name())));
    gamer.register_observer(log.clone());

    let game = Match::new(ScriptedMachine::new(script), MatchClock::from(&config.clock));
    let outcome = game.run(&mut gamer);

    for decision in log.decisions() {
        println!("{}", serde_json::to_string(&decision)?);
    }
    let outcome = outcome?;
    println!("{}", serde_json::to_string(&outcome)?);
    Ok(())
}

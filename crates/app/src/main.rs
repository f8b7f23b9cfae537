mod args;
mod drill;

use std::io;

use logicflow_core::QuestionFactory;
use logicflow_core::model::{AppSettingsDraft, ChapterGroup};
use services::{AppServices, Clock, Seeding};
use tracing_subscriber::EnvFilter;

use args::{Args, Command, DEFAULT_TOPIC, print_usage};

const DEFAULT_LOG_FILTER: &str = "logicflow_core=info,services=info,storage=info,app=info";

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(io::stderr)
        .init();
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let parsed = Args::parse(std::env::args().skip(1), |key| std::env::var(key).ok())
        .inspect_err(|e| {
            eprintln!("{e}");
            print_usage();
        })?;
    if parsed.help {
        print_usage();
        return Ok(());
    }

    if parsed.command == Command::Topics {
        print_topics();
        return Ok(());
    }

    let services = AppServices::open_json(&parsed.data, Clock::default())?;
    tracing::debug!(data = %parsed.data.display(), "storage opened");

    match parsed.command {
        Command::Practice => {
            let mut engine = services.session_engine()?;
            if let Some(format) = parsed.format {
                engine.set_format(format);
            }
            if let Some(seed) = parsed.seed {
                engine = engine.with_seeding(Seeding::Fixed(seed));
            }
            let topic = parsed.topic.unwrap_or(DEFAULT_TOPIC);
            println!("{} ({})", topic.title(), engine.format());
            engine.start(topic);
            drill::run(&mut engine, io::stdin().lock(), &mut io::stdout())?;
        }
        Command::Progress => {
            for progress in services.ledger().all()? {
                if !progress.is_started() {
                    continue;
                }
                println!(
                    "{:<28} {:>4}/{:<4} best {:>5.1}%  xp {}",
                    progress.topic().title(),
                    progress.correct_answers(),
                    progress.total_questions(),
                    progress.best_accuracy(),
                    progress.experience()
                );
            }
            let summary = services.ledger().summary()?;
            println!(
                "{} topics, {}/{} correct ({:.1}%), {} xp",
                summary.topics_started,
                summary.correct_answers,
                summary.total_questions,
                summary.accuracy,
                summary.experience
            );
        }
        Command::Reset => {
            services.ledger().reset(parsed.topic)?;
            match parsed.topic {
                Some(topic) => println!("Progress for {} cleared.", topic.title()),
                None => println!("All progress cleared."),
            }
        }
        Command::Settings => {
            let settings_service = services.app_settings();
            let current = settings_service.load()?;
            let settings = if parsed.format.is_some()
                || parsed.font_size.is_some()
                || parsed.dark_mode.is_some()
            {
                let base = AppSettingsDraft::from_settings(&current);
                settings_service.save(AppSettingsDraft {
                    question_format: parsed.format.or(base.question_format),
                    font_size: parsed.font_size.or(base.font_size),
                    dark_mode: parsed.dark_mode.or(base.dark_mode),
                })?
            } else {
                current
            };
            println!("question format: {}", settings.question_format());
            println!("font size:       {}", settings.font_size());
            println!("dark mode:       {}", if settings.dark_mode() { "on" } else { "off" });
        }
        Command::Topics => {}
    }
    Ok(())
}

fn print_topics() {
    let factory = QuestionFactory::standard();
    for group in ChapterGroup::ALL {
        println!("{}", group.title());
        for topic in group.topics() {
            let marker = if factory.has_generator(topic) { "" } else { " (unavailable)" };
            println!("  {:<24} {}{marker}", topic.id(), topic.title());
        }
    }
}

fn main() {
    init_tracing();
    if let Err(err) = run() {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}

pub mod output;
pub mod process;
pub mod punch;
pub mod report;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use report::RangeArgs;
use tracing::level_filters::LevelFilter;

use crate::{
    daemon::start_tracker,
    i18n::{parse_lang, texts, Lang},
    utils::{
        dir::create_application_default_path,
        logging::{enable_logging, TRACKER_PREFIX},
    },
};

#[derive(Parser, Debug)]
#[command(name = "Stechuhr", version)]
#[command(about = "Punch-clock for tracking working hours", long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Commands,
    #[arg(
        long,
        global = true,
        value_parser = parse_lang,
        default_value_t = Lang::De,
        help = "Language of messages and summaries, \"de\" or \"en\". Unsupported codes fall back to German"
    )]
    lang: Lang,
    #[arg(
        long,
        global = true,
        help = "Application directory. By default tries to save into $XDG_STATE_HOME or $HOME/.local/state"
    )]
    dir: Option<PathBuf>,
    #[arg(long, global = true, help = "Enable logging")]
    log: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(about = "Punch in and start the background tracker")]
    Arrive,
    #[command(about = "Punch out. The tracker keeps running until `stop`")]
    Leave,
    #[command(about = "Show the open session and the time worked today")]
    Status {
        #[arg(long, help = "Machine-readable output")]
        json: bool,
    },
    #[command(about = "Display accumulated working time per day")]
    Daily {
        #[command(flatten)]
        range: RangeArgs,
        #[arg(long, help = "Machine-readable output")]
        json: bool,
    },
    #[command(about = "Display accumulated working time per ISO week")]
    Weekly {
        #[command(flatten)]
        range: RangeArgs,
        #[arg(long, help = "Machine-readable output")]
        json: bool,
    },
    #[command(about = "Print the journal and its location")]
    Log {
        #[arg(long, help = "Only print the journal path")]
        path: bool,
    },
    #[command(
        about = "Run the tracker directly in the current console. Used for starting the tracker internally and for debugging"
    )]
    Serve,
    #[command(about = "Stop a running tracker")]
    Stop,
}

pub async fn run_cli() -> Result<()> {
    let args = Args::parse();

    let app_dir = args
        .dir
        .clone()
        .map_or_else(create_application_default_path, Ok)?;

    let logging_level = if args.log {
        Some(LevelFilter::TRACE)
    } else {
        None
    };
    // The tracker keeps rotated file logs; one-shot commands only log to the
    // console, and only when asked to.
    match &args.commands {
        Commands::Serve => enable_logging(
            TRACKER_PREFIX,
            Some(&app_dir.join("logs")),
            logging_level,
            args.log,
        )?,
        _ => enable_logging(TRACKER_PREFIX, None, logging_level, args.log)?,
    }

    let texts = texts(args.lang);

    match args.commands {
        Commands::Arrive => punch::process_arrive_command(&app_dir, texts).await,
        Commands::Leave => punch::process_leave_command(&app_dir, texts).await,
        Commands::Status { json } => report::process_status_command(&app_dir, texts, json).await,
        Commands::Daily { range, json } => {
            report::process_summary_command(
                &app_dir,
                output::summary::Bucketing::Daily,
                range,
                texts,
                json,
            )
            .await
        }
        Commands::Weekly { range, json } => {
            report::process_summary_command(
                &app_dir,
                output::summary::Bucketing::Weekly,
                range,
                texts,
                json,
            )
            .await
        }
        Commands::Log { path } => punch::process_log_command(&app_dir, texts, path).await,
        Commands::Serve => start_tracker(app_dir).await,
        Commands::Stop => punch::process_stop_command(),
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use crate::i18n::Lang;

    use super::Args;

    #[test]
    fn unsupported_lang_codes_fall_back_to_german() {
        let args = Args::try_parse_from(["stechuhr", "status", "--lang", "fr"]).unwrap();
        assert_eq!(args.lang, Lang::De);
    }

    #[test]
    fn supported_lang_codes_parse_as_themselves() {
        let args = Args::try_parse_from(["stechuhr", "status", "--lang", "en"]).unwrap();
        assert_eq!(args.lang, Lang::En);

        let args = Args::try_parse_from(["stechuhr", "status"]).unwrap();
        assert_eq!(args.lang, Lang::De);
    }
}

use anyhow::{self, Context};
use clap::Parser;
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::append::file::FileAppender;
use log4rs::append::Append;
use log4rs::config::{Appender, Config, Logger, Root};
use log4rs::encode::pattern::PatternEncoder;

use aotrans::interfaces::cli::{log_heading, Cli};
use aotrans::interfaces::input::Input;
use aotrans::interfaces::InputHandle;
use aotrans::io::{read_aotrans_yaml, write_aotrans_yaml};

const TEMPLATE_NAME: &str = "aotrans_template";

fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();

    let output_appender: Box<dyn Append> = if let Some(output) = cli.output.as_ref() {
        Box::new(
            FileAppender::builder()
                .encoder(Box::new(PatternEncoder::new("{m}{n}")))
                .append(false)
                .build(output)
                .with_context(|| format!("Unable to create the output file `{}`", output.display()))?,
        )
    } else {
        Box::new(
            ConsoleAppender::builder()
                .encoder(Box::new(PatternEncoder::new("{m}{n}")))
                .build(),
        )
    };
    let diagnostic_appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} {h({l:<5})} {t} - {m}{n}",
        )))
        .build();
    let log_config = Config::builder()
        .appender(Appender::builder().build("aotrans-output", output_appender))
        .appender(Appender::builder().build("diagnostic", Box::new(diagnostic_appender)))
        .logger(
            Logger::builder()
                .appender("aotrans-output")
                .additive(false)
                .build("aotrans-output", LevelFilter::Info),
        )
        .build(Root::builder().appender("diagnostic").build(if cli.debug {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        }))
        .with_context(|| "Unable to configure the loggers")?;
    log4rs::init_config(log_config).with_context(|| "Unable to initialise the loggers")?;

    log_heading();

    match cli.config.as_ref() {
        Some(config) => {
            let inp = read_aotrans_yaml::<Input, _>(config).with_context(|| {
                format!("Unable to read the configuration file `{}`", config.display())
            })?;
            inp.handle()
        }
        None => {
            write_aotrans_yaml(TEMPLATE_NAME, &Input::default())
                .with_context(|| "Unable to write a template configuration file")?;
            log::info!(
                target: "aotrans-output",
                "No configuration file given. A template has been written to {TEMPLATE_NAME}.yml."
            );
            Ok(())
        }
    }
}

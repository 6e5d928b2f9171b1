use clap::{ArgMatches, CommandFactory, FromArgMatches};

use pagetest::args::{Command, PageTestArgs, RunOptions};
use pagetest::config::{apply_config, load_config};
use pagetest::error::{AppError, AppResult, ValidationError};
use pagetest::report::{render_comparative, render_single};
use pagetest::runner::{CompareMode, PollPolicy, RunnerSettings, TestRunner};

pub(crate) fn run() -> AppResult<()> {
    let (mut args, matches) = parse_args()?;

    if let Some((_, sub_matches)) = matches.subcommand() {
        apply_file_config(args.command.options_mut(), sub_matches)?;
    }

    let options = args.command.options();
    crate::logger::init_logging(options.verbose, options.no_color);

    let Some(plan) = build_plan(args)? else {
        return Ok(());
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let output = runtime.block_on(execute_plan(plan))?;
    if !output.is_empty() {
        println!("{}", output.trim_end());
    }
    Ok(())
}

fn parse_args() -> AppResult<(PageTestArgs, ArgMatches)> {
    let matches = PageTestArgs::command().get_matches();
    let args = PageTestArgs::from_arg_matches(&matches)?;
    Ok((args, matches))
}

fn apply_file_config(options: &mut RunOptions, matches: &ArgMatches) -> AppResult<()> {
    if let Some(config) = load_config(options.config.as_deref())? {
        apply_config(options, matches, &config)?;
    }
    Ok(())
}

enum Target {
    Single(String),
    Compare(String, String),
}

struct RunPlan {
    settings: RunnerSettings,
    request_timeout: std::time::Duration,
    runs: i32,
    target: Target,
    options: RunOptions,
}

/// `None` when the run count leaves nothing to test.
fn build_plan(args: PageTestArgs) -> AppResult<Option<RunPlan>> {
    let (target, options) = match args.command {
        Command::Single(single) => (Target::Single(single.url), single.options),
        Command::Compare(compare) => {
            let count = compare.urls.len();
            let mut urls = compare.urls.into_iter();
            match (urls.next(), urls.next(), urls.next()) {
                (Some(first), Some(second), None) => {
                    (Target::Compare(first, second), compare.options)
                }
                _ => {
                    return Err(AppError::validation(
                        ValidationError::CompareUrlCount { count },
                    ));
                }
            }
        }
    };

    if options.runs < 1 {
        tracing::info!("Run count {} is below 1; nothing to test.", options.runs);
        return Ok(None);
    }

    let Some(api_key) = options.api_key.clone().filter(|key| !key.trim().is_empty()) else {
        tracing::error!("Missing API key (set --api-key, WPT_API_KEY, or api_key in config).");
        return Err(AppError::validation(ValidationError::MissingApiKey));
    };

    let mut settings = RunnerSettings::new(api_key);
    settings.endpoint.clone_from(&options.endpoint);
    settings.poll = PollPolicy {
        max_attempts: options.poll_attempts.as_non_zero(),
        interval: options.poll_interval,
    };
    settings.compare_mode = if options.concurrent {
        CompareMode::Concurrent
    } else {
        CompareMode::Sequential
    };

    Ok(Some(RunPlan {
        settings,
        request_timeout: options.request_timeout,
        runs: options.runs,
        target,
        options,
    }))
}

async fn execute_plan(plan: RunPlan) -> AppResult<String> {
    let runner = TestRunner::from_settings(plan.settings, plan.request_timeout)?;
    let format = plan.options.output_format;
    match plan.target {
        Target::Single(url) => {
            let records = runner.run_single_test(plan.runs, &url).await?;
            render_single(&records, format)
        }
        Target::Compare(first, second) => {
            let pairs = runner
                .run_comparative_test(plan.runs, &first, &second)
                .await?;
            render_comparative(&pairs, format)
        }
    }
}

use std::time::Duration;

use clap::{error::ErrorKind, Parser};
use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::Instant;
use tracing_subscriber::EnvFilter;

use crate::cli::args::CliArgs;
use crate::cli::validation;
use crate::config::{self, ConfigFile};
use crate::directory::{self, ClientOptions, DirectorySource, RandomUserClient};
use crate::engine::{self, debounce::DEFAULT_QUIESCENCE, Options, UserList};
use crate::filter::FilterScope;
use crate::output::{self, OutputFormat};
use crate::window::PageSize;

#[derive(Clone, Debug)]
struct RunConfig {
    client: ClientOptions,
    engine: Options,
    search: Option<String>,
    format: OutputFormat,
    once: bool,
    no_color: bool,
    log_filter: Option<String>,
}

fn verbosity_filter(verbose: u8) -> Option<String> {
    match verbose {
        0 => None,
        1 => Some("info".to_string()),
        _ => Some("debug".to_string()),
    }
}

fn build_run_config(args: CliArgs, cfg: ConfigFile) -> Result<RunConfig, String> {
    validation::validate(&args)?;

    let no_color = if args.color {
        false
    } else {
        args.no_color || cfg.no_color.unwrap_or(false)
    };

    let log_filter = args
        .log_level
        .or_else(|| verbosity_filter(args.verbose))
        .or(cfg.log_level);

    let api_url = args
        .api_url
        .or(cfg.api_url)
        .unwrap_or_else(|| directory::DEFAULT_API_URL.to_string());
    if reqwest::Url::parse(api_url.trim()).is_err() {
        return Err(format!("invalid api url '{api_url}'"));
    }
    let timeout_seconds = args
        .timeout
        .or(cfg.timeout)
        .unwrap_or(directory::DEFAULT_TIMEOUT_SECONDS);
    if timeout_seconds == 0 {
        return Err("invalid timeout, expected positive integer".to_string());
    }
    let proxy = args.proxy.or(cfg.proxy).filter(|p| !p.trim().is_empty());

    let seed = args
        .seed
        .or(cfg.seed)
        .unwrap_or_else(|| directory::DEFAULT_SEED.to_string());
    if seed.trim().is_empty() {
        return Err("invalid seed, expected a non-empty string".to_string());
    }

    let page_size = match args.page_size.or(cfg.page_size) {
        Some(n) => engine::parse_page_size(n).map_err(|e| format!("invalid page size: {e}"))?,
        None => PageSize::default(),
    };
    let scope = match args.scope.or(cfg.scope) {
        Some(raw) => engine::parse_scope(&raw).map_err(|e| format!("invalid scope: {e}"))?,
        None => FilterScope::default(),
    };
    let debounce_ms = args.debounce_ms.or(cfg.debounce_ms);
    if let Some(ms) = debounce_ms {
        if ms > validation::MAX_DEBOUNCE_MS {
            return Err(format!("invalid debounce-ms {ms}"));
        }
    }
    let debounce = debounce_ms
        .map(Duration::from_millis)
        .unwrap_or(DEFAULT_QUIESCENCE);

    let format_raw = args.format.or(cfg.format).unwrap_or_default();
    let format = if format_raw.trim().is_empty() {
        OutputFormat::default()
    } else {
        OutputFormat::parse(&format_raw)
            .ok_or_else(|| format!("invalid format '{format_raw}', expected text or json"))?
    };

    Ok(RunConfig {
        client: ClientOptions {
            api_url,
            timeout_seconds,
            proxy,
        },
        engine: Options {
            seed,
            page_size,
            scope,
            debounce,
        },
        search: args.search,
        format,
        once: args.once,
        no_color,
        log_filter,
    })
}

fn init_tracing(filter: Option<&str>) {
    let filter = match filter {
        Some(directive) => EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("warn")),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Command {
    Next,
    Prev,
    Scope(String),
    Size(String),
    Search,
    Help,
    Quit,
    Unknown(String),
    Type(String),
}

fn parse_command(line: &str) -> Command {
    let Some(rest) = line.trim().strip_prefix('/') else {
        return Command::Type(line.to_string());
    };
    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };
    match name.to_lowercase().as_str() {
        "next" | "n" | ">" => Command::Next,
        "prev" | "p" | "<" => Command::Prev,
        "scope" | "s" | "filter" => Command::Scope(arg.to_string()),
        "size" | "rows" => Command::Size(arg.to_string()),
        "search" | "go" | "" => Command::Search,
        "help" | "h" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        other => Command::Unknown(other.to_string()),
    }
}

fn print_help() {
    println!(":: type text to search (runs after a short pause)");
    println!(":: /search      run the search now");
    println!(":: /next /prev  move between pages");
    println!(":: /scope <s>   all, name, email, phone or location");
    println!(":: /size <n>    10, 20, 30, 50 or 100 rows (refetches)");
    println!(":: /quit        leave");
}

fn print_page<S: DirectorySource>(list: &UserList<S>, format: OutputFormat) {
    let rendered = output::render(&list.page(), format);
    print!("{}", String::from_utf8_lossy(&rendered));
}

fn print_notice(message: &str) {
    eprintln!("{} {}", "!!".bold().yellow(), message);
}

async fn wait_for(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => futures::future::pending::<()>().await,
    }
}

async fn browse<S: DirectorySource>(
    list: &mut UserList<S>,
    format: OutputFormat,
) -> Result<(), String> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    print_page(list, format);

    loop {
        let deadline = list.debounce_deadline();
        tokio::select! {
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(e) => return Err(format!("failed to read input: {e}")),
                };
                match parse_command(&line) {
                    Command::Quit => break,
                    Command::Help => {
                        print_help();
                        continue;
                    }
                    Command::Type(term) => {
                        list.set_search_term(term);
                        continue;
                    }
                    Command::Unknown(name) => {
                        print_notice(&format!("unknown command '/{name}', try /help"));
                        continue;
                    }
                    Command::Search => list.submit_search(),
                    Command::Next => list.advance(),
                    Command::Prev => list.retreat(),
                    Command::Scope(raw) => match engine::parse_scope(&raw) {
                        Ok(scope) => list.set_filter_scope(scope),
                        Err(e) => {
                            print_notice(&e.to_string());
                            continue;
                        }
                    },
                    Command::Size(raw) => {
                        let Ok(n) = raw.trim().parse::<u32>() else {
                            print_notice(&format!("invalid page size '{raw}'"));
                            continue;
                        };
                        if let Err(e) = list.set_page_size(n).await {
                            print_notice(&e.to_string());
                            continue;
                        }
                    }
                }
            }
            _ = wait_for(deadline) => {
                if !list.poll_debounce(Instant::now()) {
                    continue;
                }
            }
        }
        print_page(list, format);
    }
    Ok(())
}

async fn run_async(run: RunConfig) -> Result<(), String> {
    if run.no_color {
        colored::control::set_override(false);
    }

    let client = RandomUserClient::new(&run.client).map_err(|e| e.to_string())?;
    let mut list = UserList::new(client, run.engine.clone());

    if !list.load().await {
        print_notice("could not load users from the directory, see log output");
    }
    if let Some(term) = run.search {
        list.set_search_term(term);
        list.submit_search();
    }

    if run.once {
        print_page(&list, run.format);
        return Ok(());
    }
    browse(&mut list, run.format).await
}

pub fn run_cli() -> Result<(), String> {
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                print!("{e}");
                return Ok(());
            }
            _ => return Err(e.to_string()),
        },
    };

    let explicit_config = args.config.is_some();
    let config_path = args
        .config
        .as_deref()
        .map(config::expand_tilde)
        .or_else(config::default_config_path);

    if args.init_config {
        let path = config_path.ok_or_else(|| "could not determine config path".to_string())?;
        config::ensure_default_config_file(&path)?;
        println!(":: Config    : {}", path.display());
        return Ok(());
    }

    let cfg = match config_path.as_ref() {
        Some(path) => config::load_config(path, !explicit_config)?,
        None => ConfigFile::default(),
    };

    let run = build_run_config(args, cfg)?;
    init_tracing(run.log_filter.as_deref());

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to build runtime: {e}"))?;

    rt.block_on(run_async(run))
}

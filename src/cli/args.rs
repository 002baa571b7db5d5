use clap::{ArgAction, Parser};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "userlist",
    version,
    about = "searchable, paginated user directory browser",
    long_about = "userlist fetches a batch of synthetic users from a directory API and lets you search and page through it from the terminal.\n\nExamples:\n  userlist\n  userlist -n 50 --scope location\n  userlist -q smith --once --format json\n\nWhile browsing, type text to search (it runs after a short pause), or use /next, /prev, /scope <s>, /size <n>, /search, /help and /quit."
)]
pub struct CliArgs {
    #[arg(
        short = 'v',
        long = "vb",
        visible_alias = "verbose",
        action = ArgAction::Count,
        help_heading = "Output",
        help = "Increase log verbosity (-v, -vv)."
    )]
    pub verbose: u8,

    #[arg(
        long = "ll",
        visible_alias = "log-level",
        value_name = "FILTER",
        help_heading = "Output",
        help = "Log filter directive (e.g. warn, userlist=debug). Overrides -v."
    )]
    pub log_level: Option<String>,

    #[arg(
        short = 'c',
        long = "clr",
        visible_alias = "color",
        help_heading = "Output",
        help = "Enable colored output (overrides --no-color)."
    )]
    pub color: bool,

    #[arg(
        long = "nc",
        visible_alias = "no-color",
        help_heading = "Output",
        help = "Disable colored output."
    )]
    pub no_color: bool,

    #[arg(
        short = 'o',
        long = "fmt",
        visible_alias = "format",
        value_name = "FORMAT",
        help_heading = "Output",
        help = "Page rendering (text or json)."
    )]
    pub format: Option<String>,

    #[arg(
        long = "once",
        help_heading = "Output",
        help = "Print the first page and exit instead of browsing interactively."
    )]
    pub once: bool,

    #[arg(
        short = 'C',
        long = "cfg",
        visible_alias = "config",
        value_name = "FILE",
        help_heading = "Input",
        help = "Path to config file (defaults to ~/.userlist/config.yml)."
    )]
    pub config: Option<String>,

    #[arg(
        long = "init-config",
        help_heading = "Input",
        help = "Write a commented default config file (if missing) and exit."
    )]
    pub init_config: bool,

    #[arg(
        short = 'u',
        long = "api",
        visible_alias = "api-url",
        value_name = "URL",
        help_heading = "Directory",
        help = "User directory endpoint."
    )]
    pub api_url: Option<String>,

    #[arg(
        short = 's',
        long = "seed",
        value_name = "SEED",
        help_heading = "Directory",
        help = "Seed sent with every request so batches are reproducible."
    )]
    pub seed: Option<String>,

    #[arg(
        short = 't',
        long = "timeout",
        value_name = "SECONDS",
        help_heading = "Directory",
        help = "HTTP request timeout."
    )]
    pub timeout: Option<usize>,

    #[arg(
        short = 'p',
        long = "px",
        visible_alias = "proxy",
        value_name = "URL",
        help_heading = "Directory",
        help = "Route requests through a proxy."
    )]
    pub proxy: Option<String>,

    #[arg(
        short = 'n',
        long = "rpp",
        visible_aliases = ["page-size", "rows-per-page"],
        value_name = "N",
        help_heading = "Browsing",
        help = "Rows per page and batch size (10, 20, 30, 50 or 100)."
    )]
    pub page_size: Option<u32>,

    #[arg(
        short = 'f',
        long = "scope",
        visible_alias = "filter",
        value_name = "SCOPE",
        help_heading = "Browsing",
        help = "Fields searched (all, name, email, phone, location)."
    )]
    pub scope: Option<String>,

    #[arg(
        short = 'q',
        long = "search",
        visible_alias = "query",
        value_name = "TERM",
        help_heading = "Browsing",
        help = "Initial search term, applied right after the first fetch."
    )]
    pub search: Option<String>,

    #[arg(
        long = "dbm",
        visible_alias = "debounce-ms",
        value_name = "MS",
        help_heading = "Browsing",
        help = "Quiet time after typing before the search runs."
    )]
    pub debounce_ms: Option<u64>,
}

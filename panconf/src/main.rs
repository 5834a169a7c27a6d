use std::io::{self, Read};
use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Parser;
use panconf::{
    render, render_classification, OutputKind, PanConfig, ReleaseProfileTable, RenderOptions,
};
use panconf_core::{ForceList, JsonStyle};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod cli;

use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    run(cli)
}

fn init_tracing(verbosity: u8) {
    let default = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn run(cli: Cli) -> Result<()> {
    if !cli.wants_output() && !cli.classify && !cli.list_defaults {
        bail!("nothing to do: pass --xml, --json, --flat, --set, --classify, or --list-defaults");
    }

    let config = load_config(&cli.config)?;

    if cli.classify {
        println!("{}", render_classification(config.classification()));
    }

    let defaults = if cli.defaults || cli.list_defaults {
        let table = ReleaseProfileTable::load(cli.profiles_file.as_deref())
            .context("failed to load release profiles")?;
        info!(source = table.source(), "using release profiles");
        Some(config.default_paths(&table)?.to_vec())
    } else {
        None
    };

    if cli.list_defaults {
        for path in defaults.iter().flatten() {
            println!("{path}");
        }
    }

    if !cli.wants_output() {
        return Ok(());
    }

    let nodes = match (&defaults, cli.defaults) {
        (Some(paths), true) => config.select_all(paths.as_slice())?,
        _ => config.select(cli.xpath.as_deref())?,
    };
    if nodes.is_empty() {
        warn!(
            query = cli.xpath.as_deref().unwrap_or("<defaults>"),
            "query matched no nodes"
        );
        return Ok(());
    }

    let opts = render_options(&cli);
    for kind in requested_kinds(&cli) {
        let text = render(&nodes, kind, &opts)
            .with_context(|| format!("failed to render {kind:?} output"))?;
        if !text.is_empty() {
            println!("{text}");
        }
    }

    Ok(())
}

fn load_config(path: &Path) -> Result<PanConfig> {
    if path == Path::new("-") {
        let mut buf = Vec::new();
        io::stdin()
            .read_to_end(&mut buf)
            .context("failed to read configuration from stdin")?;
        return PanConfig::from_bytes(&buf).context("failed to parse configuration from stdin");
    }

    PanConfig::from_file(path).with_context(|| format!("failed to parse {}", path.display()))
}

fn render_options(cli: &Cli) -> RenderOptions {
    RenderOptions {
        json_style: if cli.compact {
            JsonStyle::Compact
        } else {
            JsonStyle::Pretty
        },
        flat_prefix: cli.flat_prefix.clone(),
        set_prefix: cli.prefix.clone(),
        collapse_members: cli.mlist,
        forcelist: if cli.forcelist.is_empty() {
            ForceList::default()
        } else {
            ForceList::new(cli.forcelist.iter().cloned())
        },
    }
}

fn requested_kinds(cli: &Cli) -> Vec<OutputKind> {
    [
        (cli.xml, OutputKind::Xml),
        (cli.json, OutputKind::Json),
        (cli.flat, OutputKind::Flat),
        (cli.set, OutputKind::SetCli),
    ]
    .into_iter()
    .filter_map(|(wanted, kind)| wanted.then_some(kind))
    .collect()
}

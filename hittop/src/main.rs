//! Entry point for the hittop TUI. Parses args, resolves a profile and runs the App.

use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Context;
use hittop::api::MetricsClient;
use hittop::app::App;
use hittop::config::DashboardConfig;
use hittop::credentials::{FileStore, TokenStore};
use hittop::dashboard::{Dashboard, Surface};
use hittop::demo::DemoSource;
use hittop::profiles::{
    config_dir, load_profiles, save_profiles, ProfileEntry, ProfileRequest, ResolveProfile,
};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "[--profile NAME|-P NAME] [--site ID|-s ID] [--interval MS|-i MS] \
[--storage PATH] [--save] [--demo] [--dry-run] [https://HOST/api]";
const DEMO_REFRESH_MS: u64 = 2_000;

#[derive(Debug, Default)]
struct ParsedArgs {
    endpoint: Option<String>,
    profile: Option<String>,
    site: Option<String>,
    interval_ms: Option<u64>,
    storage: Option<String>,
    save: bool,
    demo: bool,
    dry_run: bool,
}

fn parse_interval(v: &str, prog: &str) -> Result<u64, String> {
    v.parse::<u64>().map_err(|_| {
        format!("Invalid --interval '{v}' (milliseconds expected). Usage: {prog} {USAGE}")
    })
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<ParsedArgs, String> {
    let mut it = args.into_iter();
    let prog = it.next().unwrap_or_else(|| "hittop".into());
    let mut out = ParsedArgs::default();

    while let Some(arg) = it.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                return Err(format!("Usage: {prog} {USAGE}"));
            }
            "--profile" | "-P" => {
                out.profile = it.next();
            }
            "--site" | "-s" => {
                out.site = it.next();
            }
            "--interval" | "-i" => {
                let v = it.next().unwrap_or_default();
                out.interval_ms = Some(parse_interval(&v, &prog)?);
            }
            "--storage" => {
                out.storage = it.next();
            }
            "--save" => {
                out.save = true;
            }
            "--demo" => {
                out.demo = true;
            }
            "--dry-run" => {
                out.dry_run = true;
            }
            _ if arg.contains('=') && arg.starts_with("--") => {
                let Some((k, v)) = arg.split_once('=') else { continue };
                if v.is_empty() {
                    continue;
                }
                match k {
                    "--profile" => out.profile = Some(v.to_string()),
                    "--site" => out.site = Some(v.to_string()),
                    "--interval" => out.interval_ms = Some(parse_interval(v, &prog)?),
                    "--storage" => out.storage = Some(v.to_string()),
                    _ => return Err(format!("Unknown option '{k}'. Usage: {prog} {USAGE}")),
                }
            }
            _ => {
                if out.endpoint.is_none() {
                    out.endpoint = Some(arg);
                } else {
                    return Err(format!("Unexpected argument. Usage: {prog} {USAGE}"));
                }
            }
        }
    }
    Ok(out)
}

// The terminal belongs to the TUI, so logs go to a file in the config dir
fn init_logging() {
    let dir = config_dir();
    if std::fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("hittop.log"))
    else {
        return;
    };
    let filter = EnvFilter::try_from_env("HITTOP_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let parsed = match parse_args(env::args()) {
        Ok(v) => v,
        Err(msg) => {
            eprintln!("{msg}");
            return Ok(());
        }
    };

    init_logging();

    // Demo mode short-circuit (ignore other args except --interval and --dry-run)
    if parsed.demo || matches!(parsed.profile.as_deref(), Some("demo")) {
        let period = demo_period(parsed.interval_ms);
        if parsed.dry_run {
            print_demo_config(period);
            return Ok(());
        }
        return run_demo_mode(period).await;
    }

    let profiles_file = load_profiles();
    let req = ProfileRequest {
        profile_name: parsed.profile.clone(),
        api_endpoint: parsed.endpoint.clone(),
        website_id: parsed.site.clone(),
        refresh_interval_ms: parsed.interval_ms,
    };
    let resolved = req.resolve(&profiles_file);

    // Determine final entry (and maybe mutated profiles to persist)
    let mut profiles_mut = profiles_file.clone();
    let entry: ProfileEntry = match resolved {
        ResolveProfile::Direct(e) => {
            if let Some(name) = parsed.profile.as_ref() {
                match profiles_mut.profiles.get(name) {
                    None => {
                        // New profile: auto-save immediately
                        profiles_mut.profiles.insert(name.clone(), e.clone());
                        save_or_warn(&profiles_mut);
                    }
                    Some(existing) => {
                        if *existing != e {
                            let overwrite = parsed.save
                                || prompt_yes_no(&format!(
                                    "Overwrite existing profile '{name}'? [y/N]: "
                                ));
                            if overwrite {
                                profiles_mut.profiles.insert(name.clone(), e.clone());
                                save_or_warn(&profiles_mut);
                            }
                        }
                    }
                }
            }
            e
        }
        ResolveProfile::Loaded(e) => e,
        ResolveProfile::PromptSelect(mut names) => {
            // Always add demo option to list
            if !names.iter().any(|n| n == "demo") {
                names.push("demo".into());
            }
            eprintln!("Select profile:");
            for (i, n) in names.iter().enumerate() {
                eprintln!("  {}. {}", i + 1, n);
            }
            let line = prompt_string("Enter number (or blank to abort): ")?;
            let Some(name) = line
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|idx| *idx >= 1 && *idx <= names.len())
                .map(|idx| names[idx - 1].clone())
            else {
                return Ok(());
            };
            if name == "demo" {
                let period = demo_period(parsed.interval_ms);
                if parsed.dry_run {
                    print_demo_config(period);
                    return Ok(());
                }
                return run_demo_mode(period).await;
            }
            match profiles_mut.profiles.get(&name) {
                Some(e) => e.clone(),
                None => return Ok(()),
            }
        }
        ResolveProfile::PromptCreate(name) => {
            eprintln!("Profile '{name}' does not exist yet.");
            let endpoint = prompt_string("Enter API endpoint (https://HOST/api): ")?;
            if endpoint.trim().is_empty() {
                return Ok(());
            }
            let site = match parsed.site.clone() {
                Some(s) => s,
                None => prompt_string("Enter website id: ")?.trim().to_string(),
            };
            let e = ProfileEntry {
                api_endpoint: endpoint.trim().to_string(),
                website_id: site,
                refresh_interval_ms: parsed.interval_ms,
                panels: None,
            };
            profiles_mut.profiles.insert(name.clone(), e.clone());
            save_or_warn(&profiles_mut);
            e
        }
        ResolveProfile::MissingWebsiteId => {
            eprintln!(
                "An API endpoint needs a website id: pass --site ID (or use a saved --profile)."
            );
            return Ok(());
        }
        ResolveProfile::None => {
            eprintln!("No API endpoint provided and no profiles to select.");
            return Ok(());
        }
    };

    let config =
        DashboardConfig::from_profile(&entry).context("invalid dashboard configuration")?;
    let storage = parsed
        .storage
        .map(|p| FileStore::new(PathBuf::from(p)))
        .unwrap_or_default();

    if parsed.dry_run {
        print_config(&config, &storage);
        return Ok(());
    }

    let surface = match &config.panels {
        Some(panels) => Surface::with_panels(panels),
        None => Surface::standard(),
    };
    let dashboard = Dashboard::new(surface).context("cannot build dashboard")?;
    let tokens: Arc<dyn TokenStore> = Arc::new(storage);
    let client = MetricsClient::new(&config.api_endpoint, &config.website_id, tokens)
        .context("cannot create HTTP client")?;
    tracing::info!(url = client.url(), "starting dashboard");

    let mut app = App::new(dashboard, config.refresh_interval, &config.website_id);
    app.run(&client).await
}

fn print_config(config: &DashboardConfig, storage: &FileStore) {
    println!("endpoint:  {}", config.api_endpoint);
    println!("website:   {}", config.website_id);
    println!("refresh:   {}ms", config.refresh_interval.as_millis());
    println!(
        "metrics:   {}",
        hittop::api::metrics_url(&config.api_endpoint, &config.website_id)
    );
    println!("storage:   {}", storage.path().display());
    if let Some(panels) = &config.panels {
        println!("panels:    {}", panels.join(", "));
    }
}

fn print_demo_config(period: Duration) {
    println!("endpoint:  (in-process demo source)");
    println!("website:   demo");
    println!("refresh:   {}ms", period.as_millis());
}

fn save_or_warn(p: &hittop::profiles::ProfilesFile) {
    if let Err(e) = save_profiles(p) {
        eprintln!("warning: could not save profiles: {e}");
    }
}

fn prompt_yes_no(prompt: &str) -> bool {
    eprint!("{prompt}");
    let _ = io::stderr().flush();
    let mut line = String::new();
    if io::stdin().read_line(&mut line).is_ok() {
        matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

fn prompt_string(prompt: &str) -> io::Result<String> {
    eprint!("{prompt}");
    let _ = io::stderr().flush();
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line)
}

// --- Demo Mode ---

fn demo_period(interval_ms: Option<u64>) -> Duration {
    Duration::from_millis(interval_ms.unwrap_or(DEMO_REFRESH_MS).max(1))
}

async fn run_demo_mode(period: Duration) -> anyhow::Result<()> {
    let dashboard = Dashboard::new(Surface::standard())?;
    let source = DemoSource::new();
    let mut app = App::new(dashboard, period, "demo");
    tokio::select! {
        res = app.run(&source) => res,
        _ = tokio::signal::ctrl_c() => Ok(()),
    }
}

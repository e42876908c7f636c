//! `SkyView` command line front end
//!
//! One operation per run: resolve a location (device position, search
//! query, or saved name), fetch its weather, and render it to stdout.
//! Logs go to stderr so the rendered output stays pipeable.

use anyhow::Result;
use skyview::{
    conditions, ForecastSeries, IpApiLocator, Language, LocationStore, Notice, OpenMeteoClient,
    SearchOutcome, SkyviewConfig, Translations, ViewState, WeatherApp, WeatherSnapshot,
};
use std::env;
use std::io::{self, Write as _};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type App = WeatherApp<OpenMeteoClient, IpApiLocator>;

/// One parsed invocation
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Current,
    Search(String),
    List,
    Save(String),
    Remove(String),
    Saved(String),
    Help,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "skyview=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let (command, language) = match parse_args(&args) {
        Ok(parsed) => parsed,
        Err(message) => {
            eprintln!("{message}");
            eprintln!();
            print_usage();
            std::process::exit(2);
        }
    };

    if command == Command::Help {
        print_usage();
        return Ok(());
    }

    let config = SkyviewConfig::load()?;
    let language = language.unwrap_or(config.app.language);

    let store = LocationStore::open(config.storage_dir()?);
    let provider = OpenMeteoClient::new(&config)?;
    let geolocator = IpApiLocator::new(&config)?;
    let mut app = WeatherApp::new(provider, geolocator, store, language);

    match command {
        Command::Help => print_usage(),
        Command::List => render_saved_list(&app),
        Command::Remove(name) => {
            let notice = app.remove_saved(&name);
            print_notice(&notice);
        }
        Command::Current => {
            app.use_current_location().await;
            finish(&app);
        }
        Command::Search(query) => {
            let outcome = app.search(&query).await;
            resolve_candidates(&mut app, outcome).await?;
            finish(&app);
        }
        Command::Saved(name) => {
            let outcome = app.load_saved(&name).await;
            resolve_candidates(&mut app, outcome).await?;
            finish(&app);
        }
        Command::Save(query) => {
            let outcome = app.search(&query).await;
            resolve_candidates(&mut app, outcome).await?;
            if *app.state() == ViewState::Loaded {
                if let Some(notice) = app.save_active() {
                    print_notice(&notice);
                }
            }
            finish(&app);
        }
    }

    Ok(())
}

/// Split the invocation into a command and an optional language
/// override. `--lang` may appear anywhere; everything else is
/// positional.
fn parse_args(args: &[String]) -> Result<(Command, Option<Language>), String> {
    let mut language = None;
    let mut rest: Vec<&str> = Vec::new();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        if arg == "--lang" {
            let tag = iter
                .next()
                .ok_or_else(|| "--lang needs a value (en, zh)".to_string())?;
            language = Some(
                Language::from_tag(tag)
                    .ok_or_else(|| format!("Unknown language '{tag}' (expected en or zh)"))?,
            );
        } else {
            rest.push(arg.as_str());
        }
    }

    let command = match rest.split_first() {
        None => Command::Current,
        Some((&first, tail)) => match first {
            "--help" | "-h" => Command::Help,
            "--list" => Command::List,
            "--save" => Command::Save(join_words(tail, "--save <query>...")?),
            "--remove" => Command::Remove(join_words(tail, "--remove <name>")?),
            "--saved" => Command::Saved(join_words(tail, "--saved <name>")?),
            flag if flag.starts_with("--") => return Err(format!("Unknown option '{flag}'")),
            _ => Command::Search(rest.join(" ")),
        },
    };

    Ok((command, language))
}

fn join_words(words: &[&str], usage: &str) -> Result<String, String> {
    if words.is_empty() {
        return Err(format!("Missing argument: {usage}"));
    }
    Ok(words.join(" "))
}

fn print_usage() {
    println!("SkyView - weather in your terminal");
    println!();
    println!("Usage:");
    println!("  skyview                    weather for the current location");
    println!("  skyview <query>...         search a location and show its weather");
    println!("  skyview --list             print saved locations");
    println!("  skyview --save <query>...  fetch a location, then save it");
    println!("  skyview --remove <name>    remove a saved location");
    println!("  skyview --saved <name>     weather for a saved location");
    println!();
    println!("Options:");
    println!("  --lang <en|zh>             display language for this run");
    println!("  --help                     show this help");
}

/// When a search surfaced several candidates, list them and let the
/// user pick one by number. Anything that does not parse as a listed
/// number dismisses the list.
async fn resolve_candidates(app: &mut App, outcome: SearchOutcome) -> Result<()> {
    if outcome != SearchOutcome::Candidates {
        return Ok(());
    }

    println!("{}:", app.translations().select_location);
    for (i, record) in app.candidates().iter().enumerate() {
        println!("  {}. {}", i + 1, record.name);
    }
    print!("> ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    let choice = line.trim().parse::<usize>().ok().and_then(|n| n.checked_sub(1));

    if let Some(index) = choice {
        app.select_candidate(index).await;
    }

    Ok(())
}

/// Render the final view state: weather card on success, localized
/// notice on stderr (exit 1) on failure.
fn finish(app: &App) {
    match app.state() {
        ViewState::Error(message) => {
            eprintln!("{message}");
            std::process::exit(1);
        }
        ViewState::Loaded => {
            if let (Some(snapshot), Some(forecast)) = (app.snapshot(), app.forecast()) {
                render_weather(snapshot, forecast, app.translations());
            }
        }
        _ => {
            println!("{}", app.translations().empty_state_message);
        }
    }
}

fn render_weather(snapshot: &WeatherSnapshot, forecast: &ForecastSeries, t: &Translations) {
    println!();
    println!("  {}", snapshot.name);
    println!("  {}", snapshot.description);
    println!();
    println!(
        "  {:.0}°C  ({} {:.0}°C)",
        snapshot.temperature, t.feels_like, snapshot.feels_like
    );
    println!("  {}: {}%", t.humidity, snapshot.humidity);
    println!("  {}: {:.1} {}", t.wind, snapshot.wind_speed, t.wind_unit);
    if let (Some(sunrise), Some(sunset)) = (snapshot.sunrise, snapshot.sunset) {
        println!(
            "  {}: {}  {}: {}",
            t.sunrise,
            sunrise.format("%H:%M"),
            t.sunset,
            sunset.format("%H:%M")
        );
    }
    println!("  {}", conditions::icon_url(&snapshot.icon, 2));

    let hourly = forecast.first_hours(24);
    if !hourly.is_empty() {
        println!();
        println!("  {}", t.hourly_forecast);
        for point in hourly {
            println!(
                "    {}  {:>5.1}°C  {}",
                point.timestamp.format("%H:%M"),
                point.temperature,
                point.description
            );
        }
    }

    // Daily rows are 8-hour samples over the hourly series, not the
    // daily block.
    let daily = forecast.sampled(8, 5);
    if !daily.is_empty() {
        println!();
        println!("  {}", t.daily_forecast);
        for point in daily {
            println!(
                "    {}  {:>5.1}°C  {}",
                point.timestamp.format("%m-%d %H:%M"),
                point.temperature,
                point.description
            );
        }
    }
    println!();
}

fn render_saved_list(app: &App) {
    let t = app.translations();
    if app.saved_names().is_empty() {
        println!("{}", t.no_saved_locations);
        println!("{}", t.no_saved_locations_desc);
        return;
    }

    println!("{}:", t.saved_locations);
    for name in app.saved_names() {
        println!("  - {name}");
    }
}

fn print_notice(notice: &Notice) {
    println!("{}: {}", notice.title, notice.detail);
}

use serde::Serialize;

use crate::config::DashboardConfig;
use crate::plants::{PlantDataset, PlantSettings, PlantSources, PlantSummary};
use crate::server::{self, AppState};
use crate::trends::{TrendsDataset, TrendsFilter, TrendsSettings, TrendsSources, TrendsSummary};

const USAGE: &str = "usage: geodash <serve|check|trends <year>|plants [fuel|ALL] [from] [to]>";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Serve,
    Check,
    Trends,
    Plants,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("serve") => Some(Command::Serve),
        Some("check") => Some(Command::Check),
        Some("trends") => Some(Command::Trends),
        Some("plants") => Some(Command::Plants),
        _ => None,
    }
}

/// Runs one command and returns the process exit code: 0 on success, 1 on
/// a load or runtime failure, 2 on bad usage.
pub fn run_with_args(args: &[String]) -> i32 {
    let Some(command) = parse_command(args) else {
        eprintln!("{USAGE}");
        return 2;
    };
    let config = match DashboardConfig::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return 1;
        }
    };
    match command {
        Command::Serve => handle_serve(config),
        Command::Check => handle_check(config),
        Command::Trends => handle_trends(args, &config),
        Command::Plants => handle_plants(args, &config),
    }
}

fn handle_serve(config: DashboardConfig) -> i32 {
    let state = match AppState::load(config) {
        Ok(state) => state,
        Err(err) => {
            eprintln!("load failed: {err}");
            return 1;
        }
    };
    match server::run_server(state) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("server error: {err}");
            1
        }
    }
}

#[derive(Debug, Serialize)]
struct CheckReport {
    status: &'static str,
    data_dir: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    trends: Option<TrendsSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    plants: Option<PlantSummary>,
}

fn handle_check(config: DashboardConfig) -> i32 {
    let data_dir = config.data_dir.display().to_string();
    let state = match AppState::load(config) {
        Ok(state) => state,
        Err(err) => {
            eprintln!("check failed: {err}");
            return 1;
        }
    };
    let report = CheckReport {
        status: "ok",
        data_dir,
        trends: state.trends.as_ref().map(TrendsDataset::summary),
        plants: state.plants.as_ref().map(PlantDataset::summary),
    };
    print_json(&report, "check report")
}

fn handle_trends(args: &[String], config: &DashboardConfig) -> i32 {
    let Some(raw_year) = args.get(2) else {
        eprintln!("usage: geodash trends <year>");
        return 2;
    };
    let Ok(year) = raw_year.trim().parse::<i32>() else {
        eprintln!("invalid year '{raw_year}'");
        return 2;
    };
    if !config.years.contains(year) {
        eprintln!(
            "year {year} is outside {}..={}",
            config.years.min, config.years.max
        );
        return 2;
    }
    if !config.trends_enabled {
        eprintln!("the trends dashboard is disabled");
        return 1;
    }
    let sources = TrendsSources::in_dir(&config.data_dir);
    match TrendsDataset::load(&sources, TrendsSettings::from(config)) {
        Ok(dataset) => print_json(&dataset.on_filter_changed(&TrendsFilter { year }), "trends view"),
        Err(err) => {
            eprintln!("load failed: {err}");
            1
        }
    }
}

fn handle_plants(args: &[String], config: &DashboardConfig) -> i32 {
    let fuel = args
        .get(2)
        .map(|f| f.trim())
        .filter(|f| !f.is_empty() && !f.eq_ignore_ascii_case("all"))
        .map(str::to_string);
    let from = match parse_year_arg(args.get(3), "from") {
        Ok(year) => year,
        Err(code) => return code,
    };
    let to = match parse_year_arg(args.get(4), "to") {
        Ok(year) => year,
        Err(code) => return code,
    };
    if !config.plants_enabled {
        eprintln!("the plants dashboard is disabled");
        return 1;
    }

    let sources = PlantSources::in_dir(&config.data_dir);
    let dataset = match PlantDataset::load(&sources, PlantSettings::from(config)) {
        Ok(dataset) => dataset,
        Err(err) => {
            eprintln!("load failed: {err}");
            return 1;
        }
    };
    let extent = dataset.year_extent();
    let filter = dataset
        .default_filter()
        .with_fuel(fuel)
        .with_years(from.unwrap_or(extent.from), to.unwrap_or(extent.to));
    print_json(&dataset.on_filter_changed(&filter), "plant view")
}

fn parse_year_arg(raw: Option<&String>, name: &str) -> Result<Option<i32>, i32> {
    match raw {
        None => Ok(None),
        Some(value) => value.trim().parse::<i32>().map(Some).map_err(|_| {
            eprintln!("invalid {name} year '{value}'");
            2
        }),
    }
}

fn print_json<T: Serialize>(value: &T, what: &str) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(payload) => {
            println!("{payload}");
            0
        }
        Err(err) => {
            eprintln!("failed to serialize {what}: {err}");
            1
        }
    }
}

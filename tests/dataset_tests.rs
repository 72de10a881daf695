mod common;

use std::fs;
use std::path::Path;

use geodash::config::YearBounds;
use geodash::data::series::Indicator;
use geodash::data::table::parse_csv_table;
use geodash::error::LoadError;
use geodash::plants::{PlantDataset, PlantSettings, PlantSources};
use geodash::trends::{
    CountrySource, Playback, TrendsDataset, TrendsFilter, TrendsSettings, TrendsSources,
};

#[test]
fn trends_dataset_loads_from_the_data_dir() {
    let dir = common::fixture_data_dir("dataset-trends");
    let data = TrendsDataset::load(&TrendsSources::in_dir(&dir), TrendsSettings::default())
        .expect("fixture should load");

    assert_eq!(data.countries().len(), 4);
    assert_eq!(data.series(Indicator::Gdp).len(), 4);
    assert_eq!(data.series(Indicator::Gdp).value("USA", 2001), None);
    assert_eq!(data.series(Indicator::LifeExpectancy).value("BIH", 2001), Some(74.5));

    let summary = data.summary();
    assert_eq!(summary.country_source, CountrySource::Metadata);
    assert_eq!(summary.year_extent, Some((1999, 2001)));
}

#[test]
fn out_of_range_filter_year_is_clamped() {
    let dir = common::fixture_data_dir("dataset-clamp");
    let settings = TrendsSettings {
        years: YearBounds::new(1990, 2001),
        ..TrendsSettings::default()
    };
    let data = TrendsDataset::load(&TrendsSources::in_dir(&dir), settings).expect("fixture should load");
    let view = data.on_filter_changed(&TrendsFilter { year: 2050 });
    assert_eq!(view.year, 2001);
    assert_eq!(view.points.len(), 2);
}

#[test]
fn empty_metadata_falls_back_to_map_features() {
    let dir = common::fixture_data_dir("dataset-fallback");
    fs::write(
        dir.join("ISO-3166-Countries-with-Regional-Codes.csv"),
        "name,alpha-2,alpha-3,country-code,region,sub-region\n",
    )
    .expect("metadata should be writable");

    let data = TrendsDataset::load(&TrendsSources::in_dir(&dir), TrendsSettings::default())
        .expect("features should stand in for metadata");
    assert_eq!(data.summary().country_source, CountrySource::Features);
    assert!(data.country_table().get("USA").is_some());
}

#[test]
fn unreadable_series_file_names_its_path() {
    let dir = common::fixture_data_dir("dataset-missing");
    fs::remove_file(dir.join("pop.csv")).expect("fixture file should exist");
    let err = TrendsDataset::load(&TrendsSources::in_dir(&dir), TrendsSettings::default())
        .expect_err("missing population file should fail");
    assert!(matches!(err, LoadError::Read { .. }));
    assert!(err.path().ends_with("pop.csv"));
}

#[test]
fn plant_dataset_loads_and_reports_extent() {
    let dir = common::fixture_data_dir("dataset-plants");
    let data = PlantDataset::load(&PlantSources::in_dir(&dir), PlantSettings::default())
        .expect("fixture should load");
    assert_eq!(data.plants().len(), 6);
    assert_eq!((data.year_extent().from, data.year_extent().to), (1942, 2010));
    assert_eq!(&data.fuel_domain()[..2], ["Gas", "Coal"].map(String::from));
    assert!(data.fuel_domain().contains(&"Wave and Tidal".to_string()));
}

#[test]
fn plant_file_without_rows_is_empty() {
    let dir = common::fixture_data_dir("dataset-no-plants");
    fs::write(
        dir.join("global_power_plant_database.csv"),
        "country,country_long,name,capacity_mw,latitude,longitude,primary_fuel,commissioning_year\n",
    )
    .expect("plants should be writable");
    let err = PlantDataset::load(&PlantSources::in_dir(&dir), PlantSettings::default())
        .expect_err("empty plant file should fail");
    assert!(matches!(err, LoadError::Empty { .. }));
}

#[test]
fn extra_wide_tables_reshape_against_the_loaded_countries() {
    let dir = common::fixture_data_dir("dataset-reshape");
    let data = TrendsDataset::load(&TrendsSources::in_dir(&dir), TrendsSettings::default())
        .expect("fixture should load");
    let raw = "country,1990,2000,notes\nJapan,1.5,,x\nBosnia and Herzegovina,2,3,\nNarnia,4,5,\n";
    let table = parse_csv_table(raw.as_bytes(), Path::new("co2.csv")).expect("csv should parse");

    let (series, report) = data.reshape(&table);
    assert_eq!(report.rows_total, 3);
    assert_eq!(report.rows_unresolved, 1);
    assert_eq!(report.year_columns, 2);
    assert_eq!(series.value("JPN", 1990), Some(1.5));
    assert_eq!(series.value("JPN", 2000), None);
    assert_eq!(series.value("BIH", 2000), Some(3.0));
}

#[test]
fn playback_scrubs_and_stops_within_the_dataset_bounds() {
    let dir = common::fixture_data_dir("dataset-playback");
    let settings = TrendsSettings {
        years: YearBounds::new(1999, 2001),
        ..TrendsSettings::default()
    };
    let data = TrendsDataset::load(&TrendsSources::in_dir(&dir), settings).expect("fixture should load");
    let bounds = data.settings().years;

    let playing = Playback::new(bounds.min).toggle();
    let scrubbed = playing.scrub(0.5, bounds);
    assert_eq!(scrubbed.year, 2000);
    assert_eq!(scrubbed.ratio(bounds), 0.5);
    assert_eq!(playing.scrub(7.0, bounds).year, 2001);

    let stopped = scrubbed.stop();
    assert!(!stopped.playing);
    assert_eq!(stopped.tick(bounds), stopped);

    let view = data.on_filter_changed(&TrendsFilter { year: scrubbed.year });
    assert_eq!(view.year, 2000);
    assert_eq!(view.points.len(), 2);
}

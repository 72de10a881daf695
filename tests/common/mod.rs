#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

pub const METADATA_CSV: &str = "\
name,alpha-2,alpha-3,country-code,region,sub-region
France,FR,FRA,250,Europe,Western Europe
United States of America,US,USA,840,Americas,Northern America
Bosnia and Herzegovina,BA,BIH,070,Europe,Southern Europe
Japan,JP,JPN,392,Asia,Eastern Asia
";

pub const GDP_CSV: &str = "\
geo,name,1999,2000,2001
fra,France,25000,26000,27000
usa,USA,35000,36000,
bih,Bosnia and Herzegovina,4000,,4200
,Atlantis,1,2,3
jpn,Japan,30000,31000,32000
";

pub const LEX_CSV: &str = "\
country,2000,2001
France,79,79.5
United States of America,77,77.2
Bosnia and Herzegovina,74,74.5
";

pub const POP_CSV: &str = "\
iso3,2000,2001
FRA,60000000,60500000
USA,282000000,285000000
BIH,3800000,3790000
JPN,127000000,127100000
";

pub const PLANTS_CSV: &str = "\
country,country_long,name,capacity_mw,latitude,longitude,primary_fuel,commissioning_year
FRA,France,Paluel,5320,49.86,0.63,Nuclear,1985
FRA,France,Rance,240,48.62,-2.02,Hydro,1966
USA,United States of America,Grand Coulee,6809,47.96,-118.98,Hydro,1942
USA,United States of America,Scherer,3520,33.06,-83.8,Coal,1982.5
USA,United States of America,Undated,50,40,-100,Gas,
XXK,Atlantis,Sunken,10,0,0,Wave and Tidal,2010
";

pub const WORLD_TOPOLOGY: &str = r#"{
  "type": "Topology",
  "arcs": [
    [[0, 44], [4, 44], [4, 48], [0, 48], [0, 44]],
    [[-100, 35], [-90, 35], [-90, 45], [-100, 45], [-100, 35]],
    [[17, 43], [19, 43], [19, 45], [17, 45], [17, 43]]
  ],
  "objects": {
    "countries": {
      "type": "GeometryCollection",
      "geometries": [
        { "type": "Polygon", "id": "250", "arcs": [[0]], "properties": { "name": "France" } },
        { "type": "Polygon", "id": "840", "arcs": [[1]], "properties": { "name": "United States of America", "iso_a3": "USA" } },
        { "type": "Polygon", "id": "-99", "arcs": [[2]], "properties": { "name": "Bosnia and Herz." } }
      ]
    }
  }
}"#;

pub fn unique_temp_dir(name: &str) -> PathBuf {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after unix epoch")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("geodash-{name}-{stamp}-{}", std::process::id()));
    fs::create_dir_all(&dir).expect("temp dir should be creatable");
    dir
}

/// Writes every input file both dashboards read into a fresh temp dir.
pub fn fixture_data_dir(name: &str) -> PathBuf {
    let dir = unique_temp_dir(name);
    for (file, contents) in [
        ("ISO-3166-Countries-with-Regional-Codes.csv", METADATA_CSV),
        ("gdp_pcap.csv", GDP_CSV),
        ("lex.csv", LEX_CSV),
        ("pop.csv", POP_CSV),
        ("global_power_plant_database.csv", PLANTS_CSV),
        ("world-110m.json", WORLD_TOPOLOGY),
    ] {
        fs::write(dir.join(file), contents).expect("fixture file should be writable");
    }
    dir
}

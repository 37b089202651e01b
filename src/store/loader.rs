//! Loads a GeoPlanet data dump into a [`Gazetteer`].
//!
//! Each file is tab separated with a header row and may be gzip compressed:
//!
//! ```text
//! places:       WOE_ID  ISO  Name  Language  PlaceType  Parent_ID
//! aliases:      WOE_ID  Name  Name_Type  Language
//! adjacencies:  Place_WOE_ID  Place_ISO  Neighbour_WOE_ID  Neighbour_ISO
//! ```

use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

use super::{Gazetteer, GazetteerBuilder};
use crate::config::DataConfig;
use crate::models::{Alias, NameType, Place, PlaceType, Toponym, WoeId};

/// Load every file named in the data config and freeze the graph.
pub fn load(config: &DataConfig) -> Result<Gazetteer> {
    let mut builder = GazetteerBuilder::new();

    let count = load_places(open(&config.places)?, &mut builder)
        .with_context(|| format!("Failed to load places from {}", config.places.display()))?;
    info!("Loaded {} places from {}", count, config.places.display());

    if let Some(path) = &config.aliases {
        let count = load_aliases(open(path)?, &mut builder)
            .with_context(|| format!("Failed to load aliases from {}", path.display()))?;
        info!("Loaded {} aliases from {}", count, path.display());
    }

    if let Some(path) = &config.adjacencies {
        let count = load_adjacencies(open(path)?, &mut builder)
            .with_context(|| format!("Failed to load adjacencies from {}", path.display()))?;
        info!("Loaded {} adjacencies from {}", count, path.display());
    }

    let gazetteer = builder.build().context("Failed to build place graph")?;

    let cyclic = gazetteer.validate();
    if !cyclic.is_empty() {
        warn!(
            "{} places sit on a parent cycle; ancestor lookups on them will fail",
            cyclic.len()
        );
        debug!("Cyclic places: {:?}", cyclic);
    }

    Ok(gazetteer)
}

/// Open a dump file, decompressing `.gz` transparently
fn open(path: &Path) -> Result<Box<dyn Read>> {
    let file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let reader: Box<dyn Read> = if path.extension().map_or(false, |e| e == "gz") {
        Box::new(GzDecoder::new(file))
    } else {
        Box::new(file)
    };
    Ok(reader)
}

/// Read place rows into the builder, returning the number of rows read.
pub fn load_places<R: Read>(reader: R, builder: &mut GazetteerBuilder) -> Result<usize> {
    let mut csv_reader = tsv_reader(reader);
    let headers = csv_reader.headers()?.clone();

    let woe_id_idx = column(&headers, "WOE_ID")?;
    let iso_idx = column(&headers, "ISO")?;
    let name_idx = column(&headers, "Name")?;
    let language_idx = column(&headers, "Language")?;
    let place_type_idx = column(&headers, "PlaceType")?;
    let parent_idx = column(&headers, "Parent_ID")?;

    let mut count = 0;
    for result in csv_reader.records() {
        let record = result?;
        let line = line_of(&record);

        let woe_id = parse_woe_id(&record[woe_id_idx], line)?;
        let place_type: PlaceType = record[place_type_idx]
            .parse()
            .with_context(|| format!("line {}", line))?;

        // GeoPlanet marks roots with a parent of 0
        let parent = parse_woe_id(&record[parent_idx], line)?;
        let parent = (parent.0 != 0 && parent != woe_id).then_some(parent);

        builder.add_place(Place {
            toponym: Toponym {
                woe_id,
                name: record[name_idx].to_string(),
                iso_code: non_empty(&record[iso_idx]),
            },
            language_code: non_empty(&record[language_idx]),
            place_type,
            parent,
        });
        count += 1;
    }

    Ok(count)
}

/// Read alias rows into the builder, returning the number of rows read.
pub fn load_aliases<R: Read>(reader: R, builder: &mut GazetteerBuilder) -> Result<usize> {
    let mut csv_reader = tsv_reader(reader);
    let headers = csv_reader.headers()?.clone();

    let woe_id_idx = column(&headers, "WOE_ID")?;
    let name_idx = column(&headers, "Name")?;
    let name_type_idx = column(&headers, "Name_Type")?;
    let language_idx = column(&headers, "Language")?;

    let mut count = 0;
    for result in csv_reader.records() {
        let record = result?;
        let line = line_of(&record);

        let owner = parse_woe_id(&record[woe_id_idx], line)?;
        let name_type: NameType = record[name_type_idx]
            .parse()
            .with_context(|| format!("line {}", line))?;
        let alias = Alias::new(owner, &record[name_idx], name_type, Some(&record[language_idx]))
            .with_context(|| format!("line {}", line))?;

        builder.add_alias(alias);
        count += 1;
    }

    Ok(count)
}

/// Read adjacency rows into the builder, returning the number of rows read.
pub fn load_adjacencies<R: Read>(reader: R, builder: &mut GazetteerBuilder) -> Result<usize> {
    let mut csv_reader = tsv_reader(reader);
    let headers = csv_reader.headers()?.clone();

    let place_idx = column(&headers, "Place_WOE_ID")?;
    let neighbor_idx = column(&headers, "Neighbour_WOE_ID")?;

    let mut count = 0;
    for result in csv_reader.records() {
        let record = result?;
        let line = line_of(&record);

        let place = parse_woe_id(&record[place_idx], line)?;
        let neighbor = parse_woe_id(&record[neighbor_idx], line)?;
        builder.add_adjacency(place, neighbor);
        count += 1;
    }

    Ok(count)
}

fn tsv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .has_headers(true)
        .delimiter(b'\t')
        .trim(Trim::All)
        .from_reader(reader)
}

fn column(headers: &StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .with_context(|| format!("Column '{}' not found", name))
}

fn line_of(record: &StringRecord) -> u64 {
    record.position().map_or(0, |p| p.line())
}

fn parse_woe_id(field: &str, line: u64) -> Result<WoeId> {
    field
        .parse::<u64>()
        .map(WoeId)
        .with_context(|| format!("line {}: invalid WOEID {:?}", line, field))
}

fn non_empty(field: &str) -> Option<String> {
    (!field.is_empty()).then(|| field.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLACES: &str = "\"WOE_ID\"\t\"ISO\"\t\"Name\"\t\"Language\"\t\"PlaceType\"\t\"Parent_ID\"\n\
        \"1\"\t\"\"\t\"Earth\"\t\"ENG\"\t\"Supername\"\t\"0\"\n\
        \"23424977\"\t\"US\"\t\"United States\"\t\"ENG\"\t\"Country\"\t\"1\"\n";

    #[test]
    fn test_load_quoted_places() {
        let mut builder = GazetteerBuilder::new();
        let count = load_places(PLACES.as_bytes(), &mut builder).unwrap();
        assert_eq!(count, 2);

        let gazetteer = builder.build().unwrap();
        let earth = gazetteer.place(WoeId(1)).unwrap();
        assert!(earth.is_root());
        assert_eq!(earth.iso_code(), None);

        let usa = gazetteer.place(WoeId(23424977)).unwrap();
        assert_eq!(usa.parent(), Some(earth));
        assert_eq!(usa.iso_code(), Some("US"));
        assert_eq!(usa.language_code(), Some("ENG"));
    }

    #[test]
    fn test_unknown_place_type_fails() {
        let data = "WOE_ID\tISO\tName\tLanguage\tPlaceType\tParent_ID\n\
            7\tUS\tSomewhere\tENG\tCity\t0\n";
        let mut builder = GazetteerBuilder::new();
        let err = load_places(data.as_bytes(), &mut builder).unwrap_err();
        assert!(format!("{:#}", err).contains("unknown PlaceType token"));
    }

    #[test]
    fn test_missing_column_fails() {
        let data = "WOE_ID\tName\n1\tEarth\n";
        let mut builder = GazetteerBuilder::new();
        let err = load_places(data.as_bytes(), &mut builder).unwrap_err();
        assert!(err.to_string().contains("Column 'ISO' not found"));
    }

    #[test]
    fn test_load_aliases_normalizes_language() {
        let data = "WOE_ID\tName\tName_Type\tLanguage\n\
            1\tTerra\tQ\tPOR\n\
            1\tErde\tQ\t\n";
        let mut builder = GazetteerBuilder::new();
        load_places(PLACES.as_bytes(), &mut builder).unwrap();
        assert_eq!(load_aliases(data.as_bytes(), &mut builder).unwrap(), 2);

        let gazetteer = builder.build().unwrap();
        let aliases = gazetteer.place(WoeId(1)).unwrap().aliases();
        assert_eq!(aliases[0].language_code(), Some("por"));
        assert_eq!(aliases[1].language_code(), None);
    }
}

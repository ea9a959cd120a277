//! Derived collection and dictionary facets backed by hand-written add
//! operations.

use std::collections::BTreeMap;

use anyhow::{Result, anyhow, ensure};
use config_binder::{
    ConfigCollection, ConfigDictionary, Configurable, Converter, JsonSection, MemoryTree,
};
use rstest::rstest;
use serde_json::json;
use test_helpers::capture::capture_warnings;

#[derive(Debug, Default, PartialEq, Eq, Configurable)]
#[configurable(collection)]
struct Playlist {
    #[configurable(skip)]
    tracks: Vec<String>,
}

impl ConfigCollection for Playlist {
    type Item = String;

    fn add_method() -> Option<fn(&mut Self, String)> {
        Some(|playlist: &mut Self, track: String| playlist.tracks.push(track))
    }
}

#[derive(Debug, Default, PartialEq, Eq, Configurable)]
#[configurable(dictionary)]
struct Quotas {
    #[configurable(skip)]
    limits: BTreeMap<String, u32>,
}

impl ConfigDictionary for Quotas {
    type Key = String;
    type Value = u32;

    fn add_method() -> Option<fn(&mut Self, String, u32)> {
        Some(|quotas: &mut Self, key: String, value: u32| {
            quotas.limits.insert(key.to_ascii_lowercase(), value);
        })
    }
}

#[derive(Debug, Default, Configurable)]
#[configurable(collection)]
struct Frozen {
    #[configurable(skip)]
    items: Vec<u8>,
}

impl ConfigCollection for Frozen {
    type Item = u8;

    fn add_method() -> Option<fn(&mut Self, u8)> {
        None
    }
}

#[derive(Debug, Default, Configurable)]
#[configurable(collection)]
struct Album {
    title: String,
    #[configurable(skip)]
    tracks: Vec<String>,
}

impl ConfigCollection for Album {
    type Item = String;

    fn add_method() -> Option<fn(&mut Self, String)> {
        Some(|album: &mut Self, track: String| album.tracks.push(track))
    }
}

#[derive(Debug, Default, Configurable)]
struct Library {
    #[configurable(read_only)]
    playlist: Playlist,
    quotas: Quotas,
}

#[rstest]
fn collection_facet_adds_indexed_children() -> Result<()> {
    let doc = json!(["intro", "verse", "outro"]);
    let playlist: Playlist = Converter::new()
        .convert(&JsonSection::new(&doc))
        .map_err(|err| anyhow!(err))?;
    ensure!(playlist.tracks == ["intro", "verse", "outro"]);
    Ok(())
}

#[rstest]
fn collection_with_extra_property_binds_both() -> Result<()> {
    let tree = MemoryTree::new()
        .with("Title", "Mix")
        .with("0", "intro")
        .with("1", "outro");
    let (result, warnings) =
        capture_warnings(|| Converter::new().convert::<Album>(&tree.root()));
    let album = result.map_err(|err| anyhow!(err))?;
    ensure!(album.title == "Mix");
    ensure!(album.tracks == ["intro", "outro"], "{album:?}");
    ensure!(
        warnings.iter().any(|event| event.field("key") == Some("Title")),
        "named keys are not indices: {warnings:?}"
    );
    Ok(())
}

#[rstest]
fn collections_are_extended_when_merging() -> Result<()> {
    let mut library = Library::default();
    library.playlist.tracks.push("existing".to_owned());
    let doc = json!({"Playlist": ["new"], "Quotas": {"Cpu": 4}});
    Converter::new()
        .populate(&mut library, &JsonSection::new(&doc))
        .map_err(|err| anyhow!(err))?;
    ensure!(library.playlist.tracks == ["existing", "new"], "{library:?}");
    ensure!(library.quotas.limits.get("cpu") == Some(&4));
    Ok(())
}

#[rstest]
fn dictionary_facet_inserts_keyed_children() -> Result<()> {
    let doc = json!({"Cpu": "2", "Memory": 512, "Disk": null});
    let (result, warnings) =
        capture_warnings(|| Converter::new().convert::<Quotas>(&JsonSection::new(&doc)));
    let quotas = result.map_err(|err| anyhow!(err))?;
    ensure!(
        quotas.limits == BTreeMap::from([("cpu".to_owned(), 2), ("memory".to_owned(), 512)]),
        "{quotas:?}"
    );
    ensure!(
        warnings.iter().any(|event| event.field("key") == Some("Disk")),
        "null values are reported: {warnings:?}"
    );
    Ok(())
}

#[rstest]
fn missing_add_operation_is_logged_and_skipped() -> Result<()> {
    let doc = json!([1, 2]);
    let (result, warnings) =
        capture_warnings(|| Converter::new().convert::<Frozen>(&JsonSection::new(&doc)));
    let frozen = result.map_err(|err| anyhow!(err))?;
    ensure!(frozen.items.is_empty());
    ensure!(!warnings.is_empty(), "expected a warning");
    Ok(())
}

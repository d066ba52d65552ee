//! Reading and writing weighted edge list files, gzip-compressed when the
//! path ends in `.gz`.

use std::error::Error;
use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use cfgm_core::EdgeList;
use cfgm_graph::{parse_weighted_edgelist, weighted_to_multigraph, WeightedGraph};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

fn is_gzip(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "gz")
}

/// Reads a weighted edge list file.
pub fn read_weighted(path: &Path) -> Result<WeightedGraph<String>, Box<dyn Error>> {
    let text = if is_gzip(path) {
        let mut decoder = GzDecoder::new(File::open(path)?);
        let mut text = String::new();
        decoder.read_to_string(&mut text)?;
        text
    } else {
        fs::read_to_string(path)?
    };
    Ok(parse_weighted_edgelist(&text)?)
}

/// Reads a weighted edge list file and expands it into parallel edges.
pub fn read_multigraph(path: &Path) -> Result<EdgeList<String>, Box<dyn Error>> {
    Ok(weighted_to_multigraph(&read_weighted(path)?)?)
}

/// Writes `contents` to `path`, compressing when the path ends in `.gz`.
pub fn write_text(path: &Path, contents: &str) -> Result<(), Box<dyn Error>> {
    let file = File::create(path)?;
    if is_gzip(path) {
        let mut encoder = GzEncoder::new(BufWriter::new(file), Compression::default());
        encoder.write_all(contents.as_bytes())?;
        encoder.finish()?.flush()?;
    } else {
        let mut writer = BufWriter::new(file);
        writer.write_all(contents.as_bytes())?;
        writer.flush()?;
    }
    Ok(())
}

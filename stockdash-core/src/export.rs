//! Peer comparison CSV export.
//!
//! Rows are written with the `csv` crate, so peer names or ratings containing
//! commas, quotes or newlines are quoted instead of corrupting the file.

use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::snapshot::PeerCompany;
use crate::ticker::Ticker;

/// Header row, in column order.
pub const PEER_CSV_HEADER: [&str; 5] = ["Company", "Price", "Change", "Percent Change", "Rating"];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to flush CSV writer: {0}")]
    Flush(String),

    #[error("CSV output is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("I/O error writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Render the peer list as CSV.
///
/// Returns `Ok(None)` for an empty list: no artifact is produced.
pub fn peer_csv(peers: &[PeerCompany]) -> Result<Option<String>, ExportError> {
    if peers.is_empty() {
        return Ok(None);
    }

    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(vec![]);

    wtr.write_record(PEER_CSV_HEADER)?;
    for peer in peers {
        wtr.write_record([
            peer.company_name.as_deref().unwrap_or(""),
            peer.price.as_deref().unwrap_or(""),
            peer.net_change.as_deref().unwrap_or(""),
            peer.percent_change.as_deref().unwrap_or(""),
            peer.overall_rating.as_deref().unwrap_or(""),
        ])?;
    }

    let data = wtr
        .into_inner()
        .map_err(|e| ExportError::Flush(e.error().to_string()))?;
    Ok(Some(String::from_utf8(data)?))
}

/// `peer-comparison-<ticker>.csv`, with path-hostile characters replaced.
pub fn peer_csv_filename(ticker: &Ticker) -> String {
    let safe: String = ticker
        .as_str()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    format!("peer-comparison-{safe}.csv")
}

/// Write the peer CSV into `dir` and return the final path.
///
/// Returns `Ok(None)` (and touches nothing) when there are no peers. The file
/// is staged in a temporary file in the same directory and renamed into
/// place; the staging handle is released, and removed on failure, when it
/// drops.
pub fn save_peer_csv(
    dir: &Path,
    ticker: &Ticker,
    peers: &[PeerCompany],
) -> Result<Option<PathBuf>, ExportError> {
    let Some(content) = peer_csv(peers)? else {
        return Ok(None);
    };

    let path = dir.join(peer_csv_filename(ticker));
    let io_err = |source| ExportError::Io {
        path: path.clone(),
        source,
    };

    std::fs::create_dir_all(dir).map_err(io_err)?;
    let mut staged = tempfile::NamedTempFile::new_in(dir).map_err(io_err)?;
    staged.write_all(content.as_bytes()).map_err(io_err)?;
    staged.flush().map_err(io_err)?;
    staged.persist(&path).map_err(|e| io_err(e.error))?;

    tracing::info!(path = %path.display(), rows = peers.len(), "peer CSV exported");
    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn peer(name: &str, price: &str, net: &str, pct: &str, rating: &str) -> PeerCompany {
        PeerCompany {
            company_name: Some(name.into()),
            price: Some(price.into()),
            net_change: Some(net.into()),
            percent_change: Some(pct.into()),
            overall_rating: Some(rating.into()),
            image_url: Some("https://img/x.png".into()),
        }
    }

    #[test]
    fn empty_list_produces_nothing() {
        assert!(peer_csv(&[]).unwrap().is_none());
    }

    #[test]
    fn header_then_rows_in_order() {
        let peers = vec![
            peer("TCS", "3500", "-10", "-0.3", "Buy"),
            peer("Wipro", "480", "2", "0.4", "Hold"),
        ];
        let csv = peer_csv(&peers).unwrap().unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Company,Price,Change,Percent Change,Rating",
                "TCS,3500,-10,-0.3,Buy",
                "Wipro,480,2,0.4,Hold",
            ]
        );
    }

    #[test]
    fn commas_and_quotes_are_quoted() {
        let peers = vec![peer("HCL Technologies, Ltd", "1500", "5", "0.3", "Strong \"Buy\"")];
        let csv = peer_csv(&peers).unwrap().unwrap();
        assert_eq!(
            csv.lines().nth(1),
            Some(r#""HCL Technologies, Ltd",1500,5,0.3,"Strong ""Buy""""#)
        );

        let mut rdr = csv::Reader::from_reader(csv.as_bytes());
        let rec = rdr.records().next().unwrap().unwrap();
        assert_eq!(&rec[0], "HCL Technologies, Ltd");
        assert_eq!(&rec[4], "Strong \"Buy\"");
    }

    #[test]
    fn absent_fields_are_empty_cells() {
        let peers = vec![PeerCompany {
            company_name: Some("Solo".into()),
            ..PeerCompany::default()
        }];
        let csv = peer_csv(&peers).unwrap().unwrap();
        assert_eq!(csv.lines().nth(1), Some("Solo,,,,"));
    }

    #[test]
    fn filename_embeds_ticker() {
        let t = Ticker::parse("infy").unwrap();
        assert_eq!(peer_csv_filename(&t), "peer-comparison-INFY.csv");
        let t = Ticker::parse("a/b:c").unwrap();
        assert_eq!(peer_csv_filename(&t), "peer-comparison-A_B_C.csv");
    }

    #[test]
    fn save_writes_file_and_leaves_no_staging_files() {
        let dir = tempfile::tempdir().unwrap();
        let t = Ticker::parse("INFY").unwrap();
        let peers = vec![peer("TCS", "3500", "-10", "-0.3", "Buy")];

        let path = save_peer_csv(dir.path(), &t, &peers).unwrap().unwrap();
        assert_eq!(path, dir.path().join("peer-comparison-INFY.csv"));
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("Company,Price,Change,Percent Change,Rating\n"));

        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn save_without_peers_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let t = Ticker::parse("INFY").unwrap();
        assert!(save_peer_csv(dir.path(), &t, &[]).unwrap().is_none());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn save_overwrites_previous_export() {
        let dir = tempfile::tempdir().unwrap();
        let t = Ticker::parse("INFY").unwrap();
        save_peer_csv(dir.path(), &t, &[peer("Old", "1", "1", "1", "x")]).unwrap();
        let path = save_peer_csv(dir.path(), &t, &[peer("New", "2", "2", "2", "y")])
            .unwrap()
            .unwrap();
        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.contains("New,2,2,2,y"));
        assert!(!content.contains("Old"));
    }
}

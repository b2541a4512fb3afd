//! Plain-text edge lists
//!
//! One edge per line: `source target [weight]`, separated by whitespace.
//! Blank lines and lines starting with `#` are skipped. Edges without a
//! weight column carry no weight attribute and count with the default weight.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{anyhow, Context, Result};

use crate::config::Config;
use crate::graph::{GraphBuilder, RoleGraph};

const COMMENT_PREFIX: char = '#';

/// Read an edge list file
pub fn load_edge_list(path: &Path, config: Config) -> Result<RoleGraph<String>> {
    log::info!("Reading edge list: {}", path.display());

    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    read_edge_list(BufReader::new(file), config)
}

/// Parse an edge list from any buffered reader
pub fn read_edge_list<R: BufRead>(reader: R, config: Config) -> Result<RoleGraph<String>> {
    let weight_key = config.weight_key.clone();
    let mut builder = GraphBuilder::with_capacity(1024, 4096).config(config);

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with(COMMENT_PREFIX) {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        let weight = match fields.as_slice() {
            [_, _] => None,
            [_, _, weight] => Some(weight.parse::<f64>().with_context(|| {
                format!("line {}: invalid weight '{}'", line_no + 1, weight)
            })?),
            _ => {
                return Err(anyhow!(
                    "line {}: expected 'source target [weight]', found {} fields",
                    line_no + 1,
                    fields.len()
                ))
            }
        };

        builder.add_weighted_edge(fields[0], fields[1], &weight_key, weight);
    }

    log::info!(
        "Loaded {} edges between {} nodes",
        builder.edge_count(),
        builder.node_count()
    );

    Ok(builder.build()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parses_weights_and_comments() {
        let input = "# a comment\n\na b 2.5\nb c\n  c a 1e-1  \n";
        let graph = read_edge_list(Cursor::new(input), Config::default()).unwrap();

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 3);

        let ab = graph.edge(&"a".into(), &"b".into()).unwrap().unwrap();
        assert_eq!(ab.get("weight"), Some(2.5));
        let bc = graph.edge(&"b".into(), &"c".into()).unwrap().unwrap();
        assert_eq!(bc.get("weight"), None);
        assert_eq!(bc.weight("weight"), 1.0);
    }

    #[test]
    fn stores_weight_under_configured_key() {
        let graph = read_edge_list(Cursor::new("x y 4"), Config::new("capacity", 1.0)).unwrap();
        let xy = graph.edge(&"x".into(), &"y".into()).unwrap().unwrap();
        assert_eq!(xy.get("capacity"), Some(4.0));
    }

    #[test]
    fn rejects_malformed_lines() {
        let err = read_edge_list(Cursor::new("a b c d\n"), Config::default()).unwrap_err();
        assert!(err.to_string().contains("line 1"));

        let err = read_edge_list(Cursor::new("a b\na b heavy\n"), Config::default()).unwrap_err();
        assert!(err.to_string().contains("line 2"));

        assert!(read_edge_list(Cursor::new("lonely\n"), Config::default()).is_err());
    }

    #[test]
    fn empty_input_gives_empty_graph() {
        let graph = read_edge_list(Cursor::new("# nothing\n"), Config::default()).unwrap();
        assert_eq!(graph.node_count(), 0);
    }
}

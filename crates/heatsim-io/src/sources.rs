//! Configuration-file reader: the process layout and heat-source list,
//! parsed into the shared data model.

use std::path::Path;

use heatsim_common::{HeatError, HeatSource, ProcessLayout};
use tracing::debug;

/// Parse a sources file: a `Px Py` line, a `K` line, then `K` lines of
/// `row col range temperature`.
pub fn read_sources_file(path: &Path) -> Result<(ProcessLayout, Vec<HeatSource>), HeatError> {
    let text = std::fs::read_to_string(path)
        .map_err(|source| HeatError::io(path.display().to_string(), source))?;
    let (layout, sources) = parse_sources(&text)
        .map_err(|msg| HeatError::config(format!("{}: {msg}", path.display())))?;
    debug!(
        path = %path.display(),
        px = layout.px,
        py = layout.py,
        sources = sources.len(),
        "parsed sources file"
    );
    Ok((layout, sources))
}

fn parse_sources(text: &str) -> Result<(ProcessLayout, Vec<HeatSource>), String> {
    let mut lines = text.lines().map(str::trim).filter(|l| !l.is_empty());

    let layout_line = lines.next().ok_or("missing process layout line")?;
    let mut layout_fields = layout_line.split_whitespace();
    let px: usize = layout_fields
        .next()
        .ok_or("process layout line missing Px")?
        .parse()
        .map_err(|_| "process layout Px is not an integer".to_string())?;
    let py: usize = layout_fields
        .next()
        .ok_or("process layout line missing Py")?
        .parse()
        .map_err(|_| "process layout Py is not an integer".to_string())?;

    let count_line = lines.next().ok_or("missing heat source count line")?;
    let count: usize = count_line
        .parse()
        .map_err(|_| "heat source count is not an integer".to_string())?;

    let mut sources = Vec::with_capacity(count);
    for (seen, line) in lines.by_ref().take(count).enumerate() {
        let mut fields = line.split_whitespace();
        let parse_field = |field: Option<&str>, name: &str| -> Result<f64, String> {
            field
                .ok_or_else(|| format!("heat source {seen} missing {name}"))?
                .parse::<f64>()
                .map_err(|_| format!("heat source {seen} field {name} is not a number"))
        };
        let row = parse_field(fields.next(), "row")?;
        let col = parse_field(fields.next(), "col")?;
        let range = parse_field(fields.next(), "range")?;
        let temperature = parse_field(fields.next(), "temperature")?;
        sources.push(HeatSource::new(row, col, range, temperature));
    }
    if sources.len() != count {
        return Err(format!(
            "declared {count} heat sources but only found {}",
            sources.len()
        ));
    }

    Ok((ProcessLayout::new(px, py), sources))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_layout_count_and_sources() {
        let text = "2 3\n2\n0.1 0.2 0.3 50.0\n0.4 0.5 0.6 75.0\n";
        let (layout, sources) = parse_sources(text).unwrap();
        assert_eq!(layout, ProcessLayout::new(2, 3));
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].temperature, 50.0);
        assert_eq!(sources[1].range, 0.6);
    }

    #[test]
    fn zero_sources_is_valid() {
        let text = "1 1\n0\n";
        let (layout, sources) = parse_sources(text).unwrap();
        assert_eq!(layout, ProcessLayout::new(1, 1));
        assert!(sources.is_empty());
    }

    #[test]
    fn truncated_source_list_is_a_config_error() {
        let text = "1 1\n2\n0.1 0.2 0.3 50.0\n";
        assert!(parse_sources(text).is_err());
    }

    #[test]
    fn non_numeric_field_is_a_config_error() {
        let text = "1 1\n1\nzero 0.2 0.3 50.0\n";
        assert!(parse_sources(text).is_err());
    }
}

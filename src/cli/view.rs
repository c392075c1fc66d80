use anyhow::Result;
use std::path::PathBuf;

#[cfg(feature = "colorized_output")]
use console::style;

use seqbridge::schema::NOTES;
use seqbridge::table::SequenceTable;
use seqbridge::validator::{Decorations, SafetyValidator};

use super::{open_for_editing, Config};

const NOTES_WIDTH: usize = 40;

/// Print a sequence in technician form, unsafe cells highlighted
pub fn run(file: PathBuf, config: Option<PathBuf>) -> Result<()> {
    let config = Config::load(config.as_deref())?;
    let conversion = open_for_editing(&file, &config)?;
    let decorations = SafetyValidator::new(config.limits).decorate(&conversion.table);

    println!("{} ({} steps)", conversion.record_type.title(), conversion.table.len());
    println!();
    print!("{}", render(&conversion.table, &decorations));
    println!();

    if !conversion.coding.is_clean() {
        println!("Coded values replaced by defaults:");
        print!("{}", conversion.coding);
        println!();
    }

    if decorations.is_empty() {
        println!("All setpoints within limits");
    } else {
        println!("{} cell(s) exceed a safety limit:", decorations.len());
        for (row, column, violation) in decorations.iter() {
            println!("  step {}, {}: {}", row + 1, column, violation.message);
        }
    }

    Ok(())
}

fn render(table: &SequenceTable, decorations: &Decorations) -> String {
    let texts: Vec<Vec<String>> = table
        .rows()
        .iter()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect();

    let widths: Vec<usize> = table
        .columns()
        .iter()
        .enumerate()
        .map(|(col, name)| {
            let widest = texts
                .iter()
                .map(|row| row[col].chars().count())
                .chain(std::iter::once(name.chars().count()))
                .max()
                .unwrap_or(0);
            if name == NOTES {
                widest.min(NOTES_WIDTH)
            } else {
                widest
            }
        })
        .collect();

    let mut out = String::new();
    let header: Vec<String> = table
        .columns()
        .iter()
        .zip(&widths)
        .map(|(name, width)| format!("{:<width$}", name, width = width))
        .collect();
    out.push_str(&header.join(" | "));
    out.push('\n');
    out.push_str(
        &widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    out.push('\n');

    for (row_idx, row) in texts.iter().enumerate() {
        let cells: Vec<String> = row
            .iter()
            .zip(table.columns())
            .zip(&widths)
            .map(|((text, name), width)| {
                let text: String = text.chars().take(*width).collect();
                let padded = format!("{:<width$}", text, width = width);
                if decorations.is_flagged(row_idx, name) {
                    highlight(&padded)
                } else {
                    padded
                }
            })
            .collect();
        out.push_str(&cells.join(" | "));
        out.push('\n');
    }

    out
}

#[cfg(feature = "colorized_output")]
fn highlight(text: &str) -> String {
    style(text).red().bold().to_string()
}

#[cfg(not(feature = "colorized_output"))]
fn highlight(text: &str) -> String {
    format!("{}*", text.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use seqbridge::table::Cell;

    #[test]
    fn test_render_aligns_columns() {
        let table = SequenceTable::from_columns(vec![
            ("Step", vec![Cell::from(1.0), Cell::from(2.0)]),
            ("Speed_RPM", vec![Cell::from(3600.0), Cell::from(12000.5)]),
        ])
        .unwrap();

        let text = render(&table, &Decorations::default());
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "Step | Speed_RPM");
        assert_eq!(lines[1], "-----+----------");
        assert_eq!(lines[2], "1    | 3600     ");
        assert_eq!(lines[3], "2    | 12000.5  ");
    }

    #[test]
    fn test_render_truncates_long_notes() {
        let note = "x".repeat(100);
        let table = SequenceTable::from_columns(vec![(NOTES, vec![Cell::text(note)])]).unwrap();

        let text = render(&table, &Decorations::default());
        assert!(text.lines().all(|line| line.chars().count() <= NOTES_WIDTH));
    }
}

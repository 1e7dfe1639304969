use comfy_table::{
    modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, CellAlignment, Color,
    ContentArrangement, Table,
};
use cratedb_client::value::value_to_string;
use cratedb_client::QueryResult;

use crate::frame::TimeFrame;

/// Rows shown at each end of a frame preview.
const PREVIEW_EDGE: usize = 5;

fn styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn header_cell(name: &str) -> Cell {
    Cell::new(name)
        .fg(Color::Cyan)
        .set_alignment(CellAlignment::Center)
}

/// Tabular rendering of a query result.
pub fn result_table(result: &QueryResult) -> Table {
    let mut table = styled_table();
    table.set_header(result.cols.iter().map(|c| header_cell(c)));

    for row in &result.rows {
        table.add_row(
            row.iter()
                .enumerate()
                .map(|(idx, value)| Cell::new(value_to_string(value, result.column_type(idx)))),
        );
    }
    table
}

/// Head and tail of a frame, with an ellipsis row in between when truncated.
pub fn frame_table(frame: &TimeFrame) -> Table {
    let mut table = styled_table();
    let mut header = vec![header_cell("")];
    header.extend(frame.column_names().into_iter().map(header_cell));
    table.set_header(header);

    let len = frame.len();
    let rows: Vec<usize> = if len > PREVIEW_EDGE * 2 {
        (0..PREVIEW_EDGE).chain(len - PREVIEW_EDGE..len).collect()
    } else {
        (0..len).collect()
    };

    for (pos, idx) in rows.iter().enumerate() {
        if len > PREVIEW_EDGE * 2 && pos == PREVIEW_EDGE {
            table.add_row(vec!["..."; frame.columns().len() + 1]);
        }
        let mut cells = vec![Cell::new(
            frame.index()[*idx].format("%Y-%m-%d %H:%M:%S").to_string(),
        )];
        if let Some(values) = frame.row(*idx) {
            cells.extend(
                values
                    .iter()
                    .map(|v| Cell::new(format!("{v:.6}")).set_alignment(CellAlignment::Right)),
            );
        }
        table.add_row(cells);
    }
    table
}

//! Projects flattened athlete rows onto absolute workbook cells.

pub mod columns;
pub mod layout;

pub use columns::{column_index, resolve_field, resolve_label};
pub use layout::{ADDRESS_SHEET, GroupClass, KIDS_SHEET, KidsTrack};

use serde::Serialize;
use storage::models::SplitDecimal;
use tracing::warn;

use crate::error::Result;
use crate::normalize::{self, RawValue};
use crate::reader::SheetRow;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellData {
    Text(String),
    Number(f64),
}

/// One absolute cell write against the workbook.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellWrite {
    pub sheet: &'static str,
    pub row: u32,
    pub col: u32,
    pub value: CellData,
}

/// Computes every cell write for one flattened athlete row. Fields without
/// a column mapping and missing values are skipped, never defaulted into
/// the grid.
pub fn project_row(sheet_row: &SheetRow) -> Vec<CellWrite> {
    let Some(class) = GroupClass::classify(&sheet_row.group_name) else {
        warn!(
            "group '{}' has no sheet layout, row not projected",
            sheet_row.group_name
        );
        return Vec::new();
    };
    let sheet = class.sheet();
    let row = class.row(sheet_row.ordinal);

    let mut writes = Vec::new();
    for (field, value) in &sheet_row.fields {
        // The 1500m is kept in two cells, minutes and seconds.
        if field == "1500 Meter Lauf" {
            if let Some((minutes, seconds)) = project_split_time(value) {
                if let Some(col) = resolve_label("1500m - s") {
                    writes.push(CellWrite {
                        sheet,
                        row,
                        col,
                        value: CellData::Number(seconds.to_f64()),
                    });
                }
                if let Some(col) = resolve_label("1500m - min") {
                    writes.push(CellWrite {
                        sheet,
                        row,
                        col,
                        value: CellData::Number(f64::from(minutes)),
                    });
                }
            }
            continue;
        }

        let Some(col) = resolve_field(field) else {
            continue;
        };

        let data = match field.as_str() {
            "birth_date" => CellData::Text(normalize::format_birth_date(value)),
            "gender" => match value {
                RawValue::Text(gender) => CellData::Text(normalize::normalize_gender(gender)),
                _ => continue,
            },
            "Hochsprung" | "Stabhochsprung" => CellData::Number(height_metres(value)),
            _ => match value {
                RawValue::Missing => continue,
                RawValue::Number(n) if n.is_nan() => continue,
                RawValue::Number(n) => CellData::Number(*n),
                RawValue::Text(s) => match s.replace(',', ".").parse::<f64>() {
                    Ok(n) if n == -1.0 => CellData::Number(0.0),
                    Ok(n) => CellData::Number(n),
                    Err(_) => CellData::Text(s.clone()),
                },
            },
        };

        writes.push(CellWrite {
            sheet,
            row,
            col,
            value: data,
        });
    }

    writes
}

/// Height cells hold centimetres in the store and metres on the sheet.
/// Missing and struck-out values land as 0.
fn height_metres(value: &RawValue) -> f64 {
    match value {
        RawValue::Missing => 0.0,
        RawValue::Number(n) if n.is_nan() => 0.0,
        RawValue::Number(n) => n / 100.0,
        RawValue::Text(s) => {
            let trimmed = s.trim();
            if trimmed.starts_with('-') {
                return 0.0;
            }
            match trimmed.parse::<i64>() {
                Ok(centimetres) => centimetres as f64 / 100.0,
                Err(_) => {
                    warn!("unparseable height cell '{trimmed}', writing 0");
                    0.0
                }
            }
        }
    }
}

fn project_split_time(value: &RawValue) -> Option<(i32, SplitDecimal)> {
    let total = normalize::parse_score(value);
    if total.is_sentinel() {
        return None;
    }
    Some(normalize::split_minutes(total))
}

/// The collected cell writes for a whole export; stands in for the external
/// grid-cell sink. Later writes to the same cell win.
#[derive(Debug, Default, Serialize)]
pub struct Workbook {
    writes: Vec<CellWrite>,
}

impl Workbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, writes: Vec<CellWrite>) {
        self.writes.extend(writes);
    }

    pub fn cell(&self, sheet: &str, row: u32, col: u32) -> Option<&CellData> {
        self.writes
            .iter()
            .rev()
            .find(|w| w.sheet == sheet && w.row == row && w.col == col)
            .map(|w| &w.value)
    }

    pub fn len(&self) -> usize {
        self.writes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn row_with(group: &str, ordinal: u32, fields: Vec<(&str, RawValue)>) -> SheetRow {
        SheetRow {
            group_name: group.to_string(),
            ordinal,
            fields: fields
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect::<BTreeMap<_, _>>(),
        }
    }

    #[test]
    fn test_projects_into_group_block() {
        let row = row_with(
            "Gruppe 2",
            5,
            vec![
                ("surname", RawValue::text("Polt")),
                ("name", RawValue::text("Harald")),
            ],
        );

        let writes = project_row(&row);
        assert_eq!(writes.len(), 2);
        assert!(writes.iter().all(|w| w.row == 35));
        assert!(writes.iter().all(|w| w.sheet == ADDRESS_SHEET));

        let surname = writes.iter().find(|w| w.col == 7).unwrap();
        assert_eq!(surname.value, CellData::Text("Polt".to_string()));
    }

    #[test]
    fn test_unmapped_and_missing_fields_are_skipped() {
        let row = row_with(
            "Gruppe 1",
            0,
            vec![
                ("t_shirt", RawValue::text("L")),
                ("starting_number", RawValue::Missing),
            ],
        );
        assert!(project_row(&row).is_empty());
    }

    #[test]
    fn test_gender_is_lowercased_and_relay_becomes_dash() {
        let row = row_with(
            "Gruppe 1",
            0,
            vec![("gender", RawValue::text("Staffel"))],
        );
        let writes = project_row(&row);
        assert_eq!(writes[0].value, CellData::Text("-".to_string()));
    }

    #[test]
    fn test_height_cells_become_metres() {
        let row = row_with(
            "Gruppe 1",
            0,
            vec![
                ("Hochsprung", RawValue::text("108")),
                ("Stabhochsprung", RawValue::text("-1")),
            ],
        );
        let writes = project_row(&row);

        let high_jump = writes.iter().find(|w| w.col == 32).unwrap();
        assert_eq!(high_jump.value, CellData::Number(1.08));
        let pole_vault = writes.iter().find(|w| w.col == 41).unwrap();
        assert_eq!(pole_vault.value, CellData::Number(0.0));
    }

    #[test]
    fn test_sentinel_score_is_written_as_zero() {
        let row = row_with(
            "Gruppe 1",
            0,
            vec![("100 Meter Lauf", RawValue::text("-1,00"))],
        );
        let writes = project_row(&row);
        assert_eq!(writes[0].value, CellData::Number(0.0));
    }

    #[test]
    fn test_long_run_splits_into_two_cells() {
        let row = row_with(
            "Gruppe 1",
            0,
            vec![("1500 Meter Lauf", RawValue::text("271,50"))],
        );
        let writes = project_row(&row);
        assert_eq!(writes.len(), 2);

        let seconds = writes.iter().find(|w| w.col == 46).unwrap();
        assert_eq!(seconds.value, CellData::Number(31.5));
        let minutes = writes.iter().find(|w| w.col == 45).unwrap();
        assert_eq!(minutes.value, CellData::Number(4.0));
    }

    #[test]
    fn test_long_run_sentinel_writes_nothing() {
        let row = row_with(
            "Gruppe 1",
            0,
            vec![("1500 Meter Lauf", RawValue::text("-1,0"))],
        );
        assert!(project_row(&row).is_empty());
    }

    #[test]
    fn test_missing_birth_date_gets_default() {
        let row = row_with("Gruppe 1", 0, vec![("birth_date", RawValue::Missing)]);
        let writes = project_row(&row);
        assert_eq!(writes[0].value, CellData::Text("1.1.1970".to_string()));
    }

    #[test]
    fn test_workbook_last_write_wins() {
        let mut workbook = Workbook::new();
        workbook.apply(vec![
            CellWrite {
                sheet: ADDRESS_SHEET,
                row: 3,
                col: 7,
                value: CellData::Text("old".to_string()),
            },
            CellWrite {
                sheet: ADDRESS_SHEET,
                row: 3,
                col: 7,
                value: CellData::Text("new".to_string()),
            },
        ]);

        assert_eq!(
            workbook.cell(ADDRESS_SHEET, 3, 7),
            Some(&CellData::Text("new".to_string()))
        );
        assert_eq!(workbook.cell(ADDRESS_SHEET, 4, 7), None);
    }
}

//! Column addressing for the fixed-layout result workbook.
//!
//! Resolution is two-stage: semantic field name -> short column label ->
//! column letters -> integer index. The letter arithmetic is NOT standard
//! base-26 spreadsheet numbering; the workbook predates the tooling and all
//! its addresses were computed with a 25-per-position offset, so the same
//! rule is kept here.

use std::collections::HashMap;

use lazy_static::lazy_static;

lazy_static! {
    /// Semantic athlete field -> short column label on the address sheet.
    pub static ref FIELD_LABELS: HashMap<&'static str, &'static str> = HashMap::from([
        ("surname", "NAME"),
        ("name", "VORNAME"),
        ("gender", "Sex2"),
        ("birth_date", "GBDT"),
        ("100 Meter Lauf", "100m"),
        ("Weitsprung", "Weit"),
        ("Kugelstoß", "Kugel"),
        ("Hochsprung", "Hoch"),
        ("400 Meter Lauf", "400 m"),
        ("110 Meter Hürden", "Hürden"),
        ("Diskuswurf", "Diskus"),
        ("Stabhochsprung", "Stab"),
        ("Speerwurf", "Speer"),
        ("1500 Meter Lauf", "1500m"),
        ("starting_number", "NR"),
    ]);

    /// Short column label -> column letters in the workbook.
    pub static ref LABEL_COLUMNS: HashMap<&'static str, &'static str> = HashMap::from([
        ("NAME", "G"),
        ("VORNAME", "H"),
        ("Sex2", "I"),
        ("ORT", "J"),
        ("GBDT", "K"),
        ("TITEL", "L"),
        ("ADRESSE", "M"),
        ("Straße", "N"),
        ("PLZ", "O"),
        ("TEL.NR.", "P"),
        ("Handy", "Q"),
        ("E-Mail", "R"),
        ("100m", "Z"),
        ("Weit", "AB"),
        ("Kugel", "AD"),
        ("Hoch", "AF"),
        ("400 m", "AH"),
        ("Hürden", "AK"),
        ("Diskus", "AM"),
        ("Stab", "AO"),
        ("Speer", "AQ"),
        ("1500m - s", "AT"),
        ("1500m - min", "AS"),
        ("NR", "D"),
    ]);
}

/// Column letters -> 1-based column index, one base-25 digit per position:
/// `index = sum(letter_value_from_a) + position * 25`.
pub fn column_index(letters: &str) -> u32 {
    letters
        .chars()
        .enumerate()
        .map(|(i, c)| {
            let value = u32::from(c.to_ascii_lowercase() as u8) - u32::from(b'a') + 1;
            value + (i as u32) * 25
        })
        .sum()
}

/// Column index for a semantic field, through both lookup stages. `None`
/// when the field has no column on the sheet.
pub fn resolve_field(field: &str) -> Option<u32> {
    FIELD_LABELS.get(field).and_then(|label| resolve_label(label))
}

/// Column index for a short label. `None` when the label is unmapped.
pub fn resolve_label(label: &str) -> Option<u32> {
    LABEL_COLUMNS.get(label).map(|letters| column_index(letters))
}

use tracing::debug;

use super::{insert, nested_section_close};
use crate::{
    Document, Result,
    parsing::{LineKind, Scanner, tokens},
    types::{ScheduleSlot, ScheduleTable},
};

/// Named tables of `frame_slot_name command duration_ms` lines.
pub(super) fn extract(scanner: &Scanner<'_>, open: usize, doc: &mut Document) -> Result<usize> {
    let close = nested_section_close(scanner, open)?;
    let mut index = open + 1;
    while index < close {
        if !scanner.kind(index).is_some_and(LineKind::opens_entry) {
            return Err(scanner.tokenization(index, "expected `table_name {`"));
        }
        let name = tokens::strip_unwanted(&scanner.line(index).text);
        let table_close = scanner.next_close(index)?;
        let slots = (index + 1..table_close)
            .map(|i| slot(scanner, i))
            .collect::<Result<Vec<_>>>()?;
        insert(
            &mut doc.schedule_tables,
            name,
            ScheduleTable { slots },
            scanner,
            index,
            "Schedule_tables",
        )?;
        index = table_close + 1;
    }
    debug!(count = doc.schedule_tables.len(), "parsed Schedule_tables");
    Ok(close)
}

/// The duration follows `delay`; lines without it carry the duration as the
/// third whitespace-separated token.
fn slot(scanner: &Scanner<'_>, index: usize) -> Result<ScheduleSlot> {
    let words: Vec<&str> = scanner.line(index).text.split_whitespace().collect();
    let (command_end, duration_at) = match words.iter().position(|t| *t == "delay") {
        Some(pos) => (pos, pos + 1),
        None => (2.min(words.len()), 2),
    };
    let delay_ms = words
        .get(duration_at)
        .and_then(|t| tokens::decimal(t))
        .ok_or_else(|| scanner.tokenization(index, "slot duration has no digits"))?;
    let frame_slot_name = words
        .first()
        .and_then(|t| t.split(['{', ';']).next())
        .unwrap_or_default()
        .to_string();
    Ok(ScheduleSlot {
        frame_slot_name,
        command: words[..command_end].join(" "),
        delay_ms,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, parsing::sections::test_support::lines};

    #[test]
    fn tables_in_order() -> Result<()> {
        let ls = lines(&[
            "Schedule_tables {",
            "  Normal {",
            "    CEM_Frm1 delay 15 ms ;",
            "    LSM_Frm1 delay 15 ms ;",
            "    CEM_Frm1 delay 20 ms ;",
            "  }",
            "  Diag {",
            "    AssignNAD { LSM } delay 10 ms ;",
            "    MasterReq delay 10.5 ms ;",
            "  }",
            "}",
        ]);
        let mut doc = Document::default();
        assert_eq!(extract(&Scanner::new(&ls), 0, &mut doc)?, 10);

        let normal = doc.schedule_tables().get("Normal").unwrap();
        let names: Vec<_> = normal.slots.iter().map(|s| s.frame_slot_name.as_str()).collect();
        assert_eq!(names, ["CEM_Frm1", "LSM_Frm1", "CEM_Frm1"]);
        assert_eq!(normal.cycle_time_ms(), 50.0);

        let diag = doc.schedule_tables().get("Diag").unwrap();
        assert_eq!(diag.slots[0].frame_slot_name, "AssignNAD");
        assert_eq!(diag.slots[0].command, "AssignNAD { LSM }");
        assert_eq!(diag.slots[1].delay_ms, 10.5);
        Ok(())
    }

    #[test]
    fn tab_separated_slots_without_delay_keyword() -> Result<()> {
        let ls = lines(&["Schedule_tables {", "\tT1 {", "\t\tAQSe_01\tdelay_cmd\t10 ms;", "\t}", "}"]);
        let mut doc = Document::default();
        extract(&Scanner::new(&ls), 0, &mut doc)?;
        let slot = &doc.schedule_tables().get("T1").unwrap().slots[0];
        assert_eq!(slot.frame_slot_name, "AQSe_01");
        assert_eq!(slot.delay_ms, 10.0);
        Ok(())
    }

    #[test]
    fn empty_section_and_empty_table() -> Result<()> {
        let ls = lines(&["Schedule_tables {", "}"]);
        let mut doc = Document::default();
        assert_eq!(extract(&Scanner::new(&ls), 0, &mut doc)?, 1);
        assert!(doc.schedule_tables().is_empty());

        let ls = lines(&["Schedule_tables {", "  Idle {", "  }", "}"]);
        let mut doc = Document::default();
        extract(&Scanner::new(&ls), 0, &mut doc)?;
        assert!(doc.schedule_tables().get("Idle").unwrap().slots.is_empty());
        Ok(())
    }

    #[test]
    fn missing_duration() {
        let ls = lines(&["Schedule_tables {", "  T1 {", "    F1 delay ms ;", "  }", "}"]);
        let err = extract(&Scanner::new(&ls), 0, &mut Document::default()).unwrap_err();
        assert!(matches!(err, Error::Tokenization { line: 3, .. }));
    }

    #[test]
    fn unterminated_section() {
        let ls = lines(&["Schedule_tables {", "  T1 {", "    F1 delay 10 ms ;", "  }"]);
        let err = extract(&Scanner::new(&ls), 0, &mut Document::default()).unwrap_err();
        assert!(matches!(err, Error::Structural { line: 1, .. }));
    }

    #[test]
    fn section_keyword_is_not_a_table_name() {
        let ls = lines(&["Schedule_tables {", "Signals {", "}"]);
        let err = extract(&Scanner::new(&ls), 0, &mut Document::default()).unwrap_err();
        assert!(matches!(err, Error::Structural { line: 1, .. }));
    }
}

//! Report history storage: load, upsert, and summarize vessel reports.

use rusqlite::{Connection, OptionalExtension, Row};

use crate::model::{ParseError, ReportRecord};

use super::{HistoryStore, Result, Storage, StorageError, Upserted, VesselSummary};

impl HistoryStore for Storage {
    fn history(&self, vessel_id: &str) -> Result<Vec<ReportRecord>> {
        let conn = self.open_db()?;
        load_records(
            &conn,
            "SELECT vessel_id, occurred_on, cargo_status, report_type FROM reports
             WHERE vessel_id = ?1
             ORDER BY occurred_on, id",
            rusqlite::params![vessel_id],
        )
    }

    fn upsert(&self, record: &ReportRecord) -> Result<Upserted> {
        let mut conn = self.open_db()?;
        let tx = conn.transaction()?;

        let existing: Option<i64> = tx
            .query_row(
                "SELECT id FROM reports
                 WHERE vessel_id = ?1 AND occurred_on = ?2 AND report_type = ?3",
                rusqlite::params![
                    &record.vessel_id,
                    record.occurred_on.to_string(),
                    record.report_type.label(),
                ],
                |row| row.get(0),
            )
            .optional()?;

        let upserted = match existing {
            Some(id) => {
                tx.execute(
                    "UPDATE reports SET cargo_status = ?1 WHERE id = ?2",
                    rusqlite::params![record.cargo_status.label(), id],
                )?;
                Upserted::Updated
            }
            None => {
                tx.execute(
                    "INSERT INTO reports (vessel_id, occurred_on, cargo_status, report_type)
                     VALUES (?1, ?2, ?3, ?4)",
                    rusqlite::params![
                        &record.vessel_id,
                        record.occurred_on.to_string(),
                        record.cargo_status.label(),
                        record.report_type.label(),
                    ],
                )?;
                Upserted::Inserted
            }
        };

        tx.commit()?;
        Ok(upserted)
    }

    fn vessels(&self) -> Result<Vec<VesselSummary>> {
        let conn = self.open_db()?;
        let records = load_records(
            &conn,
            "SELECT vessel_id, occurred_on, cargo_status, report_type FROM reports
             ORDER BY vessel_id, occurred_on, id",
            rusqlite::params![],
        )?;

        let mut vessels: Vec<VesselSummary> = Vec::new();
        for record in records {
            match vessels.last_mut() {
                Some(summary) if summary.vessel_id == record.vessel_id => {
                    summary.reports += 1;
                    summary.latest = record;
                }
                _ => vessels.push(VesselSummary {
                    vessel_id: record.vessel_id.clone(),
                    reports: 1,
                    latest: record,
                }),
            }
        }
        Ok(vessels)
    }
}

/// Runs a report query and parses every row.
fn load_records(
    conn: &Connection,
    sql: &str,
    params: &[&dyn rusqlite::ToSql],
) -> Result<Vec<ReportRecord>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(params, read_columns)?;

    let mut records = Vec::new();
    for row in rows {
        records.push(parse_record(row?)?);
    }
    Ok(records)
}

type Columns = (String, String, String, String);

fn read_columns(row: &Row<'_>) -> rusqlite::Result<Columns> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
}

/// Reconstructs a record from its stored text columns.
fn parse_record(
    (vessel_id, occurred_on, cargo_status, report_type): Columns,
) -> Result<ReportRecord> {
    let occurred_on = occurred_on
        .parse::<jiff::civil::Date>()
        .map_err(|e| StorageError::Corrupt(format!("invalid occurred_on: {e}")))?;
    let cargo_status = cargo_status
        .parse()
        .map_err(|e: ParseError| StorageError::Corrupt(e.to_string()))?;
    let report_type = report_type
        .parse()
        .map_err(|e: ParseError| StorageError::Corrupt(e.to_string()))?;

    Ok(ReportRecord {
        vessel_id,
        occurred_on,
        cargo_status,
        report_type,
    })
}

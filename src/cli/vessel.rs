//! Vessel commands: history, vessels.

use crate::{
    check::allowed_next,
    model::ReportType,
    storage::{HistoryStore, Storage},
};

use super::{format::format_vessel, to_json};

pub(super) fn cmd_history(storage: &Storage, vessel_id: &str) -> Result<(), String> {
    let history = storage
        .history(vessel_id.trim())
        .map_err(|e| format!("failed to load history: {e}"))?;

    println!("{}", to_json(&history)?);
    eprintln!("{} report(s) for {vessel_id}", history.len());
    Ok(())
}

pub(super) fn cmd_vessels(storage: &Storage) -> Result<(), String> {
    let vessels = storage
        .vessels()
        .map_err(|e| format!("failed to list vessels: {e}"))?;

    if vessels.is_empty() {
        println!("No vessels");
        return Ok(());
    }

    for summary in &vessels {
        let history = storage
            .history(&summary.vessel_id)
            .map_err(|e| format!("failed to load history for {}: {e}", summary.vessel_id))?;
        let types: Vec<ReportType> = history.iter().map(|r| r.report_type).collect();
        println!("{}", format_vessel(summary, &allowed_next(&types)));
    }

    Ok(())
}

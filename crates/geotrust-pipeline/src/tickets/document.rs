//! The ticket artifact: a markdown document with a pre-filled
//! `add_or_update_store` request.

use std::fmt::Write;

use chrono::NaiveDate;
use geotrust_core::models::{Geofence, StoreRecord, TicketReason};

/// Everything needed to render one ticket.
#[derive(Debug, Clone)]
pub struct TicketDocument<'a> {
    pub store_id: i64,
    pub day: NaiveDate,
    pub reason: TicketReason,
    pub transaction_count: u64,
    pub sample_transaction_ids: &'a [String],
    pub municipality: &'a str,
    /// Present when the store is already registered (unknown-municipality tickets).
    pub registered: Option<&'a StoreRecord>,
    pub geofence: &'a Geofence,
}

impl TicketDocument<'_> {
    pub fn title(&self) -> String {
        format!("Verify location of store {} ({})", self.store_id, self.day)
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_to(&mut out);
        out
    }

    fn write_to(&self, out: &mut String) -> std::fmt::Result {
        let fence = self.geofence;
        writeln!(out, "# {}", self.title())?;
        writeln!(out)?;

        writeln!(out, "## Issue")?;
        writeln!(out)?;
        match self.reason {
            TicketReason::UnregisteredStore => writeln!(
                out,
                "Store {} is referenced by transactions but is not in the store registry.",
                self.store_id
            )?,
            TicketReason::UnknownMunicipality => writeln!(
                out,
                "Store {} is registered, but transactions claim an unknown municipality.",
                self.store_id
            )?,
        }
        writeln!(out)?;
        writeln!(out, "- Unverified transactions: {}", self.transaction_count)?;
        writeln!(out, "- Observed municipality: {}", self.municipality)?;
        if self.sample_transaction_ids.is_empty() {
            writeln!(out, "- Sample transactions: none")?;
        } else {
            writeln!(
                out,
                "- Sample transactions: {}",
                self.sample_transaction_ids.join(", ")
            )?;
        }
        writeln!(out)?;

        writeln!(out, "## Required fields")?;
        writeln!(out)?;
        writeln!(out, "- [ ] Verified store name")?;
        writeln!(out, "- [ ] Municipality")?;
        writeln!(out, "- [ ] Barangay")?;
        writeln!(
            out,
            "- [ ] Latitude within [{}, {}]",
            fence.min_latitude, fence.max_latitude
        )?;
        writeln!(
            out,
            "- [ ] Longitude within [{}, {}]",
            fence.min_longitude, fence.max_longitude
        )?;
        writeln!(out)?;

        let (name, municipality, barangay, latitude, longitude) = match self.registered {
            Some(store) => (
                quoted(&store.store_name),
                quoted(&store.municipality),
                quoted(&store.barangay),
                store.latitude.to_string(),
                store.longitude.to_string(),
            ),
            None => (
                quoted("<verified store name>"),
                quoted(self.municipality),
                quoted("<barangay>"),
                format!("<{} to {}>", fence.min_latitude, fence.max_latitude),
                format!("<{} to {}>", fence.min_longitude, fence.max_longitude),
            ),
        };

        writeln!(out, "## Registry update")?;
        writeln!(out)?;
        writeln!(out, "```")?;
        writeln!(out, "add_or_update_store(")?;
        writeln!(out, "    store_id = {},", self.store_id)?;
        writeln!(out, "    store_name = {name},")?;
        writeln!(out, "    municipality = {municipality},")?;
        writeln!(out, "    barangay = {barangay},")?;
        writeln!(out, "    latitude = {latitude},")?;
        writeln!(out, "    longitude = {longitude},")?;
        writeln!(out, ")")?;
        writeln!(out, "```")?;
        writeln!(out)?;

        writeln!(out, "## Acceptance")?;
        writeln!(out)?;
        writeln!(out, "- [ ] `add_or_update_store` returns success")?;
        writeln!(out, "- [ ] Store {} is listed in the registry", self.store_id)?;
        writeln!(
            out,
            "- [ ] The next run reports no unverified transactions for store {}",
            self.store_id
        )?;
        Ok(())
    }
}

fn quoted(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\\\""))
}

//! Slots and the per-doctor slot ledger
//!
//! A slot is a `(date, time)` pair. Dates and times are opaque strings as
//! chosen by the booking client (e.g. `2024-01-10` / `10:00`); the ledger only
//! cares about equality.

use crate::error::{BookingError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A bookable `(date, time)` pair
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Slot {
    /// Slot date
    pub date: String,

    /// Slot time within the date
    pub time: String,
}

impl Slot {
    /// Create a slot, rejecting blank components
    pub fn new(date: impl Into<String>, time: impl Into<String>) -> Result<Self> {
        let date = date.into().trim().to_string();
        let time = time.into().trim().to_string();

        if date.is_empty() {
            return Err(BookingError::invalid_input("Slot date cannot be empty"));
        }
        if time.is_empty() {
            return Err(BookingError::invalid_input("Slot time cannot be empty"));
        }

        Ok(Self { date, time })
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.date, self.time)
    }
}

/// Booked times per date for one doctor
///
/// Each `(date, time)` appears at most once. Dates whose last time is
/// released are dropped, so an unbooked date and an empty date look the same
/// to callers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotLedger(BTreeMap<String, BTreeSet<String>>);

impl SlotLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether a slot is booked
    pub fn is_booked(&self, slot: &Slot) -> bool {
        self.0
            .get(&slot.date)
            .is_some_and(|times| times.contains(&slot.time))
    }

    /// Book a slot, failing with `SlotUnavailable` if it is already taken
    pub fn reserve(&mut self, slot: &Slot) -> Result<()> {
        let inserted = self
            .0
            .entry(slot.date.clone())
            .or_default()
            .insert(slot.time.clone());

        if inserted {
            Ok(())
        } else {
            Err(BookingError::SlotUnavailable)
        }
    }

    /// Free a slot. Returns whether it was booked; absent slots are a no-op.
    pub fn release(&mut self, slot: &Slot) -> bool {
        let Some(times) = self.0.get_mut(&slot.date) else {
            return false;
        };

        let removed = times.remove(&slot.time);
        if times.is_empty() {
            self.0.remove(&slot.date);
        }
        removed
    }

    /// Booked times on a date, in ascending order
    pub fn times_on(&self, date: &str) -> Vec<&str> {
        self.0
            .get(date)
            .map(|times| times.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Dates with at least one booking
    pub fn dates(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Total number of booked slots
    pub fn len(&self) -> usize {
        self.0.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over every booked slot
    pub fn slots(&self) -> impl Iterator<Item = Slot> + '_ {
        self.0.iter().flat_map(|(date, times)| {
            times.iter().map(move |time| Slot {
                date: date.clone(),
                time: time.clone(),
            })
        })
    }
}

impl FromIterator<Slot> for SlotLedger {
    fn from_iter<I: IntoIterator<Item = Slot>>(iter: I) -> Self {
        let mut ledger = Self::new();
        for slot in iter {
            ledger
                .0
                .entry(slot.date)
                .or_default()
                .insert(slot.time);
        }
        ledger
    }
}

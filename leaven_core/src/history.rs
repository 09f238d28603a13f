//! Recent calculations and named favorites.
//!
//! Both collections are plain values owned by the caller, which decides
//! where (and whether) to persist them. Everything here derives serde so a
//! caller can store them as JSON.

use crate::error::LeavenError;
use crate::estimator::{EstimateRequest, EstimateResult};
use crate::summary::DurationParts;
use crate::table::RiseTarget;
use crate::units::{Temperature, fahrenheit_to_celsius};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Number of calculations kept in [`History`].
pub const HISTORY_CAPACITY: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub recorded_at: NaiveDateTime,
    pub temperature_f: f64,
    pub temperature_c: i32,
    pub starter_percent: f64,
    pub rise_target: RiseTarget,
    pub estimated_hours: f64,
    pub parts: DurationParts,
}

impl HistoryEntry {
    pub fn new(recorded_at: NaiveDateTime, req: &EstimateRequest, result: &EstimateResult) -> Self {
        Self {
            recorded_at,
            temperature_f: req.temperature_f,
            temperature_c: fahrenheit_to_celsius(req.temperature_f),
            starter_percent: req.starter_percent,
            rise_target: req.rise_target,
            estimated_hours: result.hours,
            parts: DurationParts::from_hours(result.hours),
        }
    }

    /// The request this entry was computed from.
    pub fn request(&self) -> EstimateRequest {
        EstimateRequest::new(self.temperature_f, self.starter_percent, self.rise_target)
    }
}

/// Newest-first list of recent calculations, capped at [`HISTORY_CAPACITY`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend `entry`, dropping the oldest entries beyond capacity.
    pub fn record(&mut self, entry: HistoryEntry) {
        self.entries.push_front(entry);
        self.entries.truncate(HISTORY_CAPACITY);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }
}

pub type FavoriteId = u64;

/// Calculator inputs worth keeping under a name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteSettings {
    pub temperature: Temperature,
    pub starter_percent: f64,
    pub rise_target: RiseTarget,
    pub start_time: Option<NaiveDateTime>,
}

impl FavoriteSettings {
    pub fn request(&self) -> EstimateRequest {
        EstimateRequest::new(
            self.temperature.to_fahrenheit(),
            self.starter_percent,
            self.rise_target,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Favorite {
    pub id: FavoriteId,
    pub name: String,
    pub settings: FavoriteSettings,
}

/// Named favorites in insertion order. Ids are never reused within a
/// collection, even after removal.
///
/// Loading checks that ids are distinct and moves the counter past the
/// highest stored id if a saved value left it behind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawFavorites")]
pub struct Favorites {
    next_id: FavoriteId,
    items: Vec<Favorite>,
}

#[derive(Deserialize)]
struct RawFavorites {
    #[serde(default)]
    next_id: FavoriteId,
    #[serde(default)]
    items: Vec<Favorite>,
}

impl TryFrom<RawFavorites> for Favorites {
    type Error = LeavenError;
    fn try_from(raw: RawFavorites) -> Result<Self, Self::Error> {
        let mut ids: Vec<FavoriteId> = raw.items.iter().map(|f| f.id).collect();
        ids.sort_unstable();
        if let Some(w) = ids.windows(2).find(|w| w[0] == w[1]) {
            return Err(LeavenError::InvalidFavorites(format!(
                "duplicate id {}",
                w[0]
            )));
        }
        let next_id = match ids.last() {
            Some(&max) => max
                .checked_add(1)
                .ok_or(LeavenError::FavoriteIdsExhausted)?
                .max(raw.next_id),
            None => raw.next_id,
        };
        Ok(Self {
            next_id,
            items: raw.items,
        })
    }
}

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `settings` under the trimmed `name`.
    pub fn add(&mut self, name: &str, settings: FavoriteSettings) -> Result<FavoriteId, LeavenError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LeavenError::EmptyFavoriteName);
        }
        let id = self.next_id;
        self.next_id = id
            .checked_add(1)
            .ok_or(LeavenError::FavoriteIdsExhausted)?;
        self.items.push(Favorite {
            id,
            name: name.to_string(),
            settings,
        });
        Ok(id)
    }

    pub fn remove(&mut self, id: FavoriteId) -> Result<Favorite, LeavenError> {
        let pos = self
            .items
            .iter()
            .position(|f| f.id == id)
            .ok_or(LeavenError::UnknownFavorite(id))?;
        Ok(self.items.remove(pos))
    }

    pub fn get(&self, id: FavoriteId) -> Option<&Favorite> {
        self.items.iter().find(|f| f.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Favorite> {
        self.items.iter()
    }
}

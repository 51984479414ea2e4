//! In-memory registry of stations and the trains located at them.
//!
//! [`Registry`] owns all station/train state and is meant to be shared between
//! request handlers behind an `Arc`. Every operation takes the registry lock
//! for its whole check-then-mutate sequence, so each call is serializable with
//! respect to every other call and failures never leave partial mutations.
//!
//! # Example
//!
//! ```rust
//! use railways::{Registry, RegistryError};
//!
//! let registry = Registry::new();
//! registry.create_station("Amsterdam").unwrap();
//! registry.create_station("Utrecht").unwrap();
//! registry.add_train("Amsterdam", "IC-3000").unwrap();
//!
//! registry.trip("Amsterdam", "Utrecht", "IC-3000").unwrap();
//! assert_eq!(registry.list_trains("Utrecht").unwrap(), vec!["IC-3000"]);
//!
//! // Moving a train to where it already is is rejected
//! let err = registry.trip("Utrecht", "Utrecht", "IC-3000").unwrap_err();
//! assert!(matches!(err, RegistryError::SameStation { .. }));
//! ```
//!
//! # Invariants
//!
//! After every completed operation:
//! - every known train is a member of exactly one station's train set;
//! - the per-train location index agrees with the station sets;
//! - station names are unique.
//!
//! # Locking
//!
//! A single `RwLock` guards both the station map and the global train index.
//! Listing operations take the read lock and may run in parallel; mutations
//! take the write lock. A trip is therefore a single critical section: no
//! reader can observe the train in neither or both stations.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use parking_lot::RwLock;

use crate::error::{RegistryError, StationRole};

/// Registry state guarded by the lock.
#[derive(Debug, Default)]
struct Inner {
    /// Station name -> trains currently at that station.
    stations: BTreeMap<String, BTreeSet<String>>,
    /// Global train set, keyed by train name, valued by the holding station.
    trains: HashMap<String, String>,
}

impl Inner {
    fn station(&self, name: &str, role: StationRole) -> Result<&BTreeSet<String>, RegistryError> {
        self.stations
            .get(name)
            .ok_or_else(|| RegistryError::station_not_found(name, role))
    }
}

/// Thread-safe registry of stations and trains.
#[derive(Debug, Default)]
pub struct Registry {
    inner: RwLock<Inner>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Station lifecycle
    // ========================================================================

    /// Create a station with no trains.
    pub fn create_station(&self, name: &str) -> Result<(), RegistryError> {
        let mut inner = self.inner.write();
        if inner.stations.contains_key(name) {
            return Err(RegistryError::StationAlreadyExists {
                station: name.to_owned(),
            });
        }
        inner.stations.insert(name.to_owned(), BTreeSet::new());
        Ok(())
    }

    /// Delete a station.
    ///
    /// Trains still located at the station are removed from the system as
    /// well; their names are returned (sorted) and become free for reuse.
    pub fn delete_station(&self, name: &str) -> Result<Vec<String>, RegistryError> {
        let mut inner = self.inner.write();
        let trains = inner
            .stations
            .remove(name)
            .ok_or_else(|| RegistryError::station_not_found(name, StationRole::Station))?;
        for train in &trains {
            inner.trains.remove(train);
        }
        Ok(trains.into_iter().collect())
    }

    /// Names of all stations, sorted ascending.
    pub fn list_stations(&self) -> Vec<String> {
        self.inner.read().stations.keys().cloned().collect()
    }

    // ========================================================================
    // Trains
    // ========================================================================

    /// Place a new train at `station`.
    ///
    /// Train names are unique across the whole registry, not per station.
    pub fn add_train(&self, station: &str, train: &str) -> Result<(), RegistryError> {
        let mut guard = self.inner.write();
        let inner = &mut *guard;
        let Some(at_station) = inner.stations.get_mut(station) else {
            return Err(RegistryError::station_not_found(station, StationRole::Station));
        };
        if inner.trains.contains_key(train) {
            return Err(RegistryError::TrainAlreadyExists {
                train: train.to_owned(),
            });
        }
        inner.trains.insert(train.to_owned(), station.to_owned());
        at_station.insert(train.to_owned());
        Ok(())
    }

    /// Remove a train from `station` and from the system.
    ///
    /// A train that exists but sits at a different station is rejected with
    /// [`RegistryError::TrainNotAtStation`] and left untouched.
    pub fn remove_train(&self, station: &str, train: &str) -> Result<(), RegistryError> {
        let mut guard = self.inner.write();
        let inner = &mut *guard;
        let Some(at_station) = inner.stations.get_mut(station) else {
            return Err(RegistryError::station_not_found(station, StationRole::Station));
        };
        match inner.trains.get(train) {
            None => {
                return Err(RegistryError::TrainNotFound {
                    train: train.to_owned(),
                })
            }
            Some(at) if at != station => {
                return Err(RegistryError::TrainNotAtStation {
                    train: train.to_owned(),
                    station: station.to_owned(),
                })
            }
            Some(_) => {}
        }
        inner.trains.remove(train);
        at_station.remove(train);
        Ok(())
    }

    /// Names of the trains at `station`, sorted ascending.
    pub fn list_trains(&self, station: &str) -> Result<Vec<String>, RegistryError> {
        let inner = self.inner.read();
        let trains = inner.station(station, StationRole::Station)?;
        Ok(trains.iter().cloned().collect())
    }

    /// Move `train` from `from` to `to`.
    ///
    /// Checks run in a fixed order and the first failure is reported:
    /// departure exists, train is at departure, destination exists, stations
    /// differ. The removal and insertion happen under one write lock.
    pub fn trip(&self, from: &str, to: &str, train: &str) -> Result<(), RegistryError> {
        let mut inner = self.inner.write();

        if !inner.station(from, StationRole::Departure)?.contains(train) {
            return Err(RegistryError::TrainNotAtStation {
                train: train.to_owned(),
                station: from.to_owned(),
            });
        }
        inner.station(to, StationRole::Destination)?;
        if from == to {
            return Err(RegistryError::SameStation {
                station: from.to_owned(),
            });
        }

        // Both stations exist and differ; nothing below can fail.
        if let Some(departure) = inner.stations.get_mut(from) {
            departure.remove(train);
        }
        if let Some(destination) = inner.stations.get_mut(to) {
            destination.insert(train.to_owned());
        }
        if let Some(at) = inner.trains.get_mut(train) {
            to.clone_into(at);
        }
        Ok(())
    }

    // ========================================================================
    // Lookups
    // ========================================================================

    /// Station currently holding `train`, if the train exists.
    pub fn locate_train(&self, train: &str) -> Option<String> {
        self.inner.read().trains.get(train).cloned()
    }

    /// Every station with its trains, read under a single lock.
    pub fn snapshot(&self) -> BTreeMap<String, Vec<String>> {
        self.inner
            .read()
            .stations
            .iter()
            .map(|(station, trains)| (station.clone(), trains.iter().cloned().collect()))
            .collect()
    }

    /// Every train in the system, sorted ascending.
    pub fn list_all_trains(&self) -> Vec<String> {
        let inner = self.inner.read();
        let mut trains: Vec<String> = inner.trains.keys().cloned().collect();
        trains.sort_unstable();
        trains
    }
}

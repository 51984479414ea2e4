//! Error taxonomy for registry operations.
//!
//! Every variant is a caller error: the registry performs no I/O, so it never
//! fails transiently. Errors carry the offending identifiers so the transport
//! layer can format messages and pick a status code.

use core::fmt;

use thiserror::Error;

/// Which station argument of an operation a [`RegistryError::StationNotFound`]
/// refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StationRole {
    /// The single station named by a lifecycle or train operation.
    Station,
    /// The departure station of a trip.
    Departure,
    /// The destination station of a trip.
    Destination,
}

impl fmt::Display for StationRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Station => f.write_str("Station"),
            Self::Departure => f.write_str("Departure station"),
            Self::Destination => f.write_str("Destination station"),
        }
    }
}

/// Coarse classification of a [`RegistryError`], used for status mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The identifier is already in use.
    Conflict,
    /// A named station or train does not exist where expected.
    NotFound,
    /// The request is well-formed but asks for something meaningless.
    Invalid,
}

/// Error returned by [`Registry`](crate::Registry) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A station with this name already exists.
    #[error("Station {station} already exists")]
    StationAlreadyExists {
        /// Requested station name.
        station: String,
    },

    /// The named station is unknown.
    #[error("{role} {station} does not exist")]
    StationNotFound {
        /// Requested station name.
        station: String,
        /// Which argument named the station.
        role: StationRole,
    },

    /// A train with this name exists somewhere in the system.
    #[error("Train {train} already exists")]
    TrainAlreadyExists {
        /// Requested train name.
        train: String,
    },

    /// The train is not known anywhere in the system.
    #[error("Train {train} does not exist")]
    TrainNotFound {
        /// Requested train name.
        train: String,
    },

    /// The train is not located at the named station.
    #[error("Train {train} is not at station {station}")]
    TrainNotAtStation {
        /// Requested train name.
        train: String,
        /// Station the caller expected the train at.
        station: String,
    },

    /// Departure and destination of a trip are the same station.
    #[error("Departure and destination station {station} are the same")]
    SameStation {
        /// The station named twice.
        station: String,
    },
}

impl RegistryError {
    pub(crate) fn station_not_found(station: &str, role: StationRole) -> Self {
        Self::StationNotFound {
            station: station.to_owned(),
            role,
        }
    }

    /// Classify this error for the transport layer.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::StationAlreadyExists { .. } | Self::TrainAlreadyExists { .. } => {
                ErrorKind::Conflict
            }
            Self::StationNotFound { .. }
            | Self::TrainNotFound { .. }
            | Self::TrainNotAtStation { .. } => ErrorKind::NotFound,
            Self::SameStation { .. } => ErrorKind::Invalid,
        }
    }
}

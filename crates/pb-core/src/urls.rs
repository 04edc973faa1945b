//! Named routes and URL reversal.
//!
//! The router registers detail views from [`Route::pattern`], and records
//! build their canonical links with [`reverse`], so both sides always agree
//! on the path shape.

use std::fmt;

use crate::{Error, Result};

/// A named route with a single path parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Detail page of a peak.
    PeakDetail,
    /// Detail page of a climber.
    ClimberDetail,
}

impl Route {
    pub const ALL: [Route; 2] = [Route::PeakDetail, Route::ClimberDetail];

    /// The route name used for reversal.
    pub fn name(self) -> &'static str {
        match self {
            Self::PeakDetail => "toy-detail",
            Self::ClimberDetail => "climber-detail",
        }
    }

    /// Name of the single path parameter.
    pub fn param(self) -> &'static str {
        match self {
            Self::PeakDetail => "pk",
            Self::ClimberDetail => "climber_id",
        }
    }

    /// Axum path pattern (`{param}` placeholder syntax).
    pub fn pattern(self) -> &'static str {
        match self {
            Self::PeakDetail => "/peaks/{pk}/",
            Self::ClimberDetail => "/climbers/{climber_id}/",
        }
    }

    /// Look up a route by its name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.name() == name)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Build the path for `route` with its parameter set to `value`.
pub fn reverse(route: Route, value: impl fmt::Display) -> String {
    let placeholder = format!("{{{}}}", route.param());
    route.pattern().replace(&placeholder, &value.to_string())
}

/// Build a path from a route name and keyword arguments.
///
/// Fails when the name is unknown or the arguments do not match the
/// route's parameter exactly.
pub fn reverse_by_name(name: &str, kwargs: &[(&str, &str)]) -> Result<String> {
    let route = Route::from_name(name).ok_or_else(|| Error::not_found("route", name))?;

    match kwargs {
        [(key, value)] if *key == route.param() => Ok(reverse(route, value)),
        _ => {
            let given: Vec<&str> = kwargs.iter().map(|(k, _)| *k).collect();
            Err(Error::Validation(format!(
                "reverse for '{name}' expects argument '{}', got {given:?}",
                route.param()
            )))
        }
    }
}

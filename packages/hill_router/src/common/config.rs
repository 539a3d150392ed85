//! This module contains structs which represent the route configuration
//! options selected by the end user. The RouteConfig struct is used across
//! this package to parameterize a single route search.

use geo::Point;
use serde::Deserialize;
use std::str::FromStr;

use crate::common::error::{Error, Result};

/// Number of edges an alternate path between two anchor nodes may use
pub const DEFAULT_CUTOFF: usize = 10;

/// Number of binary search iterations used when minimizing elevation gain
pub const DEFAULT_ITERATIONS: usize = 10;

/// Sets the type of route being created (optimise for max elevation gain if
/// Hilly, min elevation gain if Flat, draw a comparison baseline if Random)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RouteMode {
    Hilly,
    Flat,
    Random,
}

impl FromStr for RouteMode {
    type Err = Error;

    fn from_str(input: &str) -> Result<RouteMode> {
        match input {
            "hilly" => Ok(RouteMode::Hilly),
            "flat" => Ok(RouteMode::Flat),
            "random" => Ok(RouteMode::Random),
            _ => Err(Error::InvalidRouteMode {
                mode: input.to_string(),
            }),
        }
    }
}

/// Stores the user's requested route configuration exactly as it is received
/// from the API
#[derive(Deserialize, Debug, PartialEq)]
pub struct UserRouteConfig {
    pub start_lat: f64,
    pub start_lon: f64,
    pub end_lat: f64,
    pub end_lon: f64,
    pub route_mode: String,
    pub percent_shortest_path: f64,
    pub cutoff: Option<usize>,
    pub iterations: Option<usize>,
}

impl TryFrom<UserRouteConfig> for RouteConfig {
    type Error = Error;

    fn try_from(user: UserRouteConfig) -> Result<RouteConfig> {
        let start = Point::new(user.start_lon, user.start_lat);
        let end = Point::new(user.end_lon, user.end_lat);

        let route_mode = RouteMode::from_str(&user.route_mode)?;

        Ok(RouteConfig {
            start,
            end,
            route_mode,
            percent_shortest_path: user.percent_shortest_path,
            cutoff: user.cutoff.unwrap_or(DEFAULT_CUTOFF),
            iterations: user.iterations.unwrap_or(DEFAULT_ITERATIONS),
        })
    }
}

/// Stores the user's requested route configuration in a format which can be
/// used in the rest of this package. It is not expected that this struct will
/// be directly instantiated by the API layer; users should first create a
/// UserRouteConfig and use try_into() to convert to RouteConfig
#[derive(Debug, Clone, PartialEq)]
pub struct RouteConfig {
    pub start: Point,
    pub end: Point,
    pub route_mode: RouteMode,
    pub percent_shortest_path: f64,
    pub cutoff: usize,
    pub iterations: usize,
}

impl RouteConfig {
    /// Create a configuration for direct library use, with the default
    /// alternate-path cutoff and minimization iteration count
    pub fn new(route_mode: RouteMode, percent_shortest_path: f64) -> Self {
        RouteConfig {
            start: Point::new(0.0, 0.0),
            end: Point::new(0.0, 0.0),
            route_mode,
            percent_shortest_path,
            cutoff: DEFAULT_CUTOFF,
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    /// Success case for creation of a new RouteMode
    #[test]
    fn test_new_route_mode_ok() {
        let maybe_result = RouteMode::from_str("flat");
        let target = RouteMode::Flat;

        match maybe_result {
            Ok(result) => {
                assert_eq!(result, target)
            }
            Err(_) => panic!("Should have received a value!"),
        }
    }

    /// Failure case for creation of a new RouteMode
    #[test]
    fn test_new_route_mode_err() -> std::result::Result<(), String> {
        let maybe_result = RouteMode::from_str("other");

        match maybe_result {
            Ok(_) => Err("Should not have received a value!".to_string()),
            Err(_) => Ok(()),
        }
    }

    /// Check conversion from UserRouteConfig to RouteConfig retains all of
    /// the necessary information and fills in defaults
    #[test]
    fn test_user_config_to_route_config() {
        let test_user_config = UserRouteConfig {
            start_lat: 0.1,
            start_lon: 0.2,
            end_lat: 0.3,
            end_lon: 0.4,
            route_mode: "hilly".to_string(),
            percent_shortest_path: 1.5,
            cutoff: None,
            iterations: Some(20),
        };

        let target = RouteConfig {
            start: (0.2, 0.1).into(),
            end: (0.4, 0.3).into(),
            route_mode: RouteMode::Hilly,
            percent_shortest_path: 1.5,
            cutoff: DEFAULT_CUTOFF,
            iterations: 20,
        };

        let result: RouteConfig = test_user_config
            .try_into()
            .expect("Conversion should have succeeded");

        assert_eq!(result, target)
    }

    /// Check that an unknown mode string surfaces InvalidRouteMode rather
    /// than defaulting
    #[test]
    fn test_user_config_invalid_mode() {
        let test_user_config = UserRouteConfig {
            start_lat: 0.1,
            start_lon: 0.2,
            end_lat: 0.3,
            end_lon: 0.4,
            route_mode: "rolling".to_string(),
            percent_shortest_path: 1.5,
            cutoff: None,
            iterations: None,
        };

        let result: Result<RouteConfig> = test_user_config.try_into();

        match result {
            Err(Error::InvalidRouteMode { mode }) => {
                assert_eq!(mode, "rolling".to_string())
            }
            _ => panic!("Should have received an InvalidRouteMode error"),
        }
    }
}

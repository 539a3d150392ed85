//! Defines the struct which contains high level information about a route
//! (total distance travelled and total elevation gained)

use serde::Serialize;

/// Container for the aggregate metrics of a completed route. Both values are
/// sums over the resolved edges of the route
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteMetrics {
    pub dist: f64,
    pub gain: f64,
}

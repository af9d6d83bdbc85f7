use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    pub routes_created_total: IntCounterVec,
    pub routes_stored: IntGauge,
    pub waypoints_dropped_total: IntCounter,
    pub route_compute_seconds: HistogramVec,
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let routes_created_total = IntCounterVec::new(
            Opts::new("routes_created_total", "Route submissions by outcome"),
            &["outcome"],
        )
        .expect("valid routes_created_total metric");

        let routes_stored = IntGauge::new("routes_stored", "Routes currently stored")
            .expect("valid routes_stored metric");

        let waypoints_dropped_total = IntCounter::new(
            "waypoints_dropped_total",
            "Waypoint candidates dropped for missing coordinates",
        )
        .expect("valid waypoints_dropped_total metric");

        let route_compute_seconds = HistogramVec::new(
            HistogramOpts::new(
                "route_compute_seconds",
                "Time spent validating and measuring a waypoint set",
            ),
            &["operation"],
        )
        .expect("valid route_compute_seconds metric");

        registry
            .register(Box::new(routes_created_total.clone()))
            .expect("register routes_created_total");
        registry
            .register(Box::new(routes_stored.clone()))
            .expect("register routes_stored");
        registry
            .register(Box::new(waypoints_dropped_total.clone()))
            .expect("register waypoints_dropped_total");
        registry
            .register(Box::new(route_compute_seconds.clone()))
            .expect("register route_compute_seconds");

        Self {
            registry,
            routes_created_total,
            routes_stored,
            waypoints_dropped_total,
            route_compute_seconds,
        }
    }

    pub fn encode(&self) -> Result<String, String> {
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();

        TextEncoder::new()
            .encode(&metric_families, &mut buffer)
            .map_err(|err| format!("failed to encode metrics: {err}"))?;

        String::from_utf8(buffer).map_err(|err| format!("metrics are not valid utf8: {err}"))
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
